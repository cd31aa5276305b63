use std::path::{Path, PathBuf};

/// Minimal dry-run configuration pointing at `database`.
pub fn dry_run_toml(database: &str) -> String {
    format!(
        r#"
database = "{database}"
dry_run = true

[feed]
redis_addr = "localhost:6379"
channel = "arbitrage:spot:update"

[logging]
level = "warn"
format = "pretty"
"#
    )
}

/// Write `contents` as `config.toml` inside `dir`.
pub fn write_config(dir: &Path, contents: &str) -> PathBuf {
    let path = dir.join("config.toml");
    std::fs::write(&path, contents).expect("write config");
    path
}
