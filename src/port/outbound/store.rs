//! Persistence port for subscribed users.

use std::future::Future;

use crate::domain::user::User;
use crate::error::Result;

/// Read access to the persistent user store.
///
/// Consulted once at startup; the pipeline performs no writes.
pub trait UserStore: Send + Sync {
    /// Load every active user with blacklists normalized.
    fn load_active_users(&self) -> impl Future<Output = Result<Vec<User>>> + Send;
}
