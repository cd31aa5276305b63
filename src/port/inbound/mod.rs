//! Inbound (driving) ports consumed by inbound adapters.
//!
//! - [`feed`]: Raw payload subscription feeding the pipeline

pub mod feed;
