//! Infrastructure layer.
//!
//! Configuration, wiring and process lifecycle. No pipeline logic lives here.
//!
//! - [`bootstrap`] - Composition root for runtime wiring
//! - [`config`] - Configuration loading and validation
//! - [`runtime`] - Task lifecycle and shutdown

pub mod bootstrap;
pub mod config;
pub mod runtime;
