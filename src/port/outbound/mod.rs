//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! These contracts describe the pipeline's external collaborators: the user
//! store read at startup, the per-user filter predicate and the messaging
//! client.

pub mod filter;
pub mod notifier;
pub mod store;
