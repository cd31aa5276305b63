//! Application services.
//!
//! The processing side of the pipeline: registry, evaluation, notification
//! and the run loop that ties them together.

pub mod evaluator;
pub mod filter;
pub mod handoff;
pub mod notification;
pub mod pipeline;
pub mod registry;
pub mod stats;
