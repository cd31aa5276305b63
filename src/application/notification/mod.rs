//! Turning matches into delivered messages.

pub mod dispatch;
pub mod format;

pub use dispatch::{DispatchReport, Dispatcher};
pub use format::MessageComposer;
