//! Per-user opportunity filter port.

use crate::domain::{opportunity::Opportunity, user::User};

/// Decides whether a user wants to hear about an opportunity.
///
/// The pipeline treats this as an opaque predicate. Implementations must be
/// pure with respect to the pipeline: no I/O, no mutation of the user.
pub trait OpportunityFilter: Send + Sync {
    /// Returns `true` if `user` should be notified about `opportunity`.
    fn matches(&self, opportunity: &Opportunity, user: &User) -> bool;

    /// Filter name for logging and debugging.
    fn name(&self) -> &'static str;
}

/// Accepts every opportunity for every user.
pub struct AcceptAll;

impl OpportunityFilter for AcceptAll {
    fn matches(&self, _opportunity: &Opportunity, _user: &User) -> bool {
        true
    }

    fn name(&self) -> &'static str {
        "accept_all"
    }
}
