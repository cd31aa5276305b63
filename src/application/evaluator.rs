//! Opportunity evaluation against the user registry.
//!
//! Runs the filter for every registered user and prices the trade for each
//! match. The registry read lock is held only for this synchronous pass; the
//! result is handed to the dispatcher after the lock is released, so no
//! guard ever lives across an await.

use std::ops::ControlFlow;
use std::sync::Arc;

use tracing::{debug, warn};

use super::registry::UserRegistry;
use crate::domain::economics::TradeEconomics;
use crate::domain::{opportunity::Opportunity, user::User};
use crate::port::outbound::filter::OpportunityFilter;

/// One user that matched an opportunity, with their priced trade.
#[derive(Debug, Clone)]
pub struct Match {
    pub user: Arc<User>,
    pub economics: TradeEconomics,
}

/// Outcome of evaluating one opportunity.
#[derive(Debug, Default)]
pub struct Evaluation {
    /// Matched users in ascending id order.
    pub matches: Vec<Match>,
    /// Users the filter turned down.
    pub rejected: usize,
    /// Matched users whose trade could not be priced.
    pub failed: usize,
}

impl Evaluation {
    /// Number of users considered.
    #[must_use]
    pub fn considered(&self) -> usize {
        self.matches.len() + self.rejected + self.failed
    }
}

/// Evaluates opportunities for every registered user.
pub struct OpportunityEvaluator {
    registry: Arc<UserRegistry>,
    filter: Arc<dyn OpportunityFilter>,
}

impl OpportunityEvaluator {
    #[must_use]
    pub fn new(registry: Arc<UserRegistry>, filter: Arc<dyn OpportunityFilter>) -> Self {
        Self { registry, filter }
    }

    /// Filter and price `opportunity` for every user.
    ///
    /// A user whose economics fail (insufficient liquidity, non-positive
    /// volume, overflow) is logged and skipped; the remaining users are still
    /// evaluated.
    pub fn evaluate(&self, opportunity: &Opportunity) -> Evaluation {
        let mut evaluation = Evaluation::default();

        self.registry.for_each(|user| {
            if !self.filter.matches(opportunity, user) {
                evaluation.rejected += 1;
                return ControlFlow::Continue(());
            }

            match TradeEconomics::evaluate(opportunity, user) {
                Ok(economics) => evaluation.matches.push(Match {
                    user: Arc::clone(user),
                    economics,
                }),
                Err(e) => {
                    warn!(
                        user = %user.id(),
                        symbol = opportunity.symbol(),
                        withdrawal_exchange = opportunity.withdrawal_exchange(),
                        deposit_exchange = opportunity.deposit_exchange(),
                        error = %e,
                        "Skipping user"
                    );
                    evaluation.failed += 1;
                }
            }
            ControlFlow::Continue(())
        });

        evaluation.matches.sort_by_key(|m| m.user.id());

        debug!(
            symbol = opportunity.symbol(),
            filter = self.filter.name(),
            considered = evaluation.considered(),
            matched = evaluation.matches.len(),
            rejected = evaluation.rejected,
            failed = evaluation.failed,
            "Opportunity evaluated"
        );
        evaluation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::book::{OrderBook, PriceLevel};
    use crate::domain::id::{ChatId, UserId};
    use crate::port::outbound::filter::AcceptAll;
    use rust_decimal_macros::dec;

    struct RejectOdd;

    impl OpportunityFilter for RejectOdd {
        fn matches(&self, _opportunity: &Opportunity, user: &User) -> bool {
            user.id().get() % 2 == 0
        }

        fn name(&self) -> &'static str {
            "reject_odd"
        }
    }

    fn opportunity() -> Opportunity {
        Opportunity::builder()
            .symbol("BTC")
            .withdrawal_exchange("Mexc")
            .deposit_exchange("Kucoin")
            .book(OrderBook::new(
                vec![
                    PriceLevel::new(dec!(100), dec!(600)),
                    PriceLevel::new(dec!(101), dec!(1000)),
                ],
                vec![PriceLevel::new(dec!(103), dec!(2000))],
            ))
            .available_ask_volume(dec!(1500))
            .build()
            .unwrap()
    }

    fn user(id: i64, max: rust_decimal::Decimal) -> User {
        User::new(UserId::new(id), ChatId::new(id)).with_volume_bounds(dec!(0), max)
    }

    #[test]
    fn test_matches_are_priced_with_clamped_volume() {
        let registry = Arc::new(UserRegistry::from_users([user(1, dec!(1000))]));
        let evaluator = OpportunityEvaluator::new(registry, Arc::new(AcceptAll));

        let evaluation = evaluator.evaluate(&opportunity());

        assert_eq!(evaluation.matches.len(), 1);
        let econ = evaluation.matches[0].economics;
        assert_eq!(econ.volume, dec!(1000));
        assert_eq!(econ.buy_price, dec!(100.4));
        assert_eq!(econ.sell_price, dec!(103));
    }

    #[test]
    fn test_rejected_users_are_counted() {
        let registry = Arc::new(UserRegistry::from_users(
            (1..=4).map(|id| user(id, dec!(100))),
        ));
        let evaluator = OpportunityEvaluator::new(registry, Arc::new(RejectOdd));

        let evaluation = evaluator.evaluate(&opportunity());

        let ids: Vec<i64> = evaluation.matches.iter().map(|m| m.user.id().get()).collect();
        assert_eq!(ids, vec![2, 4]);
        assert_eq!(evaluation.rejected, 2);
        assert_eq!(evaluation.considered(), 4);
    }

    #[test]
    fn test_failed_user_does_not_stop_others() {
        // Asks hold 600, so only user 1 cannot fill.
        let opp = Opportunity::builder()
            .symbol("BTC")
            .withdrawal_exchange("Mexc")
            .deposit_exchange("Kucoin")
            .book(OrderBook::new(
                vec![PriceLevel::new(dec!(100), dec!(600))],
                vec![PriceLevel::new(dec!(103), dec!(2000))],
            ))
            .available_ask_volume(dec!(1500))
            .build()
            .unwrap();
        let registry = Arc::new(UserRegistry::from_users([
            user(1, dec!(1000)),
            user(2, dec!(500)),
            user(3, dec!(50)),
        ]));
        let evaluator = OpportunityEvaluator::new(registry, Arc::new(AcceptAll));

        let evaluation = evaluator.evaluate(&opp);

        assert_eq!(evaluation.failed, 1);
        let ids: Vec<i64> = evaluation.matches.iter().map(|m| m.user.id().get()).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn test_empty_registry() {
        let evaluator =
            OpportunityEvaluator::new(Arc::new(UserRegistry::new()), Arc::new(AcceptAll));
        let evaluation = evaluator.evaluate(&opportunity());
        assert!(evaluation.matches.is_empty());
        assert_eq!(evaluation.considered(), 0);
    }
}
