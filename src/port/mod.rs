//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! Ports are the seams between the pipeline and the outside world:
//!
//! ```text
//!  ┌──────────────┐      ┌──────────────────────────┐      ┌──────────────┐
//!  │ PayloadSource│ ───▶ │ consumer → evaluator →   │ ───▶ │ MessageSender│
//!  │  (pub/sub)   │      │ composer → dispatcher    │      │  (Telegram)  │
//!  └──────────────┘      └──────────────────────────┘      └──────────────┘
//!                           ▲                  ▲
//!                    ┌──────┴─────┐    ┌───────┴──────────┐
//!                    │ UserStore  │    │ OpportunityFilter│
//!                    └────────────┘    └──────────────────┘
//! ```
//!
//! - [`inbound`] - Driving side: raw payload subscriptions.
//! - [`outbound`] - Driven side: user store, filter predicate, message delivery.

pub mod inbound;
pub mod outbound;
