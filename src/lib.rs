//! # Cycle Market
//!
//! Per-cycle double-auction clearing for agent-based economy simulations: one
//! market per good, orders collected during a cycle, one clearing pass that
//! matches by price priority and tells every owner how its orders fared.
//!
//! ## Entry point
//!
//! Use [`Market`] for a single good: [`Market::post`] orders, then
//! [`Market::clear`] with a [`PermutationSource`] (admission order) and an
//! [`AgentDirectory`] (who gets notified). [`World`] bundles one market per
//! [`Good`].
//!
//! ## Example
//!
//! ```rust
//! use cycle_market::{AgentId, Good, Ledger, Market, Order, SequentialPermutation};
//! use rust_decimal::Decimal;
//!
//! let mut agents = vec![Ledger::default(), Ledger::default()];
//! let mut market = Market::new(Good::Grain);
//! market.post(Order::sell(AgentId(0), Decimal::from(10), 100));
//! market.post(Order::buy(AgentId(1), Decimal::from(12), 10));
//! let report = market.clear(&mut SequentialPermutation, &mut agents).unwrap();
//! assert_eq!(report.fills, 1);
//! assert_eq!(market.volume(), 10);
//! assert_eq!(market.ask(), Decimal::from(10));
//! assert_eq!(agents[1].inventory(Good::Grain), 10);
//! ```
//!
//! ## Lower-level API
//!
//! [`OrderBook`] and [`run_pass`] expose the matching step on its own, without
//! statistics or notifications.

pub mod agent;
pub mod error;
pub mod ledger;
pub mod market;
pub mod matching;
pub mod order_book;
pub mod order_gen;
pub mod permutation;
pub mod signal;
pub mod types;
pub mod world;

pub use agent::{AgentDirectory, MarketAgent};
pub use error::ClearError;
pub use ledger::Ledger;
pub use market::{ClearReport, Market, MarketState};
pub use matching::{run_pass, ClearingPass};
pub use order_book::{Fill, OrderBook};
pub use order_gen::{post_all, Generator, GeneratorConfig};
pub use permutation::{
    validate_permutation, FixedPermutation, PermutationSource, RandomPermutation,
    SequentialPermutation, SharedPermutation,
};
pub use signal::{classify_fill, classify_resting};
pub use types::{AgentId, Good, Order, Price, Side, Signal, Size};
pub use world::World;
