//! Notification contract between a market and the agents that post into it.
//!
//! The market holds only [`AgentId`]s. At clearing time the caller lends an
//! [`AgentDirectory`] that turns those handles into callback targets for the
//! duration of the pass.

use crate::types::{AgentId, Good, Price, Side, Signal, Size};

/// Implemented by every order owner. Callbacks must be cheap bookkeeping; they
/// run synchronously inside `Market::clear`.
pub trait MarketAgent {
    /// Some or all of an order traded at `price`.
    fn on_fill(&mut self, good: Good, side: Side, price: Price, size: Size, signal: Signal);

    /// `size` units of an order at `price` were still resting when the pass ended.
    fn on_unfilled(&mut self, good: Good, side: Side, price: Price, size: Size, signal: Signal);
}

impl<A: MarketAgent + ?Sized> MarketAgent for Box<A> {
    fn on_fill(&mut self, good: Good, side: Side, price: Price, size: Size, signal: Signal) {
        (**self).on_fill(good, side, price, size, signal)
    }

    fn on_unfilled(&mut self, good: Good, side: Side, price: Price, size: Size, signal: Signal) {
        (**self).on_unfilled(good, side, price, size, signal)
    }
}

/// Resolves owner handles to agents. `None` means the agent no longer exists.
pub trait AgentDirectory {
    fn agent_mut(&mut self, id: AgentId) -> Option<&mut dyn MarketAgent>;
}

impl<A: MarketAgent> AgentDirectory for [A] {
    fn agent_mut(&mut self, id: AgentId) -> Option<&mut dyn MarketAgent> {
        self.get_mut(id.0).map(|a| a as &mut dyn MarketAgent)
    }
}

impl<A: MarketAgent> AgentDirectory for Vec<A> {
    fn agent_mut(&mut self, id: AgentId) -> Option<&mut dyn MarketAgent> {
        self.as_mut_slice().agent_mut(id)
    }
}
