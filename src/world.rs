//! Multi-good orchestration: one [`Market`] per [`Good`], cleared together.
//!
//! The world owns the permutation source, so every market draws its admission
//! order from the same generator, one market at a time.
//!
//! A world cycle is all-or-nothing: every market's permutation is drawn and
//! checked before any market matches or notifies an agent.

use crate::agent::AgentDirectory;
use crate::error::ClearError;
use crate::market::{ClearReport, Market};
use crate::permutation::{validate_permutation, FixedPermutation, PermutationSource};
use crate::types::{Good, Order};

#[derive(Debug)]
pub struct World<P> {
    markets: Vec<Market>,
    permutations: P,
    cycle: u64,
}

impl<P: PermutationSource> World<P> {
    pub fn new(permutations: P) -> Self {
        Self {
            markets: Good::ALL.iter().map(|&g| Market::new(g)).collect(),
            permutations,
            cycle: 0,
        }
    }

    pub fn market(&self, good: Good) -> &Market {
        &self.markets[good.index()]
    }

    pub fn market_mut(&mut self, good: Good) -> &mut Market {
        &mut self.markets[good.index()]
    }

    pub fn markets(&self) -> &[Market] {
        &self.markets
    }

    /// Post an order into the market for `good`.
    pub fn post(&mut self, good: Good, order: Order) {
        self.market_mut(good).post(order);
    }

    /// Completed world cycles.
    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    /// Clear every market in [`Good::ALL`] order.
    ///
    /// Permutations are drawn for all markets up front. If any of them is
    /// invalid, no market is cleared, no agent is notified, posted orders stay
    /// queued, and the world cycle does not advance.
    pub fn clear<D>(&mut self, agents: &mut D) -> Result<Vec<ClearReport>, ClearError>
    where
        D: AgentDirectory + ?Sized,
    {
        let mut drawn = Vec::with_capacity(self.markets.len());
        for market in &self.markets {
            let posted = market.pending_orders().len();
            let perm = self.permutations.permutation(posted);
            validate_permutation(&perm, posted)?;
            drawn.push(perm);
        }

        let mut reports = Vec::with_capacity(self.markets.len());
        for (market, perm) in self.markets.iter_mut().zip(drawn) {
            reports.push(market.clear(&mut FixedPermutation(perm), agents)?);
        }
        self.cycle += 1;
        Ok(reports)
    }
}
