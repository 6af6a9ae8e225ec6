//! Per-good market: collects a cycle's orders and clears them in one pass.
//!
//! Agents [`Market::post`] during the cycle; the orchestrator then calls
//! [`Market::clear`], which matches, recomputes the cycle statistics, notifies
//! every owner, and empties the market for the next cycle.

use log::{debug, info, warn};
use rust_decimal::Decimal;

use crate::agent::AgentDirectory;
use crate::error::ClearError;
use crate::matching::run_pass;
use crate::permutation::PermutationSource;
use crate::signal::{classify_fill, classify_resting};
use crate::types::{AgentId, Good, Order, Price, Side, Signal, Size};

/// Statistics of the most recent clearing pass. All zero before the first pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MarketState {
    /// Best resting buy price after clearing (0 if none).
    pub bid: Price,
    /// Best resting sell price after clearing (0 if none).
    pub ask: Price,
    /// Execution price of the last fill (0 if nothing traded).
    pub last: Price,
    /// Highest execution price (0 if nothing traded).
    pub high: Price,
    /// Lowest execution price (0 if nothing traded).
    pub low: Price,
    /// Units traded, saturating at `Size::MAX`.
    pub volume: Size,
}

/// Summary of one clearing pass.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ClearReport {
    pub good: Good,
    /// 1-based index of this pass.
    pub cycle: u64,
    pub fills: usize,
    /// Orders that were still resting at the end of the pass.
    pub unfilled: usize,
    /// Malformed orders dropped at `post` during this cycle.
    pub dropped: usize,
    pub state: MarketState,
}

/// Market for a single good.
#[derive(Debug)]
pub struct Market {
    good: Good,
    orders: Vec<Order>,
    state: MarketState,
    cycle: u64,
    cycle_dropped: usize,
    total_dropped: u64,
}

impl Market {
    pub fn new(good: Good) -> Self {
        Self {
            good,
            orders: Vec::new(),
            state: MarketState::default(),
            cycle: 0,
            cycle_dropped: 0,
            total_dropped: 0,
        }
    }

    pub fn good(&self) -> Good {
        self.good
    }

    /// Queue an order for the next clearing pass. Orders without a positive
    /// price and size are dropped silently. No matching happens here.
    pub fn post(&mut self, order: Order) {
        if !order.is_valid() {
            debug!(
                "order dropped good={:?} owner={} side={:?} price={} size={}",
                self.good, order.owner.0, order.side, order.price, order.size
            );
            self.cycle_dropped += 1;
            self.total_dropped += 1;
            return;
        }
        self.orders.push(order);
    }

    /// Run one clearing pass.
    ///
    /// Orders are admitted in the order drawn from `permutations`. Resting
    /// orders are reported through `on_unfilled` first, then every fill is
    /// reported to both owners in the order it was produced. Owners that no
    /// longer resolve in `agents` are skipped.
    ///
    /// On error nobody is notified, the statistics are left as they were and
    /// the cycle's orders are discarded.
    pub fn clear<P, D>(
        &mut self,
        permutations: &mut P,
        agents: &mut D,
    ) -> Result<ClearReport, ClearError>
    where
        P: PermutationSource + ?Sized,
        D: AgentDirectory + ?Sized,
    {
        let orders = std::mem::take(&mut self.orders);
        let dropped = std::mem::take(&mut self.cycle_dropped);
        self.cycle += 1;

        let posted = orders.len();
        let permutation = permutations.permutation(posted);
        let pass = run_pass(orders, &permutation)?;

        // Quotes first: every signal below is judged against them. A quiet
        // cycle leaves the previous quotes standing.
        if posted > 0 {
            self.state.bid = pass.book.best_bid().unwrap_or(Decimal::ZERO);
            self.state.ask = pass.book.best_ask().unwrap_or(Decimal::ZERO);
        }
        let (bid, ask) = (self.state.bid, self.state.ask);

        let resting = pass.book.into_resting();
        for order in &resting {
            let quote = match order.side {
                Side::Buy => bid,
                Side::Sell => ask,
            };
            let signal = classify_resting(order.price, quote);
            self.notify_unfilled(agents, order, signal);
        }

        self.state.volume = 0;
        self.state.last = Decimal::ZERO;
        self.state.high = Decimal::ZERO;
        self.state.low = Decimal::ZERO;
        for fill in &pass.fills {
            let (buyer_signal, seller_signal) = classify_fill(fill.price, bid, ask);
            debug!(
                "fill good={:?} buyer={} seller={} price={} size={} aggressor={:?} \
                 signals={:?}/{:?}",
                self.good,
                fill.buyer.0,
                fill.seller.0,
                fill.price,
                fill.size,
                fill.aggressor,
                buyer_signal,
                seller_signal
            );
            self.notify_fill(agents, fill.buyer, Side::Buy, fill.price, fill.size, buyer_signal);
            self.notify_fill(agents, fill.seller, Side::Sell, fill.price, fill.size, seller_signal);

            if self.state.high == Decimal::ZERO || fill.price > self.state.high {
                self.state.high = fill.price;
            }
            if self.state.low == Decimal::ZERO || fill.price < self.state.low {
                self.state.low = fill.price;
            }
            self.state.last = fill.price;
            self.state.volume = self.state.volume.saturating_add(fill.size);
        }

        info!(
            "market cleared good={:?} cycle={} orders={} fills={} unfilled={} dropped={} \
             bid={} ask={} last={} volume={}",
            self.good,
            self.cycle,
            posted,
            pass.fills.len(),
            resting.len(),
            dropped,
            self.state.bid,
            self.state.ask,
            self.state.last,
            self.state.volume
        );

        Ok(ClearReport {
            good: self.good,
            cycle: self.cycle,
            fills: pass.fills.len(),
            unfilled: resting.len(),
            dropped,
            state: self.state,
        })
    }

    fn notify_fill<D>(
        &self,
        agents: &mut D,
        owner: AgentId,
        side: Side,
        price: Price,
        size: Size,
        signal: Signal,
    ) where
        D: AgentDirectory + ?Sized,
    {
        match agents.agent_mut(owner) {
            Some(agent) => agent.on_fill(self.good, side, price, size, signal),
            None => warn!("fill for unknown agent good={:?} owner={}", self.good, owner.0),
        }
    }

    fn notify_unfilled<D>(&self, agents: &mut D, order: &Order, signal: Signal)
    where
        D: AgentDirectory + ?Sized,
    {
        match agents.agent_mut(order.owner) {
            Some(agent) => {
                agent.on_unfilled(self.good, order.side, order.price, order.size, signal)
            }
            None => warn!(
                "unfilled order for unknown agent good={:?} owner={}",
                self.good, order.owner.0
            ),
        }
    }

    /// Best resting buy price after the last pass.
    pub fn bid(&self) -> Price {
        self.state.bid
    }

    /// Best resting sell price after the last pass.
    pub fn ask(&self) -> Price {
        self.state.ask
    }

    pub fn last(&self) -> Price {
        self.state.last
    }

    pub fn high(&self) -> Price {
        self.state.high
    }

    pub fn low(&self) -> Price {
        self.state.low
    }

    pub fn volume(&self) -> Size {
        self.state.volume
    }

    pub fn state(&self) -> MarketState {
        self.state
    }

    /// Clearing passes run so far, failed ones included.
    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    /// Orders waiting for the next pass.
    pub fn pending_orders(&self) -> &[Order] {
        &self.orders
    }

    /// Malformed orders dropped since the market was created.
    pub fn dropped_orders(&self) -> u64 {
        self.total_dropped
    }
}
