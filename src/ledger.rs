//! Per-agent bookkeeping driven by market notifications.
//!
//! A [`Ledger`] is the minimal [`MarketAgent`]: it settles fills into cash and
//! inventory and remembers the last signal seen in each market, which is what
//! pricing strategies read when they quote for the next cycle.

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::agent::MarketAgent;
use crate::types::{Good, Price, Side, Signal, Size};

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct Ledger {
    cash: Decimal,
    inventory: HashMap<Good, i64>,
    last_signal: HashMap<Good, Signal>,
    unfilled: HashMap<Good, Size>,
}

impl Ledger {
    pub fn new(cash: Decimal) -> Self {
        Self {
            cash,
            ..Self::default()
        }
    }

    pub fn cash(&self) -> Decimal {
        self.cash
    }

    /// Net units held; negative after selling more than was bought.
    pub fn inventory(&self, good: Good) -> i64 {
        self.inventory.get(&good).copied().unwrap_or(0)
    }

    pub fn last_signal(&self, good: Good) -> Option<Signal> {
        self.last_signal.get(&good).copied()
    }

    /// Units left unfilled in `good` since the last [`Ledger::start_cycle`].
    pub fn unfilled(&self, good: Good) -> Size {
        self.unfilled.get(&good).copied().unwrap_or(0)
    }

    /// Forget per-cycle unfilled quantities. Cash, inventory, and signals persist.
    pub fn start_cycle(&mut self) {
        self.unfilled.clear();
    }
}

impl MarketAgent for Ledger {
    fn on_fill(&mut self, good: Good, side: Side, price: Price, size: Size, signal: Signal) {
        let units = i64::try_from(size).unwrap_or(i64::MAX);
        let value = price.saturating_mul(Decimal::from(size));
        let held = self.inventory.entry(good).or_insert(0);
        match side {
            Side::Buy => {
                *held = held.saturating_add(units);
                self.cash = self.cash.saturating_sub(value);
            }
            Side::Sell => {
                *held = held.saturating_sub(units);
                self.cash = self.cash.saturating_add(value);
            }
        }
        self.last_signal.insert(good, signal);
    }

    fn on_unfilled(&mut self, good: Good, _side: Side, _price: Price, size: Size, signal: Signal) {
        let pending = self.unfilled.entry(good).or_insert(0);
        *pending = pending.saturating_add(size);
        self.last_signal.insert(good, signal);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fills_settle_cash_and_inventory() {
        let mut ledger = Ledger::new(Decimal::from(100));
        ledger.on_fill(Good::Grain, Side::Buy, Decimal::new(25, 1), 10, Signal::Fair);
        assert_eq!(ledger.cash(), Decimal::from(75));
        assert_eq!(ledger.inventory(Good::Grain), 10);

        ledger.on_fill(Good::Grain, Side::Sell, Decimal::from(3), 4, Signal::Strong);
        assert_eq!(ledger.cash(), Decimal::from(87));
        assert_eq!(ledger.inventory(Good::Grain), 6);
        assert_eq!(ledger.last_signal(Good::Grain), Some(Signal::Strong));
        assert_eq!(ledger.inventory(Good::Meat), 0);
    }

    #[test]
    fn oversized_fills_saturate_cash() {
        let mut ledger = Ledger::default();
        ledger.on_fill(Good::Clothing, Side::Buy, Decimal::MAX, 2, Signal::Weak);
        assert_eq!(ledger.cash(), Decimal::MIN);
        assert_eq!(ledger.inventory(Good::Clothing), 2);

        let mut ledger = Ledger::new(Decimal::from(1));
        ledger.on_fill(Good::Clothing, Side::Sell, Decimal::MAX, Size::MAX, Signal::Strong);
        assert_eq!(ledger.cash(), Decimal::MAX);
        assert_eq!(ledger.inventory(Good::Clothing), -i64::MAX);
    }

    #[test]
    fn unfilled_accumulates_until_next_cycle() {
        let mut ledger = Ledger::default();
        ledger.on_unfilled(Good::Labour, Side::Sell, Decimal::from(100), 8, Signal::Weak);
        ledger.on_unfilled(Good::Labour, Side::Sell, Decimal::from(90), 2, Signal::Fair);
        assert_eq!(ledger.unfilled(Good::Labour), 10);
        assert_eq!(ledger.last_signal(Good::Labour), Some(Signal::Fair));

        ledger.start_cycle();
        assert_eq!(ledger.unfilled(Good::Labour), 0);
        assert_eq!(ledger.last_signal(Good::Labour), Some(Signal::Fair));
    }
}
