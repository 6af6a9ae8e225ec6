//! Single-pass order book: two price-priority queues and greedy matching.
//!
//! Bids sit in a max-priority queue, asks in a min-priority queue. An incoming
//! order trades against the opposite head while prices cross; any remainder
//! rests. Trades execute at the resting order's price. Equal-priced resting
//! orders are served in admission order.

use std::cmp::Ordering;
use std::collections::binary_heap::PeekMut;
use std::collections::BinaryHeap;

use crate::types::{AgentId, Order, Price, Side, Size};

/// One match between a buy and a sell produced during admission.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Fill {
    pub buyer: AgentId,
    pub seller: AgentId,
    /// Buyer's limit price.
    pub buy_price: Price,
    /// Seller's limit price.
    pub sell_price: Price,
    /// Execution price: always the resting (passive) order's price.
    pub price: Price,
    pub size: Size,
    /// Side of the order being admitted when the match happened.
    pub aggressor: Side,
}

impl Fill {
    fn between(aggressor: &Order, resting: &Order, size: Size) -> Self {
        let (buy, sell) = match aggressor.side {
            Side::Buy => (aggressor, resting),
            Side::Sell => (resting, aggressor),
        };
        Self {
            buyer: buy.owner,
            seller: sell.owner,
            buy_price: buy.price,
            sell_price: sell.price,
            price: resting.price,
            size,
            aggressor: aggressor.side,
        }
    }
}

/// Resting buy: higher price first, then earlier admission.
#[derive(Debug)]
struct BidEntry {
    order: Order,
    seq: u64,
}

impl Ord for BidEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.order
            .price
            .cmp(&other.order.price)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for BidEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for BidEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for BidEntry {}

/// Resting sell: lower price first, then earlier admission.
#[derive(Debug)]
struct AskEntry {
    order: Order,
    seq: u64,
}

impl Ord for AskEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .order
            .price
            .cmp(&self.order.price)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for AskEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for AskEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for AskEntry {}

/// Order book for one clearing pass. Starts empty; never carried across passes.
#[derive(Debug, Default)]
pub struct OrderBook {
    bids: BinaryHeap<BidEntry>,
    asks: BinaryHeap<AskEntry>,
    next_seq: u64,
}

impl OrderBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Admit one order: trade it against the opposite queue while prices cross,
    /// appending fills to `fills`, then rest whatever is left.
    ///
    /// Callers must only admit valid orders (positive price and size).
    pub fn admit(&mut self, mut order: Order, fills: &mut Vec<Fill>) {
        debug_assert!(order.is_valid(), "admitted invalid order {:?}", order);
        match order.side {
            Side::Buy => {
                while order.size > 0 {
                    let Some(mut best) = self.asks.peek_mut() else {
                        break;
                    };
                    if best.order.price > order.price {
                        break;
                    }
                    let size = best.order.size.min(order.size);
                    fills.push(Fill::between(&order, &best.order, size));
                    order.size -= size;
                    if size == best.order.size {
                        PeekMut::pop(best);
                    } else {
                        // Head-only mutation: ordering is by price and seq, not size.
                        best.order.size -= size;
                    }
                }
                if order.size > 0 {
                    let seq = self.bump_seq();
                    self.bids.push(BidEntry { order, seq });
                }
            }
            Side::Sell => {
                while order.size > 0 {
                    let Some(mut best) = self.bids.peek_mut() else {
                        break;
                    };
                    if best.order.price < order.price {
                        break;
                    }
                    let size = best.order.size.min(order.size);
                    fills.push(Fill::between(&order, &best.order, size));
                    order.size -= size;
                    if size == best.order.size {
                        PeekMut::pop(best);
                    } else {
                        best.order.size -= size;
                    }
                }
                if order.size > 0 {
                    let seq = self.bump_seq();
                    self.asks.push(AskEntry { order, seq });
                }
            }
        }
    }

    fn bump_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }

    /// Best resting buy price (None if no bids rest).
    pub fn best_bid(&self) -> Option<Price> {
        self.bids.peek().map(|e| e.order.price)
    }

    /// Best resting sell price (None if no asks rest).
    pub fn best_ask(&self) -> Option<Price> {
        self.asks.peek().map(|e| e.order.price)
    }

    /// Total resting buy quantity, saturating at `Size::MAX`.
    pub fn bid_depth(&self) -> Size {
        self.bids.iter().fold(0, |acc: Size, e| acc.saturating_add(e.order.size))
    }

    /// Total resting sell quantity, saturating at `Size::MAX`.
    pub fn ask_depth(&self) -> Size {
        self.asks.iter().fold(0, |acc: Size, e| acc.saturating_add(e.order.size))
    }

    /// Number of resting orders on both sides.
    pub fn len(&self) -> usize {
        self.bids.len() + self.asks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bids.is_empty() && self.asks.is_empty()
    }

    /// Drains the book: resting bids best-first, then resting asks best-first.
    pub fn into_resting(self) -> Vec<Order> {
        let mut out = Vec::with_capacity(self.len());
        out.extend(self.bids.into_sorted_vec().into_iter().rev().map(|e| e.order));
        out.extend(self.asks.into_sorted_vec().into_iter().rev().map(|e| e.order));
        out
    }
}
