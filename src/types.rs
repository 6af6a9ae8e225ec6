//! Core types for the clearing engine.
//!
//! [`Order`] is the unit agents post into a market. Prices are exact decimals,
//! sizes are whole units. Owners are referenced by [`AgentId`], a plain index
//! into an agent table the market never owns.

use rust_decimal::Decimal;

/// Price of one unit of a good.
pub type Price = Decimal;

/// Quantity of a good, in whole units.
pub type Size = u64;

/// Non-owning handle to the agent that posted an order.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
pub struct AgentId(pub usize);

/// A tradable good. Each good is cleared by its own market.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Good {
    Grain,
    Vegetables,
    Cotton,
    Meat,
    Wool,
    Beer,
    Clothing,
    Labour,
}

impl Good {
    /// Every good, in index order.
    pub const ALL: [Good; 8] = [
        Good::Grain,
        Good::Vegetables,
        Good::Cotton,
        Good::Meat,
        Good::Wool,
        Good::Beer,
        Good::Clothing,
        Good::Labour,
    ];

    /// Dense index in `0..Good::ALL.len()`.
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Order side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

/// How favorable an outcome was for its owner, relative to the quotes left
/// standing after a clearing pass.
///
/// Strong: better than the surviving quotes (price could move away from the
/// market). Weak: worse (price should move toward the market). Fair: at the
/// market.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Signal {
    Weak,
    Fair,
    Strong,
}

/// An instruction to trade `size` units at a limit `price`.
///
/// During matching a resting order's `size` is its remaining quantity.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Order {
    pub price: Price,
    pub size: Size,
    pub side: Side,
    pub owner: AgentId,
}

impl Order {
    pub fn buy(owner: AgentId, price: Price, size: Size) -> Self {
        Self {
            price,
            size,
            side: Side::Buy,
            owner,
        }
    }

    pub fn sell(owner: AgentId, price: Price, size: Size) -> Self {
        Self {
            price,
            size,
            side: Side::Sell,
            owner,
        }
    }

    /// Accepted orders have a strictly positive price and size.
    pub fn is_valid(&self) -> bool {
        self.size > 0 && self.price > Decimal::ZERO
    }
}
