//! One clearing pass over a cycle's orders.
//!
//! [`run_pass`] feeds orders into a fresh [`OrderBook`] in the admission order
//! given by a permutation and returns every fill plus the book left behind.

use crate::error::ClearError;
use crate::order_book::{Fill, OrderBook};
use crate::permutation::validate_permutation;
use crate::types::Order;

/// Result of admitting every order of a cycle.
#[derive(Debug)]
pub struct ClearingPass {
    /// Fills in the order they were produced.
    pub fills: Vec<Fill>,
    /// Orders still resting after the last admission.
    pub book: OrderBook,
}

/// Admit `orders[permutation[0]]`, `orders[permutation[1]]`, ... into an empty book.
///
/// Fails before any matching if `permutation` is not a permutation of `0..orders.len()`.
pub fn run_pass(orders: Vec<Order>, permutation: &[usize]) -> Result<ClearingPass, ClearError> {
    validate_permutation(permutation, orders.len())?;

    let mut slots: Vec<Option<Order>> = orders.into_iter().map(Some).collect();
    let mut book = OrderBook::new();
    let mut fills = Vec::new();
    for &index in permutation {
        if let Some(order) = slots[index].take() {
            book.admit(order, &mut fills);
        }
    }
    Ok(ClearingPass { fills, book })
}
