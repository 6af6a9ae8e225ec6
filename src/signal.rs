//! Outcome classification against the quotes that survive a clearing pass.
//!
//! Every participant is judged against the same yardstick, the final resting
//! bid and ask, not against its own counterparty. A quote of zero means that
//! side of the book emptied out.

use rust_decimal::Decimal;

use crate::types::{Price, Signal};

/// Signals for the (buyer, seller) of a fill executed at `price`.
///
/// Above a surviving ask: the buyer overpaid (Weak) and the seller did well
/// (Strong). An `ask` of 0 means no ask survived, so this branch never fires.
/// Below the surviving bid, or no bid left at all: the reverse. Otherwise both
/// are Fair.
pub fn classify_fill(price: Price, bid: Price, ask: Price) -> (Signal, Signal) {
    if ask > Decimal::ZERO && price > ask {
        (Signal::Weak, Signal::Strong)
    } else if price < bid || bid == Decimal::ZERO {
        (Signal::Strong, Signal::Weak)
    } else {
        (Signal::Fair, Signal::Fair)
    }
}

/// Signal for an order still resting at `price` when its side's best quote is `quote`.
pub fn classify_resting(price: Price, quote: Price) -> Signal {
    if price == quote {
        Signal::Fair
    } else {
        Signal::Weak
    }
}
