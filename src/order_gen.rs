//! Synthetic order flow.
//!
//! Deterministic, configurable order stream for property tests, benches, and
//! the demo loop. Same seed ⇒ same sequence of orders.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;

use crate::market::Market;
use crate::types::{AgentId, Order, Side};

/// Configuration for the synthetic order generator.
/// All ranges are inclusive. Same config + seed produces the same stream.
#[derive(Clone, Debug)]
pub struct GeneratorConfig {
    /// RNG seed. Same seed ⇒ same order stream.
    pub seed: u64,
    /// Number of orders returned by [`Generator::all_orders`].
    pub num_orders: usize,
    /// Probability of Buy (0.0..=1.0). Sell otherwise.
    pub buy_ratio: f64,
    /// Price range in cents.
    pub price_min_cents: i64,
    pub price_max_cents: i64,
    pub size_min: u64,
    pub size_max: u64,
    /// Owners are drawn from `0..num_agents`.
    pub num_agents: usize,
    /// Probability that an order is malformed (zero size or zero price).
    pub invalid_ratio: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            num_orders: 1000,
            buy_ratio: 0.5,
            price_min_cents: 900,
            price_max_cents: 1100,
            size_min: 1,
            size_max: 100,
            num_agents: 10,
            invalid_ratio: 0.0,
        }
    }
}

/// Deterministic order stream. Create with [`Generator::new`].
pub struct Generator {
    rng: StdRng,
    config: GeneratorConfig,
}

impl Generator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            rng: StdRng::seed_from_u64(config.seed),
            config,
        }
    }

    /// Generates the next order. Advances the RNG.
    pub fn next_order(&mut self) -> Order {
        let side = if self.rng.gen::<f64>() < self.config.buy_ratio {
            Side::Buy
        } else {
            Side::Sell
        };
        let cents = self
            .rng
            .gen_range(self.config.price_min_cents..=self.config.price_max_cents);
        let mut price = Decimal::new(cents, 2);
        let mut size = self.rng.gen_range(self.config.size_min..=self.config.size_max);
        let owner = AgentId(self.rng.gen_range(0..self.config.num_agents.max(1)));
        if self.rng.gen::<f64>() < self.config.invalid_ratio {
            if self.rng.gen::<bool>() {
                size = 0;
            } else {
                price = Decimal::ZERO;
            }
        }
        Order {
            price,
            size,
            side,
            owner,
        }
    }

    /// Returns exactly `n` orders. Advances the generator state.
    pub fn take_orders(&mut self, n: usize) -> Vec<Order> {
        (0..n).map(|_| self.next_order()).collect()
    }

    /// Returns `config.num_orders` orders.
    pub fn all_orders(&mut self) -> Vec<Order> {
        self.take_orders(self.config.num_orders)
    }
}

/// Posts every order into `market`. Returns how many were accepted.
pub fn post_all(market: &mut Market, orders: impl IntoIterator<Item = Order>) -> usize {
    let before = market.pending_orders().len();
    for order in orders {
        market.post(order);
    }
    market.pending_orders().len() - before
}
