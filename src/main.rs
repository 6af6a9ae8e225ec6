//! Demo economy: adaptive traders quoting into one market per good.
//!
//! Each agent sells one good and buys every other. After each cycle it moves
//! its quotes by the signal it got: toward the market on Weak, away on Strong.
//! Background order flow from [`Generator`] adds noise. One JSON
//! [`cycle_market::ClearReport`] per market per cycle goes to stdout.
//!
//! Environment: `SEED`, `CYCLES`, `AGENTS`, `NOISE_ORDERS` (per good per cycle),
//! and `RUST_LOG` for log filtering.

use std::collections::HashMap;

use cycle_market::{
    AgentId, Generator, GeneratorConfig, Good, Ledger, MarketAgent, Order, Price,
    RandomPermutation, Side, Signal, Size, World,
};
use log::info;
use rust_decimal::Decimal;

const LOT: Size = 5;

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

struct Trader {
    ledger: Ledger,
    sells: Good,
    quotes: HashMap<Good, Price>,
    step: Price,
}

impl Trader {
    fn new(sells: Good, start: Price, step: Price) -> Self {
        Self {
            ledger: Ledger::new(Decimal::from(10_000)),
            sells,
            quotes: Good::ALL.iter().map(|&g| (g, start)).collect(),
            step,
        }
    }

    fn side_for(&self, good: Good) -> Side {
        if good == self.sells {
            Side::Sell
        } else {
            Side::Buy
        }
    }

    /// Move each quote by the last signal seen in its market.
    fn adjust(&mut self) {
        for good in Good::ALL {
            let toward_market = match self.ledger.last_signal(good) {
                Some(Signal::Weak) => true,
                Some(Signal::Strong) => false,
                Some(Signal::Fair) | None => continue,
            };
            let raise = toward_market == (self.side_for(good) == Side::Buy);
            let Some(quote) = self.quotes.get_mut(&good) else {
                continue;
            };
            if raise {
                *quote += self.step;
            } else if *quote > self.step {
                *quote -= self.step;
            }
        }
        self.ledger.start_cycle();
    }

    fn orders(&self, owner: AgentId) -> impl Iterator<Item = (Good, Order)> + '_ {
        Good::ALL.iter().map(move |&good| {
            let price = self.quotes.get(&good).copied().unwrap_or(Decimal::ZERO);
            let order = match self.side_for(good) {
                Side::Buy => Order::buy(owner, price, LOT),
                Side::Sell => Order::sell(owner, price, LOT * Good::ALL.len() as Size),
            };
            (good, order)
        })
    }
}

impl MarketAgent for Trader {
    fn on_fill(&mut self, good: Good, side: Side, price: Price, size: Size, signal: Signal) {
        self.ledger.on_fill(good, side, price, size, signal);
    }

    fn on_unfilled(&mut self, good: Good, side: Side, price: Price, size: Size, signal: Signal) {
        self.ledger.on_unfilled(good, side, price, size, signal);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = env_logger::try_init();
    let seed: u64 = env_or("SEED", 123_456);
    let cycles: u64 = env_or("CYCLES", 100);
    let num_agents: usize = env_or("AGENTS", 40).max(1);
    let noise_orders: usize = env_or("NOISE_ORDERS", 10);

    info!(
        "starting simulation seed={} cycles={} agents={} noise_orders={}",
        seed, cycles, num_agents, noise_orders
    );

    let step = Decimal::new(5, 2);
    let mut agents: Vec<Trader> = (0..num_agents)
        .map(|i| Trader::new(Good::ALL[i % Good::ALL.len()], Decimal::from(10), step))
        .collect();
    let mut world = World::new(RandomPermutation::new(seed));
    let mut noise = Generator::new(GeneratorConfig {
        seed: seed.wrapping_add(1),
        num_agents,
        ..Default::default()
    });

    for _ in 0..cycles {
        for (i, agent) in agents.iter().enumerate() {
            for (good, order) in agent.orders(AgentId(i)) {
                world.post(good, order);
            }
        }
        for good in Good::ALL {
            for order in noise.take_orders(noise_orders) {
                world.post(good, order);
            }
        }

        for report in world.clear(&mut agents)? {
            println!("{}", serde_json::to_string(&report)?);
        }
        for agent in &mut agents {
            agent.adjust();
        }
    }

    let cash = agents
        .iter()
        .fold(Decimal::ZERO, |acc, a| acc.saturating_add(a.ledger.cash()));
    info!("simulation finished cycles={} total_cash={}", world.cycle(), cash);
    Ok(())
}
