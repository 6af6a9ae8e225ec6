//! End-to-end clearing scenarios through `Market` and `World`.

use std::cell::RefCell;
use std::rc::Rc;
use std::thread;

use cycle_market::{
    AgentId, FixedPermutation, Good, Ledger, Market, MarketAgent, Order, Price, RandomPermutation,
    SequentialPermutation, SharedPermutation, Side, Signal, Size, World,
};
use rust_decimal::Decimal;

fn init_log() {
    let _ = env_logger::try_init();
}

fn d(v: i64) -> Decimal {
    Decimal::from(v)
}

#[derive(Clone, Debug, PartialEq)]
enum Event {
    Fill(Good, Side, Price, Size, Signal),
    Unfilled(Good, Side, Price, Size, Signal),
}

/// Records into a log shared with the test, so boxed agents stay inspectable.
struct Recorder {
    events: Rc<RefCell<Vec<Event>>>,
}

impl MarketAgent for Recorder {
    fn on_fill(&mut self, good: Good, side: Side, price: Price, size: Size, signal: Signal) {
        self.events
            .borrow_mut()
            .push(Event::Fill(good, side, price, size, signal));
    }

    fn on_unfilled(&mut self, good: Good, side: Side, price: Price, size: Size, signal: Signal) {
        self.events
            .borrow_mut()
            .push(Event::Unfilled(good, side, price, size, signal));
    }
}

fn recorders(n: usize) -> (Vec<Box<dyn MarketAgent>>, Vec<Rc<RefCell<Vec<Event>>>>) {
    let logs: Vec<_> = (0..n).map(|_| Rc::new(RefCell::new(Vec::new()))).collect();
    let agents = logs
        .iter()
        .map(|log| Box::new(Recorder { events: Rc::clone(log) }) as Box<dyn MarketAgent>)
        .collect();
    (agents, logs)
}

#[test]
fn one_seller_three_buyers_reference_case() {
    init_log();
    let (mut agents, logs) = recorders(4);
    let mut world = World::new(SequentialPermutation);
    world.post(Good::Meat, Order::sell(AgentId(0), d(10), 100));
    world.post(Good::Meat, Order::buy(AgentId(1), d(12), 10));
    world.post(Good::Meat, Order::buy(AgentId(2), d(10), 200));
    world.post(Good::Meat, Order::buy(AgentId(3), d(8), 1000));
    world.clear(&mut agents).unwrap();

    let meat = world.market(Good::Meat);
    assert_eq!(meat.ask(), Decimal::ZERO);
    assert_eq!(meat.bid(), d(10));
    assert_eq!(meat.volume(), 100);
    assert_eq!(meat.last(), d(10));

    assert_eq!(
        *logs[0].borrow(),
        vec![
            Event::Fill(Good::Meat, Side::Sell, d(10), 10, Signal::Fair),
            Event::Fill(Good::Meat, Side::Sell, d(10), 90, Signal::Fair),
        ]
    );
    assert_eq!(
        *logs[1].borrow(),
        vec![Event::Fill(Good::Meat, Side::Buy, d(10), 10, Signal::Fair)]
    );
    assert_eq!(
        *logs[2].borrow(),
        vec![
            Event::Unfilled(Good::Meat, Side::Buy, d(10), 110, Signal::Fair),
            Event::Fill(Good::Meat, Side::Buy, d(10), 90, Signal::Fair),
        ]
    );
    assert_eq!(
        *logs[3].borrow(),
        vec![Event::Unfilled(Good::Meat, Side::Buy, d(8), 1000, Signal::Weak)]
    );
}

#[test]
fn reversed_admission_lets_resting_buyers_set_the_price() {
    let (mut agents, logs) = recorders(2);
    let mut market = Market::new(Good::Beer);
    market.post(Order::sell(AgentId(0), d(10), 15));
    market.post(Order::buy(AgentId(1), d(12), 10));
    // Buy admitted first, so the sell is the aggressor and trades at 12.
    market
        .clear(&mut FixedPermutation(vec![1, 0]), &mut agents)
        .unwrap();
    assert_eq!(market.last(), d(12));
    assert_eq!(market.ask(), d(10));
    assert_eq!(market.bid(), Decimal::ZERO);
    assert_eq!(
        *logs[1].borrow(),
        vec![Event::Fill(Good::Beer, Side::Buy, d(12), 10, Signal::Weak)]
    );
    assert_eq!(
        *logs[0].borrow(),
        vec![
            Event::Unfilled(Good::Beer, Side::Sell, d(10), 5, Signal::Fair),
            Event::Fill(Good::Beer, Side::Sell, d(12), 10, Signal::Strong),
        ]
    );
}

#[test]
fn rejected_orders_never_notify() {
    let (mut agents, logs) = recorders(3);
    let mut market = Market::new(Good::Grain);
    market.post(Order::sell(AgentId(0), d(5), 0));
    market.post(Order::buy(AgentId(1), Decimal::ZERO, 10));
    market.post(Order::buy(AgentId(2), d(6), 3));
    let report = market.clear(&mut SequentialPermutation, &mut agents).unwrap();
    assert_eq!(report.dropped, 2);
    assert!(logs[0].borrow().is_empty());
    assert!(logs[1].borrow().is_empty());
    assert_eq!(
        *logs[2].borrow(),
        vec![Event::Unfilled(Good::Grain, Side::Buy, d(6), 3, Signal::Fair)]
    );
}

#[test]
fn repeated_clear_is_idle() {
    let mut agents = vec![Ledger::default(), Ledger::default()];
    let mut market = Market::new(Good::Cotton);
    market.post(Order::buy(AgentId(0), d(9), 4));
    market.post(Order::sell(AgentId(1), d(8), 1));
    market.post(Order::sell(AgentId(1), d(11), 2));
    let first = market.clear(&mut SequentialPermutation, &mut agents).unwrap();
    let cash_after_first: Vec<Decimal> = agents.iter().map(|a| a.cash()).collect();

    let second = market.clear(&mut SequentialPermutation, &mut agents).unwrap();
    assert_eq!(second.fills, 0);
    assert_eq!(second.state.volume, 0);
    assert_eq!(second.state.bid, first.state.bid);
    assert_eq!(second.state.ask, first.state.ask);
    assert_eq!(agents.iter().map(|a| a.cash()).collect::<Vec<_>>(), cash_after_first);
}

#[test]
fn markets_on_threads_share_one_permutation_source() {
    let source = SharedPermutation::new(RandomPermutation::new(42));
    let handles: Vec<_> = [Good::Grain, Good::Vegetables]
        .into_iter()
        .map(|good| {
            let mut permutations = source.clone();
            thread::spawn(move || {
                let mut agents = vec![Ledger::default(), Ledger::default()];
                let mut market = Market::new(good);
                for i in 0..20 {
                    market.post(Order::buy(AgentId(0), d(10 + i % 3), 2));
                    market.post(Order::sell(AgentId(1), d(9 + i % 4), 2));
                }
                let report = market.clear(&mut permutations, &mut agents).unwrap();
                (report, agents[0].inventory(good), agents[1].inventory(good))
            })
        })
        .collect();

    for handle in handles {
        let (report, bought, sold) = handle.join().unwrap();
        assert_eq!(bought as u64, report.state.volume);
        assert_eq!(-sold as u64, report.state.volume);
        if report.state.bid > Decimal::ZERO && report.state.ask > Decimal::ZERO {
            assert!(report.state.bid < report.state.ask);
        }
    }
}
