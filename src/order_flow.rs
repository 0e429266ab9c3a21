//! Synthetic order-event generator and replay.
//!
//! Deterministic, configurable stream of submit / cancel / execute events for replay tests,
//! demos, and benchmarks. Same seed ⇒ same stream. Confirmations arrive interleaved with
//! later submissions, and some orders get a second (duplicate or contradicting)
//! confirmation, which the lifecycle must ignore.

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;

use crate::clock::SimulatedClock;
use crate::lifecycle::OrderLifecycle;
use crate::order::{Order, OrderParams};
use crate::types::{OrderFlag, OrderType, Side, SubmitStatus};

/// One event in a stream. `key` ties events to the submission they refer to.
#[derive(Clone, Debug, PartialEq)]
pub enum OrderEvent {
    Submit { key: usize, params: OrderParams },
    Cancel { key: usize },
    Execute { key: usize },
}

/// Configuration for the synthetic event generator.
/// Ranges are inclusive. Same config + seed produces the same stream.
#[derive(Clone, Debug)]
pub struct FlowConfig {
    /// RNG seed. Same seed ⇒ same event stream.
    pub seed: u64,
    pub exchange: String,
    /// Picked uniformly. Empty means every order gets an empty symbol.
    pub symbols: Vec<String>,
    /// Number of orders submitted.
    pub num_orders: usize,
    /// Probability of Buy. Sell otherwise.
    pub buy_ratio: f64,
    /// Probability of Limit. Market otherwise (price 0).
    pub limit_ratio: f64,
    /// Probability an order is submitted as queued.
    pub queued_ratio: f64,
    /// Probability of ReduceOnly, then Close; remainder is no flag.
    pub reduce_only_ratio: f64,
    pub close_ratio: f64,
    /// Probability an order never gets a confirmation.
    pub unresolved_ratio: f64,
    /// For resolved orders: probability the confirmation is a cancel rather than a fill.
    pub cancel_ratio: f64,
    /// For resolved orders: probability of one extra, late confirmation.
    pub duplicate_ratio: f64,
    /// Limit price range in cents.
    pub price_cents_min: i64,
    pub price_cents_max: i64,
    /// Quantity range, whole units.
    pub qty_min: u64,
    pub qty_max: u64,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            exchange: "Sandbox".into(),
            symbols: vec!["BTC-USD".into(), "ETH-USD".into()],
            num_orders: 1000,
            buy_ratio: 0.5,
            limit_ratio: 0.8,
            queued_ratio: 0.1,
            reduce_only_ratio: 0.1,
            close_ratio: 0.05,
            unresolved_ratio: 0.1,
            cancel_ratio: 0.4,
            duplicate_ratio: 0.2,
            price_cents_min: 950_000,
            price_cents_max: 1_050_000,
            qty_min: 1,
            qty_max: 10,
        }
    }
}

/// Deterministic event stream. Create with [`FlowGenerator::new`].
pub struct FlowGenerator {
    rng: StdRng,
    config: FlowConfig,
}

impl FlowGenerator {
    pub fn new(config: FlowConfig) -> Self {
        let rng = StdRng::seed_from_u64(config.seed);
        Self { rng, config }
    }

    /// Generates the submission parameters for one order.
    pub fn next_params(&mut self) -> OrderParams {
        let symbol = if self.config.symbols.is_empty() {
            String::new()
        } else {
            let i = self.rng.gen_range(0..self.config.symbols.len());
            self.config.symbols[i].clone()
        };
        let side = if self.rng.gen::<f64>() < self.config.buy_ratio {
            Side::Buy
        } else {
            Side::Sell
        };
        let is_limit = self.rng.gen::<f64>() < self.config.limit_ratio;
        let (order_type, price) = if is_limit {
            let cents = self
                .rng
                .gen_range(self.config.price_cents_min..=self.config.price_cents_max);
            (OrderType::Limit, Decimal::new(cents, 2))
        } else {
            (OrderType::Market, Decimal::ZERO)
        };
        let qty = Decimal::from(self.rng.gen_range(self.config.qty_min..=self.config.qty_max));
        let qty = match side {
            Side::Buy => qty,
            Side::Sell => -qty,
        };
        let r = self.rng.gen::<f64>();
        let flag = if r < self.config.reduce_only_ratio {
            OrderFlag::ReduceOnly
        } else if r < self.config.reduce_only_ratio + self.config.close_ratio {
            OrderFlag::Close
        } else {
            OrderFlag::None
        };
        let status = if self.rng.gen::<f64>() < self.config.queued_ratio {
            SubmitStatus::Queued
        } else {
            SubmitStatus::Active
        };
        OrderParams {
            symbol,
            exchange: self.config.exchange.clone(),
            side,
            order_type,
            flag,
            qty,
            price,
            status,
            ..Default::default()
        }
    }

    /// Returns the full event stream for `config.num_orders` orders.
    ///
    /// Every confirmation comes after its order's submit; confirmations for different orders
    /// are shuffled among later submits.
    pub fn all_events(&mut self) -> Vec<OrderEvent> {
        let mut events = Vec::new();
        let mut pending: Vec<OrderEvent> = Vec::new();
        for key in 0..self.config.num_orders {
            let params = self.next_params();
            events.push(OrderEvent::Submit { key, params });

            if self.rng.gen::<f64>() >= self.config.unresolved_ratio {
                pending.push(self.confirmation(key, self.config.cancel_ratio));
                if self.rng.gen::<f64>() < self.config.duplicate_ratio {
                    pending.push(self.confirmation(key, 0.5));
                }
            }

            let flush = self.rng.gen_range(0..=2usize).min(pending.len());
            for _ in 0..flush {
                let i = self.rng.gen_range(0..pending.len());
                events.push(pending.swap_remove(i));
            }
        }
        while !pending.is_empty() {
            let i = self.rng.gen_range(0..pending.len());
            events.push(pending.swap_remove(i));
        }
        events
    }

    fn confirmation(&mut self, key: usize, cancel_ratio: f64) -> OrderEvent {
        if self.rng.gen::<f64>() < cancel_ratio {
            OrderEvent::Cancel { key }
        } else {
            OrderEvent::Execute { key }
        }
    }
}

/// Counts from a replay. `ignored` is confirmations that hit an already-terminal order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct ReplaySummary {
    pub submitted: usize,
    pub canceled: usize,
    pub executed: usize,
    pub ignored: usize,
}

/// Replays `events` into `lifecycle`. Returns the summary and the orders in key order.
/// Fails on a confirmation for an unknown key or a repeated submit key.
pub fn replay_into_lifecycle(
    lifecycle: &OrderLifecycle,
    events: impl IntoIterator<Item = OrderEvent>,
) -> Result<(ReplaySummary, Vec<Order>), String> {
    replay(lifecycle, events, || {})
}

/// Like [`replay_into_lifecycle`], but advances `clock` by `step_ms` after each event so
/// timestamps move the way they would in a backtest.
pub fn replay_into_lifecycle_with_clock(
    lifecycle: &OrderLifecycle,
    events: impl IntoIterator<Item = OrderEvent>,
    clock: &SimulatedClock,
    step_ms: u64,
) -> Result<(ReplaySummary, Vec<Order>), String> {
    replay(lifecycle, events, || {
        clock.advance(step_ms);
    })
}

fn replay(
    lifecycle: &OrderLifecycle,
    events: impl IntoIterator<Item = OrderEvent>,
    mut after_event: impl FnMut(),
) -> Result<(ReplaySummary, Vec<Order>), String> {
    let mut summary = ReplaySummary::default();
    let mut orders: HashMap<usize, Order> = HashMap::new();
    for event in events {
        match event {
            OrderEvent::Submit { key, params } => {
                if orders.contains_key(&key) {
                    return Err(format!("Order key {} submitted twice", key));
                }
                orders.insert(key, lifecycle.submit(params));
                summary.submitted += 1;
            }
            OrderEvent::Cancel { key } => {
                let order = orders
                    .get_mut(&key)
                    .ok_or_else(|| format!("Order key {} not found", key))?;
                if lifecycle.cancel(order) {
                    summary.canceled += 1;
                } else {
                    summary.ignored += 1;
                }
            }
            OrderEvent::Execute { key } => {
                let order = orders
                    .get_mut(&key)
                    .ok_or_else(|| format!("Order key {} not found", key))?;
                if lifecycle.execute(order) {
                    summary.executed += 1;
                } else {
                    summary.ignored += 1;
                }
            }
        }
        after_event();
    }
    let mut keyed: Vec<(usize, Order)> = orders.into_iter().collect();
    keyed.sort_by_key(|(key, _)| *key);
    Ok((summary, keyed.into_iter().map(|(_, order)| order).collect()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LifecycleConfig;
    use crate::notify::SilentNotifier;
    use crate::position::NoPositions;
    use std::sync::Arc;

    fn lifecycle() -> OrderLifecycle {
        OrderLifecycle::new(
            LifecycleConfig::default(),
            Arc::new(NoPositions),
            Arc::new(SilentNotifier),
        )
    }

    #[test]
    fn same_seed_same_stream() {
        let c = FlowConfig {
            seed: 42,
            num_orders: 20,
            ..Default::default()
        };
        let a = FlowGenerator::new(c.clone()).all_events();
        let b = FlowGenerator::new(c).all_events();
        assert_eq!(a, b);
    }

    #[test]
    fn different_seed_different_stream() {
        let a = FlowGenerator::new(FlowConfig {
            seed: 1,
            num_orders: 20,
            ..Default::default()
        })
        .all_events();
        let b = FlowGenerator::new(FlowConfig {
            seed: 2,
            num_orders: 20,
            ..Default::default()
        })
        .all_events();
        assert_ne!(a, b);
    }

    #[test]
    fn confirmations_follow_their_submit() {
        let events = FlowGenerator::new(FlowConfig {
            seed: 7,
            num_orders: 200,
            ..Default::default()
        })
        .all_events();
        let mut seen = std::collections::HashSet::new();
        let mut submits = 0;
        for event in &events {
            match event {
                OrderEvent::Submit { key, .. } => {
                    assert!(seen.insert(*key));
                    submits += 1;
                }
                OrderEvent::Cancel { key } | OrderEvent::Execute { key } => {
                    assert!(seen.contains(key), "confirmation before submit for key {}", key);
                }
            }
        }
        assert_eq!(submits, 200);
    }

    #[test]
    fn sell_qty_is_negative_and_market_price_zero() {
        let mut generator = FlowGenerator::new(FlowConfig {
            seed: 3,
            ..Default::default()
        });
        for _ in 0..100 {
            let p = generator.next_params();
            match p.side {
                Side::Buy => assert!(p.qty > Decimal::ZERO),
                Side::Sell => assert!(p.qty < Decimal::ZERO),
            }
            if p.order_type == OrderType::Market {
                assert_eq!(p.price, Decimal::ZERO);
            }
        }
    }

    #[test]
    fn replay_counts_add_up() {
        let events = FlowGenerator::new(FlowConfig {
            seed: 123,
            num_orders: 300,
            ..Default::default()
        })
        .all_events();
        let confirmations = events
            .iter()
            .filter(|e| !matches!(e, OrderEvent::Submit { .. }))
            .count();
        let (summary, orders) = replay_into_lifecycle(&lifecycle(), events).unwrap();
        assert_eq!(summary.submitted, 300);
        assert_eq!(orders.len(), 300);
        assert_eq!(summary.canceled + summary.executed + summary.ignored, confirmations);
        let terminal = orders.iter().filter(|o| o.is_terminal()).count();
        assert_eq!(terminal, summary.canceled + summary.executed);
    }

    #[test]
    fn replay_unknown_key_fails() {
        let err = replay_into_lifecycle(&lifecycle(), vec![OrderEvent::Cancel { key: 9 }]).unwrap_err();
        assert!(err.contains("not found"));
    }

    #[test]
    fn replay_duplicate_submit_fails() {
        let events = vec![
            OrderEvent::Submit {
                key: 0,
                params: OrderParams::default(),
            },
            OrderEvent::Submit {
                key: 0,
                params: OrderParams::default(),
            },
        ];
        let err = replay_into_lifecycle(&lifecycle(), events).unwrap_err();
        assert!(err.contains("twice"));
    }

    #[test]
    fn replay_with_clock_moves_timestamps() {
        let clock = Arc::new(SimulatedClock::new(0));
        let lifecycle = lifecycle().with_clock(clock.clone());
        let events = vec![
            OrderEvent::Submit {
                key: 0,
                params: OrderParams::default(),
            },
            OrderEvent::Execute { key: 0 },
        ];
        let (_, orders) =
            replay_into_lifecycle_with_clock(&lifecycle, events, &clock, 60_000).unwrap();
        assert_eq!(orders[0].created_at(), 0);
        assert_eq!(orders[0].executed_at(), Some(60_000));
    }
}
