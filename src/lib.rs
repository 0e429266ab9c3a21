//! # Order Lifecycle
//!
//! State machine for a trading order: submitted as `active` (or `queued`), then canceled or
//! executed exactly once. Each transition notifies the position registered for the order's
//! `(exchange, symbol)`, and optionally sends a notification (live mode) and a debug log line.
//!
//! ## Entry point
//!
//! Use [`OrderLifecycle`]: create with [`OrderLifecycle::new`], then
//! [`OrderLifecycle::submit`], [`OrderLifecycle::cancel`], and [`OrderLifecycle::execute`].
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use order_lifecycle::{
//!     InMemoryNotifier, LifecycleConfig, NotificationEvents, OrderLifecycle, OrderParams,
//!     OrderType, PositionEvent, PositionRegistry, RecordingPosition, Side,
//! };
//! use rust_decimal::Decimal;
//!
//! let registry = PositionRegistry::new();
//! let position = RecordingPosition::new();
//! registry.register("Sandbox", "BTC-USD", Arc::new(position.clone()));
//! let notifier = InMemoryNotifier::new();
//!
//! let lifecycle = OrderLifecycle::new(
//!     LifecycleConfig::live(NotificationEvents::default()),
//!     Arc::new(registry),
//!     Arc::new(notifier.clone()),
//! );
//! let mut order = lifecycle.submit(OrderParams {
//!     symbol: "BTC-USD".into(),
//!     exchange: "Sandbox".into(),
//!     side: Side::Buy,
//!     order_type: OrderType::Limit,
//!     qty: Decimal::from(1),
//!     price: Decimal::from(50_000),
//!     ..Default::default()
//! });
//! assert!(lifecycle.execute(&mut order));
//! assert!(!lifecycle.cancel(&mut order)); // a fill is irrevocable
//! assert!(order.is_executed());
//! assert_eq!(position.count(PositionEvent::Executed, Some(order.id())), 1);
//! assert_eq!(notifier.messages()[1], "EXECUTED order: BTC-USD, limit, buy, 1, $50000");
//! ```

pub mod clock;
pub mod config;
pub mod lifecycle;
pub mod notify;
pub mod order;
pub mod order_flow;
pub mod position;
pub mod types;

#[cfg(test)]
mod test_log;

pub use clock::{Clock, SimulatedClock, SystemClock};
pub use config::{ConfigError, DebugEvents, LifecycleConfig, LifecycleEvent, NotificationEvents, TradingMode};
pub use lifecycle::OrderLifecycle;
pub use notify::{InMemoryNotifier, LogNotifier, Notifier, NotifyError, SilentNotifier};
pub use order::{Order, OrderParams};
pub use order_flow::{replay_into_lifecycle, replay_into_lifecycle_with_clock, FlowConfig, FlowGenerator, OrderEvent, ReplaySummary};
pub use position::{NoPositions, PositionEvent, PositionHooks, PositionLookup, PositionRegistry, RecordingPosition};
pub use types::{ExchangeOrderId, OrderFlag, OrderId, OrderRole, OrderStatus, OrderType, Side, SubmitStatus, Timestamp};
