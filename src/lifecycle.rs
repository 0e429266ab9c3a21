//! Order lifecycle facade.
//!
//! Holds the configuration and the collaborators (position lookup, notifier, clock) so a
//! driver can submit, cancel, and execute orders without wiring side effects itself.
//! Every call runs to completion before returning, hooks included. Callers serialize calls
//! for the same order; `&mut Order` enforces that within one thread.

use std::sync::Arc;

use log::{info, warn};

use crate::clock::{Clock, SystemClock};
use crate::config::{LifecycleConfig, LifecycleEvent};
use crate::notify::Notifier;
use crate::order::{Order, OrderParams};
use crate::position::PositionLookup;

const LOG_TARGET: &str = "order_lifecycle::order";

/// Drives orders through `active | queued -> canceled | executed`.
///
/// Use [`OrderLifecycle::submit`] to create an order, then [`OrderLifecycle::cancel`] or
/// [`OrderLifecycle::execute`] when the exchange (or the backtest) confirms. Repeated or
/// late confirmations on a terminal order are no-ops.
pub struct OrderLifecycle {
    config: LifecycleConfig,
    positions: Arc<dyn PositionLookup>,
    notifier: Arc<dyn Notifier>,
    clock: Arc<dyn Clock>,
}

impl OrderLifecycle {
    /// Creates a lifecycle on the wall clock.
    pub fn new(
        config: LifecycleConfig,
        positions: Arc<dyn PositionLookup>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            config,
            positions,
            notifier,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replaces the clock, e.g. with a [`crate::SimulatedClock`] in a backtest.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn config(&self) -> &LifecycleConfig {
        &self.config
    }

    /// Builds an order from `params` and announces it.
    ///
    /// The position registered for the order's `(exchange, symbol)` gets `on_opened_order`.
    /// A notification goes out in live mode when `submitted_orders` is on, and a debug line
    /// is logged when `order_submission` is on. Never fails.
    pub fn submit(&self, params: OrderParams) -> Order {
        let order = Order::from_params(params, self.clock.now_ms());

        if let Some(position) = self.positions.position(order.exchange(), order.symbol()) {
            position.on_opened_order(&order);
        }

        if self.config.should_notify(LifecycleEvent::Submission) {
            self.notify_submission(&order);
        }

        if self.config.should_log(LifecycleEvent::Submission) {
            info!(target: LOG_TARGET, "{}", order.summary(order.submission_label()));
        }

        order
    }

    /// Cancels `order`. Returns `false` without side effects if it is already terminal.
    pub fn cancel(&self, order: &mut Order) -> bool {
        if !order.mark_canceled(self.clock.now_ms()) {
            return false;
        }

        if self.config.should_log(LifecycleEvent::Cancellation) {
            info!(target: LOG_TARGET, "{}", order.summary("CANCELED"));
        }

        if self.config.should_notify(LifecycleEvent::Cancellation) {
            self.send(&order.summary("CANCELED"));
        }

        if let Some(position) = self.positions.position(order.exchange(), order.symbol()) {
            position.on_canceled_order(order);
        }
        true
    }

    /// Marks `order` executed. Returns `false` without side effects if it is already terminal.
    pub fn execute(&self, order: &mut Order) -> bool {
        if !order.mark_executed(self.clock.now_ms()) {
            return false;
        }

        if self.config.should_log(LifecycleEvent::Execution) {
            info!(target: LOG_TARGET, "{}", order.summary("EXECUTED"));
        }

        if self.config.should_notify(LifecycleEvent::Execution) {
            self.send(&order.summary("EXECUTED"));
        }

        if let Some(position) = self.positions.position(order.exchange(), order.symbol()) {
            position.on_executed_order(order);
        }
        true
    }

    /// Sends the QUEUED/SUBMITTED notification for `order` regardless of config.
    /// Drivers call this when they resubmit a queued order.
    pub fn notify_submission(&self, order: &Order) {
        self.send(&order.summary(order.submission_label()));
    }

    fn send(&self, message: &str) {
        if let Err(e) = self.notifier.notify(message) {
            warn!(target: LOG_TARGET, "notification dropped: {} ({})", e, message);
        }
    }
}

impl std::fmt::Debug for OrderLifecycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderLifecycle")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
