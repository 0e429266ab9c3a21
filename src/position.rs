//! Position hooks and the lookup that resolves them by `(exchange, symbol)`.
//!
//! The lifecycle never owns a position. On every transition it asks a [`PositionLookup`]
//! for whatever position is currently registered under the order's key and, if one exists,
//! calls the matching [`PositionHooks`] method.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

use crate::order::Order;
use crate::types::OrderId;

/// The three order events a position consumes. Implementations do their own locking.
pub trait PositionHooks: Send + Sync {
    fn on_opened_order(&self, order: &Order);
    fn on_canceled_order(&self, order: &Order);
    fn on_executed_order(&self, order: &Order);
}

/// Resolves the position registered for `(exchange, symbol)`, if any.
pub trait PositionLookup: Send + Sync {
    fn position(&self, exchange: &str, symbol: &str) -> Option<Arc<dyn PositionHooks>>;
}

/// Lookup that never finds a position.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoPositions;

impl PositionLookup for NoPositions {
    fn position(&self, _exchange: &str, _symbol: &str) -> Option<Arc<dyn PositionHooks>> {
        None
    }
}

/// In-memory registry of positions keyed by `(exchange, symbol)`.
///
/// Positions can be registered and removed while orders are live; each lookup sees the
/// current registration. Lookups borrow the key, so a transition allocates nothing here.
#[derive(Default)]
pub struct PositionRegistry {
    positions: RwLock<HashMap<String, HashMap<String, Arc<dyn PositionHooks>>>>,
}

impl PositionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `position` under `(exchange, symbol)`, replacing any previous one.
    pub fn register(
        &self,
        exchange: impl Into<String>,
        symbol: impl Into<String>,
        position: Arc<dyn PositionHooks>,
    ) -> Option<Arc<dyn PositionHooks>> {
        let mut guard = self.positions.write().unwrap_or_else(|e| e.into_inner());
        guard
            .entry(exchange.into())
            .or_default()
            .insert(symbol.into(), position)
    }

    /// Removes the position under `(exchange, symbol)`. Returns it if one was registered.
    pub fn remove(&self, exchange: &str, symbol: &str) -> Option<Arc<dyn PositionHooks>> {
        let mut guard = self.positions.write().unwrap_or_else(|e| e.into_inner());
        let symbols = guard.get_mut(exchange)?;
        let removed = symbols.remove(symbol);
        if symbols.is_empty() {
            guard.remove(exchange);
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.positions
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .values()
            .map(HashMap::len)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PositionLookup for PositionRegistry {
    fn position(&self, exchange: &str, symbol: &str) -> Option<Arc<dyn PositionHooks>> {
        let guard = self.positions.read().unwrap_or_else(|e| e.into_inner());
        guard.get(exchange)?.get(symbol).cloned()
    }
}

impl std::fmt::Debug for PositionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let guard = self.positions.read().unwrap_or_else(|e| e.into_inner());
        let keys: Vec<(&String, &String)> = guard
            .iter()
            .flat_map(|(exchange, symbols)| symbols.keys().map(move |symbol| (exchange, symbol)))
            .collect();
        f.debug_struct("PositionRegistry").field("keys", &keys).finish()
    }
}

/// Which hook was called.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PositionEvent {
    Opened,
    Canceled,
    Executed,
}

/// Position that records every hook call. Clone shares the same backing buffer.
#[derive(Clone, Default)]
pub struct RecordingPosition {
    events: Arc<Mutex<Vec<(PositionEvent, OrderId)>>>,
}

impl RecordingPosition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<(PositionEvent, OrderId)> {
        self.events.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Number of calls of `kind`, optionally restricted to one order.
    pub fn count(&self, kind: PositionEvent, order_id: Option<OrderId>) -> usize {
        self.events
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .filter(|(k, id)| *k == kind && order_id.map_or(true, |o| o == *id))
            .count()
    }

    pub fn clear(&self) {
        self.events.lock().unwrap_or_else(|e| e.into_inner()).clear();
    }

    fn record(&self, kind: PositionEvent, order: &Order) {
        self.events
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push((kind, order.id()));
    }
}

impl PositionHooks for RecordingPosition {
    fn on_opened_order(&self, order: &Order) {
        self.record(PositionEvent::Opened, order);
    }

    fn on_canceled_order(&self, order: &Order) {
        self.record(PositionEvent::Canceled, order);
    }

    fn on_executed_order(&self, order: &Order) {
        self.record(PositionEvent::Executed, order);
    }
}
