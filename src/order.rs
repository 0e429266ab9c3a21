//! The [`Order`] entity and the [`OrderParams`] it is submitted with.
//!
//! Identity and submission parameters are fixed at construction. Status and the terminal
//! timestamps change only through [`crate::OrderLifecycle::cancel`] and
//! [`crate::OrderLifecycle::execute`], which go through [`Order::mark_canceled`] /
//! [`Order::mark_executed`] so the terminal guard lives in one place.

use rust_decimal::Decimal;

use crate::types::{
    ExchangeOrderId, OrderFlag, OrderId, OrderRole, OrderStatus, OrderType, Side, SubmitStatus,
    Timestamp,
};

/// Fields an order is submitted with. Anything left out takes its default.
///
/// Deserializing rejects unknown field names.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OrderParams {
    /// Generated when absent.
    pub id: Option<OrderId>,
    pub exchange_id: Option<ExchangeOrderId>,
    pub symbol: String,
    pub exchange: String,
    pub side: Side,
    #[serde(rename = "type")]
    pub order_type: OrderType,
    pub flag: OrderFlag,
    pub qty: Decimal,
    pub price: Decimal,
    pub status: SubmitStatus,
    /// Set to the lifecycle clock's "now" when absent.
    pub created_at: Option<Timestamp>,
    pub role: Option<OrderRole>,
}

/// A request to trade `qty` of `symbol` on `exchange` at `price`.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Order {
    id: OrderId,
    exchange_id: Option<ExchangeOrderId>,
    symbol: String,
    exchange: String,
    side: Side,
    #[serde(rename = "type")]
    order_type: OrderType,
    flag: OrderFlag,
    qty: Decimal,
    price: Decimal,
    status: OrderStatus,
    created_at: Timestamp,
    executed_at: Option<Timestamp>,
    canceled_at: Option<Timestamp>,
    role: Option<OrderRole>,
}

impl Order {
    pub(crate) fn from_params(params: OrderParams, now: Timestamp) -> Self {
        Self {
            id: params.id.unwrap_or_else(OrderId::generate),
            exchange_id: params.exchange_id,
            symbol: params.symbol,
            exchange: params.exchange,
            side: params.side,
            order_type: params.order_type,
            flag: params.flag,
            qty: params.qty,
            price: params.price,
            status: params.status.into(),
            created_at: params.created_at.unwrap_or(now),
            executed_at: None,
            canceled_at: None,
            role: params.role,
        }
    }

    /// Moves to `Canceled` at `now`. Returns `false` (and changes nothing) if already terminal.
    pub(crate) fn mark_canceled(&mut self, now: Timestamp) -> bool {
        if self.is_terminal() {
            return false;
        }
        self.canceled_at = Some(now);
        self.status = OrderStatus::Canceled;
        true
    }

    /// Moves to `Executed` at `now`. Returns `false` (and changes nothing) if already terminal.
    pub(crate) fn mark_executed(&mut self, now: Timestamp) -> bool {
        if self.is_terminal() {
            return false;
        }
        self.executed_at = Some(now);
        self.status = OrderStatus::Executed;
        true
    }

    pub fn id(&self) -> OrderId {
        self.id
    }

    pub fn exchange_id(&self) -> Option<&ExchangeOrderId> {
        self.exchange_id.as_ref()
    }

    /// Record the id the market assigned once it acknowledged the order.
    pub fn set_exchange_id(&mut self, exchange_id: ExchangeOrderId) {
        self.exchange_id = Some(exchange_id);
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn exchange(&self) -> &str {
        &self.exchange
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn order_type(&self) -> OrderType {
        self.order_type
    }

    pub fn flag(&self) -> OrderFlag {
        self.flag
    }

    pub fn qty(&self) -> Decimal {
        self.qty
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn executed_at(&self) -> Option<Timestamp> {
        self.executed_at
    }

    pub fn canceled_at(&self) -> Option<Timestamp> {
        self.canceled_at
    }

    pub fn role(&self) -> Option<OrderRole> {
        self.role
    }

    pub fn is_canceled(&self) -> bool {
        self.status == OrderStatus::Canceled
    }

    pub fn is_active(&self) -> bool {
        self.status == OrderStatus::Active
    }

    /// Alias of [`Order::is_active`].
    pub fn is_new(&self) -> bool {
        self.is_active()
    }

    /// Live mode only. The strategy treats the order as submitted, but the exchange has not
    /// accepted it yet because its price is too far from the market.
    pub fn is_queued(&self) -> bool {
        self.status == OrderStatus::Queued
    }

    pub fn is_executed(&self) -> bool {
        self.status == OrderStatus::Executed
    }

    /// Alias of [`Order::is_executed`].
    pub fn is_filled(&self) -> bool {
        self.is_executed()
    }

    pub fn is_reduce_only(&self) -> bool {
        self.flag == OrderFlag::ReduceOnly
    }

    pub fn is_close(&self) -> bool {
        self.flag == OrderFlag::Close
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// "QUEUED" for queued orders, "SUBMITTED" otherwise.
    pub fn submission_label(&self) -> &'static str {
        if self.is_queued() {
            "QUEUED"
        } else {
            "SUBMITTED"
        }
    }

    /// `"<LABEL> order: <symbol>, <type>, <side>, <qty>, $<price>"` with price rounded to 2dp.
    pub fn summary(&self, label: &str) -> String {
        format!(
            "{} order: {}, {}, {}, {}, ${}",
            label,
            self.symbol,
            self.order_type,
            self.side,
            self.qty,
            self.price.round_dp(2)
        )
    }
}
