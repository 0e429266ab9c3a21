//! Core types and IDs for the order lifecycle.
//!
//! Identifiers are newtype wrappers. [`Side`], [`OrderType`], [`OrderFlag`], and
//! [`OrderStatus`] describe a submitted order; timestamps are milliseconds since the Unix epoch.

use std::fmt;

use uuid::Uuid;

/// Milliseconds since the Unix epoch.
pub type Timestamp = u64;

/// Locally generated order identifier. Stable for the order's lifetime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct OrderId(pub Uuid);

impl OrderId {
    /// Fresh random (v4) id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Identifier assigned by the market once it acknowledges the order.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct ExchangeOrderId(pub String);

/// Order side.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    #[default]
    Buy,
    Sell,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Side::Buy => "buy",
            Side::Sell => "sell",
        })
    }
}

/// Order type. Opaque to the lifecycle; only read and forwarded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderType {
    #[default]
    Market,
    Limit,
    Stop,
    StopLimit,
    /// Fill-or-kill.
    Fok,
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OrderType::Market => "market",
            OrderType::Limit => "limit",
            OrderType::Stop => "stop",
            OrderType::StopLimit => "stop_limit",
            OrderType::Fok => "fok",
        })
    }
}

/// Modifier interpreted by the position, not by the lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderFlag {
    #[default]
    None,
    ReduceOnly,
    Close,
}

/// Lifecycle status.
///
/// `Active` and `Queued` are open; `Canceled` and `Executed` are terminal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Active,
    /// Live mode only: accepted by the strategy but deferred by the exchange because the
    /// price is too far from the market. Resubmission is the driver's job.
    Queued,
    Canceled,
    Executed,
}

impl OrderStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Canceled | OrderStatus::Executed)
    }
}

/// Status an order may be submitted with. Terminal states can only be reached by a transition.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmitStatus {
    #[default]
    Active,
    Queued,
}

impl From<SubmitStatus> for OrderStatus {
    fn from(status: SubmitStatus) -> Self {
        match status {
            SubmitStatus::Active => OrderStatus::Active,
            SubmitStatus::Queued => OrderStatus::Queued,
        }
    }
}

/// Liquidity role reported for a fill. Informational only.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderRole {
    Maker,
    Taker,
}
