//! Lifecycle configuration: trading mode plus per-event notification and debug-log toggles.
//!
//! Built from a JSON document ([`LifecycleConfig::from_json_str`], [`LifecycleConfig::load`])
//! or from environment variables ([`LifecycleConfig::from_env`]). Passed explicitly into
//! [`crate::OrderLifecycle`]; nothing here is global.

use std::path::Path;

/// Live trading talks to an exchange; backtest runs against historical data.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradingMode {
    Live,
    #[default]
    Backtest,
}

/// Kind of lifecycle event. Selects which notification and debug flag applies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LifecycleEvent {
    Submission,
    Cancellation,
    Execution,
}

/// Which events are sent to the notifier. Only consulted in live mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NotificationEvents {
    pub submitted_orders: bool,
    pub cancelled_orders: bool,
    pub executed_orders: bool,
}

impl Default for NotificationEvents {
    fn default() -> Self {
        Self {
            submitted_orders: true,
            cancelled_orders: true,
            executed_orders: true,
        }
    }
}

/// Which events produce a debug log line. Independent of trading mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DebugEvents {
    pub order_submission: bool,
    pub order_cancellation: bool,
    pub order_execution: bool,
}

/// Read-only configuration for an [`crate::OrderLifecycle`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LifecycleConfig {
    pub mode: TradingMode,
    pub notifications: NotificationEvents,
    pub debug: DebugEvents,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid value {value:?} for {var}")]
    Env { var: &'static str, value: String },
}

impl LifecycleConfig {
    /// Live mode with the given notification toggles and no debug logging.
    pub fn live(notifications: NotificationEvents) -> Self {
        Self {
            mode: TradingMode::Live,
            notifications,
            debug: DebugEvents::default(),
        }
    }

    pub fn is_live(&self) -> bool {
        self.mode == TradingMode::Live
    }

    /// True if `event` should reach the notifier: live mode and the event's toggle is on.
    pub fn should_notify(&self, event: LifecycleEvent) -> bool {
        if !self.is_live() {
            return false;
        }
        match event {
            LifecycleEvent::Submission => self.notifications.submitted_orders,
            LifecycleEvent::Cancellation => self.notifications.cancelled_orders,
            LifecycleEvent::Execution => self.notifications.executed_orders,
        }
    }

    /// True if `event` should produce a debug log line.
    pub fn should_log(&self, event: LifecycleEvent) -> bool {
        match event {
            LifecycleEvent::Submission => self.debug.order_submission,
            LifecycleEvent::Cancellation => self.debug.order_cancellation,
            LifecycleEvent::Execution => self.debug.order_execution,
        }
    }

    /// Parse from JSON. Missing fields take their defaults; unknown fields are rejected.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let data = std::fs::read_to_string(path)?;
        Self::from_json_str(&data)
    }

    /// Build from environment variables. Unset variables keep their defaults.
    ///
    /// `TRADING_MODE` is `live` or `backtest`. Boolean variables accept
    /// `true/false`, `1/0`, `yes/no`, `on/off`:
    /// `NOTIFY_SUBMITTED_ORDERS`, `NOTIFY_CANCELLED_ORDERS`, `NOTIFY_EXECUTED_ORDERS`,
    /// `DEBUG_ORDER_SUBMISSION`, `DEBUG_ORDER_CANCELLATION`, `DEBUG_ORDER_EXECUTION`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(value) = lookup("TRADING_MODE") {
            config.mode = if value.eq_ignore_ascii_case("live") {
                TradingMode::Live
            } else if value.eq_ignore_ascii_case("backtest") {
                TradingMode::Backtest
            } else {
                return Err(ConfigError::Env {
                    var: "TRADING_MODE",
                    value,
                });
            };
        }
        let flags: [(&'static str, &mut bool); 6] = [
            ("NOTIFY_SUBMITTED_ORDERS", &mut config.notifications.submitted_orders),
            ("NOTIFY_CANCELLED_ORDERS", &mut config.notifications.cancelled_orders),
            ("NOTIFY_EXECUTED_ORDERS", &mut config.notifications.executed_orders),
            ("DEBUG_ORDER_SUBMISSION", &mut config.debug.order_submission),
            ("DEBUG_ORDER_CANCELLATION", &mut config.debug.order_cancellation),
            ("DEBUG_ORDER_EXECUTION", &mut config.debug.order_execution),
        ];
        for (var, slot) in flags {
            if let Some(value) = lookup(var) {
                *slot = match parse_bool(&value) {
                    Some(flag) => flag,
                    None => return Err(ConfigError::Env { var, value }),
                };
            }
        }
        Ok(config)
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k: &str| map.get(k).cloned()
    }

    #[test]
    fn defaults_are_backtest_quiet() {
        let config = LifecycleConfig::default();
        assert!(!config.is_live());
        assert!(!config.should_notify(LifecycleEvent::Submission));
        assert!(!config.should_log(LifecycleEvent::Execution));
    }

    #[test]
    fn notifications_require_live_mode() {
        let mut config = LifecycleConfig::default();
        config.notifications.executed_orders = true;
        assert!(!config.should_notify(LifecycleEvent::Execution));
        config.mode = TradingMode::Live;
        assert!(config.should_notify(LifecycleEvent::Execution));
        config.notifications.cancelled_orders = false;
        assert!(!config.should_notify(LifecycleEvent::Cancellation));
    }

    #[test]
    fn json_partial_document_fills_defaults() {
        let config = LifecycleConfig::from_json_str(
            r#"{"mode":"live","debug":{"order_execution":true}}"#,
        )
        .unwrap();
        assert!(config.is_live());
        assert!(config.notifications.submitted_orders);
        assert!(config.debug.order_execution);
        assert!(!config.debug.order_submission);
    }

    #[test]
    fn json_unknown_field_rejected() {
        let err = LifecycleConfig::from_json_str(r#"{"mode":"live","colour":"red"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"notifications":{{"cancelled_orders":false}}}}"#).unwrap();
        let config = LifecycleConfig::load(file.path()).unwrap();
        assert!(!config.notifications.cancelled_orders);
        assert!(config.notifications.executed_orders);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = LifecycleConfig::load(dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn env_overrides() {
        let config = LifecycleConfig::from_lookup(lookup_from(&[
            ("TRADING_MODE", "LIVE"),
            ("NOTIFY_SUBMITTED_ORDERS", "off"),
            ("DEBUG_ORDER_CANCELLATION", "1"),
        ]))
        .unwrap();
        assert!(config.is_live());
        assert!(!config.notifications.submitted_orders);
        assert!(config.notifications.executed_orders);
        assert!(config.debug.order_cancellation);
    }

    #[test]
    fn env_invalid_values_rejected() {
        let err = LifecycleConfig::from_lookup(lookup_from(&[("TRADING_MODE", "paper")])).unwrap_err();
        assert!(err.to_string().contains("TRADING_MODE"));
        let err =
            LifecycleConfig::from_lookup(lookup_from(&[("DEBUG_ORDER_EXECUTION", "maybe")])).unwrap_err();
        assert!(err.to_string().contains("DEBUG_ORDER_EXECUTION"));
    }
}
