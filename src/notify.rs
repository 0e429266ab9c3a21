//! Outward notifications for order events (live mode).
//!
//! Delivery is best-effort: the lifecycle logs a failed [`Notifier::notify`] and carries on.
//! Sinks: the `log` facade, in-memory (tests), or nothing.

use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotifyError {
    #[error("notification channel unavailable: {0}")]
    Unavailable(String),
    #[error("notification rejected: {0}")]
    Rejected(String),
}

/// Sink for user-facing notifications. Safe to use from multiple threads.
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str) -> Result<(), NotifyError>;
}

/// Writes each notification as an info line on target `order_lifecycle::notify`.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, message: &str) -> Result<(), NotifyError> {
        log::info!(target: "order_lifecycle::notify", "{}", message);
        Ok(())
    }
}

/// Drops every notification.
#[derive(Clone, Copy, Debug, Default)]
pub struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn notify(&self, _message: &str) -> Result<(), NotifyError> {
        Ok(())
    }
}

/// In-memory notifier for tests. Clone shares the same backing buffer.
///
/// [`InMemoryNotifier::failing`] and [`InMemoryNotifier::rejecting`] return an error for every
/// message (still recording it) to exercise the best-effort path.
#[derive(Clone, Default)]
pub struct InMemoryNotifier {
    messages: Arc<Mutex<Vec<String>>>,
    fail_with: Option<NotifyError>,
}

impl InMemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every message fails with [`NotifyError::Unavailable`].
    pub fn failing() -> Self {
        Self {
            messages: Arc::default(),
            fail_with: Some(NotifyError::Unavailable("in-memory notifier set to fail".into())),
        }
    }

    /// Every message fails with [`NotifyError::Rejected`].
    pub fn rejecting() -> Self {
        Self {
            messages: Arc::default(),
            fail_with: Some(NotifyError::Rejected("in-memory notifier set to reject".into())),
        }
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn clear(&self) {
        self.messages.lock().unwrap_or_else(|e| e.into_inner()).clear();
    }
}

impl Notifier for InMemoryNotifier {
    fn notify(&self, message: &str) -> Result<(), NotifyError> {
        self.messages
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(message.to_string());
        match &self.fail_with {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_memory_clone_shares_buffer() {
        let a = InMemoryNotifier::new();
        let b = a.clone();
        a.notify("one").unwrap();
        b.notify("two").unwrap();
        assert_eq!(a.messages(), vec!["one".to_string(), "two".to_string()]);
        b.clear();
        assert!(a.messages().is_empty());
    }

    #[test]
    fn failing_notifier_records_then_errors() {
        let n = InMemoryNotifier::failing();
        let err = n.notify("EXECUTED order: x").unwrap_err();
        assert!(matches!(err, NotifyError::Unavailable(_)));
        assert_eq!(n.messages().len(), 1);
    }

    #[test]
    fn rejecting_notifier_returns_rejected() {
        let n = InMemoryNotifier::rejecting();
        let err = n.notify("CANCELED order: x").unwrap_err();
        assert!(matches!(err, NotifyError::Rejected(_)));
        assert!(err.to_string().starts_with("notification rejected"));
        assert_eq!(n.messages(), vec!["CANCELED order: x".to_string()]);
    }

    #[test]
    fn log_and_silent_notifiers_succeed() {
        crate::test_log::init();
        let before = crate::test_log::lines("order_lifecycle::notify").len();
        assert!(LogNotifier.notify("SUBMITTED order: x").is_ok());
        assert!(SilentNotifier.notify("SUBMITTED order: y").is_ok());
        assert_eq!(
            crate::test_log::lines("order_lifecycle::notify").split_off(before),
            vec!["SUBMITTED order: x".to_string()]
        );
    }
}
