//! # Notifications
//!
//! A single transient message for the presentation layer.
//!
//! ```text
//!   t=0s   post("Sale added successfully!")   current() → Some(success)
//!   t=1s   post("Failed to add expense")      current() → Some(error)   (replaces)
//!   t=3.9s                                    current() → Some(error)
//!   t=4s                                      current() → None          (expired)
//! ```
//!
//! Expiry is evaluated when the message is read, against tokio's clock, so
//! nothing has to run in the background.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use serde::Serialize;
use tokio::time::Instant;

/// How long a message stays visible unless configured otherwise.
pub const DEFAULT_NOTIFICATION_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Error,
}

/// The message currently shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub text: String,
    pub severity: Severity,
}

#[derive(Debug)]
struct Posted {
    notification: Notification,
    expires_at: Instant,
}

/// Holds at most one notification; a newer one replaces the older one.
#[derive(Debug)]
pub struct Notifier {
    ttl: Duration,
    current: Mutex<Option<Posted>>,
}

impl Notifier {
    pub fn new(ttl: Duration) -> Self {
        Notifier {
            ttl,
            current: Mutex::new(None),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn post(&self, text: impl Into<String>, severity: Severity) {
        let posted = Posted {
            notification: Notification {
                text: text.into(),
                severity,
            },
            expires_at: Instant::now() + self.ttl,
        };

        *self.current.lock().unwrap_or_else(PoisonError::into_inner) = Some(posted);
    }

    pub fn success(&self, text: impl Into<String>) {
        self.post(text, Severity::Success);
    }

    pub fn error(&self, text: impl Into<String>) {
        self.post(text, Severity::Error);
    }

    /// The visible message, or `None` once it has expired.
    pub fn current(&self) -> Option<Notification> {
        let mut slot = self.current.lock().unwrap_or_else(PoisonError::into_inner);

        match slot.as_ref() {
            Some(posted) if Instant::now() < posted.expires_at => {
                Some(posted.notification.clone())
            }
            Some(_) => {
                *slot = None;
                None
            }
            None => None,
        }
    }

    pub fn clear(&self) {
        *self.current.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Notifier::new(DEFAULT_NOTIFICATION_TTL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time;

    #[tokio::test(start_paused = true)]
    async fn test_message_expires_after_ttl() {
        let notifier = Notifier::default();
        notifier.success("Sale added successfully!");

        time::advance(Duration::from_millis(2999)).await;
        assert_eq!(
            notifier.current(),
            Some(Notification {
                text: "Sale added successfully!".to_string(),
                severity: Severity::Success,
            })
        );

        time::advance(Duration::from_millis(1)).await;
        assert_eq!(notifier.current(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_newer_message_replaces_older() {
        let notifier = Notifier::default();
        notifier.success("Expense added successfully!");

        time::advance(Duration::from_secs(2)).await;
        notifier.error("Failed to add sale");

        // The first message's window has passed; the second's has not.
        time::advance(Duration::from_secs(2)).await;
        let current = notifier.current().unwrap();
        assert_eq!(current.severity, Severity::Error);
        assert_eq!(current.text, "Failed to add sale");
    }

    #[tokio::test(start_paused = true)]
    async fn test_custom_ttl_and_clear() {
        let notifier = Notifier::new(Duration::from_secs(10));
        notifier.error("Failed to load data from database");

        time::advance(Duration::from_secs(5)).await;
        assert!(notifier.current().is_some());

        notifier.clear();
        assert!(notifier.current().is_none());
    }
}
