//! Notification queue installed at bootstrap.
//!
//! Presentation is up to the host: notifications are logged on arrival and
//! held until drained.

use log::{info, warn};
use std::collections::VecDeque;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Info,
    Error,
}

impl NotificationLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Info => "info",
            Self::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
    /// How long the host should keep it visible.
    pub timeout: Duration,
}

#[derive(Debug)]
pub struct Notifier {
    timeout: Duration,
    pending: VecDeque<Notification>,
}

impl Notifier {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            pending: VecDeque::new(),
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(NotificationLevel::Success, message.into());
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(NotificationLevel::Info, message.into());
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(NotificationLevel::Error, message.into());
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Removes and returns queued notifications, oldest first.
    pub fn drain(&mut self) -> Vec<Notification> {
        self.pending.drain(..).collect()
    }

    fn push(&mut self, level: NotificationLevel, message: String) {
        match level {
            NotificationLevel::Error => warn!(
                "event=notify module=notify level={} chars={}",
                level.as_str(),
                message.chars().count()
            ),
            _ => info!(
                "event=notify module=notify level={} chars={}",
                level.as_str(),
                message.chars().count()
            ),
        }
        self.pending.push_back(Notification {
            level,
            message,
            timeout: self.timeout,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::{NotificationLevel, Notifier};
    use std::time::Duration;

    #[test]
    fn drain_returns_in_arrival_order_with_configured_timeout() {
        let mut notifier = Notifier::new(Duration::from_millis(3000));
        notifier.success("saved");
        notifier.error("failed");
        assert_eq!(notifier.pending(), 2);

        let drained = notifier.drain();
        assert_eq!(drained[0].level, NotificationLevel::Success);
        assert_eq!(drained[1].message, "failed");
        assert!(drained
            .iter()
            .all(|n| n.timeout == Duration::from_millis(3000)));
        assert_eq!(notifier.pending(), 0);
    }
}
