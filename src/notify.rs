//! Transient toast notifications.
//!
//! Listeners push short messages here; the shell renders the most recent
//! ones in a strip at the bottom of the screen and prunes them on every
//! tick.

use std::time::{Duration, Instant};

/// How long a toast stays visible.
pub const NOTIFICATION_TIME: Duration = Duration::from_millis(1500);

struct Notice {
    text: String,
    created: Instant,
}

/// Queue of live toasts.
pub struct Notifications {
    notices: Vec<Notice>,
    ttl: Duration,
}

impl Notifications {
    pub fn new() -> Self {
        Self {
            notices: Vec::new(),
            ttl: NOTIFICATION_TIME,
        }
    }

    pub fn show(&mut self, text: impl Into<String>) {
        self.notices.push(Notice {
            text: text.into(),
            created: Instant::now(),
        });
    }

    /// Drops expired toasts. Called once per frame.
    pub fn tick(&mut self) {
        let ttl = self.ttl;
        self.notices.retain(|n| n.created.elapsed() < ttl);
    }

    /// Live toast texts, oldest first.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.notices.iter().map(|n| n.text.as_str())
    }

    pub fn len(&self) -> usize {
        self.notices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notices.is_empty()
    }
}

impl Default for Notifications {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shows_in_order() {
        let mut n = Notifications::new();
        n.show("first");
        n.show("second");
        let texts: Vec<_> = n.texts().collect();
        assert_eq!(texts, vec!["first", "second"]);
    }

    #[test]
    fn tick_prunes_expired() {
        let mut n = Notifications::new();
        n.ttl = Duration::from_millis(0);
        n.show("gone");
        n.tick();
        assert!(n.is_empty());
    }
}
