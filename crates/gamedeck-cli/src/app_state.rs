use std::collections::VecDeque;
use std::time::{Duration, Instant};

use chrono::Local;

/// How long a confirmation toast stays on screen.
pub const TOAST_DURATION: Duration = Duration::from_secs(3);

/// Maximum number of lines kept in the activity log.
const ACTIVITY_CAPACITY: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Catalog,
    Detail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
}

/// Transient notification. Disappears [`TOAST_DURATION`] after it was
/// shown, whatever else happens in between.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub is_error: bool,
    shown_at: Instant,
}

impl Toast {
    pub fn info(message: impl Into<String>, now: Instant) -> Self {
        Self {
            message: message.into(),
            is_error: false,
            shown_at: now,
        }
    }

    pub fn error(message: impl Into<String>, now: Instant) -> Self {
        Self {
            message: message.into(),
            is_error: true,
            shown_at: now,
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) >= TOAST_DURATION
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityEntry {
    pub timestamp: String,
    pub content: String,
    pub is_error: bool,
}

/// Rolling log of network events shown at the bottom of the screen.
#[derive(Debug, Default)]
pub struct ActivityLog {
    entries: VecDeque<ActivityEntry>,
}

impl ActivityLog {
    pub fn push(&mut self, content: impl Into<String>, is_error: bool) {
        if self.entries.len() == ACTIVITY_CAPACITY {
            self.entries.pop_front();
        }
        self.entries.push_back(ActivityEntry {
            timestamp: Local::now().format("%H:%M:%S").to_string(),
            content: content.into(),
            is_error,
        });
    }

    pub fn entries(&self) -> impl DoubleEndedIterator<Item = &ActivityEntry> {
        self.entries.iter()
    }
}

pub trait AppController {
    fn update(&mut self, action: super::tui::Action);
    fn render(&mut self, f: &mut ratatui::Frame);
    fn should_quit(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toast_expires_after_three_seconds() {
        let start = Instant::now();
        let toast = Toast::info("Link copied to clipboard!", start);
        assert!(!toast.is_expired(start));
        assert!(!toast.is_expired(start + Duration::from_millis(2_999)));
        assert!(toast.is_expired(start + TOAST_DURATION));
    }

    #[test]
    fn toast_clock_going_backwards_is_not_expired() {
        let start = Instant::now() + Duration::from_secs(10);
        let toast = Toast::error("boom", start);
        assert!(!toast.is_expired(Instant::now()));
    }

    #[test]
    fn activity_log_is_bounded() {
        let mut log = ActivityLog::default();
        for i in 0..(ACTIVITY_CAPACITY + 5) {
            log.push(format!("event {i}"), false);
        }
        assert_eq!(log.entries().count(), ACTIVITY_CAPACITY);
        assert_eq!(log.entries().next().unwrap().content, "event 5");
    }
}
