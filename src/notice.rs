//! Transient notices ("toasts") shown by the host.

use std::time::{Duration, Instant};

/// Host-owned surface that can show a short notice.
///
/// Only ever called on the main thread.
pub trait Notifier {
    /// Show `text`, replacing any notice currently visible.
    fn show_notice(&mut self, text: &str);
}

/// A notice and when it stops being visible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransientNotice {
    /// Displayed text.
    pub text: String,
    /// Instant the notice expires.
    pub expires_at: Instant,
}

/// At most one visible notice; a newer one replaces the current.
#[derive(Debug, Clone, Default)]
pub struct NoticeSlot {
    current: Option<TransientNotice>,
}

impl NoticeSlot {
    /// Show `text` from `now` for `duration`.
    pub fn show(&mut self, text: &str, now: Instant, duration: Duration) {
        self.current = Some(TransientNotice {
            text: text.to_owned(),
            expires_at: now + duration,
        });
    }

    /// Text of the visible notice.
    #[must_use]
    pub fn current(&self) -> Option<&str> {
        self.current.as_ref().map(|n| n.text.as_str())
    }

    /// When the visible notice expires.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.current.as_ref().map(|n| n.expires_at)
    }

    /// Drop the notice if it has expired by `now`. Returns `true` if one
    /// was dropped.
    pub fn expire(&mut self, now: Instant) -> bool {
        if self.deadline().is_some_and(|deadline| now >= deadline) {
            self.current = None;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHORT: Duration = Duration::from_millis(2000);

    #[test]
    fn notice_expires_after_duration() {
        let t0 = Instant::now();
        let mut slot = NoticeSlot::default();
        slot.show("900", t0, SHORT);
        assert_eq!(slot.current(), Some("900"));
        assert_eq!(slot.deadline(), Some(t0 + SHORT));

        assert!(!slot.expire(t0 + Duration::from_millis(1999)));
        assert!(slot.expire(t0 + SHORT));
        assert_eq!(slot.current(), None);
        assert!(!slot.expire(t0 + SHORT * 2));
    }

    #[test]
    fn newer_notice_replaces_and_extends() {
        let t0 = Instant::now();
        let mut slot = NoticeSlot::default();
        slot.show("first", t0, SHORT);
        slot.show("second", t0 + Duration::from_millis(1500), SHORT);
        assert!(!slot.expire(t0 + SHORT));
        assert_eq!(slot.current(), Some("second"));
    }
}
