//! Tracking status shown to the user.  Display only; no engine decision
//! depends on it.

use std::fmt;

use tracing::{info, warn};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TrackingStatus {
    /// Device ready, with or without a hand in view.
    Connected(String),
    /// Device ready, hand lost.
    NoHand(String),
    /// Device unavailable; tracking has stopped for good.
    Error(String),
}

impl TrackingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Connected(_) => "connected",
            Self::NoHand(_)    => "no-hand",
            Self::Error(_)     => "error",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Connected(m) | Self::NoHand(m) | Self::Error(m) => m,
        }
    }
}

impl fmt::Display for TrackingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.as_str(), self.message())
    }
}

/// Emits a status only when the hand/device situation actually changes.
#[derive(Debug, Default)]
pub struct StatusTracker {
    current:       Option<TrackingStatus>,
    hand_detected: bool,
}

impl StatusTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Device opened.  A failed tracker stays failed and keeps its error.
    pub fn device_ready(&mut self) -> TrackingStatus {
        if let Some(failed @ TrackingStatus::Error(_)) = &self.current {
            return failed.clone();
        }
        self.hand_detected = false;
        self.set(TrackingStatus::Connected("Camera ready - show your hand".into()))
    }

    pub fn fail(&mut self, reason: impl Into<String>) -> TrackingStatus {
        let reason = reason.into();
        warn!(%reason, "tracking device unavailable");
        self.set(TrackingStatus::Error(reason))
    }

    /// Record whether this frame saw a hand.  Returns the new status on a
    /// detected/lost transition.
    pub fn observe_hand(&mut self, present: bool) -> Option<TrackingStatus> {
        if self.is_failed() || present == self.hand_detected {
            return None;
        }
        self.hand_detected = present;
        let status = if present {
            TrackingStatus::Connected("Hand detected".into())
        } else {
            TrackingStatus::NoHand("No hand - show your hand".into())
        };
        Some(self.set(status))
    }

    pub fn current(&self) -> Option<&TrackingStatus> {
        self.current.as_ref()
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.current, Some(TrackingStatus::Error(_)))
    }

    fn set(&mut self, status: TrackingStatus) -> TrackingStatus {
        info!(status = status.as_str(), message = status.message(), "tracking status");
        self.current = Some(status.clone());
        status
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transitions_only() {
        let mut t = StatusTracker::new();
        t.device_ready();
        // no hand before any hand was seen: still "connected"
        assert_eq!(t.observe_hand(false), None);
        assert_eq!(t.observe_hand(true).map(|s| s.as_str()), Some("connected"));
        assert_eq!(t.observe_hand(true), None);
        assert_eq!(t.observe_hand(false).map(|s| s.as_str()), Some("no-hand"));
        assert_eq!(t.observe_hand(false), None);
    }

    #[test]
    fn failure_is_terminal() {
        let mut t = StatusTracker::new();
        t.fail("Camera access denied");
        assert!(t.is_failed());
        assert_eq!(t.observe_hand(true), None);
        assert_eq!(t.current().map(|s| s.message()), Some("Camera access denied"));
    }

    #[test]
    fn ready_after_failure_keeps_error() {
        let mut t = StatusTracker::new();
        t.fail("Camera access denied");
        assert_eq!(t.device_ready(), TrackingStatus::Error("Camera access denied".into()));
        assert!(t.is_failed());
    }

    #[test]
    fn display_shows_state_and_message() {
        let s = TrackingStatus::NoHand("No hand - show your hand".into());
        assert_eq!(s.to_string(), "[no-hand] No hand - show your hand");
    }
}
