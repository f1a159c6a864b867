//! Per-frame gesture pipeline: landmarks → stable cursor + pinch edge.
//!
//! The host calls [`GestureEngine::step`] once per display frame.  The engine
//! never blocks and never reschedules itself.
//!
//! | Sample | Output | Filter / pinch state |
//! |---|---|---|
//! | `NotReady` | `Skipped` | untouched |
//! | `Hand` missing a fingertip | `Skipped` | untouched |
//! | `NoHand` | `Absent` | kept (no jump-from-origin on return) |
//! | `Hand` | `Present` (+ `pinch` on the closing frame) | updated |
//!
//! After [`GestureEngine::fail_device`] every step is `Skipped`.

use tracing::{debug, warn};

use crate::config::EngineConfig;
use crate::filter::PositionFilter;
use crate::geometry::{Point, ScreenMapping};
use crate::landmark::{HandPose, LandmarkSample};
use crate::pinch::PinchClassifier;
use crate::status::{StatusTracker, TrackingStatus};

// ════════════════════════════════════════════════════════════════════════════
// FrameOutput
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Debug, PartialEq)]
pub enum FrameOutput {
    /// Nothing was processed this tick; downstream keeps its previous state.
    Skipped,
    /// No hand: clear any hover, hide the cursor.
    Absent,
    Present {
        position: Point,
        pinching: bool,
        /// Set on the frame a pinch closes, carrying the cursor position.
        pinch:    Option<Point>,
    },
}

impl FrameOutput {
    pub fn position(&self) -> Option<Point> {
        match self {
            FrameOutput::Present { position, .. } => Some(*position),
            _ => None,
        }
    }
}

/// A frame's output plus a status change, if this frame caused one.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameResult {
    pub output: FrameOutput,
    pub status: Option<TrackingStatus>,
}

// ════════════════════════════════════════════════════════════════════════════
// GestureEngine
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug)]
pub struct GestureEngine {
    filter:  PositionFilter,
    pinch:   PinchClassifier,
    mapping: ScreenMapping,
    status:  StatusTracker,
}

impl GestureEngine {
    pub fn new(cfg: &EngineConfig) -> Self {
        GestureEngine {
            filter:  PositionFilter::from_config(cfg),
            pinch:   PinchClassifier::new(cfg.pinch_threshold),
            mapping: ScreenMapping::from_config(&cfg.screen),
            status:  StatusTracker::new(),
        }
    }

    pub fn device_ready(&mut self) -> TrackingStatus {
        self.status.device_ready()
    }

    /// The input device could not be acquired.  Tracking stops; the host
    /// application keeps running.
    pub fn fail_device(&mut self, reason: impl Into<String>) -> TrackingStatus {
        self.status.fail(reason)
    }

    pub fn is_inert(&self) -> bool {
        self.status.is_failed()
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        debug!(width, height, "pointing surface resized");
        self.mapping.resize(width, height);
    }

    pub fn step(&mut self, sample: &LandmarkSample) -> FrameResult {
        if self.is_inert() {
            return FrameResult { output: FrameOutput::Skipped, status: None };
        }

        match sample {
            LandmarkSample::NotReady => FrameResult { output: FrameOutput::Skipped, status: None },

            LandmarkSample::NoHand => FrameResult {
                output: FrameOutput::Absent,
                status: self.status.observe_hand(false),
            },

            LandmarkSample::Hand(pose) => match self.track(pose) {
                Some(output) => FrameResult { output, status: self.status.observe_hand(true) },
                None => {
                    warn!(landmarks = pose.len(), "hand pose lacks index or thumb tip; frame skipped");
                    FrameResult { output: FrameOutput::Skipped, status: None }
                }
            },
        }
    }

    fn track(&mut self, pose: &HandPose) -> Option<FrameOutput> {
        let index_tip = pose.index_tip()?;
        let thumb_tip = pose.thumb_tip()?;

        let position = self.filter.update(self.mapping.to_screen(index_tip));
        let reading = self.pinch.update(index_tip, thumb_tip);

        Some(FrameOutput::Present {
            position,
            pinching: reading.is_pinching,
            pinch:    reading.edge.then_some(position),
        })
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn cursor(&self) -> Point               { self.filter.stable() }
    pub fn is_pinching(&self) -> bool           { self.pinch.is_pinching() }
    pub fn status(&self) -> Option<&TrackingStatus> { self.status.current() }
    pub fn mapping(&self) -> &ScreenMapping     { &self.mapping }
    pub fn filter(&self) -> &PositionFilter     { &self.filter }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScreenConfig;
    use crate::landmark::LandmarkPoint;
    use approx::assert_relative_eq;

    fn engine() -> GestureEngine {
        GestureEngine::new(&EngineConfig {
            screen: ScreenConfig { width: 1000, height: 1000, mirror: false },
            ..EngineConfig::default()
        })
    }

    fn hand(x: f32, y: f32, pinch_gap: f32) -> LandmarkSample {
        LandmarkSample::Hand(HandPose::from_tips(
            LandmarkPoint::new(x, y, 0.0),
            LandmarkPoint::new(x + pinch_gap, y, 0.0),
        ))
    }

    #[test]
    fn present_frame_reports_filtered_position() {
        let mut e = engine();
        let r = e.step(&hand(0.1, 0.2, 0.2));
        let p = r.output.position().unwrap();
        assert_relative_eq!(p.x, 30.0, epsilon = 1e-3);
        assert_relative_eq!(p.y, 60.0, epsilon = 1e-3);
    }

    #[test]
    fn pinch_notification_on_closing_frame_only() {
        let mut e = engine();
        let pinches: Vec<bool> = [0.2, 0.05, 0.05]
            .iter()
            .map(|&gap| match e.step(&hand(0.5, 0.5, gap)).output {
                FrameOutput::Present { pinch, .. } => pinch.is_some(),
                other => panic!("unexpected {other:?}"),
            })
            .collect();
        assert_eq!(pinches, [false, true, false]);
    }

    #[test]
    fn not_ready_leaves_state_untouched() {
        let mut e = engine();
        e.step(&hand(0.5, 0.5, 0.01));
        let cursor = e.cursor();
        let state = *e.filter().state();
        let r = e.step(&LandmarkSample::NotReady);
        assert_eq!(r.output, FrameOutput::Skipped);
        assert_eq!(e.cursor(), cursor);
        assert_eq!(*e.filter().state(), state);
        assert!(e.is_pinching());
    }

    #[test]
    fn absence_keeps_filter_position() {
        let mut e = engine();
        for _ in 0..30 {
            e.step(&hand(0.4, 0.4, 0.2));
        }
        let before = e.cursor();
        assert_eq!(e.step(&LandmarkSample::NoHand).output, FrameOutput::Absent);
        let after = e.step(&hand(0.4, 0.4, 0.2)).output.position().unwrap();
        // resumes next to where it was, not from the origin
        assert!((after.x - before.x).abs() <= 3.0);
        assert!((after.y - before.y).abs() <= 3.0);
    }

    #[test]
    fn malformed_pose_is_skipped() {
        let mut e = engine();
        let r = e.step(&LandmarkSample::Hand(HandPose::new(vec![LandmarkPoint::default(); 6])));
        assert_eq!(r.output, FrameOutput::Skipped);
        assert_eq!(e.cursor(), Point::default());
    }

    #[test]
    fn status_follows_hand_transitions() {
        let mut e = engine();
        e.device_ready();
        assert_eq!(e.step(&hand(0.5, 0.5, 0.2)).status.map(|s| s.as_str()), Some("connected"));
        assert_eq!(e.step(&hand(0.5, 0.5, 0.2)).status, None);
        assert_eq!(e.step(&LandmarkSample::NoHand).status.map(|s| s.as_str()), Some("no-hand"));
    }

    #[test]
    fn failed_device_makes_engine_inert() {
        let mut e = engine();
        e.fail_device("Camera access denied");
        assert!(e.is_inert());
        assert_eq!(e.step(&hand(0.5, 0.5, 0.01)).output, FrameOutput::Skipped);
        assert_eq!(e.step(&LandmarkSample::NoHand).output, FrameOutput::Skipped);
        assert_eq!(e.status().map(|s| s.as_str()), Some("error"));
    }

    #[test]
    fn resize_rescales_mapping() {
        let mut e = engine();
        e.resize(2000.0, 1000.0);
        assert_eq!(e.mapping().size(), (2000.0, 1000.0));
    }
}
