//! One interaction session: gesture engine and dwell selector driven together.
//!
//! The host owns the frame loop and calls [`InteractionSession::step`] once
//! per tick with the latest landmark sample and the session clock.  Within a
//! frame the pinch is handled before the hover update, so when a pinch and a
//! completed dwell land on the same frame the pinch takes the activation.

use std::time::Duration;

use crate::config::EngineConfig;
use crate::dwell::{Activation, ActivationSink, DwellPhase, DwellSelector};
use crate::engine::{FrameOutput, FrameResult, GestureEngine};
use crate::geometry::Point;
use crate::landmark::LandmarkSample;
use crate::status::TrackingStatus;
use crate::target::{TargetId, TargetResolver};

/// Continuous cursor notification for rendering hover feedback.
#[derive(Clone, Debug, PartialEq)]
pub struct CursorUpdate {
    pub position: Point,
    pub pinching: bool,
    pub hovered:  Option<TargetId>,
    pub progress: f32,
    pub phase:    DwellPhase,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StepReport {
    pub output:      FrameOutput,
    /// `None` when the hand is absent or the frame was skipped.
    pub cursor:      Option<CursorUpdate>,
    /// Activations delivered to the sink this frame (at most one in practice,
    /// since both triggers share the cooldown gate).
    pub activations: Vec<Activation>,
    pub status:      Option<TrackingStatus>,
}

#[derive(Debug)]
pub struct InteractionSession {
    engine:   GestureEngine,
    selector: DwellSelector,
}

impl InteractionSession {
    pub fn new(cfg: &EngineConfig) -> Self {
        InteractionSession {
            engine:   GestureEngine::new(cfg),
            selector: DwellSelector::from_config(cfg),
        }
    }

    pub fn device_ready(&mut self) -> TrackingStatus {
        self.engine.device_ready()
    }

    pub fn fail_device(&mut self, reason: impl Into<String>) -> TrackingStatus {
        self.selector.clear_hover();
        self.engine.fail_device(reason)
    }

    pub fn step<R, S>(
        &mut self,
        sample: &LandmarkSample,
        now: Duration,
        resolver: &R,
        sink: &mut S,
    ) -> StepReport
    where
        R: TargetResolver + ?Sized,
        S: ActivationSink + ?Sized,
    {
        let FrameResult { output, status } = self.engine.step(sample);
        let mut activations = Vec::new();

        let cursor = match &output {
            FrameOutput::Skipped => None,

            FrameOutput::Absent => {
                self.selector.on_absence();
                None
            }

            FrameOutput::Present { position, pinching, pinch } => {
                if let Some(at) = pinch {
                    if let Some(a) = self.selector.on_pinch(resolver.resolve_target_at(*at), now) {
                        sink.activate(&a);
                        activations.push(a);
                    }
                }

                let target = resolver.resolve_target_at(*position);
                let (feedback, fired) = self.selector.on_presence(target, now);
                if let Some(a) = fired {
                    sink.activate(&a);
                    activations.push(a);
                }

                Some(CursorUpdate {
                    position: *position,
                    pinching: *pinching,
                    hovered:  feedback.target,
                    progress: feedback.progress,
                    phase:    feedback.phase,
                })
            }
        };

        StepReport { output, cursor, activations, status }
    }

    pub fn engine(&self) -> &GestureEngine          { &self.engine }
    pub fn engine_mut(&mut self) -> &mut GestureEngine { &mut self.engine }
    pub fn selector(&self) -> &DwellSelector        { &self.selector }
}
