//! Pinch classification with rising-edge detection.

use tracing::debug;

use crate::landmark::LandmarkPoint;

/// Current and previous-frame pinch flags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PinchState {
    pub is_pinching:  bool,
    pub was_pinching: bool,
}

/// Result of classifying one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PinchReading {
    pub distance:    f32,
    pub is_pinching: bool,
    /// True only on the frame the pinch closes.
    pub edge:        bool,
}

#[derive(Clone, Debug)]
pub struct PinchClassifier {
    threshold: f32,
    state:     PinchState,
}

impl PinchClassifier {
    pub fn new(threshold: f32) -> Self {
        PinchClassifier { threshold, state: PinchState::default() }
    }

    pub fn update(&mut self, index_tip: &LandmarkPoint, thumb_tip: &LandmarkPoint) -> PinchReading {
        let distance = index_tip.distance(thumb_tip);

        self.state.was_pinching = self.state.is_pinching;
        self.state.is_pinching = distance < self.threshold;

        let edge = self.state.is_pinching && !self.state.was_pinching;
        if edge {
            debug!(distance, "pinch closed");
        }

        PinchReading { distance, is_pinching: self.state.is_pinching, edge }
    }

    pub fn is_pinching(&self) -> bool {
        self.state.is_pinching
    }

    pub fn state(&self) -> PinchState {
        self.state
    }

    pub fn reset(&mut self) {
        self.state = PinchState::default();
    }
}
