//! Hand landmark input as delivered by a tracker, one sample per frame.

/// Landmark indices of the 21-point hand model.
///
/// Only [`THUMB_TIP`](index::THUMB_TIP) and [`INDEX_TIP`](index::INDEX_TIP)
/// are read by the engine.
pub mod index {
    pub const WRIST:      usize = 0;
    pub const THUMB_CMC:  usize = 1;
    pub const THUMB_MCP:  usize = 2;
    pub const THUMB_IP:   usize = 3;
    pub const THUMB_TIP:  usize = 4;
    pub const INDEX_MCP:  usize = 5;
    pub const INDEX_PIP:  usize = 6;
    pub const INDEX_DIP:  usize = 7;
    pub const INDEX_TIP:  usize = 8;
    pub const MIDDLE_TIP: usize = 12;
    pub const RING_TIP:   usize = 16;
    pub const PINKY_TIP:  usize = 20;

    /// Number of points in a full pose.
    pub const COUNT:      usize = 21;
}

/// One landmark.  `x`/`y` are fractions of the camera frame, `z` is a
/// unitless relative depth.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LandmarkPoint {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl LandmarkPoint {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        LandmarkPoint { x, y, z }
    }

    /// Euclidean distance in all three axes.
    pub fn distance(&self, other: &LandmarkPoint) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

/// The landmarks of a single detected hand, ordered by [`index`].
#[derive(Clone, Debug, PartialEq)]
pub struct HandPose {
    landmarks: Vec<LandmarkPoint>,
}

impl HandPose {
    pub fn new(landmarks: Vec<LandmarkPoint>) -> Self {
        HandPose { landmarks }
    }

    /// A full-size pose where only the index and thumb tips carry data.
    /// Used by synthetic sources (mouse simulation, hardware with fewer joints).
    pub fn from_tips(index_tip: LandmarkPoint, thumb_tip: LandmarkPoint) -> Self {
        let mut landmarks = vec![LandmarkPoint::default(); index::COUNT];
        landmarks[index::INDEX_TIP] = index_tip;
        landmarks[index::THUMB_TIP] = thumb_tip;
        HandPose { landmarks }
    }

    pub fn get(&self, i: usize) -> Option<&LandmarkPoint> {
        self.landmarks.get(i)
    }

    pub fn index_tip(&self) -> Option<&LandmarkPoint> {
        self.get(index::INDEX_TIP)
    }

    pub fn thumb_tip(&self) -> Option<&LandmarkPoint> {
        self.get(index::THUMB_TIP)
    }

    pub fn len(&self) -> usize {
        self.landmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.landmarks.is_empty()
    }
}

/// What the landmark source produced for one frame.
#[derive(Clone, Debug, PartialEq)]
pub enum LandmarkSample {
    /// The input frame was not ready for inference; nothing to process.
    NotReady,
    /// Inference ran and found no hand.
    NoHand,
    Hand(HandPose),
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn distance_uses_depth() {
        let a = LandmarkPoint::new(0.0, 0.0, 0.0);
        let b = LandmarkPoint::new(0.3, 0.0, 0.4);
        assert_relative_eq!(a.distance(&b), 0.5);
    }

    #[test]
    fn from_tips_places_tips_at_model_indices() {
        let pose = HandPose::from_tips(
            LandmarkPoint::new(0.5, 0.5, 0.0),
            LandmarkPoint::new(0.6, 0.5, 0.0),
        );
        assert_eq!(pose.len(), index::COUNT);
        assert_eq!(pose.index_tip(), Some(&LandmarkPoint::new(0.5, 0.5, 0.0)));
        assert_eq!(pose.thumb_tip(), Some(&LandmarkPoint::new(0.6, 0.5, 0.0)));
    }

    #[test]
    fn short_pose_has_no_index_tip() {
        let pose = HandPose::new(vec![LandmarkPoint::default(); 5]);
        assert!(pose.thumb_tip().is_some());
        assert!(pose.index_tip().is_none());
    }
}
