//! Cursor stabilisation: exponential smoothing followed by a jitter deadband.
//!
//! The deadband compares the smoothed position against the last *stable*
//! output, not against the previous smoothed sample.  Slow drift therefore
//! accumulates until it crosses the threshold, and once it does the cursor
//! snaps straight to the smoothed position instead of easing toward it.

use crate::config::EngineConfig;
use crate::geometry::Point;

/// Filter state carried for the whole session.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CursorState {
    pub smoothed:        Point,
    /// The jitter-gated output.
    pub stable:          Point,
    pub previous_stable: Point,
}

#[derive(Clone, Debug)]
pub struct PositionFilter {
    smoothing: f32,
    jitter:    f32,
    state:     CursorState,
}

impl PositionFilter {
    /// A filter resting at the screen origin.
    pub fn new(smoothing: f32, jitter: f32) -> Self {
        Self::starting_at(smoothing, jitter, Point::default())
    }

    /// A filter whose smoothed and stable positions both rest at `origin`.
    pub fn starting_at(smoothing: f32, jitter: f32, origin: Point) -> Self {
        PositionFilter {
            smoothing,
            jitter,
            state: CursorState {
                smoothed:        origin,
                stable:          origin,
                previous_stable: origin,
            },
        }
    }

    pub fn from_config(cfg: &EngineConfig) -> Self {
        Self::new(cfg.smoothing_factor, cfg.jitter_threshold)
    }

    /// Feed one raw position and return the stable cursor.
    pub fn update(&mut self, raw: Point) -> Point {
        let a = self.smoothing;
        let s = &mut self.state;

        s.smoothed.x = a * s.smoothed.x + (1.0 - a) * raw.x;
        s.smoothed.y = a * s.smoothed.y + (1.0 - a) * raw.y;

        let dx = (s.smoothed.x - s.previous_stable.x).abs();
        let dy = (s.smoothed.y - s.previous_stable.y).abs();

        if dx > self.jitter || dy > self.jitter {
            s.stable = s.smoothed;
            s.previous_stable = s.stable;
        }
        s.stable
    }

    pub fn stable(&self) -> Point {
        self.state.stable
    }

    pub fn state(&self) -> &CursorState {
        &self.state
    }

    /// Back to the origin.  Only used when a new session starts; losing the
    /// hand must not reset the filter.
    pub fn reset(&mut self) {
        self.state = CursorState::default();
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn filter() -> PositionFilter {
        PositionFilter::new(0.7, 3.0)
    }

    #[test]
    fn first_sample_moves_thirty_percent() {
        let mut f = filter();
        let p = f.update(Point::new(100.0, 200.0));
        assert_relative_eq!(p.x, 30.0, epsilon = 1e-4);
        assert_relative_eq!(p.y, 60.0, epsilon = 1e-4);
    }

    #[test]
    fn converges_monotonically_to_held_input() {
        let mut f = filter();
        let target = Point::new(400.0, 300.0);
        let mut last = f.stable();
        for _ in 0..60 {
            let p = f.update(target);
            assert!(p.x >= last.x && p.y >= last.y);
            last = p;
        }
        assert!((target.x - last.x).abs() <= 3.0);
        assert!((target.y - last.y).abs() <= 3.0);
    }

    #[test]
    fn small_wobble_is_absorbed() {
        let origin = Point::new(500.0, 500.0);
        let mut f = PositionFilter::starting_at(0.7, 3.0, origin);
        for i in 0..50 {
            let d = if i % 2 == 0 { 2.5 } else { -2.5 };
            assert_eq!(f.update(Point::new(origin.x + d, origin.y - d)), origin);
        }
    }

    #[test]
    fn one_axis_over_threshold_moves_both() {
        let mut f = PositionFilter::starting_at(0.7, 3.0, Point::new(0.0, 0.0));
        // x moves by 0.3 * 20 = 6, y by 0.3 * 1 = 0.3
        let p = f.update(Point::new(20.0, 1.0));
        assert_relative_eq!(p.x, 6.0, epsilon = 1e-4);
        assert_relative_eq!(p.y, 0.3, epsilon = 1e-4);
        assert_eq!(f.state().previous_stable, p);
    }

    #[test]
    fn drift_accumulates_against_previous_stable() {
        let mut f = PositionFilter::starting_at(0.0, 3.0, Point::new(0.0, 0.0));
        // smoothing 0 passes raw straight through
        assert_eq!(f.update(Point::new(2.0, 0.0)).x, 0.0);
        assert_eq!(f.update(Point::new(2.9, 0.0)).x, 0.0);
        assert_eq!(f.update(Point::new(3.5, 0.0)).x, 3.5);
    }

    #[test]
    fn reset_returns_to_origin() {
        let mut f = filter();
        f.update(Point::new(300.0, 300.0));
        f.reset();
        assert_eq!(*f.state(), CursorState::default());
    }
}
