//! Interactive targets and hit-testing.
//!
//! The engine never looks at UI structure.  The presentation layer implements
//! [`TargetResolver`]; [`RegionMap`] is a ready-made implementation backed by
//! a stack of rectangles.

use std::fmt;

use crate::geometry::{Point, Rect};

/// Opaque identity of something that can be activated, e.g. `"add-item:7"`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TargetId(String);

impl TargetId {
    pub fn new(key: impl Into<String>) -> Self {
        TargetId(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TargetId {
    fn from(s: &str) -> Self {
        TargetId(s.to_string())
    }
}

impl From<String> for TargetId {
    fn from(s: String) -> Self {
        TargetId(s)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// TargetResolver
// ════════════════════════════════════════════════════════════════════════════

pub trait TargetResolver {
    /// The interactive target under `point`, if any.
    fn resolve_target_at(&self, point: Point) -> Option<TargetId>;
}

impl<F> TargetResolver for F
where
    F: Fn(Point) -> Option<TargetId>,
{
    fn resolve_target_at(&self, point: Point) -> Option<TargetId> {
        self(point)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// RegionMap
// ════════════════════════════════════════════════════════════════════════════

/// One rectangle on screen.  `target == None` marks decoration (headers,
/// labels, backdrops) that still occludes what lies beneath it.
#[derive(Clone, Debug, PartialEq)]
pub struct Region {
    pub bounds: Rect,
    pub target: Option<TargetId>,
}

/// Regions in paint order: later regions sit on top of earlier ones.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RegionMap {
    regions: Vec<Region>,
}

impl RegionMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_interactive(&mut self, bounds: Rect, target: impl Into<TargetId>) -> &mut Self {
        self.regions.push(Region { bounds, target: Some(target.into()) });
        self
    }

    pub fn push_decoration(&mut self, bounds: Rect) -> &mut Self {
        self.regions.push(Region { bounds, target: None });
        self
    }

    /// Topmost region containing `point`, interactive or not.
    pub fn topmost_at(&self, point: Point) -> Option<&Region> {
        self.regions.iter().rev().find(|r| r.bounds.contains(point))
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn clear(&mut self) {
        self.regions.clear();
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

impl TargetResolver for RegionMap {
    /// Only the topmost region counts; a decoration on top hides any
    /// interactive region underneath.
    fn resolve_target_at(&self, point: Point) -> Option<TargetId> {
        self.topmost_at(point).and_then(|r| r.target.clone())
    }
}
