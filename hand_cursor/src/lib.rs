//! # hand_cursor
//!
//! Turns per-frame hand landmarks into a stable on-screen cursor and discrete
//! activations for a touchless kiosk.
//!
//! ## Pipeline
//!
//! | Stage | Type | Does |
//! |---|---|---|
//! | Input | [`LandmarkSample`] | `NotReady`, `NoHand`, or one hand pose |
//! | Mapping | [`ScreenMapping`] | normalized camera → screen, mirrored |
//! | Smoothing | [`PositionFilter`] | EMA (α = 0.7) + 3-unit jitter deadband |
//! | Pinch | [`PinchClassifier`] | index↔thumb distance < 0.08, rising edge |
//! | Frame | [`GestureEngine`] | `Skipped` / `Absent` / `Present { pinch }` |
//! | Selection | [`DwellSelector`] | 800 ms dwell or pinch, 300 ms cooldown |
//! | Session | [`InteractionSession`] | all of the above, one `step` per frame |
//!
//! ## Quick start
//!
//! ```rust
//! use std::time::Duration;
//! use hand_cursor::{
//!     Activation, EngineConfig, InteractionSession, LandmarkSample, Rect, RegionMap,
//! };
//!
//! let mut session = InteractionSession::new(&EngineConfig::default());
//! session.device_ready();
//!
//! let mut regions = RegionMap::new();
//! regions.push_interactive(Rect::new(0.0, 0.0, 200.0, 80.0), "go-cart");
//!
//! let mut fired: Vec<Activation> = Vec::new();
//! let report = session.step(&LandmarkSample::NoHand, Duration::ZERO, &regions, &mut fired);
//! assert!(report.cursor.is_none());
//! ```

pub mod config;
pub mod dwell;
pub mod engine;
pub mod error;
pub mod filter;
pub mod geometry;
pub mod landmark;
pub mod pinch;
pub mod session;
pub mod status;
pub mod target;

pub use config::{EngineConfig, ScreenConfig};
pub use dwell::{
    Activation, ActivationKind, ActivationSink, DwellPhase, DwellSelector, HoverFeedback,
    HoverState, InteractionGate,
};
pub use engine::{FrameOutput, FrameResult, GestureEngine};
pub use error::{Error, Result};
pub use filter::{CursorState, PositionFilter};
pub use geometry::{Point, Rect, ScreenMapping};
pub use landmark::{HandPose, LandmarkPoint, LandmarkSample};
pub use pinch::{PinchClassifier, PinchReading, PinchState};
pub use session::{CursorUpdate, InteractionSession, StepReport};
pub use status::{StatusTracker, TrackingStatus};
pub use target::{Region, RegionMap, TargetId, TargetResolver};
