//! # air_kiosk
//!
//! A touchless ordering kiosk driven by the `hand_cursor` engine: hover a
//! panel until its dwell bar fills, or pinch to select at once.
//!
//! ## Modules
//!
//! | Module | Does |
//! |---|---|
//! | [`source`] | landmark sources: mouse simulation, LeapMotion behind `leap` |
//! | [`board`] | Home / Menu / Cart screens, hit regions, action handling |
//! | [`visualizer`] | minifb window: panels, hover + dwell bar, cursor glyph |
//! | [`app`] | per-frame loop tying source, session, board and window |
//!
//! ## Feature flags
//!
//! * (default) — **Simulation mode**: the mouse drives a synthetic hand.
//! * `leap` — **Hardware mode**: polls a real LeapMotion controller via LeapC.
//!
//! ### Simulation controls
//!
//! | Input | Gesture |
//! |---|---|
//! | move mouse | move index fingertip |
//! | hold left button | pinch |
//! | hold right button | hand leaves the camera |
//! | `Q` / `Escape` | quit |

pub mod app;
pub mod board;
pub mod error;
pub mod source;
pub mod visualizer;

pub use error::KioskError;
