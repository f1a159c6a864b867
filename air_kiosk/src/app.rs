//! Top-level application state machine.
//!
//! `AppState` owns the `InteractionSession` and the `KioskBoard`.  It turns
//! each `SourceEvent` into one session step, routes activations into the
//! board, and keeps what the visualizer needs for the next frame.

use std::time::{Duration, Instant};

use clap::ValueEnum;
use hand_cursor::{
    CursorUpdate, EngineConfig, FrameOutput, InteractionSession, ScreenMapping, TargetId,
    TrackingStatus,
};
use tracing::{debug, info};

use crate::board::KioskBoard;
use crate::error::KioskError;
use crate::source::{LandmarkSource, MouseLandmarkSource, SourceEvent};
use crate::visualizer::{FrameView, Visualizer};

/// Frames an activated panel stays highlighted.
const FLASH_FRAMES: u32 = 12;

// ════════════════════════════════════════════════════════════════════════════
// AppConfig
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum InputMode {
    /// Mouse drives a simulated hand.
    Mouse,
    /// LeapMotion controller (needs the `leap` feature).
    Leap,
}

/// Configuration for the full application.
#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub engine: EngineConfig,
    pub input:  InputMode,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            engine: EngineConfig::default(),
            input:  InputMode::Mouse,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// AppState
// ════════════════════════════════════════════════════════════════════════════

struct Flash {
    target:      TargetId,
    frames_left: u32,
}

pub struct AppState {
    // ── interaction ──────────────────────────────────────────────────────
    session:  InteractionSession,
    board:    KioskBoard,
    cursor:   Option<CursorUpdate>,

    // ── feedback ─────────────────────────────────────────────────────────
    tracking: Option<TrackingStatus>,
    flash:    Option<Flash>,

    // ── status message ────────────────────────────────────────────────────
    pub status: String,
}

impl AppState {
    pub fn new(cfg: &AppConfig) -> Self {
        let screen = &cfg.engine.screen;
        AppState {
            session:  InteractionSession::new(&cfg.engine),
            board:    KioskBoard::new(screen.width as f32, screen.height as f32),
            cursor:   None,
            tracking: None,
            flash:    None,
            status:   "Starting tracker".to_string(),
        }
    }

    /// Process one event from the landmark source at session time `now`.
    pub fn handle_event(&mut self, event: SourceEvent, now: Duration) {
        match event {
            SourceEvent::Ready => {
                let s = self.session.device_ready();
                self.set_tracking(s);
            }
            SourceEvent::DeviceError(reason) => {
                let s = self.session.fail_device(reason);
                self.cursor = None;
                self.set_tracking(s);
            }
            SourceEvent::Frame(sample) => {
                let regions = self.board.region_map();
                let report = self.session.step(&sample, now, &regions, &mut self.board);

                if let Some(s) = report.status {
                    self.set_tracking(s);
                }
                match report.output {
                    FrameOutput::Skipped => {}
                    FrameOutput::Absent  => self.cursor = None,
                    FrameOutput::Present { .. } => self.cursor = report.cursor,
                }
                for a in report.activations {
                    debug!(key = %a.target, kind = a.kind.as_str(), "activation");
                    self.status = format!("{} by {}", a.target, a.kind.as_str());
                    self.flash = Some(Flash { target: a.target, frames_left: FLASH_FRAMES });
                }
            }
        }
    }

    /// Advance per-frame animations.
    pub fn tick(&mut self) {
        if let Some(f) = &mut self.flash {
            f.frames_left = f.frames_left.saturating_sub(1);
            if f.frames_left == 0 {
                self.flash = None;
            }
        }
    }

    fn set_tracking(&mut self, status: TrackingStatus) {
        self.status = status.message().to_string();
        self.tracking = Some(status);
    }

    pub fn board(&self) -> &KioskBoard               { &self.board }
    pub fn cursor(&self) -> Option<&CursorUpdate>    { self.cursor.as_ref() }
    pub fn tracking(&self) -> Option<&TrackingStatus> { self.tracking.as_ref() }
    pub fn flash(&self) -> Option<&TargetId>          { self.flash.as_ref().map(|f| &f.target) }
}

// ════════════════════════════════════════════════════════════════════════════
// Source selection
// ════════════════════════════════════════════════════════════════════════════

pub fn open_source(cfg: &AppConfig) -> Box<dyn LandmarkSource> {
    match cfg.input {
        InputMode::Mouse => Box::new(MouseLandmarkSource::new(
            ScreenMapping::from_config(&cfg.engine.screen),
        )),
        #[cfg(feature = "leap")]
        InputMode::Leap => Box::new(crate::source::spawn_landmark_feed(
            crate::source::LeapLandmarkSource::default(),
        )),
        #[cfg(not(feature = "leap"))]
        InputMode::Leap => Box::new(crate::source::UnavailableSource::new(
            "Built without LeapMotion support (enable the `leap` feature)",
        )),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Main loop
// ════════════════════════════════════════════════════════════════════════════

const LEGEND: &str = "hover to select   left button = pinch   right button = hide hand   Q = quit";

pub fn run(cfg: AppConfig) -> Result<(), KioskError> {
    let (w, h) = (cfg.engine.screen.width as usize, cfg.engine.screen.height as usize);
    let mut vis    = Visualizer::new(w, h)?;
    let mut source = open_source(&cfg);
    let mut app    = AppState::new(&cfg);
    let clock      = Instant::now();

    info!(input = ?cfg.input, width = w, height = h, "kiosk running");

    while vis.is_open() {
        let Some(pointer) = vis.poll_input() else { break };
        source.observe_pointer(&pointer);

        let event = source.poll();
        app.handle_event(event, clock.elapsed());
        app.tick();

        let panels = app.board.panels();
        vis.render(&FrameView {
            panels: &panels,
            cursor: app.cursor(),
            flash:  app.flash(),
            status: &app.status,
            legend: LEGEND,
        });
    }

    info!(orders = app.board.orders_placed(), "kiosk closed");
    Ok(())
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
