//! Dwell selection: hover-to-activate with a shared interaction cooldown.
//!
//! State machine per presence notification, with `T` the target under the
//! cursor:
//!
//! ```text
//!            T changes (incl. to none)
//!   ┌──────────────────────────────────────────────┐
//!   ▼                                              │
//! Idle ──T present──► Hovering ──elapsed ≥ dwell──► Ready ──gate open──► fire, Idle
//!   ▲                    │                          │
//!   └─────absence────────┴──────────────────────────┘   (gate closed: stay Ready)
//! ```
//!
//! A pinch activates the target under the pinch point directly, through the
//! same [`InteractionGate`].  Firing clears the hover, so holding still over
//! a target fires again only after a fresh full dwell.

use std::time::Duration;

use tracing::{debug, trace};

use crate::config::EngineConfig;
use crate::target::TargetId;

// ════════════════════════════════════════════════════════════════════════════
// Activation
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ActivationKind {
    Dwell,
    Pinch,
}

impl ActivationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dwell => "dwell",
            Self::Pinch => "pinch",
        }
    }
}

/// A discrete selection handed to the application.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Activation {
    pub target: TargetId,
    pub kind:   ActivationKind,
    /// Session time at which the gate accepted it.
    pub at:     Duration,
}

/// Receives activations; owns the mapping from target to business action.
pub trait ActivationSink {
    fn activate(&mut self, activation: &Activation);
}

impl ActivationSink for Vec<Activation> {
    fn activate(&mut self, activation: &Activation) {
        self.push(activation.clone());
    }
}

// ════════════════════════════════════════════════════════════════════════════
// InteractionGate
// ════════════════════════════════════════════════════════════════════════════

/// Global cooldown between accepted activations.
#[derive(Clone, Debug)]
pub struct InteractionGate {
    cooldown:         Duration,
    last_interaction: Option<Duration>,
}

impl InteractionGate {
    pub fn new(cooldown: Duration) -> Self {
        InteractionGate { cooldown, last_interaction: None }
    }

    /// Open once strictly more than `cooldown` has passed since the last
    /// accepted activation.  Always open before the first one.
    pub fn is_open(&self, now: Duration) -> bool {
        match self.last_interaction {
            None       => true,
            Some(last) => now.saturating_sub(last) > self.cooldown,
        }
    }

    /// Claim the gate: returns `true` and stamps `now` if it was open.
    pub fn try_pass(&mut self, now: Duration) -> bool {
        if !self.is_open(now) {
            return false;
        }
        self.last_interaction = Some(now);
        true
    }

    pub fn last_interaction(&self) -> Option<Duration> {
        self.last_interaction
    }

    pub fn cooldown(&self) -> Duration {
        self.cooldown
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Hover state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DwellPhase {
    #[default]
    Idle,
    Hovering,
    /// Dwell complete; waiting for the gate or just fired.
    Ready,
}

/// Target and hover start, set and cleared together.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HoverState {
    pub target:  TargetId,
    pub started: Duration,
}

/// What the renderer needs after each presence/absence notification.
#[derive(Clone, Debug, PartialEq)]
pub struct HoverFeedback {
    pub target:   Option<TargetId>,
    /// `0.0..=1.0`, for a progress bar on the hovered target.
    pub progress: f32,
    pub phase:    DwellPhase,
}

impl HoverFeedback {
    fn idle() -> Self {
        HoverFeedback { target: None, progress: 0.0, phase: DwellPhase::Idle }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// DwellSelector
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Debug)]
pub struct DwellSelector {
    dwell:              Duration,
    pinch_resets_dwell: bool,
    hover:              Option<HoverState>,
    phase:              DwellPhase,
    gate:               InteractionGate,
}

impl DwellSelector {
    pub fn new(dwell: Duration, cooldown: Duration) -> Self {
        DwellSelector {
            dwell,
            pinch_resets_dwell: true,
            hover:              None,
            phase:              DwellPhase::Idle,
            gate:               InteractionGate::new(cooldown),
        }
    }

    pub fn from_config(cfg: &EngineConfig) -> Self {
        Self::new(cfg.dwell(), cfg.cooldown()).pinch_resets_dwell(cfg.pinch_resets_dwell)
    }

    pub fn pinch_resets_dwell(mut self, reset: bool) -> Self {
        self.pinch_resets_dwell = reset;
        self
    }

    /// Cursor present with `target` under it.
    pub fn on_presence(
        &mut self,
        target: Option<TargetId>,
        now: Duration,
    ) -> (HoverFeedback, Option<Activation>) {
        let current = self.hover.as_ref().map(|h| &h.target);
        if current != target.as_ref() {
            self.clear_hover();
            match target {
                Some(t) => {
                    trace!(key = %t, "hover start");
                    self.hover = Some(HoverState { target: t, started: now });
                    self.phase = DwellPhase::Hovering;
                }
                None => return (HoverFeedback::idle(), None),
            }
        }

        let Some(hover) = self.hover.as_ref() else {
            return (HoverFeedback::idle(), None);
        };
        let elapsed = now.saturating_sub(hover.started);
        let progress = self.progress_for(elapsed);

        if elapsed < self.dwell {
            self.phase = DwellPhase::Hovering;
            let feedback = HoverFeedback {
                target: Some(hover.target.clone()),
                progress,
                phase: self.phase,
            };
            return (feedback, None);
        }

        self.phase = DwellPhase::Ready;
        if !self.gate.try_pass(now) {
            trace!(key = %hover.target, "dwell complete, cooldown active");
            let feedback = HoverFeedback {
                target: Some(hover.target.clone()),
                progress,
                phase: self.phase,
            };
            return (feedback, None);
        }

        let activation = Activation {
            target: hover.target.clone(),
            kind:   ActivationKind::Dwell,
            at:     now,
        };
        debug!(key = %activation.target, elapsed_ms = elapsed.as_millis() as u64, "dwell activation");
        self.clear_hover();
        (HoverFeedback::idle(), Some(activation))
    }

    /// Hand lost: any pending dwell is cancelled.
    pub fn on_absence(&mut self) -> HoverFeedback {
        self.clear_hover();
        HoverFeedback::idle()
    }

    /// Pinch closed over `target`.  Needs no prior hover.
    pub fn on_pinch(&mut self, target: Option<TargetId>, now: Duration) -> Option<Activation> {
        let target = target?;
        if !self.gate.try_pass(now) {
            trace!(key = %target, "pinch suppressed by cooldown");
            return None;
        }
        debug!(key = %target, "pinch activation");
        if self.pinch_resets_dwell {
            self.clear_hover();
        }
        Some(Activation { target, kind: ActivationKind::Pinch, at: now })
    }

    pub fn clear_hover(&mut self) {
        self.hover = None;
        self.phase = DwellPhase::Idle;
    }

    fn progress_for(&self, elapsed: Duration) -> f32 {
        if self.dwell.is_zero() {
            return 1.0;
        }
        (elapsed.as_secs_f32() / self.dwell.as_secs_f32()).min(1.0)
    }

    pub fn hovered(&self) -> Option<&HoverState> { self.hover.as_ref() }
    pub fn phase(&self) -> DwellPhase            { self.phase }
    pub fn gate(&self) -> &InteractionGate       { &self.gate }
    pub fn dwell(&self) -> Duration              { self.dwell }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
