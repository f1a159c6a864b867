//! Software-rendered kiosk front end using `minifb`.
//!
//! Layout:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  TITLE BAR                                                   │
//! │                                                              │
//! │   [panel]   [panel]   [panel]      ← hover: bright border,   │
//! │                                      dwell bar along bottom  │
//! │   [panel]   [panel]   [panel]                                │
//! │                                            ( cursor )        │
//! │   [footer]                      [footer]                     │
//! │  status bar                                                  │
//! └──────────────────────────────────────────────────────────────┘
//! ```

use std::time::Duration;

use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};

use hand_cursor::{CursorUpdate, TargetId};

use crate::board::Panel;
use crate::error::KioskError;
use crate::source::PointerSnapshot;

// ════════════════════════════════════════════════════════════════════════════
// Palette
// ════════════════════════════════════════════════════════════════════════════

const BG_COLOR:       u32 = 0xFF1A1A2E;
const PANEL_COLOR:    u32 = 0xFF0F3460;
const DECOR_COLOR:    u32 = 0xFF16213E;
const HOVER_COLOR:    u32 = 0xFF4ECDC4;
const FLASH_COLOR:    u32 = 0xFFFFD700;  // gold
const PROGRESS_COLOR: u32 = 0xFF4ECDC4;
const TEXT_COLOR:     u32 = 0xFFEEEEEE;
const DIM_TEXT:       u32 = 0xFF888888;

const CURSOR_IDLE:    u32 = 0xFFFF6B6B;
const CURSOR_PINCH:   u32 = 0xFF4ECDC4;
const CURSOR_CENTRE:  u32 = 0xFFFFFFFF;

const STATUS_H:       usize = 28;
const PROGRESS_H:     usize = 6;

// ════════════════════════════════════════════════════════════════════════════
// Cursor glyph
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LayerStyle {
    /// Radial fade from `alpha` at the centre to nothing at the rim.
    Glow { alpha: f32 },
    Fill,
    Ring { thickness: usize },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CursorLayer {
    pub radius: usize,
    pub color:  u32,
    pub style:  LayerStyle,
}

/// Layers of the cursor glyph, drawn in order.
///
/// Glow 40, inner disc 12, white centre 5; a ring of 25 is added while the
/// hand pinches.
pub fn cursor_layers(pinching: bool) -> Vec<CursorLayer> {
    let (color, glow) = if pinching { (CURSOR_PINCH, 0.4) } else { (CURSOR_IDLE, 0.3) };
    let mut layers = vec![
        CursorLayer { radius: 40, color, style: LayerStyle::Glow { alpha: glow } },
        CursorLayer { radius: 12, color, style: LayerStyle::Fill },
        CursorLayer { radius: 5,  color: CURSOR_CENTRE, style: LayerStyle::Fill },
    ];
    if pinching {
        layers.push(CursorLayer { radius: 25, color, style: LayerStyle::Ring { thickness: 3 } });
    }
    layers
}

// ════════════════════════════════════════════════════════════════════════════
// Frame snapshot
// ════════════════════════════════════════════════════════════════════════════

/// Everything drawn in one frame, borrowed from the application state.
pub struct FrameView<'a> {
    pub panels:  &'a [Panel],
    pub cursor:  Option<&'a CursorUpdate>,
    /// Target activated within the last few frames.
    pub flash:   Option<&'a TargetId>,
    pub status:  &'a str,
    pub legend:  &'a str,
}

// ════════════════════════════════════════════════════════════════════════════
// Visualizer
// ════════════════════════════════════════════════════════════════════════════

pub struct Visualizer {
    window: Window,
    buf:    Vec<u32>,
    width:  usize,
    height: usize,
}

impl Visualizer {
    pub fn new(width: usize, height: usize) -> Result<Self, KioskError> {
        let mut window = Window::new(
            "Air Kiosk — touchless ordering",
            width, height,
            WindowOptions {
                resize: false,
                ..WindowOptions::default()
            },
        ).map_err(|e| KioskError::Window(e.to_string()))?;

        window.limit_update_rate(Some(Duration::from_millis(16))); // ~60fps

        Ok(Visualizer {
            window,
            buf: vec![BG_COLOR; width * height],
            width,
            height,
        })
    }

    /// Returns false when the window should close.
    pub fn is_open(&self) -> bool { self.window.is_open() }

    /// Sample the mouse for the simulated hand.  `None` once Q or Escape is
    /// pressed.
    pub fn poll_input(&mut self) -> Option<PointerSnapshot> {
        if !self.window.is_open() { return None; }

        let one_shot = |k: Key| self.window.is_key_pressed(k, KeyRepeat::No);
        if one_shot(Key::Q) || one_shot(Key::Escape) {
            return None;
        }

        Some(PointerSnapshot {
            position:  self.window.get_mouse_pos(MouseMode::Discard),
            primary:   self.window.get_mouse_down(MouseButton::Left),
            secondary: self.window.get_mouse_down(MouseButton::Right),
        })
    }

    /// Render one frame.
    pub fn render(&mut self, view: &FrameView<'_>) {
        // Clear
        self.buf.fill(BG_COLOR);

        // ── Panels ────────────────────────────────────────────────────────
        let hovered = view.cursor.and_then(|c| c.hovered.as_ref());
        for panel in view.panels {
            self.draw_panel(panel, hovered, view.flash, view.cursor.map_or(0.0, |c| c.progress));
        }

        // ── Status bar ────────────────────────────────────────────────────
        let sy = self.height.saturating_sub(STATUS_H);
        self.fill_rect(0, sy, self.width, STATUS_H, DECOR_COLOR);
        self.draw_label(view.status, 10, sy + 6, TEXT_COLOR, 1);
        self.draw_label(view.legend, 10, sy + 16, DIM_TEXT, 1);

        // ── Cursor on top ─────────────────────────────────────────────────
        if let Some(c) = view.cursor {
            self.draw_cursor(c.position.x, c.position.y, c.pinching);
        }

        self.window.update_with_buffer(&self.buf, self.width, self.height).ok();
    }

    // ── Panels ────────────────────────────────────────────────────────────

    fn draw_panel(
        &mut self,
        panel:    &Panel,
        hovered:  Option<&TargetId>,
        flash:    Option<&TargetId>,
        progress: f32,
    ) {
        let (x, y) = (panel.bounds.x.max(0.0) as usize, panel.bounds.y.max(0.0) as usize);
        let (w, h) = (panel.bounds.w.max(0.0) as usize, panel.bounds.h.max(0.0) as usize);
        if w == 0 || h == 0 { return; }

        let key = panel.action.map(|a| a.to_string());
        let is = |t: Option<&TargetId>| matches!((t, &key), (Some(t), Some(k)) if t.as_str() == k.as_str());

        let fill = match (panel.action, is(flash)) {
            (None, _)       => DECOR_COLOR,
            (Some(_), true) => blend(PANEL_COLOR, FLASH_COLOR, 0.5),
            (Some(_), false) if is(hovered) => blend(PANEL_COLOR, 0xFFFFFFFF, 0.12),
            (Some(_), false) => PANEL_COLOR,
        };
        self.fill_rect(x, y, w, h, fill);

        if is(hovered) {
            self.draw_border(x, y, w, h, HOVER_COLOR);
            self.draw_border(x + 1, y + 1, w.saturating_sub(2), h.saturating_sub(2), HOVER_COLOR);
            let filled = (w as f32 * progress.clamp(0.0, 1.0)) as usize;
            self.fill_rect(x, (y + h).saturating_sub(PROGRESS_H), filled, PROGRESS_H, PROGRESS_COLOR);
        } else if panel.action.is_some() {
            self.draw_border(x, y, w, h, 0xFF000000);
        }

        // Label centred, twice the glyph size when it fits
        let scale = if label_width(&panel.label, 2) + 8 <= w { 2 } else { 1 };
        let lx = x + w.saturating_sub(label_width(&panel.label, scale)) / 2;
        let ly = y + h.saturating_sub(5 * scale) / 2;
        self.draw_label(&panel.label, lx, ly, TEXT_COLOR, scale);
    }

    // ── Cursor ────────────────────────────────────────────────────────────

    fn draw_cursor(&mut self, cx: f32, cy: f32, pinching: bool) {
        for layer in cursor_layers(pinching) {
            let r = layer.radius as f32;
            let x0 = (cx - r).floor().max(0.0) as usize;
            let y0 = (cy - r).floor().max(0.0) as usize;
            let x1 = ((cx + r).ceil().max(0.0) as usize).min(self.width);
            let y1 = ((cy + r).ceil().max(0.0) as usize).min(self.height);

            for py in y0..y1 {
                for px in x0..x1 {
                    let d = ((px as f32 - cx).powi(2) + (py as f32 - cy).powi(2)).sqrt();
                    if d > r { continue; }
                    let idx = py * self.width + px;
                    match layer.style {
                        LayerStyle::Glow { alpha } => {
                            self.buf[idx] = blend(self.buf[idx], layer.color, alpha * (1.0 - d / r));
                        }
                        LayerStyle::Fill => self.buf[idx] = layer.color,
                        LayerStyle::Ring { thickness } => {
                            if d >= r - thickness as f32 {
                                self.buf[idx] = layer.color;
                            }
                        }
                    }
                }
            }
        }
    }

    // ── Primitive drawing helpers ─────────────────────────────────────────

    fn fill_rect(&mut self, x: usize, y: usize, w: usize, h: usize, color: u32) {
        for row in y..(y+h).min(self.height) {
            for col in x..(x+w).min(self.width) {
                self.buf[row * self.width + col] = color;
            }
        }
    }

    fn draw_border(&mut self, x: usize, y: usize, w: usize, h: usize, color: u32) {
        if w == 0 || h == 0 { return; }
        for col in x..(x+w).min(self.width) {
            self.set_pixel(col, y, color);
            self.set_pixel(col, y+h-1, color);
        }
        for row in y..(y+h).min(self.height) {
            self.set_pixel(x, row, color);
            self.set_pixel(x+w-1, row, color);
        }
    }

    fn set_pixel(&mut self, x: usize, y: usize, color: u32) {
        if x < self.width && y < self.height {
            self.buf[y * self.width + x] = color;
        }
    }

    /// 3×5 bitmap font, each glyph cell drawn `scale`×`scale` pixels.
    fn draw_label(&mut self, text: &str, x: usize, y: usize, color: u32, scale: usize) {
        let mut cx = x;
        for ch in text.chars() {
            let glyph = char_glyph(ch);
            for (row, &bits) in glyph.iter().enumerate() {
                for col in 0..3usize {
                    if bits & (1 << (2 - col)) != 0 {
                        self.fill_rect(cx + col * scale, y + row * scale, scale, scale, color);
                    }
                }
            }
            cx += 4 * scale; // 3 wide + 1 gap
            if cx + 4 * scale > self.width { break; }
        }
    }
}

fn label_width(text: &str, scale: usize) -> usize {
    (text.chars().count() * 4).saturating_sub(1) * scale
}

// ────────────────────────────────────────────────────────────────────────────
// Minimal 3×5 bitmap font
// ────────────────────────────────────────────────────────────────────────────

fn char_glyph(c: char) -> [u8; 5] {
    match c {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b001, 0b001, 0b001],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        'a' | 'A' => [0b111, 0b101, 0b111, 0b101, 0b101],
        'b' | 'B' => [0b110, 0b101, 0b110, 0b101, 0b110],
        'c' | 'C' => [0b111, 0b100, 0b100, 0b100, 0b111],
        'd' | 'D' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'e' | 'E' => [0b111, 0b100, 0b111, 0b100, 0b111],
        'f' | 'F' => [0b111, 0b100, 0b111, 0b100, 0b100],
        'g' | 'G' => [0b111, 0b100, 0b101, 0b101, 0b111],
        'h' | 'H' => [0b101, 0b101, 0b111, 0b101, 0b101],
        'i' | 'I' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'j' | 'J' => [0b001, 0b001, 0b001, 0b101, 0b111],
        'k' | 'K' => [0b101, 0b101, 0b110, 0b101, 0b101],
        'l' | 'L' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'm' | 'M' => [0b101, 0b111, 0b101, 0b101, 0b101],
        'n' | 'N' => [0b111, 0b101, 0b101, 0b101, 0b101],
        'o' | 'O' => [0b111, 0b101, 0b101, 0b101, 0b111],
        'p' | 'P' => [0b111, 0b101, 0b111, 0b100, 0b100],
        'q' | 'Q' => [0b111, 0b101, 0b101, 0b111, 0b001],
        'r' | 'R' => [0b110, 0b101, 0b110, 0b101, 0b101],
        's' | 'S' => [0b111, 0b100, 0b111, 0b001, 0b111],
        't' | 'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'u' | 'U' => [0b101, 0b101, 0b101, 0b101, 0b111],
        'v' | 'V' => [0b101, 0b101, 0b101, 0b010, 0b010],
        'w' | 'W' => [0b101, 0b101, 0b101, 0b111, 0b101],
        'x' | 'X' => [0b101, 0b101, 0b010, 0b101, 0b101],
        'y' | 'Y' => [0b101, 0b101, 0b111, 0b010, 0b010],
        'z' | 'Z' => [0b111, 0b001, 0b010, 0b100, 0b111],
        '/' => [0b001, 0b001, 0b010, 0b100, 0b100],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        '.' => [0b000, 0b000, 0b000, 0b000, 0b010],
        ',' => [0b000, 0b000, 0b000, 0b010, 0b100],
        ':' => [0b000, 0b010, 0b000, 0b010, 0b000],
        '=' => [0b000, 0b111, 0b000, 0b111, 0b000],
        '+' => [0b000, 0b010, 0b111, 0b010, 0b000],
        '(' => [0b010, 0b100, 0b100, 0b100, 0b010],
        ')' => [0b010, 0b001, 0b001, 0b001, 0b010],
        '>' => [0b100, 0b010, 0b001, 0b010, 0b100],
        ' ' => [0b000, 0b000, 0b000, 0b000, 0b000],
        _   => [0b000, 0b000, 0b010, 0b000, 0b000], // fallback dot
    }
}

/// Alpha-blend two ARGB colors. `t` = 0.0 → all `a`, `t` = 1.0 → all `b`.
fn blend(a: u32, b: u32, t: f32) -> u32 {
    let t = t.clamp(0.0, 1.0);
    let lerp = |ca: u32, cb: u32| (ca as f32 * (1.0-t) + cb as f32 * t) as u32;
    let ar = (a >> 16) & 0xFF; let br = (b >> 16) & 0xFF;
    let ag = (a >>  8) & 0xFF; let bg = (b >>  8) & 0xFF;
    let ab =  a        & 0xFF; let bb =  b        & 0xFF;
    0xFF000000 | (lerp(ar,br) << 16) | (lerp(ag,bg) << 8) | lerp(ab,bb)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_cursor_has_three_layers_no_ring() {
        let layers = cursor_layers(false);
        let radii: Vec<usize> = layers.iter().map(|l| l.radius).collect();
        assert_eq!(radii, vec![40, 12, 5]);
        assert!(!layers.iter().any(|l| matches!(l.style, LayerStyle::Ring { .. })));
        assert_eq!(layers[1].color, CURSOR_IDLE);
    }

    #[test]
    fn pinching_cursor_adds_ring_and_changes_colour() {
        let layers = cursor_layers(true);
        let ring = layers.iter().find(|l| matches!(l.style, LayerStyle::Ring { .. })).unwrap();
        assert_eq!(ring.radius, 25);
        assert_eq!(layers[1].color, CURSOR_PINCH);
        assert_eq!(layers[2].color, CURSOR_CENTRE);
    }

    #[test]
    fn blend_endpoints() {
        assert_eq!(blend(0xFF000000, 0xFFFFFFFF, 0.0), 0xFF000000);
        assert_eq!(blend(0xFF000000, 0xFFFFFFFF, 1.0), 0xFFFFFFFF);
        assert_eq!(blend(0xFF000000, 0xFFFFFFFF, 7.0), 0xFFFFFFFF);
    }

    #[test]
    fn label_width_counts_gaps() {
        assert_eq!(label_width("", 1), 0);
        assert_eq!(label_width("AB", 1), 7);
        assert_eq!(label_width("AB", 2), 14);
    }
}
