//! Software-rendered status window using `minifb`.
//!
//! Layout:
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │  MAESTRO                                     │
//! │  Now Playing: <track>                        │
//! │  Volume  [██████████░░░░░░░░░░]  50%         │
//! │  ┌ status ─────────────────────────────────┐ │
//! │  │ Playing: track03.mp3                    │ │
//! │  └─────────────────────────────────────────┘ │
//! │  Fingers: 3                                  │
//! │  key legend                                  │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! The window doubles as the simulation input surface: number keys and the
//! control keys are translated into [`SimInput`] events for the hand
//! source. The core never reads UI state back beyond "window still open".

use std::sync::mpsc::Sender;

use minifb::{Key, KeyRepeat, Window, WindowOptions};

use maestro_playback::PlaybackState;

use crate::hand_source::{SimInput, SimKey};

// ════════════════════════════════════════════════════════════════════════════
// Layout constants
// ════════════════════════════════════════════════════════════════════════════

pub const WIN_W: usize = 640;
pub const WIN_H: usize = 360;

const MARGIN: usize = 20;
const TITLE_Y: usize = 18;
const TRACK_Y: usize = 70;
const VOLUME_LABEL_Y: usize = 120;
const VOLUME_BAR_Y: usize = 140;
const VOLUME_BAR_H: usize = 16;
const STATUS_Y: usize = 200;
const STATUS_H: usize = 40;
const FINGERS_Y: usize = 270;
const LEGEND_Y: usize = WIN_H - 24;

const BG_COLOR: u32 = 0xFF1A1A2E;
const PANEL_COLOR: u32 = 0xFF0F3460;
const BAR_EMPTY: u32 = 0xFF2E2E4E;
const BAR_FILL: u32 = 0xFFFF9966;
const TITLE_COLOR: u32 = 0xFFFF66CC;
const TRACK_COLOR: u32 = 0xFFFFCC00;
const TEXT_COLOR: u32 = 0xFFEEEEEE;
const DIM_COLOR: u32 = 0xFF888888;

// ════════════════════════════════════════════════════════════════════════════
// Visualizer
// ════════════════════════════════════════════════════════════════════════════

pub struct Visualizer {
    window: Window,
    buf: Vec<u32>,
    sim_tx: Sender<SimInput>,
}

impl Visualizer {
    pub fn new(sim_tx: Sender<SimInput>) -> Result<Self, String> {
        let mut window = Window::new(
            "Maestro — Hand Gesture Music Controller",
            WIN_W,
            WIN_H,
            WindowOptions {
                resize: false,
                ..WindowOptions::default()
            },
        )
        .map_err(|e| e.to_string())?;

        window.limit_update_rate(Some(std::time::Duration::from_millis(16))); // ~60fps

        Ok(Visualizer {
            window,
            buf: vec![BG_COLOR; WIN_W * WIN_H],
            sim_tx,
        })
    }

    /// The "keep running" flag, checked once per loop iteration.
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    /// Poll keyboard input and translate it to [`SimInput`] events.
    /// Returns false when the loop should end.
    pub fn poll_input(&mut self) -> bool {
        if !self.window.is_open() {
            return false;
        }

        // One-shot control keys
        let one_shot = |w: &Window, k: Key| w.is_key_pressed(k, KeyRepeat::No);
        if one_shot(&self.window, Key::Q) {
            let _ = self.sim_tx.send(SimInput::KeyDown(SimKey::Quit));
            return false;
        }
        if one_shot(&self.window, Key::P) {
            let _ = self.sim_tx.send(SimInput::KeyDown(SimKey::Pause));
        }
        if one_shot(&self.window, Key::R) {
            let _ = self.sim_tx.send(SimInput::KeyDown(SimKey::Resume));
        }
        if one_shot(&self.window, Key::X) {
            let _ = self.sim_tx.send(SimInput::KeyDown(SimKey::Stop));
        }

        // Number keys repeat while held, like a hand held up to the camera.
        const FINGER_KEYS: [(Key, u8); 5] = [
            (Key::Key0, 0),
            (Key::Key1, 1),
            (Key::Key2, 2),
            (Key::Key3, 3),
            (Key::Key4, 4),
        ];
        for (key, count) in FINGER_KEYS {
            if self.window.is_key_pressed(key, KeyRepeat::Yes) {
                let _ = self.sim_tx.send(SimInput::KeyDown(SimKey::Fingers(count)));
            }
        }

        true
    }

    /// Render one frame of state. `fingers` is the last classified count,
    /// or `None` before any hand was seen.
    pub fn render(&mut self, state: &PlaybackState, fingers: Option<u8>) {
        self.buf.fill(BG_COLOR);

        self.draw_text("MAESTRO", MARGIN, TITLE_Y, 3, TITLE_COLOR);
        self.draw_text(
            "HAND GESTURE MUSIC CONTROLLER",
            MARGIN + 150,
            TITLE_Y + 8,
            1,
            DIM_COLOR,
        );

        // ── Now playing ───────────────────────────────────────────────────
        self.draw_text("NOW PLAYING:", MARGIN, TRACK_Y, 1, DIM_COLOR);
        self.draw_text(&state.current_track, MARGIN, TRACK_Y + 12, 2, TRACK_COLOR);

        // ── Volume bar ────────────────────────────────────────────────────
        let bar_w = WIN_W - 2 * MARGIN - 60;
        self.draw_text("VOLUME", MARGIN, VOLUME_LABEL_Y, 1, DIM_COLOR);
        self.fill_rect(MARGIN, VOLUME_BAR_Y, bar_w, VOLUME_BAR_H, BAR_EMPTY);
        let fill = (bar_w as f32 * state.volume()) as usize;
        self.fill_rect(MARGIN, VOLUME_BAR_Y, fill, VOLUME_BAR_H, BAR_FILL);
        self.draw_border(MARGIN, VOLUME_BAR_Y, bar_w, VOLUME_BAR_H, DIM_COLOR);
        let percent = format!("{}%", state.volume_percent());
        self.draw_text(&percent, MARGIN + bar_w + 10, VOLUME_BAR_Y + 2, 2, TEXT_COLOR);

        // ── Status box ────────────────────────────────────────────────────
        self.fill_rect(MARGIN, STATUS_Y, WIN_W - 2 * MARGIN, STATUS_H, PANEL_COLOR);
        self.draw_text("STATUS", MARGIN + 6, STATUS_Y + 4, 1, DIM_COLOR);
        self.draw_text(&state.status, MARGIN + 6, STATUS_Y + 16, 2, TEXT_COLOR);

        // ── Finger count ──────────────────────────────────────────────────
        match fingers {
            Some(k) => {
                let line = format!("FINGERS: {k}");
                self.draw_text(&line, MARGIN, FINGERS_Y, 2, TRACK_COLOR);
            }
            None => self.draw_text("NO HAND", MARGIN, FINGERS_Y, 2, DIM_COLOR),
        }

        // ── Key legend ────────────────────────────────────────────────────
        self.draw_text(
            "0-4=FINGERS  P=PAUSE  R=RESUME  X=STOP  Q=QUIT",
            MARGIN,
            LEGEND_Y,
            1,
            DIM_COLOR,
        );

        self.window.update_with_buffer(&self.buf, WIN_W, WIN_H).ok();
    }

    // ── Primitive drawing helpers ─────────────────────────────────────────

    fn fill_rect(&mut self, x: usize, y: usize, w: usize, h: usize, color: u32) {
        for row in y..(y + h).min(WIN_H) {
            for col in x..(x + w).min(WIN_W) {
                self.buf[row * WIN_W + col] = color;
            }
        }
    }

    fn draw_border(&mut self, x: usize, y: usize, w: usize, h: usize, color: u32) {
        for col in x..(x + w).min(WIN_W) {
            if y < WIN_H {
                self.buf[y * WIN_W + col] = color;
            }
            if y + h - 1 < WIN_H {
                self.buf[(y + h - 1) * WIN_W + col] = color;
            }
        }
        for row in y..(y + h).min(WIN_H) {
            if x < WIN_W {
                self.buf[row * WIN_W + x] = color;
            }
            if x + w - 1 < WIN_W {
                self.buf[row * WIN_W + x + w - 1] = color;
            }
        }
    }

    fn set_pixel(&mut self, x: usize, y: usize, color: u32) {
        if x < WIN_W && y < WIN_H {
            self.buf[y * WIN_W + x] = color;
        }
    }

    /// Draw `text` with the 3×5 bitmap font, each glyph pixel scaled to a
    /// `scale`×`scale` block.
    fn draw_text(&mut self, text: &str, x: usize, y: usize, scale: usize, color: u32) {
        let mut cx = x;
        let advance = 4 * scale; // 3 wide + 1 gap
        for ch in text.chars() {
            let rows = glyph(ch);
            for (row, &bits) in rows.iter().enumerate() {
                for col in 0..3usize {
                    if bits & (1 << (2 - col)) == 0 {
                        continue;
                    }
                    for dy in 0..scale {
                        for dx in 0..scale {
                            self.set_pixel(cx + col * scale + dx, y + row * scale + dy, color);
                        }
                    }
                }
            }
            cx += advance;
            if cx + advance > WIN_W {
                break;
            }
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Minimal 3×5 bitmap font
// ────────────────────────────────────────────────────────────────────────────

fn glyph(c: char) -> [u8; 5] {
    match c.to_ascii_uppercase() {
        'A' => [0b111, 0b101, 0b111, 0b101, 0b101],
        'B' => [0b110, 0b101, 0b110, 0b101, 0b110],
        'C' => [0b111, 0b100, 0b100, 0b100, 0b111],
        'D' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'E' => [0b111, 0b100, 0b111, 0b100, 0b111],
        'F' => [0b111, 0b100, 0b111, 0b100, 0b100],
        'G' => [0b111, 0b100, 0b101, 0b101, 0b111],
        'H' => [0b101, 0b101, 0b111, 0b101, 0b101],
        'I' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'J' => [0b001, 0b001, 0b001, 0b101, 0b111],
        'K' => [0b101, 0b101, 0b110, 0b101, 0b101],
        'L' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'M' => [0b101, 0b111, 0b101, 0b101, 0b101],
        'N' => [0b111, 0b101, 0b101, 0b101, 0b101],
        'O' => [0b111, 0b101, 0b101, 0b101, 0b111],
        'P' => [0b111, 0b101, 0b111, 0b100, 0b100],
        'Q' => [0b111, 0b101, 0b101, 0b111, 0b001],
        'R' => [0b110, 0b101, 0b110, 0b101, 0b101],
        'S' => [0b111, 0b100, 0b111, 0b001, 0b111],
        'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'U' => [0b101, 0b101, 0b101, 0b101, 0b111],
        'V' => [0b101, 0b101, 0b101, 0b010, 0b010],
        'W' => [0b101, 0b101, 0b101, 0b111, 0b101],
        'X' => [0b101, 0b101, 0b010, 0b101, 0b101],
        'Y' => [0b101, 0b101, 0b111, 0b010, 0b010],
        'Z' => [0b111, 0b001, 0b010, 0b100, 0b111],
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
        '%' => [0b101, 0b001, 0b010, 0b100, 0b101],
        ':' => [0b000, 0b010, 0b000, 0b010, 0b000],
        '.' => [0b000, 0b000, 0b000, 0b000, 0b010],
        ',' => [0b000, 0b000, 0b000, 0b010, 0b100],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        '_' => [0b000, 0b000, 0b000, 0b000, 0b111],
        '=' => [0b000, 0b111, 0b000, 0b111, 0b000],
        '/' => [0b001, 0b001, 0b010, 0b100, 0b100],
        '(' => [0b010, 0b100, 0b100, 0b100, 0b010],
        ')' => [0b010, 0b001, 0b001, 0b001, 0b010],
        ' ' => [0b000, 0b000, 0b000, 0b000, 0b000],
        _ => [0b000, 0b000, 0b010, 0b000, 0b000], // fallback dot
    }
}
