//! Per-frame input context threaded through the viewer loop.
//!
//! Window callbacks feed raw cursor/scroll/key events in here; the camera is
//! passed explicitly on every call instead of living in shared globals.

use std::time::Instant;

use crate::camera::{Camera, CameraMovement};

/// Smallest delta a [`FrameClock`] reports, so movement never stalls on
/// timers with coarse resolution.
pub const MIN_FRAME_DELTA: f32 = 0.0001;

/// Movement keys understood by the viewer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    W,
    A,
    S,
    D,
    Space,
    Shift,
}

impl Key {
    pub const ALL: [Key; 6] = [Key::W, Key::A, Key::S, Key::D, Key::Space, Key::Shift];

    pub fn movement(self) -> CameraMovement {
        match self {
            Key::W => CameraMovement::Forward,
            Key::S => CameraMovement::Backward,
            Key::A => CameraMovement::Left,
            Key::D => CameraMovement::Right,
            Key::Space => CameraMovement::Up,
            Key::Shift => CameraMovement::Down,
        }
    }

    /// Case-insensitive lookup (`"w"`, `"space"`, `"shift"`, ...).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "w" => Some(Key::W),
            "a" => Some(Key::A),
            "s" => Some(Key::S),
            "d" => Some(Key::D),
            "space" => Some(Key::Space),
            "shift" | "lshift" => Some(Key::Shift),
            _ => None,
        }
    }

    #[inline]
    fn slot(self) -> usize {
        self as usize
    }
}

#[derive(Clone, Debug, Default)]
pub struct InputState {
    last_cursor: Option<(f32, f32)>,
    held: [bool; Key::ALL.len()],
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds an absolute cursor position. The first event only primes the
    /// history; screen Y grows downwards, so the pitch offset is inverted.
    pub fn cursor_moved(&mut self, camera: &mut Camera, x: f32, y: f32) {
        let Some((last_x, last_y)) = self.last_cursor.replace((x, y)) else {
            log::debug!("Cursor primed at ({x:.1}, {y:.1})");
            return;
        };
        camera.look(x - last_x, last_y - y, true);
    }

    /// Forgets the cursor history, e.g. after the cursor was re-captured.
    pub fn reset_cursor(&mut self) {
        self.last_cursor = None;
    }

    pub fn scroll(&mut self, camera: &mut Camera, y_offset: f32) {
        camera.zoom_by(y_offset);
    }

    pub fn set_key(&mut self, key: Key, pressed: bool) {
        self.held[key.slot()] = pressed;
    }

    #[inline]
    pub fn is_held(&self, key: Key) -> bool {
        self.held[key.slot()]
    }

    /// Moves the camera once for every held key.
    pub fn apply_movement(&self, camera: &mut Camera, delta_seconds: f32) {
        for key in Key::ALL {
            if self.is_held(key) {
                camera.move_by(key.movement(), delta_seconds);
            }
        }
    }
}

/// Wall-clock frame timer.
#[derive(Clone, Copy, Debug)]
pub struct FrameClock {
    last: Instant,
}

impl FrameClock {
    pub fn start() -> Self {
        Self {
            last: Instant::now(),
        }
    }

    /// Seconds since the previous tick (or since `start`).
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let delta = now.duration_since(self.last).as_secs_f32();
        self.last = now;
        sanitize_delta(delta)
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::start()
    }
}

#[inline]
pub fn sanitize_delta(delta: f32) -> f32 {
    if delta > 0.0 { delta } else { MIN_FRAME_DELTA }
}
