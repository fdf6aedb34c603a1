//! Draw Wheel - a spinning-wheel tournament draw
//!
//! Core modules:
//! - `draw`: Deterministic draw engine (spin physics, outcome resolver, state machine)
//! - `persistence`: Resumable draw snapshots behind an injected store
//! - `audio`: Spin feedback sound (Web Audio on wasm, stubs elsewhere)
//! - `theme`: Presentation configuration (palette, tone, document layout)
//! - `fixture`: Printable tournament fixture built from a finished draw

pub mod audio;
pub mod draw;
pub mod fixture;
pub mod persistence;
pub mod theme;

pub use draw::{DrawEngine, DrawEvent, DrawPhase, DrawState};
pub use persistence::{MemoryStore, StateStore};
pub use theme::{Theme, ThemePreset};

use std::f64::consts::TAU;

/// Draw configuration constants
pub mod consts {
    /// Number of participants in the draw
    pub const TEAM_COUNT: usize = 9;
    /// Number of groups the draw order interleaves (A, B, C)
    pub const GROUP_COUNT: usize = 3;
    /// Slots per group
    pub const GROUP_SIZE: usize = 3;

    /// Animation tick rate the engine is stepped at (Hz)
    pub const TICK_HZ: u32 = 60;
    /// Settle delay between the wheel stopping and the commit (ticks, 1000 ms)
    pub const SETTLE_TICKS: u32 = TICK_HZ;

    /// Initial spin speed range (radians per tick)
    pub const SPIN_SPEED_MIN: f64 = 0.35;
    pub const SPIN_SPEED_MAX: f64 = 0.50;
    /// Per-tick speed decay
    pub const SPIN_FRICTION: f64 = 0.985;
    /// Speed at or below which the wheel is considered stopped
    pub const SPIN_STOP_SPEED: f64 = 0.002;

    /// Pointer position in render coordinates (top of the wheel). Segment 0
    /// is drawn starting at this offset, so a rotation of 0 rests the pointer
    /// on segment 0.
    pub const POINTER_ANGLE: f64 = -std::f64::consts::FRAC_PI_2;
    /// Tie-break so a rotation exactly on a segment boundary resolves to the
    /// lower index instead of flickering between neighbors.
    pub const BOUNDARY_EPSILON: f64 = 1e-4;
}

/// Normalize an angle to [0, 2π)
#[inline]
pub fn normalize_angle(angle: f64) -> f64 {
    ((angle % TAU) + TAU) % TAU
}
