//! Spin physics: geometric speed decay per animation tick
//!
//! The decay is a pure state transition so it can be tested by iterating
//! `step` without a real timer; the engine owns the scheduling.

use rand::Rng;

use crate::consts::{SPIN_FRICTION, SPIN_SPEED_MAX, SPIN_SPEED_MIN, SPIN_STOP_SPEED};

/// Wheel rotation state. `angle` is cumulative radians and deliberately
/// unbounded: it accumulates across spins and is only zeroed by an explicit
/// reset or apply. It is not part of the durable snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Spin {
    pub angle: f64,
    pub speed: f64,
}

impl Spin {
    /// Advance one tick: the angle accumulates the current speed, then the
    /// speed decays geometrically.
    #[must_use]
    pub fn step(self) -> Spin {
        Spin {
            angle: self.angle + self.speed,
            speed: self.speed * SPIN_FRICTION,
        }
    }

    /// The wheel has come to rest once speed crosses the stop threshold.
    pub fn stopped(&self) -> bool {
        self.speed <= SPIN_STOP_SPEED
    }

    /// Kick off a spin at a random initial speed, keeping the accumulated
    /// angle.
    pub fn launch<R: Rng>(&mut self, rng: &mut R) {
        self.speed = rng.random_range(SPIN_SPEED_MIN..SPIN_SPEED_MAX);
    }
}
