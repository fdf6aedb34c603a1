//! Deterministic draw engine
//!
//! All draw logic lives here. This module must be pure and deterministic:
//! - Fixed per-tick stepping only
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod engine;
pub mod physics;
pub mod resolver;
pub mod state;

pub use engine::{DrawEngine, DrawEvent, DrawPhase};
pub use physics::Spin;
pub use resolver::resolve;
pub use state::DrawState;
