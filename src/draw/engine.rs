//! Draw state machine
//!
//! Orchestrates spin physics, the outcome resolver, and the participant pool,
//! and mirrors every durable mutation into the injected store. Driven by
//! explicit `tick()` calls from a single scheduler; there is no internal
//! timer and no parallelism.

use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_pcg::Pcg32;

use super::physics::Spin;
use super::resolver::resolve;
use super::state::DrawState;
use crate::consts::SETTLE_TICKS;
use crate::persistence::StateStore;

/// Where the engine is in the current draw cycle.
///
/// A completed cycle passes through `Idle -> Spinning -> Settling` and back to
/// `Idle`; the commit itself is instantaneous and reported as
/// [`DrawEvent::Committed`] rather than held as a phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawPhase {
    /// Ready for a spin request
    Idle,
    /// Wheel decelerating; pool must not be touched
    Spinning,
    /// Winner known, waiting out the fixed delay so the viewer sees the
    /// pointer at rest before the segment disappears
    Settling { winner: usize, ticks_left: u32 },
}

/// State transitions worth reporting to the caller (audio, DOM updates).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawEvent {
    /// The wheel came to rest; audio feedback should stop. The winner is
    /// resolved but not yet committed.
    SpinStopped { winner: usize },
    /// The settle delay elapsed and the winner moved from the pool to draw
    /// position `position` (0-based).
    Committed { name: String, position: usize },
}

/// The draw engine: durable state, wheel rotation, and cycle phase, with a
/// persistence store injected so it can be mocked in tests.
pub struct DrawEngine<S: StateStore> {
    state: DrawState,
    spin: Spin,
    phase: DrawPhase,
    rng: Pcg32,
    store: S,
}

impl<S: StateStore> DrawEngine<S> {
    /// Resume from the store's snapshot if one is present and well-formed,
    /// otherwise start from placeholder teams. The wheel angle always starts
    /// at zero; it is not part of the snapshot.
    pub fn new(store: S, seed: u64) -> Self {
        let state = match store.load() {
            Some(saved) => {
                log::info!(
                    "Resuming draw: {} assigned, {} remaining",
                    saved.assigned.len(),
                    saved.remaining.len()
                );
                saved
            }
            None => DrawState::default(),
        };
        Self {
            state,
            spin: Spin::default(),
            phase: DrawPhase::Idle,
            rng: Pcg32::seed_from_u64(seed),
            store,
        }
    }

    pub fn state(&self) -> &DrawState {
        &self.state
    }

    /// Cumulative wheel rotation in radians, for the rendering collaborator.
    pub fn angle(&self) -> f64 {
        self.spin.angle
    }

    pub fn phase(&self) -> DrawPhase {
        self.phase
    }

    /// True from spin start until the commit lands.
    pub fn in_cycle(&self) -> bool {
        self.phase != DrawPhase::Idle
    }

    /// Edit one raw input entry. Independent of any in-progress draw.
    pub fn set_input(&mut self, index: usize, value: &str) {
        if let Some(slot) = self.state.inputs.get_mut(index) {
            *slot = value.to_string();
            self.save();
        }
    }

    /// Randomize the order of the raw inputs (editor convenience; the
    /// confirmed draw is untouched until applied).
    pub fn shuffle_inputs(&mut self) {
        self.state.inputs.shuffle(&mut self.rng);
        self.save();
    }

    /// Confirm the inputs as the new team list and restart the draw, zeroing
    /// the wheel. Rejected mid-cycle: the pool is frozen while a spin or
    /// settle is in flight.
    pub fn apply(&mut self) {
        if self.in_cycle() {
            log::debug!("apply ignored mid-cycle");
            return;
        }
        self.state.apply();
        self.spin = Spin::default();
        self.save();
    }

    /// Restart the draw against the current teams, zeroing the wheel.
    /// Rejected mid-cycle like `apply`.
    pub fn reset(&mut self) {
        if self.in_cycle() {
            log::debug!("reset ignored mid-cycle");
            return;
        }
        self.state.reset();
        self.spin = Spin::default();
        self.save();
    }

    /// Erase the durable snapshot only. In-memory state is untouched; a
    /// reload afterwards starts from defaults.
    pub fn clear_saved(&self) {
        self.store.clear();
    }

    /// Ask for a spin. Returns whether one actually started, so the caller
    /// knows to kick off audio. A request while a cycle is in flight or with
    /// an empty pool is a guard rejection, not an error: nothing changes.
    pub fn request_spin(&mut self) -> bool {
        if self.in_cycle() || self.state.remaining.is_empty() {
            log::debug!("spin request rejected (phase {:?})", self.phase);
            return false;
        }
        self.spin.launch(&mut self.rng);
        self.phase = DrawPhase::Spinning;
        true
    }

    /// Advance one animation tick. At most one event is produced per tick.
    pub fn tick(&mut self) -> Option<DrawEvent> {
        match self.phase {
            DrawPhase::Idle => None,
            DrawPhase::Spinning => {
                self.spin = self.spin.step();
                if !self.spin.stopped() {
                    return None;
                }
                // Segment count is the pool as of spin start; the pool is
                // frozen for the whole cycle so reading it now is equivalent.
                let winner = resolve(self.spin.angle, self.state.remaining.len());
                self.phase = DrawPhase::Settling {
                    winner,
                    ticks_left: SETTLE_TICKS,
                };
                Some(DrawEvent::SpinStopped { winner })
            }
            DrawPhase::Settling { winner, ticks_left } => {
                if ticks_left > 1 {
                    self.phase = DrawPhase::Settling {
                        winner,
                        ticks_left: ticks_left - 1,
                    };
                    return None;
                }
                let name = self.state.commit(winner);
                let position = self.state.assigned.len() - 1;
                self.phase = DrawPhase::Idle;
                log::info!("Drawn: {name} -> position {position}");
                self.save();
                Some(DrawEvent::Committed { name, position })
            }
        }
    }

    fn save(&self) {
        self.store.save(&self.state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{SETTLE_TICKS, TEAM_COUNT};
    use crate::persistence::MemoryStore;
    use std::collections::HashSet;

    fn engine(seed: u64) -> DrawEngine<MemoryStore> {
        DrawEngine::new(MemoryStore::default(), seed)
    }

    /// Run one full spin cycle to the commit, returning the committed event.
    fn run_spin(engine: &mut DrawEngine<MemoryStore>) -> DrawEvent {
        assert!(engine.request_spin());
        for _ in 0..10_000 {
            if let Some(event @ DrawEvent::Committed { .. }) = engine.tick() {
                return event;
            }
        }
        panic!("spin did not commit within 10k ticks");
    }

    #[test]
    fn spin_moves_exactly_one_participant() {
        let mut engine = engine(1);
        let before = engine.state().remaining.len();
        let event = run_spin(&mut engine);
        assert_eq!(engine.state().remaining.len(), before - 1);
        assert_eq!(engine.state().assigned.len(), 1);
        let DrawEvent::Committed { name, position } = event else {
            panic!("expected commit");
        };
        assert_eq!(position, 0);
        assert!(!engine.state().remaining.contains(&name));
    }

    #[test]
    fn spin_rejected_when_pool_empty() {
        let mut engine = engine(2);
        for _ in 0..TEAM_COUNT {
            run_spin(&mut engine);
        }
        assert!(engine.state().remaining.is_empty());
        let angle = engine.angle();
        assert!(!engine.request_spin());
        assert_eq!(engine.phase(), DrawPhase::Idle);
        assert_eq!(engine.angle(), angle);
    }

    #[test]
    fn reentrant_spin_request_is_a_noop() {
        let mut engine = engine(3);
        assert!(engine.request_spin());
        engine.tick();
        let mid_angle = engine.angle();
        assert!(!engine.request_spin());
        assert_eq!(engine.angle(), mid_angle);
        // The first spin still commits exactly one participant.
        loop {
            if let Some(DrawEvent::Committed { .. }) = engine.tick() {
                break;
            }
        }
        assert_eq!(engine.state().assigned.len(), 1);
    }

    #[test]
    fn settle_delay_holds_the_pool_until_commit() {
        let mut engine = engine(4);
        assert!(engine.request_spin());
        let stopped = loop {
            if let Some(DrawEvent::SpinStopped { winner }) = engine.tick() {
                break winner;
            }
        };
        let expected = engine.state().remaining[stopped].clone();
        // Pool untouched for every settle tick but the last.
        for _ in 0..SETTLE_TICKS - 1 {
            assert_eq!(engine.tick(), None);
            assert_eq!(engine.state().remaining.len(), TEAM_COUNT);
        }
        assert_eq!(
            engine.tick(),
            Some(DrawEvent::Committed {
                name: expected,
                position: 0
            })
        );
    }

    #[test]
    fn length_invariant_holds_around_every_spin() {
        let mut engine = engine(5);
        for _ in 0..TEAM_COUNT {
            let s = engine.state();
            assert_eq!(s.assigned.len() + s.remaining.len(), s.teams.len());
            run_spin(&mut engine);
            let s = engine.state();
            assert_eq!(s.assigned.len() + s.remaining.len(), s.teams.len());
        }
    }

    #[test]
    fn nine_spins_drain_the_pool_into_three_groups() {
        let mut engine = engine(6);
        for _ in 0..TEAM_COUNT {
            run_spin(&mut engine);
        }
        let state = engine.state();
        assert!(state.remaining.is_empty());
        assert_eq!(state.assigned.len(), TEAM_COUNT);
        let unique: HashSet<_> = state.assigned.iter().collect();
        assert_eq!(unique.len(), TEAM_COUNT);
        for g in 0..3 {
            assert!(state.group(g).iter().all(Option::is_some));
        }
        assert!(state.is_full());
    }

    #[test]
    fn apply_and_reset_rejected_mid_cycle() {
        let mut engine = engine(7);
        assert!(engine.request_spin());
        engine.tick();
        engine.reset();
        engine.apply();
        assert_eq!(engine.phase(), DrawPhase::Spinning);
        assert_eq!(engine.state().remaining.len(), TEAM_COUNT);
    }

    #[test]
    fn apply_resets_draw_and_angle() {
        let mut engine = engine(8);
        run_spin(&mut engine);
        assert!(engine.angle() > 0.0);
        engine.set_input(0, "Rovers");
        engine.apply();
        assert_eq!(engine.angle(), 0.0);
        assert_eq!(engine.state().teams[0], "Rovers");
        assert!(engine.state().assigned.is_empty());
        assert_eq!(engine.state().remaining, engine.state().teams);
    }

    #[test]
    fn commits_are_mirrored_to_the_store() {
        let store = MemoryStore::default();
        let mut engine = DrawEngine::new(store.clone(), 9);
        run_spin(&mut engine);
        let saved = store.load().expect("snapshot saved");
        assert_eq!(&saved, engine.state());
    }

    #[test]
    fn resumes_from_saved_snapshot() {
        let store = MemoryStore::default();
        {
            let mut engine = DrawEngine::new(store.clone(), 10);
            run_spin(&mut engine);
            run_spin(&mut engine);
        }
        let resumed = DrawEngine::new(store, 11);
        assert_eq!(resumed.state().assigned.len(), 2);
        assert_eq!(resumed.state().remaining.len(), TEAM_COUNT - 2);
        // Angle is not durable.
        assert_eq!(resumed.angle(), 0.0);
    }

    #[test]
    fn clear_saved_leaves_memory_state_alone() {
        let store = MemoryStore::default();
        let mut engine = DrawEngine::new(store.clone(), 12);
        run_spin(&mut engine);
        engine.clear_saved();
        assert!(store.load().is_none());
        assert_eq!(engine.state().assigned.len(), 1);
    }

    #[test]
    fn shuffle_only_touches_inputs() {
        let mut engine = engine(13);
        let teams = engine.state().teams.clone();
        engine.shuffle_inputs();
        assert_eq!(engine.state().teams, teams);
        assert_eq!(engine.state().remaining, teams);
        let mut sorted = engine.state().inputs.clone();
        sorted.sort();
        let mut expected = teams;
        expected.sort();
        assert_eq!(sorted, expected);
    }

    #[test]
    fn same_seed_produces_same_draw() {
        let mut a = engine(42);
        let mut b = engine(42);
        for _ in 0..TEAM_COUNT {
            assert_eq!(run_spin(&mut a), run_spin(&mut b));
        }
        assert_eq!(a.state(), b.state());
    }
}
