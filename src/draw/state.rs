//! Draw state and participant data
//!
//! Everything that must survive a reload lives here; this is also the record
//! the persistence store serializes verbatim.

use serde::{Deserialize, Serialize};

use crate::consts::{GROUP_COUNT, GROUP_SIZE, TEAM_COUNT};

/// Durable draw state: raw editor inputs, confirmed teams, the shrinking
/// participant pool, and the draw outcomes in order.
///
/// `remaining` doubles as the wheel's segment order. Outside the mid-spin
/// transient, `assigned.len() + remaining.len() == teams.len()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawState {
    /// Raw editable name entries, possibly blank; no effect until applied
    pub inputs: Vec<String>,
    /// Confirmed names the pool resets to
    pub teams: Vec<String>,
    /// Not-yet-drawn participants, in wheel segment order
    pub remaining: Vec<String>,
    /// Drawn participants, in draw order
    pub assigned: Vec<String>,
}

/// Synthesized placeholder names "Team 1".."Team 9"
pub fn default_teams() -> Vec<String> {
    (0..TEAM_COUNT).map(|i| format!("Team {}", i + 1)).collect()
}

impl Default for DrawState {
    fn default() -> Self {
        let teams = default_teams();
        Self {
            inputs: teams.clone(),
            remaining: teams.clone(),
            teams,
            assigned: Vec::new(),
        }
    }
}

impl DrawState {
    /// Confirm the raw inputs as the new team list and restart the draw.
    ///
    /// Each entry is trimmed; blanks get a synthesized placeholder. The caller
    /// is responsible for zeroing the wheel angle alongside.
    pub fn apply(&mut self) {
        self.teams = self
            .inputs
            .iter()
            .enumerate()
            .map(|(i, raw)| {
                let name = raw.trim();
                if name.is_empty() {
                    format!("Team {}", i + 1)
                } else {
                    name.to_string()
                }
            })
            .collect();
        self.assigned.clear();
        self.remaining = self.teams.clone();
    }

    /// Restart the draw against the current team list. Teams and inputs are
    /// untouched; calling this twice is the same as calling it once.
    pub fn reset(&mut self) {
        self.assigned.clear();
        self.remaining = self.teams.clone();
    }

    /// Move the winner at `index` from the pool to the assignment list,
    /// preserving the relative order of the rest. Returns the winner's name.
    pub fn commit(&mut self, index: usize) -> String {
        let name = self.remaining.remove(index);
        self.assigned.push(name.clone());
        name
    }

    /// True once every participant has been drawn; gates fixture export.
    pub fn is_full(&self) -> bool {
        self.assigned.len() >= self.teams.len()
    }

    /// Shape check used when loading a snapshot: field lengths must match the
    /// tournament size and the pool/assignment split must add up.
    pub fn is_well_formed(&self) -> bool {
        self.inputs.len() == TEAM_COUNT
            && self.teams.len() == TEAM_COUNT
            && self.assigned.len() + self.remaining.len() == self.teams.len()
    }

    /// Members of group `g` (0 = A) in slot order. Position `p` in the draw
    /// order belongs to group `p % 3`, slot `p / 3`; unslotted entries are
    /// `None`.
    pub fn group(&self, g: usize) -> [Option<&str>; GROUP_SIZE] {
        debug_assert!(g < GROUP_COUNT);
        std::array::from_fn(|slot| self.assigned.get(g + slot * GROUP_COUNT).map(String::as_str))
    }
}

/// Display label for a group index (0 => "A")
pub fn group_label(g: usize) -> char {
    (b'A' + g as u8) as char
}
