//! Random source used by the resolver.
//!
//! Every `rand::Rng` works as a combat random source; `ScriptedRolls` replays a
//! fixed list of outcomes so encounters can be driven deterministically.

use rand::Rng;
use std::collections::VecDeque;
use std::ops::RangeInclusive;

/// Inclusive range of damage an unbound, unshielded enemy attack deals.
pub const ENEMY_DAMAGE: RangeInclusive<u32> = 20..=29;

pub trait CombatRng {
    /// Uniform index in `0..len`. `len` is never zero.
    fn pick(&mut self, len: usize) -> usize;

    /// Uniform enemy damage in [`ENEMY_DAMAGE`].
    fn enemy_damage(&mut self) -> u32;
}

impl<R: Rng> CombatRng for R {
    fn pick(&mut self, len: usize) -> usize {
        self.gen_range(0..len)
    }

    fn enemy_damage(&mut self) -> u32 {
        self.gen_range(ENEMY_DAMAGE)
    }
}

/// Replays queued picks and damage rolls; once a queue runs dry it falls back to
/// the first catalog entry and the minimum enemy damage.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRolls {
    picks: VecDeque<usize>,
    damages: VecDeque<u32>,
}

impl ScriptedRolls {
    pub fn new(picks: Vec<usize>, damages: Vec<u32>) -> Self {
        ScriptedRolls {
            picks: picks.into(),
            damages: damages.into(),
        }
    }

    pub fn damages(damages: Vec<u32>) -> Self {
        Self::new(Vec::new(), damages)
    }
}

impl CombatRng for ScriptedRolls {
    fn pick(&mut self, len: usize) -> usize {
        self.picks.pop_front().unwrap_or(0) % len.max(1)
    }

    fn enemy_damage(&mut self) -> u32 {
        let roll = self.damages.pop_front().unwrap_or(*ENEMY_DAMAGE.start());
        roll.clamp(*ENEMY_DAMAGE.start(), *ENEMY_DAMAGE.end())
    }
}
