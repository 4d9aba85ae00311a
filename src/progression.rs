//! Player stat progression driven by mission results.

use rocket::serde::{Deserialize, Serialize};
use rocket_okapi::JsonSchema;

use crate::incidents::MissionType;
use crate::interception::types::MissionOutcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde")]
pub struct PlayerStats {
    /// 0..=100
    pub energy: u32,
    /// 0..=100
    pub control: u32,
    /// -100..=100, negative leans shadow, positive leans light
    pub alignment: i32,
}

impl Default for PlayerStats {
    fn default() -> Self {
        PlayerStats {
            energy: 100,
            control: 50,
            alignment: 0,
        }
    }
}

pub fn alignment_label(alignment: i32) -> &'static str {
    if alignment > 50 {
        "Light Guardian"
    } else if alignment > 20 {
        "Light Leaning"
    } else if alignment > -20 {
        "Neutral"
    } else if alignment > -50 {
        "Shadow Touched"
    } else {
        "Shadow Drifter"
    }
}

/// Scale an incident's base difficulty; low control makes missions harder.
pub fn calculate_difficulty(base_difficulty: f64, stats: &PlayerStats) -> f64 {
    let control_modifier = (100.0 - f64::from(stats.control)) / 100.0;
    (base_difficulty * (1.0 + control_modifier * 0.5)).clamp(1.0, 5.0)
}

pub fn apply_mission_result(
    stats: &PlayerStats,
    outcome: MissionOutcome,
    mission_type: MissionType,
    energy_used: u32,
) -> PlayerStats {
    let mut next = *stats;
    next.energy = stats.energy.saturating_sub(energy_used);

    next.control = match outcome {
        MissionOutcome::Clean => (stats.control + 10).min(100),
        MissionOutcome::Partial => (stats.control + 3).min(100),
        MissionOutcome::Failed => stats.control.saturating_sub(5),
    };

    // Investigation and rune-lock missions adjust alignment through their own choices.
    let alignment_delta = match (mission_type, outcome) {
        (MissionType::Containment, MissionOutcome::Clean) => 5,
        (MissionType::Containment, MissionOutcome::Failed) => -10,
        (MissionType::Interception, MissionOutcome::Clean) => 3,
        (MissionType::Interception, MissionOutcome::Failed) => -8,
        _ => 0,
    };
    next.alignment = (stats.alignment + alignment_delta).clamp(-100, 100);
    next
}

pub fn regenerate_energy(stats: &PlayerStats) -> PlayerStats {
    PlayerStats {
        energy: (stats.energy + 20).min(100),
        ..*stats
    }
}
