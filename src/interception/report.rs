use super::types::{CombatState, MissionOutcome, MissionResult, PLAYER_MAX};

/// Energy charged against the player when an interception is lost.
pub const DEFEAT_ENERGY_USED: u32 = 40;

pub fn victory_result(state: &CombatState) -> MissionResult {
    MissionResult {
        outcome: MissionOutcome::Clean,
        alignment_change: 3,
        energy_used: PLAYER_MAX.saturating_sub(state.player_energy),
        control_gained: 10,
        story_consequence: format!(
            "{} neutralized. Threat eliminated. Area secured.",
            state.enemy.name
        ),
    }
}

pub fn defeat_result() -> MissionResult {
    MissionResult {
        outcome: MissionOutcome::Failed,
        alignment_change: -8,
        energy_used: DEFEAT_ENERGY_USED,
        control_gained: -5,
        story_consequence:
            "Defeated in combat. Emergency extraction initiated. Shadow influence grows."
                .to_string(),
    }
}

/// Map a finished encounter to its result. Live encounters have none.
///
/// Interceptions are binary: there is no partial tier.
pub fn mission_result(state: &CombatState) -> Option<MissionResult> {
    if state.is_victory() {
        Some(victory_result(state))
    } else if state.is_defeat() {
        Some(defeat_result())
    } else {
        None
    }
}
