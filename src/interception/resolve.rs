//! Turn resolution for the interception mini-game.
//!
//! A player action is resolved in two halves: the player's spell, then the
//! enemy's retaliation. `resolve_action` runs both; callers that animate
//! between them can call `resolve_player_action` and `resolve_enemy_turn`
//! separately and get the same outcome.

use super::report::mission_result;
use super::rng::CombatRng;
use super::types::{CombatEvent, CombatState, Resolution, SpellType, PLAYER_MAX};

fn unchanged(state: &CombatState) -> Resolution {
    Resolution {
        state: state.clone(),
        events: Vec::new(),
        result: None,
    }
}

fn finish(state: CombatState, events: Vec<CombatEvent>) -> Resolution {
    let result = mission_result(&state);
    Resolution {
        state,
        events,
        result,
    }
}

/// Apply the player's spell. Illegal casts (enemy's turn, not enough energy,
/// encounter already over) return the state untouched.
pub fn resolve_player_action(current_state: &CombatState, spell: SpellType) -> Resolution {
    if !current_state.can_cast(spell) {
        log::debug!(
            "rejected {:?}: player_turn={} energy={}",
            spell,
            current_state.is_player_turn,
            current_state.player_energy
        );
        return unchanged(current_state);
    }

    let mut state_after = current_state.clone();
    let mut events = Vec::new();
    let damage = spell.damage(spell == state_after.enemy.weakness);

    match spell {
        SpellType::Attack => {
            events.push(CombatEvent::SpellCast {
                spell,
                damage,
                healed: 0,
            });
        }
        SpellType::Shield => {
            state_after.shield_active = true;
            events.push(CombatEvent::ShieldRaised);
        }
        SpellType::Bind => {
            state_after.enemy_bound = true;
            events.push(CombatEvent::EnemyBound { damage });
        }
        SpellType::Drain => {
            let healed = damage / 2;
            state_after.player_health = (state_after.player_health + healed).min(PLAYER_MAX);
            events.push(CombatEvent::SpellCast {
                spell,
                damage,
                healed,
            });
        }
    }

    state_after.enemy.health = state_after.enemy.health.saturating_sub(damage);
    state_after.player_energy = state_after.player_energy.saturating_sub(spell.cost());
    state_after.is_player_turn = false;

    if state_after.is_victory() {
        log::info!(
            "{} defeated on turn {}",
            state_after.enemy.name,
            state_after.turn
        );
        events.push(CombatEvent::Victory {
            enemy: state_after.enemy.name.clone(),
        });
        return finish(state_after, events);
    }

    Resolution {
        state: state_after,
        events,
        result: None,
    }
}

/// Run the enemy's retaliation. Only legal once the player has acted and the
/// encounter is still live; otherwise the state is returned untouched.
pub fn resolve_enemy_turn<R: CombatRng + ?Sized>(
    current_state: &CombatState,
    rng: &mut R,
) -> Resolution {
    if current_state.is_player_turn || current_state.is_terminal() {
        return unchanged(current_state);
    }

    let mut state_after = current_state.clone();
    let mut events = Vec::new();

    if state_after.enemy_bound {
        state_after.enemy_bound = false;
        events.push(CombatEvent::EnemySkipped);
    } else {
        let damage = rng.enemy_damage();
        if state_after.shield_active {
            state_after.shield_active = false;
            events.push(CombatEvent::AttackBlocked);
        } else {
            state_after.player_health = state_after.player_health.saturating_sub(damage);
            events.push(CombatEvent::EnemyHit {
                enemy: state_after.enemy.name.clone(),
                move_name: state_after.enemy.next_move.clone(),
                damage,
            });
        }
    }

    if state_after.is_defeat() {
        log::info!(
            "player defeated by {} on turn {}",
            state_after.enemy.name,
            state_after.turn
        );
        events.push(CombatEvent::Defeat);
        return finish(state_after, events);
    }

    state_after.turn += 1;
    state_after.is_player_turn = true;
    Resolution {
        state: state_after,
        events,
        result: None,
    }
}

/// Resolve one full player action followed by the enemy's reply.
pub fn resolve_action<R: CombatRng + ?Sized>(
    current_state: &CombatState,
    spell: SpellType,
    rng: &mut R,
) -> Resolution {
    let player_half = resolve_player_action(current_state, spell);
    if player_half.result.is_some() || player_half.state.is_player_turn {
        return player_half;
    }

    let enemy_half = resolve_enemy_turn(&player_half.state, rng);
    let mut events = player_half.events;
    events.extend(enemy_half.events);
    Resolution {
        state: enemy_half.state,
        events,
        result: enemy_half.result,
    }
}
