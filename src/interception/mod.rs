//! The interception mini-game: a turn-based duel against one enemy.
//!
//! Pure data and functions; the session decides when encounters start and
//! what happens to their results.

pub mod catalog;
mod endpoints;
pub mod report;
pub mod resolve;
pub mod rng;
pub mod types;

pub use endpoints::{
    cast_spell, get_combat_log, get_interception, get_interception_result, list_enemies,
    okapi_add_operation_for_cast_spell_, okapi_add_operation_for_get_combat_log_,
    okapi_add_operation_for_get_interception_, okapi_add_operation_for_get_interception_result_,
    okapi_add_operation_for_list_enemies_, okapi_add_operation_for_start_interception_,
    start_interception, CastRequest, CastResponse, StartRequest,
};
pub use resolve::{resolve_action, resolve_enemy_turn, resolve_player_action};
pub use types::{CombatEvent, CombatState, Enemy, MissionOutcome, MissionResult, Resolution, SpellType};
