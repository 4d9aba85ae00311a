//! The player's session: seeded randomness, stats, the live interception and
//! the action log that makes all of it replayable.

pub mod action_log;
mod endpoints;
pub mod game_state;
pub mod persistence;
pub mod types;

pub use endpoints::{
    draw_incident, get_leaderboard, get_player_stats, list_actions_log, list_characters,
    list_incidents, okapi_add_operation_for_draw_incident_,
    okapi_add_operation_for_get_leaderboard_, okapi_add_operation_for_get_player_stats_,
    okapi_add_operation_for_list_actions_log_, okapi_add_operation_for_list_characters_,
    okapi_add_operation_for_list_incidents_, okapi_add_operation_for_rest_,
    okapi_add_operation_for_select_character_, okapi_add_operation_for_set_seed_, rest,
    select_character, set_seed, ActionLogResponse, IncidentView, PlayerStatsResponse,
    SeedRequest, SelectCharacterRequest,
};
pub use game_state::GameState;

/// Session state as managed by Rocket.
pub type SharedGameState = std::sync::Arc<rocket::futures::lock::Mutex<GameState>>;
