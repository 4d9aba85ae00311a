//! # Bureau of Magical Things
//!
//! Headless engine for the Bureau's interception missions: a turn-based duel
//! between a field agent and a magical threat.
//!
//! ## Overview
//!
//! The agent casts one of four spells (attack, shield, bind, drain) each turn,
//! paying energy for each, and the enemy retaliates unless bound or blocked.
//! When either side falls the encounter is reported as a `MissionResult`,
//! which feeds the agent's energy, control and alignment.
//!
//! ## Architecture
//!
//! The resolver in [`interception`] is pure: it takes a `CombatState` and a
//! random source and returns the next state. [`session`] owns the seeded RNG,
//! the live encounter and an action log from which the whole session can be
//! replayed. Both are served over a Rocket JSON API with OpenAPI documentation;
//! the session sits behind an `Arc<Mutex<_>>` so only one request mutates it at
//! a time.

// Rocket makes this a bit tricky to support
#![allow(clippy::module_name_repetitions)]
#[macro_use]
extern crate rocket;

use rocket_okapi::openapi_get_routes;
use rocket_okapi::swagger_ui::{make_swagger_ui, SwaggerUIConfig};

pub mod config;
pub mod incidents;
pub mod interception;
pub mod progression;
pub mod roster;
pub mod session;
pub mod status_messages;

use crate::config::GameConfig;
use crate::session::{GameState, SharedGameState};

/// Initializes the Rocket server with a session built from the environment.
///
/// # Example
///
/// ```no_run
/// use bureau_of_magical_things::rocket_initialize;
///
/// #[rocket::main]
/// async fn main() {
///     rocket_initialize().launch().await.expect("Failed to launch rocket");
/// }
/// ```
pub fn rocket_initialize() -> rocket::Rocket<rocket::Build> {
    #[allow(clippy::no_effect_underscore_binding)]
    let _ = env_logger::try_init();

    rocket_with_state(GameState::from_config(&GameConfig::from_env()))
}

/// Initializes the Rocket server around an existing session.
pub fn rocket_with_state(game_state: GameState) -> rocket::Rocket<rocket::Build> {
    use crate::interception::{
        cast_spell, get_combat_log, get_interception, get_interception_result, list_enemies,
        okapi_add_operation_for_cast_spell_, okapi_add_operation_for_get_combat_log_,
        okapi_add_operation_for_get_interception_,
        okapi_add_operation_for_get_interception_result_, okapi_add_operation_for_list_enemies_,
        okapi_add_operation_for_start_interception_, start_interception,
    };
    use crate::session::{
        draw_incident, get_leaderboard, get_player_stats, list_actions_log, list_characters,
        list_incidents, okapi_add_operation_for_draw_incident_,
        okapi_add_operation_for_get_leaderboard_, okapi_add_operation_for_get_player_stats_,
        okapi_add_operation_for_list_actions_log_, okapi_add_operation_for_list_characters_,
        okapi_add_operation_for_list_incidents_, okapi_add_operation_for_rest_,
        okapi_add_operation_for_select_character_, okapi_add_operation_for_set_seed_, rest,
        select_character, set_seed,
    };
    use rocket::fairing::AdHoc;

    let gs: SharedGameState = std::sync::Arc::new(rocket::futures::lock::Mutex::new(game_state));

    rocket::build()
        .mount(
            "/",
            openapi_get_routes![
                get_player_stats,
                set_seed,
                rest,
                list_incidents,
                draw_incident,
                list_characters,
                select_character,
                get_leaderboard,
                list_enemies,
                start_interception,
                get_interception,
                cast_spell,
                get_interception_result,
                get_combat_log,
                list_actions_log
            ],
        )
        .mount("/swagger", make_swagger_ui(&get_docs()))
        .manage(gs)
        .attach(AdHoc::on_shutdown("action-log-flush", |rocket| {
            Box::pin(async move {
                if let Some(gs) = rocket.state::<SharedGameState>() {
                    let action_log = gs.lock().await.action_log.clone();
                    // Joining the writer thread blocks.
                    let flushed =
                        rocket::tokio::task::spawn_blocking(move || action_log.shutdown()).await;
                    if let Err(e) = flushed {
                        log::error!("action log flush failed: {}", e);
                    }
                }
            })
        }))
}

fn get_docs() -> SwaggerUIConfig {
    SwaggerUIConfig {
        url: "/openapi.json".to_string(),
        ..Default::default()
    }
}
