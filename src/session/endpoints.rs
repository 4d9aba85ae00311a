use either::{Either, Left, Right};
use rocket::response::status::{BadRequest, NotFound};
use rocket::serde::json::Json;
use rocket::serde::{Deserialize, Serialize};
use rocket::State;
use rocket_okapi::{openapi, JsonSchema};

use super::types::ActionEntry;
use super::SharedGameState;
use crate::incidents::Incident;
use crate::progression::{alignment_label, calculate_difficulty, PlayerStats};
use crate::roster::{Character, CharacterScore};
use crate::status_messages::{new_status, Status};

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde")]
pub struct PlayerStatsResponse {
    pub stats: PlayerStats,
    pub alignment_label: String,
    pub missions_completed: u32,
    pub current_character: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde")]
pub struct SelectCharacterRequest {
    pub id: String,
}

/// An incident with its difficulty scaled to the player's current control.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde")]
pub struct IncidentView {
    #[serde(flatten)]
    pub incident: Incident,
    pub scaled_difficulty: f64,
}

impl IncidentView {
    fn new(incident: Incident, stats: &PlayerStats) -> Self {
        let scaled_difficulty = calculate_difficulty(f64::from(incident.difficulty), stats);
        IncidentView {
            incident,
            scaled_difficulty,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde")]
pub struct SeedRequest {
    pub seed: u64,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde")]
pub struct ActionLogResponse {
    pub entries: Vec<ActionEntry>,
    pub next_seq: Option<u64>,
    pub limit: usize,
}

/// Current stats with their alignment label.
#[openapi]
#[get("/player/stats")]
pub async fn get_player_stats(game_state: &State<SharedGameState>) -> Json<PlayerStatsResponse> {
    let gs = game_state.lock().await;
    Json(PlayerStatsResponse {
        stats: gs.stats,
        alignment_label: alignment_label(gs.stats.alignment).to_string(),
        missions_completed: gs.missions_completed,
        current_character: gs.current_character.clone(),
    })
}

/// Reseed the session RNG; recorded for replay.
#[openapi]
#[post("/player/seed", format = "json", data = "<seed_req>")]
pub async fn set_seed(
    seed_req: Json<SeedRequest>,
    game_state: &State<SharedGameState>,
) -> Json<Status> {
    let mut gs = game_state.lock().await;
    gs.set_seed(seed_req.seed);
    new_status(format!("seed set to {}", seed_req.seed))
}

/// Recover 20 energy.
#[openapi]
#[post("/player/rest")]
pub async fn rest(game_state: &State<SharedGameState>) -> Json<PlayerStats> {
    let mut gs = game_state.lock().await;
    Json(gs.rest())
}

#[openapi]
#[get("/incidents")]
pub async fn list_incidents(game_state: &State<SharedGameState>) -> Json<Vec<IncidentView>> {
    let gs = game_state.lock().await;
    Json(
        gs.incidents
            .iter()
            .map(|incident| IncidentView::new(incident.clone(), &gs.stats))
            .collect(),
    )
}

/// Draw the next incident at random.
#[openapi]
#[post("/incidents/draw")]
pub async fn draw_incident(
    game_state: &State<SharedGameState>,
) -> Result<Json<IncidentView>, NotFound<Json<Status>>> {
    let mut gs = game_state.lock().await;
    let stats = gs.stats;
    gs.draw_incident()
        .map(|incident| Json(IncidentView::new(incident, &stats)))
        .ok_or_else(|| NotFound(new_status("No incidents available".to_string())))
}

#[openapi]
#[get("/characters")]
pub async fn list_characters(game_state: &State<SharedGameState>) -> Json<Vec<Character>> {
    let gs = game_state.lock().await;
    Json(gs.characters.clone())
}

/// Play as a character; recorded for replay.
#[openapi]
#[post("/characters/select", format = "json", data = "<request>")]
pub async fn select_character(
    request: Json<SelectCharacterRequest>,
    game_state: &State<SharedGameState>,
) -> Result<Json<CharacterScore>, Either<NotFound<Json<Status>>, BadRequest<Json<Status>>>> {
    let mut gs = game_state.lock().await;
    if gs.encounter.is_some() {
        return Err(Right(BadRequest(new_status(
            "An interception is already in progress".to_string(),
        ))));
    }
    gs.select_character(&request.id)
        .map(Json)
        .map_err(|e| Left(NotFound(new_status(e))))
}

/// Characters that have played, highest score first.
#[openapi]
#[get("/leaderboard")]
pub async fn get_leaderboard(game_state: &State<SharedGameState>) -> Json<Vec<CharacterScore>> {
    let gs = game_state.lock().await;
    Json(gs.leaderboard())
}

#[openapi]
#[get("/actions/log?<from_seq>&<limit>&<action_type>")]
pub async fn list_actions_log(
    from_seq: Option<u64>,
    limit: Option<usize>,
    action_type: Option<String>,
    game_state: &State<SharedGameState>,
) -> Json<ActionLogResponse> {
    let gs = game_state.lock().await;
    let mut filtered: Vec<ActionEntry> = gs
        .action_log
        .entries()
        .into_iter()
        .filter(|e| from_seq.map_or(true, |f| e.seq >= f))
        .filter(|e| action_type.as_ref().map_or(true, |at| e.action_type == *at))
        .collect();
    let max = limit.unwrap_or(1000);
    let has_more = filtered.len() > max;
    filtered.truncate(max);
    let next_seq = if has_more {
        filtered.last().map(|e| e.seq + 1)
    } else {
        None
    };
    Json(ActionLogResponse {
        entries: filtered,
        next_seq,
        limit: max,
    })
}
