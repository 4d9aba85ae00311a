use either::{Either, Left, Right};
use rocket::response::status::{BadRequest, Created, NotFound};
use rocket::serde::json::Json;
use rocket::serde::{Deserialize, Serialize};
use rocket::State;
use rocket_okapi::{openapi, JsonSchema};

use super::types::{CombatState, Enemy, MissionResult, Resolution, SpellType};
use crate::session::SharedGameState;
use crate::status_messages::{new_status, Status};

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde")]
pub struct StartRequest {
    /// Fight this catalog enemy instead of a random one.
    pub enemy: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde")]
pub struct CastRequest {
    pub spell: SpellType,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde")]
pub struct CastResponse {
    pub resolution: Resolution,
    /// Human-readable lines for the events of this resolution.
    pub log: Vec<String>,
}

#[openapi]
#[get("/interception/enemies")]
pub async fn list_enemies(game_state: &State<SharedGameState>) -> Json<Vec<Enemy>> {
    let gs = game_state.lock().await;
    Json(gs.enemies.clone())
}

/// Start an interception. Only one may be live at a time.
#[openapi]
#[post("/interception", format = "json", data = "<request>")]
pub async fn start_interception(
    request: Json<StartRequest>,
    game_state: &State<SharedGameState>,
) -> Result<Created<Json<CombatState>>, Either<NotFound<Json<Status>>, BadRequest<Json<Status>>>> {
    let mut gs = game_state.lock().await;
    if gs.encounter.is_some() {
        return Err(Right(BadRequest(new_status(
            "An interception is already in progress".to_string(),
        ))));
    }
    match gs.start_interception(request.enemy.as_deref()) {
        Ok(state) => Ok(Created::new("/interception").body(Json(state))),
        Err(e) => Err(Left(NotFound(new_status(e)))),
    }
}

#[openapi]
#[get("/interception")]
pub async fn get_interception(game_state: &State<SharedGameState>) -> Json<Option<CombatState>> {
    let gs = game_state.lock().await;
    Json(gs.encounter.clone())
}

/// Cast a spell. Casting out of turn or without enough energy changes nothing.
#[openapi]
#[post("/interception/action", format = "json", data = "<request>")]
pub async fn cast_spell(
    request: Json<CastRequest>,
    game_state: &State<SharedGameState>,
) -> Result<Json<CastResponse>, NotFound<Json<Status>>> {
    let mut gs = game_state.lock().await;
    let resolution = gs
        .cast(request.spell)
        .map_err(|e| NotFound(new_status(e)))?;
    let log = resolution.events.iter().map(|e| e.describe()).collect();
    Ok(Json(CastResponse { resolution, log }))
}

#[openapi]
#[get("/interception/result")]
pub async fn get_interception_result(
    game_state: &State<SharedGameState>,
) -> Json<Option<MissionResult>> {
    let gs = game_state.lock().await;
    Json(gs.last_result.clone())
}

/// The last few combat log lines.
#[openapi]
#[get("/interception/log")]
pub async fn get_combat_log(game_state: &State<SharedGameState>) -> Json<Vec<String>> {
    let gs = game_state.lock().await;
    Json(gs.combat_log())
}
