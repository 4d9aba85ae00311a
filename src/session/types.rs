use rocket::serde::{Deserialize, Serialize};
use rocket_okapi::JsonSchema;

use crate::interception::types::{MissionResult, SpellType};

/// Session inputs recorded in the action log. Replaying them in order against
/// a blank session reproduces it exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde", tag = "payload_type")]
pub enum ActionPayload {
    SetSeed { seed: u64 },
    SelectCharacter { id: String },
    StartInterception { enemy: Option<String> },
    CastSpell { spell: SpellType },
    DrawIncident,
    Rest,
    /// Emitted by the session when an encounter ends; informational on replay.
    MissionCompleted { result: MissionResult },
}

impl ActionPayload {
    pub fn action_type(&self) -> &'static str {
        match self {
            ActionPayload::SetSeed { .. } => "SetSeed",
            ActionPayload::SelectCharacter { .. } => "SelectCharacter",
            ActionPayload::StartInterception { .. } => "StartInterception",
            ActionPayload::CastSpell { .. } => "CastSpell",
            ActionPayload::DrawIncident => "DrawIncident",
            ActionPayload::Rest => "Rest",
            ActionPayload::MissionCompleted { .. } => "MissionCompleted",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde")]
pub struct ActionEntry {
    pub seq: u64,
    pub action_type: String,
    pub payload: ActionPayload,
    /// Milliseconds since the unix epoch.
    pub timestamp: String,
}
