//! Catalog of incidents the Bureau can be dispatched to.

use rocket::serde::{Deserialize, Serialize};
use rocket_okapi::JsonSchema;

use crate::interception::rng::CombatRng;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde", rename_all = "lowercase")]
pub enum MissionType {
    Containment,
    Investigation,
    Interception,
    Runelock,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde", rename_all = "lowercase")]
pub enum Urgency {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde")]
pub struct Incident {
    pub id: String,
    pub mission_type: MissionType,
    pub title: String,
    pub description: String,
    pub location: String,
    pub urgency: Urgency,
    /// 1..=5 before stat scaling
    pub difficulty: u8,
}

fn incident(
    id: &str,
    mission_type: MissionType,
    title: &str,
    description: &str,
    location: &str,
    urgency: Urgency,
    difficulty: u8,
) -> Incident {
    Incident {
        id: id.to_string(),
        mission_type,
        title: title.to_string(),
        description: description.to_string(),
        location: location.to_string(),
        urgency,
        difficulty,
    }
}

pub fn incident_catalog() -> Vec<Incident> {
    vec![
        incident(
            "INC-001",
            MissionType::Containment,
            "Rift Breach at Central Park",
            "A dimensional rift is leaking unstable energy. Tap the correct nodes to seal it before it expands.",
            "Central Park, Manhattan",
            Urgency::High,
            2,
        ),
        incident(
            "INC-002",
            MissionType::Investigation,
            "Suspicious Aura Detected",
            "A civilian is exhibiting unusual magical signatures. Determine if they are corrupted, unstable, or innocent.",
            "Brooklyn Bridge",
            Urgency::Medium,
            2,
        ),
        incident(
            "INC-003",
            MissionType::Interception,
            "Shadow Entity Manifestation",
            "A hostile entity has materialized. Engage and neutralize using tactical spells.",
            "Times Square",
            Urgency::High,
            3,
        ),
        incident(
            "INC-004",
            MissionType::Containment,
            "Artifact Overload",
            "An ancient artifact is destabilizing. Contain its energy before it causes a cascade failure.",
            "Museum of Natural History",
            Urgency::Medium,
            3,
        ),
        incident(
            "INC-005",
            MissionType::Investigation,
            "Memory Corruption Case",
            "Multiple witnesses report missing time. Scan and assess the threat level.",
            "Grand Central Terminal",
            Urgency::Low,
            1,
        ),
        incident(
            "INC-006",
            MissionType::Runelock,
            "Ancient Rune Chamber",
            "A sealed rune chamber has been discovered. Solve the puzzle and defeat the guardian to unlock its secrets.",
            "Underground Catacombs",
            Urgency::Medium,
            2,
        ),
    ]
}

/// Draw one incident uniformly. `None` only for an empty catalog.
pub fn draw_incident<R: CombatRng + ?Sized>(catalog: &[Incident], rng: &mut R) -> Option<Incident> {
    if catalog.is_empty() {
        return None;
    }
    catalog.get(rng.pick(catalog.len())).cloned()
}
