//! Bureau agents and their running scores.

use rocket::serde::{Deserialize, Serialize};
use rocket_okapi::JsonSchema;

use crate::interception::types::MissionOutcome;
use crate::progression::PlayerStats;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde")]
pub struct Character {
    pub id: String,
    pub name: String,
    pub emoji: String,
    pub description: String,
}

fn character(id: &str, name: &str, emoji: &str, description: &str) -> Character {
    Character {
        id: id.to_string(),
        name: name.to_string(),
        emoji: emoji.to_string(),
        description: description.to_string(),
    }
}

pub fn character_catalog() -> Vec<Character> {
    vec![
        character("kyra", "Kyra", "🧙‍♀️", "Elf with powerful magic"),
        character("imogen", "Imogen", "✨", "Fairy with light magic"),
        character("lily", "Lily", "🌟", "Human with hidden potential"),
        character("ruksy", "Ruksy", "📚", "Magical scholar"),
        character("darra", "Darra", "🔮", "Elf with elemental powers"),
        character("peter", "Peter", "⚡", "Human with courage"),
    ]
}

pub fn find_character<'a>(catalog: &'a [Character], id: &str) -> Option<&'a Character> {
    catalog.iter().find(|c| c.id.eq_ignore_ascii_case(id))
}

/// A character that has played at least once, with the stats they left off at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde")]
pub struct CharacterScore {
    pub id: String,
    pub name: String,
    pub emoji: String,
    pub missions_completed: u32,
    pub total_score: u32,
    pub stats: PlayerStats,
}

impl CharacterScore {
    pub fn new(character: &Character) -> Self {
        CharacterScore {
            id: character.id.clone(),
            name: character.name.clone(),
            emoji: character.emoji.clone(),
            missions_completed: 0,
            total_score: 0,
            stats: PlayerStats::default(),
        }
    }

    /// Credit a finished mission and take on the stats it left behind.
    pub fn record_mission(&mut self, outcome: MissionOutcome, stats: PlayerStats) {
        self.missions_completed += 1;
        self.total_score += mission_score(outcome);
        self.stats = stats;
    }
}

pub fn mission_score(outcome: MissionOutcome) -> u32 {
    match outcome {
        MissionOutcome::Clean => 100,
        MissionOutcome::Partial => 60,
        MissionOutcome::Failed => 30,
    }
}

/// Highest score first; ties keep the order characters joined in.
pub fn leaderboard(scores: &[CharacterScore]) -> Vec<CharacterScore> {
    let mut sorted = scores.to_vec();
    sorted.sort_by(|a, b| b.total_score.cmp(&a.total_score));
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score_for(id: &str) -> CharacterScore {
        let catalog = character_catalog();
        CharacterScore::new(find_character(&catalog, id).expect("catalog character"))
    }

    #[test]
    fn outcomes_score_100_60_30() {
        assert_eq!(mission_score(MissionOutcome::Clean), 100);
        assert_eq!(mission_score(MissionOutcome::Partial), 60);
        assert_eq!(mission_score(MissionOutcome::Failed), 30);
    }

    #[test]
    fn recording_a_mission_accrues_score_and_stats() {
        let mut kyra = score_for("kyra");
        let after = PlayerStats {
            energy: 60,
            control: 60,
            alignment: 3,
        };
        kyra.record_mission(MissionOutcome::Clean, after);
        kyra.record_mission(MissionOutcome::Failed, after);
        assert_eq!(kyra.missions_completed, 2);
        assert_eq!(kyra.total_score, 130);
        assert_eq!(kyra.stats, after);
    }

    #[test]
    fn leaderboard_sorts_by_score_and_keeps_ties_in_join_order() {
        let mut lily = score_for("lily");
        let mut peter = score_for("peter");
        let mut darra = score_for("darra");
        lily.record_mission(MissionOutcome::Failed, lily.stats);
        peter.record_mission(MissionOutcome::Clean, peter.stats);
        darra.record_mission(MissionOutcome::Failed, darra.stats);

        let ids: Vec<String> = leaderboard(&[lily, peter, darra])
            .into_iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(ids, vec!["peter", "lily", "darra"]);
    }

    #[test]
    fn character_lookup_ignores_case() {
        let catalog = character_catalog();
        assert_eq!(catalog.len(), 6);
        assert_eq!(find_character(&catalog, "IMOGEN").map(|c| c.name.as_str()), Some("Imogen"));
        assert!(find_character(&catalog, "gandalf").is_none());
    }
}
