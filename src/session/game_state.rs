use super::action_log::{ActionLog, LogReadError};
use super::persistence::FileWriter;
use super::types::{ActionEntry, ActionPayload};
use crate::config::GameConfig;
use crate::incidents::{draw_incident, incident_catalog, Incident, MissionType};
use crate::interception::catalog::{enemy_catalog, find_enemy, start};
use crate::interception::resolve::resolve_action;
use crate::interception::types::{CombatState, Enemy, MissionResult, Resolution, SpellType};
use crate::progression::{apply_mission_result, regenerate_energy, PlayerStats};
use crate::roster::{character_catalog, find_character, leaderboard, Character, CharacterScore};
use rand::SeedableRng;
use rand_pcg::Lcg64Xsh32;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Number of combat log lines kept for display.
pub const COMBAT_LOG_LINES: usize = 4;

/// Seed the session RNG: the u64 seed is repeated to fill the 16 seed bytes.
pub fn rng_from_seed(seed: u64) -> Lcg64Xsh32 {
    let mut seed_bytes = [0u8; 16];
    seed_bytes[0..8].copy_from_slice(&seed.to_le_bytes());
    seed_bytes[8..16].copy_from_slice(&seed.to_le_bytes());
    Lcg64Xsh32::from_seed(seed_bytes)
}

/// Where a corrupt action log is moved so a fresh one can take its place.
fn quarantine_path(path: &Path) -> PathBuf {
    let millis = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map_or(0, |d| d.as_millis());
    let mut name = path.as_os_str().to_owned();
    name.push(format!(".corrupt-{}", millis));
    PathBuf::from(name)
}

/// One player's session: stats, the live interception (if any) and the log of
/// everything that happened.
#[derive(Debug)]
pub struct GameState {
    pub seed: u64,
    rng: Lcg64Xsh32,
    pub stats: PlayerStats,
    pub enemies: Vec<Enemy>,
    pub incidents: Vec<Incident>,
    pub current_incident: Option<Incident>,
    pub encounter: Option<CombatState>,
    pub last_result: Option<MissionResult>,
    pub missions_completed: u32,
    pub characters: Vec<Character>,
    /// Characters that have been played, in the order they first joined.
    pub roster: Vec<CharacterScore>,
    pub current_character: Option<String>,
    combat_log: VecDeque<String>,
    pub action_log: Arc<ActionLog>,
}

impl GameState {
    /// Session with default stats and an empty action log. Nothing is recorded
    /// until the first input.
    fn blank() -> Self {
        GameState {
            seed: 0,
            rng: rng_from_seed(0),
            stats: PlayerStats::default(),
            enemies: enemy_catalog(),
            incidents: incident_catalog(),
            current_incident: None,
            encounter: None,
            last_result: None,
            missions_completed: 0,
            characters: character_catalog(),
            roster: Vec::new(),
            current_character: None,
            combat_log: VecDeque::with_capacity(COMBAT_LOG_LINES),
            action_log: Arc::new(ActionLog::new()),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        let mut gs = Self::blank();
        gs.set_seed(seed);
        gs
    }

    /// Build the session described by `config`, resuming from the action log
    /// file when it already holds entries. A torn final line is cut off; a log
    /// corrupt before that is moved aside and a fresh session started.
    pub fn from_config(config: &GameConfig) -> Self {
        let Some(path) = &config.action_log_file else {
            return Self::with_seed(config.seed.unwrap_or_else(rand::random));
        };

        let recorded = if path.exists() {
            match ActionLog::recover(path) {
                Ok(entries) => entries,
                Err(LogReadError::Io(e)) => {
                    log::error!("could not read action log {:?}: {}; not persisting", path, e);
                    return Self::with_seed(config.seed.unwrap_or_else(rand::random));
                }
                Err(e @ LogReadError::Corrupt { .. }) => {
                    let aside = quarantine_path(path);
                    if let Err(rename_err) = std::fs::rename(path, &aside) {
                        log::error!(
                            "action log {:?} is corrupt ({}) and could not be moved aside: {}; not persisting",
                            path,
                            e,
                            rename_err
                        );
                        return Self::with_seed(config.seed.unwrap_or_else(rand::random));
                    }
                    log::error!("action log {:?} is corrupt ({}); moved to {:?}", path, e, aside);
                    Vec::new()
                }
            }
        } else {
            Vec::new()
        };

        // Replayed entries are already on disk; only new ones go to the writer.
        let resuming = !recorded.is_empty();
        let mut gs = if resuming {
            log::info!("resuming session from {} logged actions", recorded.len());
            Self::replay_from_log(&recorded)
        } else {
            Self::blank()
        };
        match FileWriter::new(path.clone()) {
            Ok(writer) => gs.action_log.set_writer(Some(writer)),
            Err(e) => log::warn!("action log {:?} not writable: {}", path, e),
        }
        if !resuming {
            gs.set_seed(config.seed.unwrap_or_else(rand::random));
        }
        gs
    }

    /// Rebuild a session by re-applying recorded inputs in order.
    pub fn replay_from_log(entries: &[ActionEntry]) -> Self {
        let mut gs = Self::blank();
        for entry in entries {
            let outcome = match &entry.payload {
                ActionPayload::SetSeed { seed } => {
                    gs.set_seed(*seed);
                    Ok(())
                }
                ActionPayload::SelectCharacter { id } => gs.select_character(id).map(|_| ()),
                ActionPayload::StartInterception { enemy } => {
                    gs.start_interception(enemy.as_deref()).map(|_| ())
                }
                ActionPayload::CastSpell { spell } => gs.cast(*spell).map(|_| ()),
                ActionPayload::DrawIncident => {
                    gs.draw_incident();
                    Ok(())
                }
                ActionPayload::Rest => {
                    gs.rest();
                    Ok(())
                }
                ActionPayload::MissionCompleted { .. } => Ok(()),
            };
            if let Err(e) = outcome {
                log::warn!("replay of entry {} failed: {}", entry.seq, e);
            }
        }
        gs
    }

    pub fn shutdown(&self) {
        self.action_log.shutdown();
    }

    pub fn set_seed(&mut self, seed: u64) {
        self.seed = seed;
        self.rng = rng_from_seed(seed);
        self.action_log.append(ActionPayload::SetSeed { seed });
    }

    /// Begin an interception, against the named enemy or a random one.
    pub fn start_interception(&mut self, enemy: Option<&str>) -> Result<CombatState, String> {
        if self.encounter.is_some() {
            return Err("An interception is already in progress".to_string());
        }
        let state = match enemy {
            Some(name) => {
                let template = find_enemy(&self.enemies, name)
                    .ok_or_else(|| format!("Enemy {} not found", name))?;
                CombatState::new(template.clone())
            }
            None => start(&self.enemies, &mut self.rng)?,
        };
        log::info!(
            "interception started against {} ({} hp, weak to {:?})",
            state.enemy.name,
            state.enemy.max_health,
            state.enemy.weakness
        );
        self.combat_log.clear();
        self.encounter = Some(state.clone());
        self.action_log.append(ActionPayload::StartInterception {
            enemy: enemy.map(str::to_string),
        });
        Ok(state)
    }

    /// Cast a spell in the live interception. Illegal casts leave it unchanged.
    /// When the encounter ends its result is applied to the player's stats and
    /// the encounter is cleared.
    pub fn cast(&mut self, spell: SpellType) -> Result<Resolution, String> {
        let current = self
            .encounter
            .as_ref()
            .ok_or_else(|| "No interception in progress".to_string())?;
        let resolution = resolve_action(current, spell, &mut self.rng);
        self.action_log.append(ActionPayload::CastSpell { spell });

        for event in &resolution.events {
            if self.combat_log.len() == COMBAT_LOG_LINES {
                self.combat_log.pop_front();
            }
            self.combat_log.push_back(event.describe());
        }

        match &resolution.result {
            Some(result) => {
                self.stats = apply_mission_result(
                    &self.stats,
                    result.outcome,
                    MissionType::Interception,
                    result.energy_used,
                );
                self.last_result = Some(result.clone());
                self.missions_completed += 1;
                let stats = self.stats;
                if let Some(score) = self.current_score_mut() {
                    score.record_mission(result.outcome, stats);
                }
                self.encounter = None;
                self.action_log.append(ActionPayload::MissionCompleted {
                    result: result.clone(),
                });
            }
            None => self.encounter = Some(resolution.state.clone()),
        }
        Ok(resolution)
    }

    pub fn draw_incident(&mut self) -> Option<Incident> {
        let incident = draw_incident(&self.incidents, &mut self.rng);
        self.current_incident = incident.clone();
        self.action_log.append(ActionPayload::DrawIncident);
        incident
    }

    pub fn rest(&mut self) -> PlayerStats {
        self.stats = regenerate_energy(&self.stats);
        let stats = self.stats;
        if let Some(score) = self.current_score_mut() {
            score.stats = stats;
        }
        self.action_log.append(ActionPayload::Rest);
        self.stats
    }

    /// Play as `id`. A returning character picks up the stats they left off
    /// at; a new one joins the roster with starting stats.
    pub fn select_character(&mut self, id: &str) -> Result<CharacterScore, String> {
        if self.encounter.is_some() {
            return Err("An interception is already in progress".to_string());
        }
        let character = find_character(&self.characters, id)
            .ok_or_else(|| format!("Character {} not found", id))?;
        let score = match self.roster.iter().find(|c| c.id == character.id) {
            Some(existing) => existing.clone(),
            None => {
                let joined = CharacterScore::new(character);
                self.roster.push(joined.clone());
                joined
            }
        };
        log::info!("playing as {} ({} points)", score.name, score.total_score);
        self.stats = score.stats;
        self.current_character = Some(score.id.clone());
        self.action_log.append(ActionPayload::SelectCharacter {
            id: score.id.clone(),
        });
        Ok(score)
    }

    /// Roster ordered for the scoring dashboard.
    pub fn leaderboard(&self) -> Vec<CharacterScore> {
        leaderboard(&self.roster)
    }

    fn current_score_mut(&mut self) -> Option<&mut CharacterScore> {
        let id = self.current_character.as_deref()?;
        self.roster.iter_mut().find(|c| c.id == id)
    }

    /// Most recent combat log lines, oldest first.
    pub fn combat_log(&self) -> Vec<String> {
        self.combat_log.iter().cloned().collect()
    }
}
