use rocket::serde::{Deserialize, Serialize};
use rocket_okapi::JsonSchema;

/// Highest value player health and energy can reach.
pub const PLAYER_MAX: u32 = 100;

/// The four spells the player can cast during an interception.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde", rename_all = "lowercase")]
pub enum SpellType {
    Attack,
    Shield,
    Bind,
    Drain,
}

impl SpellType {
    pub fn all() -> [SpellType; 4] {
        [
            SpellType::Attack,
            SpellType::Shield,
            SpellType::Bind,
            SpellType::Drain,
        ]
    }

    /// Energy deducted when the spell is cast.
    pub fn cost(self) -> u32 {
        match self {
            SpellType::Attack => 20,
            SpellType::Shield => 15,
            SpellType::Bind => 25,
            SpellType::Drain => 30,
        }
    }

    /// Damage dealt to an enemy, depending on whether the spell hits its weakness.
    pub fn damage(self, hits_weakness: bool) -> u32 {
        match (self, hits_weakness) {
            (SpellType::Attack, true) => 40,
            (SpellType::Attack, false) => 25,
            (SpellType::Shield, _) => 0,
            (SpellType::Bind, true) => 20,
            (SpellType::Bind, false) => 0,
            (SpellType::Drain, true) => 35,
            (SpellType::Drain, false) => 20,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SpellType::Attack => "Attack",
            SpellType::Shield => "Shield",
            SpellType::Bind => "Bind",
            SpellType::Drain => "Drain",
        }
    }
}

/// An enemy template. Encounters own a copy so catalog entries are never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde")]
pub struct Enemy {
    pub name: String,
    pub max_health: u32,
    pub health: u32,
    pub weakness: SpellType,
    /// Telegraphed attack label; cosmetic only.
    pub next_move: String,
}

impl Enemy {
    pub fn new(name: &str, max_health: u32, weakness: SpellType, next_move: &str) -> Self {
        Enemy {
            name: name.to_string(),
            max_health,
            health: max_health,
            weakness,
            next_move: next_move.to_string(),
        }
    }

    pub fn is_defeated(&self) -> bool {
        self.health == 0
    }
}

/// Snapshot of one interception encounter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde")]
pub struct CombatState {
    pub player_health: u32,
    pub player_energy: u32,
    pub enemy: Enemy,
    pub shield_active: bool,
    pub enemy_bound: bool,
    pub turn: u32,
    pub is_player_turn: bool,
}

impl CombatState {
    /// Fresh encounter against a copy of `enemy`.
    pub fn new(enemy: Enemy) -> Self {
        CombatState {
            player_health: PLAYER_MAX,
            player_energy: PLAYER_MAX,
            enemy,
            shield_active: false,
            enemy_bound: false,
            turn: 1,
            is_player_turn: true,
        }
    }

    /// Restart the encounter against the same enemy at full health.
    pub fn reset(&mut self) {
        let mut enemy = self.enemy.clone();
        enemy.health = enemy.max_health;
        *self = CombatState::new(enemy);
    }

    pub fn can_cast(&self, spell: SpellType) -> bool {
        self.is_player_turn && !self.is_terminal() && self.player_energy >= spell.cost()
    }

    pub fn is_victory(&self) -> bool {
        self.enemy.is_defeated()
    }

    pub fn is_defeat(&self) -> bool {
        self.player_health == 0
    }

    pub fn is_terminal(&self) -> bool {
        self.is_victory() || self.is_defeat()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde", rename_all = "lowercase")]
pub enum MissionOutcome {
    Clean,
    Partial,
    Failed,
}

/// Result record handed to the progression system once an encounter ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde")]
pub struct MissionResult {
    pub outcome: MissionOutcome,
    pub alignment_change: i32,
    pub energy_used: u32,
    pub control_gained: i32,
    pub story_consequence: String,
}

/// What happened during a resolution step, in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde", tag = "event_type")]
pub enum CombatEvent {
    SpellCast {
        spell: SpellType,
        damage: u32,
        healed: u32,
    },
    ShieldRaised,
    EnemyBound {
        damage: u32,
    },
    EnemySkipped,
    AttackBlocked,
    EnemyHit {
        enemy: String,
        move_name: String,
        damage: u32,
    },
    Victory {
        enemy: String,
    },
    Defeat,
}

impl CombatEvent {
    /// Human-readable combat log line.
    pub fn describe(&self) -> String {
        match self {
            CombatEvent::SpellCast {
                spell: SpellType::Drain,
                damage,
                healed,
            } => format!("Drain spell! Dealt {damage} damage, healed {healed} HP."),
            CombatEvent::SpellCast { spell, damage, .. } => {
                format!("You cast {}! Dealt {damage} damage.", spell.name())
            }
            CombatEvent::ShieldRaised => "Shield activated! Next attack blocked.".to_string(),
            CombatEvent::EnemyBound { damage: 0 } => "Enemy bound for 1 turn!".to_string(),
            CombatEvent::EnemyBound { damage } => {
                format!("Bind spell! Enemy immobilized and took {damage} damage.")
            }
            CombatEvent::EnemySkipped => "Enemy is bound and cannot act!".to_string(),
            CombatEvent::AttackBlocked => "Shield blocked the attack!".to_string(),
            CombatEvent::EnemyHit {
                enemy,
                move_name,
                damage,
            } => format!("{enemy} used {move_name}! Took {damage} damage."),
            CombatEvent::Victory { enemy } => format!("{enemy} has been neutralized."),
            CombatEvent::Defeat => "You have been overwhelmed.".to_string(),
        }
    }
}

/// Output of one resolver call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde")]
pub struct Resolution {
    pub state: CombatState,
    pub events: Vec<CombatEvent>,
    /// Present only when the encounter reached a terminal condition.
    pub result: Option<MissionResult>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_restores_a_fresh_encounter() {
        let mut state = CombatState::new(Enemy::new("Void Stalker", 60, SpellType::Attack, "Phase Shift"));
        state.enemy.health = 5;
        state.player_health = 12;
        state.player_energy = 0;
        state.shield_active = true;
        state.turn = 7;
        state.is_player_turn = false;
        state.reset();
        assert_eq!(
            state,
            CombatState::new(Enemy::new("Void Stalker", 60, SpellType::Attack, "Phase Shift"))
        );
    }

    #[test]
    fn weakness_only_boosts_damaging_spells() {
        assert_eq!(SpellType::Shield.damage(true), 0);
        assert_eq!(SpellType::Bind.damage(false), 0);
        assert_eq!(SpellType::Drain.damage(true), 35);
    }

    #[test]
    fn log_lines_name_the_enemy_move() {
        let line = CombatEvent::EnemyHit {
            enemy: "Shadow Wraith".to_string(),
            move_name: "Shadow Strike".to_string(),
            damage: 23,
        }
        .describe();
        assert_eq!(line, "Shadow Wraith used Shadow Strike! Took 23 damage.");
    }
}
