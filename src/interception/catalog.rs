use super::rng::CombatRng;
use super::types::{CombatState, Enemy, SpellType};

/// The enemies an interception can draw.
pub fn enemy_catalog() -> Vec<Enemy> {
    vec![
        Enemy::new("Shadow Wraith", 80, SpellType::Bind, "Shadow Strike"),
        Enemy::new("Corrupted Elemental", 100, SpellType::Drain, "Energy Burst"),
        Enemy::new("Void Stalker", 60, SpellType::Attack, "Phase Shift"),
    ]
}

/// Look up a catalog entry by name, case-insensitively.
pub fn find_enemy<'a>(catalog: &'a [Enemy], name: &str) -> Option<&'a Enemy> {
    catalog
        .iter()
        .find(|enemy| enemy.name.eq_ignore_ascii_case(name))
}

/// Begin an encounter against an enemy drawn uniformly from `catalog`.
pub fn start<R: CombatRng + ?Sized>(catalog: &[Enemy], rng: &mut R) -> Result<CombatState, String> {
    if catalog.is_empty() {
        return Err("Enemy catalog is empty".to_string());
    }
    let idx = rng.pick(catalog.len());
    let enemy = catalog
        .get(idx)
        .ok_or_else(|| format!("Enemy index {idx} out of range"))?;
    Ok(CombatState::new(enemy.clone()))
}
