use std::path::PathBuf;

/// Session settings read from the environment. Server settings (port, address)
/// come from Rocket's own `ROCKET_*` configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameConfig {
    /// `GAME_SEED`: fixed RNG seed; a random one is used when unset.
    pub seed: Option<u64>,
    /// `ACTION_LOG_FILE`: JSON-lines file the action log is replayed from and appended to.
    pub action_log_file: Option<PathBuf>,
}

impl GameConfig {
    pub fn from_env() -> Self {
        let seed = match std::env::var("GAME_SEED") {
            Ok(raw) => match raw.trim().parse::<u64>() {
                Ok(seed) => Some(seed),
                Err(e) => {
                    log::warn!("ignoring GAME_SEED={:?}: {}", raw, e);
                    None
                }
            },
            Err(_) => None,
        };
        let action_log_file = std::env::var("ACTION_LOG_FILE")
            .ok()
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);
        GameConfig {
            seed,
            action_log_file,
        }
    }
}
