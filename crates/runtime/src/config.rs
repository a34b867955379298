//! Runtime configuration loaded from the environment.

use std::env;
use std::str::FromStr;

use game_core::GameConfig;

/// Runtime configuration shared by the runner and its providers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub game_config: GameConfig,
    /// Fixed seed, or `None` for a fresh random one chosen by the caller.
    pub seed: Option<u64>,
    /// Capacity of each event broadcast channel.
    pub event_buffer_size: usize,
    /// Pending prompts the human provider may queue.
    pub choice_buffer_size: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            game_config: GameConfig::default(),
            seed: None,
            event_buffer_size: 100,
            choice_buffer_size: 1,
        }
    }
}

impl RuntimeConfig {
    /// Overrides fields from process environment variables.
    ///
    /// Environment variables:
    /// - `ENCOUNTER_SEED` - Dice seed (default: random)
    /// - `ENCOUNTER_MAX_ROUNDS` - Round limit (default: 50)
    /// - `EVENT_CHANNEL_CAPACITY` - Broadcast buffer and narration feed size (default: 100)
    /// - `CHOICE_BUFFER` - Queued human prompts (default: 1)
    ///
    /// Unset or malformed variables leave the field as it was.
    pub fn overlay_env(self) -> Self {
        let mut config = self;

        if let Some(seed) = read_env::<u64>("ENCOUNTER_SEED") {
            config.seed = Some(seed);
        }
        if let Some(rounds) = read_env::<u32>("ENCOUNTER_MAX_ROUNDS") {
            config.game_config = GameConfig::with_max_rounds(rounds);
        }
        if let Some(capacity) = read_env::<usize>("EVENT_CHANNEL_CAPACITY") {
            config.event_buffer_size = capacity.max(1);
        }
        if let Some(capacity) = read_env::<usize>("CHOICE_BUFFER") {
            config.choice_buffer_size = capacity.max(1);
        }

        config
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_game_config(mut self, game_config: GameConfig) -> Self {
        self.game_config = game_config;
        self
    }
}

/// Reads and parses an environment variable, ignoring unset or malformed values.
pub fn read_env<T: FromStr>(key: &str) -> Option<T> {
    let value = env::var(key).ok()?;
    match value.trim().parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            tracing::warn!(
                target: "runtime::config",
                key,
                value = %value,
                "ignoring malformed value"
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_game_rules() {
        let config = RuntimeConfig::default();
        assert_eq!(config.game_config.max_rounds, GameConfig::DEFAULT_MAX_ROUNDS);
        assert_eq!(config.seed, None);
        assert!(config.choice_buffer_size >= 1);
    }

    #[test]
    fn unset_variables_read_as_none() {
        assert_eq!(read_env::<u64>("RUNTIME_TEST_SURELY_UNSET_VARIABLE"), None);
    }

    #[test]
    fn environment_overlays_the_given_base() {
        let base = RuntimeConfig::default()
            .with_seed(5)
            .with_game_config(GameConfig::with_max_rounds(12));
        let config = base.clone().overlay_env();
        if env::var("ENCOUNTER_SEED").is_err() {
            assert_eq!(config.seed, Some(5));
        }
        if env::var("ENCOUNTER_MAX_ROUNDS").is_err() {
            assert_eq!(config.game_config, base.game_config);
        }
    }
}
