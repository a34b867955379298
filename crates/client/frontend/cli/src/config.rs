//! CLI-specific presentation settings.
use std::env;

/// Terminal output configuration.
#[derive(Clone, Debug)]
pub struct CliConfig {
    /// Print individual dice next to totals.
    pub show_rolls: bool,
    /// Print every initiative roll, not just the resulting order.
    pub show_initiative: bool,
    /// Print the roster with HP before each prompt.
    pub show_status: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            show_rolls: true,
            show_initiative: true,
            show_status: true,
        }
    }
}

impl CliConfig {
    /// Construct CLI configuration from environment variables.
    ///
    /// Environment variables:
    /// - `CLI_SHOW_ROLLS` - Individual dice (default: true)
    /// - `CLI_SHOW_INITIATIVE` - Initiative rolls (default: true)
    /// - `CLI_SHOW_STATUS` - Roster before prompts (default: true)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(show) = read_env_bool("CLI_SHOW_ROLLS") {
            config.show_rolls = show;
        }
        if let Some(show) = read_env_bool("CLI_SHOW_INITIATIVE") {
            config.show_initiative = show;
        }
        if let Some(show) = read_env_bool("CLI_SHOW_STATUS") {
            config.show_status = show;
        }

        config
    }
}

fn read_env_bool(key: &str) -> Option<bool> {
    let value = env::var(key).ok()?;
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
