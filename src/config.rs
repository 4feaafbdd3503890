use std::env;
use std::str::FromStr;
use tracing::warn;

use crate::logging::LogFormat;
use crate::meals::meal::IdStrategy;

pub const LOG_ENV_VAR: &str = "MACRO_PLANNER_LOG";
pub const LOG_FORMAT_ENV_VAR: &str = "MACRO_PLANNER_LOG_FORMAT";
pub const ID_STRATEGY_ENV_VAR: &str = "MACRO_PLANNER_ID_STRATEGY";
pub const SUGGESTIONS_ENV_VAR: &str = "MACRO_PLANNER_SUGGESTIONS";

const DEFAULT_LOG_FILTER: &str = "info";

/// Runtime settings, read from the environment (and `.env`) before the CLI flags apply.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub log_filter: String,
    pub log_format: LogFormat,
    pub id_strategy: IdStrategy,
    /// Default number of meal plan alternatives; `None` means one per meal of the day
    pub suggestions: Option<usize>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            log_format: LogFormat::default(),
            id_strategy: IdStrategy::default(),
            suggestions: None,
        }
    }
}

/// Parses `raw` or keeps `default`, warning about the rejected value.
fn parse_or_default<T: FromStr>(var: &str, raw: Option<String>, default: T) -> T {
    match raw {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!(var, value = %raw, "Invalid configuration value, using default");
            default
        }),
    }
}

impl AppConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Create configuration from any key lookup; unset and invalid values keep their defaults.
    pub fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Self {
        let defaults = Self::default();

        let log_filter = lookup(LOG_ENV_VAR)
            .map(|filter| filter.trim().to_string())
            .filter(|filter| !filter.is_empty())
            .unwrap_or(defaults.log_filter);

        let suggestions = match lookup(SUGGESTIONS_ENV_VAR) {
            None => defaults.suggestions,
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(count) if count > 0 => Some(count),
                _ => {
                    warn!(var = SUGGESTIONS_ENV_VAR, value = %raw, "Invalid configuration value, using default");
                    defaults.suggestions
                }
            },
        };

        Self {
            log_filter,
            log_format: parse_or_default(LOG_FORMAT_ENV_VAR, lookup(LOG_FORMAT_ENV_VAR), defaults.log_format),
            id_strategy: parse_or_default(ID_STRATEGY_ENV_VAR, lookup(ID_STRATEGY_ENV_VAR), defaults.id_strategy),
            suggestions,
        }
    }
}
