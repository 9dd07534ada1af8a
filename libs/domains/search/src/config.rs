use core_config::{ConfigError, FromEnv, env_parse_or};

use crate::render::MetadataEscaping;

/// Matches requested per query unless overridden
pub const DEFAULT_TOP_K: u32 = 10;

/// Query pipeline settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSettings {
    pub top_k: u32,
    pub escaping: MetadataEscaping,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            escaping: MetadataEscaping::Escape,
        }
    }
}

impl FromEnv for SearchSettings {
    /// - SEARCH_TOP_K: defaults to 10, must be at least 1
    /// - SEARCH_TRUSTED_METADATA: `true` inserts metadata without escaping
    fn from_env() -> Result<Self, ConfigError> {
        let top_k: u32 = env_parse_or("SEARCH_TOP_K", DEFAULT_TOP_K)?;
        if top_k == 0 {
            return Err(ConfigError::ParseError {
                key: "SEARCH_TOP_K".to_string(),
                details: "must be at least 1".to_string(),
            });
        }

        let trusted: bool = env_parse_or("SEARCH_TRUSTED_METADATA", false)?;
        let escaping = if trusted {
            MetadataEscaping::Trusted
        } else {
            MetadataEscaping::Escape
        };

        Ok(Self { top_k, escaping })
    }
}
