//! Matcher tunables baked into generated scripts.
//!
//! The same values drive the reference [`Matcher`](crate::Matcher), so a
//! script and the Rust implementation rank identically for one config.
//!
//! # Example YAML
//!
//! ```yaml
//! fuzzy_enabled: true
//! max_candidates: 150
//! min_pattern_length: 2
//! score_threshold: 25
//! max_results: 10
//! cache_max_size: 500
//! ```
//!
//! Missing keys fall back to their defaults.

use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CompletionError, Result};

/// Default for [`CompletionConfig::fuzzy_enabled`].
pub const DEFAULT_FUZZY_ENABLED: bool = true;
/// Default for [`CompletionConfig::max_candidates`].
pub const DEFAULT_MAX_CANDIDATES: usize = 150;
/// Default for [`CompletionConfig::min_pattern_length`].
pub const DEFAULT_MIN_PATTERN_LENGTH: usize = 2;
/// Default for [`CompletionConfig::score_threshold`].
pub const DEFAULT_SCORE_THRESHOLD: u32 = 25;
/// Default for [`CompletionConfig::max_results`].
pub const DEFAULT_MAX_RESULTS: usize = 10;
/// Default for [`CompletionConfig::cache_max_size`].
pub const DEFAULT_CACHE_MAX_SIZE: usize = 500;

/// Tunables for the multi-tier matcher.
///
/// # Examples
///
/// ```
/// use cmdflag_complete::CompletionConfig;
///
/// let config = CompletionConfig::default();
/// assert!(config.fuzzy_enabled);
/// assert_eq!(config.score_threshold, 25);
/// assert!(config.validate().is_ok());
///
/// let strict = CompletionConfig::default().with_fuzzy(false);
/// assert!(!strict.fuzzy_enabled);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompletionConfig {
    /// Whether the fuzzy-score tier runs at all.
    pub fuzzy_enabled: bool,
    /// Candidate lists larger than this only get case-sensitive prefix matching.
    pub max_candidates: usize,
    /// Shortest pattern the fuzzy tier accepts.
    pub min_pattern_length: usize,
    /// Minimum fuzzy score (0-100) a candidate needs to be offered.
    pub score_threshold: u32,
    /// Maximum number of fuzzy results.
    pub max_results: usize,
    /// Score memo size after which the next insert clears the memo.
    pub cache_max_size: usize,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            fuzzy_enabled: DEFAULT_FUZZY_ENABLED,
            max_candidates: DEFAULT_MAX_CANDIDATES,
            min_pattern_length: DEFAULT_MIN_PATTERN_LENGTH,
            score_threshold: DEFAULT_SCORE_THRESHOLD,
            max_results: DEFAULT_MAX_RESULTS,
            cache_max_size: DEFAULT_CACHE_MAX_SIZE,
        }
    }
}

impl CompletionConfig {
    /// Loads a config from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](CompletionError::IoError) if the file cannot be
    /// read, [`YamlError`](CompletionError::YamlError) if parsing fails, or
    /// [`InvalidConfig`](CompletionError::InvalidConfig) if a value is out of
    /// range.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        let config: Self = serde_yaml::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    /// Saves the config as YAML.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = BufWriter::new(file);
        serde_yaml::to_writer(writer, self)?;
        Ok(())
    }

    /// Enables or disables the fuzzy tier.
    pub fn with_fuzzy(mut self, enabled: bool) -> Self {
        self.fuzzy_enabled = enabled;
        self
    }

    /// Checks that every tunable is in range.
    pub fn validate(&self) -> Result<()> {
        if self.max_candidates == 0 {
            return Err(CompletionError::InvalidConfig(
                "max_candidates must be at least 1".to_string(),
            ));
        }
        if self.max_results == 0 {
            return Err(CompletionError::InvalidConfig(
                "max_results must be at least 1".to_string(),
            ));
        }
        if self.score_threshold > 100 {
            return Err(CompletionError::InvalidConfig(format!(
                "score_threshold must be between 0 and 100, got {}",
                self.score_threshold
            )));
        }
        Ok(())
    }
}
