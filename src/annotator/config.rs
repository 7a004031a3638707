use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_CUTOFF: u32 = 10;
pub const DEFAULT_EXTENSION: i64 = 0;
pub const DEFAULT_BP_THRESHOLD: u64 = 17_000;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Extension must be zero or positive, got {0}")]
    NegativeExtension(i64),

    #[error("bp_threshold must be greater than zero")]
    ZeroThreshold,
}

/// Settings for one annotation run.
///
/// Construct with [`AnnotatorConfig::default`] and adjust with the `with_*`
/// setters. [`AnnotatorConfig::validate`] is run by the annotator before any
/// interval is touched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotatorConfig {
    /// Minimum depth counted towards completeness
    pub cutoff: u32,

    /// Bases added to both ends of every interval
    pub extension: i64,

    /// Prepended to contig names by the interval reader
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub contig_prefix: String,

    /// Largest span, in bases, fetched from the store in one query
    pub bp_threshold: u64,
}

impl Default for AnnotatorConfig {
    fn default() -> Self {
        Self {
            cutoff: DEFAULT_CUTOFF,
            extension: DEFAULT_EXTENSION,
            contig_prefix: String::new(),
            bp_threshold: DEFAULT_BP_THRESHOLD,
        }
    }
}

impl AnnotatorConfig {
    #[must_use]
    pub fn with_cutoff(mut self, cutoff: u32) -> Self {
        self.cutoff = cutoff;
        self
    }

    #[must_use]
    pub fn with_extension(mut self, extension: i64) -> Self {
        self.extension = extension;
        self
    }

    #[must_use]
    pub fn with_contig_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.contig_prefix = prefix.into();
        self
    }

    #[must_use]
    pub fn with_bp_threshold(mut self, bp_threshold: u64) -> Self {
        self.bp_threshold = bp_threshold;
        self
    }

    /// # Errors
    ///
    /// Returns `ConfigError::NegativeExtension` for a negative extension or
    /// `ConfigError::ZeroThreshold` when `bp_threshold` is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.extension_bases()?;
        if self.bp_threshold == 0 {
            return Err(ConfigError::ZeroThreshold);
        }
        Ok(())
    }

    /// The extension as an unsigned base count.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NegativeExtension` if the extension is negative.
    pub fn extension_bases(&self) -> Result<u64, ConfigError> {
        u64::try_from(self.extension).map_err(|_| ConfigError::NegativeExtension(self.extension))
    }
}
