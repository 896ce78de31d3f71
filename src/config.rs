//! # Configuration Management
//!
//! Centralized configuration for the component codec.
//!
//! The codec itself is stateless; what can be tuned are the limits the bit buffer
//! enforces while messages are encoded into it and decoded out of it.
//!
//! ## Configuration Sources
//! - TOML files via `from_file()`
//! - TOML strings via `from_toml()`
//! - Environment variables via `from_env()`
//! - Direct instantiation with defaults
//!
//! ## Limits
//! - `max_buffer_bytes` caps how large an encoded message may grow
//! - `max_string_length` caps a single string field, on write and on read

use crate::error::{constants, CodecError, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Largest message the 16-bit size field of the wire protocol can describe, in bits
pub const MAX_MESSAGE_BITS: usize = u16::MAX as usize;

/// Default buffer capacity: `MAX_MESSAGE_BITS` rounded up to whole bytes
pub const DEFAULT_MAX_BUFFER_BYTES: usize = (MAX_MESSAGE_BITS + 7) / 8;

/// Default maximum length of a single string field, in bytes (terminator excluded)
pub const DEFAULT_MAX_STRING_LENGTH: usize = 1024;

/// Default upper bound on the element count of an array component
pub const DEFAULT_ARRAY_MAX_COUNT: u32 = 65535;

/// Top-level codec configuration
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
pub struct CodecConfig {
    /// Bit buffer limits
    #[serde(default)]
    pub stream: StreamConfig,
}

impl CodecConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut file = File::open(path).map_err(|e| {
            CodecError::ConfigError(format!("{}: {e}", constants::ERR_CONFIG_OPEN))
        })?;

        let mut contents = String::new();
        file.read_to_string(&mut contents).map_err(|e| {
            CodecError::ConfigError(format!("{}: {e}", constants::ERR_CONFIG_READ))
        })?;

        debug!(path = %path.display(), "loading codec configuration");
        Self::from_toml(&contents)
    }

    /// Load configuration from TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str::<Self>(content).map_err(|e| {
            CodecError::ConfigError(format!("{}: {e}", constants::ERR_CONFIG_PARSE))
        })
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(bytes) = std::env::var("MESSAGE_COMPONENTS_MAX_BUFFER_BYTES") {
            let val = bytes.parse::<usize>().map_err(|e| {
                CodecError::ConfigError(format!(
                    "Invalid MESSAGE_COMPONENTS_MAX_BUFFER_BYTES '{bytes}': {e}"
                ))
            })?;
            config.stream.max_buffer_bytes = val;
        }

        if let Ok(len) = std::env::var("MESSAGE_COMPONENTS_MAX_STRING_LENGTH") {
            let val = len.parse::<usize>().map_err(|e| {
                CodecError::ConfigError(format!(
                    "Invalid MESSAGE_COMPONENTS_MAX_STRING_LENGTH '{len}': {e}"
                ))
            })?;
            config.stream.max_string_length = val;
        }

        Ok(config)
    }

    /// Apply overrides to the default configuration
    pub fn default_with_overrides<F>(mutator: F) -> Self
    where
        F: FnOnce(&mut Self),
    {
        let mut config = Self::default();
        mutator(&mut config);
        config
    }

    /// Generate example configuration file content
    pub fn example_config() -> String {
        toml::to_string_pretty(&Self::default())
            .unwrap_or_else(|_| String::from("# Failed to generate example config"))
    }

    /// Save configuration to a file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self).map_err(|e| {
            CodecError::ConfigError(format!("{}: {e}", constants::ERR_CONFIG_SERIALIZE))
        })?;

        std::fs::write(path, content).map_err(|e| {
            CodecError::ConfigError(format!("{}: {e}", constants::ERR_CONFIG_WRITE))
        })?;

        Ok(())
    }

    /// Validate the configuration for common issues and misconfigurations
    ///
    /// Returns a list of validation errors. Empty list means configuration is valid.
    pub fn validate(&self) -> Vec<String> {
        self.stream.validate()
    }

    /// Validate and return Result - convenience method
    pub fn validate_strict(&self) -> Result<()> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(CodecError::ConfigError(format!(
                "Configuration validation failed:\n  - {}",
                errors.join("\n  - ")
            )))
        }
    }
}

/// Bit buffer limits
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct StreamConfig {
    /// Maximum number of bytes a buffer may hold
    pub max_buffer_bytes: usize,

    /// Maximum length of a single string field in bytes, terminator excluded
    pub max_string_length: usize,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            max_buffer_bytes: DEFAULT_MAX_BUFFER_BYTES,
            max_string_length: DEFAULT_MAX_STRING_LENGTH,
        }
    }
}

impl StreamConfig {
    /// Validate stream configuration
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.max_buffer_bytes == 0 {
            errors.push("Max buffer size cannot be 0".to_string());
        } else if self.max_buffer_bytes > 64 * 1024 * 1024 {
            errors.push(format!(
                "Max buffer size too large: {} bytes (maximum: 64 MB)",
                self.max_buffer_bytes
            ));
        }

        if self.max_string_length == 0 {
            errors.push("Max string length cannot be 0".to_string());
        } else if self.max_string_length >= self.max_buffer_bytes {
            // A string also needs its terminator byte.
            errors.push(format!(
                "Max string length {} does not fit in a buffer of {} bytes",
                self.max_string_length, self.max_buffer_bytes
            ));
        }

        errors
    }

    /// Buffer capacity in bits
    pub fn max_buffer_bits(&self) -> usize {
        self.max_buffer_bytes.saturating_mul(8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = CodecConfig::default();
        assert!(config.validate().is_empty());
        assert_eq!(config.stream.max_buffer_bytes, 8192);
        assert_eq!(config.stream.max_buffer_bits(), 65536);
    }

    #[test]
    #[allow(clippy::expect_used)]
    fn test_empty_toml_uses_defaults() {
        let config = CodecConfig::from_toml("").expect("empty document is valid");
        assert_eq!(config, CodecConfig::default());
    }

    #[test]
    fn test_string_longer_than_buffer_rejected() {
        let config = CodecConfig::default_with_overrides(|c| {
            c.stream.max_buffer_bytes = 16;
            c.stream.max_string_length = 16;
        });
        assert_eq!(config.validate().len(), 1);
        assert!(config.validate_strict().is_err());
    }
}
