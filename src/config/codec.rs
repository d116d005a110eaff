//! Decoder-side configuration for the value codec.

use super::{parse_env_opt, parse_env_var, Config};
use crate::error::{HuffwireError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Largest accepted `value_capacity`
pub const MAX_VALUE_CAPACITY: usize = 1 << 20;

/// Codec configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Initial capacity of the buffer a text value is decoded into
    pub value_capacity: usize,
    /// Longest text value the decoder accepts; `None` means unlimited
    pub max_value_len: Option<usize>,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            value_capacity: 16,
            max_value_len: None,
        }
    }
}

impl CodecConfig {
    /// Configuration that rejects text values longer than `limit` bytes
    pub fn limited(limit: usize) -> Self {
        Self {
            value_capacity: limit.min(16),
            max_value_len: Some(limit),
        }
    }

    /// Capacity to reserve for a decoded text value, never above `max_value_len`
    pub fn initial_capacity(&self) -> usize {
        match self.max_value_len {
            Some(limit) => self.value_capacity.min(limit),
            None => self.value_capacity,
        }
    }
}

impl Config for CodecConfig {
    fn validate(&self) -> Result<()> {
        if self.max_value_len == Some(0) {
            return Err(HuffwireError::configuration(
                "max_value_len must be at least 1 when set",
            ));
        }
        if self.value_capacity > MAX_VALUE_CAPACITY {
            return Err(HuffwireError::configuration(format!(
                "value_capacity {} exceeds {}",
                self.value_capacity, MAX_VALUE_CAPACITY
            )));
        }
        Ok(())
    }

    fn from_env_with_prefix(prefix: &str) -> Result<Self> {
        let mut config = Self::default();
        config.value_capacity =
            parse_env_var(&format!("{}CODEC_VALUE_CAPACITY", prefix), config.value_capacity);
        config.max_value_len =
            parse_env_opt(&format!("{}CODEC_MAX_VALUE_LEN", prefix), config.max_value_len);
        config.validate()?;
        Ok(config)
    }

    fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let serialized = serde_json::to_string_pretty(self).map_err(|e| {
            HuffwireError::configuration(format!("Failed to serialize codec config: {}", e))
        })?;
        std::fs::write(path, serialized).map_err(|e| {
            HuffwireError::configuration(format!("Failed to write codec config file: {}", e))
        })?;
        Ok(())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            HuffwireError::configuration(format!("Failed to read codec config file: {}", e))
        })?;
        let config: Self = serde_json::from_str(&content).map_err(|e| {
            HuffwireError::configuration(format!("Failed to parse codec config file: {}", e))
        })?;
        config.validate()?;
        Ok(config)
    }
}
