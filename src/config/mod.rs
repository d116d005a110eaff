//! Configuration APIs
//!
//! Configuration types implement [`Config`], which covers validation,
//! initialization from environment variables and JSON persistence.
//!
//! ```rust
//! use huffwire::config::{CodecConfig, Config};
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Reads HUFFWIRE_CODEC_VALUE_CAPACITY and HUFFWIRE_CODEC_MAX_VALUE_LEN when set
//! let config = CodecConfig::from_env()?;
//! config.validate()?;
//! # Ok(())
//! # }
//! ```
//!
//! The prefix-code table weights are deliberately not configurable: they define
//! the wire format.

use crate::error::Result;
use std::env;
use std::fmt;
use std::path::Path;

pub mod codec;

pub use codec::{CodecConfig, MAX_VALUE_CAPACITY};

/// Common configuration trait
pub trait Config: Clone + fmt::Debug {
    /// Validate the configuration for correctness and consistency.
    fn validate(&self) -> Result<()>;

    /// Initialize configuration from environment variables with the `HUFFWIRE_` prefix.
    fn from_env() -> Result<Self>
    where
        Self: Default,
    {
        Self::from_env_with_prefix("HUFFWIRE_")
    }

    /// Initialize configuration from environment variables with a custom prefix.
    ///
    /// Unset or unparsable variables keep their default values.
    fn from_env_with_prefix(prefix: &str) -> Result<Self>
    where
        Self: Default;

    /// Save configuration to a JSON file.
    fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()>;

    /// Load and validate configuration from a JSON file.
    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self>;
}

/// Parse an environment variable, falling back to `default`.
pub fn parse_env_var<T>(var_name: &str, default: T) -> T
where
    T: std::str::FromStr + Clone,
{
    env::var(var_name)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

/// Parse an optional environment variable.
///
/// `none`, `off` and the empty string (case-insensitive) clear the value;
/// anything unparsable keeps `default`.
pub fn parse_env_opt<T>(var_name: &str, default: Option<T>) -> Option<T>
where
    T: std::str::FromStr,
{
    match env::var(var_name) {
        Ok(s) => {
            let s = s.trim();
            if s.is_empty() || s.eq_ignore_ascii_case("none") || s.eq_ignore_ascii_case("off") {
                None
            } else {
                match s.parse() {
                    Ok(v) => Some(v),
                    Err(_) => default,
                }
            }
        }
        Err(_) => default,
    }
}
