//! Hangul-specific configuration that extends the base `Config` from core.
//!
//! This configuration includes:
//! - All generic options from `vkeyboard_core::Config` (flattened via serde)
//! - The key layout used to resolve character keys
//! - Whether final clusters (ㄺ, ㅄ, ...) are composed
//!
//! # Example
//!
//! ```rust
//! use libhangul::HangulConfig;
//!
//! let config = HangulConfig::from_toml_str("compound_finals = true\n").unwrap();
//! assert!(config.compound_finals);
//! assert_eq!(config.base().native_label, "한");
//! ```
use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::layout::KeyboardLayout;

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct HangulConfig {
    /// Base configuration fields (mode, labels, normalization)
    #[serde(flatten)]
    pub base: vkeyboard_core::Config,

    /// Layout for character keys
    pub layout: KeyboardLayout,

    /// Stack a second consonant onto a final (ㄹ + ㄱ = ㄺ).
    /// Off by default: each final holds a single consonant.
    pub compound_finals: bool,
}

impl HangulConfig {
    /// Convert this config into the base config used by the engine.
    pub fn into_base(self) -> vkeyboard_core::Config {
        self.base
    }

    /// Get a reference to the base config
    pub fn base(&self) -> &vkeyboard_core::Config {
        &self.base
    }

    /// Get a mutable reference to the base config
    pub fn base_mut(&mut self) -> &mut vkeyboard_core::Config {
        &mut self.base
    }

    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<std::path::Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_toml_str(&content).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Save configuration to a TOML file.
    pub fn save_toml<P: AsRef<std::path::Path>>(&self, path: P) -> anyhow::Result<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_toml_string()?)
            .with_context(|| format!("writing config {}", path.display()))
    }

    /// Load configuration from TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Serialize configuration to TOML string.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
