//! vkeyboard-core
//!
//! Language-agnostic building blocks for on-screen keyboard input methods,
//! shared by script-specific crates (libhangul).
//!
//! Public API:
//! - `TextBuffer` / `InputBuffer` - Splice interface and cursor-aware field text
//! - `ImeContext` - Plain data the platform reads after each key
//! - `ImeSession` / `InputMode` - Field text and language mode
//! - `Editor` - Trait implemented by native-script composers
//! - `ImeEngine` - Key router tying session, editor and context together
//! - `Config` - Configuration with TOML persistence
use anyhow::Context as _;
use serde::{Deserialize, Serialize};

pub mod input_buffer;
pub use input_buffer::{InputBuffer, TextBuffer};

pub mod context;
pub use context::{ImeContext, InputPurpose};

pub mod session;
pub use session::{ImeSession, InputMode};

pub mod editor;
pub use editor::{Editor, EditorResult};

pub mod ime_engine;
pub use ime_engine::{ImeEngine, KeyEvent, KeyResult};

/// Generic configuration for keyboard core functionality.
///
/// This config contains only language-agnostic fields. Script-specific
/// options (key layouts, composition rules) belong in the configs of the
/// respective crates, which flatten this struct.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Mode the keyboard starts in
    pub default_mode: InputMode,

    /// Label shown on the language key while in native mode
    pub native_label: String,
    /// Label shown on the language key while in Latin mode
    pub latin_label: String,

    /// NFC-normalize field text when the keyboard is bound to a field.
    /// Stored text may hold conjoining jamo that would otherwise not
    /// interact with composed syllables.
    pub normalize_focus_text: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_mode: InputMode::Native,
            native_label: "한".to_string(),
            latin_label: "A".to_string(),
            normalize_focus_text: true,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<std::path::Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config = toml::from_str(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(config)
    }

    /// Save configuration to a TOML file.
    pub fn save_toml<P: AsRef<std::path::Path>>(&self, path: P) -> anyhow::Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("writing config {}", path.display()))?;
        Ok(())
    }

    /// Load configuration from TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Serialize configuration to TOML string.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Label for the language key in `mode`.
    pub fn label_for(&self, mode: InputMode) -> &str {
        match mode {
            InputMode::Native => &self.native_label,
            InputMode::Latin => &self.latin_label,
        }
    }
}

/// Utility helpers.
pub mod utils {
    /// Normalize text to NFC.
    ///
    /// Conjoining jamo sequences (U+1100..) fold into precomposed syllables.
    pub fn normalize(s: &str) -> String {
        use unicode_normalization::UnicodeNormalization;
        s.nfc().collect::<String>()
    }

    /// Check whether text is already in NFC.
    pub fn is_normalized(s: &str) -> bool {
        unicode_normalization::is_nfc(s)
    }
}
