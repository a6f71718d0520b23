//! Keyboard session management.
//!
//! The `ImeSession` struct owns the state that outlives a single key event:
//! the text of the focused field and the language mode the keyboard is in.

use serde::{Deserialize, Serialize};

use crate::context::ImeContext;
use crate::input_buffer::InputBuffer;

/// Current input mode of the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputMode {
    /// Native-script composition (e.g. Hangul)
    #[default]
    Native,
    /// Latin letters inserted literally
    Latin,
}

impl InputMode {
    /// The other mode.
    pub fn toggled(self) -> Self {
        match self {
            Self::Native => Self::Latin,
            Self::Latin => Self::Native,
        }
    }
}

/// Session state shared by the engine and its editor.
///
/// The session is separate from the editor: the editor holds composition
/// state, while the session holds what the user sees in the field.
#[derive(Debug, Clone, Default)]
pub struct ImeSession {
    /// Text of the focused field
    input_buffer: InputBuffer,

    /// Current input mode
    mode: InputMode,
}

impl ImeSession {
    /// Create a new empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty session starting in `mode`.
    pub fn with_mode(mode: InputMode) -> Self {
        Self {
            input_buffer: InputBuffer::new(),
            mode,
        }
    }

    /// Get the input buffer.
    pub fn input_buffer(&self) -> &InputBuffer {
        &self.input_buffer
    }

    /// Get a mutable reference to the input buffer.
    pub fn input_buffer_mut(&mut self) -> &mut InputBuffer {
        &mut self.input_buffer
    }

    /// Get the current input mode.
    pub fn mode(&self) -> InputMode {
        self.mode
    }

    /// Set the input mode.
    pub fn set_mode(&mut self, mode: InputMode) {
        self.mode = mode;
    }

    /// Clear the field text. The mode is kept.
    pub fn clear(&mut self) {
        self.input_buffer.clear();
    }

    /// Sync session state to an ImeContext for platform communication.
    ///
    /// `preedit` is the provisional text reported by the active editor.
    pub fn sync_to_context(&self, context: &mut ImeContext, preedit: Option<String>) {
        context.text.clear();
        context.text.push_str(self.input_buffer.text());
        context.cursor = self.input_buffer.cursor();
        context.preedit_text = preedit.unwrap_or_default();
    }
}
