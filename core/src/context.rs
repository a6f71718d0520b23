//! Data handed to the host after every key.
//!
//! The host reads `ImeContext` after `process_key()`: the whole field text
//! and cursor, which part of it is still provisional, what became final, and
//! the label for the language key. Nothing here calls back into the host.

/// Kind of field the keyboard is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputPurpose {
    /// Free-form text input (default)
    #[default]
    FreeForm,
    /// Email address
    Email,
    /// URL
    Url,
    /// Password (never composes)
    Password,
    /// Number input
    Number,
}

impl InputPurpose {
    /// Whether native-script composition may run for this kind of field.
    ///
    /// Only free-form fields compose; everything else takes literal keys.
    pub fn allows_composition(self) -> bool {
        matches!(self, Self::FreeForm)
    }
}

/// Keyboard state as seen by the host.
///
/// # Fields
///
/// - `text`: Full text of the focused field, including the preedit syllable
/// - `cursor`: Cursor position within `text` (byte offset)
/// - `preedit_text`: Syllable still being composed (displayed with underline)
/// - `commit_text`: Characters finalized by the last key (consume and clear)
/// - `auxiliary_text`: Language indicator for the keyboard's mode key
/// - `input_purpose`: Hint about what kind of input is expected
#[derive(Debug, Clone, Default)]
pub struct ImeContext {
    /// Text of the focused field
    pub text: String,

    /// Cursor position within text (byte offset)
    pub cursor: usize,

    /// Provisional syllable being composed
    pub preedit_text: String,

    /// Text finalized by the most recent key
    pub commit_text: String,

    /// Auxiliary text for UI hints (current language label)
    pub auxiliary_text: String,

    /// Kind of field being edited
    pub input_purpose: InputPurpose,
}

impl ImeContext {
    /// Create a new empty IME context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all display state (text, preedit, auxiliary).
    /// Does NOT clear commit_text (platform should consume it first).
    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
        self.preedit_text.clear();
        self.auxiliary_text.clear();
    }

    /// Take the commit text, leaving it empty.
    pub fn take_commit(&mut self) -> String {
        std::mem::take(&mut self.commit_text)
    }

    /// Check if a syllable is currently being composed.
    pub fn has_preedit(&self) -> bool {
        !self.preedit_text.is_empty()
    }

    /// Check if there's text to commit.
    pub fn has_commit(&self) -> bool {
        !self.commit_text.is_empty()
    }

    /// Set the input purpose.
    pub fn set_input_purpose(&mut self, purpose: InputPurpose) {
        self.input_purpose = purpose;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_keeps_commit() {
        let mut ctx = ImeContext::new();
        ctx.text = "한".to_string();
        ctx.preedit_text = "한".to_string();
        ctx.commit_text = "가".to_string();
        ctx.auxiliary_text = "한".to_string();

        ctx.clear();
        assert!(ctx.text.is_empty());
        assert!(!ctx.has_preedit());
        assert!(ctx.auxiliary_text.is_empty());
        assert!(ctx.has_commit());

        assert_eq!(ctx.take_commit(), "가");
        assert!(!ctx.has_commit());
    }

    #[test]
    fn test_purpose_composition() {
        assert!(InputPurpose::FreeForm.allows_composition());
        assert!(!InputPurpose::Password.allows_composition());
        assert!(!InputPurpose::Email.allows_composition());
        assert_eq!(InputPurpose::default(), InputPurpose::FreeForm);
    }
}
