//! Keyboard engine with session management and key event processing.
//!
//! The `ImeEngine` owns the focused field's session and a native-script
//! [`Editor`], providing a `process_key()` method that routes key events
//! according to the current language mode and keeps the [`ImeContext`] in
//! sync for the platform.

use tracing::{debug, trace};

use crate::context::{ImeContext, InputPurpose};
use crate::editor::{Editor, EditorResult};
use crate::session::{ImeSession, InputMode};
use crate::Config;

/// Key event types that the keyboard can process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
    /// Character key, already resolved for shift state
    Char(char),
    /// Backspace key
    Backspace,
    /// Delete key
    Delete,
    /// Left arrow key
    Left,
    /// Right arrow key
    Right,
    /// Home key
    Home,
    /// End key
    End,
    /// Space bar
    Space,
    /// Enter/Return key (left to the application after committing)
    Enter,
    /// Escape key (left to the application after committing)
    Escape,
    /// Language key (native/Latin toggle)
    ToggleLanguage,
}

/// Result of processing a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyResult {
    /// Key was handled by the keyboard
    Handled,
    /// Key was not handled (pass through to application)
    NotHandled,
}

/// Keyboard engine with session management.
///
/// # Example
///
/// ```ignore
/// let mut ime = ImeEngine::new(editor, Config::default());
///
/// ime.process_key(KeyEvent::Char('g'));
/// ime.process_key(KeyEvent::Char('k'));
/// ime.process_key(KeyEvent::Space);
///
/// let context = ime.context();
/// println!("field: {}", context.text);
/// ```
pub struct ImeEngine<E: Editor> {
    /// Native-script editor
    editor: E,

    /// Session state
    session: ImeSession,

    /// Context for platform communication
    context: ImeContext,

    config: Config,
}

impl<E: Editor> ImeEngine<E> {
    /// Create a new engine around `editor`.
    pub fn new(editor: E, config: Config) -> Self {
        let mut engine = Self {
            editor,
            session: ImeSession::with_mode(config.default_mode),
            context: ImeContext::new(),
            config,
        };
        engine.sync();
        engine
    }

    /// Get a reference to the context for reading keyboard state.
    pub fn context(&self) -> &ImeContext {
        &self.context
    }

    /// Get a reference to the session.
    pub fn session(&self) -> &ImeSession {
        &self.session
    }

    /// Get a reference to the native editor.
    pub fn editor(&self) -> &E {
        &self.editor
    }

    /// Get the engine configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Text of the focused field.
    pub fn text(&self) -> &str {
        self.session.input_buffer().text()
    }

    /// Language mode selected by the user.
    pub fn mode(&self) -> InputMode {
        self.session.mode()
    }

    /// Mode actually applied to keys: fields that do not allow composition
    /// (passwords, numbers, ...) always take literal input.
    pub fn effective_mode(&self) -> InputMode {
        if self.context.input_purpose.allows_composition() {
            self.session.mode()
        } else {
            InputMode::Latin
        }
    }

    /// Process a key event and update keyboard state.
    ///
    /// After calling this, the platform should read `context()` to update the
    /// field. Returns `KeyResult::NotHandled` for keys the application should
    /// act on itself (Enter, Escape, backspace on an empty field, ...).
    pub fn process_key(&mut self, key: KeyEvent) -> KeyResult {
        // Clear commit text from previous key
        self.context.commit_text.clear();
        trace!(?key, mode = ?self.effective_mode(), "process key");

        if key == KeyEvent::ToggleLanguage {
            self.switch_mode(self.session.mode().toggled());
            return KeyResult::Handled;
        }

        let result = match self.effective_mode() {
            InputMode::Latin => self.apply_literal(key),
            InputMode::Native => match self.editor.process_key(key, &mut self.session) {
                EditorResult::Handled => KeyResult::Handled,
                EditorResult::Commit(text) => {
                    self.context.commit_text.push_str(&text);
                    KeyResult::Handled
                }
                EditorResult::CommitAndPassThrough(text) => {
                    self.context.commit_text.push_str(&text);
                    self.apply_literal(key)
                }
                EditorResult::PassThrough => self.apply_literal(key),
            },
        };

        self.sync();
        result
    }

    /// Finalize the in-progress composition, if any.
    ///
    /// Hosts call this on explicit confirmation and before detaching the
    /// keyboard from a field.
    pub fn commit(&mut self) -> Option<String> {
        self.context.commit_text.clear();
        let text = self.finish_composition();
        self.sync();
        text
    }

    /// Drop composition state without touching the field text.
    pub fn reset(&mut self) {
        self.editor.reset();
        self.sync();
    }

    /// Empty the field and drop composition state.
    pub fn clear(&mut self) {
        self.editor.reset();
        self.session.clear();
        self.context.commit_text.clear();
        self.sync();
    }

    /// Set the language mode, committing any composition first.
    pub fn set_mode(&mut self, mode: InputMode) {
        self.context.commit_text.clear();
        self.switch_mode(mode);
    }

    /// Toggle between native and Latin input.
    pub fn toggle_mode(&mut self) {
        self.set_mode(self.session.mode().toggled());
    }

    /// Change the purpose of the focused field, committing any composition.
    pub fn set_input_purpose(&mut self, purpose: InputPurpose) {
        self.context.commit_text.clear();
        self.finish_composition();
        self.editor.reset();
        self.context.set_input_purpose(purpose);
        self.sync();
    }

    /// Bind the keyboard to another field.
    ///
    /// The outgoing composition is committed before its text is handed back,
    /// so no partial syllable leaks into the new field.
    pub fn focus(&mut self, text: &str, purpose: InputPurpose) -> String {
        self.context.commit_text.clear();
        self.finish_composition();
        self.editor.reset();

        let outgoing = self.session.input_buffer_mut().take_text();
        let incoming = if self.config.normalize_focus_text {
            crate::utils::normalize(text)
        } else {
            text.to_string()
        };
        self.session.input_buffer_mut().set_text(incoming);
        self.context.set_input_purpose(purpose);
        debug!(?purpose, outgoing_len = outgoing.len(), "input target switched");

        self.sync();
        outgoing
    }

    fn switch_mode(&mut self, mode: InputMode) {
        self.finish_composition();
        self.editor.reset();
        self.session.set_mode(mode);
        debug!(?mode, "input mode changed");
        self.sync();
    }

    fn finish_composition(&mut self) -> Option<String> {
        let text = self.editor.commit(&mut self.session)?;
        debug!(editor = self.editor.name(), %text, "composition committed");
        self.context.commit_text.push_str(&text);
        Some(text)
    }

    /// Apply a key to the field without any composition.
    fn apply_literal(&mut self, key: KeyEvent) -> KeyResult {
        let buffer = self.session.input_buffer_mut();
        let handled = match key {
            KeyEvent::Char(ch) => {
                buffer.insert_char(ch);
                self.context.commit_text.push(ch);
                true
            }
            KeyEvent::Space => {
                buffer.insert_char(' ');
                self.context.commit_text.push(' ');
                true
            }
            KeyEvent::Backspace => buffer.delete_before().is_some(),
            KeyEvent::Delete => buffer.delete_after().is_some(),
            KeyEvent::Left => buffer.move_left(),
            KeyEvent::Right => buffer.move_right(),
            KeyEvent::Home => {
                buffer.move_to_start();
                true
            }
            KeyEvent::End => {
                buffer.move_to_end();
                true
            }
            KeyEvent::Enter | KeyEvent::Escape | KeyEvent::ToggleLanguage => false,
        };

        if handled {
            KeyResult::Handled
        } else {
            KeyResult::NotHandled
        }
    }

    fn sync(&mut self) {
        self.session
            .sync_to_context(&mut self.context, self.editor.preedit());
        self.update_auxiliary_text();
    }

    /// Update auxiliary text based on the mode applied to keys.
    fn update_auxiliary_text(&mut self) {
        let label = match self.effective_mode() {
            InputMode::Native => &self.config.native_label,
            InputMode::Latin => &self.config.latin_label,
        };
        self.context.auxiliary_text.clone_from(label);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input_buffer::TextBuffer;

    /// Keeps the last typed letter provisional until the next key arrives.
    #[derive(Default)]
    struct HoldEditor {
        pending: Option<char>,
    }

    impl Editor for HoldEditor {
        fn process_key(&mut self, key: KeyEvent, session: &mut ImeSession) -> EditorResult {
            match key {
                KeyEvent::Char(ch) if ch.is_ascii_lowercase() => {
                    let committed = self.pending.replace(ch);
                    session.input_buffer_mut().push_char(ch);
                    match committed {
                        Some(prev) => EditorResult::Commit(prev.to_string()),
                        None => EditorResult::Handled,
                    }
                }
                KeyEvent::Backspace if self.pending.is_some() => {
                    self.pending = None;
                    session.input_buffer_mut().pop_char();
                    EditorResult::Handled
                }
                _ => {
                    let text = self.commit(session).unwrap_or_default();
                    EditorResult::CommitAndPassThrough(text)
                }
            }
        }

        fn commit(&mut self, _session: &mut ImeSession) -> Option<String> {
            self.pending.take().map(String::from)
        }

        fn reset(&mut self) {
            self.pending = None;
        }

        fn preedit(&self) -> Option<String> {
            self.pending.map(String::from)
        }

        fn name(&self) -> &'static str {
            "HoldEditor"
        }
    }

    fn engine() -> ImeEngine<HoldEditor> {
        ImeEngine::new(HoldEditor::default(), Config::default())
    }

    #[test]
    fn test_new_engine() {
        let ime = engine();
        assert_eq!(ime.mode(), InputMode::Native);
        assert_eq!(ime.context().auxiliary_text, "한");
        assert!(ime.context().text.is_empty());
        assert!(!ime.context().has_preedit());
    }

    #[test]
    fn test_native_keys_route_to_editor() {
        let mut ime = engine();

        assert_eq!(ime.process_key(KeyEvent::Char('a')), KeyResult::Handled);
        assert_eq!(ime.context().preedit_text, "a");
        assert_eq!(ime.context().text, "a");
        assert!(!ime.context().has_commit());

        ime.process_key(KeyEvent::Char('b'));
        assert_eq!(ime.context().commit_text, "a");
        assert_eq!(ime.context().preedit_text, "b");
        assert_eq!(ime.context().text, "ab");
    }

    #[test]
    fn test_space_commits_then_inserts() {
        let mut ime = engine();
        ime.process_key(KeyEvent::Char('a'));

        assert_eq!(ime.process_key(KeyEvent::Space), KeyResult::Handled);
        assert_eq!(ime.context().commit_text, "a ");
        assert_eq!(ime.text(), "a ");
        assert!(!ime.editor().is_composing());
    }

    #[test]
    fn test_enter_commits_and_passes_through() {
        let mut ime = engine();
        ime.process_key(KeyEvent::Char('a'));

        assert_eq!(ime.process_key(KeyEvent::Enter), KeyResult::NotHandled);
        assert_eq!(ime.context().commit_text, "a");
        assert!(!ime.context().has_preedit());
    }

    #[test]
    fn test_toggle_language_commits_composition() {
        let mut ime = engine();
        ime.process_key(KeyEvent::Char('a'));

        assert_eq!(ime.process_key(KeyEvent::ToggleLanguage), KeyResult::Handled);
        assert_eq!(ime.mode(), InputMode::Latin);
        assert_eq!(ime.context().commit_text, "a");
        assert_eq!(ime.context().auxiliary_text, "A");
        assert!(!ime.context().has_preedit());

        // Latin keys go straight to the field
        ime.process_key(KeyEvent::Char('b'));
        assert_eq!(ime.context().commit_text, "b");
        assert_eq!(ime.text(), "ab");
        assert!(!ime.editor().is_composing());

        ime.process_key(KeyEvent::ToggleLanguage);
        assert_eq!(ime.mode(), InputMode::Native);
        assert_eq!(ime.context().auxiliary_text, "한");
    }

    #[test]
    fn test_password_field_never_composes() {
        let mut ime = engine();
        ime.focus("", InputPurpose::Password);

        assert_eq!(ime.effective_mode(), InputMode::Latin);
        assert_eq!(ime.mode(), InputMode::Native);

        ime.process_key(KeyEvent::Char('a'));
        assert!(!ime.context().has_preedit());
        assert_eq!(ime.context().commit_text, "a");
        assert_eq!(ime.context().auxiliary_text, "A");
    }

    #[test]
    fn test_focus_commits_outgoing_field() {
        let mut ime = engine();
        ime.process_key(KeyEvent::Char('a'));
        ime.process_key(KeyEvent::Char('b'));
        assert!(ime.editor().is_composing());

        let outgoing = ime.focus("xyz", InputPurpose::FreeForm);
        assert_eq!(outgoing, "ab");
        assert_eq!(ime.context().commit_text, "b");
        assert_eq!(ime.text(), "xyz");
        assert_eq!(ime.context().cursor, 3);
        assert!(!ime.editor().is_composing());
    }

    #[test]
    fn test_focus_normalizes_incoming_text() {
        let mut ime = engine();
        ime.focus("\u{1112}\u{1161}\u{11AB}", InputPurpose::FreeForm);
        assert_eq!(ime.text(), "한");
    }

    #[test]
    fn test_focus_keeps_text_when_normalization_disabled() {
        let config = Config {
            normalize_focus_text: false,
            ..Config::default()
        };
        let mut ime = ImeEngine::new(HoldEditor::default(), config);
        ime.focus("\u{1112}\u{1161}", InputPurpose::FreeForm);
        assert_eq!(ime.text(), "\u{1112}\u{1161}");
    }

    #[test]
    fn test_cursor_move_commits_composition() {
        let mut ime = engine();
        ime.process_key(KeyEvent::Char('a'));

        assert_eq!(ime.process_key(KeyEvent::Left), KeyResult::Handled);
        assert_eq!(ime.context().commit_text, "a");
        assert_eq!(ime.context().cursor, 0);
        assert!(!ime.context().has_preedit());

        assert_eq!(ime.process_key(KeyEvent::Left), KeyResult::NotHandled);
        assert_eq!(ime.process_key(KeyEvent::End), KeyResult::Handled);
        assert_eq!(ime.context().cursor, 1);
    }

    #[test]
    fn test_backspace_on_empty_field_not_handled() {
        let mut ime = engine();
        assert_eq!(ime.process_key(KeyEvent::Backspace), KeyResult::NotHandled);

        ime.process_key(KeyEvent::Char('a'));
        assert_eq!(ime.process_key(KeyEvent::Backspace), KeyResult::Handled);
        assert!(ime.text().is_empty());
    }

    #[test]
    fn test_commit_twice_is_noop() {
        let mut ime = engine();
        ime.process_key(KeyEvent::Char('a'));

        assert_eq!(ime.commit(), Some("a".to_string()));
        assert_eq!(ime.commit(), None);
        assert!(!ime.context().has_commit());
        assert_eq!(ime.text(), "a");
    }

    #[test]
    fn test_reset_keeps_text_and_clear_drops_it() {
        let mut ime = engine();
        ime.process_key(KeyEvent::Char('a'));

        ime.reset();
        assert!(!ime.editor().is_composing());
        assert_eq!(ime.text(), "a");

        ime.clear();
        assert!(ime.text().is_empty());
        assert!(ime.context().text.is_empty());
    }

    #[test]
    fn test_set_input_purpose_commits() {
        let mut ime = engine();
        ime.process_key(KeyEvent::Char('a'));

        ime.set_input_purpose(InputPurpose::Number);
        assert_eq!(ime.context().commit_text, "a");
        assert_eq!(ime.effective_mode(), InputMode::Latin);
        assert_eq!(ime.text(), "a");
    }
}
