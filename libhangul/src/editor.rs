//! Hangul editor for the keyboard engine.
//!
//! Resolves character keys through the configured layout and feeds the
//! resulting jamo to a [`HangulComposer`] that edits the focused field in
//! place. Keys that are not jamo finalize the syllable and go back to the
//! engine.

use vkeyboard_core::{Editor, EditorResult, ImeSession, KeyEvent};

use crate::composer::HangulComposer;
use crate::layout::KeyboardLayout;

/// Native-mode editor producing Hangul syllables.
#[derive(Debug, Clone, Default)]
pub struct HangulEditor {
    composer: HangulComposer,
    layout: KeyboardLayout,
}

impl HangulEditor {
    /// Create an editor for `layout`.
    pub fn new(layout: KeyboardLayout, compound_finals: bool) -> Self {
        Self {
            composer: HangulComposer::with_compound_finals(compound_finals),
            layout,
        }
    }

    /// Get a reference to the composer.
    pub fn composer(&self) -> &HangulComposer {
        &self.composer
    }

    /// Layout used to resolve character keys.
    pub fn layout(&self) -> KeyboardLayout {
        self.layout
    }

    fn handle_char(&mut self, ch: char, session: &mut ImeSession) -> EditorResult {
        let step = self
            .layout
            .resolve(ch)
            .and_then(|jamo| self.composer.process(session.input_buffer_mut(), jamo));

        match step {
            Some(step) if step.committed.is_empty() => EditorResult::Handled,
            Some(step) => EditorResult::Commit(step.committed),
            // Digits, punctuation, cluster jamo: finalize and insert as typed
            None => self.finish(session),
        }
    }

    fn handle_backspace(&mut self, session: &mut ImeSession) -> EditorResult {
        if !self.composer.is_composing() {
            return EditorResult::PassThrough;
        }
        self.composer.backspace(session.input_buffer_mut());
        EditorResult::Handled
    }

    fn finish(&mut self, session: &mut ImeSession) -> EditorResult {
        EditorResult::CommitAndPassThrough(self.commit(session).unwrap_or_default())
    }
}

impl Editor for HangulEditor {
    fn process_key(&mut self, key: KeyEvent, session: &mut ImeSession) -> EditorResult {
        match key {
            KeyEvent::Char(ch) => self.handle_char(ch, session),
            KeyEvent::Backspace => self.handle_backspace(session),
            _ => self.finish(session),
        }
    }

    fn commit(&mut self, _session: &mut ImeSession) -> Option<String> {
        self.composer.commit().map(String::from)
    }

    fn reset(&mut self) {
        self.composer.reset();
    }

    fn preedit(&self) -> Option<String> {
        self.composer.preedit().map(String::from)
    }

    fn is_composing(&self) -> bool {
        self.composer.is_composing()
    }

    fn name(&self) -> &'static str {
        "HangulEditor"
    }
}
