//! Editor trait for native-script input.
//!
//! The editor architecture keeps script-specific composition out of the
//! engine. An editor receives key events while the keyboard is in native
//! mode, edits the session's buffer through its composer, and tells the
//! engine what became final.

use crate::ime_engine::KeyEvent;
use crate::session::ImeSession;

/// Result of processing a key event in an editor.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorResult {
    /// Key was consumed; nothing was finalized
    Handled,

    /// Key was consumed and this text became final
    Commit(String),

    /// Composition was finalized as this text; the engine should now apply
    /// the key itself (insert a space, move the cursor, ...)
    CommitAndPassThrough(String),

    /// Key not handled by this editor, engine applies it literally
    PassThrough,
}

/// Editor trait for handling input in native mode.
///
/// # Example
///
/// ```ignore
/// use vkeyboard_core::{Editor, ImeSession, KeyEvent};
///
/// let mut session = ImeSession::new();
/// let result = editor.process_key(KeyEvent::Char('g'), &mut session);
/// ```
pub trait Editor {
    /// Process a key event in this editor's context.
    ///
    /// The editor may splice `session`'s input buffer. Whatever it leaves as
    /// provisional must be reported by [`Editor::preedit`].
    fn process_key(&mut self, key: KeyEvent, session: &mut ImeSession) -> EditorResult;

    /// Finalize any in-progress composition.
    ///
    /// Returns the finalized text, or `None` when nothing was composing.
    /// Calling it twice in a row must be a no-op the second time.
    fn commit(&mut self, session: &mut ImeSession) -> Option<String>;

    /// Drop composition state without touching the buffer.
    fn reset(&mut self);

    /// Provisional text currently shown in the buffer, if any.
    fn preedit(&self) -> Option<String>;

    /// Whether a composition is in progress.
    fn is_composing(&self) -> bool {
        self.preedit().is_some()
    }

    /// Get a human-readable name for this editor (for debugging/logging).
    fn name(&self) -> &'static str;
}
