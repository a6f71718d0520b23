//! Hangul syllable composition state machine.
//!
//! The composer turns a stream of jamo keystrokes into precomposed syllables
//! directly inside the caller's text buffer. While a syllable is in progress
//! its provisional rendering is the character right before the insertion
//! point; every keystroke either replaces that character, finalizes it and
//! starts a new one, or is left to the caller.
//!
//! ```
//! use libhangul::HangulComposer;
//!
//! let mut buf = String::new();
//! let mut composer = HangulComposer::new();
//! for jamo in ['ㄱ', 'ㅏ', 'ㄴ', 'ㅏ'] {
//!     composer.process(&mut buf, jamo);
//! }
//! composer.commit();
//! assert_eq!(buf, "가나");
//! ```

use tracing::trace;
use vkeyboard_core::TextBuffer;

use crate::jamo::{self, Jamo};

/// What a keystroke did to the buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Step {
    /// Characters finalized by this keystroke, in buffer order
    pub committed: String,
    /// Provisional syllable after this keystroke
    pub preedit: Option<char>,
}

/// The syllable being composed. An initial is always present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Syllable {
    cho: usize,
    jung: Option<usize>,
    jong: Option<usize>,
}

impl Syllable {
    fn new(cho: usize) -> Self {
        Self {
            cho,
            jung: None,
            jong: None,
        }
    }

    /// Lone consonant until a medial arrives, then the composed syllable.
    fn render(&self) -> char {
        jamo::compose(self.cho, self.jung, self.jong).unwrap_or(jamo::CHO[self.cho])
    }
}

/// Hangul input composer.
///
/// Holds at most one in-progress syllable. The buffer is passed to every
/// operation, so the same composer can be pointed at a new field after a
/// [`commit`](Self::commit) and [`reset`](Self::reset).
#[derive(Debug, Clone, Default)]
pub struct HangulComposer {
    current: Option<Syllable>,
    /// Stack a second consonant onto a final (ㄹ + ㄱ = ㄺ)
    compound_finals: bool,
}

impl HangulComposer {
    /// Create a composer with plain single-consonant finals.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a composer that builds final clusters such as ㄺ and ㅄ.
    pub fn with_compound_finals(compound_finals: bool) -> Self {
        Self {
            current: None,
            compound_finals,
        }
    }

    /// Whether final clusters are composed.
    pub fn compound_finals(&self) -> bool {
        self.compound_finals
    }

    /// Whether a syllable is in progress.
    pub fn is_composing(&self) -> bool {
        self.current.is_some()
    }

    /// Provisional rendering of the in-progress syllable.
    pub fn preedit(&self) -> Option<char> {
        self.current.map(|s| s.render())
    }

    /// CHO index of the in-progress syllable.
    pub fn cho_index(&self) -> Option<usize> {
        self.current.map(|s| s.cho)
    }

    /// JUNG index of the in-progress syllable.
    pub fn jung_index(&self) -> Option<usize> {
        self.current.and_then(|s| s.jung)
    }

    /// JONG index of the in-progress syllable.
    pub fn jong_index(&self) -> Option<usize> {
        self.current.and_then(|s| s.jong)
    }

    /// Feed one jamo.
    ///
    /// Returns `None` without touching the buffer when `ch` is neither an
    /// initial consonant nor a medial vowel; the caller decides what to do
    /// with it (usually commit and insert it literally).
    pub fn process<B: TextBuffer + ?Sized>(&mut self, buf: &mut B, ch: char) -> Option<Step> {
        let step = match jamo::classify(ch)? {
            Jamo::Initial(cho) => self.consonant(buf, cho, ch),
            Jamo::Medial(jung) => self.vowel(buf, jung, ch),
        };
        trace!(jamo = %ch, committed = %step.committed, preedit = ?step.preedit, "composed");
        Some(step)
    }

    /// Undo one jamo of the in-progress syllable, or delete the character
    /// before the insertion point when idle.
    ///
    /// Returns whether the buffer or the composition changed.
    pub fn backspace<B: TextBuffer + ?Sized>(&mut self, buf: &mut B) -> bool {
        let Some(mut syllable) = self.current else {
            return buf.pop_char().is_some();
        };

        if let Some(jong) = syllable.jong {
            syllable.jong = match jamo::split_final(jong) {
                Some((first, _)) if self.compound_finals => Some(first),
                _ => None,
            };
        } else if syllable.jung.is_some() {
            syllable.jung = None;
        } else {
            self.current = None;
            buf.pop_char();
            trace!("composition erased");
            return true;
        }

        self.current = Some(syllable);
        buf.replace_last(syllable.render());
        trace!(preedit = %syllable.render(), "jamo erased");
        true
    }

    /// Finalize the in-progress syllable.
    ///
    /// The buffer already holds its rendering, so only the state is cleared.
    /// Returns the finalized character, or `None` when idle.
    pub fn commit(&mut self) -> Option<char> {
        self.current.take().map(|s| s.render())
    }

    /// Forget the in-progress syllable without touching any buffer.
    pub fn reset(&mut self) {
        self.current = None;
    }

    fn consonant<B: TextBuffer + ?Sized>(&mut self, buf: &mut B, cho: usize, ch: char) -> Step {
        let Some(mut syllable) = self.current else {
            return self.start(buf, cho, String::new());
        };

        match (syllable.jung, syllable.jong) {
            (Some(_), None) => {
                if let Some(jong) = jamo::jong_index(ch) {
                    syllable.jong = Some(jong);
                    return self.update(buf, syllable);
                }
            }
            (Some(_), Some(jong)) if self.compound_finals => {
                if let Some(cluster) = jamo::jong_index(ch).and_then(|j| jamo::fuse_final(jong, j)) {
                    syllable.jong = Some(cluster);
                    return self.update(buf, syllable);
                }
            }
            _ => {}
        }

        let committed = self.commit().map(String::from).unwrap_or_default();
        self.start(buf, cho, committed)
    }

    fn vowel<B: TextBuffer + ?Sized>(&mut self, buf: &mut B, jung: usize, ch: char) -> Step {
        let Some(mut syllable) = self.current else {
            buf.push_char(ch);
            return Step {
                committed: ch.to_string(),
                preedit: None,
            };
        };

        match (syllable.jung, syllable.jong) {
            (None, _) => {
                syllable.jung = Some(jung);
                self.update(buf, syllable)
            }
            (Some(_), Some(jong)) => self.resegment(buf, syllable, jong, jung, ch),
            (Some(medial), None) => match jamo::fuse_vowel(medial, jung) {
                Some(fused) => {
                    syllable.jung = Some(fused);
                    self.update(buf, syllable)
                }
                None => self.commit_then_literal(buf, ch),
            },
        }
    }

    /// Move the final (or the second half of a cluster) onto a new syllable
    /// headed by `jung`.
    fn resegment<B: TextBuffer + ?Sized>(
        &mut self,
        buf: &mut B,
        mut syllable: Syllable,
        jong: usize,
        jung: usize,
        ch: char,
    ) -> Step {
        let (kept, moved) = match jamo::split_final(jong) {
            Some((first, second)) => (Some(first), second),
            None => (None, jong),
        };
        let Some(next_cho) = jamo::jong_to_cho(moved) else {
            return self.commit_then_literal(buf, ch);
        };

        syllable.jong = kept;
        let finished = syllable.render();
        buf.replace_last(finished);

        let next = Syllable {
            cho: next_cho,
            jung: Some(jung),
            jong: None,
        };
        buf.push_char(next.render());
        self.current = Some(next);

        Step {
            committed: finished.to_string(),
            preedit: Some(next.render()),
        }
    }

    fn start<B: TextBuffer + ?Sized>(&mut self, buf: &mut B, cho: usize, committed: String) -> Step {
        let syllable = Syllable::new(cho);
        buf.push_char(syllable.render());
        self.current = Some(syllable);
        Step {
            committed,
            preedit: Some(syllable.render()),
        }
    }

    fn update<B: TextBuffer + ?Sized>(&mut self, buf: &mut B, syllable: Syllable) -> Step {
        buf.replace_last(syllable.render());
        self.current = Some(syllable);
        Step {
            committed: String::new(),
            preedit: Some(syllable.render()),
        }
    }

    fn commit_then_literal<B: TextBuffer + ?Sized>(&mut self, buf: &mut B, ch: char) -> Step {
        let mut committed = self.commit().map(String::from).unwrap_or_default();
        buf.push_char(ch);
        committed.push(ch);
        Step {
            committed,
            preedit: None,
        }
    }
}
