//! # libhangul
//!
//! Hangul input composition for on-screen keyboards, built on vkeyboard-core.
//!
//! Jamo keystrokes become precomposed syllables directly in the focused
//! field: the syllable being typed is always the character before the
//! cursor and is rewritten as each jamo arrives.

pub mod jamo;
pub mod composer;
pub mod layout;
pub mod editor;
pub mod config;

// Re-export keyboard components from core
pub use vkeyboard_core::*;

pub use composer::{HangulComposer, Step};
pub use config::HangulConfig;
pub use editor::HangulEditor;
pub use layout::KeyboardLayout;

/// Create a keyboard engine with a Hangul editor configured by `config`.
///
/// # Example
///
/// ```
/// use libhangul::{create_ime_engine, HangulConfig, KeyEvent};
///
/// let mut ime = create_ime_engine(HangulConfig::default());
/// for key in "gksrmf".chars() {
///     ime.process_key(KeyEvent::Char(key));
/// }
/// ime.commit();
/// assert_eq!(ime.text(), "한글");
/// ```
pub fn create_ime_engine(config: HangulConfig) -> ImeEngine<HangulEditor> {
    let editor = HangulEditor::new(config.layout, config.compound_finals);
    ImeEngine::new(editor, config.into_base())
}

/// Compose a string of jamo into Hangul text.
///
/// Characters that are not jamo are kept as they are. Any syllable still in
/// progress at the end is finalized.
pub fn compose_str(input: &str, compound_finals: bool) -> String {
    let mut out = String::with_capacity(input.len());
    let mut composer = HangulComposer::with_compound_finals(compound_finals);
    for ch in input.chars() {
        if composer.process(&mut out, ch).is_none() {
            composer.commit();
            out.push(ch);
        }
    }
    composer.commit();
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose_str() {
        assert_eq!(compose_str("ㅎㅏㄴㄱㅡㄹ", false), "한글");
        assert_eq!(compose_str("ㄱㅏㄴㅏ", false), "가나");
        assert_eq!(compose_str("ㅇㅏ 1ㄱ", false), "아 1ㄱ");
    }

    #[test]
    fn test_compose_str_clusters() {
        assert_eq!(compose_str("ㄷㅏㄹㄱ", false), "달ㄱ");
        assert_eq!(compose_str("ㄷㅏㄹㄱ", true), "닭");
        assert_eq!(compose_str("ㄷㅏㄹㄱㅏ", true), "달가");
    }

    #[test]
    fn test_create_ime_engine_uses_config() {
        let mut config = HangulConfig::default();
        config.layout = KeyboardLayout::Jamo;
        config.base.default_mode = InputMode::Latin;

        let ime = create_ime_engine(config);
        assert_eq!(ime.mode(), InputMode::Latin);
        assert_eq!(ime.editor().layout(), KeyboardLayout::Jamo);
        assert_eq!(ime.context().auxiliary_text, "A");
    }
}
