// libhangul/src/layout.rs
//
// Key layouts that turn keyboard characters into jamo.
//
// The standard Korean keyboard is the two-set (dubeolsik, 두벌식) layout:
// consonants on the left hand, vowels on the right, with the shift key
// producing the tense consonants ㄲ ㄸ ㅃ ㅆ ㅉ and the vowels ㅒ ㅖ.
// Shift on any other letter gives the same jamo as the plain key.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::jamo;

/// Dubeolsik key to jamo table (unshifted keys plus the seven shifted ones).
static DUBEOLSIK: Lazy<HashMap<char, char>> = Lazy::new(|| {
    let mut m = HashMap::new();

    // Consonants
    m.insert('r', 'ㄱ');
    m.insert('s', 'ㄴ');
    m.insert('e', 'ㄷ');
    m.insert('f', 'ㄹ');
    m.insert('a', 'ㅁ');
    m.insert('q', 'ㅂ');
    m.insert('t', 'ㅅ');
    m.insert('d', 'ㅇ');
    m.insert('w', 'ㅈ');
    m.insert('c', 'ㅊ');
    m.insert('z', 'ㅋ');
    m.insert('x', 'ㅌ');
    m.insert('v', 'ㅍ');
    m.insert('g', 'ㅎ');

    // Vowels
    m.insert('k', 'ㅏ');
    m.insert('o', 'ㅐ');
    m.insert('i', 'ㅑ');
    m.insert('j', 'ㅓ');
    m.insert('p', 'ㅔ');
    m.insert('u', 'ㅕ');
    m.insert('h', 'ㅗ');
    m.insert('y', 'ㅛ');
    m.insert('n', 'ㅜ');
    m.insert('b', 'ㅠ');
    m.insert('m', 'ㅡ');
    m.insert('l', 'ㅣ');

    // Shifted
    m.insert('R', 'ㄲ');
    m.insert('E', 'ㄸ');
    m.insert('Q', 'ㅃ');
    m.insert('T', 'ㅆ');
    m.insert('W', 'ㅉ');
    m.insert('O', 'ㅒ');
    m.insert('P', 'ㅖ');

    m
});

/// Reverse table: jamo to the key that types it.
static DUBEOLSIK_KEYS: Lazy<HashMap<char, char>> =
    Lazy::new(|| DUBEOLSIK.iter().map(|(&key, &letter)| (letter, key)).collect());

/// Keyboard layout used to resolve character keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyboardLayout {
    /// Latin keys map to jamo in the two-set arrangement
    #[default]
    Dubeolsik,
    /// Keys already carry jamo (on-screen Hangul keys); Latin stays Latin
    Jamo,
}

impl KeyboardLayout {
    /// Resolve a key character to the jamo it types.
    ///
    /// Jamo characters are accepted as-is by every layout. Returns `None`
    /// for keys the layout does not translate; those are inserted literally.
    pub fn resolve(self, key: char) -> Option<char> {
        if is_compat_jamo(key) {
            return Some(key);
        }
        match self {
            Self::Dubeolsik => DUBEOLSIK
                .get(&key)
                .or_else(|| DUBEOLSIK.get(&key.to_ascii_lowercase()))
                .copied(),
            Self::Jamo => None,
        }
    }

    /// Dubeolsik keys that type `text`.
    ///
    /// Characters without a key (digits, punctuation, Latin) are kept.
    pub fn keys_for(text: &str) -> String {
        jamo::keystrokes(text)
            .into_iter()
            .map(|ch| DUBEOLSIK_KEYS.get(&ch).copied().unwrap_or(ch))
            .collect()
    }

    /// Layout name as written in configuration files.
    pub fn name(self) -> &'static str {
        match self {
            Self::Dubeolsik => "dubeolsik",
            Self::Jamo => "jamo",
        }
    }
}

/// Hangul Compatibility Jamo block, letters only.
fn is_compat_jamo(ch: char) -> bool {
    ('\u{3131}'..='\u{3163}').contains(&ch)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dubeolsik_basic_keys() {
        let layout = KeyboardLayout::Dubeolsik;
        assert_eq!(layout.resolve('g'), Some('ㅎ'));
        assert_eq!(layout.resolve('k'), Some('ㅏ'));
        assert_eq!(layout.resolve('s'), Some('ㄴ'));
        assert_eq!(layout.resolve('l'), Some('ㅣ'));
    }

    #[test]
    fn test_dubeolsik_shifted_keys() {
        let layout = KeyboardLayout::Dubeolsik;
        assert_eq!(layout.resolve('R'), Some('ㄲ'));
        assert_eq!(layout.resolve('E'), Some('ㄸ'));
        assert_eq!(layout.resolve('Q'), Some('ㅃ'));
        assert_eq!(layout.resolve('T'), Some('ㅆ'));
        assert_eq!(layout.resolve('W'), Some('ㅉ'));
        assert_eq!(layout.resolve('O'), Some('ㅒ'));
        assert_eq!(layout.resolve('P'), Some('ㅖ'));
        // No shifted form: same as the plain key
        assert_eq!(layout.resolve('K'), Some('ㅏ'));
        assert_eq!(layout.resolve('G'), Some('ㅎ'));
    }

    #[test]
    fn test_unmapped_keys() {
        let layout = KeyboardLayout::Dubeolsik;
        assert_eq!(layout.resolve('1'), None);
        assert_eq!(layout.resolve('.'), None);
        assert_eq!(layout.resolve(' '), None);
    }

    #[test]
    fn test_jamo_passes_through_every_layout() {
        assert_eq!(KeyboardLayout::Dubeolsik.resolve('ㅘ'), Some('ㅘ'));
        assert_eq!(KeyboardLayout::Jamo.resolve('ㄱ'), Some('ㄱ'));
        assert_eq!(KeyboardLayout::Jamo.resolve('r'), None);
    }

    #[test]
    fn test_every_key_resolves_to_a_composable_jamo() {
        for (&key, &jamo_char) in DUBEOLSIK.iter() {
            assert!(jamo::classify(jamo_char).is_some(), "key {} -> {}", key, jamo_char);
        }
        assert_eq!(DUBEOLSIK.len(), 33);
    }

    #[test]
    fn test_keys_for() {
        assert_eq!(KeyboardLayout::keys_for("한글"), "gksrmf");
        assert_eq!(KeyboardLayout::keys_for("과자"), "rhkwk");
        assert_eq!(KeyboardLayout::keys_for("닭 1"), "ekfr 1");
        assert_eq!(KeyboardLayout::keys_for("빨래"), "Qkffo");
    }

    #[test]
    fn test_layout_names() {
        assert_eq!(KeyboardLayout::Dubeolsik.name(), "dubeolsik");
        assert_eq!(KeyboardLayout::Jamo.name(), "jamo");
        assert_eq!(KeyboardLayout::default(), KeyboardLayout::Dubeolsik);
    }
}
