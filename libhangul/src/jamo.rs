//! Hangul jamo tables and syllable arithmetic.
//!
//! All jamo are Hangul Compatibility Jamo (U+3131..U+3163), the characters a
//! keyboard produces. Precomposed syllables live in U+AC00..U+D7A3 and are
//! laid out as `base + (cho * 21 + jung) * 28 + jong`.

/// First precomposed syllable, 가.
pub const SYLLABLE_BASE: u32 = 0xAC00;
/// Number of medial vowels.
pub const JUNG_COUNT: u32 = 21;
/// Number of final options, including "none".
pub const JONG_COUNT: u32 = 28;
/// Number of precomposed syllables.
pub const SYLLABLE_COUNT: u32 = 19 * JUNG_COUNT * JONG_COUNT;

/// Initial consonants (초성).
pub const CHO: [char; 19] = [
    'ㄱ', 'ㄲ', 'ㄴ', 'ㄷ', 'ㄸ', 'ㄹ', 'ㅁ', 'ㅂ', 'ㅃ', 'ㅅ',
    'ㅆ', 'ㅇ', 'ㅈ', 'ㅉ', 'ㅊ', 'ㅋ', 'ㅌ', 'ㅍ', 'ㅎ',
];

/// Medial vowels (중성).
pub const JUNG: [char; 21] = [
    'ㅏ', 'ㅐ', 'ㅑ', 'ㅒ', 'ㅓ', 'ㅔ', 'ㅕ', 'ㅖ', 'ㅗ', 'ㅘ',
    'ㅙ', 'ㅚ', 'ㅛ', 'ㅜ', 'ㅝ', 'ㅞ', 'ㅟ', 'ㅠ', 'ㅡ', 'ㅢ',
    'ㅣ',
];

/// Final consonants (종성), index 0 = no final.
pub const JONG: [Option<char>; 28] = [
    None, Some('ㄱ'), Some('ㄲ'), Some('ㄳ'), Some('ㄴ'), Some('ㄵ'), Some('ㄶ'),
    Some('ㄷ'), Some('ㄹ'), Some('ㄺ'), Some('ㄻ'), Some('ㄼ'), Some('ㄽ'),
    Some('ㄾ'), Some('ㄿ'), Some('ㅀ'), Some('ㅁ'), Some('ㅂ'), Some('ㅄ'),
    Some('ㅅ'), Some('ㅆ'), Some('ㅇ'), Some('ㅈ'), Some('ㅊ'), Some('ㅋ'),
    Some('ㅌ'), Some('ㅍ'), Some('ㅎ'),
];

/// Compound vowels as (first, second, fused) JUNG indices.
const VOWEL_PAIRS: [(usize, usize, usize); 7] = [
    (8, 0, 9),    // ㅗ + ㅏ = ㅘ
    (8, 1, 10),   // ㅗ + ㅐ = ㅙ
    (8, 20, 11),  // ㅗ + ㅣ = ㅚ
    (13, 4, 14),  // ㅜ + ㅓ = ㅝ
    (13, 5, 15),  // ㅜ + ㅔ = ㅞ
    (13, 20, 16), // ㅜ + ㅣ = ㅟ
    (18, 20, 19), // ㅡ + ㅣ = ㅢ
];

/// Final clusters as (first, second, fused) JONG indices.
const FINAL_PAIRS: [(usize, usize, usize); 11] = [
    (1, 19, 3),   // ㄱ + ㅅ = ㄳ
    (4, 22, 5),   // ㄴ + ㅈ = ㄵ
    (4, 27, 6),   // ㄴ + ㅎ = ㄶ
    (8, 1, 9),    // ㄹ + ㄱ = ㄺ
    (8, 16, 10),  // ㄹ + ㅁ = ㄻ
    (8, 17, 11),  // ㄹ + ㅂ = ㄼ
    (8, 19, 12),  // ㄹ + ㅅ = ㄽ
    (8, 25, 13),  // ㄹ + ㅌ = ㄾ
    (8, 26, 14),  // ㄹ + ㅍ = ㄿ
    (8, 27, 15),  // ㄹ + ㅎ = ㅀ
    (17, 19, 18), // ㅂ + ㅅ = ㅄ
];

/// A keystroke-level jamo, classified by the slot it can start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Jamo {
    /// Consonant with its CHO index
    Initial(usize),
    /// Vowel with its JUNG index
    Medial(usize),
}

/// CHO index of a consonant.
pub fn cho_index(ch: char) -> Option<usize> {
    CHO.iter().position(|&c| c == ch)
}

/// JUNG index of a vowel.
pub fn jung_index(ch: char) -> Option<usize> {
    JUNG.iter().position(|&c| c == ch)
}

/// JONG index (1..=27) of a consonant that may close a syllable.
pub fn jong_index(ch: char) -> Option<usize> {
    JONG.iter().position(|&c| c == Some(ch))
}

/// Classify a character as an initial consonant or medial vowel.
///
/// Cluster-only jamo such as ㄳ are neither and return `None`.
pub fn classify(ch: char) -> Option<Jamo> {
    cho_index(ch)
        .map(Jamo::Initial)
        .or_else(|| jung_index(ch).map(Jamo::Medial))
}

/// Character of a JONG index, `None` for 0 or out of range.
pub fn jong_char(jong: usize) -> Option<char> {
    JONG.get(jong).copied().flatten()
}

/// Initial consonant index matching a final, if the final has one.
pub fn jong_to_cho(jong: usize) -> Option<usize> {
    jong_char(jong).and_then(cho_index)
}

/// Compose a syllable from table indices.
///
/// A medial is required; `jong` of `None` or `Some(0)` means no final.
pub fn compose(cho: usize, jung: Option<usize>, jong: Option<usize>) -> Option<char> {
    let jung = jung?;
    let jong = jong.unwrap_or(0);
    if cho >= CHO.len() || jung >= JUNG.len() || jong >= JONG.len() {
        return None;
    }
    let code = SYLLABLE_BASE + (cho as u32 * JUNG_COUNT + jung as u32) * JONG_COUNT + jong as u32;
    char::from_u32(code)
}

/// Split a precomposed syllable into (cho, jung, jong) indices.
pub fn decompose(ch: char) -> Option<(usize, usize, usize)> {
    let offset = (ch as u32).checked_sub(SYLLABLE_BASE)?;
    if offset >= SYLLABLE_COUNT {
        return None;
    }
    let cho = offset / (JUNG_COUNT * JONG_COUNT);
    let jung = (offset % (JUNG_COUNT * JONG_COUNT)) / JONG_COUNT;
    let jong = offset % JONG_COUNT;
    Some((cho as usize, jung as usize, jong as usize))
}

/// Check for a precomposed Hangul syllable.
pub fn is_syllable(ch: char) -> bool {
    decompose(ch).is_some()
}

/// Fuse two medials into a compound vowel.
pub fn fuse_vowel(first: usize, second: usize) -> Option<usize> {
    VOWEL_PAIRS
        .iter()
        .find(|&&(a, b, _)| a == first && b == second)
        .map(|&(_, _, fused)| fused)
}

/// Split a compound vowel into the two medials typed for it.
pub fn split_vowel(fused: usize) -> Option<(usize, usize)> {
    VOWEL_PAIRS
        .iter()
        .find(|&&(_, _, f)| f == fused)
        .map(|&(a, b, _)| (a, b))
}

/// Fuse two finals into a cluster.
pub fn fuse_final(first: usize, second: usize) -> Option<usize> {
    FINAL_PAIRS
        .iter()
        .find(|&&(a, b, _)| a == first && b == second)
        .map(|&(_, _, fused)| fused)
}

/// Split a final cluster into its two finals.
pub fn split_final(fused: usize) -> Option<(usize, usize)> {
    FINAL_PAIRS
        .iter()
        .find(|&&(_, _, f)| f == fused)
        .map(|&(a, b, _)| (a, b))
}

/// Jamo keystrokes that type `text` on a two-set keyboard.
///
/// Compound vowels and final clusters are split into the keys that produce
/// them. Characters that are not precomposed syllables are passed through.
pub fn keystrokes(text: &str) -> Vec<char> {
    let mut keys = Vec::with_capacity(text.len());
    for ch in text.chars() {
        let Some((cho, jung, jong)) = decompose(ch) else {
            keys.push(ch);
            continue;
        };

        keys.push(CHO[cho]);
        match split_vowel(jung) {
            Some((a, b)) => keys.extend([JUNG[a], JUNG[b]]),
            None => keys.push(JUNG[jung]),
        }
        let finals = match split_final(jong) {
            Some((a, b)) => [jong_char(a), jong_char(b)],
            None => [jong_char(jong), None],
        };
        keys.extend(finals.into_iter().flatten());
    }
    keys
}
