/// Character in the Khmer script (U+1780–U+17FF) or Khmer Symbols
/// (U+19E0–U+19FF) blocks.
pub fn is_khmer_char(c: char) -> bool {
    matches!(c, '\u{1780}'..='\u{17FF}' | '\u{19E0}'..='\u{19FF}')
}

/// Text made up entirely of Khmer-script characters, no other letters and not
/// even spaces.
pub fn is_khmer_word(text: &str) -> bool {
    !text.is_empty() && text.chars().all(is_khmer_char)
}

pub fn contains_khmer(text: &str) -> bool {
    text.chars().any(is_khmer_char)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    Khmer,
    NotKhmer,
    Whitespace,
}

/// Total classification of a single character. Whitespace takes priority and
/// covers carriage return and line feed variants via the Unicode whitespace
/// property.
pub fn classify_char(c: char) -> CharClass {
    if c.is_whitespace() {
        CharClass::Whitespace
    } else if is_khmer_char(c) {
        CharClass::Khmer
    } else {
        CharClass::NotKhmer
    }
}
