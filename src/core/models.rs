use std::fmt;

use serde::{
    Deserialize,
    Serialize,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DictionaryLanguage {
    Km,
    En,
    Ru,
}

impl DictionaryLanguage {
    pub fn as_str(&self) -> &'static str {
        match self {
            DictionaryLanguage::Km => "km",
            DictionaryLanguage::En => "en",
            DictionaryLanguage::Ru => "ru",
        }
    }
}

impl fmt::Display for DictionaryLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The four user ratings driving the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Grade {
    Again,
    Hard,
    Good,
    Easy,
}

impl Grade {
    pub const ALL: [Grade; 4] = [Grade::Again, Grade::Hard, Grade::Good, Grade::Easy];
}

/// One flashcard: a favorited word plus its FSRS memory state.
///
/// `last_review == None` means the card has never been reviewed.
/// Unique per `(word, language)` pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoriteItem {
    pub word: String,
    pub language: DictionaryLanguage,
    pub timestamp: i64, // Added date, epoch milliseconds
    pub stability: f64,
    pub difficulty: f64,
    pub due: i64,
    pub last_review: Option<i64>,
}

impl FavoriteItem {
    /// A fresh card: due immediately upon adding, never reviewed.
    pub fn new(word: impl Into<String>, language: DictionaryLanguage, timestamp: i64) -> Self {
        FavoriteItem {
            word: word.into(),
            language,
            timestamp,
            stability: 0.0,
            difficulty: 0.0,
            due: timestamp,
            last_review: None,
        }
    }

    pub fn is_new(&self) -> bool {
        self.last_review.is_none()
    }

    pub fn is_due(&self, now: i64) -> bool {
        self.due <= now
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub word: String,
    pub language: DictionaryLanguage,
    pub timestamp: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn languages_and_grades_serialize_lowercase() {
        assert_eq!(serde_json::to_string(&DictionaryLanguage::Km).unwrap(), "\"km\"");
        assert_eq!(serde_json::to_string(&Grade::Again).unwrap(), "\"again\"");

        let grade: Grade = serde_json::from_str("\"easy\"").unwrap();
        assert_eq!(grade, Grade::Easy);
    }

    #[test]
    fn favorite_item_round_trips_through_json() {
        let card = FavoriteItem::new("ផ្លូវ", DictionaryLanguage::Km, 1_700_000_000_000);

        let json = serde_json::to_string(&card).unwrap();
        assert!(json.contains("\"last_review\":null"));

        let back: FavoriteItem = serde_json::from_str(&json).unwrap();
        assert_eq!(back, card);
    }
}
