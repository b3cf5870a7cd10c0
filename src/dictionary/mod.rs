use std::collections::{
    HashMap,
    HashSet,
};

use async_trait::async_trait;

use crate::{
    core::{
        models::DictionaryLanguage,
        KhmineError,
    },
    segmentation::classify::is_khmer_word,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KnownWordMeta {
    pub is_khmer: bool,
    pub is_verified: bool,
}

/// Immutable snapshot of every word the dictionary knows about.
///
/// Built once at startup from persisted dictionary rows and shared read-only
/// by all segmentation and colorization calls afterwards.
#[derive(Debug, Clone, Default)]
pub struct KnownWordSet {
    words: HashMap<String, KnownWordMeta>,
}

impl KnownWordSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the set from `(word, is_verified)` rows as stored in the
    /// dictionary table. Script membership is derived from the word itself.
    pub fn from_rows<I, W>(rows: I) -> Self
    where
        I: IntoIterator<Item = (W, bool)>,
        W: Into<String>,
    {
        let words = rows
            .into_iter()
            .map(|(word, is_verified)| {
                let word = word.into();
                let meta = KnownWordMeta { is_khmer: is_khmer_word(&word), is_verified };
                (word, meta)
            })
            .collect();
        KnownWordSet { words }
    }

    /// Convenience constructor treating every word as verified.
    pub fn from_words<I, W>(words: I) -> Self
    where
        I: IntoIterator<Item = W>,
        W: Into<String>,
    {
        Self::from_rows(words.into_iter().map(|w| (w, true)))
    }

    pub fn has(&self, word: &str) -> bool {
        self.words.contains_key(word)
    }

    pub fn get(&self, word: &str) -> Option<&KnownWordMeta> {
        self.words.get(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Words that are both Khmer-script and verified, the subset eligible for
    /// dictionary-driven segmentation display.
    pub fn verified_khmer_words(&self) -> impl Iterator<Item = &str> {
        self.words
            .iter()
            .filter(|(_, meta)| meta.is_khmer && meta.is_verified)
            .map(|(word, _)| word.as_str())
    }
}

/// Read side of the dictionary database, implemented by the shell application.
#[async_trait]
pub trait DictionaryProvider: Send + Sync {
    /// Loads the full known-word snapshot. Called once at startup.
    async fn known_words(&self) -> Result<KnownWordSet, KhmineError>;

    /// Batch lookup of short definitions. Words absent from the dictionary
    /// map to `None`.
    async fn short_definitions(
        &self,
        words: &HashSet<String>,
        language: DictionaryLanguage,
    ) -> Result<HashMap<String, Option<String>>, KhmineError>;

    /// Full definition for a single word, `None` if absent.
    async fn full_definition(
        &self,
        word: &str,
        language: DictionaryLanguage,
    ) -> Result<Option<String>, KhmineError>;
}

/// Strict variant of the batch lookup: callers that rely on completeness get
/// an error instead of a silent `None` when any requested word is missing.
pub async fn short_definitions_strict<P: DictionaryProvider + ?Sized>(
    provider: &P,
    words: &HashSet<String>,
    language: DictionaryLanguage,
) -> Result<HashMap<String, String>, KhmineError> {
    let found = provider.short_definitions(words, language).await?;

    let mut strict = HashMap::with_capacity(words.len());
    for word in words {
        match found.get(word).and_then(|definition| definition.clone()) {
            Some(definition) => {
                strict.insert(word.clone(), definition);
            }
            None => return Err(KhmineError::MissingDefinition(word.clone())),
        }
    }

    Ok(strict)
}
