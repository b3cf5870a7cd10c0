use std::collections::{
    BTreeSet,
    HashMap,
};

use super::segments::TextSegment;

/// A Khmer word token joined with its short definition, when one exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnhancedKhmerWord {
    pub word: String,
    pub definition: Option<String>,
}

/// Like [`TextSegment`] but with definitions attached to Khmer words,
/// ready for tooltip/popover display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnhancedTextSegment {
    Khmer { words: Vec<EnhancedKhmerWord> },
    NotKhmer { text: String },
    Whitespace { text: String },
}

/// Zips segments with a resolved word→definition lookup. `NotKhmer` and
/// `Whitespace` segments pass through unchanged. Fetching the definitions is
/// the dictionary collaborator's concern; this is a total function over the
/// already-resolved map.
pub fn enhance_segments(
    segments: &[TextSegment],
    definitions: &HashMap<String, String>,
) -> Vec<EnhancedTextSegment> {
    segments
        .iter()
        .map(|segment| match segment {
            TextSegment::Khmer { words } => EnhancedTextSegment::Khmer {
                words: words
                    .iter()
                    .map(|word| EnhancedKhmerWord {
                        word: word.clone(),
                        definition: definitions.get(word).cloned(),
                    })
                    .collect(),
            },
            TextSegment::NotKhmer { text } => EnhancedTextSegment::NotKhmer { text: text.clone() },
            TextSegment::Whitespace { text } => {
                EnhancedTextSegment::Whitespace { text: text.clone() }
            }
        })
        .collect()
}

/// Unique Khmer words across all segments, for batch definition prefetch.
pub fn khmer_words_of_segments(segments: &[TextSegment]) -> BTreeSet<String> {
    let mut words = BTreeSet::new();
    for segment in segments {
        if let TextSegment::Khmer { words: segment_words } = segment {
            for word in segment_words {
                words.insert(word.clone());
            }
        }
    }
    words
}
