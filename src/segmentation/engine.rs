use std::sync::OnceLock;

use icu_segmenter::WordSegmenter;
use serde::{
    Deserialize,
    Serialize,
};

/// Strategy for splitting a contiguous Khmer run into words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentationMode {
    /// Locale-aware Unicode word segmentation (best-effort linguistic split).
    Segmenter,
    /// Greedy longest-match against the known-word set, aligning segments
    /// with dictionary entries.
    Dictionary,
}

// Requires icu_provider's `sync` feature so the compiled-data payloads are
// `Arc`-backed and the segmenter can live in a `static`.
fn word_segmenter() -> &'static WordSegmenter {
    static SEGMENTER: OnceLock<WordSegmenter> = OnceLock::new();
    SEGMENTER.get_or_init(WordSegmenter::new_auto)
}

/// Splits a Khmer run with the ICU word segmenter. Khmer has no spaces
/// between words, so this relies on the segmenter's dictionary/LSTM models;
/// the split may be imprecise for unknown words.
pub fn khmer_words_using_segmenter(run: &str) -> Vec<String> {
    if run.is_empty() {
        return Vec::new();
    }

    let mut words = Vec::new();
    let mut prev = 0;
    for boundary in word_segmenter().segment_str(run) {
        if boundary == prev {
            continue;
        }
        words.push(run[prev..boundary].to_string());
        prev = boundary;
    }

    words
}

/// Greedy longest-match segmentation: scan left to right, at each position
/// take the longest prefix accepted by `is_known`, otherwise emit a single
/// character and advance by one. Never loops, never skips input.
///
/// Membership is a predicate rather than a set so callers can exclude the
/// degenerate self-match when decomposing a single word against itself.
pub fn khmer_words_using_dictionary<F>(run: &str, is_known: F) -> Vec<String>
where
    F: Fn(&str) -> bool,
{
    let chars: Vec<char> = run.chars().collect();
    let mut words = Vec::new();

    let mut i = 0;
    while i < chars.len() {
        match longest_match_at(&chars, i, &is_known) {
            Some((word, consumed)) => {
                words.push(word);
                i += consumed;
            }
            None => {
                words.push(chars[i].to_string());
                i += 1;
            }
        }
    }

    words
}

/// Longest known prefix starting at `start`, with its length in chars.
fn longest_match_at<F>(chars: &[char], start: usize, is_known: &F) -> Option<(String, usize)>
where
    F: Fn(&str) -> bool,
{
    let mut candidate = String::new();
    let mut best: Option<(String, usize)> = None;

    for (offset, c) in chars[start..].iter().enumerate() {
        candidate.push(*c);
        if is_known(&candidate) {
            best = Some((candidate.clone(), offset + 1));
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn longest_match_wins() {
        let known = ["ab", "abc", "c"];
        let words = khmer_words_using_dictionary("abc", |s| known.contains(&s));
        assert_eq!(words, vec!["abc"]);
    }

    #[test]
    fn falls_back_to_single_chars() {
        let known = ["ab"];
        let words = khmer_words_using_dictionary("xaby", |s| known.contains(&s));
        assert_eq!(words, vec!["x", "ab", "y"]);
    }

    #[test]
    fn self_match_exclusion_forces_decomposition() {
        let known = ["ab", "abc", "c"];
        let whole = "abc";
        let words = khmer_words_using_dictionary(whole, |s| s != whole && known.contains(&s));
        assert_eq!(words, vec!["ab", "c"]);
    }

    #[test]
    fn dictionary_output_concatenates_to_input() {
        let known = ["ផ្លូវ", "ខ្វាក់"];
        let input = "ផ្លូវកខ្វេងកខ្វាក់";
        let words = khmer_words_using_dictionary(input, |s| known.contains(&s));
        assert_eq!(words.concat(), input);
    }

    #[test]
    fn segmenter_output_concatenates_to_input() {
        let input = "ផ្លូវកខ្វេងកខ្វាក់";
        let words = khmer_words_using_segmenter(input);
        assert!(!words.is_empty());
        assert_eq!(words.concat(), input);
    }

    #[test]
    fn segmenter_is_usable_from_multiple_threads() {
        let input = "ផ្លូវកខ្វេង";
        let baseline = khmer_words_using_segmenter(input);

        let handles: Vec<_> = (0..4)
            .map(|_| std::thread::spawn(move || khmer_words_using_segmenter(input)))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().expect("segmenter thread panicked"), baseline);
        }
    }
}
