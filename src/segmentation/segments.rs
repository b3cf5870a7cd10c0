use std::sync::OnceLock;

use regex::Regex;

use super::{
    classify::{
        classify_char,
        CharClass,
    },
    engine::{
        khmer_words_using_dictionary,
        khmer_words_using_segmenter,
        SegmentationMode,
    },
};
use crate::{
    core::{
        utils::escape_html,
        KhmineError,
    },
    dictionary::KnownWordSet,
};

/// One typed run of the input text. Concatenating the literal text of all
/// segments in order reproduces the escaped input exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextSegment {
    /// One or more consecutive Khmer word tokens from a single script run.
    Khmer { words: Vec<String> },
    /// A run of non-whitespace, non-Khmer text.
    NotKhmer { text: String },
    /// A run of whitespace, preserved verbatim (including newlines).
    Whitespace { text: String },
}

impl TextSegment {
    pub fn literal_text(&self) -> String {
        match self {
            TextSegment::Khmer { words } => words.concat(),
            TextSegment::NotKhmer { text } | TextSegment::Whitespace { text } => text.clone(),
        }
    }
}

fn html_detection_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?is)<[a-z].*>").expect("valid regex"))
}

/// Splits plain text into typed segments, segmenting Khmer runs with the
/// selected strategy.
///
/// Rejects input containing raw HTML tag syntax: markup must go through the
/// colorizer, which handles tags separately. The input is HTML-escaped before
/// segmenting so downstream rendering is injection-safe.
pub fn generate_segments(
    text: &str,
    mode: SegmentationMode,
    known_words: &KnownWordSet,
) -> Result<Vec<TextSegment>, KhmineError> {
    if html_detection_regex().is_match(text) {
        let snippet: String = text.chars().take(50).collect();
        return Err(KhmineError::HtmlInPlainText(snippet));
    }

    let safe_text = escape_html(text);

    let mut segments = Vec::new();
    for (class, run) in split_runs(&safe_text) {
        match class {
            CharClass::Khmer => {
                let words = match mode {
                    SegmentationMode::Segmenter => khmer_words_using_segmenter(&run),
                    SegmentationMode::Dictionary => {
                        khmer_words_using_dictionary(&run, |s| known_words.has(s))
                    }
                };
                segments.push(TextSegment::Khmer { words });
            }
            CharClass::Whitespace => segments.push(TextSegment::Whitespace { text: run }),
            CharClass::NotKhmer => segments.push(TextSegment::NotKhmer { text: run }),
        }
    }

    Ok(segments)
}

/// Maximal runs of same-class characters, in input order.
fn split_runs(text: &str) -> Vec<(CharClass, String)> {
    let mut runs: Vec<(CharClass, String)> = Vec::new();

    for c in text.chars() {
        let class = classify_char(c);
        match runs.last_mut() {
            Some((last_class, run)) if *last_class == class => run.push(c),
            _ => runs.push((class, c.to_string())),
        }
    }

    runs
}
