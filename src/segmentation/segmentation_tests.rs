use std::collections::HashMap;

use proptest::prelude::*;

use super::{
    enhance_segments,
    generate_segments,
    khmer_words_of_segments,
    EnhancedTextSegment,
    SegmentationMode,
    TextSegment,
};
use crate::{
    core::{
        utils::escape_html,
        KhmineError,
    },
    dictionary::KnownWordSet,
};

fn sample_known_words() -> KnownWordSet {
    KnownWordSet::from_words(["ផ្លូវ", "ខ្វាក់", "កខ្វេង"])
}

fn concat_segments(segments: &[TextSegment]) -> String {
    segments.iter().map(|s| s.literal_text()).collect()
}

#[test]
fn rejects_html_input() {
    let result = generate_segments("hello <b>world</b>", SegmentationMode::Segmenter, &sample_known_words());
    assert!(matches!(result, Err(KhmineError::HtmlInPlainText(_))));
}

#[test]
fn plain_text_with_angle_like_math_is_accepted() {
    // "a < b" is not tag syntax, it must escape and pass through
    let segments =
        generate_segments("a < b", SegmentationMode::Segmenter, &sample_known_words()).unwrap();
    assert_eq!(concat_segments(&segments), "a &lt; b");
}

#[test]
fn dictionary_mode_aligns_with_known_words() {
    let known = sample_known_words();
    let segments =
        generate_segments("ផ្លូវកខ្វេងខ្វាក់", SegmentationMode::Dictionary, &known).unwrap();

    assert_eq!(segments.len(), 1);
    match &segments[0] {
        TextSegment::Khmer { words } => {
            assert_eq!(words, &vec!["ផ្លូវ".to_string(), "កខ្វេង".to_string(), "ខ្វាក់".to_string()]);
        }
        other => panic!("expected khmer segment, got {:?}", other),
    }
}

#[test]
fn unknown_khmer_falls_back_to_single_chars() {
    let known = KnownWordSet::from_words(["ផ្លូវ"]);
    let segments = generate_segments("ផ្លូវកក", SegmentationMode::Dictionary, &known).unwrap();

    match &segments[0] {
        TextSegment::Khmer { words } => {
            assert_eq!(words, &vec!["ផ្លូវ".to_string(), "ក".to_string(), "ក".to_string()]);
        }
        other => panic!("expected khmer segment, got {:?}", other),
    }
}

#[test]
fn mixed_text_alternates_segment_kinds() {
    let segments = generate_segments(
        "ផ្លូវ  tst កខ្វេង",
        SegmentationMode::Dictionary,
        &sample_known_words(),
    )
    .unwrap();

    let kinds: Vec<&str> = segments
        .iter()
        .map(|s| match s {
            TextSegment::Khmer { .. } => "khmer",
            TextSegment::NotKhmer { .. } => "notKhmer",
            TextSegment::Whitespace { .. } => "whitespace",
        })
        .collect();
    assert_eq!(kinds, vec!["khmer", "whitespace", "notKhmer", "whitespace", "khmer"]);

    // Whitespace is preserved verbatim, both spaces
    assert_eq!(segments[1], TextSegment::Whitespace { text: "  ".to_string() });
}

#[test]
fn newlines_are_preserved_verbatim() {
    let segments =
        generate_segments("ក\r\nខ", SegmentationMode::Dictionary, &sample_known_words()).unwrap();
    assert_eq!(concat_segments(&segments), "ក\r\nខ");
}

#[test]
fn generation_is_restartable() {
    let known = sample_known_words();
    let input = "ផ្លូវ abc ខ្វាក់";
    let first = generate_segments(input, SegmentationMode::Dictionary, &known).unwrap();
    let second = generate_segments(input, SegmentationMode::Dictionary, &known).unwrap();
    assert_eq!(first, second);
}

#[test]
fn enhance_attaches_definitions_and_passes_rest_through() {
    let known = sample_known_words();
    let segments =
        generate_segments("ផ្លូវ road", SegmentationMode::Dictionary, &known).unwrap();

    let mut definitions = HashMap::new();
    definitions.insert("ផ្លូវ".to_string(), "road, way".to_string());

    let enhanced = enhance_segments(&segments, &definitions);
    match &enhanced[0] {
        EnhancedTextSegment::Khmer { words } => {
            assert_eq!(words[0].word, "ផ្លូវ");
            assert_eq!(words[0].definition.as_deref(), Some("road, way"));
        }
        other => panic!("expected khmer segment, got {:?}", other),
    }
    assert_eq!(enhanced[1], EnhancedTextSegment::Whitespace { text: " ".to_string() });
    assert_eq!(enhanced[2], EnhancedTextSegment::NotKhmer { text: "road".to_string() });
}

#[test]
fn khmer_words_of_segments_deduplicates() {
    let known = sample_known_words();
    let segments =
        generate_segments("ផ្លូវ abc ផ្លូវកខ្វេង", SegmentationMode::Dictionary, &known).unwrap();

    let words: Vec<String> = khmer_words_of_segments(&segments).into_iter().collect();
    assert_eq!(words, vec!["កខ្វេង".to_string(), "ផ្លូវ".to_string()]);
}

fn plain_char() -> impl Strategy<Value = char> {
    prop_oneof![
        prop::char::range('\u{1780}', '\u{17B5}'),
        prop::char::range('a', 'z'),
        Just(' '),
        Just('\n'),
        Just('&'),
        Just('"'),
        Just('\''),
        Just('>'),
    ]
}

proptest! {
    // Concatenating segment text reproduces the escaped input exactly,
    // for both segmentation strategies.
    #[test]
    fn losslessness(chars in prop::collection::vec(plain_char(), 0..40)) {
        let input: String = chars.into_iter().collect();
        let known = sample_known_words();

        for mode in [SegmentationMode::Segmenter, SegmentationMode::Dictionary] {
            let segments = generate_segments(&input, mode, &known).unwrap();
            prop_assert_eq!(concat_segments(&segments), escape_html(&input));
        }
    }
}
