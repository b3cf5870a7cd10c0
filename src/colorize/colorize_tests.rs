use regex::Regex;

use super::{
    colorize_html,
    colorize_text,
    khmer_word_css_class,
    normalize_legacy_font,
    ColorizationMode,
};
use crate::dictionary::KnownWordSet;

fn known() -> KnownWordSet {
    KnownWordSet::from_words(["ផ្លូវ", "កខ្វេង"])
}

/// Tags removed, entities decoded. For checking that colorization never
/// alters the visible text.
fn visible_text(html: &str) -> String {
    let stripped = Regex::new(r"<[^>]+>").unwrap().replace_all(html, "");
    html_escape::decode_html_entities(&stripped).into_owned()
}

#[test]
fn css_class_cycles_the_palette() {
    assert_eq!(khmer_word_css_class(0, true), "khmer--is-in-dictionary-color-0");
    assert_eq!(khmer_word_css_class(4, true), "khmer--is-in-dictionary-color-4");
    assert_eq!(khmer_word_css_class(5, true), "khmer--is-in-dictionary-color-0");
    assert_eq!(khmer_word_css_class(7, false), "khmer--is-not-in-dictionary");
}

#[test]
fn mode_none_is_identity() {
    let text = "ផ្លូវ and some latin";
    assert_eq!(colorize_text(text, ColorizationMode::None, &known()).unwrap(), text);

    let html = "<p>ផ្លូវ</p>";
    assert_eq!(colorize_html(html, ColorizationMode::None, &known()), html);
}

#[test]
fn plain_text_rejects_markup() {
    assert!(colorize_text("<b>ក</b>", ColorizationMode::Dictionary, &known()).is_err());
}

#[test]
fn dictionary_mode_colors_known_words_inline() {
    let out = colorize_text("ផ្លូវ road", ColorizationMode::Dictionary, &known()).unwrap();
    assert_eq!(
        out,
        r#"<span style="color:#569cd6;font-weight:500;">ផ្លូវ</span> road"#
    );
}

#[test]
fn unknown_words_do_not_advance_the_palette() {
    // "ក" is not in the dictionary; the following known word must still
    // start at the first palette color.
    let out = colorize_text("កផ្លូវ", ColorizationMode::Dictionary, &known()).unwrap();
    assert_eq!(
        out,
        concat!(
            r#"<span style="color:#ff5555; text-decoration: underline decoration-dotted;">ក</span>"#,
            r#"<span style="color:#569cd6;font-weight:500;">ផ្លូវ</span>"#
        )
    );
}

#[test]
fn colorization_preserves_visible_text() {
    let input = "a & \"b\" ផ្លូវ កខ្វេង!";
    for mode in [ColorizationMode::Segmenter, ColorizationMode::Dictionary] {
        let out = colorize_text(input, mode, &known()).unwrap();
        assert_eq!(visible_text(&out), input);
    }
}

#[test]
fn html_markup_passes_through_verbatim() {
    let out = colorize_html(
        r#"<p lang="km">ផ្លូវកខ្វេង</p>"#,
        ColorizationMode::Dictionary,
        &known(),
    );
    assert_eq!(
        out,
        concat!(
            r#"<p lang="km">"#,
            r#"<span class="khmer--is-in-dictionary-color-0" data-navigate-khmer-word="ផ្លូវ">ផ្លូវ</span>"#,
            r#"<span class="khmer--is-in-dictionary-color-1" data-navigate-khmer-word="កខ្វេង">កខ្វេង</span>"#,
            "</p>"
        )
    );
}

#[test]
fn word_counter_threads_across_text_nodes() {
    let out = colorize_html(
        "<b>ផ្លូវកខ្វេង</b><i>ផ្លូវកខ្វេង</i>",
        ColorizationMode::Dictionary,
        &known(),
    );
    for class_index in 0..4 {
        assert!(
            out.contains(&format!("khmer--is-in-dictionary-color-{}", class_index)),
            "missing palette class {} in {}",
            class_index,
            out
        );
    }
}

#[test]
fn single_word_node_decomposes_against_the_rest_of_the_dictionary() {
    // The run equals a dictionary word; matching excludes the run itself,
    // so it falls apart into characters, none of which are entries.
    let out = colorize_html("<p>ផ្លូវ</p>", ColorizationMode::Dictionary, &known());
    assert!(!out.contains("khmer--is-in-dictionary-color"));
    let span_count = out.matches("khmer--is-not-in-dictionary").count();
    assert_eq!(span_count, "ផ្លូវ".chars().count());
    assert_eq!(visible_text(&out), "ផ្លូវ");
}

#[test]
fn script_and_style_content_is_left_alone() {
    // The run after the style block holds two words, so neither is a
    // self-match and both get wrapped.
    let out = colorize_html(
        "<style>.km { color: red }</style>ផ្លូវកខ្វេង",
        ColorizationMode::Dictionary,
        &known(),
    );
    assert!(out.starts_with("<style>.km { color: red }</style>"));
    assert!(out.contains("data-navigate-khmer-word=\"ផ្លូវ\""));
    assert!(out.contains("data-navigate-khmer-word=\"កខ្វេង\""));
}

#[test]
fn khmer_inside_a_quoted_attribute_is_not_colorized() {
    // The '>' inside the title value does not end the tag; the attribute
    // must come through untouched.
    let input = r#"<a title="x>ផ្លូវកខ្វេង">link</a>"#;
    assert_eq!(colorize_html(input, ColorizationMode::Dictionary, &known()), input);
}

#[test]
fn html_colorization_is_deterministic() {
    let input = "<p>ផ្លូវ and កខ្វេង</p>";
    let first = colorize_html(input, ColorizationMode::Dictionary, &known());
    let second = colorize_html(input, ColorizationMode::Dictionary, &known());
    assert_eq!(first, second);
}

#[test]
fn legacy_font_tags_become_spans() {
    assert_eq!(
        normalize_legacy_font(r#"a <font color="blue">label</font> b"#),
        r#"a <span class="khmer--blue-lbl">label</span> b"#
    );
    assert_eq!(
        normalize_legacy_font("<FONT COLOR='#000099'>x</FONT>"),
        r#"<span class="khmer--blue-lbl">x</span>"#
    );
    // Other colors are untouched
    let red = r#"<font color="red">x</font>"#;
    assert_eq!(normalize_legacy_font(red), red);
}

#[test]
fn colorize_html_applies_the_legacy_transform() {
    let out = colorize_html(
        r#"<font color="blue">pos</font>"#,
        ColorizationMode::Dictionary,
        &known(),
    );
    assert_eq!(out, r#"<span class="khmer--blue-lbl">pos</span>"#);
}
