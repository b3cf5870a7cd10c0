pub mod html;

use std::sync::OnceLock;

use regex::Regex;
use serde::{
    Deserialize,
    Serialize,
};

use crate::{
    core::KhmineError,
    dictionary::KnownWordSet,
    segmentation::{
        classify::contains_khmer,
        engine::{
            khmer_words_using_dictionary,
            khmer_words_using_segmenter,
        },
        generate_segments,
        SegmentationMode,
        TextSegment,
    },
};

/// How Khmer text should be colorized for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorizationMode {
    /// Leave the text untouched.
    None,
    /// Color consecutive words in a rotating palette, split by the
    /// Unicode segmenter.
    Segmenter,
    /// Split against the dictionary; known words cycle the palette,
    /// unknown words get a warning style.
    Dictionary,
}

impl ColorizationMode {
    fn segmentation(self) -> Option<SegmentationMode> {
        match self {
            ColorizationMode::None => None,
            ColorizationMode::Segmenter => Some(SegmentationMode::Segmenter),
            ColorizationMode::Dictionary => Some(SegmentationMode::Dictionary),
        }
    }
}

/// Inline colors for plain-text rendering. The stylesheet classes
/// `khmer--is-in-dictionary-color-0` through `-4` mirror this palette.
pub const COLOR_PALETTE: [&str; 5] = [
    "#569cd6", // blue
    "#4ec9b0", // soft green
    "#c586c0", // pink/purple
    "#dcdcaa", // soft yellow
    "#ce9178", // orange
];

const UNKNOWN_WORD_STYLE: &str = "color:#ff5555; text-decoration: underline decoration-dotted;";

/// CSS class for a Khmer word span: a palette class for known words, the
/// warning class otherwise.
pub fn khmer_word_css_class(color_index: usize, is_known: bool) -> String {
    if is_known {
        format!(
            "khmer--is-in-dictionary-color-{}",
            color_index % COLOR_PALETTE.len()
        )
    } else {
        "khmer--is-not-in-dictionary".to_string()
    }
}

/// One Khmer word wrapped in a navigable span for HTML output.
fn render_khmer_word_span(word: &str, color_index: usize, is_known: bool) -> String {
    format!(
        r#"<span class="{}" data-navigate-khmer-word="{}">{}</span>"#,
        khmer_word_css_class(color_index, is_known),
        word,
        word
    )
}

/// Colorizes plain text. `ColorizationMode::None` returns the input
/// unchanged; otherwise the text is segmented and rendered as HTML spans.
///
/// Fails if the input already contains HTML tag syntax; markup goes through
/// [`colorize_html`] instead.
pub fn colorize_text(
    text: &str,
    mode: ColorizationMode,
    known_words: &KnownWordSet,
) -> Result<String, KhmineError> {
    let Some(segmentation) = mode.segmentation() else {
        return Ok(text.to_string());
    };

    let segments = generate_segments(text, segmentation, known_words)?;
    Ok(colorize_segments(&segments, mode, known_words))
}

/// Renders already-generated segments as an HTML string with inline colors.
///
/// The palette index is threaded across all segments in document order.
/// In segmenter mode every word advances it; in dictionary mode only known
/// words do, so unknown words never shift the coloring of their neighbors.
pub fn colorize_segments(
    segments: &[TextSegment],
    mode: ColorizationMode,
    known_words: &KnownWordSet,
) -> String {
    let mut word_counter = 0usize;
    let mut out = String::new();

    for segment in segments {
        match segment {
            TextSegment::NotKhmer { text } | TextSegment::Whitespace { text } => {
                out.push_str(text);
            }
            TextSegment::Khmer { words } => {
                for word in words {
                    match mode {
                        ColorizationMode::None => out.push_str(word),
                        ColorizationMode::Segmenter => {
                            let color = COLOR_PALETTE[word_counter % COLOR_PALETTE.len()];
                            word_counter += 1;
                            out.push_str(&format!(
                                r#"<span style="color:{};">{}</span>"#,
                                color, word
                            ));
                        }
                        ColorizationMode::Dictionary => {
                            if known_words.has(word) {
                                let color = COLOR_PALETTE[word_counter % COLOR_PALETTE.len()];
                                word_counter += 1;
                                out.push_str(&format!(
                                    r#"<span style="color:{};font-weight:500;">{}</span>"#,
                                    color, word
                                ));
                            } else {
                                out.push_str(&format!(
                                    r#"<span style="{}">{}</span>"#,
                                    UNKNOWN_WORD_STYLE, word
                                ));
                            }
                        }
                    }
                }
            }
        }
    }

    out
}

fn khmer_run_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\p{Khmer}+").expect("valid regex"))
}

fn legacy_font_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?i)<font\s+color=["']?(?:blue|#000099)["']?>(.*?)</font>"#)
            .expect("valid regex")
    })
}

/// Rewrites legacy `<font color="blue">`/`<font color="#000099">` markup,
/// still present in older dictionary entries, into a styleable span.
pub fn normalize_legacy_font(html: &str) -> String {
    legacy_font_regex()
        .replace_all(html, r#"<span class="khmer--blue-lbl">$1</span>"#)
        .into_owned()
}

/// Colorizes Khmer words inside an HTML string.
///
/// Only text nodes are touched; tags, attributes, comments and
/// `<script>`/`<style>` contents pass through verbatim. Each Khmer run is
/// split (in dictionary mode the run itself is excluded from matching, so a
/// single word decomposes into its parts) and every word becomes a navigable
/// span. The palette index is threaded across the whole document.
pub fn colorize_html(html: &str, mode: ColorizationMode, known_words: &KnownWordSet) -> String {
    if mode == ColorizationMode::None {
        return html.to_string();
    }

    let mut word_counter = 0usize;

    let rewritten = html::rewrite_text_nodes(html, |text| {
        if !contains_khmer(text) {
            return None;
        }

        let replaced = khmer_run_regex().replace_all(text, |caps: &regex::Captures| {
            let run = &caps[0];
            let words = match mode {
                ColorizationMode::Segmenter => khmer_words_using_segmenter(run),
                _ => khmer_words_using_dictionary(run, |s| s != run && known_words.has(s)),
            };

            let mut spans = String::new();
            for word in &words {
                spans.push_str(&render_khmer_word_span(
                    word,
                    word_counter,
                    known_words.has(word),
                ));
                word_counter += 1;
            }
            spans
        });

        Some(replaced.into_owned())
    });

    normalize_legacy_font(&rewritten)
}

#[cfg(test)]
mod colorize_tests;
