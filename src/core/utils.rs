pub const MS_PER_MINUTE: i64 = 60_000;
pub const MS_PER_DAY: i64 = 86_400_000;

/// Escapes unsafe HTML characters so the text renders literally before any
/// `<span>` markup of our own gets injected around it.
pub fn escape_html(unsafe_text: &str) -> String {
    let mut escaped = String::with_capacity(unsafe_text.len());
    for c in unsafe_text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::escape_html;

    #[test]
    fn escapes_all_five_specials() {
        assert_eq!(escape_html(r#"a&b<c>d"e'f"#), "a&amp;b&lt;c&gt;d&quot;e&#039;f");
    }

    #[test]
    fn leaves_khmer_and_whitespace_untouched() {
        assert_eq!(escape_html("ផ្លូវ \n\tកខ្វេង"), "ផ្លូវ \n\tកខ្វេង");
    }
}
