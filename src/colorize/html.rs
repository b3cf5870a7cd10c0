/// Streaming rewrite of the text nodes of an HTML string.
///
/// Markup passes through byte for byte: tags (with their attributes),
/// comments, CDATA sections, and the raw contents of `<script>`/`<style>`
/// elements are copied verbatim. Only text between tags is offered to
/// `transform`, which returns `Some(replacement_html)` to substitute the
/// node or `None` to keep it unchanged.
///
/// Malformed input (an unclosed tag or comment) is copied through as-is
/// rather than rejected, matching lenient browser behavior.
pub fn rewrite_text_nodes<F>(html: &str, mut transform: F) -> String
where
    F: FnMut(&str) -> Option<String>,
{
    let mut out = String::with_capacity(html.len());
    let mut rest = html;

    while !rest.is_empty() {
        let Some(lt) = rest.find('<') else {
            flush_text(&mut out, rest, &mut transform);
            break;
        };

        flush_text(&mut out, &rest[..lt], &mut transform);
        rest = &rest[lt..];

        if rest.starts_with("<!--") {
            rest = copy_until(&mut out, rest, "-->");
        } else if rest.starts_with("<![CDATA[") {
            rest = copy_until(&mut out, rest, "]]>");
        } else {
            // A tag (or a stray '<' that the browser would treat as one).
            let Some(gt) = tag_end(rest) else {
                out.push_str(rest);
                break;
            };
            let tag = &rest[..=gt];
            out.push_str(tag);
            rest = &rest[gt + 1..];

            if let Some(name) = opening_tag_name(tag) {
                if name.eq_ignore_ascii_case("script") || name.eq_ignore_ascii_case("style") {
                    let closing = format!("</{}", name.to_ascii_lowercase());
                    match find_ignore_ascii_case(rest, &closing) {
                        Some(end) => {
                            out.push_str(&rest[..end]);
                            rest = &rest[end..];
                        }
                        None => {
                            out.push_str(rest);
                            break;
                        }
                    }
                }
            }
        }
    }

    out
}

fn flush_text<F>(out: &mut String, text: &str, transform: &mut F)
where
    F: FnMut(&str) -> Option<String>,
{
    if text.is_empty() {
        return;
    }
    match transform(text) {
        Some(replacement) => out.push_str(&replacement),
        None => out.push_str(text),
    }
}

/// Copies `rest` up to and including `marker` (or all of it when the marker
/// never appears) and returns what follows.
fn copy_until<'a>(out: &mut String, rest: &'a str, marker: &str) -> &'a str {
    match rest.find(marker) {
        Some(pos) => {
            let end = pos + marker.len();
            out.push_str(&rest[..end]);
            &rest[end..]
        }
        None => {
            out.push_str(rest);
            ""
        }
    }
}

/// Index of the `>` closing the tag at the start of `rest`. A `>` inside a
/// quoted attribute value does not end the tag.
fn tag_end(rest: &str) -> Option<usize> {
    let mut quote: Option<u8> = None;
    for (i, b) in rest.bytes().enumerate() {
        match quote {
            Some(q) => {
                if b == q {
                    quote = None;
                }
            }
            None => match b {
                b'"' | b'\'' => quote = Some(b),
                b'>' => return Some(i),
                _ => {}
            },
        }
    }
    None
}

/// Element name of an opening tag like `<script src="x">`, or `None` for
/// closing tags and self-closing ones.
fn opening_tag_name(tag: &str) -> Option<&str> {
    let inner = tag.strip_prefix('<')?;
    if inner.starts_with('/') || tag.ends_with("/>") {
        return None;
    }
    let end = inner
        .char_indices()
        .find(|(_, c)| !c.is_ascii_alphanumeric())
        .map(|(i, _)| i)
        .unwrap_or(inner.len());
    if end == 0 {
        None
    } else {
        Some(&inner[..end])
    }
}

fn find_ignore_ascii_case(haystack: &str, needle: &str) -> Option<usize> {
    let haystack = haystack.as_bytes();
    let needle = needle.as_bytes();
    if needle.is_empty() || haystack.len() < needle.len() {
        return None;
    }
    (0..=haystack.len() - needle.len())
        .find(|&i| haystack[i..i + needle.len()].eq_ignore_ascii_case(needle))
}
