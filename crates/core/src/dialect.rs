//! Embed shape detection.
//!
//! Recognizes the two embed syntaxes and separates the image path from the
//! raw pipe-delimited attribute segments, without classifying the segments:
//!
//! - wiki: `![[path|seg|seg]]`, where the path is segment 0 of the pipe list
//! - markdown: `![seg|seg](path)`, where segment 0 is the caption slot and the
//!   path lives in the parentheses
//!
//! Neither shape may span a line.

use crate::link::Dialect;

const WIKI_OPEN: &str = "![[";
const WIKI_CLOSE: &str = "]]";
const MARKDOWN_OPEN: &str = "![";
const PIPE: char = '|';

/// Path and unclassified attribute segments of one embed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLink<'a> {
    /// Syntax the embed was written in.
    pub dialect: Dialect,
    /// Trimmed, non-empty path.
    pub path: &'a str,
    /// Raw segments in written order (untrimmed).
    ///
    /// Wiki: everything after the path. Markdown: the whole bracket content,
    /// so segment 0 is the caption slot.
    pub segments: Vec<&'a str>,
}

/// Detect an already isolated embed. Surrounding whitespace is ignored; any
/// other text before or after the embed makes it unrecognized.
pub fn detect(candidate: &str) -> Option<RawLink<'_>> {
    let text = candidate.trim();
    if let Some((raw, len)) = match_wiki(text)
        && len == text.len()
    {
        return Some(raw);
    }
    match match_markdown(text) {
        Some((raw, len)) if len == text.len() => Some(raw),
        _ => None,
    }
}

/// Match a wiki embed at the start of `text`, returning it and its byte length.
pub fn match_wiki(text: &str) -> Option<(RawLink<'_>, usize)> {
    let rest = text.strip_prefix(WIKI_OPEN)?;
    let close = rest.find(WIKI_CLOSE)?;
    let inner = &rest[..close];
    if inner.contains(['\n', ']']) {
        return None;
    }

    let mut parts = inner.split(PIPE);
    let path = parts.next().unwrap_or_default().trim();
    if path.is_empty() {
        return None;
    }

    let raw = RawLink {
        dialect: Dialect::Wiki,
        path,
        segments: parts.collect(),
    };
    Some((raw, WIKI_OPEN.len() + close + WIKI_CLOSE.len()))
}

/// Match a markdown embed at the start of `text`, returning it and its byte length.
pub fn match_markdown(text: &str) -> Option<(RawLink<'_>, usize)> {
    let rest = text.strip_prefix(MARKDOWN_OPEN)?;
    let bracket_end = rest.find([']', '\n'])?;
    if rest.as_bytes()[bracket_end] != b']' {
        return None;
    }
    let alt = &rest[..bracket_end];

    let after_bracket = &rest[bracket_end + 1..];
    let target = after_bracket.strip_prefix('(')?;
    let target_len = scan_target(target)?;
    let path = target[..target_len].trim();
    if path.is_empty() {
        return None;
    }

    let raw = RawLink {
        dialect: Dialect::Markdown,
        path,
        segments: alt.split(PIPE).collect(),
    };
    // "![" + alt + "](" + target + ")"
    let len = MARKDOWN_OPEN.len() + bracket_end + 2 + target_len + 1;
    Some((raw, len))
}

/// Length of a parenthesized target up to (not including) its closing `)`.
///
/// One level of nested parentheses is allowed so `img(1).png` works; a second
/// level, an unbalanced `(`, or a newline rejects the target.
fn scan_target(target: &str) -> Option<usize> {
    let mut nested = false;
    for (index, byte) in target.bytes().enumerate() {
        match byte {
            b'\n' => return None,
            b'(' if nested => return None,
            b'(' => nested = true,
            b')' if nested => nested = false,
            b')' => return Some(index),
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wiki_path_and_segments() {
        let raw = detect("![[img.png|caption| 300 |left]]").unwrap();
        assert_eq!(raw.dialect, Dialect::Wiki);
        assert_eq!(raw.path, "img.png");
        assert_eq!(raw.segments, vec!["caption", " 300 ", "left"]);
    }

    #[test]
    fn wiki_without_attributes() {
        let raw = detect("![[img.png]]").unwrap();
        assert_eq!(raw.path, "img.png");
        assert!(raw.segments.is_empty());
    }

    #[test]
    fn wiki_path_is_trimmed() {
        let raw = detect("  ![[ folder/my image.png |x]]  ").unwrap();
        assert_eq!(raw.path, "folder/my image.png");
        assert_eq!(raw.segments, vec!["x"]);
    }

    #[test]
    fn wiki_rejects_empty_path() {
        assert!(detect("![[]]").is_none());
        assert!(detect("![[ |300]]").is_none());
    }

    #[test]
    fn markdown_caption_slot_and_path() {
        let raw = detect("![A cat|center|300x200](cat.png)").unwrap();
        assert_eq!(raw.dialect, Dialect::Markdown);
        assert_eq!(raw.path, "cat.png");
        assert_eq!(raw.segments, vec!["A cat", "center", "300x200"]);
    }

    #[test]
    fn markdown_empty_alt_has_one_empty_segment() {
        let raw = detect("![]( cat.png )").unwrap();
        assert_eq!(raw.path, "cat.png");
        assert_eq!(raw.segments, vec![""]);
    }

    #[test]
    fn markdown_nested_parenthesis_path() {
        let raw = detect("![cap](my(1).png)").unwrap();
        assert_eq!(raw.path, "my(1).png");

        let raw = detect("![cap](https://example.com/a_(b)_c(d).png)").unwrap();
        assert_eq!(raw.path, "https://example.com/a_(b)_c(d).png");
    }

    #[test]
    fn markdown_double_nesting_is_out_of_contract() {
        assert!(detect("![cap](my((1)).png)").is_none());
    }

    #[test]
    fn markdown_rejects_empty_path_and_unclosed_target() {
        assert!(detect("![cap]()").is_none());
        assert!(detect("![cap](   )").is_none());
        assert!(detect("![cap](img.png").is_none());
        assert!(detect("![cap] (img.png)").is_none());
    }

    #[test]
    fn trailing_text_is_not_an_embed() {
        assert!(detect("![[img.png]] and more").is_none());
        assert!(detect("![a](b.png) tail").is_none());
        assert!(detect("see ![[img.png]]").is_none());
    }

    #[test]
    fn plain_text_is_not_an_embed() {
        for input in ["", "hello", "[[note]]", "[link](url)", "![[unterminated", "!["] {
            assert!(detect(input).is_none(), "{input:?}");
        }
    }

    #[test]
    fn embeds_do_not_span_lines() {
        assert!(detect("![[img.png|cap\ntion]]").is_none());
        assert!(detect("![cap\ntion](img.png)").is_none());
        assert!(detect("![cap](img\n.png)").is_none());
    }

    #[test]
    fn wiki_content_cannot_hold_a_closing_bracket() {
        assert!(detect("![[a.png|x] then ![[c.png|300]]").is_none());
        assert!(match_wiki("![[a.png|cap]tion]]").is_none());
    }

    #[test]
    fn match_reports_length_of_prefix() {
        let text = "![[a.png|300]] trailing";
        let (_, len) = match_wiki(text).unwrap();
        assert_eq!(&text[..len], "![[a.png|300]]");

        let text = "![x](b(1).png) trailing";
        let (_, len) = match_markdown(text).unwrap();
        assert_eq!(&text[..len], "![x](b(1).png)");
    }
}
