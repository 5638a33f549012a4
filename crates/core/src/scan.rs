//! Document-level embed scanning.
//!
//! Finds every embed in a block of text, in document order, with its byte
//! offset, so all references to one image can be located and rewritten
//! without an editor.

use std::ops::Range;

use serde::Serialize;

use crate::code_fence::FenceTracker;
use crate::dialect::{RawLink, match_markdown, match_wiki};
use crate::link::ImageLink;
use crate::parser::ParseOptions;
use crate::segment::classify;

const EMBED_START: &str = "![";

/// One embed found in a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkMatch<'a> {
    /// Exact embed text as written.
    pub matched: &'a str,
    /// Byte offset of `matched` in the scanned document.
    pub offset: usize,
    /// Parsed attributes.
    pub link: ImageLink,
}

impl LinkMatch<'_> {
    /// Byte offset just past the embed.
    pub fn end(&self) -> usize {
        self.offset + self.matched.len()
    }

    /// Byte range of the embed in the scanned document.
    pub fn range(&self) -> Range<usize> {
        self.offset..self.end()
    }
}

/// Find every non-overlapping embed in `document`, ordered by offset.
pub fn scan<'a>(document: &'a str, options: &ParseOptions) -> Vec<LinkMatch<'a>> {
    let mut matches = Vec::new();
    let mut fences = FenceTracker::new();
    let mut line_offset = 0usize;

    for line in document.split_inclusive('\n') {
        if options.skip_code_fences && fences.observe(line) {
            if line.contains(EMBED_START) {
                log::debug!("skipping embed-like text inside code fence at byte {line_offset}");
            }
        } else {
            scan_line(line, line_offset, options, &mut matches);
        }
        line_offset += line.len();
    }

    matches
}

fn scan_line<'a>(
    line: &'a str,
    line_offset: usize,
    options: &ParseOptions,
    matches: &mut Vec<LinkMatch<'a>>,
) {
    let mut cursor = 0usize;
    while let Some(found) = line[cursor..].find(EMBED_START) {
        let start = cursor + found;
        match match_embed(&line[start..], options) {
            Some((raw, len)) => {
                matches.push(LinkMatch {
                    matched: &line[start..start + len],
                    offset: line_offset + start,
                    link: classify(&raw),
                });
                cursor = start + len;
            }
            None => {
                log::debug!(
                    "text at byte {} looks like an embed but is not one",
                    line_offset + start
                );
                cursor = start + EMBED_START.len();
            }
        }
    }
}

/// Wiki shape first, then markdown, restricted to the enabled dialects.
fn match_embed<'a>(text: &'a str, options: &ParseOptions) -> Option<(RawLink<'a>, usize)> {
    let wiki = if options.wiki { match_wiki(text) } else { None };
    wiki.or_else(|| {
        if options.markdown {
            match_markdown(text)
        } else {
            None
        }
    })
}

/// Embeds whose path equals `path` (compared after trimming).
pub fn find_links_to<'a>(
    document: &'a str,
    path: &str,
    options: &ParseOptions,
) -> Vec<LinkMatch<'a>> {
    let path = path.trim();
    scan(document, options)
        .into_iter()
        .filter(|found| found.link.path() == path)
        .collect()
}

/// Replace every embed of `path` with the serialization of `edit(link)`.
///
/// All other text is copied unchanged. Returns the new document and the
/// number of embeds rewritten.
pub fn rewrite_links(
    document: &str,
    path: &str,
    options: &ParseOptions,
    mut edit: impl FnMut(ImageLink) -> ImageLink,
) -> (String, usize) {
    let found = find_links_to(document, path, options);
    let mut output = String::with_capacity(document.len());
    let mut copied_to = 0usize;

    for link_match in &found {
        output.push_str(&document[copied_to..link_match.offset]);
        let edited = edit(link_match.link.clone());
        output.push_str(&edited.to_string());
        copied_to = link_match.end();
    }
    output.push_str(&document[copied_to..]);

    (output, found.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::link::{Caption, Dialect};
    use crate::tokens::{Alignment, ImageSize};

    fn all() -> ParseOptions {
        ParseOptions::all()
    }

    #[test]
    fn finds_both_dialects_in_offset_order() {
        let doc = "Intro ![A cat|center](cat.png) then ![[dog.png|A dog|300]] end.";
        let found = scan(doc, &all());

        assert_eq!(found.len(), 2);
        assert_eq!(found[0].matched, "![A cat|center](cat.png)");
        assert_eq!(found[0].offset, 6);
        assert_eq!(found[0].link.dialect(), Dialect::Markdown);
        assert_eq!(found[0].link.path(), "cat.png");
        assert_eq!(found[0].link.alignment(), Some(Alignment::Center));

        assert_eq!(found[1].matched, "![[dog.png|A dog|300]]");
        assert_eq!(found[1].offset, doc.find("![[").unwrap());
        assert_eq!(found[1].link.path(), "dog.png");
        assert_eq!(found[1].link.caption(), &Caption::Text("A dog".into()));
        assert_eq!(found[1].link.size(), Some(ImageSize::width_only(300).unwrap()));
        assert_eq!(&doc[found[1].range()], found[1].matched);
    }

    #[test]
    fn offsets_span_lines() {
        let doc = "line one\n![[a.png]]\n\n  ![b](b.png)";
        let found = scan(doc, &all());
        assert_eq!(found.len(), 2);
        for link_match in &found {
            assert_eq!(&doc[link_match.range()], link_match.matched);
        }
        assert_eq!(found[0].offset, 9);
    }

    #[test]
    fn adjacent_embeds_do_not_overlap() {
        let doc = "![[a.png]]![[b.png]]![c](c.png)";
        let paths: Vec<_> = scan(doc, &all())
            .iter()
            .map(|m| m.link.path().to_string())
            .collect();
        assert_eq!(paths, ["a.png", "b.png", "c.png"]);
    }

    #[test]
    fn lookalikes_are_omitted() {
        let doc = "![[]] ![no target] ![x]() [[note]] ![[ok.png]] ![[broken";
        let found = scan(doc, &all());
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].matched, "![[ok.png]]");
    }

    #[test]
    fn multibyte_text_keeps_byte_offsets() {
        let doc = "画像 ![[猫.png|ねこ]]";
        let found = scan(doc, &all());
        assert_eq!(found[0].offset, "画像 ".len());
        assert_eq!(found[0].link.path(), "猫.png");
    }

    #[test]
    fn dialects_can_be_disabled() {
        let doc = "![[a.png]] ![b](b.png)";
        let wiki = scan(doc, &ParseOptions::wiki_only());
        assert_eq!(wiki.len(), 1);
        assert_eq!(wiki[0].link.dialect(), Dialect::Wiki);

        let markdown = scan(doc, &ParseOptions::markdown_only());
        assert_eq!(markdown.len(), 1);
        assert_eq!(markdown[0].link.dialect(), Dialect::Markdown);
    }

    #[test]
    fn code_fences_are_scanned_unless_skipped() {
        let doc = "![[a.png]]\n```\n![[b.png]]\n```\n![[c.png]]\n";
        assert_eq!(scan(doc, &all()).len(), 3);

        let skipped = scan(doc, &ParseOptions::editor());
        let paths: Vec<_> = skipped.iter().map(|m| m.link.path()).collect();
        assert_eq!(paths, ["a.png", "c.png"]);
    }

    #[test]
    fn find_links_to_filters_by_path() {
        let doc = "![[a.png|100]] ![[b.png]] ![cap](a.png)";
        let found = find_links_to(doc, " a.png ", &all());
        assert_eq!(found.len(), 2);
        assert!(found.iter().all(|m| m.link.path() == "a.png"));
    }

    #[test]
    fn rewrite_links_updates_only_matching_embeds() {
        let doc = "A ![[a.png|Cap|100]] B ![[b.png|50]] C ![x|left](a.png) D";
        let new_size = ImageSize::new(640, 480).unwrap();
        let (rewritten, count) =
            rewrite_links(doc, "a.png", &all(), |link| link.with_size(Some(new_size)));

        assert_eq!(count, 2);
        assert_eq!(
            rewritten,
            "A ![[a.png|Cap|640x480]] B ![[b.png|50]] C ![x|left|640x480](a.png) D"
        );
    }

    #[test]
    fn unclosed_wiki_lookalike_does_not_absorb_next_embed() {
        let doc = "Draft ![[a.png|x] then ![[c.png|300]] end";
        let found = scan(doc, &all());
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].matched, "![[c.png|300]]");
        assert_eq!(found[0].link.caption(), &Caption::Blank);

        assert_eq!(find_links_to(doc, "c.png", &all()).len(), 1);
        let (rewritten, count) = rewrite_links(doc, "a.png", &all(), |link| {
            link.with_size(Some(ImageSize::new(10, 10).unwrap()))
        });
        assert_eq!(count, 0);
        assert_eq!(rewritten, doc);
    }

    #[test]
    fn bracketed_alt_before_wiki_embed_keeps_both() {
        let doc = "![[a](b.png) ![[c.png]]";
        let paths: Vec<_> = scan(doc, &all())
            .iter()
            .map(|m| m.link.path().to_string())
            .collect();
        assert_eq!(paths, ["b.png", "c.png"]);
    }

    #[test]
    fn rewrite_without_matches_is_identity() {
        let doc = "nothing ![[b.png]] here";
        let (rewritten, count) = rewrite_links(doc, "a.png", &all(), |link| link);
        assert_eq!(count, 0);
        assert_eq!(rewritten, doc);
    }
}
