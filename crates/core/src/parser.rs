//! Parser facade and options.
//!
//! [`ImageLinkParser`] bundles the engine's operations behind one value
//! holding [`ParseOptions`]. It keeps no per-call state, so one instance (or
//! the free functions at crate root, which use the defaults) can be shared
//! freely across threads.

use crate::builder;
use crate::dialect::detect;
use crate::link::{Caption, Dialect, ImageLink};
use crate::scan::{self, LinkMatch};
use crate::segment::classify;

/// Which embeds the parser recognizes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParseOptions {
    /// Recognize `![[path|...]]` embeds.
    pub wiki: bool,
    /// Recognize `![...](path)` embeds.
    pub markdown: bool,
    /// Ignore embeds inside fenced code blocks when scanning documents.
    pub skip_code_fences: bool,
}

impl ParseOptions {
    /// Both dialects, code fences scanned like any other text.
    pub const fn all() -> Self {
        Self {
            wiki: true,
            markdown: true,
            skip_code_fences: false,
        }
    }

    /// Both dialects, embeds inside fenced code blocks ignored.
    pub const fn editor() -> Self {
        Self {
            skip_code_fences: true,
            ..Self::all()
        }
    }

    /// Only `![[...]]` embeds.
    pub const fn wiki_only() -> Self {
        Self {
            markdown: false,
            ..Self::all()
        }
    }

    /// Only `![...](...)` embeds.
    pub const fn markdown_only() -> Self {
        Self {
            wiki: false,
            ..Self::all()
        }
    }

    /// Whether embeds of `dialect` are recognized.
    pub const fn accepts(&self, dialect: Dialect) -> bool {
        match dialect {
            Dialect::Wiki => self.wiki,
            Dialect::Markdown => self.markdown,
        }
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self::all()
    }
}

/// Image-link attribute engine configured with [`ParseOptions`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ImageLinkParser {
    options: ParseOptions,
}

impl ImageLinkParser {
    /// Create a parser with the given options.
    pub const fn new(options: ParseOptions) -> Self {
        Self { options }
    }

    /// Options this parser was built with.
    pub const fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Parse an isolated embed, or `None` if it is not a recognized embed.
    pub fn parse(&self, candidate: &str) -> Option<ImageLink> {
        let raw = detect(candidate)?;
        if !self.options.accepts(raw.dialect) {
            return None;
        }
        Some(classify(&raw))
    }

    /// Serialize attributes into canonical link text.
    pub fn build(&self, link: &ImageLink) -> String {
        builder::build(link)
    }

    /// Every embed in `document`, ordered by byte offset.
    pub fn extract_all<'a>(&self, document: &'a str) -> Vec<LinkMatch<'a>> {
        scan::scan(document, &self.options)
    }

    /// Embeds in `document` that reference `path`.
    pub fn find_links_to<'a>(&self, document: &'a str, path: &str) -> Vec<LinkMatch<'a>> {
        scan::find_links_to(document, path, &self.options)
    }

    /// Rewrite every embed of `path` in `document` through `edit`.
    pub fn rewrite_links(
        &self,
        document: &str,
        path: &str,
        edit: impl FnMut(ImageLink) -> ImageLink,
    ) -> (String, usize) {
        scan::rewrite_links(document, path, &self.options, edit)
    }

    /// Caption from already rendered alt text.
    pub fn normalize_caption(&self, alt: &str) -> Caption {
        normalize_caption(alt)
    }
}

/// Parse an isolated embed with default options.
///
/// ```
/// use pixlink_core::{Alignment, Caption, parse};
///
/// let link = parse("![[photo.png|Sunset|center|640x]]").unwrap();
/// assert_eq!(link.path(), "photo.png");
/// assert_eq!(link.caption(), &Caption::Text("Sunset".into()));
/// assert_eq!(link.alignment(), Some(Alignment::Center));
/// assert_eq!(link.size().unwrap().to_string(), "640x");
/// ```
pub fn parse(candidate: &str) -> Option<ImageLink> {
    ImageLinkParser::default().parse(candidate)
}

/// Every embed in `document` with default options.
pub fn extract_all(document: &str) -> Vec<LinkMatch<'_>> {
    ImageLinkParser::default().extract_all(document)
}

/// Caption from rendered alt text: everything before the first `|`, trimmed,
/// blank when empty. No path or dialect extraction is attempted.
pub fn normalize_caption(alt: &str) -> Caption {
    let head = alt.split('|').next().unwrap_or_default();
    Caption::from_text(head)
}
