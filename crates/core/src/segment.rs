//! Attribute disambiguation.
//!
//! Decides which raw segment is the size, which is the alignment and what is
//! left for the caption. The two dialects scan differently:
//!
//! - **wiki** scans from the end: the *last* size token is taken first, then
//!   the *last* alignment token among what remains. Everything else is
//!   re-joined with `|`, so captions keep literal pipes.
//! - **markdown** treats segment 0 as the caption and scans the rest from the
//!   start: the *first* size and the *first* alignment win independently.
//!   Unclassified trailing segments are dropped.
//!
//! A caption that is itself a valid size or alignment keyword in a scanned
//! position is classified as that attribute.

use crate::dialect::RawLink;
use crate::link::{Caption, Dialect, ImageLink};
use crate::tokens::{Alignment, ImageSize, parse_size_token};

/// Classified attributes of one embed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Segmented {
    /// Caption (blank when no text remains).
    pub caption: Caption,
    /// Alignment keyword, if one was found.
    pub alignment: Option<Alignment>,
    /// Size token, if one was found.
    pub size: Option<ImageSize>,
}

/// Classify raw segments according to `dialect`.
pub fn segment(dialect: Dialect, segments: &[&str]) -> Segmented {
    match dialect {
        Dialect::Wiki => segment_wiki(segments),
        Dialect::Markdown => segment_markdown(segments),
    }
}

/// Classify a detected embed into its structured form.
pub fn classify(raw: &RawLink<'_>) -> ImageLink {
    let Segmented {
        caption,
        alignment,
        size,
    } = segment(raw.dialect, &raw.segments);
    ImageLink::from_classified(raw.path, raw.dialect, caption, alignment, size)
}

fn segment_wiki(segments: &[&str]) -> Segmented {
    let mut remaining: Vec<&str> = segments.to_vec();

    let size = take_last(&mut remaining, parse_size_token);
    let alignment = take_last(&mut remaining, Alignment::from_token);

    if remaining.iter().any(|s| parse_size_token(s).is_some()) {
        log::trace!("wiki link has more than one size token; kept the last one");
    }

    // Leftovers that are all whitespace carry no caption text.
    let caption = if remaining.iter().all(|s| s.trim().is_empty()) {
        Caption::Blank
    } else {
        Caption::from_text(&remaining.join("|"))
    };

    Segmented {
        caption,
        alignment,
        size,
    }
}

/// Remove and return the last segment `classify` accepts.
fn take_last<T>(segments: &mut Vec<&str>, classify: impl Fn(&str) -> Option<T>) -> Option<T> {
    let (index, value) = segments
        .iter()
        .copied()
        .enumerate()
        .rev()
        .find_map(|(index, segment)| classify(segment).map(|value| (index, value)))?;
    segments.remove(index);
    Some(value)
}

fn segment_markdown(segments: &[&str]) -> Segmented {
    let Some((first, rest)) = segments.split_first() else {
        return Segmented::default();
    };

    let mut size = None;
    let mut alignment = None;
    for token in rest {
        if let Some(found) = parse_size_token(token) {
            if size.is_none() {
                size = Some(found);
            } else {
                log::trace!("markdown link has more than one size token; kept the first one");
            }
        } else if let Some(found) = Alignment::from_token(token) {
            if alignment.is_none() {
                alignment = Some(found);
            } else {
                log::trace!("markdown link has more than one alignment; kept the first one");
            }
        }
    }

    Segmented {
        caption: Caption::from_text(first),
        alignment,
        size,
    }
}
