//! Link text serialization.
//!
//! Writes attributes back in canonical order, whatever order they were
//! declared in:
//!
//! ```text
//! wiki:      ![[path|caption|alignment|size]]
//! markdown:  ![caption|alignment|size](path)
//! ```
//!
//! A blank caption is omitted in wiki links and written as an empty caption
//! slot in markdown links. Sizes are written in their stored format.

use std::fmt::{self, Write};

use crate::link::{Dialect, ImageLink};

/// Serialize `link` into its dialect's canonical text.
pub fn build(link: &ImageLink) -> String {
    let mut out = String::with_capacity(link.path().len() + 16);
    // Writing into a String cannot fail.
    write_link(&mut out, link).ok();
    out
}

pub(crate) fn write_link(out: &mut impl Write, link: &ImageLink) -> fmt::Result {
    match link.dialect() {
        Dialect::Wiki => {
            write!(out, "![[{}", link.path())?;
            if let Some(caption) = link.caption().as_text() {
                write!(out, "|{caption}")?;
            }
            write_attributes(out, link)?;
            out.write_str("]]")
        }
        Dialect::Markdown => {
            out.write_str("![")?;
            if let Some(caption) = link.caption().as_text() {
                out.write_str(caption)?;
            }
            write_attributes(out, link)?;
            write!(out, "]({})", link.path())
        }
    }
}

fn write_attributes(out: &mut impl Write, link: &ImageLink) -> fmt::Result {
    if let Some(alignment) = link.alignment() {
        write!(out, "|{alignment}")?;
    }
    if let Some(size) = link.size() {
        write!(out, "|{size}")?;
    }
    Ok(())
}
