#![deny(missing_docs)]
//! Pixlink core: caption, alignment and size attributes carried in image embeds.
//!
//! Parses `![[path|caption|center|300x200]]` and `![caption|center|300x200](path)`
//! into an [`ImageLink`], writes it back in canonical form, and scans documents
//! for every embed.

/// Syntax serialization.
pub mod builder;
/// Fenced code block tracking for document scans.
pub mod code_fence;
/// Embed shape detection and path extraction.
pub mod dialect;
/// Error types.
pub mod error;
/// Structured link attributes.
pub mod link;
/// Parser facade and options.
pub mod parser;
/// Document scanning and rewriting.
pub mod scan;
/// Caption/alignment/size disambiguation.
pub mod segment;
/// Size and alignment token classifiers.
pub mod tokens;

pub use builder::build;
pub use dialect::{RawLink, detect};
pub use error::LinkError;
pub use link::{Caption, Dialect, ImageLink};
pub use parser::{ImageLinkParser, ParseOptions, extract_all, normalize_caption, parse};
pub use scan::{LinkMatch, find_links_to, rewrite_links};
pub use segment::{Segmented, classify, segment};
pub use tokens::{
    Alignment, ImageSize, SizeFormat, is_align_token, is_size_token, parse_size_token,
};
