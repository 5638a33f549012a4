use thiserror::Error;

use crate::tokens::SizeFormat;

/// Errors raised when a typed attribute value is constructed from bad input.
///
/// Parsing a link never produces one of these: unrecognized embeds come back
/// as `None` and malformed tokens fall through to the caption. These cover
/// direct construction and deserialization of the value types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LinkError {
    /// Text does not match any of the `WxH`, `W`, `Wx`, `xH` forms.
    #[error("Invalid size token: '{0}'")]
    InvalidSize(String),
    /// Text is not one of the five alignment keywords.
    #[error("Unknown alignment: '{0}' (expected left, center, right, left-wrap or right-wrap)")]
    UnknownAlignment(String),
    /// Width/height presence disagrees with the declared format.
    #[error("Size format {format} does not match width={width:?}, height={height:?}")]
    InconsistentSize {
        /// Declared format.
        format: SizeFormat,
        /// Width supplied alongside it.
        width: Option<u32>,
        /// Height supplied alongside it.
        height: Option<u32>,
    },
    /// Width or height of zero.
    #[error("Image dimensions must be positive")]
    ZeroDimension,
    /// A link was given an empty (or whitespace-only) path.
    #[error("Image path must not be empty")]
    EmptyPath,
}

impl LinkError {
    /// Create an invalid size error from the offending text
    pub fn invalid_size(text: impl Into<String>) -> Self {
        Self::InvalidSize(text.into())
    }

    /// Create an unknown alignment error from the offending text
    pub fn unknown_alignment(text: impl Into<String>) -> Self {
        Self::UnknownAlignment(text.into())
    }
}
