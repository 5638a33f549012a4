//! Token classifiers for pipe-delimited attribute segments.
//!
//! A segment is a size token when it is one of `WxH`, `W`, `Wx` or `xH`
//! (ASCII digits, positive `u32` values, lowercase `x`), and an alignment token
//! when it is exactly one of the five layout keywords. Both checks trim the
//! segment first and never match partially.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LinkError;

/// Layout keyword attached to an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Alignment {
    /// `left`
    Left,
    /// `center`
    Center,
    /// `right`
    Right,
    /// `left-wrap`: floated left with text wrapping around it.
    LeftWrap,
    /// `right-wrap`: floated right with text wrapping around it.
    RightWrap,
}

impl Alignment {
    /// Every alignment keyword, in declaration order.
    pub const ALL: [Alignment; 5] = [
        Alignment::Left,
        Alignment::Center,
        Alignment::Right,
        Alignment::LeftWrap,
        Alignment::RightWrap,
    ];

    /// Keyword as written in link text.
    pub const fn as_str(self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
            Alignment::LeftWrap => "left-wrap",
            Alignment::RightWrap => "right-wrap",
        }
    }

    /// Classify a raw segment. Case-sensitive, whole-segment match after trimming.
    pub fn from_token(segment: &str) -> Option<Self> {
        match segment.trim() {
            "left" => Some(Alignment::Left),
            "center" => Some(Alignment::Center),
            "right" => Some(Alignment::Right),
            "left-wrap" => Some(Alignment::LeftWrap),
            "right-wrap" => Some(Alignment::RightWrap),
            _ => None,
        }
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Alignment {
    type Err = LinkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Alignment::from_token(s).ok_or_else(|| LinkError::unknown_alignment(s))
    }
}

/// Textual shape a size token was written in.
///
/// Kept alongside the numbers so `300x` is written back as `300x`, never `300`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SizeFormat {
    /// `300x200`
    #[serde(rename = "WxH")]
    WidthHeight,
    /// `300`
    #[serde(rename = "W")]
    Width,
    /// `300x`
    #[serde(rename = "Wx")]
    WidthX,
    /// `x200`
    #[serde(rename = "xH")]
    Height,
}

impl SizeFormat {
    /// Short pattern name (`WxH`, `W`, `Wx`, `xH`).
    pub const fn as_str(self) -> &'static str {
        match self {
            SizeFormat::WidthHeight => "WxH",
            SizeFormat::Width => "W",
            SizeFormat::WidthX => "Wx",
            SizeFormat::Height => "xH",
        }
    }

    const fn has_width(self) -> bool {
        !matches!(self, SizeFormat::Height)
    }

    const fn has_height(self) -> bool {
        matches!(self, SizeFormat::WidthHeight | SizeFormat::Height)
    }
}

impl fmt::Display for SizeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Width and/or height attached to an image, plus the format it was written in.
///
/// Width/height presence always agrees with [`SizeFormat`]; the constructors and
/// deserialization enforce it, and both dimensions are positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "ImageSizeParts")]
pub struct ImageSize {
    #[serde(skip_serializing_if = "Option::is_none")]
    width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    height: Option<u32>,
    format: SizeFormat,
}

impl ImageSize {
    /// `WxH`: both dimensions.
    pub fn new(width: u32, height: u32) -> Result<Self, LinkError> {
        Self::from_parts(Some(width), Some(height), SizeFormat::WidthHeight)
    }

    /// `W`: width only, written without a trailing `x`.
    pub fn width_only(width: u32) -> Result<Self, LinkError> {
        Self::from_parts(Some(width), None, SizeFormat::Width)
    }

    /// `Wx`: width only, written with a trailing `x`.
    pub fn width_trailing_x(width: u32) -> Result<Self, LinkError> {
        Self::from_parts(Some(width), None, SizeFormat::WidthX)
    }

    /// `xH`: height only.
    pub fn height_only(height: u32) -> Result<Self, LinkError> {
        Self::from_parts(None, Some(height), SizeFormat::Height)
    }

    /// Build a size from loose parts, checking them against `format`.
    pub fn from_parts(
        width: Option<u32>,
        height: Option<u32>,
        format: SizeFormat,
    ) -> Result<Self, LinkError> {
        if width.is_some() != format.has_width() || height.is_some() != format.has_height() {
            return Err(LinkError::InconsistentSize {
                format,
                width,
                height,
            });
        }
        if width == Some(0) || height == Some(0) {
            return Err(LinkError::ZeroDimension);
        }
        Ok(Self {
            width,
            height,
            format,
        })
    }

    /// Width in pixels, if the token carries one.
    pub fn width(&self) -> Option<u32> {
        self.width
    }

    /// Height in pixels, if the token carries one.
    pub fn height(&self) -> Option<u32> {
        self.height
    }

    /// Format the token was written in.
    pub fn format(&self) -> SizeFormat {
        self.format
    }
}

impl fmt::Display for ImageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Presence of each field is fixed by the format.
        let width = self.width.unwrap_or_default();
        let height = self.height.unwrap_or_default();
        match self.format {
            SizeFormat::WidthHeight => write!(f, "{width}x{height}"),
            SizeFormat::Width => write!(f, "{width}"),
            SizeFormat::WidthX => write!(f, "{width}x"),
            SizeFormat::Height => write!(f, "x{height}"),
        }
    }
}

impl FromStr for ImageSize {
    type Err = LinkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_size_token(s).ok_or_else(|| LinkError::invalid_size(s))
    }
}

#[derive(Deserialize)]
struct ImageSizeParts {
    #[serde(default)]
    width: Option<u32>,
    #[serde(default)]
    height: Option<u32>,
    format: SizeFormat,
}

impl TryFrom<ImageSizeParts> for ImageSize {
    type Error = LinkError;

    fn try_from(parts: ImageSizeParts) -> Result<Self, Self::Error> {
        ImageSize::from_parts(parts.width, parts.height, parts.format)
    }
}

/// Classify a raw segment as a size token.
///
/// ```
/// use pixlink_core::tokens::{parse_size_token, SizeFormat};
///
/// let size = parse_size_token(" 300x ").unwrap();
/// assert_eq!(size.width(), Some(300));
/// assert_eq!(size.format(), SizeFormat::WidthX);
/// assert!(parse_size_token("3x2x1").is_none());
/// ```
pub fn parse_size_token(segment: &str) -> Option<ImageSize> {
    let text = segment.trim();
    let (width, height, format) = match text.split_once('x') {
        None => (Some(parse_dimension(text)?), None, SizeFormat::Width),
        Some(("", "")) => return None,
        Some((w, "")) => (Some(parse_dimension(w)?), None, SizeFormat::WidthX),
        Some(("", h)) => (None, Some(parse_dimension(h)?), SizeFormat::Height),
        Some((w, h)) => (
            Some(parse_dimension(w)?),
            Some(parse_dimension(h)?),
            SizeFormat::WidthHeight,
        ),
    };
    Some(ImageSize {
        width,
        height,
        format,
    })
}

/// True when the trimmed segment is a size token.
pub fn is_size_token(segment: &str) -> bool {
    parse_size_token(segment).is_some()
}

/// True when the trimmed segment is exactly one of the alignment keywords.
pub fn is_align_token(segment: &str) -> bool {
    Alignment::from_token(segment).is_some()
}

/// ASCII digits only (no sign, no decimal point), positive and within `u32`.
fn parse_dimension(digits: &str) -> Option<u32> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse::<u32>().ok().filter(|value| *value > 0)
}
