//! The structured form of one image embed.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::LinkError;
use crate::tokens::{Alignment, ImageSize};

/// Which embed syntax a link was written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// `![[path|attr|attr]]`
    Wiki,
    /// `![attr|attr](path)`
    Markdown,
}

/// Caption of an embed.
///
/// `Blank` means the caption slot exists but holds no text; renderers still
/// emit an (empty) caption container for it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "text", rename_all = "lowercase")]
pub enum Caption {
    /// No caption text.
    #[default]
    Blank,
    /// Caption text; may contain literal `|` characters.
    Text(String),
}

impl Caption {
    /// Trim `text`, mapping an empty result to [`Caption::Blank`].
    pub fn from_text(text: &str) -> Self {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            Caption::Blank
        } else {
            Caption::Text(trimmed.to_string())
        }
    }

    /// Caption text, or `None` when blank.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Caption::Blank => None,
            Caption::Text(text) => Some(text),
        }
    }

    /// True for [`Caption::Blank`].
    pub fn is_blank(&self) -> bool {
        matches!(self, Caption::Blank)
    }
}

/// Attributes of one image embed: path, caption, alignment and size.
///
/// Values are produced by parsing and are never mutated in place; the `with_*`
/// methods return modified copies for re-serialization. The dialect is fixed
/// at construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "ImageLinkParts")]
pub struct ImageLink {
    path: String,
    caption: Caption,
    alignment: Option<Alignment>,
    size: Option<ImageSize>,
    dialect: Dialect,
}

impl ImageLink {
    /// Create a link with a blank caption and no alignment or size.
    pub fn new(path: impl Into<String>, dialect: Dialect) -> Result<Self, LinkError> {
        let path: String = path.into();
        if path.trim().is_empty() {
            return Err(LinkError::EmptyPath);
        }
        let path = if path.trim().len() == path.len() {
            path
        } else {
            path.trim().to_string()
        };
        Ok(Self {
            path,
            caption: Caption::Blank,
            alignment: None,
            size: None,
            dialect,
        })
    }

    /// Assemble a link from already classified parts. `path` must be trimmed and non-empty.
    pub(crate) fn from_classified(
        path: &str,
        dialect: Dialect,
        caption: Caption,
        alignment: Option<Alignment>,
        size: Option<ImageSize>,
    ) -> Self {
        Self {
            path: path.to_string(),
            caption,
            alignment,
            size,
            dialect,
        }
    }

    /// Image path or URL.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Caption (never missing; [`Caption::Blank`] when there is no text).
    pub fn caption(&self) -> &Caption {
        &self.caption
    }

    /// Alignment keyword, if any.
    pub fn alignment(&self) -> Option<Alignment> {
        self.alignment
    }

    /// Size token, if any.
    pub fn size(&self) -> Option<ImageSize> {
        self.size
    }

    /// Syntax the link is written in.
    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Copy with a different caption.
    pub fn with_caption(mut self, caption: Caption) -> Self {
        self.caption = caption;
        self
    }

    /// Copy with a different (or no) alignment.
    pub fn with_alignment(mut self, alignment: Option<Alignment>) -> Self {
        self.alignment = alignment;
        self
    }

    /// Copy with a different (or no) size.
    pub fn with_size(mut self, size: Option<ImageSize>) -> Self {
        self.size = size;
        self
    }

    /// Copy pointing at another path, keeping caption, alignment and size.
    ///
    /// Used when an image is re-hosted and a fresh link must carry the old
    /// attributes forward.
    pub fn with_path(self, path: impl Into<String>) -> Result<Self, LinkError> {
        let relinked = ImageLink::new(path, self.dialect)?;
        Ok(Self {
            path: relinked.path,
            ..self
        })
    }
}

impl fmt::Display for ImageLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        crate::builder::write_link(f, self)
    }
}

#[derive(Deserialize)]
struct ImageLinkParts {
    path: String,
    #[serde(default)]
    caption: Caption,
    #[serde(default)]
    alignment: Option<Alignment>,
    #[serde(default)]
    size: Option<ImageSize>,
    dialect: Dialect,
}

impl TryFrom<ImageLinkParts> for ImageLink {
    type Error = LinkError;

    fn try_from(parts: ImageLinkParts) -> Result<Self, Self::Error> {
        Ok(ImageLink::new(parts.path, parts.dialect)?
            .with_caption(parts.caption)
            .with_alignment(parts.alignment)
            .with_size(parts.size))
    }
}
