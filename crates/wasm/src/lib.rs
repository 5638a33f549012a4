use serde::Serialize;
use wasm_bindgen::JsValue;
use wasm_bindgen::prelude::*;

use pixlink_core::{Caption, ImageLink, ImageLinkParser, ImageSize, LinkError, ParseOptions};

// ============================================================================
// Parser Config
// ============================================================================

/// Configuration accepted by the WASM functions. Missing fields fall back to
/// [`ParseOptions::all`].
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct WasmParseConfig {
    #[serde(default)]
    pub wiki: Option<bool>,
    #[serde(default)]
    pub markdown: Option<bool>,
    #[serde(default, alias = "skipCodeFences")]
    pub skip_code_fences: Option<bool>,
}

fn parse_config(config: JsValue) -> Result<WasmParseConfig, JsError> {
    if config.is_undefined() || config.is_null() {
        return Ok(WasmParseConfig::default());
    }
    serde_wasm_bindgen::from_value(config)
        .map_err(|e| JsError::new(&format!("Invalid config: {}", e)))
}

fn build_parser(cfg: &WasmParseConfig) -> ImageLinkParser {
    let defaults = ParseOptions::all();
    ImageLinkParser::new(ParseOptions {
        wiki: cfg.wiki.unwrap_or(defaults.wiki),
        markdown: cfg.markdown.unwrap_or(defaults.markdown),
        skip_code_fences: cfg.skip_code_fences.unwrap_or(defaults.skip_code_fences),
    })
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsError> {
    serde_wasm_bindgen::to_value(value)
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

// ============================================================================
// Result Types
// ============================================================================

/// One embed found by [`extract_all`].
#[derive(Debug, Clone, Serialize)]
pub struct ExtractedLink {
    /// Embed text as written.
    pub matched: String,
    /// UTF-8 byte offset into the document.
    pub offset: usize,
    /// UTF-16 code unit offset, matching JavaScript string indices.
    pub utf16_offset: usize,
    /// Parsed attributes.
    pub link: ImageLink,
}

/// Result of [`resize_links`].
#[derive(Debug, Clone, Serialize)]
pub struct RewriteResult {
    /// Document with the matching embeds rewritten.
    pub document: String,
    /// Number of embeds rewritten.
    pub count: usize,
}

// ============================================================================
// Link API
// ============================================================================

/// Parses one isolated embed.
///
/// Returns the link object, or `null` when the text is not a recognized embed.
///
/// # Example (JavaScript)
///
/// ```javascript
/// import { parse } from './pixlink_wasm';
///
/// const link = parse("![[cat.png|A cat|center|300]]");
/// // link = {
/// //   path: "cat.png",
/// //   caption: { kind: "text", text: "A cat" },
/// //   alignment: "center",
/// //   size: { width: 300, format: "W" },
/// //   dialect: "wiki"
/// // }
/// ```
#[wasm_bindgen]
pub fn parse(candidate: &str, config: JsValue) -> Result<JsValue, JsError> {
    let parser = build_parser(&parse_config(config)?);
    match parser.parse(candidate) {
        Some(link) => to_js(&link),
        None => Ok(JsValue::NULL),
    }
}

/// Serializes a link object back into canonical embed text.
///
/// Throws when `link` is missing or is not a valid link object.
#[wasm_bindgen]
pub fn build(link: JsValue) -> Result<String, JsError> {
    if link.is_undefined() || link.is_null() {
        return Err(JsError::new("build() requires a link object"));
    }
    let link: ImageLink = serde_wasm_bindgen::from_value(link)
        .map_err(|e| JsError::new(&format!("Invalid link: {}", e)))?;
    Ok(pixlink_core::build(&link))
}

/// Finds every embed in a document, ordered by offset.
#[wasm_bindgen(js_name = extract_all)]
pub fn extract_all(document: &str, config: JsValue) -> Result<JsValue, JsError> {
    let parser = build_parser(&parse_config(config)?);

    let mut utf16_offset = 0usize;
    let mut counted_to = 0usize;
    let links: Vec<ExtractedLink> = parser
        .extract_all(document)
        .into_iter()
        .map(|found| {
            utf16_offset += document[counted_to..found.offset].encode_utf16().count();
            counted_to = found.offset;
            ExtractedLink {
                matched: found.matched.to_string(),
                offset: found.offset,
                utf16_offset,
                link: found.link,
            }
        })
        .collect();

    to_js(&links)
}

/// Normalizes rendered alt text into a caption object.
#[wasm_bindgen(js_name = normalize_caption)]
pub fn normalize_caption(alt: &str) -> Result<JsValue, JsError> {
    let caption: Caption = pixlink_core::normalize_caption(alt);
    to_js(&caption)
}

/// Sets the size of every embed of `path` in `document`.
///
/// `size` is a size token (`300x200`, `300`, `300x` or `x200`); an invalid
/// token throws.
#[wasm_bindgen(js_name = resize_links)]
pub fn resize_links(
    document: &str,
    path: &str,
    size: &str,
    config: JsValue,
) -> Result<JsValue, JsError> {
    let size: ImageSize = size
        .parse()
        .map_err(|e: LinkError| JsError::new(&format!("Invalid size: {}", e)))?;
    let parser = build_parser(&parse_config(config)?);
    let (document, count) =
        parser.rewrite_links(document, path, |link| link.with_size(Some(size)));

    to_js(&RewriteResult { document, count })
}
