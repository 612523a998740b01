//! Front-matter parsing and rendering.
//!
//! A source document may open with a YAML block fenced by `---` lines:
//!
//! ```text
//! ---
//! title: Guide
//! description: Getting started with Faber
//! order: 1
//! section: docs
//! ---
//!
//! # Guide
//! ...
//! ```
//!
//! Recognised keys are `title`, `description`, `order`, and `section`; any
//! other key is ignored. A document without a block keeps its full text as
//! body. A block that is present but not valid YAML degrades to empty
//! metadata (the body still excludes the block) and the error is handed back
//! to the caller for reporting; it never aborts a build.

use crate::types::PageMeta;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The line that opens and closes a front-matter block.
pub const DELIMITER: &str = "---";

#[derive(Error, Debug)]
pub enum FrontMatterError {
    #[error("invalid front matter: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Recognised front-matter keys, as written.
#[derive(Debug, Default, Deserialize)]
struct RawFrontMatter {
    title: Option<String>,
    description: Option<String>,
    order: Option<f64>,
    section: Option<String>,
}

/// Result of splitting a source document.
#[derive(Debug)]
pub struct Document<'a> {
    pub meta: PageMeta,
    /// Text after the front-matter block (or the whole text if there is none).
    pub body: &'a str,
    /// Set when a block was present but could not be parsed.
    pub error: Option<FrontMatterError>,
}

/// Split a leading front-matter block from the rest of the text.
///
/// Returns `(block, body)` where `block` is the text between the delimiter
/// lines and `body` starts right after the closing delimiter's line break.
/// Returns `None` when the text does not open with a closed block.
pub fn split(raw: &str) -> Option<(&str, &str)> {
    let text = raw.strip_prefix('\u{feff}').unwrap_or(raw);

    let block_start = text.find('\n')? + 1;
    if text[..block_start].trim_end() != DELIMITER {
        return None;
    }

    let mut pos = block_start;
    while pos < text.len() {
        let line_end = text[pos..]
            .find('\n')
            .map(|i| pos + i + 1)
            .unwrap_or(text.len());
        if text[pos..line_end].trim_end() == DELIMITER {
            return Some((&text[block_start..pos], &text[line_end..]));
        }
        pos = line_end;
    }
    None
}

/// Separate metadata from body, defaulting `title` to `fallback_title`.
pub fn extract<'a>(raw: &'a str, fallback_title: &str) -> Document<'a> {
    let (fields, body, error) = match split(raw) {
        None => (RawFrontMatter::default(), raw, None),
        Some((block, body)) => match parse_block(block) {
            Ok(fields) => (fields, body, None),
            Err(e) => (RawFrontMatter::default(), body, Some(e)),
        },
    };

    let meta = PageMeta {
        title: non_empty(fields.title).unwrap_or_else(|| fallback_title.to_string()),
        description: non_empty(fields.description),
        order: fields.order,
        section: non_empty(fields.section),
    };

    Document { meta, body, error }
}

fn parse_block(block: &str) -> Result<RawFrontMatter, FrontMatterError> {
    if block.trim().is_empty() {
        return Ok(RawFrontMatter::default());
    }
    Ok(serde_yaml::from_str(block)?)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Front matter written by the sync collaborators.
#[derive(Debug, Serialize)]
pub struct Block<'a> {
    pub title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'a str>,
    pub section: &'a str,
    pub order: i64,
}

/// Render a delimited front-matter block, ending with a newline.
///
/// Values are YAML-serialized, so titles containing `:` or quotes survive a
/// round trip through [`extract`].
pub fn render_block(block: &Block<'_>) -> Result<String, FrontMatterError> {
    let yaml = serde_yaml::to_string(block)?;
    Ok(format!("{DELIMITER}\n{yaml}{DELIMITER}\n"))
}
