//! In-page heading extraction for navigation.
//!
//! Collects ATX headings of exactly two or three `#` markers written at the
//! start of a line. Deeper and shallower levels are not collected, and
//! neither are setext headings or headings nested in quotes and lists.
//!
//! Headings are taken from the same whole-document parse the renderer runs
//! ([`crate::markdown::parser`]), so a `## ...` line only counts when it
//! really renders as a heading: lines inside fenced code, HTML blocks and
//! comments are ignored, and reference-style links resolve against the
//! definitions elsewhere in the body. The id is computed from the parsed
//! plain text exactly as the renderer computes it. Headings without any
//! slug characters (`## ???`) get no anchor and are skipped.
//!
//! [`extract_headings`] returns a lazy iterator over the parser's events. It
//! holds no shared state: calling it again on the same text replays the same
//! sequence.

use crate::markdown::{self, push_plain_text};
use crate::slug::slugify;
use crate::types::Heading;
use pulldown_cmark::{Event, HeadingLevel, OffsetIter, Tag, TagEnd};

/// Iterator over the level-2 and level-3 headings of a markdown body.
pub struct Headings<'a> {
    body: &'a str,
    events: OffsetIter<'a>,
    open: Option<OpenHeading>,
}

/// A heading whose closing event has not been seen yet.
struct OpenHeading {
    level: HeadingLevel,
    start: usize,
    plain: String,
}

/// Lazily scan `body` for headings, in document order.
pub fn extract_headings(body: &str) -> Headings<'_> {
    Headings {
        body,
        events: markdown::parser(body).into_offset_iter(),
        open: None,
    }
}

impl Iterator for Headings<'_> {
    type Item = Heading;

    fn next(&mut self) -> Option<Heading> {
        for (event, range) in self.events.by_ref() {
            match event {
                Event::Start(Tag::Heading { level, .. }) => {
                    self.open = Some(OpenHeading {
                        level,
                        start: range.start,
                        plain: String::new(),
                    });
                }
                Event::End(TagEnd::Heading(_)) => {
                    let body = self.body;
                    if let Some(heading) = self.open.take().and_then(|open| finish(body, open)) {
                        return Some(heading);
                    }
                }
                event => {
                    if let Some(open) = self.open.as_mut() {
                        push_plain_text(&mut open.plain, &event);
                    }
                }
            }
        }
        None
    }
}

/// Keep a parsed heading only if its source line starts with the markers.
fn finish(body: &str, open: OpenHeading) -> Option<Heading> {
    let markers = match open.level {
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        _ => return None,
    };
    let line_begin = body[..open.start].rfind('\n').map_or(0, |i| i + 1);
    let line = body[line_begin..].lines().next().unwrap_or("");
    let text = source_text(line, markers)?;

    let id = slugify(&open.plain);
    if id.is_empty() {
        return None;
    }
    Some(Heading {
        level: markers as u8,
        text: text.to_string(),
        id,
    })
}

/// Trimmed text after exactly `markers` leading `#` and a space or tab.
fn source_text(line: &str, markers: usize) -> Option<&str> {
    if line.bytes().take_while(|&b| b == b'#').count() != markers {
        return None;
    }
    let rest = &line[markers..];
    rest.starts_with([' ', '\t']).then(|| rest.trim())
}
