//! Markdown → HTML rendering with heading anchors.
//!
//! Rendering is delegated to [pulldown-cmark](https://docs.rs/pulldown-cmark).
//! The only intervention is on headings: every `<hN>` gets an `id` derived by
//! [`slugify`] from the heading's *plain text*, i.e. the concatenation of its
//! text and inline-code children with emphasis, code, and link markup
//! stripped.
//!
//! The heading extractor ([`crate::headings`]) walks the events of the same
//! [`parser`] over the same body and flattens them with the same
//! [`push_plain_text`], so both sides agree even when the source and rendered
//! text differ:
//!
//! ```text
//! ## Install `npm` via [brew](https://brew.sh)
//!    plain text: "Install npm via brew"
//!    id:         "install-npm-via-brew"
//! ```

use crate::slug::slugify;
use pulldown_cmark::{CowStr, Event, HeadingLevel, Options, Parser, Tag, TagEnd, html as md_html};

/// Parser options shared by page rendering and heading flattening.
///
/// GitHub-style tables, strikethrough, and task lists are enabled; the
/// generated research and checklist pages rely on tables.
pub fn parser_options() -> Options {
    Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS
}

/// The parser every consumer of a page body runs.
pub fn parser(markdown: &str) -> Parser<'_> {
    Parser::new_ext(markdown, parser_options())
}

/// Render a markdown body to HTML, adding an `id` to every heading.
pub fn render(markdown: &str) -> String {
    let events = anchor_headings(parser(markdown));
    let mut html = String::with_capacity(markdown.len() * 3 / 2);
    md_html::push_html(&mut html, events.into_iter());
    html
}

/// A heading whose closing event has not been seen yet.
struct OpenHeading<'a> {
    level: HeadingLevel,
    classes: Vec<CowStr<'a>>,
    attrs: Vec<(CowStr<'a>, Option<CowStr<'a>>)>,
    inner: Vec<Event<'a>>,
}

/// Buffer each heading's inline events so its id can be computed from the
/// complete text before the opening tag is emitted.
fn anchor_headings<'a>(events: impl Iterator<Item = Event<'a>>) -> Vec<Event<'a>> {
    let mut out = Vec::new();
    let mut open: Option<OpenHeading<'a>> = None;

    for event in events {
        match event {
            Event::Start(Tag::Heading {
                level,
                classes,
                attrs,
                ..
            }) => {
                open = Some(OpenHeading {
                    level,
                    classes,
                    attrs,
                    inner: Vec::new(),
                });
            }
            Event::End(TagEnd::Heading(level)) => {
                let Some(heading) = open.take() else {
                    out.push(Event::End(TagEnd::Heading(level)));
                    continue;
                };
                let mut text = String::new();
                for inner in &heading.inner {
                    push_plain_text(&mut text, inner);
                }
                let id = slugify(&text);
                out.push(Event::Start(Tag::Heading {
                    level: heading.level,
                    id: (!id.is_empty()).then(|| CowStr::from(id)),
                    classes: heading.classes,
                    attrs: heading.attrs,
                }));
                out.extend(heading.inner);
                out.push(Event::End(TagEnd::Heading(level)));
            }
            event => match open.as_mut() {
                Some(heading) => heading.inner.push(event),
                None => out.push(event),
            },
        }
    }

    out
}

/// Append the text an inline event contributes to a heading's plain text.
pub(crate) fn push_plain_text(text: &mut String, event: &Event<'_>) {
    match event {
        Event::Text(t) | Event::Code(t) | Event::InlineMath(t) => text.push_str(t),
        _ => {}
    }
}
