//! Page renderer: fills the layout template.
//!
//! The template is an arbitrary HTML file containing any of four tokens:
//! `{{title}}`, `{{description}}`, `{{nav}}`, and `{{content}}`. The first
//! occurrence of each is replaced; later occurrences are left as written.
//! Substitution is a single pass over the template text, so a token that
//! appears inside a substituted value (say, a page whose body documents the
//! `{{content}}` syntax) is never expanded.
//!
//! Title and description are HTML-escaped. Nav and content are inserted as
//! already-rendered markup.

use crate::types::Page;
use maud::html;
use std::fs;
use std::path::Path;

/// A substitution point in the layout template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    Title,
    Description,
    Nav,
    Content,
}

impl Placeholder {
    pub const ALL: [Placeholder; 4] = [
        Placeholder::Title,
        Placeholder::Description,
        Placeholder::Nav,
        Placeholder::Content,
    ];

    pub fn token(self) -> &'static str {
        match self {
            Placeholder::Title => "{{title}}",
            Placeholder::Description => "{{description}}",
            Placeholder::Nav => "{{nav}}",
            Placeholder::Content => "{{content}}",
        }
    }
}

/// Values for each placeholder, already in their final (escaped) form.
#[derive(Debug, Clone, Copy)]
pub struct Slots<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub nav: &'a str,
    pub content: &'a str,
}

impl Slots<'_> {
    fn get(&self, placeholder: Placeholder) -> &str {
        match placeholder {
            Placeholder::Title => self.title,
            Placeholder::Description => self.description,
            Placeholder::Nav => self.nav,
            Placeholder::Content => self.content,
        }
    }
}

/// A parsed layout template.
#[derive(Debug, Clone)]
pub struct Layout {
    template: String,
    /// First occurrence of each present placeholder, by byte offset.
    slots: Vec<(usize, Placeholder)>,
}

impl Layout {
    pub fn new(template: impl Into<String>) -> Self {
        let template = template.into();
        let mut slots: Vec<(usize, Placeholder)> = Placeholder::ALL
            .into_iter()
            .filter_map(|p| template.find(p.token()).map(|pos| (pos, p)))
            .collect();
        slots.sort_by_key(|&(pos, _)| pos);
        Self { template, slots }
    }

    pub fn load(path: &Path) -> std::io::Result<Self> {
        Ok(Self::new(fs::read_to_string(path)?))
    }

    /// Placeholders the template does not contain.
    pub fn missing(&self) -> Vec<Placeholder> {
        Placeholder::ALL
            .into_iter()
            .filter(|p| !self.slots.iter().any(|(_, s)| s == p))
            .collect()
    }

    /// Substitute `slots` into the template.
    pub fn fill(&self, slots: &Slots<'_>) -> String {
        let extra: usize = self.slots.iter().map(|&(_, p)| slots.get(p).len()).sum();
        let mut out = String::with_capacity(self.template.len() + extra);
        let mut cursor = 0;
        for &(pos, placeholder) in &self.slots {
            out.push_str(&self.template[cursor..pos]);
            out.push_str(slots.get(placeholder));
            cursor = pos + placeholder.token().len();
        }
        out.push_str(&self.template[cursor..]);
        out
    }
}

/// Render a complete HTML document for `page`.
pub fn render_page(layout: &Layout, page: &Page, nav: &str, default_description: &str) -> String {
    let title = html! { (page.meta.title) }.into_string();
    let description = html! {
        (page.meta.description.as_deref().unwrap_or(default_description))
    }
    .into_string();

    layout.fill(&Slots {
        title: &title,
        description: &description,
        nav,
        content: &page.rendered_body,
    })
}
