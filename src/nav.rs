//! Navigation builder.
//!
//! Produces the `<nav>` fragment shown on every page. Pages are grouped into
//! sections (front-matter `section`, else the page's directory, else
//! [`ROOT_SECTION`]) and sections are ordered by the configured priority list,
//! then alphabetically. The home page is never listed.
//!
//! For the page being rendered, its level-2 and level-3 headings are inlined
//! as fragment links right after its own entry.
//!
//! ```html
//! <nav class="site-nav">
//!   <div class="nav-section">docs</div>
//!   <a href="/docs/grammar.html" class="active">Grammar Reference</a>
//!   <div class="nav-subheadings">
//!     <a href="/docs/grammar.html#lexical-structure">Lexical Structure</a>
//!     <a href="/docs/grammar.html#identifiers" class="nav-h3">Identifiers</a>
//!   </div>
//!   <a href="/docs/examples.html">Examples</a>
//! </nav>
//! ```

use crate::config::SiteSettings;
use crate::types::Page;
use maud::{Markup, html};
use std::cmp::Ordering;

/// Section for pages with neither a `section` nor a directory. Rendered
/// without a label.
pub const ROOT_SECTION: &str = "root";

/// Pages sharing a section, in their incoming relative order.
#[derive(Debug)]
pub struct NavSection<'a> {
    pub name: &'a str,
    pub pages: Vec<&'a Page>,
}

/// The navigation section a page belongs to.
pub fn section_key(page: &Page) -> &str {
    page.meta
        .section
        .as_deref()
        .or_else(|| page.source_path.rsplit_once('/').map(|(dir, _)| dir))
        .unwrap_or(ROOT_SECTION)
}

/// Order sections: listed names first in list order, the rest lexically.
pub fn compare_sections(a: &str, b: &str, priority: &[String]) -> Ordering {
    let rank = |name: &str| priority.iter().position(|p| p == name);
    match (rank(a), rank(b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

/// Group `pages` (already sorted) into ordered sections, leaving out the
/// home page.
pub fn group_sections<'a>(
    pages: &'a [Page],
    home_page: &str,
    priority: &[String],
) -> Vec<NavSection<'a>> {
    let mut sections: Vec<NavSection<'a>> = Vec::new();
    for page in pages.iter().filter(|p| p.source_path != home_page) {
        let name = section_key(page);
        match sections.iter_mut().find(|s| s.name == name) {
            Some(section) => section.pages.push(page),
            None => sections.push(NavSection {
                name,
                pages: vec![page],
            }),
        }
    }
    sections.sort_by(|a, b| compare_sections(a.name, b.name, priority));
    sections
}

/// Render the navigation fragment for `current`.
pub fn render_nav(pages: &[Page], current: &Page, site: &SiteSettings) -> Markup {
    let sections = group_sections(pages, &site.home_page, &site.section_order);

    html! {
        nav.site-nav {
            @for section in &sections {
                @if section.name != ROOT_SECTION {
                    div.nav-section { (section.name) }
                }
                @for page in &section.pages {
                    (render_nav_entry(page, page.url == current.url))
                }
            }
        }
    }
}

fn render_nav_entry(page: &Page, is_active: bool) -> Markup {
    html! {
        a href=(page.url) class=[is_active.then_some("active")] { (page.meta.title) }
        @if is_active && !page.headings.is_empty() {
            div.nav-subheadings {
                @for heading in &page.headings {
                    a href={ (page.url) "#" (heading.id) }
                        class=[(heading.level == 3).then_some("nav-h3")] {
                        (heading.text)
                    }
                }
            }
        }
    }
}
