//! Shared types used across the content pipeline.
//!
//! A [`Page`] is built once per build by the loader ([`crate::scan`]) and is
//! read-only afterwards: navigation, rendering, and bundling all borrow it.

use std::cmp::Ordering;

/// Front-matter fields recognised on a source document.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PageMeta {
    /// Display title. Never empty once a page is loaded: falls back to the
    /// filename stem when the front matter has none.
    pub title: String,
    pub description: Option<String>,
    /// Explicit sort position. Pages without one sort after all that have one.
    pub order: Option<f64>,
    /// Navigation group. Falls back to the page's directory, then `root`.
    pub section: Option<String>,
}

/// An in-page heading collected for navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    /// 2 or 3.
    pub level: u8,
    /// Heading text as written in the source, trimmed.
    pub text: String,
    /// Fragment identifier, identical to the `id` the renderer puts on the
    /// corresponding `<hN>` element.
    pub id: String,
}

/// One source document and its rendered output.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// Path relative to the content root, `/`-separated (e.g. `docs/guide.md`).
    pub source_path: String,
    pub meta: PageMeta,
    /// Markdown with the front-matter block removed.
    pub raw_body: String,
    /// HTML rendered from `raw_body`.
    pub rendered_body: String,
    /// Canonical output path, e.g. `/docs/guide.html`.
    pub url: String,
    pub headings: Vec<Heading>,
}

/// Compare two optional `order` values: explicit orders ascend, missing
/// orders sort after every explicit one and tie with each other.
pub fn compare_order(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_orders_ascend() {
        assert_eq!(compare_order(Some(1.0), Some(2.0)), Ordering::Less);
        assert_eq!(compare_order(Some(2.0), Some(1.0)), Ordering::Greater);
        assert_eq!(compare_order(Some(0.5), Some(0.5)), Ordering::Equal);
    }

    #[test]
    fn missing_order_sorts_last() {
        assert_eq!(compare_order(Some(1000.0), None), Ordering::Less);
        assert_eq!(compare_order(None, Some(-3.0)), Ordering::Greater);
        assert_eq!(compare_order(None, None), Ordering::Equal);
    }
}
