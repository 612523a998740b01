//! Bundle generator: whole-site artifacts for machine readers.
//!
//! - [`complete_document`]: every page except the home page, concatenated in
//!   page order as raw markdown under its title, separated by rules.
//! - [`discovery_manifest`]: a short `llms.txt`-style index pointing at the
//!   complete document and the configured reference pages and repositories.

use crate::config::{BundleConfig, Link, SiteSettings};
use crate::types::Page;

const SEPARATOR: &str = "\n\n---\n\n";

/// Concatenate the raw bodies of all pages in order.
pub fn complete_document(pages: &[Page], site: &SiteSettings) -> String {
    let mut doc = format!(
        "# {name} - Complete Documentation\n\nThis document contains the complete {name} documentation.{SEPARATOR}",
        name = site.name
    );
    for page in pages.iter().filter(|p| p.source_path != site.home_page) {
        doc.push_str("# ");
        doc.push_str(&page.meta.title);
        doc.push_str("\n\n");
        doc.push_str(&page.raw_body);
        doc.push_str(SEPARATOR);
    }
    doc
}

/// The discovery manifest text.
pub fn discovery_manifest(site: &SiteSettings, bundle: &BundleConfig) -> String {
    let mut doc = format!("# {}\n", site.name);
    if !site.tagline.is_empty() {
        doc.push_str(&format!("> {}\n", site.tagline));
    }
    if !site.summary.is_empty() {
        doc.push_str(&format!("\n{}\n", site.summary));
    }

    doc.push_str("\n## Documentation\n");
    doc.push_str(&format!(
        "- Full documentation: /{}\n",
        bundle.complete_path
    ));
    push_links(&mut doc, &bundle.documentation);

    if !bundle.sources.is_empty() {
        doc.push_str("\n## Source\n");
        push_links(&mut doc, &bundle.sources);
    }
    doc
}

fn push_links(doc: &mut String, links: &[Link]) {
    for link in links {
        doc.push_str(&format!("- {}: {}\n", link.label, link.url));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;

    fn with_body(source: &str, title: &str, body: &str) -> Page {
        let mut p = page(source, title);
        p.raw_body = body.to_string();
        p
    }

    #[test]
    fn complete_document_format() {
        let pages = vec![
            with_body("docs/grammar.md", "Grammar", "\n## Lexical\n"),
            with_body("docs/examples.md", "Examples", "Some *code*."),
        ];
        let doc = complete_document(&pages, &SiteSettings::default());
        assert_eq!(
            doc,
            "# Faber Language - Complete Documentation\n\n\
This document contains the complete Faber Language documentation.\n\n---\n\n\
# Grammar\n\n\n## Lexical\n\n\n---\n\n\
# Examples\n\nSome *code*.\n\n---\n\n"
        );
    }

    #[test]
    fn complete_document_excludes_home_page() {
        let pages = vec![
            with_body("index.md", "Home", "WELCOME"),
            with_body("about.md", "About", "about body"),
        ];
        let doc = complete_document(&pages, &SiteSettings::default());
        assert!(!doc.contains("WELCOME"));
        assert!(doc.contains("# About\n\nabout body"));
    }

    #[test]
    fn complete_document_keeps_page_order() {
        let pages = vec![
            with_body("b.md", "Second-sorted-first", "one"),
            with_body("a.md", "Then this", "two"),
        ];
        let doc = complete_document(&pages, &SiteSettings::default());
        let first = doc.find("# Second-sorted-first").unwrap();
        let second = doc.find("# Then this").unwrap();
        assert!(first < second);
    }

    #[test]
    fn complete_document_with_no_pages_is_header_only() {
        let doc = complete_document(&[], &SiteSettings::default());
        assert!(doc.starts_with("# Faber Language - Complete Documentation"));
        assert!(doc.ends_with("---\n\n"));
        assert_eq!(doc.matches("---").count(), 1);
    }

    #[test]
    fn manifest_lists_resources() {
        let text = discovery_manifest(&SiteSettings::default(), &BundleConfig::default());
        assert!(text.starts_with("# Faber Language\n> A Latin programming language"));
        assert!(text.contains("\n## Documentation\n- Full documentation: /faber-complete.md\n"));
        assert!(text.contains("- Grammar reference: /docs/grammar.html\n"));
        assert!(text.contains("- Examples: /docs/examples.html\n"));
        assert!(text.contains("\n## Source\n- Language: https://github.com/ianzepp/faber-romanus\n"));
    }

    #[test]
    fn manifest_follows_configured_complete_path() {
        let bundle = BundleConfig {
            complete_path: "all.md".to_string(),
            ..BundleConfig::default()
        };
        let text = discovery_manifest(&SiteSettings::default(), &bundle);
        assert!(text.contains("- Full documentation: /all.md\n"));
    }

    #[test]
    fn manifest_omits_empty_source_section() {
        let bundle = BundleConfig {
            sources: Vec::new(),
            ..BundleConfig::default()
        };
        let text = discovery_manifest(&SiteSettings::default(), &bundle);
        assert!(!text.contains("## Source"));
    }

    #[test]
    fn manifest_exact_layout() {
        let site = SiteSettings {
            name: "Demo".to_string(),
            tagline: "Short".to_string(),
            summary: "Longer intro.".to_string(),
            ..SiteSettings::default()
        };
        let bundle = BundleConfig {
            complete_path: "all.md".to_string(),
            documentation: vec![Link {
                label: "Guide".to_string(),
                url: "/guide.html".to_string(),
            }],
            sources: vec![Link {
                label: "Repo".to_string(),
                url: "https://example.com/repo".to_string(),
            }],
            ..BundleConfig::default()
        };
        assert_eq!(
            discovery_manifest(&site, &bundle),
            "# Demo\n> Short\n\nLonger intro.\n\n## Documentation\n\
- Full documentation: /all.md\n- Guide: /guide.html\n\n## Source\n\
- Repo: https://example.com/repo\n"
        );
    }
}
