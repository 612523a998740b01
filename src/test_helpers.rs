//! Shared test utilities for the faber-site test suite.
//!
//! Provides fixture setup, page lookups, and small builders for pages that
//! never touch the filesystem.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let pages = load_pages(tmp.path()).unwrap();
//!
//! let grammar = find_page(&pages, "docs/grammar.md");
//! assert_eq!(grammar.meta.title, "Grammar Reference");
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::scan::url_for;
use crate::types::{Heading, Page, PageMeta};

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/content/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/content");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

/// Write a source file under `root`, creating parent directories.
pub fn write_source(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, content).unwrap();
}

// =========================================================================
// Page lookups: panics with a clear message on miss
// =========================================================================

/// Find a page by source path. Panics if not found.
pub fn find_page<'a>(pages: &'a [Page], source_path: &str) -> &'a Page {
    pages
        .iter()
        .find(|p| p.source_path == source_path)
        .unwrap_or_else(|| {
            panic!(
                "page '{source_path}' not found. Available: {:?}",
                page_sources(pages)
            )
        })
}

/// Source paths of all pages, in order.
pub fn page_sources(pages: &[Page]) -> Vec<&str> {
    pages.iter().map(|p| p.source_path.as_str()).collect()
}

// =========================================================================
// In-memory builders
// =========================================================================

/// A page with the given title and no body, order, or section.
pub fn page(source_path: &str, title: &str) -> Page {
    Page {
        source_path: source_path.to_string(),
        meta: PageMeta {
            title: title.to_string(),
            ..PageMeta::default()
        },
        raw_body: String::new(),
        rendered_body: String::new(),
        url: url_for(source_path),
        headings: Vec::new(),
    }
}

/// Same as [`page`] with an explicit section.
pub fn page_in(source_path: &str, title: &str, section: &str) -> Page {
    let mut page = page(source_path, title);
    page.meta.section = Some(section.to_string());
    page
}

/// A heading as the extractor would produce it.
pub fn heading(level: u8, text: &str) -> Heading {
    Heading {
        level,
        text: text.to_string(),
        id: crate::slug::slugify(text),
    }
}
