//! Source discovery and page loading.
//!
//! Stage 1 of the build pipeline. Walks the content root for markdown
//! documents and turns each into a [`Page`]: front matter split off, body
//! rendered to HTML, in-page headings collected, and an output URL assigned.
//!
//! ## Directory Structure
//!
//! ```text
//! content/                         # Content root
//! ├── index.md                     # Home page → /index.html
//! ├── compilers/
//! │   ├── nanus-ts.md              # → /compilers/nanus-ts.html
//! │   └── rivus.md
//! ├── docs/
//! │   ├── grammar.md               # → /docs/grammar.html
//! │   └── index.md                 # → /docs/index.html
//! └── .drafts/                     # Hidden: skipped entirely
//!     └── wip.md
//! ```
//!
//! ## Ordering
//!
//! Pages are returned sorted by front-matter `order` ascending. Pages without
//! an `order` come after every page that has one. The sort is stable over
//! discovery order, which walks directories with entries sorted by file name,
//! so the result is the same on every run.
//!
//! ## Failures
//!
//! An unreadable content root or source file aborts the load. A malformed
//! front-matter block does not: the page is loaded with empty metadata and a
//! warning naming the file is logged.

use crate::frontmatter;
use crate::headings::extract_headings;
use crate::markdown;
use crate::types::{Page, compare_order};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

/// Extension of source documents (case-sensitive).
pub const SOURCE_EXTENSION: &str = "md";

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("cannot walk content directory {}: {source}", .path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
    #[error("cannot read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Discover, parse, and sort every source document under `content_root`.
pub fn load_pages(content_root: &Path) -> Result<Vec<Page>, ScanError> {
    let sources = discover(content_root)?;
    let mut pages = Vec::with_capacity(sources.len());
    for source_path in sources {
        pages.push(load_page(content_root, &source_path)?);
    }
    sort_pages(&mut pages);
    debug!(count = pages.len(), "loaded pages");
    Ok(pages)
}

/// Relative, `/`-separated paths of every source document, in walk order.
///
/// Hidden files and directories (leading `.`) are skipped.
pub fn discover(content_root: &Path) -> Result<Vec<String>, ScanError> {
    let mut sources = Vec::new();
    let walker = WalkDir::new(content_root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e));

    for entry in walker {
        let entry = entry.map_err(|source| ScanError::Walk {
            path: source
                .path()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| content_root.to_path_buf()),
            source,
        })?;
        if !entry.file_type().is_file() || !is_source(entry.path()) {
            continue;
        }
        let Ok(relative) = entry.path().strip_prefix(content_root) else {
            continue;
        };
        sources.push(to_source_path(relative));
    }
    Ok(sources)
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}

fn is_source(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == SOURCE_EXTENSION)
}

fn to_source_path(relative: &Path) -> String {
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Read and parse one document. `source_path` is relative to `content_root`.
pub fn load_page(content_root: &Path, source_path: &str) -> Result<Page, ScanError> {
    let path = content_root.join(source_path);
    let raw = fs::read_to_string(&path).map_err(|source| ScanError::Read { path, source })?;
    Ok(parse_page(source_path, &raw))
}

/// Build a [`Page`] from a document's text.
pub fn parse_page(source_path: &str, raw: &str) -> Page {
    let document = frontmatter::extract(raw, file_stem(source_path));
    if let Some(error) = &document.error {
        warn!(source = %source_path, %error, "ignoring malformed front matter");
    }

    Page {
        source_path: source_path.to_string(),
        rendered_body: markdown::render(document.body),
        headings: extract_headings(document.body).collect(),
        raw_body: document.body.to_string(),
        url: url_for(source_path),
        meta: document.meta,
    }
}

fn file_stem(source_path: &str) -> &str {
    let name = source_path.rsplit('/').next().unwrap_or(source_path);
    name.strip_suffix(".md").unwrap_or(name)
}

/// Output URL for a source path.
///
/// `index.md` maps to `/index.html` and `<dir>/index.md` to
/// `/<dir>/index.html`; every other `<path>.md` maps to `/<path>.html`.
pub fn url_for(source_path: &str) -> String {
    let stem = source_path.strip_suffix(".md").unwrap_or(source_path);
    format!("/{stem}.html")
}

/// Stable sort by `order`, missing orders last.
pub fn sort_pages(pages: &mut [Page]) {
    pages.sort_by(|a, b| compare_order(a.meta.order, b.meta.order));
}
