//! Build orchestration.
//!
//! Runs one full build: load the layout template, load every page, render
//! each page with its navigation into the output directory, copy the
//! stylesheet, and write the bundles.
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html              # from content/index.md
//! ├── about.html              # from content/about.md
//! ├── docs/
//! │   ├── grammar.html        # from content/docs/grammar.md
//! │   └── examples.html
//! ├── styles.css              # copied stylesheet
//! ├── faber-complete.md       # complete document bundle
//! └── llms.txt                # discovery manifest
//! ```
//!
//! Files are overwritten in place and nothing else in the output directory is
//! touched, so running a build twice on unchanged inputs produces identical
//! output.
//!
//! Any failure to read the template or a source, or to write an output file,
//! aborts the build with an error naming the file. Malformed front matter
//! only logs a warning (see [`crate::scan`]).

use crate::bundle;
use crate::config::SiteConfig;
use crate::layout::{Layout, render_page};
use crate::nav::render_nav;
use crate::scan::{self, ScanError};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Name of the layout template inside the templates directory.
pub const LAYOUT_FILE: &str = "layout.html";

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("cannot read layout template {}: {source}", .path.display())]
    Template {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error("cannot write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot copy stylesheet {}: {source}", .path.display())]
    Stylesheet {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Filesystem locations for a build.
#[derive(Debug, Clone)]
pub struct BuildPaths {
    pub content_root: PathBuf,
    pub output_dir: PathBuf,
    pub templates_dir: PathBuf,
    pub stylesheet: PathBuf,
}

impl Default for BuildPaths {
    fn default() -> Self {
        Self {
            content_root: PathBuf::from("content"),
            output_dir: PathBuf::from("dist"),
            templates_dir: PathBuf::from("templates"),
            stylesheet: PathBuf::from("styles/main.css"),
        }
    }
}

impl BuildPaths {
    pub fn layout_path(&self) -> PathBuf {
        self.templates_dir.join(LAYOUT_FILE)
    }
}

/// What a build wrote, relative to the output directory.
#[derive(Debug, Default)]
pub struct BuildReport {
    pub pages: Vec<GeneratedPage>,
    pub stylesheet: String,
    pub bundles: Vec<String>,
}

#[derive(Debug)]
pub struct GeneratedPage {
    pub source_path: String,
    pub title: String,
    pub url: String,
}

/// Run a full build.
pub fn build(paths: &BuildPaths, config: &SiteConfig) -> Result<BuildReport, GenerateError> {
    let layout_path = paths.layout_path();
    let layout = Layout::load(&layout_path).map_err(|source| GenerateError::Template {
        path: layout_path.clone(),
        source,
    })?;
    for placeholder in layout.missing() {
        warn!(
            template = %layout_path.display(),
            placeholder = placeholder.token(),
            "layout template has no placeholder"
        );
    }

    info!(content = %paths.content_root.display(), "loading pages");
    let pages = scan::load_pages(&paths.content_root)?;

    let mut report = BuildReport::default();
    for page in &pages {
        let nav = render_nav(&pages, page, &config.site).into_string();
        let html = render_page(&layout, page, &nav, &config.site.default_description);
        write_output(&output_path(&paths.output_dir, &page.url), &html)?;
        debug!(source = %page.source_path, url = %page.url, "rendered page");
        report.pages.push(GeneratedPage {
            source_path: page.source_path.clone(),
            title: page.meta.title.clone(),
            url: page.url.clone(),
        });
    }

    copy_stylesheet(
        &paths.stylesheet,
        &paths.output_dir.join(&config.bundle.stylesheet_path),
    )?;
    report.stylesheet = config.bundle.stylesheet_path.clone();

    let complete = bundle::complete_document(&pages, &config.site);
    write_output(&paths.output_dir.join(&config.bundle.complete_path), &complete)?;
    report.bundles.push(config.bundle.complete_path.clone());

    let manifest = bundle::discovery_manifest(&config.site, &config.bundle);
    write_output(&paths.output_dir.join(&config.bundle.manifest_path), &manifest)?;
    report.bundles.push(config.bundle.manifest_path.clone());

    info!(
        pages = report.pages.len(),
        output = %paths.output_dir.display(),
        "build complete"
    );
    Ok(report)
}

/// Filesystem location of a page URL under the output directory.
pub fn output_path(output_dir: &Path, url: &str) -> PathBuf {
    url.trim_start_matches('/')
        .split('/')
        .fold(output_dir.to_path_buf(), |path, segment| path.join(segment))
}

fn write_output(path: &Path, contents: &str) -> Result<(), GenerateError> {
    let write = || -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, contents)
    };
    write().map_err(|source| GenerateError::Write {
        path: path.to_path_buf(),
        source,
    })
}

fn copy_stylesheet(source: &Path, dest: &Path) -> Result<(), GenerateError> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).map_err(|source| GenerateError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::copy(source, dest).map_err(|e| GenerateError::Stylesheet {
        path: source.to_path_buf(),
        source: e,
    })?;
    Ok(())
}
