//! CLI output formatting for every command.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. The primary display
//! for every page is its title and positional index; source paths and output
//! URLs are secondary context on indented lines or after an arrow.
//!
//! # Output Format
//!
//! ## Check
//!
//! ```text
//! Home
//!     Source: index.md
//!
//! Sections
//! 001 compilers (2 pages)
//!     001 nanus-ts (TypeScript) (4 headings)
//!         Source: compilers/nanus-ts.md
//!         TypeScript compiler implementation
//! 002 docs (1 page)
//!     001 Grammar Reference
//!         Source: docs/grammar.md
//! ```
//!
//! ## Build
//!
//! ```text
//! Pages
//! 001 nanus-ts (TypeScript) → compilers/nanus-ts.html
//! 002 Grammar Reference → docs/grammar.html
//!
//! Assets
//!     styles.css
//!
//! Bundles
//!     faber-complete.md
//!     llms.txt
//!
//! Generated 2 pages, 2 bundles
//! ```
//!
//! ## Sync
//!
//! ```text
//! created   compilers/nanus-ts.md
//! unchanged docs/grammar.md
//!
//! Synced 2 files (1 created, 0 updated, 1 unchanged)
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure: no I/O, no side effects.

use crate::config::SiteSettings;
use crate::generate::BuildReport;
use crate::nav::group_sections;
use crate::sync::{SyncAction, SyncResult};
use crate::types::Page;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// `1 page`, `2 pages`.
fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

/// Format an entity header: positional index + title, with optional count.
///
/// ```text
/// 001 docs (3 pages)
/// 002 Grammar Reference
/// ```
fn entity_header(index: usize, title: &str, count: Option<(usize, &str)>) -> String {
    match count {
        Some((n, noun)) => format!("{} {} ({})", format_index(index), title, plural(n, noun)),
        None => format!("{} {}", format_index(index), title),
    }
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate_desc(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

// ============================================================================
// Check
// ============================================================================

/// Inventory of loaded pages, grouped the way navigation shows them.
pub fn format_check_output(pages: &[Page], site: &SiteSettings) -> Vec<String> {
    let mut lines = Vec::new();

    if let Some(home) = pages.iter().find(|p| p.source_path == site.home_page) {
        lines.push("Home".to_string());
        lines.push(format!("{}Source: {}", indent(1), home.source_path));
        lines.push(String::new());
    }

    let sections = group_sections(pages, &site.home_page, &site.section_order);
    lines.push("Sections".to_string());
    for (i, section) in sections.iter().enumerate() {
        lines.push(entity_header(
            i + 1,
            section.name,
            Some((section.pages.len(), "page")),
        ));
        for (j, page) in section.pages.iter().enumerate() {
            let headings = (!page.headings.is_empty()).then(|| (page.headings.len(), "heading"));
            lines.push(format!(
                "{}{}",
                indent(1),
                entity_header(j + 1, &page.meta.title, headings)
            ));
            lines.push(format!("{}Source: {}", indent(2), page.source_path));
            if let Some(desc) = &page.meta.description {
                lines.push(format!("{}{}", indent(2), truncate_desc(desc.trim(), 60)));
            }
        }
    }

    lines
}

/// Print check output to stdout.
pub fn print_check_output(pages: &[Page], site: &SiteSettings) {
    for line in format_check_output(pages, site) {
        println!("{}", line);
    }
}

// ============================================================================
// Build
// ============================================================================

pub fn format_build_output(report: &BuildReport) -> Vec<String> {
    let mut lines = Vec::new();

    if !report.pages.is_empty() {
        lines.push("Pages".to_string());
        for (i, page) in report.pages.iter().enumerate() {
            lines.push(format!(
                "{} {} → {}",
                format_index(i + 1),
                page.title,
                page.url.trim_start_matches('/')
            ));
        }
        lines.push(String::new());
    }

    lines.push("Assets".to_string());
    lines.push(format!("{}{}", indent(1), report.stylesheet));
    lines.push(String::new());

    lines.push("Bundles".to_string());
    for bundle in &report.bundles {
        lines.push(format!("{}{}", indent(1), bundle));
    }
    lines.push(String::new());

    lines.push(format!(
        "Generated {}, {}",
        plural(report.pages.len(), "page"),
        plural(report.bundles.len(), "bundle")
    ));
    lines
}

/// Print build output to stdout.
pub fn print_build_output(report: &BuildReport) {
    for line in format_build_output(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Sync
// ============================================================================

pub fn format_sync_output(results: &[SyncResult]) -> Vec<String> {
    let mut lines: Vec<String> = results
        .iter()
        .map(|r| format!("{:<9} {}", r.action.to_string(), r.file))
        .collect();
    if !lines.is_empty() {
        lines.push(String::new());
    }

    let count = |action: SyncAction| results.iter().filter(|r| r.action == action).count();
    lines.push(format!(
        "Synced {} ({} created, {} updated, {} unchanged)",
        plural(results.len(), "file"),
        count(SyncAction::Created),
        count(SyncAction::Updated),
        count(SyncAction::Unchanged)
    ));
    lines
}

/// Print sync output to stdout.
pub fn print_sync_output(results: &[SyncResult]) {
    for line in format_sync_output(results) {
        println!("{}", line);
    }
}
