//! Example pages built from `*.fab` source files.
//!
//! Examples are grouped by their parent directory name (files directly in the
//! examples root fall under `misc`). The curated page shows the first few of
//! each category; the full page shows all of them.

use super::{SyncError, SyncPaths, SyncResult, read_source, write_document};
use crate::config::ExamplesSync;
use crate::frontmatter::{Block, render_block};
use std::collections::BTreeMap;
use std::path::Path;
use walkdir::WalkDir;

pub const SECTION: &str = "docs";
pub const EXTENSION: &str = "fab";
const UNCATEGORIZED: &str = "misc";

/// One example program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Example {
    pub category: String,
    /// File stem.
    pub name: String,
    pub code: String,
}

pub fn sync_examples(paths: &SyncPaths, examples: &ExamplesSync) -> Result<Vec<SyncResult>, SyncError> {
    let found = load_examples(&paths.faber_root.join(&examples.dir))?;
    Ok(vec![
        write_document(
            &paths.content_root,
            &examples.page,
            &curated_page(&found, examples.per_category)?,
        )?,
        write_document(&paths.content_root, &examples.full_page, &full_page(&found)?)?,
    ])
}

/// Every example under `dir`, in path order.
pub fn load_examples(dir: &Path) -> Result<Vec<Example>, SyncError> {
    let mut examples = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(|source| SyncError::Walk {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if !entry.file_type().is_file() || path.extension().is_none_or(|ext| ext != EXTENSION) {
            continue;
        }
        let relative = path.strip_prefix(dir).unwrap_or(path);
        let category = relative
            .parent()
            .and_then(Path::file_name)
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| UNCATEGORIZED.to_string());
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        examples.push(Example {
            category,
            name,
            code: read_source(path)?,
        });
    }
    Ok(examples)
}

fn by_category(examples: &[Example]) -> BTreeMap<&str, Vec<&Example>> {
    let mut groups: BTreeMap<&str, Vec<&Example>> = BTreeMap::new();
    for example in examples {
        groups.entry(&example.category).or_default().push(example);
    }
    groups
}

fn push_example(page: &mut String, example: &Example) {
    page.push_str(&format!(
        "### {}\n\n```faber\n{}\n```\n\n",
        example.name,
        example.code.trim()
    ));
}

/// The curated examples page: at most `per_category` per category.
pub fn curated_page(examples: &[Example], per_category: usize) -> Result<String, SyncError> {
    let mut page = render_block(&Block {
        title: "Examples",
        description: Some("Faber code examples organized by feature"),
        section: SECTION,
        order: 2,
    })?;
    page.push_str(
        "\n# Examples\n\nFaber code examples from the `exempla/` directory, organized by feature category.\n\n",
    );

    for (category, items) in by_category(examples) {
        page.push_str(&format!("## {category}\n\n"));
        for example in items.iter().take(per_category) {
            push_example(&mut page, example);
        }
        if items.len() > per_category {
            page.push_str(&format!(
                "*{} more examples in this category*\n\n",
                items.len() - per_category
            ));
        }
    }
    Ok(page)
}

/// The complete examples page.
pub fn full_page(examples: &[Example]) -> Result<String, SyncError> {
    let mut page = render_block(&Block {
        title: "All Examples",
        description: Some("Complete collection of Faber examples"),
        section: SECTION,
        order: 3,
    })?;
    page.push_str(&format!(
        "\n# Faber Examples - Complete Collection\n\nThis file contains all {} examples from the Faber exempla/ directory.\n\n",
        examples.len()
    ));

    for (category, items) in by_category(examples) {
        page.push_str(&format!("## {category}\n\n"));
        for example in items {
            push_example(&mut page, example);
        }
    }
    Ok(page)
}
