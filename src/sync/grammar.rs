//! Grammar reference and prose tutorials.
//!
//! The formal grammar becomes one page. Each tutorial file in the topics
//! directory becomes a page next to it, titled by its first `# ` heading and
//! ordered by the configured topic table.

use super::{SyncError, SyncPaths, SyncResult, read_source, write_document};
use crate::config::GrammarSync;
use crate::frontmatter::{Block, render_block};
use std::fs;
use std::path::Path;

pub const SECTION: &str = "docs";

pub fn sync_grammar(paths: &SyncPaths, grammar: &GrammarSync) -> Result<Vec<SyncResult>, SyncError> {
    let mut results = Vec::new();

    let ebnf = read_source(&paths.faber_root.join(&grammar.ebnf))?;
    let reference = render_block(&Block {
        title: &grammar.title,
        description: Some(&grammar.description),
        section: SECTION,
        order: grammar.order,
    })?;
    results.push(write_document(
        &paths.content_root,
        &grammar.dest,
        &format!("{reference}\n{ebnf}\n"),
    )?);

    let dest_dir = grammar
        .dest
        .rsplit_once('/')
        .map(|(dir, _)| dir)
        .unwrap_or("");
    for file in topic_files(&paths.faber_root.join(&grammar.topics_dir))? {
        let source = read_source(&paths.faber_root.join(&grammar.topics_dir).join(&file))?;
        let stem = file.strip_suffix(".md").unwrap_or(&file);
        let title = first_title(&source).unwrap_or(stem);
        let order = grammar
            .topic_order
            .get(&file)
            .copied()
            .unwrap_or(grammar.default_topic_order);
        let block = render_block(&Block {
            title,
            description: None,
            section: SECTION,
            order,
        })?;
        let dest = if dest_dir.is_empty() {
            file.clone()
        } else {
            format!("{dest_dir}/{file}")
        };
        results.push(write_document(
            &paths.content_root,
            &dest,
            &format!("{block}\n{source}\n"),
        )?);
    }

    Ok(results)
}

/// Names of the `*.md` files directly inside `dir`, sorted.
fn topic_files(dir: &Path) -> Result<Vec<String>, SyncError> {
    let read_err = |source| SyncError::Read {
        path: dir.to_path_buf(),
        source,
    };
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_err)? {
        let entry = entry.map_err(read_err)?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.ends_with(".md") && entry.path().is_file() {
            files.push(name);
        }
    }
    files.sort();
    Ok(files)
}

/// Text of the first line starting with `#` and whitespace.
fn first_title(text: &str) -> Option<&str> {
    text.lines().find_map(|line| {
        let rest = line.strip_prefix('#')?;
        if !rest.starts_with(char::is_whitespace) {
            return None;
        }
        let title = rest.trim();
        (!title.is_empty()).then_some(title)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontmatter;
    use crate::test_helpers::write_source;
    use tempfile::TempDir;

    fn setup() -> (TempDir, SyncPaths) {
        let tmp = TempDir::new().unwrap();
        let paths = SyncPaths {
            content_root: tmp.path().join("content"),
            faber_root: tmp.path().join("faber"),
            trials_root: tmp.path().join("trials"),
        };
        write_source(&paths.faber_root, "EBNF.md", "# Faber EBNF\n\nprogram = { stmt } ;");
        write_source(
            &paths.faber_root,
            "fons/grammatica/typi.md",
            "Intro line\n# Typi\n\n## Numeri\n",
        );
        write_source(&paths.faber_root, "fons/grammatica/novum.md", "no heading here\n");
        write_source(&paths.faber_root, "fons/grammatica/notes.txt", "# ignored\n");
        (tmp, paths)
    }

    fn read(paths: &SyncPaths, rel: &str) -> String {
        fs::read_to_string(paths.content_root.join(rel)).unwrap()
    }

    #[test]
    fn first_title_finds_h1_only() {
        assert_eq!(first_title("text\n## Sub\n# Main\n"), Some("Main"));
        assert_eq!(first_title("#NoSpace\n"), None);
        assert_eq!(first_title("no headings"), None);
    }

    #[test]
    fn writes_reference_and_topics() {
        let (_tmp, paths) = setup();
        let results = sync_grammar(&paths, &GrammarSync::default()).unwrap();
        let files: Vec<&str> = results.iter().map(|r| r.file.as_str()).collect();
        assert_eq!(files, vec!["docs/grammar.md", "docs/novum.md", "docs/typi.md"]);

        let reference = read(&paths, "docs/grammar.md");
        let doc = frontmatter::extract(&reference, "x");
        assert_eq!(doc.meta.title, "Grammar Reference");
        assert_eq!(doc.meta.order, Some(1.0));
        assert_eq!(doc.body, "\n# Faber EBNF\n\nprogram = { stmt } ;\n");
    }

    #[test]
    fn topic_title_and_order() {
        let (_tmp, paths) = setup();
        sync_grammar(&paths, &GrammarSync::default()).unwrap();

        let typi = read(&paths, "docs/typi.md");
        let doc = frontmatter::extract(&typi, "x");
        assert_eq!(doc.meta.title, "Typi");
        assert_eq!(doc.meta.order, Some(11.0));
        assert_eq!(doc.meta.description, None);

        let novum = read(&paths, "docs/novum.md");
        let doc = frontmatter::extract(&novum, "x");
        assert_eq!(doc.meta.title, "novum");
        assert_eq!(doc.meta.order, Some(50.0));
    }

    #[test]
    fn missing_topics_dir_is_error() {
        let (_tmp, paths) = setup();
        let grammar = GrammarSync {
            topics_dir: "fons/absent".to_string(),
            ..GrammarSync::default()
        };
        assert!(matches!(
            sync_grammar(&paths, &grammar),
            Err(SyncError::Read { .. })
        ));
    }
}
