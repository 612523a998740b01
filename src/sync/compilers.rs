//! Compiler documents: each configured README or checklist is copied under
//! fresh front matter, with its own leading `# ` title replaced.

use super::{SyncError, SyncPaths, SyncResult, read_source, write_document};
use crate::config::CompilerSource;
use crate::frontmatter::{Block, render_block};

pub const SECTION: &str = "compilers";

pub fn sync_compilers(
    paths: &SyncPaths,
    compilers: &[CompilerSource],
) -> Result<Vec<SyncResult>, SyncError> {
    let mut results = Vec::with_capacity(compilers.len());
    for compiler in compilers {
        let source = read_source(&paths.faber_root.join(&compiler.source))?;
        let document = compiler_document(compiler, &source)?;
        results.push(write_document(&paths.content_root, &compiler.dest, &document)?);
    }
    Ok(results)
}

pub fn compiler_document(compiler: &CompilerSource, source: &str) -> Result<String, SyncError> {
    let block = render_block(&Block {
        title: &compiler.title,
        description: Some(&compiler.description),
        section: SECTION,
        order: compiler.order,
    })?;
    Ok(format!(
        "{block}\n# {}\n\n{}",
        compiler.title,
        strip_leading_title(source)
    ))
}

/// Drop a `# Title` line (and one blank line after it) at the very start.
fn strip_leading_title(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("# ") else {
        return text;
    };
    let Some(newline) = rest.find('\n') else {
        return text;
    };
    if newline == 0 {
        return text;
    }
    let after = &rest[newline + 1..];
    after.strip_prefix('\n').unwrap_or(after)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontmatter;
    use crate::sync::SyncAction;
    use crate::test_helpers::write_source;
    use std::fs;
    use tempfile::TempDir;

    fn rivus() -> CompilerSource {
        CompilerSource {
            source: "fons/rivus/CHECKLIST.md".to_string(),
            dest: "compilers/rivus.md".to_string(),
            title: "rivus (Bootstrap)".to_string(),
            description: "Bootstrap compiler implementation status".to_string(),
            order: 2,
        }
    }

    #[test]
    fn strips_only_a_leading_h1() {
        assert_eq!(strip_leading_title("# Rivus\n\nBody\n"), "Body\n");
        assert_eq!(strip_leading_title("# Rivus\nBody\n"), "Body\n");
        assert_eq!(strip_leading_title("Intro\n# Later\n"), "Intro\n# Later\n");
        assert_eq!(strip_leading_title("## Sub\n\nBody"), "## Sub\n\nBody");
        assert_eq!(strip_leading_title("# No newline"), "# No newline");
    }

    #[test]
    fn document_has_front_matter_and_title() {
        let doc = compiler_document(&rivus(), "# Rivus Checklist\n\n- [x] lexer\n").unwrap();
        let parsed = frontmatter::extract(&doc, "x");
        assert!(parsed.error.is_none());
        assert_eq!(parsed.meta.title, "rivus (Bootstrap)");
        assert_eq!(parsed.meta.section.as_deref(), Some("compilers"));
        assert_eq!(parsed.meta.order, Some(2.0));
        assert_eq!(parsed.body, "\n# rivus (Bootstrap)\n\n- [x] lexer\n");
    }

    #[test]
    fn sync_writes_each_destination() {
        let tmp = TempDir::new().unwrap();
        let paths = SyncPaths {
            content_root: tmp.path().join("content"),
            faber_root: tmp.path().join("faber"),
            trials_root: tmp.path().join("trials"),
        };
        write_source(&paths.faber_root, "fons/rivus/CHECKLIST.md", "# Checklist\n\nok\n");

        let results = sync_compilers(&paths, &[rivus()]).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].action, SyncAction::Created);
        let written = fs::read_to_string(paths.content_root.join("compilers/rivus.md")).unwrap();
        assert!(written.ends_with("# rivus (Bootstrap)\n\nok\n"));

        let rerun = sync_compilers(&paths, &[rivus()]).unwrap();
        assert_eq!(rerun[0].action, SyncAction::Unchanged);
    }

    #[test]
    fn missing_source_is_error() {
        let tmp = TempDir::new().unwrap();
        let paths = SyncPaths {
            content_root: tmp.path().join("content"),
            faber_root: tmp.path().join("faber"),
            trials_root: tmp.path().join("trials"),
        };
        let err = sync_compilers(&paths, &[rivus()]).unwrap_err();
        assert!(err.to_string().contains("CHECKLIST.md"));
    }
}
