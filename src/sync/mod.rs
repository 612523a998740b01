//! Content sync: regenerate source documents from sibling project trees.
//!
//! Each collaborator reads files outside this repository and writes markdown
//! (with front matter) into the content directory, where the next build picks
//! it up like any hand-written page. Sync never runs as part of a build.
//!
//! | Target      | Reads                                    | Writes                          |
//! |-------------|------------------------------------------|---------------------------------|
//! | `compilers` | compiler READMEs / checklists            | `compilers/*.md`                |
//! | `grammar`   | `EBNF.md`, `fons/grammatica/*.md`        | `docs/grammar.md`, `docs/*.md`  |
//! | `examples`  | `fons/exempla/**/*.fab`                  | `docs/examples*.md`             |
//! | `research`  | `results/*/graded_results.jsonl`         | `research/results.md`           |
//!
//! Writes are skipped when the generated text equals what is already on
//! disk, so re-running a sync reports every file as unchanged.

pub mod compilers;
pub mod examples;
pub mod grammar;
pub mod research;

use crate::config::SyncConfig;
use crate::frontmatter::FrontMatterError;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("cannot read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot walk {}: {source}", .path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
    #[error(transparent)]
    FrontMatter(#[from] FrontMatterError),
}

/// Which collaborator to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Compilers,
    Grammar,
    Examples,
    Research,
    All,
}

/// Roots the collaborators read from and write to.
#[derive(Debug, Clone)]
pub struct SyncPaths {
    pub content_root: PathBuf,
    pub faber_root: PathBuf,
    pub trials_root: PathBuf,
}

impl SyncPaths {
    pub fn new(content_root: &Path, config: &SyncConfig) -> Self {
        Self {
            content_root: content_root.to_path_buf(),
            faber_root: PathBuf::from(&config.faber_root),
            trials_root: PathBuf::from(&config.trials_root),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncAction {
    Created,
    Updated,
    Unchanged,
}

impl fmt::Display for SyncAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SyncAction::Created => "created",
            SyncAction::Updated => "updated",
            SyncAction::Unchanged => "unchanged",
        })
    }
}

/// One document written (or confirmed current) by a sync.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncResult {
    /// Path relative to the content root.
    pub file: String,
    pub action: SyncAction,
}

/// Run one collaborator, or all of them in order.
pub fn run(target: Target, paths: &SyncPaths, config: &SyncConfig) -> Result<Vec<SyncResult>, SyncError> {
    match target {
        Target::Compilers => compilers::sync_compilers(paths, &config.compilers),
        Target::Grammar => grammar::sync_grammar(paths, &config.grammar),
        Target::Examples => examples::sync_examples(paths, &config.examples),
        Target::Research => research::sync_research(paths, &config.research),
        Target::All => {
            let mut results = Vec::new();
            for target in [
                Target::Compilers,
                Target::Grammar,
                Target::Examples,
                Target::Research,
            ] {
                results.extend(run(target, paths, config)?);
            }
            Ok(results)
        }
    }
}

pub(crate) fn read_source(path: &Path) -> Result<String, SyncError> {
    fs::read_to_string(path).map_err(|source| SyncError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Write `text` to `relative` under the content root unless it is already
/// there verbatim.
pub(crate) fn write_document(
    content_root: &Path,
    relative: &str,
    text: &str,
) -> Result<SyncResult, SyncError> {
    let path = content_root.join(relative);
    let action = match fs::read_to_string(&path) {
        Ok(existing) if existing == text => SyncAction::Unchanged,
        Ok(_) => SyncAction::Updated,
        Err(_) => SyncAction::Created,
    };

    if action != SyncAction::Unchanged {
        let write = || -> std::io::Result<()> {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, text)
        };
        write().map_err(|source| SyncError::Write {
            path: path.clone(),
            source,
        })?;
    }
    debug!(file = relative, %action, "synced document");

    Ok(SyncResult {
        file: relative.to_string(),
        action,
    })
}
