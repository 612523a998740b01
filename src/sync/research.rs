//! Research results page from evaluation-run logs.
//!
//! Every run directory under the results root may hold a
//! `graded_results.jsonl` file, one JSON record per line. Records are pooled
//! and tallied by model, task, n-shot count, and context level. Blank and
//! unparseable lines are skipped. When no records exist, nothing is written.

use super::{SyncError, SyncPaths, SyncResult, read_source, write_document};
use crate::config::ResearchSync;
use crate::frontmatter::{Block, render_block};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::hash::Hash;
use std::path::Path;
use tracing::{debug, info};

pub const SECTION: &str = "research";
pub const RESULTS_FILE: &str = "graded_results.jsonl";
const UNSPECIFIED_CONTEXT: &str = "unspecified";

/// One graded evaluation.
#[derive(Debug, Clone, Deserialize)]
pub struct GradedResult {
    pub model: String,
    pub task_id: String,
    pub n_shot: u32,
    pub correct: bool,
    #[serde(default)]
    pub context: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub dialect: Option<String>,
    #[serde(default)]
    pub run_id: Option<String>,
    #[serde(default)]
    pub error_type: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub tokens_in: Option<u64>,
    #[serde(default)]
    pub tokens_out: Option<u64>,
    #[serde(default)]
    pub latency_ms: Option<f64>,
}

/// Count of evaluations and correct answers for one grouping key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tally<K> {
    pub key: K,
    pub total: usize,
    pub correct: usize,
}

impl<K> Tally<K> {
    /// Percentage correct, rounded to the nearest integer.
    pub fn accuracy(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        (self.correct as f64 * 100.0 / self.total as f64).round() as u32
    }
}

#[derive(Debug)]
pub struct ResearchStats {
    pub total: usize,
    /// Highest accuracy first.
    pub by_model: Vec<Tally<String>>,
    /// Fewest examples first.
    pub by_n_shot: Vec<Tally<u32>>,
    /// Alphabetical.
    pub by_context: Vec<Tally<String>>,
    /// Highest accuracy first.
    pub by_task: Vec<Tally<String>>,
}

pub fn sync_research(paths: &SyncPaths, research: &ResearchSync) -> Result<Vec<SyncResult>, SyncError> {
    let results = load_results(&paths.trials_root.join(&research.results_dir))?;
    if results.is_empty() {
        info!("no research results found");
        return Ok(Vec::new());
    }
    let page = results_page(&compute_stats(&results))?;
    Ok(vec![write_document(&paths.content_root, &research.page, &page)?])
}

/// Pool the records of every run directory under `results_dir`.
pub fn load_results(results_dir: &Path) -> Result<Vec<GradedResult>, SyncError> {
    let read_err = |source| SyncError::Read {
        path: results_dir.to_path_buf(),
        source,
    };
    let mut runs = Vec::new();
    for entry in fs::read_dir(results_dir).map_err(read_err)? {
        let file = entry.map_err(read_err)?.path().join(RESULTS_FILE);
        if file.is_file() {
            runs.push(file);
        }
    }
    runs.sort();

    let mut results = Vec::new();
    for file in runs {
        results.extend(parse_records(&file, &read_source(&file)?));
    }
    Ok(results)
}

fn parse_records(path: &Path, text: &str) -> Vec<GradedResult> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .filter_map(|(idx, line)| match serde_json::from_str(line) {
            Ok(record) => Some(record),
            Err(error) => {
                debug!(file = %path.display(), line = idx + 1, %error, "skipping result record");
                None
            }
        })
        .collect()
}

/// Tally `results` by `key`, keeping first-seen key order.
fn tally<K: Eq + Hash + Clone>(
    results: &[GradedResult],
    key: impl Fn(&GradedResult) -> K,
) -> Vec<Tally<K>> {
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut tallies: Vec<Tally<K>> = Vec::new();
    for result in results {
        let k = key(result);
        let slot = *index.entry(k.clone()).or_insert_with(|| {
            tallies.push(Tally {
                key: k,
                total: 0,
                correct: 0,
            });
            tallies.len() - 1
        });
        tallies[slot].total += 1;
        if result.correct {
            tallies[slot].correct += 1;
        }
    }
    tallies
}

pub fn compute_stats(results: &[GradedResult]) -> ResearchStats {
    let mut by_model = tally(results, |r| r.model.clone());
    by_model.sort_by(|a, b| b.accuracy().cmp(&a.accuracy()));

    let mut by_task = tally(results, |r| r.task_id.clone());
    by_task.sort_by(|a, b| b.accuracy().cmp(&a.accuracy()));

    let mut by_n_shot = tally(results, |r| r.n_shot);
    by_n_shot.sort_by_key(|t| t.key);

    let mut by_context = tally(results, |r| {
        r.context
            .clone()
            .unwrap_or_else(|| UNSPECIFIED_CONTEXT.to_string())
    });
    by_context.sort_by(|a, b| a.key.cmp(&b.key));

    ResearchStats {
        total: results.len(),
        by_model,
        by_n_shot,
        by_context,
        by_task,
    }
}

fn cell(text: &str) -> String {
    text.replace('|', "\\|")
}

fn push_table<K>(
    page: &mut String,
    heading: &str,
    column: &str,
    rows: &[Tally<K>],
    label: impl Fn(&K) -> String,
) {
    page.push_str(&format!("\n## {heading}\n\n"));
    page.push_str(&format!("| {column} | Tests | Correct | Accuracy |\n"));
    page.push_str("|---|---|---|---|\n");
    for row in rows {
        page.push_str(&format!(
            "| {} | {} | {} | {}% |\n",
            cell(&label(&row.key)),
            row.total,
            row.correct,
            row.accuracy()
        ));
    }
}

pub fn results_page(stats: &ResearchStats) -> Result<String, SyncError> {
    let mut page = render_block(&Block {
        title: "Research Results",
        description: Some("LLM learnability research from faber-trials"),
        section: SECTION,
        order: 1,
    })?;
    page.push_str(
        "\n# Research Results\n\nResults from the faber-trials evaluation harness. \
Testing whether LLMs can learn Faber syntax from examples.\n\n",
    );
    page.push_str(&format!("**Total evaluations:** {}\n", stats.total));

    push_table(&mut page, "By Model", "Model", &stats.by_model, String::clone);
    push_table(
        &mut page,
        "By N-shot (Learning Curve)",
        "Examples",
        &stats.by_n_shot,
        |n| format!("{n}-shot"),
    );
    push_table(&mut page, "By Context", "Context", &stats.by_context, String::clone);
    push_table(&mut page, "By Task", "Task", &stats.by_task, String::clone);

    page.push_str(
        "\n## Methodology\n\n\
- **Temperature:** 0.0 (deterministic)\n\
- **Seed:** 42 (reproducible)\n\
- **Dialects:** Latin keywords\n\
- **Context levels:** examples-only, minimal, basic, complete\n\n\
See [faber-trials](https://github.com/ianzepp/faber-trials) for raw data and methodology details.\n",
    );
    Ok(page)
}
