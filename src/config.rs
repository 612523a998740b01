//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults
//! describe the Faber documentation site; a user file overrides only the keys
//! it names.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [site]
//! name = "Faber Language"
//! tagline = "A Latin programming language designed for LLM consumption"
//! summary = "This site documents the Faber programming language."
//! default_description = "Faber programming language documentation"
//! home_page = "index.md"                 # excluded from nav and bundle
//! section_order = ["compilers", "docs"]  # listed first, rest alphabetical
//!
//! [bundle]
//! complete_path = "faber-complete.md"
//! manifest_path = "llms.txt"
//! stylesheet_path = "styles.css"
//!
//! [[bundle.documentation]]
//! label = "Grammar reference"
//! url = "/docs/grammar.html"
//!
//! [sync]
//! faber_root = "../faber"
//! trials_root = "../faber-trials"
//! ```
//!
//! Paths (content, output, templates, stylesheet) are not configured here:
//! they come from the command line as a [`crate::generate::BuildPaths`].
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Identity, navigation, and fallback text.
    pub site: SiteSettings,
    /// Generated non-page artifacts.
    pub bundle: BundleConfig,
    /// Sources for the `sync` commands.
    pub sync: SyncConfig,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.site.name.trim().is_empty() {
            return Err(ConfigError::Validation("site.name must not be empty".into()));
        }
        if !self.site.home_page.ends_with(".md") {
            return Err(ConfigError::Validation(
                "site.home_page must be a .md source path".into(),
            ));
        }
        for (key, value) in [
            ("bundle.complete_path", &self.bundle.complete_path),
            ("bundle.manifest_path", &self.bundle.manifest_path),
            ("bundle.stylesheet_path", &self.bundle.stylesheet_path),
        ] {
            if !is_relative_output_path(value) {
                return Err(ConfigError::Validation(format!(
                    "{key} must be a non-empty relative path inside the output directory"
                )));
            }
        }
        if self.sync.examples.per_category == 0 {
            return Err(ConfigError::Validation(
                "sync.examples.per_category must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

fn is_relative_output_path(value: &str) -> bool {
    !value.is_empty()
        && !value.starts_with('/')
        && !value.split('/').any(|segment| segment == "..")
}

/// Identity, navigation, and fallback text for the generated site.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteSettings {
    /// Site name, used as the heading of both bundles.
    pub name: String,
    /// One-line tagline for the discovery manifest.
    pub tagline: String,
    /// Sentence introducing the site in the discovery manifest.
    pub summary: String,
    /// Page description used when a page's front matter has none.
    pub default_description: String,
    /// Source path of the landing page. Never listed in navigation or bundled.
    pub home_page: String,
    /// Sections listed first in navigation, in this order.
    pub section_order: Vec<String>,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            name: "Faber Language".to_string(),
            tagline: "A Latin programming language designed for LLM consumption".to_string(),
            summary: "This site documents the Faber programming language.".to_string(),
            default_description: "Faber programming language documentation".to_string(),
            home_page: "index.md".to_string(),
            section_order: vec!["compilers".to_string(), "docs".to_string()],
        }
    }
}

/// A labelled pointer listed in the discovery manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Link {
    pub label: String,
    pub url: String,
}

impl Link {
    fn new(label: &str, url: &str) -> Self {
        Self {
            label: label.to_string(),
            url: url.to_string(),
        }
    }
}

/// Output names and manifest pointers for the generated bundles.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BundleConfig {
    /// Long-form concatenation of every page, relative to the output root.
    pub complete_path: String,
    /// Discovery manifest, relative to the output root.
    pub manifest_path: String,
    /// Where the stylesheet is copied, relative to the output root.
    pub stylesheet_path: String,
    /// Reference pages listed under "Documentation" in the manifest.
    pub documentation: Vec<Link>,
    /// Repositories listed under "Source" in the manifest.
    pub sources: Vec<Link>,
}

impl Default for BundleConfig {
    fn default() -> Self {
        Self {
            complete_path: "faber-complete.md".to_string(),
            manifest_path: "llms.txt".to_string(),
            stylesheet_path: "styles.css".to_string(),
            documentation: vec![
                Link::new("Grammar reference", "/docs/grammar.html"),
                Link::new("Examples", "/docs/examples.html"),
            ],
            sources: vec![
                Link::new("Language", "https://github.com/ianzepp/faber-romanus"),
                Link::new("Research", "https://github.com/ianzepp/faber-romanus"),
            ],
        }
    }
}

/// Sibling project trees that the `sync` commands read from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SyncConfig {
    /// Root of the faber language repository.
    pub faber_root: String,
    /// Root of the faber-trials evaluation repository.
    pub trials_root: String,
    /// Compiler READMEs and checklists copied into the `compilers` section.
    pub compilers: Vec<CompilerSource>,
    pub grammar: GrammarSync,
    pub examples: ExamplesSync,
    pub research: ResearchSync,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            faber_root: "../faber".to_string(),
            trials_root: "../faber-trials".to_string(),
            compilers: vec![
                CompilerSource::new(
                    "fons/nanus-ts/README.md",
                    "compilers/nanus-ts.md",
                    "nanus-ts (TypeScript)",
                    "TypeScript compiler implementation",
                    0,
                ),
                CompilerSource::new(
                    "fons/nanus-go/README.md",
                    "compilers/nanus-go.md",
                    "nanus-go (Go)",
                    "Go compiler implementation",
                    1,
                ),
                CompilerSource::new(
                    "fons/rivus/CHECKLIST.md",
                    "compilers/rivus.md",
                    "rivus (Bootstrap)",
                    "Bootstrap compiler implementation status",
                    2,
                ),
            ],
            grammar: GrammarSync::default(),
            examples: ExamplesSync::default(),
            research: ResearchSync::default(),
        }
    }
}

/// One compiler document: `source` is relative to `faber_root`, `dest` to the
/// content root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompilerSource {
    pub source: String,
    pub dest: String,
    pub title: String,
    pub description: String,
    pub order: i64,
}

impl CompilerSource {
    fn new(source: &str, dest: &str, title: &str, description: &str, order: i64) -> Self {
        Self {
            source: source.to_string(),
            dest: dest.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            order,
        }
    }
}

/// Grammar reference and prose tutorials.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GrammarSync {
    /// Formal grammar document, relative to `faber_root`.
    pub ebnf: String,
    /// Destination of the grammar reference, relative to the content root.
    /// Tutorials land in the same directory.
    pub dest: String,
    pub title: String,
    pub description: String,
    pub order: i64,
    /// Directory of tutorial `*.md` files, relative to `faber_root`.
    pub topics_dir: String,
    /// Explicit order per tutorial filename.
    pub topic_order: BTreeMap<String, i64>,
    /// Order for tutorials missing from `topic_order`.
    pub default_topic_order: i64,
}

impl Default for GrammarSync {
    fn default() -> Self {
        let topic_order = [
            ("fundamenta.md", 10),
            ("typi.md", 11),
            ("operatores.md", 12),
            ("structurae.md", 13),
            ("regimen.md", 14),
            ("functiones.md", 15),
            ("importa.md", 16),
            ("errores.md", 17),
        ]
        .into_iter()
        .map(|(name, order)| (name.to_string(), order))
        .collect();

        Self {
            ebnf: "EBNF.md".to_string(),
            dest: "docs/grammar.md".to_string(),
            title: "Grammar Reference".to_string(),
            description: "Formal Faber language grammar in EBNF".to_string(),
            order: 1,
            topics_dir: "fons/grammatica".to_string(),
            topic_order,
            default_topic_order: 50,
        }
    }
}

/// Code samples gathered into the examples pages.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExamplesSync {
    /// Directory of `*.fab` files, relative to `faber_root`.
    pub dir: String,
    /// Curated page, relative to the content root.
    pub page: String,
    /// Complete collection, relative to the content root.
    pub full_page: String,
    /// Examples shown per category on the curated page.
    pub per_category: usize,
}

impl Default for ExamplesSync {
    fn default() -> Self {
        Self {
            dir: "fons/exempla".to_string(),
            page: "docs/examples.md".to_string(),
            full_page: "docs/examples-full.md".to_string(),
            per_category: 5,
        }
    }
}

/// Evaluation-run result logs summarised into the research page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResearchSync {
    /// Directory of run folders, relative to `trials_root`.
    pub results_dir: String,
    /// Generated page, relative to the content root.
    pub page: String,
}

impl Default for ResearchSync {
    fn default() -> Self {
        Self {
            results_dir: "results".to_string(),
            page: "research/results.md".to_string(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer for merging user overrides on top.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(SiteConfig::default())
        .map_err(|e| ConfigError::Validation(format!("default config must serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay (including arrays) replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
/// Returns `Err` if the file exists but contains invalid TOML.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from the given `config.toml` path.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result. A missing file yields the defaults.
pub fn load_config(path: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = load_raw_config(path)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Faber Site Configuration
# ========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Site identity and navigation
# ---------------------------------------------------------------------------
[site]
name = "Faber Language"
tagline = "A Latin programming language designed for LLM consumption"
summary = "This site documents the Faber programming language."

# Used for <meta name="description"> when a page has no description.
default_description = "Faber programming language documentation"

# Landing page (source path). Reachable from the site branding only: it is
# never listed in navigation and never included in the complete bundle.
home_page = "index.md"

# Navigation sections shown first, in this order. Any other section follows,
# sorted alphabetically.
section_order = ["compilers", "docs"]

# ---------------------------------------------------------------------------
# Generated bundles (paths relative to the output directory)
# ---------------------------------------------------------------------------
[bundle]
complete_path = "faber-complete.md"
manifest_path = "llms.txt"
stylesheet_path = "styles.css"

[[bundle.documentation]]
label = "Grammar reference"
url = "/docs/grammar.html"

[[bundle.documentation]]
label = "Examples"
url = "/docs/examples.html"

[[bundle.sources]]
label = "Language"
url = "https://github.com/ianzepp/faber-romanus"

[[bundle.sources]]
label = "Research"
url = "https://github.com/ianzepp/faber-romanus"

# ---------------------------------------------------------------------------
# Content sync (sources relative to faber_root / trials_root,
# destinations relative to the content directory)
# ---------------------------------------------------------------------------
[sync]
faber_root = "../faber"
trials_root = "../faber-trials"

[[sync.compilers]]
source = "fons/nanus-ts/README.md"
dest = "compilers/nanus-ts.md"
title = "nanus-ts (TypeScript)"
description = "TypeScript compiler implementation"
order = 0

[[sync.compilers]]
source = "fons/nanus-go/README.md"
dest = "compilers/nanus-go.md"
title = "nanus-go (Go)"
description = "Go compiler implementation"
order = 1

[[sync.compilers]]
source = "fons/rivus/CHECKLIST.md"
dest = "compilers/rivus.md"
title = "rivus (Bootstrap)"
description = "Bootstrap compiler implementation status"
order = 2

[sync.grammar]
ebnf = "EBNF.md"
dest = "docs/grammar.md"
title = "Grammar Reference"
description = "Formal Faber language grammar in EBNF"
order = 1
topics_dir = "fons/grammatica"
default_topic_order = 50

[sync.grammar.topic_order]
"fundamenta.md" = 10
"typi.md" = 11
"operatores.md" = 12
"structurae.md" = 13
"regimen.md" = 14
"functiones.md" = 15
"importa.md" = 16
"errores.md" = 17

[sync.examples]
dir = "fons/exempla"
page = "docs/examples.md"
full_page = "docs/examples-full.md"
# Examples shown per category on the curated page.
per_category = 5

[sync.research]
results_dir = "results"
page = "research/results.md"
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_site_settings() {
        let config = SiteConfig::default();
        assert_eq!(config.site.home_page, "index.md");
        assert_eq!(config.site.section_order, vec!["compilers", "docs"]);
        assert_eq!(
            config.site.default_description,
            "Faber programming language documentation"
        );
    }

    #[test]
    fn default_config_bundle_paths() {
        let config = SiteConfig::default();
        assert_eq!(config.bundle.complete_path, "faber-complete.md");
        assert_eq!(config.bundle.manifest_path, "llms.txt");
        assert_eq!(config.bundle.stylesheet_path, "styles.css");
        assert_eq!(config.bundle.documentation.len(), 2);
    }

    #[test]
    fn default_config_sync_sources() {
        let config = SiteConfig::default();
        assert_eq!(config.sync.compilers.len(), 3);
        assert_eq!(config.sync.compilers[2].dest, "compilers/rivus.md");
        assert_eq!(config.sync.grammar.topic_order.get("typi.md"), Some(&11));
        assert_eq!(config.sync.examples.per_category, 5);
    }

    #[test]
    fn parse_partial_config() {
        let toml = r#"
[site]
name = "Other"
"#;
        let config: SiteConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.site.name, "Other");
        // Defaults preserved
        assert_eq!(config.site.home_page, "index.md");
        assert_eq!(config.bundle.manifest_path, "llms.txt");
    }

    #[test]
    fn validate_default_config_passes() {
        assert!(SiteConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_name() {
        let mut config = SiteConfig::default();
        config.site.name = "  ".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn validate_rejects_non_markdown_home_page() {
        let mut config = SiteConfig::default();
        config.site.home_page = "index.html".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn validate_rejects_escaping_bundle_paths() {
        for bad in ["", "/abs.md", "../outside.md", "a/../../b.txt"] {
            let mut config = SiteConfig::default();
            config.bundle.complete_path = bad.to_string();
            assert!(
                matches!(config.validate(), Err(ConfigError::Validation(_))),
                "{bad:?} accepted"
            );
        }
    }

    #[test]
    fn validate_rejects_zero_examples_per_category() {
        let mut config = SiteConfig::default();
        config.sync.examples.per_category = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    // =========================================================================
    // merge_toml tests
    // =========================================================================

    #[test]
    fn merge_toml_scalar_override() {
        let base = toml::Value::Integer(1);
        let overlay = toml::Value::Integer(2);
        assert_eq!(merge_toml(base, overlay), toml::Value::Integer(2));
    }

    #[test]
    fn merge_toml_table_merge_preserves_base_keys() {
        let base: toml::Value = toml::from_str("[site]\nname = \"A\"\nhome_page = \"index.md\"").unwrap();
        let overlay: toml::Value = toml::from_str("[site]\nname = \"B\"").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged["site"]["name"].as_str(), Some("B"));
        assert_eq!(merged["site"]["home_page"].as_str(), Some("index.md"));
    }

    #[test]
    fn merge_toml_arrays_replace() {
        let base: toml::Value = toml::from_str("order = [\"a\", \"b\"]").unwrap();
        let overlay: toml::Value = toml::from_str("order = [\"c\"]").unwrap();
        let merged = merge_toml(base, overlay);
        let order: Vec<&str> = merged["order"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|v| v.as_str())
            .collect();
        assert_eq!(order, vec!["c"]);
    }

    // =========================================================================
    // load_config tests
    // =========================================================================

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(&tmp.path().join("config.toml")).unwrap();
        assert_eq!(config.site.name, "Faber Language");
        assert_eq!(config.bundle.complete_path, "faber-complete.md");
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(
            &path,
            r#"
[site]
section_order = ["guides"]

[bundle]
complete_path = "all.md"
"#,
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.site.section_order, vec!["guides"]);
        assert_eq!(config.bundle.complete_path, "all.md");
        // Unspecified values are defaults
        assert_eq!(config.bundle.manifest_path, "llms.txt");
        assert_eq!(config.sync.compilers.len(), 3);
    }

    #[test]
    fn load_config_replaces_link_lists() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(
            &path,
            r#"
[[bundle.documentation]]
label = "Tour"
url = "/docs/tour.html"
"#,
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(
            config.bundle.documentation,
            vec![Link::new("Tour", "/docs/tour.html")]
        );
        assert_eq!(config.bundle.sources.len(), 2);
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "[site\nname = ").unwrap();
        assert!(matches!(load_config(&path), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn unknown_key_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "[site]\ntitel = \"typo\"\n").unwrap();
        assert!(load_config(&path).is_err());
    }

    #[test]
    fn unknown_section_rejected() {
        let toml = "[layout]\nfoo = 1\n";
        let result: Result<SiteConfig, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn load_config_validates_values() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "[bundle]\nmanifest_path = \"/etc/llms.txt\"\n").unwrap();
        assert!(matches!(
            load_config(&path),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn resolve_config_with_no_overlay() {
        let base = stock_defaults_value().unwrap();
        let config = resolve_config(base, None).unwrap();
        assert_eq!(config.site.home_page, "index.md");
    }

    // =========================================================================
    // Stock config tests
    // =========================================================================

    #[test]
    fn stock_config_toml_is_valid_toml() {
        let value: toml::Value = toml::from_str(stock_config_toml()).unwrap();
        assert!(value.is_table());
    }

    #[test]
    fn stock_config_toml_roundtrips_to_defaults() {
        let parsed: SiteConfig = toml::from_str(stock_config_toml()).unwrap();
        let defaults = SiteConfig::default();
        assert_eq!(
            toml::Value::try_from(&parsed).unwrap(),
            toml::Value::try_from(&defaults).unwrap()
        );
    }

    #[test]
    fn stock_defaults_value_has_all_sections() {
        let value = stock_defaults_value().unwrap();
        let table = value.as_table().unwrap();
        for section in ["site", "bundle", "sync"] {
            assert!(table.contains_key(section), "missing [{section}]");
        }
    }
}
