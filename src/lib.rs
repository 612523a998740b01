//! # Faber Site
//!
//! The documentation site builder for the Faber programming language.
//! Markdown files with YAML front matter go in; a static HTML site, a single
//! concatenated markdown bundle, and an `llms.txt` discovery manifest come out.
//!
//! # Architecture: Load, Render, Bundle
//!
//! A build is one pass over an in-memory list of pages:
//!
//! ```text
//! 1. Load      content/**/*.md      →  Vec<Page>      (front matter, HTML, headings, URL)
//! 2. Render    Vec<Page> + layout   →  dist/**/*.html (navigation per page, placeholders filled)
//! 3. Bundle    Vec<Page>            →  dist/faber-complete.md, dist/llms.txt
//! ```
//!
//! Pages are immutable once loaded. Every later stage borrows the same slice,
//! so navigation for one page can see every other page without re-reading
//! anything from disk.
//!
//! Separately, `sync` regenerates some of the markdown sources from the
//! sibling language repositories (compiler READMEs, grammar, examples, and
//! evaluation results). It writes into the content directory and never runs
//! during a build.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Page loader: discovers sources, assigns URLs, sorts by `order` |
//! | [`frontmatter`] | Splits and parses the YAML block; renders blocks for sync |
//! | [`markdown`] | Markdown → HTML with heading anchors |
//! | [`headings`] | Lazy level-2/3 heading extraction for navigation |
//! | [`slug`] | Anchor identifier generation |
//! | [`nav`] | Section grouping and navigation markup (Maud) |
//! | [`layout`] | Layout template placeholders |
//! | [`bundle`] | Complete-document bundle and discovery manifest |
//! | [`generate`] | Build orchestration and output writing |
//! | [`config`] | `config.toml` loading, validation, and merging over stock defaults |
//! | [`sync`] | Content sync from the faber and faber-trials repositories |
//! | [`types`] | Shared `Page`, `PageMeta`, `Heading` |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## One Anchor Function
//!
//! Heading ids must match between the rendered `<h2 id=…>` and the navigation
//! link `href="…#…"`. Both sides derive the id with [`slug::slugify`] from the
//! heading's plain text in one parse of the whole body, so inline code,
//! reference links, and emphasis cannot make them disagree, and a `## …` line
//! that does not render as a heading never reaches the navigation.
//!
//! ## Template Placeholders, Maud Fragments
//!
//! The outer page shell is a user-editable HTML file with four `{{…}}`
//! placeholders. The navigation inside it is generated with
//! [Maud](https://maud.lambda.xyz/), so every title is escaped at compile-time
//! checked call sites.
//!
//! ## Degrade, Don't Abort, on Bad Front Matter
//!
//! A broken YAML block costs that page its metadata, not the whole build. I/O
//! failures (template, source, output, stylesheet) still abort with the path
//! in the error.

pub mod bundle;
pub mod config;
pub mod frontmatter;
pub mod generate;
pub mod headings;
pub mod layout;
pub mod markdown;
pub mod nav;
pub mod output;
pub mod scan;
pub mod slug;
pub mod sync;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
