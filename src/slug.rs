//! Anchor identifiers for headings.
//!
//! One derivation serves both the heading extractor (navigation links) and
//! the markdown renderer (the `id` attribute on `<h2>`/`<h3>`), so a link
//! built from source text always addresses the fragment the renderer emits.
//!
//! ```text
//! "Getting Started"        → "getting-started"
//! "  C++ / Rust interop! " → "c-rust-interop"
//! "Über uns"               → "ber-uns"
//! ```

/// Derive a URL-fragment-safe identifier from heading text.
///
/// Lower-cases the text, replaces every maximal run of characters outside
/// `[a-z0-9]` with a single `-`, and strips leading and trailing dashes.
/// Non-ASCII letters are separators, not transliterated.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;

    for c in text.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }

    slug
}
