/// Normalizes a free-text title into a URL-safe base slug.
///
/// Lowercases the input, collapses every run of characters outside `[a-z0-9]`
/// into a single hyphen and trims boundary hyphens. Uniqueness probing against
/// existing records happens in the import service; the chosen slug is only
/// final once the owning insert succeeds.
#[must_use]
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_hyphen = false;

    for c in title.to_lowercase().chars() {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c);
        } else {
            pending_hyphen = true;
        }
    }

    slug
}

/// Builds the nth probe candidate for a taken base slug.
#[must_use]
pub fn suffixed(base: &str, n: u32) -> String {
    format!("{base}-{n}")
}
