//! Artifact file naming.

use chrono::{DateTime, Utc};

const MAX_SLUG_CHARS: usize = 60;

/// Derive a filesystem-safe slug from the subject line: lower-cased, runs of
/// non-alphanumerics collapsed to single hyphens, trimmed, capped in length.
pub fn slugify(subject: &str) -> String {
    let mut slug = String::new();
    let mut pending_hyphen = false;

    for c in subject.to_lowercase().chars() {
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

    let capped: String = slug.chars().take(MAX_SLUG_CHARS).collect();
    let capped = capped.trim_matches('-').to_string();
    if capped.is_empty() { "email".to_string() } else { capped }
}

/// `<slug>-<timestamp>` base name shared by the HTML and text artifacts. The
/// timestamp rendering sorts lexicographically.
pub fn artifact_basename(subject: &str, started_at: DateTime<Utc>) -> String {
    format!("{}-{}", slugify(subject), started_at.format("%Y%m%d-%H%M%S"))
}
