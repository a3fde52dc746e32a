use url::Url;

/// Canonical article record produced by retrieval, read-only afterwards.
#[derive(Debug, Clone)]
pub struct BlogContent {
    pub title: String,
    pub text: String,
    pub source_url: Option<Url>,
}

impl BlogContent {
    /// Build content from raw pasted text. The first non-empty line becomes
    /// the title; the remainder is the body. Single-line input is both.
    pub fn from_text(text: &str) -> BlogContent {
        let trimmed = text.trim();
        let mut lines = trimmed.lines();
        let title = lines.next().unwrap_or("").trim().to_string();
        let rest: String = lines.collect::<Vec<_>>().join("\n").trim().to_string();

        BlogContent {
            title: truncate(&title, 120),
            text: if rest.is_empty() { trimmed.to_string() } else { rest },
            source_url: None,
        }
    }

    /// Wrap a free-text brief. There is no article yet; the brief itself is
    /// the content the planner writes against.
    pub fn from_prompt(prompt: &str) -> BlogContent {
        BlogContent {
            title: "Content brief".to_string(),
            text: prompt.trim().to_string(),
            source_url: None,
        }
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        s.chars().take(max_chars).collect()
    }
}
