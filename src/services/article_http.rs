//! Readability-style article retrieval over HTTP.

use std::sync::OnceLock;
use std::time::Duration;

use regex::Regex;
use reqwest::blocking::Client;
use url::Url;

use crate::domain::{AppError, BlogContent};
use crate::ports::ArticleFetcher;
use crate::services::html_text::{decode_entities, strip_tags};

const USER_AGENT: &str = concat!("mailforge/", env!("CARGO_PKG_VERSION"));
const MIN_BODY_CHARS: usize = 80;

static TITLE: OnceLock<Regex> = OnceLock::new();
static H1: OnceLock<Regex> = OnceLock::new();
static ARTICLE: OnceLock<Regex> = OnceLock::new();
static PARAGRAPH: OnceLock<Regex> = OnceLock::new();

/// Blocking article fetcher.
#[derive(Debug, Clone)]
pub struct HttpArticleFetcher {
    client: Client,
}

impl HttpArticleFetcher {
    pub fn new(timeout_secs: u64) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| AppError::config_error(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

impl ArticleFetcher for HttpArticleFetcher {
    fn fetch(&self, url: &Url) -> Result<BlogContent, AppError> {
        let response = self.client.get(url.clone()).send().map_err(|e| AppError::Fetch {
            url: url.to_string(),
            details: e.to_string(),
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Fetch {
                url: url.to_string(),
                details: format!("HTTP status {}", status.as_u16()),
            });
        }

        let html = response.text().map_err(|e| AppError::Fetch {
            url: url.to_string(),
            details: e.to_string(),
        })?;

        extract_article(&html, url)
    }
}

/// Isolate the readable article from fetched markup. Prefers the `<article>`
/// element, falls back to every paragraph in the document.
pub fn extract_article(html: &str, url: &Url) -> Result<BlogContent, AppError> {
    let title = extract_title(html)
        .unwrap_or_else(|| url.host_str().unwrap_or("Untitled post").to_string());

    let article_re = ARTICLE
        .get_or_init(|| Regex::new(r"(?is)<article[^>]*>(.*?)</article>").expect("static regex"));
    let scope = article_re
        .captures(html)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
        .unwrap_or(html);

    let paragraph_re =
        PARAGRAPH.get_or_init(|| Regex::new(r"(?is)<p[^>]*>(.*?)</p>").expect("static regex"));
    let paragraphs: Vec<String> = paragraph_re
        .captures_iter(scope)
        .filter_map(|c| c.get(1))
        .map(|m| decode_entities(&strip_tags(m.as_str())).trim().to_string())
        .filter(|p| !p.is_empty())
        .collect();

    let text = paragraphs.join("\n\n");
    if text.chars().count() < MIN_BODY_CHARS {
        return Err(AppError::Extraction(format!(
            "page at {} yielded {} characters of paragraph text",
            url,
            text.chars().count()
        )));
    }

    Ok(BlogContent { title, text, source_url: Some(url.clone()) })
}

fn extract_title(html: &str) -> Option<String> {
    let title_re =
        TITLE.get_or_init(|| Regex::new(r"(?is)<title[^>]*>(.*?)</title>").expect("static regex"));
    let h1_re = H1.get_or_init(|| Regex::new(r"(?is)<h1[^>]*>(.*?)</h1>").expect("static regex"));

    [title_re, h1_re].iter().find_map(|re| {
        re.captures(html)
            .and_then(|c| c.get(1))
            .map(|m| decode_entities(&strip_tags(m.as_str())).trim().to_string())
            .filter(|t| !t.is_empty())
    })
}
