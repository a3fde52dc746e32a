pub mod generate;
pub mod sections;
pub mod structure;

use url::Url;

use crate::app::AppContext;
use crate::domain::{AppError, BlogContent};
use crate::ports::{ArticleFetcher, ModelClient, SectionStore};

/// The one content source a run works from.
#[derive(Debug, Clone)]
pub enum ContentSource {
    /// Fetch and extract a published blog post.
    Url(Url),
    /// Use pasted article text as-is.
    Text(String),
    /// Write from a free-text brief.
    Prompt(String),
}

pub(crate) fn resolve_content<M, S, F>(
    ctx: &AppContext<M, S, F>,
    source: &ContentSource,
) -> Result<BlogContent, AppError>
where
    M: ModelClient,
    S: SectionStore,
    F: ArticleFetcher,
{
    match source {
        ContentSource::Url(url) => ctx.fetcher().fetch(url),
        ContentSource::Text(text) => Ok(BlogContent::from_text(text)),
        ContentSource::Prompt(prompt) => Ok(BlogContent::from_prompt(prompt)),
    }
}
