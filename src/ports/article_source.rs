use url::Url;

use crate::domain::{AppError, BlogContent};

/// Boundary to article retrieval: URL in, readable article out.
pub trait ArticleFetcher {
    /// Fetch the page at `url` and isolate its readable content. Fails with
    /// `AppError::Fetch` on network/HTTP problems and `AppError::Extraction`
    /// when no article body can be found in the markup.
    fn fetch(&self, url: &Url) -> Result<BlogContent, AppError>;
}
