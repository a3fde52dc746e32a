mod article_source;
mod model_client;
mod section_store;

pub use article_source::ArticleFetcher;
pub use model_client::{CompletionRequest, ModelClient};
pub use section_store::SectionStore;
