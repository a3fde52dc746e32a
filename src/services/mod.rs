mod article_http;
mod artifacts;
mod assembler;
mod html_text;
mod model_client_http;
mod prompts;
mod sections;

pub use article_http::{HttpArticleFetcher, extract_article};
pub use artifacts::{WrittenArtifacts, write_artifacts};
pub use assembler::{AssembledEmail, assemble};
pub use html_text::html_to_plain_text;
pub use model_client_http::HttpModelClient;
pub use prompts::{plan_prompt, plan_schema, planner_system, structure_prompt, structure_schema};
pub use sections::{DirSectionStore, EmbeddedSectionStore};
