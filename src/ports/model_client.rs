use serde_json::Value;

use crate::domain::AppError;

/// One schema-constrained completion request.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// System prompt (brand guidelines, catalog, rules).
    pub system: String,
    /// User-turn content (the article or brief).
    pub prompt: String,
    /// JSON schema the response text must conform to.
    pub schema: Value,
}

/// Boundary to the hosted model service: prompt in, schema-shaped JSON out.
pub trait ModelClient {
    /// Run one completion and return the parsed JSON payload. Provider
    /// failures map to `AppError::Provider`; text that does not parse as JSON
    /// maps to `AppError::MalformedOutput`.
    fn complete(&self, request: &CompletionRequest) -> Result<Value, AppError>;
}
