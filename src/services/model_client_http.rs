//! Model API client implementation using reqwest.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use crate::domain::{AppError, ModelConfig};
use crate::ports::{CompletionRequest, ModelClient};

const X_API_KEY: &str = "x-api-key";
const ANTHROPIC_VERSION: &str = "anthropic-version";
const API_VERSION: &str = "2023-06-01";

/// HTTP client for the hosted model service.
#[derive(Clone)]
pub struct HttpModelClient {
    api_key: String,
    api_url: Url,
    planner_model: String,
    fallback_model: String,
    retry_delay_ms: u64,
    max_tokens: u32,
    client: Client,
}

impl std::fmt::Debug for HttpModelClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpModelClient")
            .field("api_url", &self.api_url)
            .field("planner_model", &self.planner_model)
            .field("fallback_model", &self.fallback_model)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl HttpModelClient {
    /// Create a new HTTP client with the given API key and configuration.
    pub fn new(api_key: String, config: &ModelConfig) -> Result<Self, AppError> {
        let api_url = Url::parse(&config.api_url)
            .map_err(|e| AppError::config_error(format!("Invalid model API URL: {}", e)))?;
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::config_error(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            api_key,
            api_url,
            planner_model: config.planner.clone(),
            fallback_model: config.fallback.clone(),
            retry_delay_ms: config.retry_delay_ms,
            max_tokens: config.max_tokens,
            client,
        })
    }

    /// Create from the `ANTHROPIC_API_KEY` environment variable.
    pub fn from_env(config: &ModelConfig) -> Result<Self, AppError> {
        let api_key = std::env::var("ANTHROPIC_API_KEY").map_err(|_| AppError::MissingApiKey)?;
        Self::new(api_key, config)
    }
}

#[derive(Debug, Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: [ApiMessage<'a>; 1],
    output_config: ApiOutputConfig<'a>,
}

#[derive(Debug, Serialize)]
struct ApiMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ApiOutputConfig<'a> {
    format: ApiOutputFormat<'a>,
}

#[derive(Debug, Serialize)]
struct ApiOutputFormat<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    schema: &'a Value,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    content: Vec<ApiContentBlock>,
    #[serde(default)]
    stop_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: String,
}

impl ModelClient for HttpModelClient {
    fn complete(&self, request: &CompletionRequest) -> Result<Value, AppError> {
        // One retry at most; the retry substitutes the fallback model.
        let attempts = [self.planner_model.as_str(), self.fallback_model.as_str()];
        let mut last_error = None;

        for (attempt, model) in attempts.iter().enumerate() {
            if attempt > 0 {
                std::thread::sleep(Duration::from_millis(self.retry_delay_ms));
                println!("Retrying with fallback model {}...", model);
            }

            match self.send_request(model, request) {
                Ok(value) => return Ok(value),
                Err(e) => {
                    if Self::is_retryable(&e) {
                        last_error = Some(e);
                        continue;
                    }
                    return Err(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| AppError::Provider("request failed".to_string())))
    }
}

impl HttpModelClient {
    fn send_request(&self, model: &str, request: &CompletionRequest) -> Result<Value, AppError> {
        let api_request = ApiRequest {
            model,
            max_tokens: self.max_tokens,
            system: &request.system,
            messages: [ApiMessage { role: "user", content: &request.prompt }],
            output_config: ApiOutputConfig {
                format: ApiOutputFormat { kind: "json_schema", schema: &request.schema },
            },
        };

        let response = self
            .client
            .post(self.api_url.clone())
            .header(X_API_KEY, &self.api_key)
            .header(ANTHROPIC_VERSION, API_VERSION)
            .header(CONTENT_TYPE, "application/json")
            .json(&api_request)
            .send()
            .map_err(|e| AppError::Provider(format!("HTTP request failed: {}", e)))?;

        let status = response.status();

        if status.as_u16() == 429 {
            return Err(AppError::Provider("Rate limited (429)".to_string()));
        }
        if status.is_server_error() {
            return Err(AppError::Provider(format!("Server error ({})", status.as_u16())));
        }
        if !status.is_success() {
            let error_text = response.text().unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::Provider(format!(
                "API error ({}): {}",
                status.as_u16(),
                error_text
            )));
        }

        let api_response: ApiResponse = response
            .json()
            .map_err(|e| AppError::MalformedOutput(format!("Failed to parse response: {}", e)))?;

        match api_response.stop_reason.as_deref() {
            Some("refusal") => {
                return Err(AppError::Provider("Model declined the request (refusal)".to_string()));
            }
            Some("max_tokens") => {
                return Err(AppError::MalformedOutput(
                    "response truncated at max_tokens".to_string(),
                ));
            }
            _ => {}
        }

        let text = api_response
            .content
            .iter()
            .find(|block| block.kind == "text")
            .map(|block| block.text.as_str())
            .ok_or_else(|| AppError::MalformedOutput("no text content in response".to_string()))?;

        serde_json::from_str(text)
            .map_err(|e| AppError::MalformedOutput(format!("response is not valid JSON: {}", e)))
    }

    fn is_retryable(error: &AppError) -> bool {
        match error {
            AppError::Provider(msg) => {
                msg.contains("429")
                    || msg.contains("Server error")
                    || msg.contains("timed out")
                    || msg.contains("refusal")
                    || msg.contains("HTTP request failed")
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use serial_test::serial;

    fn test_config(url: &str) -> ModelConfig {
        ModelConfig {
            api_url: url.to_string(),
            planner: "planner-model".to_string(),
            fallback: "fallback-model".to_string(),
            timeout_secs: 2,
            retry_delay_ms: 1,
            max_tokens: 1024,
        }
    }

    fn request() -> CompletionRequest {
        CompletionRequest {
            system: "system".to_string(),
            prompt: "prompt".to_string(),
            schema: json!({ "type": "object" }),
        }
    }

    fn success_body(payload: &str) -> String {
        json!({
            "content": [{ "type": "text", "text": payload }],
            "stop_reason": "end_turn"
        })
        .to_string()
    }

    #[test]
    fn complete_returns_parsed_json() {
        let mut server = mockito::Server::new();
        let _m = server
            .mock("POST", "/")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(success_body(r#"{"subject":"S"}"#))
            .create();

        let client = HttpModelClient::new("fake-key".to_string(), &test_config(&server.url())).unwrap();
        let value = client.complete(&request()).unwrap();
        assert_eq!(value["subject"], "S");
    }

    #[test]
    fn complete_retries_once_with_fallback_model_on_500() {
        let mut server = mockito::Server::new();
        let primary = server
            .mock("POST", "/")
            .match_body(mockito::Matcher::PartialJson(json!({ "model": "planner-model" })))
            .with_status(500)
            .expect(1)
            .create();
        let fallback = server
            .mock("POST", "/")
            .match_body(mockito::Matcher::PartialJson(json!({ "model": "fallback-model" })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(success_body(r#"{"ok":true}"#))
            .expect(1)
            .create();

        let client = HttpModelClient::new("fake-key".to_string(), &test_config(&server.url())).unwrap();
        let value = client.complete(&request()).unwrap();
        assert_eq!(value["ok"], true);
        primary.assert();
        fallback.assert();
    }

    #[test]
    fn complete_fails_after_single_retry() {
        let mut server = mockito::Server::new();
        let mock = server.mock("POST", "/").with_status(429).expect(2).create();

        let client = HttpModelClient::new("fake-key".to_string(), &test_config(&server.url())).unwrap();
        let result = client.complete(&request());
        assert!(matches!(result, Err(AppError::Provider(_))));
        mock.assert();
    }

    #[test]
    fn complete_fails_fast_on_400() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/")
            .with_status(400)
            .with_body("Bad Request")
            .expect(1)
            .create();

        let client = HttpModelClient::new("fake-key".to_string(), &test_config(&server.url())).unwrap();
        let result = client.complete(&request());
        assert!(matches!(result, Err(AppError::Provider(_))));
        mock.assert();
    }

    #[test]
    fn non_json_text_is_malformed_output() {
        let mut server = mockito::Server::new();
        let _m = server
            .mock("POST", "/")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(success_body("not json at all"))
            .create();

        let client = HttpModelClient::new("fake-key".to_string(), &test_config(&server.url())).unwrap();
        let result = client.complete(&request());
        assert!(matches!(result, Err(AppError::MalformedOutput(_))));
    }

    #[test]
    fn truncated_response_is_malformed_output() {
        let mut server = mockito::Server::new();
        let _m = server
            .mock("POST", "/")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "content": [{ "type": "text", "text": "{\"partial\":" }],
                    "stop_reason": "max_tokens"
                })
                .to_string(),
            )
            .create();

        let client = HttpModelClient::new("fake-key".to_string(), &test_config(&server.url())).unwrap();
        let result = client.complete(&request());
        assert!(matches!(result, Err(AppError::MalformedOutput(_))));
    }

    #[test]
    #[serial]
    fn from_env_requires_api_key() {
        let previous = std::env::var("ANTHROPIC_API_KEY").ok();
        unsafe { std::env::remove_var("ANTHROPIC_API_KEY") };

        let result = HttpModelClient::from_env(&test_config("http://localhost:1"));
        assert!(matches!(result, Err(AppError::MissingApiKey)));

        if let Some(value) = previous {
            unsafe { std::env::set_var("ANTHROPIC_API_KEY", value) };
        }
    }

    #[test]
    #[serial]
    fn from_env_reads_api_key() {
        let previous = std::env::var("ANTHROPIC_API_KEY").ok();
        unsafe { std::env::set_var("ANTHROPIC_API_KEY", "test-key") };

        let result = HttpModelClient::from_env(&test_config("http://localhost:1"));
        assert!(result.is_ok());

        match previous {
            Some(value) => unsafe { std::env::set_var("ANTHROPIC_API_KEY", value) },
            None => unsafe { std::env::remove_var("ANTHROPIC_API_KEY") },
        }
    }
}
