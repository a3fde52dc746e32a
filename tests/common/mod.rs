use std::path::Path;

use assert_cmd::Command;
use assert_fs::TempDir;

/// Isolated working directory plus a preconfigured CLI invocation.
pub struct TestContext {
    dir: TempDir,
}

impl TestContext {
    pub fn new() -> Self {
        Self { dir: TempDir::new().unwrap() }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// CLI command running inside the temp workspace with a fake API key.
    pub fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("mailforge").unwrap();
        cmd.current_dir(self.dir.path());
        cmd.env("ANTHROPIC_API_KEY", "test-key");
        cmd
    }

    /// Same, but with no API key in the child environment.
    pub fn cli_without_key(&self) -> Command {
        let mut cmd = Command::cargo_bin("mailforge").unwrap();
        cmd.current_dir(self.dir.path());
        cmd.env_remove("ANTHROPIC_API_KEY");
        cmd
    }

    /// Point the workspace's `mailforge.toml` at a mock model endpoint.
    pub fn write_config(&self, api_url: &str) {
        let content = format!(
            r#"[model]
api_url = "{}"
planner = "planner-model"
fallback = "fallback-model"
timeout_secs = 5
retry_delay_ms = 1
"#,
            api_url
        );
        std::fs::write(self.dir.path().join("mailforge.toml"), content).unwrap();
    }
}

/// Wrap a plan payload in the model API's response envelope.
pub fn model_response(payload: &serde_json::Value) -> String {
    serde_json::json!({
        "content": [{ "type": "text", "text": payload.to_string() }],
        "stop_reason": "end_turn"
    })
    .to_string()
}
