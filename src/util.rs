use rmcp::schemars;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Rendering requested by a tool caller
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Markdown,
    Json,
}

/// Tool response that can be rendered as Markdown or JSON
pub trait ToolOutput: Serialize {
    fn to_markdown(&self) -> String;

    /// Convert to JSON string for MCP response
    fn to_json(&self) -> String {
        serde_json::to_string(self)
            .unwrap_or_else(|_| r#"{"error":"Failed to serialize response"}"#.to_string())
    }

    fn render(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Markdown => self.to_markdown(),
            OutputFormat::Json => self.to_json(),
        }
    }
}

/// Error output shared by every tool
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ErrorOutput {
    pub error: String,
}

impl ErrorOutput {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

impl ToolOutput for ErrorOutput {
    fn to_markdown(&self) -> String {
        format!("Error: {}", self.error)
    }
}

/// Format bytes into human-readable string
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    if bytes == 0 {
        return "0 B".to_string();
    }

    let base = 1024_f64;
    let exponent = ((bytes as f64).ln() / base.ln()).floor() as usize;
    let exponent = exponent.min(UNITS.len() - 1);

    let size = bytes as f64 / base.powi(exponent as i32);

    if size.fract() == 0.0 {
        format!("{size:.0} {}", UNITS[exponent])
    } else {
        format!("{size:.2} {}", UNITS[exponent])
    }
}
