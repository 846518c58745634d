use crate::core::PipelineError;
use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Groq serves an OpenAI-compatible chat completions API.
pub const GROQ_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";

/// One summarization request. The credential is a [`SecretString`] so it
/// stays out of Debug output and log lines.
#[derive(Debug)]
pub struct SummaryRequest {
    pub text: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub api_key: SecretString,
}

#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, request: &SummaryRequest) -> Result<String, PipelineError>;
}

/// Summarizes text with a single Groq completion call.
///
/// Uses the "stuff" strategy: the whole prepared text is embedded in one
/// prompt. No chunking, no refinement passes, no retries.
pub struct GroqSummarizer {
    client: reqwest::Client,
    endpoint: String,
}

impl GroqSummarizer {
    pub fn new(timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            endpoint: GROQ_API_URL.to_string(),
        }
    }

    /// Points the client at a different endpoint (proxies, compatible
    /// providers).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

fn stuff_prompt(text: &str) -> String {
    format!(
        "Write a concise summary of the following:\n\n\"{}\"\n\nCONCISE SUMMARY:",
        text
    )
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    max_tokens: u32,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: AssistantMessage,
}

#[derive(Debug, Deserialize)]
struct AssistantMessage {
    content: String,
}

#[async_trait]
impl Summarizer for GroqSummarizer {
    async fn summarize(&self, request: &SummaryRequest) -> Result<String, PipelineError> {
        let prompt = stuff_prompt(&request.text);
        let body = ChatRequest {
            model: &request.model,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
            messages: vec![ChatMessage {
                role: "user",
                content: &prompt,
            }],
        };

        tracing::debug!(
            "Requesting completion from {} (model {}, {} prompt chars)",
            self.endpoint,
            request.model,
            prompt.len()
        );

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(request.api_key.expose_secret().trim())
            .json(&body)
            .send()
            .await
            .map_err(|e| PipelineError::Summarization(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response
                .text()
                .await
                .unwrap_or_else(|_| "<body unavailable>".to_string());
            return Err(PipelineError::Summarization(format!(
                "provider returned {}: {}",
                status, text
            )));
        }

        let parsed: ChatResponse = response.json().await.map_err(|e| {
            PipelineError::Summarization(format!("failed to parse provider response: {}", e))
        })?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| {
                PipelineError::Summarization("provider response contained no choices".to_string())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stuff_prompt_embeds_full_text() {
        let prompt = stuff_prompt("some article text");
        assert!(prompt.contains("\"some article text\""));
        assert!(prompt.ends_with("CONCISE SUMMARY:"));
    }

    #[test]
    fn test_chat_request_serialization() {
        let body = ChatRequest {
            model: "llama3-8b-8192",
            temperature: 0.3,
            max_tokens: 512,
            messages: vec![ChatMessage {
                role: "user",
                content: "hello",
            }],
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "llama3-8b-8192");
        assert_eq!(json["max_tokens"], 512);
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "hello");
    }

    #[test]
    fn test_chat_response_parsing() {
        let raw = r#"{"choices": [{"message": {"role": "assistant", "content": "a summary"}}]}"#;
        let parsed: ChatResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.choices[0].message.content, "a summary");
    }

    #[test]
    fn test_request_debug_redacts_key() {
        let request = SummaryRequest {
            text: "t".to_string(),
            model: "m".to_string(),
            temperature: 0.0,
            max_tokens: 100,
            api_key: SecretString::from("gsk_very_secret".to_string()),
        };
        let rendered = format!("{:?}", request);
        assert!(!rendered.contains("gsk_very_secret"));
    }
}
