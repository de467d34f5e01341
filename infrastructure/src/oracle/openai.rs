//! OpenAI-compatible chat completions client.
//!
//! One non-streaming request per summary: a system message carrying the
//! instruction, a user message carrying the question and answers.

use async_trait::async_trait;
use confluence_application::{GenerationRequest, OracleError, TextOracle};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::config::FileOracleConfig;

#[derive(Debug, Serialize, PartialEq)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize, PartialEq)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

/// Chat completions client
#[derive(Clone)]
pub struct OpenAiChatOracle {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: String,
}

impl OpenAiChatOracle {
    pub fn new(
        base_url: &str,
        model: impl Into<String>,
        api_key: impl Into<String>,
        request_timeout: Duration,
    ) -> Result<Self, OracleError> {
        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| OracleError::ConnectionError(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: format!("{}/v1/chat/completions", base_url.trim_end_matches('/')),
            model: model.into(),
            api_key: api_key.into(),
        })
    }

    /// Build from `[oracle]`, reading the key from the configured variable
    pub fn from_config(config: &FileOracleConfig) -> Result<Self, OracleError> {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| OracleError::MissingApiKey(config.api_key_env.clone()))?;

        Self::new(
            &config.base_url,
            &config.model,
            api_key,
            Duration::from_secs(config.request_timeout_seconds),
        )
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn request_body<'a>(&'a self, request: &'a GenerationRequest) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &request.system_instruction,
                },
                ChatMessage {
                    role: "user",
                    content: &request.user_content,
                },
            ],
            max_tokens: request.max_output_tokens,
            temperature: request.temperature,
        }
    }
}

fn parse_response(body: &str) -> Result<String, OracleError> {
    let response: ChatResponse = serde_json::from_str(body)
        .map_err(|e| OracleError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| OracleError::InvalidResponse("Response contained no text".to_string()))
}

fn transport_error(e: reqwest::Error) -> OracleError {
    if e.is_timeout() {
        OracleError::Timeout
    } else {
        OracleError::ConnectionError(e.to_string())
    }
}

#[async_trait]
impl TextOracle for OpenAiChatOracle {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, OracleError> {
        debug!("POST {} (model {})", self.endpoint, self.model);

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&self.request_body(request))
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;

        if !status.is_success() {
            return Err(OracleError::RequestFailed {
                status: status.as_u16(),
                message: body,
            });
        }

        parse_response(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn oracle(base_url: &str) -> OpenAiChatOracle {
        OpenAiChatOracle::new(base_url, "gpt-4", "sk-test", Duration::from_secs(5)).unwrap()
    }

    fn generation_request() -> GenerationRequest {
        GenerationRequest {
            system_instruction: "Summarize.".to_string(),
            user_content: "Question: q".to_string(),
            max_output_tokens: 500,
            temperature: 0.6,
        }
    }

    #[test]
    fn test_endpoint_normalizes_trailing_slash() {
        assert_eq!(
            oracle("https://api.openai.com/").endpoint(),
            "https://api.openai.com/v1/chat/completions"
        );
        assert_eq!(
            oracle("http://localhost:8080").endpoint(),
            "http://localhost:8080/v1/chat/completions"
        );
    }

    #[test]
    fn test_request_body_shape() {
        let oracle = oracle("https://api.openai.com");
        let request = generation_request();

        let body = serde_json::to_value(oracle.request_body(&request)).unwrap();

        assert_eq!(body["model"], "gpt-4");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][0]["content"], "Summarize.");
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["messages"][1]["content"], "Question: q");
        assert_eq!(body["max_tokens"], 500);
        assert!((body["temperature"].as_f64().unwrap() - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_parse_response_takes_first_choice() {
        let body = r#"{
            "id": "chatcmpl-1",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": " Most agree. "}},
                {"index": 1, "message": {"role": "assistant", "content": "ignored"}}
            ]
        }"#;

        assert_eq!(parse_response(body).unwrap(), " Most agree. ");
    }

    #[test]
    fn test_parse_response_without_text() {
        assert!(matches!(
            parse_response(r#"{"choices": []}"#),
            Err(OracleError::InvalidResponse(_))
        ));
        assert!(matches!(
            parse_response(r#"{"choices": [{"message": {"content": null}}]}"#),
            Err(OracleError::InvalidResponse(_))
        ));
        assert!(matches!(
            parse_response("<html>bad gateway</html>"),
            Err(OracleError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_from_config_requires_key() {
        let config = FileOracleConfig {
            api_key_env: "CONFLUENCE_TEST_KEY_THAT_IS_NEVER_SET".to_string(),
            ..FileOracleConfig::default()
        };

        assert!(matches!(
            OpenAiChatOracle::from_config(&config),
            Err(OracleError::MissingApiKey(name)) if name == "CONFLUENCE_TEST_KEY_THAT_IS_NEVER_SET"
        ));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_connection_error() {
        // Port 9 (discard) on localhost is closed on test machines
        let oracle = oracle("http://127.0.0.1:9");

        let err = oracle.generate(&generation_request()).await.unwrap_err();

        assert!(matches!(
            err,
            OracleError::ConnectionError(_) | OracleError::Timeout
        ));
    }
}
