use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ReportError, ReportResult};

#[derive(Debug, Clone)]
pub struct LlmClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
}

// OpenAI-compatible chat completions format (used by DeepSeek)
#[derive(Debug, Clone, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Clone, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Debug, Clone, Deserialize)]
struct ChatCompletionResponse {
    choices: Option<Vec<ChatChoice>>,
    usage: Option<ChatUsage>,
}

#[derive(Debug, Clone, Deserialize)]
struct ChatChoice {
    message: Option<ChatChoiceMessage>,
}

#[derive(Debug, Clone, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct ChatUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[derive(Debug, Clone)]
pub struct LlmResponse {
    pub text: String,
    pub input_tokens: u32,
    pub output_tokens: u32,
}

impl LlmClient {
    pub fn new(
        api_key: &str,
        base_url: &str,
        model: &str,
        temperature: f32,
        timeout: Duration,
    ) -> ReportResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ReportError::Transport(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key: api_key.to_string(),
            base_url: base_url.to_string(),
            model: model.to_string(),
            temperature,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Sends `prompt` as a single user message. One request, no retries.
    pub async fn complete(&self, prompt: &str) -> ReportResult<LlmResponse> {
        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            temperature: self.temperature,
        };

        let response = self
            .client
            .post(&self.base_url)
            .header("Authorization", format!("Bearer {}", &self.api_key))
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| ReportError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ReportError::ProviderFailure {
                status: status.as_u16(),
                body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ReportError::Transport(e.to_string()))?;
        let parsed = parse_completion(&body)?;
        debug!(
            input_tokens = parsed.input_tokens,
            output_tokens = parsed.output_tokens,
            "LLM completion received"
        );
        Ok(parsed)
    }
}

fn parse_completion(body: &str) -> ReportResult<LlmResponse> {
    let api_response: ChatCompletionResponse = serde_json::from_str(body)
        .map_err(|e| ReportError::malformed(format!("invalid JSON body: {}", e)))?;

    let text = api_response
        .choices
        .as_deref()
        .and_then(|choices| choices.first())
        .ok_or_else(|| ReportError::malformed("response has no choices"))?
        .message
        .as_ref()
        .and_then(|m| m.content.clone())
        .ok_or_else(|| ReportError::malformed("first choice has no message content"))?;

    let (input_tokens, output_tokens) = api_response
        .usage
        .map(|u| (u.prompt_tokens, u.completion_tokens))
        .unwrap_or((0, 0));

    Ok(LlmResponse {
        text,
        input_tokens,
        output_tokens,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_single_user_message() {
        let request = ChatCompletionRequest {
            model: "deepseek-chat".into(),
            messages: vec![ChatMessage {
                role: "user".into(),
                content: "hello".into(),
            }],
            temperature: 0.3,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "deepseek-chat");
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "hello");
        assert!((json["temperature"].as_f64().unwrap() - 0.3).abs() < 1e-6);
    }

    #[test]
    fn parses_first_choice_and_usage() {
        let body = r#"{
            "choices": [
                {"message": {"role": "assistant", "content": "**Acme Report**"}},
                {"message": {"role": "assistant", "content": "ignored"}}
            ],
            "usage": {"prompt_tokens": 120, "completion_tokens": 40}
        }"#;
        let response = parse_completion(body).unwrap();
        assert_eq!(response.text, "**Acme Report**");
        assert_eq!(response.input_tokens, 120);
        assert_eq!(response.output_tokens, 40);
    }

    #[test]
    fn missing_usage_is_not_fatal() {
        let response = parse_completion(r#"{"choices":[{"message":{"content":"ok"}}]}"#).unwrap();
        assert_eq!(response.text, "ok");
        assert_eq!(response.input_tokens, 0);
    }

    #[test]
    fn unexpected_shapes_are_malformed() {
        for body in [
            r#"{"choices": []}"#,
            r#"{}"#,
            r#"{"choices":[{}]}"#,
            r#"{"choices":[{"message":{"role":"assistant"}}]}"#,
            "not json",
        ] {
            let err = parse_completion(body).unwrap_err();
            assert!(
                matches!(err, ReportError::MalformedResponse(_)),
                "expected malformed for {body}, got {err:?}"
            );
        }
    }
}
