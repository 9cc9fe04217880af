use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;

use crate::error::{ContentError, Result};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Anything that can answer a chat-completion request with text.
///
/// The HTTP client below is the production implementation; tests and
/// embedders can supply their own.
#[async_trait]
pub trait CompletionBackend: Send + Sync + std::fmt::Debug {
    /// Returns the text of the first completion choice.
    async fn complete(&self, request: &ChatCompletionRequest) -> Result<String>;
}

#[derive(Clone)]
pub struct OpenAIClient {
    api_key: String,
    base_url: String,
}

impl std::fmt::Debug for OpenAIClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAIClient")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl OpenAIClient {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issue one chat-completion call. No retries: any failure is returned as is.
    pub async fn chat_completion(&self, body: &Value) -> Result<Value> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|err| ContentError::Config(format!("Failed to build HTTP client: {err}")))?;

        let request_url = build_chat_url(&self.base_url);
        let response = client
            .post(&request_url)
            .bearer_auth(&self.api_key)
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let response_text = response.text().await?;

        if !status.is_success() {
            let api_message = serde_json::from_str::<Value>(&response_text)
                .ok()
                .and_then(|value| {
                    value
                        .get("error")
                        .and_then(|error| error.get("message"))
                        .and_then(Value::as_str)
                        .map(str::to_string)
                })
                .unwrap_or(response_text);

            return Err(ContentError::Status {
                status: status.as_u16(),
                message: api_message,
            });
        }

        let response_json: Value = serde_json::from_str(&response_text)?;

        if let Some(error) = response_json.get("error") {
            let message = error
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| error.to_string());
            return Err(ContentError::Status {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response_json)
    }
}

#[async_trait]
impl CompletionBackend for OpenAIClient {
    async fn complete(&self, request: &ChatCompletionRequest) -> Result<String> {
        debug!(
            target: "trip_muse::http",
            model = request.model(),
            max_tokens = ?request.max_tokens(),
            temperature = ?request.temperature(),
            "sending chat completion"
        );
        let response = self.chat_completion(&request.to_value()).await?;
        first_choice_text(&response)
    }
}

/// Text of `choices[0].message.content`; later choices are ignored.
pub(crate) fn first_choice_text(response: &Value) -> Result<String> {
    response
        .get("choices")
        .and_then(Value::as_array)
        .and_then(|choices| choices.first())
        .and_then(|choice| choice.get("message"))
        .and_then(|message| message.get("content"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or(ContentError::EmptyResponse)
}

fn build_chat_url(base_url: &str) -> String {
    let trimmed = base_url.trim_end_matches('/');
    if trimmed.ends_with("/chat/completions") {
        trimmed.to_string()
    } else {
        format!("{}/chat/completions", trimmed)
    }
}

/// A system instruction plus one user instruction, with fixed sampling settings.
#[derive(Clone, Debug, PartialEq)]
pub struct ChatCompletionRequest {
    model: String,
    messages: Vec<Value>,
    max_tokens: Option<u32>,
    temperature: Option<f64>,
}

impl ChatCompletionRequest {
    pub fn new(model: impl Into<String>, system: &str, user: &str) -> Self {
        Self {
            model: model.into(),
            messages: vec![
                json!({ "role": "system", "content": system }),
                json!({ "role": "user", "content": user }),
            ],
            max_tokens: None,
            temperature: None,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn messages(&self) -> &[Value] {
        &self.messages
    }

    /// The user instruction, i.e. the composed prompt.
    pub fn prompt(&self) -> &str {
        self.messages
            .last()
            .and_then(|message| message.get("content"))
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    pub fn max_tokens(&self) -> Option<u32> {
        self.max_tokens
    }

    pub fn temperature(&self) -> Option<f64> {
        self.temperature
    }

    pub fn to_value(&self) -> Value {
        let mut body = json!({
            "model": self.model,
            "messages": self.messages,
        });

        if let Some(max_tokens) = self.max_tokens {
            body["max_tokens"] = json!(max_tokens);
        }

        if let Some(temperature) = self.temperature {
            body["temperature"] = json!(temperature);
        }

        body
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_url_is_appended_once() {
        assert_eq!(
            build_chat_url("https://api.openai.com/v1/"),
            "https://api.openai.com/v1/chat/completions"
        );
        assert_eq!(
            build_chat_url("http://localhost:1234/chat/completions"),
            "http://localhost:1234/chat/completions"
        );
    }

    #[test]
    fn request_body_carries_sampling_settings() {
        let body = ChatCompletionRequest::new("gpt-4o-mini", "system text", "user text")
            .with_max_tokens(250)
            .with_temperature(0.5)
            .to_value();

        assert_eq!(body["model"], "gpt-4o-mini");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["content"], "user text");
        assert_eq!(body["max_tokens"], 250);
        assert_eq!(body["temperature"], 0.5);
    }

    #[test]
    fn only_the_first_choice_is_used() {
        let response = json!({
            "choices": [
                { "message": { "role": "assistant", "content": "first" } },
                { "message": { "role": "assistant", "content": "second" } }
            ]
        });
        assert_eq!(first_choice_text(&response).unwrap(), "first");
    }

    #[test]
    fn missing_choices_is_an_empty_response() {
        let err = first_choice_text(&json!({ "choices": [] })).unwrap_err();
        assert!(matches!(err, ContentError::EmptyResponse));
    }

    #[test]
    fn debug_output_hides_the_key() {
        let client = OpenAIClient::new("sk-secret".to_string());
        assert!(!format!("{client:?}").contains("sk-secret"));
    }
}
