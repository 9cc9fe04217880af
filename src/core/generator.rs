use crate::{
    config::GeneratorConfig,
    error::{ContentError, Result},
    schemas::{ContentSchema, ShapeValidation},
    services::{
        openai_client::{ChatCompletionRequest, CompletionBackend, OpenAIClient},
        prompts::SYSTEM_PROMPT,
    },
    types::{decode_structured, split_content_lines, ContentKind, Generated},
};
use std::{sync::Arc, time::Duration};
use tokio::time::timeout;
use tracing::{debug, warn};

/// Produces travel content for every [`ContentKind`], falling back to local
/// templates whenever the remote model cannot be used.
///
/// Cheap to clone; clones share the backend. Dropping a returned future
/// cancels its request.
#[derive(Clone, Debug)]
pub struct TripContentGenerator {
    backend: Option<Arc<dyn CompletionBackend>>,
    model: String,
    timeout: Option<Duration>,
    shape_validation: ShapeValidation,
}

impl TripContentGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        let base_url = config.base_url;
        let backend = config
            .api_key
            .filter(|api_key| !api_key.trim().is_empty())
            .map(|api_key| {
                Arc::new(OpenAIClient::new(api_key).with_base_url(base_url))
                    as Arc<dyn CompletionBackend>
            });

        Self {
            backend,
            model: config.model,
            timeout: config.timeout,
            shape_validation: config.shape_validation,
        }
    }

    /// A generator with no credential; every call returns fallback content.
    pub fn offline() -> Self {
        Self::new(GeneratorConfig::default())
    }

    pub fn from_env() -> Result<Self> {
        Ok(Self::new(GeneratorConfig::from_env()?))
    }

    /// Replace the HTTP client with another backend.
    pub fn with_backend(mut self, backend: Arc<dyn CompletionBackend>) -> Self {
        self.backend = Some(backend);
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_shape_validation(mut self, shape_validation: ShapeValidation) -> Self {
        self.shape_validation = shape_validation;
        self
    }

    pub fn has_credential(&self) -> bool {
        self.backend.is_some()
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn shape_validation(&self) -> ShapeValidation {
        self.shape_validation
    }

    async fn request_text(
        &self,
        backend: &dyn CompletionBackend,
        kind: ContentKind,
        prompt: String,
    ) -> Result<String> {
        let profile = kind.profile();
        let request = ChatCompletionRequest::new(self.model.as_str(), SYSTEM_PROMPT, &prompt)
            .with_max_tokens(profile.max_tokens)
            .with_temperature(profile.temperature);

        let call = backend.complete(&request);
        let text = match self.timeout {
            Some(limit) => timeout(limit, call)
                .await
                .map_err(|_| ContentError::Timeout(limit))??,
            None => call.await?,
        };

        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(ContentError::EmptyResponse);
        }
        Ok(trimmed.to_string())
    }

    /// Prompt, call, decode; on any error serve `fallback` instead.
    ///
    /// The prompt is only composed when a backend is configured.
    async fn produce<T>(
        &self,
        kind: ContentKind,
        prompt: impl FnOnce() -> String,
        decode: impl FnOnce(String) -> Result<T>,
        fallback: impl FnOnce() -> T,
    ) -> Generated<T> {
        let outcome = match &self.backend {
            Some(backend) => self
                .request_text(backend.as_ref(), kind, prompt())
                .await
                .and_then(decode),
            None => Err(ContentError::Config("no API key configured".to_string())),
        };

        match outcome {
            Ok(value) => Generated::remote(value),
            Err(err) => {
                log_fallback(kind, &err);
                Generated::fallback(fallback(), err.fallback_reason())
            }
        }
    }

    pub(crate) async fn generate_text(
        &self,
        kind: ContentKind,
        prompt: impl FnOnce() -> String,
        fallback: impl FnOnce() -> String,
    ) -> Generated<String> {
        self.produce(kind, prompt, Ok, fallback).await
    }

    pub(crate) async fn generate_lines(
        &self,
        kind: ContentKind,
        prompt: impl FnOnce() -> String,
        fallback: impl FnOnce() -> Vec<String>,
    ) -> Generated<Vec<String>> {
        let decode = |text: String| {
            let items = split_content_lines(&text);
            if items.is_empty() {
                Err(ContentError::EmptyResponse)
            } else {
                Ok(items)
            }
        };
        self.produce(kind, prompt, decode, fallback).await
    }

    pub(crate) async fn generate_structured<T: ContentSchema>(
        &self,
        kind: ContentKind,
        prompt: impl FnOnce() -> String,
        fallback: impl FnOnce() -> T,
    ) -> Generated<T> {
        let mode = self.shape_validation;
        let decode = |text: String| {
            decode_structured::<T>(&text, mode).map_err(|err| {
                debug!(
                    target: "trip_muse::schema",
                    schema = T::schema().schema_name(),
                    mode = %mode,
                    error = %err,
                    payload = %text
                );
                err
            })
        };
        self.produce(kind, prompt, decode, fallback).await
    }
}

fn log_fallback(kind: ContentKind, err: &ContentError) {
    match err {
        ContentError::Config(_) => debug!(
            target: "trip_muse::fallback",
            kind = %kind,
            "no API key configured, serving fallback"
        ),
        _ => warn!(
            target: "trip_muse::fallback",
            kind = %kind,
            reason = %err.fallback_reason(),
            code = err.error_code(),
            error = %err,
            "remote generation failed, serving fallback"
        ),
    }
}
