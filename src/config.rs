use std::{fmt, time::Duration};

use crate::{
    error::{ContentError, Result},
    schemas::ShapeValidation,
    services::openai_client::DEFAULT_BASE_URL,
};

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Settings injected into a [`TripContentGenerator`] at construction.
///
/// Without an API key the generator never touches the network and serves
/// fallback content for every kind.
///
/// [`TripContentGenerator`]: crate::TripContentGenerator
#[derive(Clone)]
pub struct GeneratorConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    /// Upper bound for one completion call; `None` leaves it to the transport.
    pub timeout: Option<Duration>,
    pub shape_validation: ShapeValidation,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: None,
            shape_validation: ShapeValidation::default(),
        }
    }
}

impl fmt::Debug for GeneratorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneratorConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .field("shape_validation", &self.shape_validation)
            .finish()
    }
}

impl GeneratorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Blank keys count as absent.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        let api_key = api_key.into();
        self.api_key = (!api_key.trim().is_empty()).then_some(api_key);
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
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
        self.api_key
            .as_deref()
            .is_some_and(|api_key| !api_key.trim().is_empty())
    }

    /// Read the process environment once.
    ///
    /// | variable | meaning |
    /// |---|---|
    /// | `OPENAI_API_KEY` | API key; unset or blank disables remote calls |
    /// | `OPENAI_BASE_URL` | endpoint root, default `https://api.openai.com/v1` |
    /// | `TRIP_MUSE_MODEL` | model identifier |
    /// | `TRIP_MUSE_TIMEOUT_SECS` | per-call timeout in seconds |
    /// | `TRIP_MUSE_SHAPE_VALIDATION` | `strict` (default) or `lenient` |
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Like [`from_env`](Self::from_env) but with a caller-supplied lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(api_key) = lookup("OPENAI_API_KEY") {
            config = config.with_api_key(api_key);
        }
        if let Some(base_url) = lookup("OPENAI_BASE_URL").filter(|v| !v.trim().is_empty()) {
            config.base_url = base_url;
        }
        if let Some(model) = lookup("TRIP_MUSE_MODEL").filter(|v| !v.trim().is_empty()) {
            config.model = model;
        }
        if let Some(raw) = lookup("TRIP_MUSE_TIMEOUT_SECS") {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                ContentError::Config(format!(
                    "TRIP_MUSE_TIMEOUT_SECS must be a whole number of seconds, got `{raw}`"
                ))
            })?;
            config.timeout = (secs > 0).then(|| Duration::from_secs(secs));
        }
        if let Some(raw) = lookup("TRIP_MUSE_SHAPE_VALIDATION") {
            config.shape_validation = raw.parse().map_err(ContentError::Config)?;
        }

        Ok(config)
    }
}
