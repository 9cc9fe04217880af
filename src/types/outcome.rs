use std::{fmt, ops::Deref};

use serde::{Deserialize, Serialize};

/// Why a fallback value was returned instead of remote content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FallbackReason {
    /// No API key was configured, so no call was made.
    MissingCredential,
    /// Connection-level failure.
    Transport,
    /// The endpoint answered with a non-success status.
    Status,
    /// The configured timeout expired.
    Timeout,
    /// The completion carried no text.
    EmptyResponse,
    /// The text could not be decoded into the expected structure.
    Decode,
    /// The structure decoded but its fields did not match the record.
    ShapeMismatch,
}

impl FallbackReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            FallbackReason::MissingCredential => "missing-credential",
            FallbackReason::Transport => "transport",
            FallbackReason::Status => "status",
            FallbackReason::Timeout => "timeout",
            FallbackReason::EmptyResponse => "empty-response",
            FallbackReason::Decode => "decode",
            FallbackReason::ShapeMismatch => "shape-mismatch",
        }
    }
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", content = "reason", rename_all = "kebab-case")]
pub enum ContentOrigin {
    Remote,
    Fallback(FallbackReason),
}

/// A generated value together with where it came from.
///
/// The value always has the documented shape for its kind, so most callers
/// can ignore `origin` and use the value through `Deref` or [`into_inner`].
///
/// [`into_inner`]: Generated::into_inner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Generated<T> {
    pub value: T,
    pub origin: ContentOrigin,
}

impl<T> Generated<T> {
    pub fn remote(value: T) -> Self {
        Self {
            value,
            origin: ContentOrigin::Remote,
        }
    }

    pub fn fallback(value: T, reason: FallbackReason) -> Self {
        Self {
            value,
            origin: ContentOrigin::Fallback(reason),
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self.origin, ContentOrigin::Fallback(_))
    }

    pub fn fallback_reason(&self) -> Option<FallbackReason> {
        match self.origin {
            ContentOrigin::Fallback(reason) => Some(reason),
            ContentOrigin::Remote => None,
        }
    }

    pub fn into_inner(self) -> T {
        self.value
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Generated<U> {
        Generated {
            value: f(self.value),
            origin: self.origin,
        }
    }
}

impl<T> Deref for Generated<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.value
    }
}
