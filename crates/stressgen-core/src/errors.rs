//! Structured error types shared across stressgen crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`GenError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (sizes, requested edge counts, etc.).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Optional hint that may help the caller resolve the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a new error payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Adds a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.context.insert(key.into(), value.to_string());
        self
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Canonical error type for the generators.
///
/// Every failure is raised before any partial structure is built, so callers
/// never observe a half-populated instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum GenError {
    /// The vertex count is below what the requested topology needs.
    #[error("invalid size: {0}")]
    InvalidSize(ErrorInfo),
    /// More distinct items were requested than the source domain holds.
    #[error("insufficient domain: {0}")]
    InsufficientDomain(ErrorInfo),
    /// The edge count contradicts the requested structural flags.
    #[error("invalid parameters: {0}")]
    InvalidParameters(ErrorInfo),
    /// Text, JSON or binary payloads could not be produced or parsed.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            write!(f, " | context: [")?;
            for (idx, (key, value)) in self.context.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            write!(f, "]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " | hint: {hint}")?;
        }
        Ok(())
    }
}

impl GenError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            GenError::InvalidSize(info)
            | GenError::InsufficientDomain(info)
            | GenError::InvalidParameters(info)
            | GenError::Serde(info) => info,
        }
    }

    /// Returns the stable error code of the payload.
    pub fn code(&self) -> &str {
        &self.info().code
    }

    /// Shorthand for an [`GenError::InvalidSize`] error.
    pub fn invalid_size(code: impl Into<String>, message: impl Into<String>) -> Self {
        GenError::InvalidSize(ErrorInfo::new(code, message))
    }

    /// Shorthand for an [`GenError::InsufficientDomain`] error.
    pub fn insufficient_domain(code: impl Into<String>, message: impl Into<String>) -> Self {
        GenError::InsufficientDomain(ErrorInfo::new(code, message))
    }

    /// Shorthand for an [`GenError::InvalidParameters`] error.
    pub fn invalid_parameters(code: impl Into<String>, message: impl Into<String>) -> Self {
        GenError::InvalidParameters(ErrorInfo::new(code, message))
    }

    /// Shorthand for a [`GenError::Serde`] error.
    pub fn serde(code: impl Into<String>, message: impl Into<String>) -> Self {
        GenError::Serde(ErrorInfo::new(code, message))
    }

    /// Adds a context entry to the payload, keeping the error family.
    pub fn with_context(self, key: impl Into<String>, value: impl ToString) -> Self {
        self.map_info(|info| info.with_context(key, value))
    }

    /// Attaches a remediation hint, keeping the error family.
    pub fn with_hint(self, hint: impl Into<String>) -> Self {
        self.map_info(|info| info.with_hint(hint))
    }

    fn map_info(self, f: impl FnOnce(ErrorInfo) -> ErrorInfo) -> Self {
        match self {
            GenError::InvalidSize(info) => GenError::InvalidSize(f(info)),
            GenError::InsufficientDomain(info) => GenError::InsufficientDomain(f(info)),
            GenError::InvalidParameters(info) => GenError::InvalidParameters(f(info)),
            GenError::Serde(info) => GenError::Serde(f(info)),
        }
    }
}
