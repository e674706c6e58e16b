//! Error types for the widget runtime and its remote fetch.

use serde_json::{json, Value};
use thiserror::Error;

use crate::Payload;

/// Why a remote fetch resolved with its error action.
#[derive(Error, Debug)]
pub enum FetchError {
    /// A declared path parameter was not present in the action payload.
    #[error("missing path parameter '{name}'")]
    MissingPathParam { name: String },

    /// The instance URL and request target could not be joined.
    #[error("invalid request url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The request never produced a response.
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("request failed with status {status}")]
    Status { status: u16, body: String },

    /// The response body was not valid JSON.
    #[error("failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// Rejection reported by a custom transport.
    #[error("{0}")]
    Rejected(String),
}

impl FetchError {
    pub fn missing_path_param(name: impl Into<String>) -> Self {
        Self::MissingPathParam { name: name.into() }
    }

    pub fn rejected(reason: impl Into<String>) -> Self {
        Self::Rejected(reason.into())
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(err) => err.status().map(|status| status.as_u16()),
            _ => None,
        }
    }

    /// Payload carried by the fetch error action.
    pub fn to_payload(&self) -> Payload {
        let mut payload = Payload::new();
        payload.insert("message".to_string(), Value::String(self.to_string()));
        if let Some(status) = self.status() {
            payload.insert("status".to_string(), json!(status));
        }
        if let Self::Status { body, .. } = self {
            if !body.is_empty() {
                payload.insert("body".to_string(), Value::String(body.clone()));
            }
        }
        payload
    }
}

/// Top-level error for setting up and running the widget.
#[derive(Error, Debug)]
pub enum WidgetError {
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

impl WidgetError {
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, WidgetError>;
