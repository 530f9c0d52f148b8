//! # Structured Error Handling
//!
//! Tagged error taxonomy for the cluster conductor. Every failure surfaced by
//! [`crate::cluster::Cluster::process_cluster_request`] is one of these variants,
//! so callers can tell a context-switch failure apart from a handler failure or
//! an unrecognized request type.

use std::time::Duration;

/// Errors surfaced by the cluster registry and dispatch engine.
#[derive(Debug, thiserror::Error)]
pub enum ConductorError {
    /// A sub-step of context switching failed. The active configuration is left
    /// in an unspecified state; the request was never dispatched.
    #[error("failed to switch context to [{config_path}]: {source}")]
    ConfigSwitch {
        config_path: String,
        source: anyhow::Error,
    },

    /// No request processor is registered for the request's runtime type.
    #[error("no request processor registered for request type [{kind}]")]
    DispatchMiss { kind: String },

    /// A dispatched request processor failed. Carries the wrap site and a
    /// field-by-field rendering of the offending request for operator logs.
    #[error("request processor [{kind}] failed at {location}: {source}\nrequest: {request_dump}")]
    Handler {
        kind: String,
        location: String,
        request_dump: String,
        source: anyhow::Error,
    },

    /// Retry sentinel: no attempt succeeded within the window.
    #[error("operation did not succeed within {waited:?}")]
    Timeout { waited: Duration },

    /// Invalid environment configuration.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl ConductorError {
    /// Wrap a failed context-switch sub-step.
    pub fn config_switch(config_path: impl Into<String>, source: anyhow::Error) -> Self {
        ConductorError::ConfigSwitch {
            config_path: config_path.into(),
            source,
        }
    }

    /// Wrap a failed request processor, recording the wrap site.
    #[track_caller]
    pub fn handler(kind: &str, request_dump: String, source: anyhow::Error) -> Self {
        let location = std::panic::Location::caller();
        ConductorError::Handler {
            kind: kind.to_string(),
            location: format!("{}:{}", location.file(), location.line()),
            request_dump,
            source,
        }
    }

    /// True for the retry-timeout sentinel.
    pub fn is_timeout(&self) -> bool {
        matches!(self, ConductorError::Timeout { .. })
    }
}

pub type Result<T> = std::result::Result<T, ConductorError>;
