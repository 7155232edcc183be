//! Core types and error definitions for the Crewdesk admin console.
//!
//! This crate provides the foundational types shared across all Crewdesk
//! crates: error handling, login credentials, the opaque record shape used
//! for server-defined entities, and the token seam the HTTP client reads
//! through.
//!
//! # Main types
//!
//! - [`CrewdeskError`] — Unified error enum for all Crewdesk subsystems.
//! - [`CrewdeskResult`] — Convenience alias for `Result<T, CrewdeskError>`.
//! - [`Credentials`] — Transient login credentials, never persisted.
//! - [`Record`] — An entity record as an opaque field-name/value mapping.
//! - [`TokenSource`] — Read-only access to the current session token.

use serde::Serialize;

// --- Error types ---

/// Top-level error type for the Crewdesk console.
///
/// Failures that originate at the API boundary keep their normalized
/// human-readable message as the `Display` output, with the structured kind
/// available for callers that need to branch (e.g. on an expired token).
#[derive(Debug, thiserror::Error)]
pub enum CrewdeskError {
    /// The request never reached the server or no response was received.
    #[error("{0}")]
    Network(String),

    /// A non-success response from the server, message surfaced verbatim.
    #[error("{message}")]
    Server {
        /// HTTP status code of the response.
        status: u16,
        /// Server-provided message, or the generic fallback.
        message: String,
    },

    /// Transport succeeded but the response violated the API contract.
    #[error("{0}")]
    Contract(String),

    /// A form field failed local validation before any network call.
    #[error("{field}: {message}")]
    Validation {
        /// Name of the offending field.
        field: String,
        /// What was wrong with it.
        message: String,
    },

    /// An error related to session persistence or lookup.
    #[error("Session error: {0}")]
    Session(String),

    /// An error in configuration parsing or validation.
    #[error("Config error: {0}")]
    Config(String),

    /// A JSON serialization or deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CrewdeskError {
    /// True when the server rejected the request as unauthenticated.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, CrewdeskError::Server { status: 401, .. })
    }
}

/// A convenience `Result` alias using [`CrewdeskError`].
pub type CrewdeskResult<T> = Result<T, CrewdeskError>;

// --- Shared types ---

/// Login credentials. Held only for the duration of a login call.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    /// Account email address.
    pub email: String,
    /// Account password.
    pub password: String,
}

impl Credentials {
    /// Creates credentials from email and password.
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// An entity record as the server defines it: an opaque mapping from field
/// name to JSON value. Records pass through the gateways unmodified apart
/// from the declared field coercions.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// Read-only access to the current session token.
///
/// The HTTP client consults this before every outbound request. The session
/// manager is the only writer behind it; everything else reads.
pub trait TokenSource: Send + Sync {
    /// The current bearer token, if a session is active.
    fn token(&self) -> Option<String>;
}
