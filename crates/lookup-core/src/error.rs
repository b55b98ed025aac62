//! Lookup errors.

use crate::kind::LookupKind;
use thiserror::Error;

/// Message returned for every failure that must not leak internal detail.
pub const INTERNAL_ERROR_MESSAGE: &str = "An internal server error occurred.";

/// Error category of a failed lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Input rejected before any network call.
    InvalidInput,
    /// Outbound call failed at the network level.
    TransportFailure,
    /// Provider body could not be parsed.
    UpstreamInvalid,
    /// Provider signaled a business error, through status or body.
    UpstreamReported,
    /// Anything unanticipated.
    Internal,
}

/// Failure half of a canonical lookup result.
///
/// `Display` renders exactly the message shown to callers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("{message}")]
    UpstreamInvalid {
        /// Upstream status when it was not a success, `None` for a 2xx.
        status: Option<u16>,
        message: String,
    },

    #[error("{message}")]
    UpstreamReported {
        /// Status to report to HTTP callers.
        status: u16,
        message: String,
    },

    #[error("An internal server error occurred.")]
    Internal,
}

impl LookupError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn reported(status: u16, message: impl Into<String>) -> Self {
        Self::UpstreamReported {
            status,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput(_) => ErrorKind::InvalidInput,
            Self::UpstreamInvalid { .. } => ErrorKind::UpstreamInvalid,
            Self::UpstreamReported { .. } => ErrorKind::UpstreamReported,
            Self::Internal => ErrorKind::Internal,
        }
    }

    /// The caller-facing message.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

/// Network-level failure of a single outbound GET.
///
/// Never shown to callers; the normalizer turns it into [`LookupError::Internal`].
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl TransportError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::TransportFailure
    }
}

/// Provider table misconfiguration, detected at startup.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("URL template for {kind} has no {{input}} slot: {template}")]
    MissingSlot { kind: LookupKind, template: String },
}

/// Unrecognized lookup kind slug.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown lookup kind: {0}")]
pub struct UnknownKind(pub String);
