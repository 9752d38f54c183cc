//! Result of a sync pass and the internal error classification behind it.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::remote::RemoteError;

pub const THROTTLED_MESSAGE: &str = "Sync throttled";

/// What a public sync operation did.
///
/// Expected failures (network, storage, missing sign-in) are reported as
/// [`SyncOutcome::Error`]; callers never need to handle a raised error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The pass finished; carries the recorded sync time
    Success(DateTime<Utc>),
    Error(String),
    /// Nothing was attempted
    Skipped(String),
}

impl SyncOutcome {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    #[must_use]
    pub const fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped(_))
    }
}

impl std::fmt::Display for SyncOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success(at) => write!(f, "Synced at {}", at.to_rfc3339()),
            Self::Error(message) => write!(f, "Sync failed: {message}"),
            Self::Skipped(reason) => write!(f, "Sync skipped: {reason}"),
        }
    }
}

/// Why a pass stopped early. Never leaves the orchestrator.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("User not authenticated")]
    NotAuthenticated,

    #[error("{step} failed: {source}")]
    Remote {
        step: String,
        #[source]
        source: RemoteError,
    },

    #[error("{step} failed: {source}")]
    Local {
        step: String,
        #[source]
        source: crate::Error,
    },
}

impl SyncError {
    pub fn remote(step: impl Into<String>) -> impl FnOnce(RemoteError) -> Self {
        let step = step.into();
        move |source| Self::Remote { step, source }
    }

    pub fn local(step: impl Into<String>) -> impl FnOnce(crate::Error) -> Self {
        let step = step.into();
        move |source| Self::Local { step, source }
    }
}

pub type SyncResult<T> = Result<T, SyncError>;

impl From<SyncResult<DateTime<Utc>>> for SyncOutcome {
    fn from(result: SyncResult<DateTime<Utc>>) -> Self {
        match result {
            Ok(at) => Self::Success(at),
            Err(error) => Self::Error(error.to_string()),
        }
    }
}
