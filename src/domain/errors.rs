//! Domain Errors

use crate::domain::value_objects::ProviderSource;
use thiserror::Error;

/// Errors raised while resolving a postal code.
///
/// `Timeout`, `Http`, `NotFound`, `Transport` and `Decode` are adapter-level
/// and are retried by the resolver. Callers of the resolver only ever see
/// `InvalidFormat` or `ResolutionFailed`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LookupError {
    /// Input does not contain exactly eight digits
    #[error("CEP deve conter 8 dígitos: {0:?}")]
    InvalidFormat(String),

    /// Provider exceeded its time budget
    #[error("{provider}: timeout after {timeout_ms}ms")]
    Timeout {
        provider: ProviderSource,
        timeout_ms: u64,
    },

    /// Provider answered with a non-success status
    #[error("{provider}: HTTP {status}")]
    Http { provider: ProviderSource, status: u16 },

    /// Provider explicitly reported that the CEP does not exist
    #[error("{provider}: CEP não encontrado")]
    NotFound { provider: ProviderSource },

    /// Connection-level failure
    #[error("{provider}: {message}")]
    Transport {
        provider: ProviderSource,
        message: String,
    },

    /// Response body was not valid JSON
    #[error("{provider}: invalid response body: {message}")]
    Decode {
        provider: ProviderSource,
        message: String,
    },

    /// Every provider and every retry failed
    #[error("Não foi possível consultar o CEP {cep}. {last_error}")]
    ResolutionFailed { cep: String, last_error: String },
}

impl LookupError {
    /// Provider that produced this error, if adapter-level.
    pub fn provider(&self) -> Option<ProviderSource> {
        match self {
            Self::Timeout { provider, .. }
            | Self::Http { provider, .. }
            | Self::NotFound { provider }
            | Self::Transport { provider, .. }
            | Self::Decode { provider, .. } => Some(*provider),
            Self::InvalidFormat(_) | Self::ResolutionFailed { .. } => None,
        }
    }
}

/// Errors from the persistence ports.
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("failed to load seed data: {0}")]
    Seed(String),
}

/// Errors from the mail delivery port.
#[derive(Error, Debug)]
pub enum MailError {
    #[error("invalid message: {0}")]
    Invalid(String),
}
