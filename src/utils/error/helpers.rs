//! Helper functions for creating and classifying errors

use super::types::LeadflowError;

/// Coarse classification used when logging failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Bad input or configuration on our side
    ClientError,
    /// The remote side rejected or failed the request
    ServerError,
    /// Worth trying again later
    TransientError,
    /// Will not succeed without operator action
    PermanentError,
}

impl LeadflowError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation(message.into())
    }

    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::Network(message.into())
    }

    pub fn timeout<S: Into<String>>(message: S) -> Self {
        Self::Timeout(message.into())
    }

    pub fn storage<S: Into<String>>(message: S) -> Self {
        Self::Storage(message.into())
    }

    pub fn external<S: Into<String>>(status: u16, body: S) -> Self {
        Self::External {
            status,
            body: body.into(),
        }
    }

    /// Whether the same call could succeed if repeated later
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) | Self::Timeout(_) => true,
            Self::HttpClient(e) => e.is_timeout() || e.is_connect(),
            Self::External { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Config(_) | Self::Validation(_) | Self::Yaml(_) | Self::Io(_) => {
                ErrorCategory::ClientError
            }
            Self::External { status, .. } if (400..500).contains(status) && *status != 429 => {
                ErrorCategory::ServerError
            }
            _ if self.is_retryable() => ErrorCategory::TransientError,
            Self::External { .. } | Self::Storage(_) => ErrorCategory::ServerError,
            _ => ErrorCategory::PermanentError,
        }
    }
}
