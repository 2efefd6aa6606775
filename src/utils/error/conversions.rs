//! Type conversions for LeadflowError

use super::types::LeadflowError;

impl From<url::ParseError> for LeadflowError {
    fn from(err: url::ParseError) -> Self {
        LeadflowError::Config(format!("Invalid URL: {}", err))
    }
}
