//! Error handling utilities
//!
//! This module defines the crate-wide error type and its helpers.

mod conversions;
mod helpers;
mod types;

pub use helpers::ErrorCategory;
pub use types::{LeadflowError, Result};
