// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Errors for the parts of glint that can actually fail.
//!
//! Only construction-time work returns errors: parsing selectors, reading
//! configuration, loading page descriptions. The query path (index, filter,
//! highlight, suggest) has no error type at all. Everything there degrades
//! to "no match" or "no visual effect".

use std::path::PathBuf;
use thiserror::Error;

/// Result alias for fallible glint operations.
pub type Result<T> = std::result::Result<T, GlintError>;

#[derive(Debug, Error)]
pub enum GlintError {
    /// A selector string could not be parsed.
    #[error("invalid selector `{selector}`: {reason}")]
    Selector { selector: String, reason: String },

    /// Configuration or page JSON was malformed.
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl GlintError {
    pub(crate) fn selector(selector: &str, reason: impl Into<String>) -> Self {
        GlintError::Selector {
            selector: selector.to_string(),
            reason: reason.into(),
        }
    }
}
