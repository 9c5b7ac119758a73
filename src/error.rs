// Copyright (c) 2025 Saldo Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Core error kinds. Everything here is surfaced to the caller as a
/// human-readable message; only the recurrence projector downgrades its own
/// failures to a log line.
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    #[error("{0}")]
    Duplicate(String),

    #[error("storage unavailable: {0}")]
    StoreUnavailable(#[from] rusqlite::Error),

    #[error("sync channel error: {0}")]
    Channel(String),

    #[error("security answer does not match")]
    SecurityAnswerMismatch,
}

impl LedgerError {
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }
}
