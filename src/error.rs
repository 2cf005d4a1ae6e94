// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use thiserror::Error;

/// Rejections raised while turning user input into records or selectors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Amount must be greater than 0 (got {0})")]
    NonPositiveAmount(Decimal),
    #[error("Description must not be empty")]
    EmptyDescription,
    #[error("Unknown transaction kind '{0}' (use income|expense|saving|debt)")]
    UnknownKind(String),
    #[error(
        "Unknown category '{0}' (use food|shopping|transport|education|health|debt|salary|other)"
    )]
    UnknownCategory(String),
    #[error("Invalid period '{0}', expected current|all|YYYY-MM|last:N")]
    InvalidPeriod(String),
}
