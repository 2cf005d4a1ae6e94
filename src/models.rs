// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Top-level classification of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Income,
    Expense,
    Saving,
    Debt,
}

impl Kind {
    pub const ALL: [Kind; 4] = [Kind::Income, Kind::Expense, Kind::Saving, Kind::Debt];

    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Income => "income",
            Kind::Expense => "expense",
            Kind::Saving => "saving",
            Kind::Debt => "debt",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Kind::Income => "Income",
            Kind::Expense => "Expense",
            Kind::Saving => "Saving",
            Kind::Debt => "Debt repayment",
        }
    }

    /// Category to persist for a record of this kind. Only expenses carry a
    /// real category; everything else is filed under `Other`.
    pub fn category_for(&self, category: Option<Category>) -> Category {
        match self {
            Kind::Expense => category.unwrap_or(Category::Other),
            Kind::Income | Kind::Saving | Kind::Debt => Category::Other,
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Kind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(Kind::Income),
            "expense" => Ok(Kind::Expense),
            "saving" => Ok(Kind::Saving),
            "debt" => Ok(Kind::Debt),
            _ => Err(ValidationError::UnknownKind(s.trim().to_string())),
        }
    }
}

/// Expense sub-classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Food,
    Shopping,
    Transport,
    Education,
    Health,
    Debt,
    Salary,
    Other,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Food,
        Category::Shopping,
        Category::Transport,
        Category::Education,
        Category::Health,
        Category::Debt,
        Category::Salary,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Food => "food",
            Category::Shopping => "shopping",
            Category::Transport => "transport",
            Category::Education => "education",
            Category::Health => "health",
            Category::Debt => "debt",
            Category::Salary => "salary",
            Category::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Food => "Food & drink",
            Category::Shopping => "Shopping",
            Category::Transport => "Transport",
            Category::Education => "Education",
            Category::Health => "Health",
            Category::Debt => "Debt repayment",
            Category::Salary => "Salary",
            Category::Other => "Other",
        }
    }

    /// Chart color (hex) for this category.
    pub fn color(&self) -> &'static str {
        match self {
            Category::Food => "#ef4444",
            Category::Shopping => "#f59e0b",
            Category::Transport => "#3b82f6",
            Category::Education => "#8b5cf6",
            Category::Health => "#ec4899",
            Category::Debt => "#6366f1",
            Category::Salary => "#10b981",
            Category::Other => "#6b7280",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "food" => Ok(Category::Food),
            "shopping" => Ok(Category::Shopping),
            "transport" => Ok(Category::Transport),
            "education" => Ok(Category::Education),
            "health" => Ok(Category::Health),
            "debt" => Ok(Category::Debt),
            "salary" => Ok(Category::Salary),
            "other" => Ok(Category::Other),
            _ => Err(ValidationError::UnknownCategory(s.trim().to_string())),
        }
    }
}

/// A stored transaction as seen by the read side.
///
/// `kind`, `category` and `occurred_at` are `None` when the stored value is
/// missing or could not be understood. The reporting engine tolerates such
/// records instead of rejecting the whole snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub owner: String,
    pub kind: Option<Kind>,
    pub category: Option<Category>,
    pub amount: Decimal,
    pub description: String,
    pub occurred_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

/// Input for creating or replacing a transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub kind: Kind,
    pub category: Option<Category>,
    pub amount: Decimal,
    pub description: String,
    pub occurred_at: NaiveDateTime,
}

impl NewTransaction {
    /// Checks write-time invariants and returns the category to persist.
    pub fn validate(&self) -> Result<Category, ValidationError> {
        if self.amount <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveAmount(self.amount));
        }
        if self.description.trim().is_empty() {
            return Err(ValidationError::EmptyDescription);
        }
        Ok(self.kind.category_for(self.category))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub month: String, // YYYY-MM
    pub category: Category,
    pub amount: Decimal,
}
