//! Chef records and creation-time validation.
//!
//! A `Chef` mirrors one row of the `chefs` table. The table stores
//! `signature_dishes` as text (a comma-separated list of dish names);
//! the dish count derived from it feeds cookoff scoring.

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Surrogate chef identifier (auto-incrementing rowid).
pub type ChefId = i64;

/// Minimum age accepted for a chef.
pub const MIN_AGE: i64 = 18;
/// Maximum age accepted for a chef.
pub const MAX_AGE: i64 = 65;

// ============================================================================
// CHEF RECORD
// ============================================================================

/// A chef row as stored in the database.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Chef {
    pub id: ChefId,
    pub name: String,
    /// Free-text culinary specialty (compared against the cookoff cuisine).
    pub specialty: String,
    pub years_experience: i64,
    /// Comma-separated signature dish names.
    pub signature_dishes: String,
    pub age: i64,
    pub wins: i64,
    pub cookoffs: i64,
}

impl Chef {
    /// Number of signature dishes, derived from the comma-separated text.
    pub fn dish_count(&self) -> i64 {
        self.signature_dishes
            .split(',')
            .filter(|d| !d.trim().is_empty())
            .count() as i64
    }

    /// Win percentage in `[0.0, 1.0]`; zero when the chef has no cookoffs.
    pub fn win_pct(&self) -> f64 {
        if self.cookoffs == 0 {
            0.0
        } else {
            self.wins as f64 / self.cookoffs as f64
        }
    }
}

// ============================================================================
// NEW CHEF INPUT
// ============================================================================

/// Input for creating a chef. `wins` and `cookoffs` always start at the
/// table defaults (zero).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct NewChef {
    pub name: String,
    pub specialty: String,
    pub years_experience: i64,
    pub signature_dishes: String,
    pub age: i64,
}

impl NewChef {
    /// Validate the input against the rules the running system enforces
    /// in code: age in `[MIN_AGE, MAX_AGE]`, non-negative experience,
    /// and non-empty text fields.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::RequiredFieldMissing {
                field: "name".to_string(),
            });
        }
        if self.specialty.trim().is_empty() {
            return Err(ValidationError::RequiredFieldMissing {
                field: "specialty".to_string(),
            });
        }
        if self.signature_dishes.trim().is_empty() {
            return Err(ValidationError::RequiredFieldMissing {
                field: "signature_dishes".to_string(),
            });
        }
        if !(MIN_AGE..=MAX_AGE).contains(&self.age) {
            return Err(ValidationError::OutOfRange {
                field: "age".to_string(),
                min: MIN_AGE,
                max: MAX_AGE,
            });
        }
        if self.years_experience < 0 {
            return Err(ValidationError::InvalidValue {
                field: "years_experience".to_string(),
                reason: "must be non-negative".to_string(),
            });
        }
        Ok(())
    }
}

// ============================================================================
// COOKOFF RESULT
// ============================================================================

/// Outcome recorded for a chef after a cookoff.
///
/// A win increments both `cookoffs` and `wins`; a loss increments only
/// `cookoffs`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum CookoffResult {
    Win,
    Loss,
}

impl fmt::Display for CookoffResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CookoffResult::Win => write!(f, "win"),
            CookoffResult::Loss => write!(f, "loss"),
        }
    }
}
