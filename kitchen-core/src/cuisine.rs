//! Cuisine taxonomy for cookoffs.

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Cuisines a cookoff can be held in.
///
/// A chef's `specialty` is free text; a cookoff cuisine must be one of
/// these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum Cuisine {
    Italian,
    Chinese,
    Greek,
    Japanese,
    Korean,
    Indian,
    Mexican,
    Cajun,
}

impl Cuisine {
    /// All accepted cuisines.
    pub const ALL: [Cuisine; 8] = [
        Cuisine::Italian,
        Cuisine::Chinese,
        Cuisine::Greek,
        Cuisine::Japanese,
        Cuisine::Korean,
        Cuisine::Indian,
        Cuisine::Mexican,
        Cuisine::Cajun,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Cuisine::Italian => "Italian",
            Cuisine::Chinese => "Chinese",
            Cuisine::Greek => "Greek",
            Cuisine::Japanese => "Japanese",
            Cuisine::Korean => "Korean",
            Cuisine::Indian => "Indian",
            Cuisine::Mexican => "Mexican",
            Cuisine::Cajun => "Cajun",
        }
    }
}

impl fmt::Display for Cuisine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Cuisine {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Cuisine::ALL
            .iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .copied()
            .ok_or_else(|| ValidationError::InvalidValue {
                field: "cuisine".to_string(),
                reason: format!("'{}' is not an accepted cuisine", s),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_case_insensitive() {
        assert_eq!("italian".parse::<Cuisine>().unwrap(), Cuisine::Italian);
        assert_eq!("CAJUN".parse::<Cuisine>().unwrap(), Cuisine::Cajun);
        assert_eq!(" Mexican ".parse::<Cuisine>().unwrap(), Cuisine::Mexican);
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        let err = "British".parse::<Cuisine>().unwrap_err();
        assert!(matches!(err, ValidationError::InvalidValue { .. }));
    }

    #[test]
    fn test_display_round_trips_all() {
        for cuisine in Cuisine::ALL {
            assert_eq!(cuisine.to_string().parse::<Cuisine>().unwrap(), cuisine);
        }
    }
}
