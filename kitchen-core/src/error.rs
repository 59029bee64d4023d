//! Error types for Chefs Kitchen operations

use crate::ChefId;
use thiserror::Error;

/// Storage layer errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("Chef with id {id} not found")]
    ChefNotFound { id: ChefId },

    #[error("Chef '{name}' not found")]
    ChefNameNotFound { name: String },

    #[error("Chef with name '{name}' already exists")]
    DuplicateChef { name: String },

    #[error("User {username} not found")]
    UserNotFound { username: String },

    #[error("User with username '{username}' already exists")]
    DuplicateUser { username: String },

    #[error("Constraint violation: {reason}")]
    ConstraintViolation { reason: String },

    #[error("Query failed: {reason}")]
    QueryFailed { reason: String },

    #[error("Schema apply failed: {reason}")]
    SchemaFailed { reason: String },

    #[error("Storage lock poisoned")]
    LockPoisoned,
}

/// Validation errors raised before anything reaches the database.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required field missing: {field}")]
    RequiredFieldMissing { field: String },

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },
}

/// Kitchen roster and cookoff errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CookoffError {
    #[error("Kitchen is full (capacity {capacity})")]
    KitchenFull { capacity: usize },

    #[error("Chef {chef_id} is already in the kitchen")]
    AlreadyEntered { chef_id: ChefId },

    #[error("There must be at least two chefs to start a cookoff, found {count}")]
    NotEnoughChefs { count: usize },
}

/// Master error type for all Chefs Kitchen errors.
#[derive(Debug, Clone, Error)]
pub enum KitchenError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Cookoff error: {0}")]
    Cookoff(#[from] CookoffError),
}

/// Result type alias for Chefs Kitchen operations.
pub type KitchenResult<T> = Result<T, KitchenError>;

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_error_display_chef_not_found() {
        let err = StorageError::ChefNotFound { id: 42 };
        let msg = format!("{}", err);
        assert!(msg.contains("42"));
        assert!(msg.contains("not found"));
    }

    #[test]
    fn test_storage_error_display_duplicate_chef() {
        let err = StorageError::DuplicateChef {
            name: "Gordon Ramsay".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("Gordon Ramsay"));
        assert!(msg.contains("already exists"));
    }

    #[test]
    fn test_validation_error_display_out_of_range() {
        let err = ValidationError::OutOfRange {
            field: "age".to_string(),
            min: 18,
            max: 65,
        };
        let msg = format!("{}", err);
        assert!(msg.contains("age"));
        assert!(msg.contains("18"));
        assert!(msg.contains("65"));
    }

    #[test]
    fn test_cookoff_error_display_not_enough_chefs() {
        let err = CookoffError::NotEnoughChefs { count: 1 };
        let msg = format!("{}", err);
        assert!(msg.contains("at least two chefs"));
        assert!(msg.contains("1"));
    }

    #[test]
    fn test_kitchen_error_from_variants() {
        let storage = KitchenError::from(StorageError::LockPoisoned);
        assert!(matches!(storage, KitchenError::Storage(_)));

        let validation = KitchenError::from(ValidationError::RequiredFieldMissing {
            field: "name".to_string(),
        });
        assert!(matches!(validation, KitchenError::Validation(_)));

        let cookoff = KitchenError::from(CookoffError::KitchenFull { capacity: 20 });
        assert!(matches!(cookoff, KitchenError::Cookoff(_)));
    }
}
