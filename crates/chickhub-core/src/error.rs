//! # Error Types
//!
//! Domain-specific error types for chickhub-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  chickhub-core errors (this file)                                      │
//! │  ├── CoreError        - Business rule violations                       │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  chickhub-db errors (separate crate)                                   │
//! │  └── DbError          - Persistence failures                           │
//! │                                                                         │
//! │  chickhub-ledger errors                                                │
//! │  └── LedgerError      - LoadFailure / MutationFailure                  │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → LedgerError → Notification        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Business rule violations raised by the core.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Sale amounts do not add up.
    ///
    /// ## When This Occurs
    /// A sale arrives (from a caller or echoed by the persistence service)
    /// where `cash + upi != total`.
    #[error("Sale payment split does not match total: cash {cash} + upi {upi} != total {total}")]
    PaymentMismatch { cash: i64, upi: i64, total: i64 },

    /// Expense total is not the sum of its cost fields.
    #[error("Expense total {total} does not match sum of cost fields {sum}")]
    ExpenseTotalMismatch { total: i64, sum: i64 },

    /// A bill with no lines cannot become a sale.
    #[error("Bill has no items")]
    EmptyBill,

    /// Bill has exceeded maximum allowed lines.
    #[error("Bill cannot have more than {max} items")]
    BillTooLarge { max: usize },

    /// Bill line not found.
    #[error("Bill has no line for menu item {0}")]
    BillLineNotFound(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when caller input doesn't meet requirements and are raised
/// before anything reaches the persistence service.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Amount or quantity overflows the ledger's integer range.
    #[error("{field} is too large")]
    TooLarge { field: String },

    /// Invalid format (e.g., invalid date).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

impl ValidationError {
    pub(crate) fn required(field: &str) -> Self {
        ValidationError::Required {
            field: field.to_string(),
        }
    }

    pub(crate) fn negative(field: &str) -> Self {
        ValidationError::Negative {
            field: field.to_string(),
        }
    }

    pub(crate) fn must_be_positive(field: &str) -> Self {
        ValidationError::MustBePositive {
            field: field.to_string(),
        }
    }

    pub fn too_large(field: &str) -> Self {
        ValidationError::TooLarge {
            field: field.to_string(),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::PaymentMismatch {
            cash: 5000,
            upi: 0,
            total: 6000,
        };
        assert_eq!(
            err.to_string(),
            "Sale payment split does not match total: cash 5000 + upi 0 != total 6000"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        assert_eq!(ValidationError::required("name").to_string(), "name is required");
        assert_eq!(
            ValidationError::negative("chicken_weight").to_string(),
            "chicken_weight must not be negative"
        );
        assert_eq!(
            ValidationError::too_large("total").to_string(),
            "total is too large"
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let core_err: CoreError = ValidationError::must_be_positive("price").into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
