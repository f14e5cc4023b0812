//! # Ledger Error Types
//!
//! ## Error Taxonomy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         LedgerError                                     │
//! │                                                                         │
//! │  Load { source }                 any of the four fetches failed         │
//! │  Mutation { operation, source }  create/update/delete failed or was     │
//! │                                  rejected before reaching the backend   │
//! │  Config(..)                      chickhub.toml / CHICKHUB_* problems    │
//! │                                                                         │
//! │  Load and Mutation are recovered at the store boundary: logged,        │
//! │  posted as an error notification, store stays usable.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;

use thiserror::Error;

/// Boxed backend or validation error carried as a source.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The mutation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    AddSale,
    AddExpense,
    AddMenuItem,
    UpdateMenuItem,
    DeleteMenuItem,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::AddSale => "add sale",
            Operation::AddExpense => "add expense",
            Operation::AddMenuItem => "add menu item",
            Operation::UpdateMenuItem => "update menu item",
            Operation::DeleteMenuItem => "delete menu item",
        }
    }

    /// Text of the error notification posted when this operation fails.
    pub fn failure_message(&self) -> &'static str {
        match self {
            Operation::AddSale => "Failed to add sale",
            Operation::AddExpense => "Failed to add expense",
            Operation::AddMenuItem => "Failed to add menu item",
            Operation::UpdateMenuItem => "Failed to update menu item",
            Operation::DeleteMenuItem => "Failed to delete menu item",
        }
    }

    /// Text of the success notification.
    pub fn success_message(&self) -> &'static str {
        match self {
            Operation::AddSale => "Sale added successfully!",
            Operation::AddExpense => "Expense added successfully!",
            Operation::AddMenuItem => "Menu item added successfully!",
            Operation::UpdateMenuItem => "Menu item updated successfully!",
            Operation::DeleteMenuItem => "Menu item deleted successfully!",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ledger store and configuration errors.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// One of the initial fetches failed; nothing was applied.
    #[error("Failed to load data: {source}")]
    Load { source: BoxError },

    /// A mutation failed; the in-memory collections are unchanged.
    #[error("Failed to {operation}: {source}")]
    Mutation {
        operation: Operation,
        source: BoxError,
    },

    /// Configuration values are invalid.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Config file could not be read or written.
    #[error("Config file error: {0}")]
    ConfigIo(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),
}

impl LedgerError {
    pub(crate) fn load(source: impl Into<BoxError>) -> Self {
        LedgerError::Load {
            source: source.into(),
        }
    }

    pub(crate) fn mutation(operation: Operation, source: impl Into<BoxError>) -> Self {
        LedgerError::Mutation {
            operation,
            source: source.into(),
        }
    }

    /// The failed operation, for mutation errors.
    pub fn operation(&self) -> Option<Operation> {
        match self {
            LedgerError::Mutation { operation, .. } => Some(*operation),
            _ => None,
        }
    }
}

/// Result type for ledger operations.
pub type LedgerResult<T> = Result<T, LedgerError>;

#[cfg(test)]
mod tests {
    use super::*;
    use chickhub_core::ValidationError;
    use std::error::Error as _;

    #[test]
    fn test_mutation_error_keeps_source() {
        let err = LedgerError::mutation(
            Operation::AddMenuItem,
            ValidationError::Required {
                field: "name".to_string(),
            },
        );

        assert_eq!(err.to_string(), "Failed to add menu item: name is required");
        assert_eq!(err.operation(), Some(Operation::AddMenuItem));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_operation_messages() {
        assert_eq!(Operation::AddSale.success_message(), "Sale added successfully!");
        assert_eq!(
            Operation::DeleteMenuItem.failure_message(),
            "Failed to delete menu item"
        );
    }
}
