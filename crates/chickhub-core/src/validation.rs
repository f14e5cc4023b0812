//! # Validation Module
//!
//! Input validation for everything the ledger accepts.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Presentation                                                 │
//! │  └── Form checks (empty fields, numbers)                               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: LedgerStore mutation                                         │
//! │  └── THIS MODULE: business rules, before the persistence call          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  └── NOT NULL / CHECK constraints                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use chickhub_core::validation::validate_date;
//!
//! assert!(validate_date("2024-01-31").is_ok());
//! assert!(validate_date("2024-02-30").is_err());
//! ```

use chrono::NaiveDate;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::{MenuItemPatch, NewExpense, NewMenuItem, NewSale};
use crate::{DATE_FORMAT, MAX_NAME_LENGTH};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a `YYYY-MM-DD` calendar date and returns it parsed.
pub fn validate_date(date: &str) -> ValidationResult<NaiveDate> {
    if date.trim().is_empty() {
        return Err(ValidationError::required("date"));
    }

    NaiveDate::parse_from_str(date, DATE_FORMAT).map_err(|e| ValidationError::InvalidFormat {
        field: "date".to_string(),
        reason: format!("expected YYYY-MM-DD ({})", e),
    })
}

/// Validates a menu item name.
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most 200 characters
pub fn validate_item_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::required("name"));
    }

    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LENGTH,
        });
    }

    Ok(())
}

fn non_negative(field: &str, amount: Money) -> ValidationResult<()> {
    if amount.is_negative() {
        return Err(ValidationError::negative(field));
    }
    Ok(())
}

fn positive(field: &str, amount: Money) -> ValidationResult<()> {
    if !amount.is_positive() {
        return Err(ValidationError::must_be_positive(field));
    }
    Ok(())
}

// =============================================================================
// Record Validators
// =============================================================================

/// Validates a sale before it is persisted.
///
/// ## Rules
/// - `date` is a calendar date
/// - `cash`, `upi`, `total` are non-negative
/// - `cash + upi == total`, without overflowing
pub fn validate_new_sale(sale: &NewSale) -> CoreResult<()> {
    validate_date(&sale.date)?;
    non_negative("cash", sale.cash)?;
    non_negative("upi", sale.upi)?;
    non_negative("total", sale.total)?;

    let paid = sale
        .cash
        .checked_add(sale.upi)
        .ok_or_else(|| ValidationError::too_large("cash + upi"))?;
    if paid != sale.total {
        return Err(CoreError::PaymentMismatch {
            cash: sale.cash.paise(),
            upi: sale.upi.paise(),
            total: sale.total.paise(),
        });
    }

    Ok(())
}

/// Validates an expense before it is persisted.
///
/// ## Rules
/// - `date` is a calendar date
/// - chicken weight and every cost field are non-negative (a gas-only
///   expense books 0 g of chicken)
/// - `total` equals the sum of the six cost fields, without overflowing
pub fn validate_new_expense(expense: &NewExpense) -> CoreResult<()> {
    validate_date(&expense.date)?;

    if expense.chicken_weight < 0 {
        return Err(ValidationError::negative("chicken_weight").into());
    }
    non_negative("chicken_cost", expense.chicken_cost)?;
    non_negative("masala", expense.masala)?;
    non_negative("oil", expense.oil)?;
    non_negative("gas", expense.gas)?;
    non_negative("tea_cups", expense.tea_cups)?;
    non_negative("breading", expense.breading)?;

    let sum = expense
        .checked_cost_fields_sum()
        .ok_or_else(|| ValidationError::too_large("total"))?;
    if sum != expense.total {
        return Err(CoreError::ExpenseTotalMismatch {
            total: expense.total.paise(),
            sum: sum.paise(),
        });
    }

    Ok(())
}

/// Validates a new menu item: non-empty name, positive price.
pub fn validate_new_menu_item(item: &NewMenuItem) -> CoreResult<()> {
    validate_item_name(&item.name)?;
    positive("price", item.price)?;
    Ok(())
}

/// Validates the fields a patch sets. An empty patch is rejected.
pub fn validate_menu_item_patch(patch: &MenuItemPatch) -> CoreResult<()> {
    if patch.is_empty() {
        return Err(ValidationError::required("name, category or price").into());
    }
    if let Some(name) = &patch.name {
        validate_item_name(name)?;
    }
    if let Some(price) = patch.price {
        positive("price", price)?;
    }
    Ok(())
}

// =============================================================================
// Expense Helpers
// =============================================================================

/// Cost of `cups` tea cups at `rate` per cup.
pub fn tea_cups_cost(cups: u32, rate: Money) -> ValidationResult<Money> {
    rate.checked_multiply_quantity(i64::from(cups))
        .ok_or_else(|| ValidationError::too_large("tea_cups"))
}

/// Sum of the six expense cost lines.
pub fn expense_total(
    chicken_cost: Money,
    masala: Money,
    oil: Money,
    gas: Money,
    tea_cups: Money,
    breading: Money,
) -> ValidationResult<Money> {
    [chicken_cost, masala, oil, gas, tea_cups, breading]
        .into_iter()
        .try_fold(Money::zero(), Money::checked_add)
        .ok_or_else(|| ValidationError::too_large("total"))
}

/// Line items of an expense as entered at the counter, before the tea cup
/// count is priced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpenseEntry {
    pub date: String,
    pub chicken_weight: i64,
    pub chicken_cost: Money,
    pub masala: Money,
    pub oil: Money,
    pub gas: Money,
    pub tea_cups: u32,
    pub breading: Money,
}

impl ExpenseEntry {
    /// Prices the tea cups at `tea_cup_rate`, computes the total and
    /// validates the result.
    ///
    /// The counter form requires a chicken purchase (weight and cost > 0);
    /// the store itself accepts expenses without one.
    pub fn into_new_expense(self, tea_cup_rate: Money) -> CoreResult<NewExpense> {
        if self.chicken_weight <= 0 {
            return Err(ValidationError::must_be_positive("chicken_weight").into());
        }
        positive("chicken_cost", self.chicken_cost)?;

        let tea_cups = tea_cups_cost(self.tea_cups, tea_cup_rate)?;
        let total = expense_total(
            self.chicken_cost,
            self.masala,
            self.oil,
            self.gas,
            tea_cups,
            self.breading,
        )?;

        let expense = NewExpense {
            date: self.date,
            chicken_weight: self.chicken_weight,
            chicken_cost: self.chicken_cost,
            masala: self.masala,
            oil: self.oil,
            gas: self.gas,
            tea_cups,
            breading: self.breading,
            total,
        };

        validate_new_expense(&expense)?;
        Ok(expense)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{MenuCategory, PaymentType, SaleItems};
    use crate::DEFAULT_TEA_CUP_RATE;

    fn sale(cash: i64, upi: i64, total: i64) -> NewSale {
        NewSale {
            date: "2024-01-01".to_string(),
            customer_name: None,
            customer_mobile: None,
            items: SaleItems::default(),
            cash: Money::from_rupees(cash),
            upi: Money::from_rupees(upi),
            total: Money::from_rupees(total),
            payment_type: PaymentType::Cash,
        }
    }

    #[test]
    fn test_validate_date() {
        assert!(validate_date("2024-01-01").is_ok());
        assert!(validate_date("2024-02-29").is_ok());

        assert!(validate_date("").is_err());
        assert!(validate_date("2023-02-29").is_err());
        assert!(validate_date("01/02/2024").is_err());
        assert!(validate_date("yesterday").is_err());
    }

    #[test]
    fn test_validate_item_name() {
        assert!(validate_item_name("Boneless 100g").is_ok());
        assert!(validate_item_name("   ").is_err());
        assert!(validate_item_name(&"A".repeat(201)).is_err());
    }

    #[test]
    fn test_validate_new_sale() {
        assert!(validate_new_sale(&sale(100, 0, 100)).is_ok());
        assert!(validate_new_sale(&sale(60, 40, 100)).is_ok());
        assert!(validate_new_sale(&sale(0, 0, 0)).is_ok());

        assert!(matches!(
            validate_new_sale(&sale(50, 0, 100)),
            Err(CoreError::PaymentMismatch { .. })
        ));
        assert!(validate_new_sale(&sale(-10, 10, 0)).is_err());
    }

    #[test]
    fn test_validate_new_expense() {
        let entry = ExpenseEntry {
            date: "2024-01-01".to_string(),
            chicken_weight: 500,
            chicken_cost: Money::from_rupees(80),
            masala: Money::from_rupees(10),
            oil: Money::from_rupees(5),
            gas: Money::from_rupees(5),
            tea_cups: 0,
            breading: Money::zero(),
        };
        let expense = entry.into_new_expense(DEFAULT_TEA_CUP_RATE).unwrap();
        assert_eq!(expense.total, Money::from_rupees(100));

        let mut wrong_total = expense.clone();
        wrong_total.total = Money::from_rupees(90);
        assert!(matches!(
            validate_new_expense(&wrong_total),
            Err(CoreError::ExpenseTotalMismatch { .. })
        ));

        let mut negative_weight = expense.clone();
        negative_weight.chicken_weight = -1;
        assert!(validate_new_expense(&negative_weight).is_err());
    }

    #[test]
    fn test_expense_without_chicken_is_valid() {
        let gas_only = NewExpense {
            date: "2024-01-02".to_string(),
            chicken_weight: 0,
            chicken_cost: Money::zero(),
            masala: Money::zero(),
            oil: Money::zero(),
            gas: Money::from_rupees(50),
            tea_cups: Money::zero(),
            breading: Money::zero(),
            total: Money::from_rupees(50),
        };
        assert!(validate_new_expense(&gas_only).is_ok());
    }

    #[test]
    fn test_expense_entry_requires_chicken() {
        let no_weight = ExpenseEntry {
            date: "2024-01-02".to_string(),
            chicken_cost: Money::from_rupees(80),
            ..Default::default()
        };
        assert!(matches!(
            no_weight.into_new_expense(DEFAULT_TEA_CUP_RATE),
            Err(CoreError::Validation(ValidationError::MustBePositive { .. }))
        ));

        let no_cost = ExpenseEntry {
            date: "2024-01-02".to_string(),
            chicken_weight: 500,
            ..Default::default()
        };
        assert!(matches!(
            no_cost.into_new_expense(DEFAULT_TEA_CUP_RATE),
            Err(CoreError::Validation(ValidationError::MustBePositive { .. }))
        ));
    }

    #[test]
    fn test_overflowing_amounts_are_rejected() {
        assert!(matches!(
            validate_new_sale(&NewSale {
                cash: Money::from_paise(i64::MAX),
                upi: Money::from_paise(1),
                total: Money::from_paise(i64::MAX),
                ..sale(0, 0, 0)
            }),
            Err(CoreError::Validation(ValidationError::TooLarge { .. }))
        ));

        let huge = NewExpense {
            date: "2024-01-02".to_string(),
            chicken_weight: 500,
            chicken_cost: Money::from_paise(i64::MAX),
            masala: Money::from_paise(1),
            oil: Money::zero(),
            gas: Money::zero(),
            tea_cups: Money::zero(),
            breading: Money::zero(),
            total: Money::from_paise(i64::MAX),
        };
        assert!(matches!(
            validate_new_expense(&huge),
            Err(CoreError::Validation(ValidationError::TooLarge { .. }))
        ));

        assert!(tea_cups_cost(u32::MAX, Money::from_paise(i64::MAX)).is_err());
        let entry = ExpenseEntry {
            date: "2024-01-02".to_string(),
            chicken_weight: 500,
            chicken_cost: Money::from_paise(i64::MAX),
            oil: Money::from_rupees(1),
            ..Default::default()
        };
        assert!(entry.into_new_expense(DEFAULT_TEA_CUP_RATE).is_err());
    }

    #[test]
    fn test_tea_cups_are_priced_before_storage() {
        let entry = ExpenseEntry {
            date: "2024-03-10".to_string(),
            chicken_weight: 1000,
            chicken_cost: Money::from_rupees(200),
            tea_cups: 7,
            ..Default::default()
        };
        let expense = entry.into_new_expense(DEFAULT_TEA_CUP_RATE).unwrap();

        assert_eq!(expense.tea_cups, Money::from_paise(1050));
        assert_eq!(expense.total, Money::from_paise(21050));
    }

    #[test]
    fn test_validate_menu_items() {
        let item = NewMenuItem {
            name: "Chicken Pakoda".to_string(),
            category: MenuCategory::Snacks,
            price: Money::from_rupees(80),
        };
        assert!(validate_new_menu_item(&item).is_ok());

        let free = NewMenuItem {
            price: Money::zero(),
            ..item.clone()
        };
        assert!(validate_new_menu_item(&free).is_err());

        assert!(validate_menu_item_patch(&MenuItemPatch::default()).is_err());
        assert!(validate_menu_item_patch(&MenuItemPatch {
            name: Some(String::new()),
            ..Default::default()
        })
        .is_err());
        assert!(validate_menu_item_patch(&MenuItemPatch {
            category: Some(MenuCategory::Sides),
            ..Default::default()
        })
        .is_ok());
    }
}
