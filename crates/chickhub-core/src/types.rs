//! # Domain Types
//!
//! The four record shapes the ledger holds, plus their input forms.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Sale       │   │    Expense      │   │    MenuItem     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id             │   │  id             │       │
//! │  │  date           │   │  date           │   │  name           │       │
//! │  │  items          │   │  chicken_weight │   │  category       │       │
//! │  │  cash + upi     │   │  six cost lines │   │  price          │       │
//! │  │  = total        │   │  = total        │   │                 │       │
//! │  └─────────────────┘   └────────┬────────┘   └─────────────────┘       │
//! │                                 │ +chicken_weight                       │
//! │                                 ▼                                       │
//! │                        ┌─────────────────┐                              │
//! │                        │ InventoryLevel  │                              │
//! │                        │  chicken_stock  │                              │
//! │                        └─────────────────┘                              │
//! │                                                                         │
//! │  NewSale / NewExpense / NewMenuItem: same shapes without id and        │
//! │  created_at. Those two are assigned by the persistence service.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Sales never reference a `MenuItem`; they only count named item
//! categories, so editing the menu leaves sales history alone.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Payment Type
// =============================================================================

/// How a sale was paid.
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum PaymentType {
    /// Physical cash.
    #[default]
    Cash,
    /// UPI transfer.
    Upi,
}

impl PaymentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentType::Cash => "cash",
            PaymentType::Upi => "upi",
        }
    }
}

impl fmt::Display for PaymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cash" => Ok(PaymentType::Cash),
            "upi" => Ok(PaymentType::Upi),
            _ => Err(ValidationError::NotAllowed {
                field: "payment_type".to_string(),
                allowed: vec!["cash".to_string(), "upi".to_string()],
            }),
        }
    }
}

// =============================================================================
// Menu Category
// =============================================================================

/// The fixed set of menu categories.
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum MenuCategory {
    #[default]
    Snacks,
    #[serde(rename = "Main Course")]
    #[cfg_attr(feature = "sqlx", sqlx(rename = "Main Course"))]
    MainCourse,
    Beverages,
    Sides,
    Desserts,
}

impl MenuCategory {
    /// Every category, in menu display order.
    pub const ALL: [MenuCategory; 5] = [
        MenuCategory::Snacks,
        MenuCategory::MainCourse,
        MenuCategory::Beverages,
        MenuCategory::Sides,
        MenuCategory::Desserts,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MenuCategory::Snacks => "Snacks",
            MenuCategory::MainCourse => "Main Course",
            MenuCategory::Beverages => "Beverages",
            MenuCategory::Sides => "Sides",
            MenuCategory::Desserts => "Desserts",
        }
    }
}

impl fmt::Display for MenuCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MenuCategory {
    type Err = ValidationError;

    /// Accepts the display name case-insensitively, with or without the space
    /// ("Main Course", "main course", "maincourse").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
            .collect::<String>()
            .to_lowercase();

        MenuCategory::ALL
            .into_iter()
            .find(|c| c.as_str().replace(' ', "").to_lowercase() == wanted)
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "category".to_string(),
                allowed: MenuCategory::ALL
                    .iter()
                    .map(|c| c.as_str().to_string())
                    .collect(),
            })
    }
}

// =============================================================================
// Sale
// =============================================================================

/// Counts of the named products plus a free-text line for anything else.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SaleItems {
    #[serde(rename = "boneless100g", default)]
    pub boneless_100g: u32,
    #[serde(rename = "boneless20g", default)]
    pub boneless_20g: u32,
    #[serde(rename = "pakoda100g", default)]
    pub pakoda_100g: u32,
    #[serde(default)]
    pub other: String,
}

impl SaleItems {
    /// Units of the named products (the free-text line is not counted).
    pub fn named_units(&self) -> u64 {
        self.boneless_100g as u64 + self.boneless_20g as u64 + self.pakoda_100g as u64
    }
}

/// A sale as accepted from the caller, before the persistence service
/// assigns identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewSale {
    /// Calendar day, `YYYY-MM-DD`.
    pub date: String,
    pub customer_name: Option<String>,
    pub customer_mobile: Option<String>,
    pub items: SaleItems,
    pub cash: Money,
    pub upi: Money,
    pub total: Money,
    pub payment_type: PaymentType,
}

impl NewSale {
    /// Attaches the identity assigned by the persistence service.
    pub fn into_sale(self, id: String, created_at: DateTime<Utc>) -> Sale {
        Sale {
            id,
            date: self.date,
            customer_name: self.customer_name,
            customer_mobile: self.customer_mobile,
            items: self.items,
            cash: self.cash,
            upi: self.upi,
            total: self.total,
            payment_type: self.payment_type,
            created_at,
        }
    }
}

/// A persisted sale. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Sale {
    pub id: String,
    pub date: String,
    pub customer_name: Option<String>,
    pub customer_mobile: Option<String>,
    pub items: SaleItems,
    pub cash: Money,
    pub upi: Money,
    pub total: Money,
    pub payment_type: PaymentType,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Sale {
    /// `cash + upi == total`.
    pub fn is_balanced(&self) -> bool {
        self.cash.checked_add(self.upi) == Some(self.total)
    }
}

// =============================================================================
// Expense
// =============================================================================

/// An expense as accepted from the caller.
///
/// `tea_cups` is already the rupee cost (cups × rate), not a cup count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewExpense {
    pub date: String,
    /// Grams of chicken bought; added to stock when the expense is recorded.
    pub chicken_weight: i64,
    pub chicken_cost: Money,
    pub masala: Money,
    pub oil: Money,
    pub gas: Money,
    pub tea_cups: Money,
    pub breading: Money,
    pub total: Money,
}

impl NewExpense {
    fn cost_fields(&self) -> [Money; 6] {
        [
            self.chicken_cost,
            self.masala,
            self.oil,
            self.gas,
            self.tea_cups,
            self.breading,
        ]
    }

    /// Sum of the six cost fields (saturating).
    pub fn cost_fields_sum(&self) -> Money {
        self.cost_fields().into_iter().sum()
    }

    /// Sum of the six cost fields, or `None` if it overflows.
    pub fn checked_cost_fields_sum(&self) -> Option<Money> {
        self.cost_fields()
            .into_iter()
            .try_fold(Money::zero(), Money::checked_add)
    }

    /// Attaches the identity assigned by the persistence service.
    pub fn into_expense(self, id: String, created_at: DateTime<Utc>) -> Expense {
        Expense {
            id,
            date: self.date,
            chicken_weight: self.chicken_weight,
            chicken_cost: self.chicken_cost,
            masala: self.masala,
            oil: self.oil,
            gas: self.gas,
            tea_cups: self.tea_cups,
            breading: self.breading,
            total: self.total,
            created_at,
        }
    }
}

/// A persisted expense. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Expense {
    pub id: String,
    pub date: String,
    pub chicken_weight: i64,
    pub chicken_cost: Money,
    pub masala: Money,
    pub oil: Money,
    pub gas: Money,
    pub tea_cups: Money,
    pub breading: Money,
    pub total: Money,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Expense {
    fn cost_fields(&self) -> [Money; 6] {
        [
            self.chicken_cost,
            self.masala,
            self.oil,
            self.gas,
            self.tea_cups,
            self.breading,
        ]
    }

    pub fn cost_fields_sum(&self) -> Money {
        self.cost_fields().into_iter().sum()
    }

    /// `total` equals the sum of the six cost fields.
    pub fn is_balanced(&self) -> bool {
        self.cost_fields()
            .into_iter()
            .try_fold(Money::zero(), Money::checked_add)
            == Some(self.total)
    }

    /// Combined gas, tea and breading cost (the "other" column of the
    /// expense history table).
    pub fn sundries(&self) -> Money {
        self.gas + self.tea_cups + self.breading
    }
}

// =============================================================================
// Menu Item
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewMenuItem {
    pub name: String,
    pub category: MenuCategory,
    pub price: Money,
}

impl NewMenuItem {
    pub fn into_menu_item(self, id: String, created_at: DateTime<Utc>) -> MenuItem {
        MenuItem {
            id,
            name: self.name,
            category: self.category,
            price: self.price,
            created_at,
        }
    }
}

/// A configurable menu entry shown at the billing counter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    pub category: MenuCategory,
    pub price: Money,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

/// A partial update for a menu item. `None` fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MenuItemPatch {
    pub name: Option<String>,
    pub category: Option<MenuCategory>,
    pub price: Option<Money>,
}

impl MenuItemPatch {
    /// Returns `item` with the patched fields replaced.
    pub fn apply_to(&self, item: &MenuItem) -> MenuItem {
        MenuItem {
            id: item.id.clone(),
            name: self.name.clone().unwrap_or_else(|| item.name.clone()),
            category: self.category.unwrap_or(item.category),
            price: self.price.unwrap_or(item.price),
            created_at: item.created_at,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.category.is_none() && self.price.is_none()
    }
}

// =============================================================================
// Inventory Level
// =============================================================================

/// The singleton stock record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InventoryLevel {
    pub id: String,
    /// Running sum of every expense's `chicken_weight`, in grams.
    pub chicken_stock_grams: i64,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Unit Prices
// =============================================================================

/// Unit prices of the named products, used to estimate per-item revenue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct UnitPrices {
    pub boneless_100g: Money,
    pub boneless_20g: Money,
    pub pakoda_100g: Money,
}

impl Default for UnitPrices {
    fn default() -> Self {
        UnitPrices {
            boneless_100g: Money::from_rupees(120),
            boneless_20g: Money::from_rupees(25),
            pakoda_100g: Money::from_rupees(80),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn expense() -> NewExpense {
        NewExpense {
            date: "2024-01-01".to_string(),
            chicken_weight: 500,
            chicken_cost: Money::from_rupees(80),
            masala: Money::from_rupees(10),
            oil: Money::from_rupees(5),
            gas: Money::from_rupees(5),
            tea_cups: Money::zero(),
            breading: Money::zero(),
            total: Money::from_rupees(100),
        }
    }

    #[test]
    fn test_payment_type_parsing() {
        assert_eq!("cash".parse::<PaymentType>().unwrap(), PaymentType::Cash);
        assert_eq!(" UPI ".parse::<PaymentType>().unwrap(), PaymentType::Upi);
        assert!("card".parse::<PaymentType>().is_err());
    }

    #[test]
    fn test_menu_category_parsing() {
        assert_eq!("Main Course".parse::<MenuCategory>().unwrap(), MenuCategory::MainCourse);
        assert_eq!("main-course".parse::<MenuCategory>().unwrap(), MenuCategory::MainCourse);
        assert_eq!("desserts".parse::<MenuCategory>().unwrap(), MenuCategory::Desserts);
        assert!("Pizza".parse::<MenuCategory>().is_err());
    }

    #[test]
    fn test_menu_category_serde_uses_display_names() {
        let json = serde_json::to_string(&MenuCategory::MainCourse).unwrap();
        assert_eq!(json, "\"Main Course\"");
        let back: MenuCategory = serde_json::from_str("\"Snacks\"").unwrap();
        assert_eq!(back, MenuCategory::Snacks);
    }

    #[test]
    fn test_sale_items_json_keys() {
        let items = SaleItems {
            boneless_100g: 2,
            boneless_20g: 1,
            pakoda_100g: 0,
            other: "Tea x2".to_string(),
        };
        let json = serde_json::to_value(&items).unwrap();
        assert_eq!(json["boneless100g"], 2);
        assert_eq!(json["boneless20g"], 1);
        assert_eq!(items.named_units(), 3);
    }

    #[test]
    fn test_expense_balance() {
        let expense = expense().into_expense("e1".to_string(), Utc::now());
        assert!(expense.is_balanced());
        assert_eq!(expense.sundries(), Money::from_rupees(5));

        let mut off = expense.clone();
        off.total = Money::from_rupees(99);
        assert!(!off.is_balanced());
    }

    #[test]
    fn test_menu_patch_applies_only_set_fields() {
        let item = NewMenuItem {
            name: "Boneless 100g".to_string(),
            category: MenuCategory::Snacks,
            price: Money::from_rupees(120),
        }
        .into_menu_item("m1".to_string(), Utc::now());

        let patch = MenuItemPatch {
            price: Some(Money::from_rupees(130)),
            ..Default::default()
        };
        let updated = patch.apply_to(&item);

        assert_eq!(updated.id, "m1");
        assert_eq!(updated.name, "Boneless 100g");
        assert_eq!(updated.price, Money::from_rupees(130));
        assert!(!patch.is_empty());
        assert!(MenuItemPatch::default().is_empty());
    }
}
