//! # Bill Builder
//!
//! Accumulates menu items picked at the billing counter and turns them into
//! a [`NewSale`].
//!
//! ## Bill Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Bill Operations                                      │
//! │                                                                         │
//! │  Counter Action           Bill Method             Bill Change           │
//! │  ──────────────           ───────────             ───────────           │
//! │                                                                         │
//! │  Tap menu item ──────────► add_item() ──────────► push or qty += 1     │
//! │                                                                         │
//! │  Change quantity ────────► set_quantity() ──────► lines[i].qty = n     │
//! │                             (n == 0 removes the line)                   │
//! │                                                                         │
//! │  Remove ─────────────────► remove_item() ───────► lines.remove(i)      │
//! │                                                                         │
//! │  Charge ─────────────────► to_new_sale() ───────► NewSale              │
//! │                             other = "Name xQty, ..."                    │
//! │                             cash/upi = total on chosen side             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{MenuCategory, MenuItem, NewSale, PaymentType, SaleItems};
use crate::validation::validate_date;
use crate::MAX_BILL_LINES;

/// One menu item on the bill.
///
/// Name, category and price are frozen when the item is added, so editing
/// the menu afterwards does not change an open bill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BillLine {
    pub menu_item_id: String,
    pub name: String,
    pub category: MenuCategory,
    pub unit_price: Money,
    pub quantity: u32,
}

impl BillLine {
    fn from_menu_item(item: &MenuItem, quantity: u32) -> Self {
        BillLine {
            menu_item_id: item.id.clone(),
            name: item.name.clone(),
            category: item.category,
            unit_price: item.price,
            quantity,
        }
    }

    /// Unit price × quantity.
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(i64::from(self.quantity))
    }
}

/// Optional customer details captured with a sale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Customer {
    pub name: Option<String>,
    pub mobile: Option<String>,
}

impl Customer {
    pub fn new(name: impl Into<String>, mobile: impl Into<String>) -> Self {
        Customer {
            name: non_blank(name.into()),
            mobile: non_blank(mobile.into()),
        }
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// The bill being built at the counter.
///
/// ## Invariants
/// - Lines are unique by `menu_item_id` (adding the same item increases quantity)
/// - Every line has quantity > 0
/// - At most [`MAX_BILL_LINES`] lines
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Bill {
    pub lines: Vec<BillLine>,
}

impl Bill {
    pub fn new() -> Self {
        Bill::default()
    }

    /// Adds `quantity` of a menu item, or increases the quantity if the item
    /// is already on the bill. Adding zero is a no-op.
    pub fn add_item(&mut self, item: &MenuItem, quantity: u32) -> CoreResult<()> {
        if quantity == 0 {
            return Ok(());
        }

        if let Some(line) = self.lines.iter_mut().find(|l| l.menu_item_id == item.id) {
            line.quantity = line.quantity.saturating_add(quantity);
            return Ok(());
        }

        if self.lines.len() >= MAX_BILL_LINES {
            return Err(CoreError::BillTooLarge {
                max: MAX_BILL_LINES,
            });
        }

        self.lines.push(BillLine::from_menu_item(item, quantity));
        Ok(())
    }

    /// Sets the quantity of a line. Zero removes it.
    pub fn set_quantity(&mut self, menu_item_id: &str, quantity: u32) -> CoreResult<()> {
        if quantity == 0 {
            return self.remove_item(menu_item_id);
        }

        match self.lines.iter_mut().find(|l| l.menu_item_id == menu_item_id) {
            Some(line) => {
                line.quantity = quantity;
                Ok(())
            }
            None => Err(CoreError::BillLineNotFound(menu_item_id.to_string())),
        }
    }

    pub fn remove_item(&mut self, menu_item_id: &str) -> CoreResult<()> {
        let before = self.lines.len();
        self.lines.retain(|l| l.menu_item_id != menu_item_id);

        if self.lines.len() == before {
            Err(CoreError::BillLineNotFound(menu_item_id.to_string()))
        } else {
            Ok(())
        }
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total units across all lines.
    pub fn total_quantity(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    pub fn total(&self) -> Money {
        self.lines.iter().map(BillLine::line_total).sum()
    }

    /// The free-text item summary stored on the sale, e.g.
    /// `"Chicken Pakoda x2, Tea x1"`.
    pub fn summary(&self) -> String {
        self.lines
            .iter()
            .map(|l| format!("{} x{}", l.name, l.quantity))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Builds the sale for this bill.
    ///
    /// Named item counts are left at zero; the lines go into `items.other`.
    /// The whole total is booked on the side matching `payment_type`.
    pub fn to_new_sale(
        &self,
        date: &str,
        customer: Customer,
        payment_type: PaymentType,
    ) -> CoreResult<NewSale> {
        if self.is_empty() {
            return Err(CoreError::EmptyBill);
        }
        validate_date(date)?;

        let total = self.total();
        let (cash, upi) = match payment_type {
            PaymentType::Cash => (total, Money::zero()),
            PaymentType::Upi => (Money::zero(), total),
        };

        Ok(NewSale {
            date: date.to_string(),
            customer_name: customer.name,
            customer_mobile: customer.mobile,
            items: SaleItems {
                other: self.summary(),
                ..Default::default()
            },
            cash,
            upi,
            total,
            payment_type,
        })
    }
}
