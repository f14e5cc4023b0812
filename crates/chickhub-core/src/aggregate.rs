//! # Aggregation Functions
//!
//! Pure derivations over the sale and expense collections. Every function
//! re-scans the slices it is given; callers never cache their results.
//!
//! ## Daily Series
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  sales                         expenses                                 │
//! │  2024-01-02  ₹100              2024-01-01  ₹80                          │
//! │  2024-01-01  ₹50               2024-01-02  ₹30                          │
//! │  2024-01-01  ₹20                                                        │
//! │        │                              │                                 │
//! │        └──────────┬───────────────────┘                                 │
//! │                   ▼  bucket by exact date string                        │
//! │  ┌────────────┬─────────┬──────────┬────────┐                           │
//! │  │ date       │ revenue │ expenses │ profit │                           │
//! │  ├────────────┼─────────┼──────────┼────────┤                           │
//! │  │ 2024-01-01 │   ₹70   │   ₹80    │  -₹10  │  ◄── sorted by calendar   │
//! │  │ 2024-01-02 │  ₹100   │   ₹30    │   ₹70  │      date, ascending      │
//! │  └────────────┴─────────┴──────────┴────────┘                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Period Summary
//! [`period_summary`] answers the sales report's date filter: totals for
//! the records whose calendar day falls in `start..=end`, with the cash and
//! UPI halves of revenue shown separately.

use std::cmp::Ordering;
use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{Expense, Sale, UnitPrices};
use crate::DATE_FORMAT;

// =============================================================================
// Totals
// =============================================================================

/// Sum of `total` over all sales.
pub fn total_revenue(sales: &[Sale]) -> Money {
    sales.iter().map(|s| s.total).sum()
}

/// Sum of `total` over all expenses.
pub fn total_expenses(expenses: &[Expense]) -> Money {
    expenses.iter().map(|e| e.total).sum()
}

/// `total_revenue - total_expenses`.
pub fn total_profit(sales: &[Sale], expenses: &[Expense]) -> Money {
    total_revenue(sales) - total_expenses(expenses)
}

/// Profit as a percentage of revenue; `0.0` when there is no revenue.
pub fn profit_margin(revenue: Money, profit: Money) -> f64 {
    profit.percentage_of(revenue)
}

// =============================================================================
// Daily Series
// =============================================================================

/// One calendar day of the trend view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DailyEntry {
    pub date: String,
    pub revenue: Money,
    pub expenses: Money,
    /// `revenue - expenses` for this day.
    pub profit: Money,
}

/// Buckets sales and expenses by `date` and sorts the buckets by calendar day.
///
/// Dates are compared as exact strings when grouping. Buckets whose date
/// does not parse as `YYYY-MM-DD` come after all parseable ones, ordered
/// lexically among themselves.
pub fn daily_series(sales: &[Sale], expenses: &[Expense]) -> Vec<DailyEntry> {
    let mut buckets: HashMap<&str, (Money, Money)> = HashMap::new();

    for sale in sales {
        let bucket = buckets.entry(sale.date.as_str()).or_default();
        bucket.0 = bucket.0.saturating_add(sale.total);
    }
    for expense in expenses {
        let bucket = buckets.entry(expense.date.as_str()).or_default();
        bucket.1 = bucket.1.saturating_add(expense.total);
    }

    let mut keyed: Vec<(Option<NaiveDate>, DailyEntry)> = buckets
        .into_iter()
        .map(|(date, (revenue, expenses))| {
            let parsed = NaiveDate::parse_from_str(date, DATE_FORMAT).ok();
            let entry = DailyEntry {
                date: date.to_string(),
                revenue,
                expenses,
                profit: revenue - expenses,
            };
            (parsed, entry)
        })
        .collect();

    keyed.sort_by(|(a_day, a), (b_day, b)| match (a_day, b_day) {
        (Some(x), Some(y)) => x.cmp(y).then_with(|| a.date.cmp(&b.date)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.date.cmp(&b.date),
    });

    keyed.into_iter().map(|(_, entry)| entry).collect()
}

// =============================================================================
// Period Summary
// =============================================================================

/// Report totals over an inclusive range of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PeriodSummary {
    #[ts(as = "String")]
    pub start: NaiveDate,
    #[ts(as = "String")]
    pub end: NaiveDate,
    /// Sum of sale totals.
    pub sales: Money,
    pub cash: Money,
    pub upi: Money,
    pub expenses: Money,
    /// `sales - expenses`.
    pub profit: Money,
    /// Profit as a percentage of `sales`; `0.0` with no sales.
    pub profit_margin: f64,
}

fn within(date: &str, start: NaiveDate, end: NaiveDate) -> bool {
    NaiveDate::parse_from_str(date, DATE_FORMAT)
        .map(|day| start <= day && day <= end)
        .unwrap_or(false)
}

/// Totals for sales and expenses dated between `start` and `end`, both
/// inclusive.
///
/// Dates are compared as calendar days, not strings. Records whose date does
/// not parse fall outside every period. `start > end` selects nothing.
pub fn period_summary(
    sales: &[Sale],
    expenses: &[Expense],
    start: NaiveDate,
    end: NaiveDate,
) -> PeriodSummary {
    let in_period: Vec<&Sale> = sales
        .iter()
        .filter(|s| within(&s.date, start, end))
        .collect();

    let total: Money = in_period.iter().map(|s| s.total).sum();
    let cash: Money = in_period.iter().map(|s| s.cash).sum();
    let upi: Money = in_period.iter().map(|s| s.upi).sum();
    let spent: Money = expenses
        .iter()
        .filter(|e| within(&e.date, start, end))
        .map(|e| e.total)
        .sum();
    let profit = total - spent;

    PeriodSummary {
        start,
        end,
        sales: total,
        cash,
        upi,
        expenses: spent,
        profit,
        profit_margin: profit_margin(total, profit),
    }
}

// =============================================================================
// Item Sales
// =============================================================================

/// Units sold of one named product and the revenue they represent at the
/// configured unit price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ItemSales {
    pub name: String,
    pub units: u64,
    pub revenue: Money,
}

/// Per-product unit totals across all sales, in a fixed order:
/// boneless 100g, boneless 20g, pakoda 100g.
pub fn item_sales(sales: &[Sale], prices: &UnitPrices) -> Vec<ItemSales> {
    let (b100, b20, p100) = sales.iter().fold((0u64, 0u64, 0u64), |acc, sale| {
        (
            acc.0 + sale.items.boneless_100g as u64,
            acc.1 + sale.items.boneless_20g as u64,
            acc.2 + sale.items.pakoda_100g as u64,
        )
    });

    [
        ("Boneless 100g", b100, prices.boneless_100g),
        ("Boneless 20g", b20, prices.boneless_20g),
        ("Pakoda 100g", p100, prices.pakoda_100g),
    ]
    .into_iter()
    .map(|(name, units, price)| ItemSales {
        name: name.to_string(),
        units,
        revenue: price.multiply_quantity(units as i64),
    })
    .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{NewExpense, NewSale, PaymentType, SaleItems};
    use chrono::Utc;

    fn sale(date: &str, rupees: i64) -> Sale {
        NewSale {
            date: date.to_string(),
            customer_name: None,
            customer_mobile: None,
            items: SaleItems::default(),
            cash: Money::from_rupees(rupees),
            upi: Money::zero(),
            total: Money::from_rupees(rupees),
            payment_type: PaymentType::Cash,
        }
        .into_sale(format!("s-{}-{}", date, rupees), Utc::now())
    }

    fn expense(date: &str, rupees: i64) -> Expense {
        NewExpense {
            date: date.to_string(),
            chicken_weight: 100,
            chicken_cost: Money::from_rupees(rupees),
            masala: Money::zero(),
            oil: Money::zero(),
            gas: Money::zero(),
            tea_cups: Money::zero(),
            breading: Money::zero(),
            total: Money::from_rupees(rupees),
        }
        .into_expense(format!("e-{}-{}", date, rupees), Utc::now())
    }

    #[test]
    fn test_totals_on_empty_collections() {
        assert!(total_revenue(&[]).is_zero());
        assert!(total_expenses(&[]).is_zero());
        assert!(total_profit(&[], &[]).is_zero());
    }

    #[test]
    fn test_totals() {
        let sales = vec![sale("2024-01-01", 100), sale("2024-01-02", 50)];
        let expenses = vec![expense("2024-01-01", 180)];

        assert_eq!(total_revenue(&sales), Money::from_rupees(150));
        assert_eq!(total_expenses(&expenses), Money::from_rupees(180));
        assert_eq!(total_profit(&sales, &expenses), Money::from_rupees(-30));
    }

    #[test]
    fn test_daily_series_buckets_and_sorts() {
        let sales = vec![
            sale("2024-01-02", 100),
            sale("2024-01-01", 50),
            sale("2024-01-01", 20),
        ];
        let expenses = vec![expense("2024-01-01", 80), expense("2024-01-03", 30)];

        let series = daily_series(&sales, &expenses);

        let dates: Vec<&str> = series.iter().map(|d| d.date.as_str()).collect();
        assert_eq!(dates, vec!["2024-01-01", "2024-01-02", "2024-01-03"]);

        assert_eq!(series[0].revenue, Money::from_rupees(70));
        assert_eq!(series[0].expenses, Money::from_rupees(80));
        assert_eq!(series[0].profit, Money::from_rupees(-10));

        // Only one side present: the other is zero
        assert!(series[1].expenses.is_zero());
        assert!(series[2].revenue.is_zero());

        for entry in &series {
            assert_eq!(entry.profit, entry.revenue - entry.expenses);
        }
    }

    #[test]
    fn test_daily_series_sorts_chronologically() {
        let sales = vec![
            sale("2023-12-31", 1),
            sale("2024-02-01", 1),
            sale("2024-01-15", 1),
        ];
        let series = daily_series(&sales, &[]);
        let dates: Vec<&str> = series.iter().map(|d| d.date.as_str()).collect();
        assert_eq!(dates, vec!["2023-12-31", "2024-01-15", "2024-02-01"]);
    }

    #[test]
    fn test_daily_series_unparseable_dates_go_last() {
        let sales = vec![sale("not-a-date", 5), sale("2024-01-01", 10), sale("2024-1-2", 7)];
        let series = daily_series(&sales, &[]);
        let dates: Vec<&str> = series.iter().map(|d| d.date.as_str()).collect();
        assert_eq!(dates[0], "2024-01-01");
        assert_eq!(series.len(), 3);
    }

    #[test]
    fn test_daily_series_empty() {
        assert!(daily_series(&[], &[]).is_empty());
    }

    #[test]
    fn test_item_sales() {
        let mut a = sale("2024-01-01", 265);
        a.items = SaleItems {
            boneless_100g: 2,
            boneless_20g: 1,
            pakoda_100g: 0,
            other: String::new(),
        };
        let mut b = sale("2024-01-02", 80);
        b.items.pakoda_100g = 1;

        let report = item_sales(&[a, b], &UnitPrices::default());

        assert_eq!(report[0].units, 2);
        assert_eq!(report[0].revenue, Money::from_rupees(240));
        assert_eq!(report[1].revenue, Money::from_rupees(25));
        assert_eq!(report[2].units, 1);
        assert_eq!(report[2].revenue, Money::from_rupees(80));
    }

    fn day(date: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date, DATE_FORMAT).unwrap()
    }

    #[test]
    fn test_period_summary_includes_boundary_days() {
        let mut upi_sale = sale("2024-01-31", 40);
        upi_sale.cash = Money::zero();
        upi_sale.upi = Money::from_rupees(40);

        let sales = vec![
            sale("2023-12-31", 500),
            sale("2024-01-01", 100),
            sale("2024-01-15", 60),
            upi_sale,
            sale("2024-02-01", 700),
        ];
        let expenses = vec![
            expense("2023-12-31", 900),
            expense("2024-01-01", 50),
            expense("2024-01-31", 30),
            expense("2024-02-01", 900),
        ];

        let period = period_summary(&sales, &expenses, day("2024-01-01"), day("2024-01-31"));
        assert_eq!(period.sales, Money::from_rupees(200));
        assert_eq!(period.cash, Money::from_rupees(160));
        assert_eq!(period.upi, Money::from_rupees(40));
        assert_eq!(period.expenses, Money::from_rupees(80));
        assert_eq!(period.profit, Money::from_rupees(120));
        assert!((period.profit_margin - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_period_summary_single_day_and_empty_ranges() {
        let sales = vec![sale("2024-03-10", 100), sale("2024-03-11", 50)];
        let expenses = vec![expense("2024-03-10", 120)];

        let one_day = period_summary(&sales, &expenses, day("2024-03-10"), day("2024-03-10"));
        assert_eq!(one_day.sales, Money::from_rupees(100));
        assert_eq!(one_day.profit, Money::from_rupees(-20));
        assert!((one_day.profit_margin + 20.0).abs() < 1e-9);

        let reversed = period_summary(&sales, &expenses, day("2024-03-11"), day("2024-03-10"));
        assert!(reversed.sales.is_zero());
        assert!(reversed.expenses.is_zero());
        assert_eq!(reversed.profit_margin, 0.0);
    }

    #[test]
    fn test_period_summary_compares_calendar_days() {
        // Sorts between the bounds as a string but is not a calendar date.
        let sales = vec![sale("2024-01-1x", 100), sale("2024-01-05", 30)];
        let period = period_summary(&sales, &[], day("2024-01-01"), day("2024-01-31"));
        assert_eq!(period.sales, Money::from_rupees(30));
    }

    #[test]
    fn test_profit_margin() {
        assert_eq!(profit_margin(Money::zero(), Money::from_rupees(-5)), 0.0);
        let margin = profit_margin(Money::from_rupees(200), Money::from_rupees(50));
        assert!((margin - 25.0).abs() < 1e-9);
    }
}
