//! Plain-text and JSON rendering of ledger results.

use chickhub_core::aggregate::{DailyEntry, ItemSales, PeriodSummary};
use chickhub_core::planner::{self, PackSuggestions};
use chickhub_core::{Expense, MenuItem, Money, Sale};
use chickhub_ledger::{LedgerSummary, Notification, Severity};
use serde::Serialize;

use crate::CliResult;

pub struct Output {
    symbol: String,
    json: bool,
}

impl Output {
    pub fn new(symbol: &str, json: bool) -> Self {
        Output {
            symbol: symbol.to_string(),
            json,
        }
    }

    fn money(&self, amount: Money) -> String {
        let sign = if amount.is_negative() { "-" } else { "" };
        let abs = amount.abs();
        format!("{}{}{}.{:02}", sign, self.symbol, abs.rupees(), abs.paise_part())
    }

    fn emit<T: Serialize>(&self, value: &T) -> CliResult<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }

    pub fn summary(&self, summary: &LedgerSummary) -> CliResult<()> {
        if self.json {
            return self.emit(summary);
        }

        println!("Revenue   {:>14}", self.money(summary.revenue));
        println!("Expenses  {:>14}", self.money(summary.expenses));
        println!("Profit    {:>14}", self.money(summary.profit));
        println!("Margin    {:>13.1}%", summary.profit_margin);
        println!(
            "Stock     {:>11.2} kg",
            planner::stock_kg(summary.chicken_stock_grams)
        );
        Ok(())
    }

    pub fn period(&self, period: &PeriodSummary) -> CliResult<()> {
        if self.json {
            return self.emit(period);
        }

        println!("Sales report {} to {}", period.start, period.end);
        println!("Total sales {:>14}", self.money(period.sales));
        println!("  Cash      {:>14}", self.money(period.cash));
        println!("  UPI       {:>14}", self.money(period.upi));
        println!("Expenses    {:>14}", self.money(period.expenses));
        println!("Net profit  {:>14}", self.money(period.profit));
        println!("Margin      {:>13.1}%", period.profit_margin);
        Ok(())
    }

    pub fn daily(&self, series: &[DailyEntry]) -> CliResult<()> {
        if self.json {
            return self.emit(&series);
        }
        if series.is_empty() {
            println!("No sales or expenses yet.");
            return Ok(());
        }

        println!("{:<12} {:>14} {:>14} {:>14}", "Date", "Revenue", "Expenses", "Profit");
        for day in series {
            println!(
                "{:<12} {:>14} {:>14} {:>14}",
                day.date,
                self.money(day.revenue),
                self.money(day.expenses),
                self.money(day.profit)
            );
        }
        Ok(())
    }

    pub fn items(&self, items: &[ItemSales]) -> CliResult<()> {
        if self.json {
            return self.emit(&items);
        }

        println!("{:<14} {:>8} {:>14}", "Item", "Units", "Revenue");
        for item in items {
            println!(
                "{:<14} {:>8} {:>14}",
                item.name,
                item.units,
                self.money(item.revenue)
            );
        }
        Ok(())
    }

    pub fn stock(&self, grams: i64, packs: &PackSuggestions) -> CliResult<()> {
        if self.json {
            return self.emit(&serde_json::json!({
                "chicken_stock_grams": grams,
                "packs": packs,
            }));
        }

        println!("Chicken stock: {:.2} kg ({} g)", planner::stock_kg(grams), grams);
        println!();
        println!("Pack suggestions (each line is an alternative):");
        println!("  100g packs        {}", packs.packs_100g);
        println!("  20g packs         {}", packs.packs_20g);
        println!("  75g packs         {}", packs.packs_75g);
        println!(
            "  mixed             {} x 100g + {} x 20g",
            packs.mixed.packs_100g, packs.mixed.packs_20g
        );
        Ok(())
    }

    pub fn menu(&self, items: &[MenuItem]) -> CliResult<()> {
        if self.json {
            return self.emit(&items);
        }
        if items.is_empty() {
            println!("Menu is empty.");
            return Ok(());
        }

        println!("{:<36}  {:<24} {:<12} {:>10}", "Id", "Name", "Category", "Price");
        for item in items {
            println!(
                "{:<36}  {:<24} {:<12} {:>10}",
                item.id,
                item.name,
                item.category,
                self.money(item.price)
            );
        }
        Ok(())
    }

    pub fn menu_item(&self, item: &MenuItem) -> CliResult<()> {
        if self.json {
            return self.emit(item);
        }
        println!(
            "{}  {} ({}) {}",
            item.id,
            item.name,
            item.category,
            self.money(item.price)
        );
        Ok(())
    }

    pub fn sale(&self, sale: &Sale) -> CliResult<()> {
        if self.json {
            return self.emit(sale);
        }
        println!(
            "Sale {} on {}: {} (cash {}, upi {})",
            sale.id,
            sale.date,
            self.money(sale.total),
            self.money(sale.cash),
            self.money(sale.upi)
        );
        if !sale.items.other.is_empty() {
            println!("  {}", sale.items.other);
        }
        Ok(())
    }

    pub fn expense(&self, expense: &Expense, stock_grams: i64) -> CliResult<()> {
        if self.json {
            return self.emit(&serde_json::json!({
                "expense": expense,
                "chicken_stock_grams": stock_grams,
            }));
        }
        println!(
            "Expense {} on {}: {} for {} g chicken",
            expense.id,
            expense.date,
            self.money(expense.total),
            expense.chicken_weight
        );
        println!("Chicken stock now {:.2} kg", planner::stock_kg(stock_grams));
        Ok(())
    }

    /// Notifications go to stderr so JSON output stays parseable.
    pub fn notification(&self, notification: &Notification) {
        match notification.severity {
            Severity::Success => eprintln!("✓ {}", notification.text),
            Severity::Error => eprintln!("✗ {}", notification.text),
        }
    }
}
