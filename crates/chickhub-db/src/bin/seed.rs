//! # Seed Data Generator
//!
//! Populates an empty database with a starter menu for development.
//!
//! ## Usage
//! ```bash
//! cargo run -p chickhub-db --bin seed
//!
//! # Specify database path
//! cargo run -p chickhub-db --bin seed -- --db ./data/chickhub.db
//! ```

use chickhub_core::{MenuCategory, Money, NewMenuItem};
use chickhub_db::{Database, DbConfig};
use std::env;

/// Starter menu: (name, category, price in rupees)
const MENU: &[(&str, MenuCategory, i64)] = &[
    ("Boneless 100g", MenuCategory::Snacks, 120),
    ("Boneless 20g", MenuCategory::Snacks, 25),
    ("Chicken Pakoda 100g", MenuCategory::Snacks, 80),
    ("Chicken Biryani", MenuCategory::MainCourse, 150),
    ("Chicken Fried Rice", MenuCategory::MainCourse, 130),
    ("Masala Tea", MenuCategory::Beverages, 15),
    ("Lime Soda", MenuCategory::Beverages, 30),
    ("French Fries", MenuCategory::Sides, 60),
    ("Onion Rings", MenuCategory::Sides, 50),
    ("Gulab Jamun", MenuCategory::Desserts, 40),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./chickhub_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("ChickHub Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./chickhub_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 ChickHub Seed Data Generator");
    println!("===============================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.menu().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} menu items", existing);
        println!("  Skipping seed to avoid duplicates.");
        return Ok(());
    }

    let mut generated = 0;
    for (name, category, rupees) in MENU {
        let item = NewMenuItem {
            name: name.to_string(),
            category: *category,
            price: Money::from_rupees(*rupees),
        };

        if let Err(e) = db.menu().create(item).await {
            eprintln!("Failed to insert {}: {}", name, e);
            continue;
        }
        generated += 1;
    }

    println!();
    println!("✓ Seeded {} menu items", generated);

    db.close().await;
    Ok(())
}
