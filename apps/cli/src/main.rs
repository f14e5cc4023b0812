//! # chickhub
//!
//! Command-line front end for the ChickHub ledger.
//!
//! ## Run Sequence
//! ```text
//! init_tracing() → LedgerConfig::load() → Database::new() → LedgerStore::load()
//!               → command → print result + current notification
//! ```
//!
//! ## Usage
//! ```bash
//! chickhub summary
//! chickhub summary --from 2024-01-01 --to 2024-01-31
//! chickhub sale add --boneless-100g 2 --cash 240
//! chickhub sale add --item "Chicken Biryani=1" --item "Masala Tea=2" --payment upi
//! chickhub expense add --weight 2000 --chicken-cost 400 --masala 30 --tea-cups 10
//! chickhub menu update <id> --price 140
//! chickhub --json daily
//! ```

mod render;

use std::path::PathBuf;
use std::process::ExitCode;

use chickhub_core::bill::{Bill, Customer};
use chickhub_core::validation::{validate_date, ExpenseEntry};
use chickhub_core::{
    MenuCategory, MenuItemPatch, Money, NewMenuItem, NewSale, PaymentType, SaleItems, DATE_FORMAT,
};
use chickhub_db::{Database, DbConfig};
use chickhub_ledger::config::rupees_to_money;
use chickhub_ledger::{LedgerConfig, LedgerStore};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::render::Output;

type CliResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Log filter used when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "info,chickhub=debug,sqlx=warn";

#[derive(Parser, Debug)]
#[command(name = "chickhub", version)]
#[command(about = "Sales, expense and stock ledger for a fried-chicken stall")]
struct Cli {
    /// Config file (default: chickhub.toml in the platform config directory).
    #[arg(long, global = true, env = "CHICKHUB_CONFIG")]
    config: Option<PathBuf>,

    /// Database file, overriding the configured one.
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Print results as JSON.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Revenue, expenses, profit and stock, or the sales report for a date range.
    Summary(SummaryArgs),
    /// Revenue, expenses and profit per day.
    Daily,
    /// Units sold and estimated revenue per named item.
    Items,
    /// Chicken stock and pack suggestions.
    Stock,
    Menu(MenuArgs),
    Sale(SaleArgs),
    Expense(ExpenseArgs),
    Config(ConfigArgs),
}

#[derive(Args, Debug)]
struct SummaryArgs {
    /// First day of the report, YYYY-MM-DD (default: today when --to is set).
    #[arg(long, value_parser = parse_date)]
    from: Option<NaiveDate>,
    /// Last day of the report, inclusive (default: today when --from is set).
    #[arg(long, value_parser = parse_date)]
    to: Option<NaiveDate>,
}

#[derive(Args, Debug)]
struct MenuArgs {
    #[command(subcommand)]
    command: MenuCommand,
}

#[derive(Subcommand, Debug)]
enum MenuCommand {
    List,
    Add(MenuAddArgs),
    Update(MenuUpdateArgs),
    Delete { id: String },
}

#[derive(Args, Debug)]
struct MenuAddArgs {
    #[arg(long)]
    name: String,
    #[arg(long, value_parser = parse_category)]
    category: MenuCategory,
    /// Price in rupees.
    #[arg(long, value_parser = parse_rupees)]
    price: Money,
}

#[derive(Args, Debug)]
struct MenuUpdateArgs {
    id: String,
    #[arg(long)]
    name: Option<String>,
    #[arg(long, value_parser = parse_category)]
    category: Option<MenuCategory>,
    #[arg(long, value_parser = parse_rupees)]
    price: Option<Money>,
}

#[derive(Args, Debug)]
struct SaleArgs {
    #[command(subcommand)]
    command: SaleCommand,
}

#[derive(Subcommand, Debug)]
enum SaleCommand {
    /// Record a sale, either from named item counts or from menu items.
    Add(SaleAddArgs),
}

#[derive(Args, Debug)]
struct SaleAddArgs {
    /// Sale date, YYYY-MM-DD (default: today).
    #[arg(long)]
    date: Option<String>,
    #[arg(long)]
    customer: Option<String>,
    #[arg(long)]
    mobile: Option<String>,
    #[arg(long, value_parser = parse_payment, default_value = "cash")]
    payment: PaymentType,

    /// Menu item by id or name, as `ITEM=QTY`. Repeatable; bills the sale.
    #[arg(long = "item", value_parser = parse_bill_item)]
    items: Vec<(String, u32)>,

    #[arg(long = "boneless-100g", default_value_t = 0)]
    boneless_100g: u32,
    #[arg(long = "boneless-20g", default_value_t = 0)]
    boneless_20g: u32,
    #[arg(long = "pakoda-100g", default_value_t = 0)]
    pakoda_100g: u32,
    #[arg(long)]
    other: Option<String>,

    /// Cash received, in rupees.
    #[arg(long, value_parser = parse_rupees)]
    cash: Option<Money>,
    /// UPI received, in rupees.
    #[arg(long, value_parser = parse_rupees)]
    upi: Option<Money>,
}

#[derive(Args, Debug)]
struct ExpenseArgs {
    #[command(subcommand)]
    command: ExpenseCommand,
}

#[derive(Subcommand, Debug)]
enum ExpenseCommand {
    /// Record a chicken purchase and the day's running costs.
    Add(ExpenseAddArgs),
}

#[derive(Args, Debug)]
struct ExpenseAddArgs {
    /// Expense date, YYYY-MM-DD (default: today).
    #[arg(long)]
    date: Option<String>,
    /// Chicken bought, in grams.
    #[arg(long)]
    weight: i64,
    #[arg(long, value_parser = parse_rupees)]
    chicken_cost: Money,
    #[arg(long, value_parser = parse_rupees, default_value = "0")]
    masala: Money,
    #[arg(long, value_parser = parse_rupees, default_value = "0")]
    oil: Money,
    #[arg(long, value_parser = parse_rupees, default_value = "0")]
    gas: Money,
    /// Number of tea cups, priced at the configured rate.
    #[arg(long, default_value_t = 0)]
    tea_cups: u32,
    #[arg(long, value_parser = parse_rupees, default_value = "0")]
    breading: Money,
}

#[derive(Args, Debug)]
struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Print the effective configuration.
    Show,
    /// Write a default config file.
    Init {
        #[arg(long)]
        force: bool,
    },
}

// =============================================================================
// Argument Parsers
// =============================================================================

fn parse_rupees(raw: &str) -> Result<Money, String> {
    let rupees: f64 = raw
        .trim()
        .parse()
        .map_err(|_| format!("not an amount: {raw}"))?;
    rupees_to_money(rupees).ok_or_else(|| format!("amount out of range: {raw}"))
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    validate_date(raw.trim()).map_err(|e| e.to_string())
}

fn parse_category(raw: &str) -> Result<MenuCategory, String> {
    raw.parse().map_err(|e: chickhub_core::ValidationError| e.to_string())
}

fn parse_payment(raw: &str) -> Result<PaymentType, String> {
    raw.parse().map_err(|e: chickhub_core::ValidationError| e.to_string())
}

fn parse_bill_item(raw: &str) -> Result<(String, u32), String> {
    let (item, qty) = raw
        .rsplit_once('=')
        .ok_or_else(|| format!("expected ITEM=QTY, got: {raw}"))?;
    let qty: u32 = qty
        .trim()
        .parse()
        .map_err(|_| format!("invalid quantity in: {raw}"))?;
    Ok((item.trim().to_string(), qty))
}

fn today() -> String {
    chrono::Local::now().format(DATE_FORMAT).to_string()
}

fn today_date() -> NaiveDate {
    chrono::Local::now().date_naive()
}

// =============================================================================
// Entry Point
// =============================================================================

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Command failed");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    log_subscriber(filter).init();
}

/// Formatted events on stderr, filtered only by `filter`.
fn log_subscriber(filter: EnvFilter) -> impl tracing::Subscriber + Send + Sync + 'static {
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish()
}

async fn run(cli: Cli) -> CliResult<()> {
    if let Command::Config(args) = &cli.command {
        return run_config(cli.config.clone(), &args.command, cli.json);
    }

    let mut config = LedgerConfig::load(cli.config.clone())?;
    if let Some(db) = &cli.db {
        config.database.path = Some(db.clone());
    }

    let db_path = config
        .database_path()
        .ok_or("No database path available")?;
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    info!(path = ?db_path, "Opening database");
    let db = Database::new(
        DbConfig::new(db_path).max_connections(config.database.max_connections),
    )
    .await?;

    let store = LedgerStore::from_config(db, &config);
    let out = Output::new(&config.store.currency_symbol, cli.json);

    let result = match store.load().await {
        Ok(()) => execute(&store, cli.command, &out).await,
        Err(e) => Err(e.into()),
    };

    if let Some(notification) = store.notification() {
        out.notification(&notification);
    }

    store.backend().close().await;
    result
}

async fn execute(store: &LedgerStore<Database>, command: Command, out: &Output) -> CliResult<()> {
    match command {
        Command::Summary(SummaryArgs {
            from: None,
            to: None,
        }) => out.summary(&store.summary()),
        Command::Summary(SummaryArgs { from, to }) => {
            let start = from.unwrap_or_else(today_date);
            let end = to.unwrap_or_else(today_date);
            out.period(&store.period_summary(start, end))
        }
        Command::Daily => out.daily(&store.daily_series()),
        Command::Items => out.items(&store.item_sales()),
        Command::Stock => out.stock(store.chicken_stock_grams(), &store.pack_suggestions()),
        Command::Menu(args) => execute_menu(store, args.command, out).await,
        Command::Sale(args) => match args.command {
            SaleCommand::Add(args) => add_sale(store, args, out).await,
        },
        Command::Expense(args) => match args.command {
            ExpenseCommand::Add(args) => add_expense(store, args, out).await,
        },
        // Handled before the database is opened.
        Command::Config(_) => Ok(()),
    }
}

async fn execute_menu(
    store: &LedgerStore<Database>,
    command: MenuCommand,
    out: &Output,
) -> CliResult<()> {
    match command {
        MenuCommand::List => out.menu(&store.menu_items()),
        MenuCommand::Add(args) => {
            let item = store
                .add_menu_item(NewMenuItem {
                    name: args.name,
                    category: args.category,
                    price: args.price,
                })
                .await?;
            out.menu_item(&item)
        }
        MenuCommand::Update(args) => {
            let patch = MenuItemPatch {
                name: args.name,
                category: args.category,
                price: args.price,
            };
            let item = store.update_menu_item(&args.id, patch).await?;
            out.menu_item(&item)
        }
        MenuCommand::Delete { id } => {
            store.delete_menu_item(&id).await?;
            Ok(())
        }
    }
}

async fn add_sale(store: &LedgerStore<Database>, args: SaleAddArgs, out: &Output) -> CliResult<()> {
    let date = args.date.unwrap_or_else(today);
    let customer = Customer::new(
        args.customer.unwrap_or_default(),
        args.mobile.unwrap_or_default(),
    );

    let sale = if args.items.is_empty() {
        let cash = args.cash.unwrap_or_else(Money::zero);
        let upi = args.upi.unwrap_or_else(Money::zero);
        if args.cash.is_none() && args.upi.is_none() {
            return Err("Either --cash/--upi or at least one --item is required".into());
        }
        let total = cash
            .checked_add(upi)
            .ok_or("--cash plus --upi is too large")?;

        store
            .add_sale(NewSale {
                date,
                customer_name: customer.name,
                customer_mobile: customer.mobile,
                items: SaleItems {
                    boneless_100g: args.boneless_100g,
                    boneless_20g: args.boneless_20g,
                    pakoda_100g: args.pakoda_100g,
                    other: args.other.unwrap_or_default(),
                },
                cash,
                upi,
                total,
                payment_type: args.payment,
            })
            .await?
    } else {
        let menu = store.menu_items();
        let mut bill = Bill::new();
        for (key, qty) in &args.items {
            let item = menu
                .iter()
                .find(|m| m.id == *key || m.name.eq_ignore_ascii_case(key))
                .ok_or_else(|| format!("No menu item matches '{key}'"))?;
            bill.add_item(item, *qty)?;
        }
        store
            .charge_bill(&bill, &date, customer, args.payment)
            .await?
    };

    out.sale(&sale)
}

async fn add_expense(
    store: &LedgerStore<Database>,
    args: ExpenseAddArgs,
    out: &Output,
) -> CliResult<()> {
    let entry = ExpenseEntry {
        date: args.date.unwrap_or_else(today),
        chicken_weight: args.weight,
        chicken_cost: args.chicken_cost,
        masala: args.masala,
        oil: args.oil,
        gas: args.gas,
        tea_cups: args.tea_cups,
        breading: args.breading,
    };

    let expense = store.record_expense(entry).await?;
    out.expense(&expense, store.chicken_stock_grams())
}

fn run_config(path: Option<PathBuf>, command: &ConfigCommand, json: bool) -> CliResult<()> {
    match command {
        ConfigCommand::Show => {
            let config = LedgerConfig::load(path)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&config)?);
            } else {
                print!("{}", toml::to_string_pretty(&config)?);
            }
            Ok(())
        }
        ConfigCommand::Init { force } => {
            let target = path
                .or_else(LedgerConfig::default_config_path)
                .ok_or("No config path available")?;
            if target.exists() && !force {
                return Err(format!(
                    "{} already exists (use --force to overwrite)",
                    target.display()
                )
                .into());
            }

            let written = LedgerConfig::default().save(Some(target))?;
            println!("Wrote {}", written.display());
            Ok(())
        }
    }
}
