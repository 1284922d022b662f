//! # Command Line
//!
//! `clap` definitions for the `hma` binary and the dispatch from parsed
//! arguments to [`commands`](crate::commands).
//!
//! ```text
//! hma [--config PATH] [--db PATH] <command>
//!
//!   client   add | list | delete | open | close
//!   ledger   show | add | delete | statement
//!   pjs      add | list | delete | monthly
//!   service  add | list | delete
//!   invoice  --customer NAME|CASH [--service ID[:QTY]]... [--line NAME:PRICE[:QTY]]...
//!   export   clients|pjs|services [--out PATH]
//!   import   clients|pjs|services FILE [--yes]
//!   logo     set FILE | clear | show
//!   view     guaman|pjs|inventory|invoice
//! ```

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use chrono::{Datelike, NaiveDate};
use clap::{Args, Parser, Subcommand, ValueEnum};
use hma_core::validation::parse_date;
use hma_core::{
    Document, Money, NewClient, NewLedgerEntry, NewPjsRecord, NewServiceItem, PjsSort, PjsSortKey,
    TransferKind,
};
use hma_sync::OfficeConfig;
use tracing::{debug, info};

use crate::commands::invoice::{InvoiceRequest, ManualLine, ServicePick};
use crate::commands::{client, invoice, ledger, logo, pjs, service, transfer, view};
use crate::context::Office;
use crate::error::{ApiError, ApiResult, ErrorCode};
use crate::render;

#[derive(Debug, Parser)]
#[command(
    name = "hma",
    version,
    about = "Hairi Mustafa Associates office ledger, notarization log and receipts"
)]
pub struct Cli {
    /// Configuration file (default: office.toml in the platform config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Database file, overriding the configuration
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Client files
    #[command(subcommand)]
    Client(ClientCommand),

    /// Ledger of one client file
    #[command(subcommand)]
    Ledger(LedgerCommand),

    /// Notarization log
    #[command(subcommand)]
    Pjs(PjsCommand),

    /// Service price list
    #[command(subcommand)]
    Service(ServiceCommand),

    /// Issue a receipt
    Invoice(InvoiceArgs),

    /// Write a collection as CSV
    Export {
        #[arg(value_parser = parse_kind)]
        kind: TransferKind,

        /// Output file (default: HMA_<kind>.csv in the working directory)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Replace a collection from CSV
    Import {
        #[arg(value_parser = parse_kind)]
        kind: TransferKind,

        file: PathBuf,

        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },

    /// Firm logo printed on documents
    #[command(subcommand)]
    Logo(LogoCommand),

    /// Remember which screen is open
    View { key: String },
}

#[derive(Debug, Subcommand)]
pub enum ClientCommand {
    /// Open a new client file with its professional fee
    Add {
        name: String,
        #[arg(long, default_value = "")]
        detail: String,
        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        fee: String,
    },
    List {
        #[arg(long)]
        json: bool,
    },
    Delete { id: String },
    /// Open a client's ledger by list index
    Open { index: usize },
    /// Close the open ledger
    Close,
}

#[derive(Debug, Subcommand)]
pub enum LedgerCommand {
    Show {
        #[arg(long)]
        client: Option<usize>,
        #[arg(long)]
        json: bool,
    },
    /// Append an entry; a negative amount records a payment
    Add {
        desc: String,
        #[arg(allow_negative_numbers = true)]
        amt: String,
        #[arg(long, value_parser = parse_cli_date)]
        date: Option<NaiveDate>,
        #[arg(long)]
        client: Option<usize>,
    },
    Delete {
        position: usize,
        #[arg(long)]
        client: Option<usize>,
    },
    /// Statement of account
    Statement {
        #[arg(long)]
        client: Option<usize>,
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SortColumn {
    Date,
    Amount,
}

impl From<SortColumn> for PjsSortKey {
    fn from(column: SortColumn) -> Self {
        match column {
            SortColumn::Date => PjsSortKey::Date,
            SortColumn::Amount => PjsSortKey::Amount,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum PjsCommand {
    Add {
        name: String,
        #[arg(allow_negative_numbers = true)]
        amount: String,
        #[arg(long, default_value = "")]
        detail: String,
        #[arg(long, value_parser = parse_cli_date)]
        date: Option<NaiveDate>,
    },
    /// List records, newest first. Each --sort toggles like a column header.
    List {
        #[arg(long, value_enum)]
        sort: Vec<SortColumn>,
        #[arg(long)]
        json: bool,
    },
    Delete { id: String },
    /// Totals per month
    Monthly {
        #[arg(long)]
        year: Option<i32>,
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum ServiceCommand {
    Add {
        name: String,
        price: String,
    },
    List {
        #[arg(long)]
        json: bool,
    },
    Delete { id: String },
}

#[derive(Debug, Args)]
pub struct InvoiceArgs {
    /// Client name, or CASH
    #[arg(long)]
    pub customer: String,

    /// Price-list item as ID or ID:QTY
    #[arg(long = "service", value_parser = parse_service_pick)]
    pub services: Vec<ServicePick>,

    /// Manual line as NAME:PRICE or NAME:PRICE:QTY
    #[arg(long = "line", value_parser = parse_manual_line)]
    pub lines: Vec<ManualLine>,

    #[arg(long, value_parser = parse_cli_date)]
    pub date: Option<NaiveDate>,

    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Subcommand)]
pub enum LogoCommand {
    /// Upload an image file
    Set { file: PathBuf },
    /// Go back to the default logo
    Clear,
    Show,
}

// =============================================================================
// Argument Parsers
// =============================================================================

fn parse_kind(value: &str) -> Result<TransferKind, String> {
    value.parse()
}

fn parse_cli_date(value: &str) -> Result<NaiveDate, String> {
    parse_date("date", value).map_err(|e| e.to_string())
}

fn parse_quantity(value: &str) -> Result<u32, String> {
    value
        .trim()
        .parse()
        .map_err(|_| format!("invalid quantity '{}'", value))
}

/// `ID` or `ID:QTY`.
pub fn parse_service_pick(value: &str) -> Result<ServicePick, String> {
    let (id, quantity) = match value.rsplit_once(':') {
        Some((id, qty)) => (id, parse_quantity(qty)?),
        None => (value, 1),
    };
    let id = id.trim();
    if id.is_empty() {
        return Err("service id is required".to_string());
    }
    Ok(ServicePick {
        id: id.to_string(),
        quantity,
    })
}

/// `NAME:PRICE` or `NAME:PRICE:QTY`.
pub fn parse_manual_line(value: &str) -> Result<ManualLine, String> {
    let (head, last) = value
        .rsplit_once(':')
        .ok_or_else(|| format!("expected NAME:PRICE[:QTY], got '{}'", value))?;

    let (name, price, quantity) = match (last.trim().parse::<u32>(), head.rsplit_once(':')) {
        (Ok(quantity), Some((name, price))) => (name, price, quantity),
        _ => (head, last, 1),
    };

    let name = name.trim();
    if name.is_empty() {
        return Err("line name is required".to_string());
    }
    let unit_price = Money::parse(price).map_err(|e| e.to_string())?;

    Ok(ManualLine {
        name: name.to_string(),
        unit_price,
        quantity,
    })
}

// =============================================================================
// Dispatch
// =============================================================================

/// Loads configuration, opens the office, runs one command, and closes the
/// office whatever the outcome.
pub async fn run(cli: Cli) -> ApiResult<()> {
    let mut config = OfficeConfig::load(cli.config)?;
    if let Some(db) = cli.db {
        config.storage.database_path = db;
    }

    let office = Office::open(config).await?;
    let result = dispatch(&office, cli.command).await;
    office.close().await;
    result
}

fn print_json_or<T: serde::Serialize>(
    json: bool,
    value: &T,
    text: impl FnOnce(&T) -> String,
) -> ApiResult<()> {
    if json {
        println!("{}", render::json(value)?);
    } else {
        print!("{}", text(value));
    }
    Ok(())
}

fn print_document(office: &Office, doc: &Document, json: bool) -> ApiResult<()> {
    if json {
        println!("{}", render::json(doc)?);
    } else {
        let logo = logo::effective_logo(office);
        print!("{}", render::document(doc, &office.config().firm.name, &logo));
    }
    Ok(())
}

/// Asks on the terminal; anything but `y`/`yes` declines.
fn confirm(prompt: &str) -> ApiResult<bool> {
    let mut stdout = io::stdout();
    write!(stdout, "{} [y/N] ", prompt)?;
    stdout.flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    let answer = answer.trim();
    Ok(answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes"))
}

pub async fn dispatch(office: &Office, command: Command) -> ApiResult<()> {
    debug!(?command, "Dispatching command");

    match command {
        Command::Client(cmd) => match cmd {
            ClientCommand::Add { name, detail, fee } => {
                let created = client::add_client(
                    office,
                    NewClient {
                        name,
                        detail,
                        initial_fee: fee,
                    },
                )?;
                println!("✓ Client {} created ({})", created.name, created.id);
            }
            ClientCommand::List { json } => {
                let clients = client::list_clients(office);
                print_json_or(json, &clients, |c| render::client_list(c))?;
            }
            ClientCommand::Delete { id } => {
                let removed = client::delete_client(office, &id)?;
                println!("✓ Client {} deleted", removed.name);
            }
            ClientCommand::Open { index } => {
                client::open_client(office, index)?;
                print!("{}", render::ledger(&ledger::show_ledger(office, Some(index))?));
            }
            ClientCommand::Close => {
                client::close_client(office)?;
                println!("✓ Ledger closed");
            }
        },

        Command::Ledger(cmd) => match cmd {
            LedgerCommand::Show { client, json } => {
                let view = ledger::show_ledger(office, client)?;
                print_json_or(json, &view, render::ledger)?;
            }
            LedgerCommand::Add {
                desc,
                amt,
                date,
                client,
            } => {
                let view = ledger::add_entry(office, client, NewLedgerEntry { date, desc, amt })?;
                print!("{}", render::ledger(&view));
            }
            LedgerCommand::Delete { position, client } => {
                let view = ledger::delete_entry(office, client, position)?;
                print!("{}", render::ledger(&view));
            }
            LedgerCommand::Statement { client, json } => {
                let doc = ledger::statement(office, client)?;
                print_document(office, &doc, json)?;
            }
        },

        Command::Pjs(cmd) => match cmd {
            PjsCommand::Add {
                name,
                amount,
                detail,
                date,
            } => {
                let record = pjs::add_pjs(
                    office,
                    NewPjsRecord {
                        date,
                        name,
                        detail,
                        amount,
                    },
                )?;
                println!("✓ Recorded {} {} ({})", record.name, record.amount, record.id);
            }
            PjsCommand::List { sort, json } => {
                let order = sort
                    .into_iter()
                    .fold(PjsSort::default(), |order, column| order.toggle(column.into()));
                let records = pjs::list_pjs(office, order);
                print_json_or(json, &records, |r| render::pjs_list(r))?;
            }
            PjsCommand::Delete { id } => {
                let removed = pjs::delete_pjs(office, &id)?;
                println!("✓ Record {} deleted", removed.name);
            }
            PjsCommand::Monthly { year, json } => {
                let year = year.unwrap_or_else(|| office.today().year());
                let summary = pjs::monthly_summary(office, year);
                print_json_or(json, &summary, render::monthly)?;
            }
        },

        Command::Service(cmd) => match cmd {
            ServiceCommand::Add { name, price } => {
                let item = service::add_service(office, NewServiceItem { name, price })?;
                println!("✓ Service {} at {} ({})", item.name, item.price, item.id);
            }
            ServiceCommand::List { json } => {
                let items = service::list_services(office);
                print_json_or(json, &items, |i| render::service_list(i))?;
            }
            ServiceCommand::Delete { id } => {
                let removed = service::delete_service(office, &id)?;
                println!("✓ Service {} deleted", removed.name);
            }
        },

        Command::Invoice(args) => {
            let doc = invoice::issue_invoice(
                office,
                InvoiceRequest {
                    customer: args.customer,
                    services: args.services,
                    lines: args.lines,
                    date: args.date,
                },
            )?;
            print_document(office, &doc, args.json)?;
        }

        Command::Export { kind, out } => {
            let path = transfer::export_to_file(office, kind, out).await?;
            println!("✓ Exported {} to {}", kind, path.display());
        }

        Command::Import { kind, file, yes } => {
            let pending = transfer::read_import(office, kind, &file).await?;
            let prompt = format!(
                "Replace all {} with {} records from {}?",
                kind,
                pending.len(),
                file.display()
            );
            if !yes && !confirm(&prompt)? {
                info!(%kind, "Import declined");
                return Err(ApiError::new(ErrorCode::Cancelled, "Import cancelled"));
            }
            let count = transfer::apply_import(office, pending)?;
            println!("✓ Imported {} {} records", count, kind);
        }

        Command::Logo(cmd) => match cmd {
            LogoCommand::Set { file } => {
                logo::set_logo(office, &file).await?;
                println!("✓ Logo updated from {}", file.display());
            }
            LogoCommand::Clear => {
                logo::clear_logo(office)?;
                println!("✓ Logo reset to default");
            }
            LogoCommand::Show => println!("{}", logo::effective_logo(office)),
        },

        Command::View { key } => {
            let selected = view::set_view(office, &key)?;
            println!("✓ View: {}", selected.key());
        }
    }

    Ok(())
}
