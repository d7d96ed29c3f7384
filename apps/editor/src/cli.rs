//! # Command Line
//!
//! One invocation runs one action against the stored document, then prints
//! the result.
//!
//! ```text
//! faktur                                  show the document
//! faktur add-item
//! faktur set-item 1 price 150000          rows are numbered from 1
//! faktur set client-name "CV Sinar"
//! faktur label lGrand "Jumlah"
//! faktur column tax off
//! faktur logo ./logo.png
//! faktur export --out ~/Invoices
//! faktur clear --yes
//! ```

use std::path::PathBuf;

use chrono::Local;
use clap::{Parser, Subcommand, ValueEnum};
use comfy_table::{Attribute, Cell, CellAlignment, Table};
use tracing::info;

use faktur_core::LabelKey;
use faktur_db::{Database, DbConfig};

use crate::commands::{document, export, item, DocumentResponse};
use crate::dialogs::{AssumeYes, Dialogs, TerminalDialogs};
use crate::error::ApiError;
use crate::export::{DirectoryDownloader, ExportGateway, WireframeRasterizer};
use crate::state::{AppConfig, Editor, EditorState};
use crate::surface::MemorySurface;

#[derive(Parser, Debug)]
#[command(name = "faktur", version, about = "Edit a single invoice and export it as PDF")]
pub struct Cli {
    /// Config file (default: platform config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// SQLite database file, overriding the config
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Print the items table and totals
    Show {
        /// Print the document as JSON instead
        #[arg(long)]
        json: bool,
    },
    /// Append an empty row
    AddItem,
    /// Remove a row (the last row always stays)
    RemoveItem { row: usize },
    /// Set one cell: name, desc, qty, price, disc or tax
    SetItem {
        row: usize,
        field: String,
        value: String,
    },
    /// Set a document field, e.g. client-name or invoiceNo
    Set { field: String, value: String },
    /// Set a caption, e.g. lGrand or labelGrandTotal
    Label { key: String, text: String },
    /// Show or hide the discount or tax column
    Column { column: String, state: Toggle },
    /// Use an image file as the logo
    Logo { path: PathBuf },
    /// Export the invoice as a one-page PDF
    Export {
        /// Output directory (default: from config)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Delete the stored document and logo
    Clear {
        /// Do not ask for confirmation
        #[arg(long, short)]
        yes: bool,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    On,
    Off,
}

/// Shown row numbers start at 1. Row 0 maps past the end, which the
/// editor treats as a no-op.
pub fn row_index(row: usize) -> usize {
    row.checked_sub(1).unwrap_or(usize::MAX)
}

/// Opens the document, runs the command, closes storage.
pub async fn execute(cli: Cli) -> Result<(), ApiError> {
    let mut config = AppConfig::load(cli.config)?;
    if let Some(path) = cli.db {
        config.storage.database_path = Some(path);
    }
    let command = cli.command.unwrap_or(Command::Show { json: false });

    let db_path = config.database_path();
    if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    info!(path = %db_path.display(), "Opening document store");
    let db_config = DbConfig::new(db_path).max_value_bytes(config.storage.quota_bytes);
    let db = Database::new(db_config).await?;

    let dialogs: Box<dyn Dialogs + Send> = match command {
        Command::Clear { yes: true } => Box::new(AssumeYes),
        _ => Box::new(TerminalDialogs),
    };
    let editor = Editor::open(
        MemorySurface::from_template(),
        dialogs,
        db.documents(),
        Local::now().date_naive(),
    )
    .await;
    let state = EditorState::new(editor);

    let outcome = dispatch(command, &state, &config).await;
    db.close().await;
    outcome
}

async fn dispatch(
    command: Command,
    state: &EditorState<MemorySurface>,
    config: &AppConfig,
) -> Result<(), ApiError> {
    match command {
        Command::Show { json } => print_document(&item::get_document(state).await, json)?,
        Command::AddItem => print_document(&item::add_item(state).await?, false)?,
        Command::RemoveItem { row } => {
            print_document(&item::remove_item(state, row_index(row)).await?, false)?
        }
        Command::SetItem { row, field, value } => print_document(
            &item::update_item(state, row_index(row), &field, &value).await?,
            false,
        )?,
        Command::Set { field, value } => {
            print_document(&document::set_field(state, &field, &value).await?, false)?
        }
        Command::Label { key, text } => {
            print_document(&document::set_label(state, &key, &text).await?, false)?
        }
        Command::Column { column, state: toggle } => print_document(
            &document::set_column(state, &column, toggle == Toggle::On).await?,
            false,
        )?,
        Command::Logo { path } => {
            document::upload_logo(state, &path).await?;
            println!("Logo set from {}", path.display());
        }
        Command::Export { out } => {
            let dir = out.unwrap_or_else(|| config.export.output_dir.clone());
            let gateway = ExportGateway::new(
                WireframeRasterizer::new(),
                DirectoryDownloader::new(dir),
                config.export.options(),
            );
            let response = export::export_pdf(&gateway, state).await?;
            println!(
                "Saved {} ({} bytes)",
                response.path.display(),
                response.size_bytes
            );
        }
        Command::Clear { .. } => {
            let response = document::clear_document(state).await?;
            if response.cleared {
                println!("Document cleared");
            } else {
                println!("Nothing was cleared");
            }
        }
    }
    Ok(())
}

fn print_document(doc: &DocumentResponse, json: bool) -> Result<(), ApiError> {
    if json {
        let text = serde_json::to_string_pretty(doc)
            .map_err(|e| ApiError::internal(format!("Could not encode document: {}", e)))?;
        println!("{}", text);
    } else {
        println!(
            "{} {}",
            doc.labels.get(LabelKey::Title),
            doc.fields.invoice_no
        );
        println!("{table}", table = items_table(doc));
        println!("{table}", table = totals_table(doc));
    }
    Ok(())
}

fn items_table(doc: &DocumentResponse) -> Table {
    let show_disc = doc.settings.show_disc;
    let show_tax = doc.settings.show_tax;
    let label = |key| Cell::new(doc.labels.get(key)).add_attribute(Attribute::Bold);

    let mut header = vec![
        Cell::new("#").add_attribute(Attribute::Bold),
        label(LabelKey::HeaderItem),
        label(LabelKey::HeaderDesc),
        label(LabelKey::HeaderQty),
        label(LabelKey::HeaderPrice),
    ];
    if show_disc {
        header.push(label(LabelKey::HeaderDisc));
    }
    if show_tax {
        header.push(label(LabelKey::HeaderTax));
    }
    header.push(label(LabelKey::HeaderTotal));

    let mut table = Table::new();
    table.set_header(header);

    for row in &doc.items {
        let mut cells = vec![
            Cell::new(row.index + 1),
            Cell::new(&row.name),
            Cell::new(&row.desc),
            Cell::new(&row.qty).set_alignment(CellAlignment::Right),
            Cell::new(&row.price).set_alignment(CellAlignment::Right),
        ];
        if show_disc {
            cells.push(Cell::new(&row.disc).set_alignment(CellAlignment::Right));
        }
        if show_tax {
            cells.push(Cell::new(&row.tax).set_alignment(CellAlignment::Right));
        }
        cells.push(Cell::new(&row.total).set_alignment(CellAlignment::Right));
        table.add_row(cells);
    }
    table
}

fn totals_table(doc: &DocumentResponse) -> Table {
    let mut table = Table::new();
    let mut line = |key: LabelKey, value: &str, bold: bool| {
        let mut caption = Cell::new(doc.labels.get(key));
        let mut amount = Cell::new(value).set_alignment(CellAlignment::Right);
        if bold {
            caption = caption.add_attribute(Attribute::Bold);
            amount = amount.add_attribute(Attribute::Bold);
        }
        table.add_row(vec![caption, amount]);
    };

    line(LabelKey::Subtotal, &doc.totals.subtotal, false);
    if doc.settings.show_disc {
        line(LabelKey::TotalDisc, &doc.totals.total_discount, false);
    }
    if doc.settings.show_tax {
        line(LabelKey::TotalTax, &doc.totals.total_tax, false);
    }
    line(LabelKey::GrandTotal, &doc.totals.grand_total, true);
    table
}

// =============================================================================
// Unit Tests
// =============================================================================
