//! # Commands Module
//!
//! Every action the host can run against the open editor.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (shared response types)
//! ├── item.rs      ◄─── Line item rows
//! ├── document.rs  ◄─── Fields, labels, columns, logo, clear
//! └── export.rs    ◄─── PDF export
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  faktur set-item 1 price 150000                                         │
//! │         │                                                               │
//! │         │ (clap)                                                        │
//! │         ▼                                                               │
//! │  commands::item::update_item(                                           │
//! │      &state,              ◄── EditorState, opened at startup            │
//! │      0,                   ◄── row index, zero-based                     │
//! │      "price",             ◄── parsed here into ItemField                │
//! │      "150000",                                                          │
//! │  ) -> Result<DocumentResponse, ApiError>                                │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  CLI prints the table, or the error on stderr                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Names arrive as text and are parsed here, so a typo is a
//! `VALIDATION_ERROR` instead of a silent no-op.

pub mod document;
pub mod export;
pub mod item;

use serde::Serialize;

use faktur_core::{DocumentFields, ItemField, Labels, LineAmounts, Settings};

use crate::state::Editor;
use crate::surface::Surface;

/// One item row, formatted for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRow {
    pub index: usize,
    pub name: String,
    pub desc: String,
    pub qty: String,
    pub price: String,
    pub disc: String,
    pub tax: String,
    pub total: String,
}

/// The summary block, formatted for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalsView {
    pub subtotal: String,
    pub total_discount: String,
    pub total_tax: String,
    pub grand_total: String,
}

/// The whole document as the host shows it after a command.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentResponse {
    pub items: Vec<ItemRow>,
    pub totals: TotalsView,
    pub fields: DocumentFields,
    pub labels: Labels,
    pub settings: Settings,
    pub has_logo: bool,
}

impl<S: Surface> From<&Editor<S>> for DocumentResponse {
    fn from(editor: &Editor<S>) -> Self {
        let format = editor.format();
        let items = editor
            .items()
            .iter()
            .enumerate()
            .map(|(index, item)| ItemRow {
                index,
                name: item.display_value(ItemField::Name),
                desc: item.display_value(ItemField::Desc),
                qty: item.display_value(ItemField::Qty),
                price: item.display_value(ItemField::Price),
                disc: item.display_value(ItemField::Disc),
                tax: item.display_value(ItemField::Tax),
                total: format.format(LineAmounts::of(item).total),
            })
            .collect();

        let totals = editor.totals();
        DocumentResponse {
            items,
            totals: TotalsView {
                subtotal: format.format(totals.subtotal),
                total_discount: format.format_deduction(totals.total_discount),
                total_tax: format.format(totals.total_tax),
                grand_total: format.format(totals.grand_total),
            },
            fields: editor.fields().clone(),
            labels: editor.labels().clone(),
            settings: editor.settings(),
            has_logo: editor.logo().is_some(),
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::NaiveDate;
    use faktur_db::{Database, DbConfig};

    use crate::dialogs::ScriptedDialogs;
    use crate::state::{Editor, EditorState};
    use crate::surface::MemorySurface;

    pub async fn open_state(dialogs: ScriptedDialogs) -> (Database, EditorState<MemorySurface>) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let editor = Editor::open(
            MemorySurface::from_template(),
            Box::new(dialogs),
            db.documents(),
            NaiveDate::from_ymd_opt(2026, 5, 4).unwrap(),
        )
        .await;
        (db, EditorState::new(editor))
    }
}
