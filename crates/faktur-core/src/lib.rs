//! # faktur-core: Pure Invoice Logic for Faktur
//!
//! This crate is the **heart** of the Faktur invoice editor. It holds the
//! document model and every calculation as pure functions with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Faktur Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    faktur CLI (apps/editor)                     │   │
//! │  │    show ──► set-item ──► column ──► export                      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             Editor controller + Renderer + Export               │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ faktur-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   items   │  │  totals   │  │   money   │  │   │
//! │  │   │ LineItem  │  │ ItemList  │  │ Totals    │  │ Currency  │  │   │
//! │  │   │ Labels    │  │           │  │ Amounts   │  │ Format    │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO RENDERING • PURE FUNCTIONS          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    faktur-db (Storage Layer)                    │   │
//! │  │              key-value store over SQLite, migrations            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Document model (LineItem, DocumentFields, Labels, Settings)
//! - [`items`] - The never-empty item list
//! - [`totals`] - Row and document totals
//! - [`money`] - Currency formatting (the only place that rounds)
//! - [`snapshot`] - Persisted JSON shape and lenient restore
//! - [`validation`] - Numeric coercion and file name sanitizing
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use faktur_core::{calculate, CurrencyFormat, ItemField, ItemList};
//!
//! let mut items = ItemList::new();
//! items.update(0, ItemField::Qty, "2");
//! items.update(0, ItemField::Price, "100000");
//! items.update(0, ItemField::Disc, "10");
//! items.update(0, ItemField::Tax, "11");
//!
//! let totals = calculate(items.as_slice());
//! assert_eq!(CurrencyFormat::idr().format(totals.grand_total), "Rp199.800");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod items;
pub mod money;
pub mod snapshot;
pub mod totals;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult};
pub use items::ItemList;
pub use money::CurrencyFormat;
pub use snapshot::DocumentSnapshot;
pub use totals::{calculate, LineAmounts, Totals};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Storage key of the document snapshot.
pub const DOCUMENT_KEY: &str = "faktur_data";

/// Storage key of the logo data URI.
pub const LOGO_KEY: &str = "faktur_logo";

/// Text written into blank notes so the printed box is never empty.
pub const BLANK_NOTES: &str = "-";
