//! # Domain Types
//!
//! Core domain types of the invoice document.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    LineItem     │   │ DocumentFields  │   │     Labels      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  name, desc     │   │  company*       │   │  21 overrides   │       │
//! │  │  qty, price     │   │  client*        │   │  keyed by       │       │
//! │  │  disc %, tax %  │   │  invoiceNo/date │   │  LabelKey       │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   ItemField     │   │ DocumentField   │   │    Settings     │       │
//! │  │  (row binding)  │   │ (input binding) │   │  showDisc       │       │
//! │  └─────────────────┘   └─────────────────┘   │  showTax        │       │
//! │                                              └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Element Identity
//! Every bindable value knows the element id the rendering surface uses
//! for it (`companyName`, `labelFrom`, `showDisc`, ...). The ids are the
//! contract with the template; renaming one breaks the binding.

use std::fmt;
use std::str::FromStr;

use chrono::{Days, NaiveDate};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::error::CoreError;
use crate::validation::parse_float;

/// Invoice number used until the user types one.
pub const DEFAULT_INVOICE_NO: &str = "INV/2026/001";

/// Signer shown under the signature line until the user types one.
pub const DEFAULT_SIGNER_NAME: &str = "Admin Keuangan";

/// Days between the invoice date and the default due date.
pub const DEFAULT_PAYMENT_TERM_DAYS: u64 = 30;

// =============================================================================
// Item Field
// =============================================================================

/// One editable cell of a line item row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemField {
    Name,
    Desc,
    Qty,
    Price,
    Disc,
    Tax,
}

impl ItemField {
    /// All fields in column order.
    pub const ALL: [ItemField; 6] = [
        ItemField::Name,
        ItemField::Desc,
        ItemField::Qty,
        ItemField::Price,
        ItemField::Disc,
        ItemField::Tax,
    ];

    /// Key used in the persisted JSON and in row bindings.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ItemField::Name => "name",
            ItemField::Desc => "desc",
            ItemField::Qty => "qty",
            ItemField::Price => "price",
            ItemField::Disc => "disc",
            ItemField::Tax => "tax",
        }
    }

    /// Numeric fields are coerced with `parse_float` on edit.
    pub const fn is_numeric(&self) -> bool {
        !matches!(self, ItemField::Name | ItemField::Desc)
    }
}

impl fmt::Display for ItemField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemField {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" | "item" => Ok(ItemField::Name),
            "desc" | "description" => Ok(ItemField::Desc),
            "qty" | "quantity" => Ok(ItemField::Qty),
            "price" => Ok(ItemField::Price),
            "disc" | "discount" => Ok(ItemField::Disc),
            "tax" => Ok(ItemField::Tax),
            _ => Err(CoreError::UnknownField(s.to_string())),
        }
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// One billable row of the invoice.
///
/// ## Numeric Fields
/// `qty`, `price`, `disc` and `tax` are plain doubles and may hold `NaN`
/// after a non-numeric edit. Nothing here rejects that; the totals
/// calculator treats `NaN` as zero.
///
/// ## Persistence
/// `NaN` serializes as JSON `null`. On the way back in, `null`, a missing
/// key, or a non-numeric value all become `NaN` again, and numeric
/// strings are coerced, so hand-edited or older snapshots still load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: String,

    #[serde(default, deserialize_with = "lenient_text")]
    pub desc: String,

    #[serde(default = "missing_number", deserialize_with = "lenient_number")]
    pub qty: f64,

    #[serde(default = "missing_number", deserialize_with = "lenient_number")]
    pub price: f64,

    /// Discount in percent (0-100).
    #[serde(default = "missing_number", deserialize_with = "lenient_number")]
    pub disc: f64,

    /// Tax in percent (0-100), applied after the discount.
    #[serde(default = "missing_number", deserialize_with = "lenient_number")]
    pub tax: f64,
}

impl Default for LineItem {
    fn default() -> Self {
        LineItem {
            name: String::new(),
            desc: String::new(),
            qty: 1.0,
            price: 0.0,
            disc: 0.0,
            tax: 0.0,
        }
    }
}

impl LineItem {
    /// Overwrites one field from raw input text.
    ///
    /// Text fields keep the raw text; numeric fields store
    /// `parse_float(raw)`, which may be `NaN`.
    pub fn set(&mut self, field: ItemField, raw: &str) {
        match field {
            ItemField::Name => self.name = raw.to_string(),
            ItemField::Desc => self.desc = raw.to_string(),
            ItemField::Qty => self.qty = parse_float(raw),
            ItemField::Price => self.price = parse_float(raw),
            ItemField::Disc => self.disc = parse_float(raw),
            ItemField::Tax => self.tax = parse_float(raw),
        }
    }

    /// Returns the field as the text an input element would show.
    pub fn display_value(&self, field: ItemField) -> String {
        match field {
            ItemField::Name => self.name.clone(),
            ItemField::Desc => self.desc.clone(),
            ItemField::Qty => number_text(self.qty),
            ItemField::Price => number_text(self.price),
            ItemField::Disc => number_text(self.disc),
            ItemField::Tax => number_text(self.tax),
        }
    }
}

/// Numeric input text: `NaN` shows as an empty box, integers without `.0`.
fn number_text(value: f64) -> String {
    if value.is_nan() {
        String::new()
    } else {
        format!("{}", value)
    }
}

fn missing_number() -> f64 {
    f64::NAN
}

fn lenient_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(f64::NAN),
        Some(Value::String(s)) => parse_float(&s),
        _ => f64::NAN,
    })
}

fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    })
}

// =============================================================================
// Column
// =============================================================================

/// Optional item table columns that can be hidden.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Discount,
    Tax,
}

impl Column {
    pub const ALL: [Column; 2] = [Column::Discount, Column::Tax];

    /// Class carried by every cell of the column.
    pub const fn cell_class(&self) -> &'static str {
        match self {
            Column::Discount => "column-disc",
            Column::Tax => "column-tax",
        }
    }

    /// Checkbox that toggles the column.
    pub const fn toggle_id(&self) -> &'static str {
        match self {
            Column::Discount => "showDisc",
            Column::Tax => "showTax",
        }
    }

    /// Header input; its parent cell is what gets hidden.
    pub const fn header_id(&self) -> &'static str {
        match self {
            Column::Discount => "headerDisc",
            Column::Tax => "headerTax",
        }
    }

    /// Summary row under the table.
    pub const fn summary_row_id(&self) -> &'static str {
        match self {
            Column::Discount => "rowTotalDisc",
            Column::Tax => "rowTotalTax",
        }
    }
}

impl FromStr for Column {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "disc" | "discount" => Ok(Column::Discount),
            "tax" => Ok(Column::Tax),
            _ => Err(CoreError::UnknownField(s.to_string())),
        }
    }
}

// =============================================================================
// Document Fields
// =============================================================================

/// A free-text input of the document header, parties, or footer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentField {
    CompanyName,
    CompanyAddress,
    CompanyPhone,
    CompanyEmail,
    ClientName,
    ClientAddress,
    ClientContact,
    InvoiceNo,
    InvoiceDate,
    DueDate,
    Notes,
    SignerName,
}

impl DocumentField {
    pub const ALL: [DocumentField; 12] = [
        DocumentField::CompanyName,
        DocumentField::CompanyAddress,
        DocumentField::CompanyPhone,
        DocumentField::CompanyEmail,
        DocumentField::ClientName,
        DocumentField::ClientAddress,
        DocumentField::ClientContact,
        DocumentField::InvoiceNo,
        DocumentField::InvoiceDate,
        DocumentField::DueDate,
        DocumentField::Notes,
        DocumentField::SignerName,
    ];

    /// Element id on the surface; also the key in the persisted JSON.
    pub const fn element_id(&self) -> &'static str {
        match self {
            DocumentField::CompanyName => "companyName",
            DocumentField::CompanyAddress => "companyAddress",
            DocumentField::CompanyPhone => "companyPhone",
            DocumentField::CompanyEmail => "companyEmail",
            DocumentField::ClientName => "clientName",
            DocumentField::ClientAddress => "clientAddress",
            DocumentField::ClientContact => "clientContact",
            DocumentField::InvoiceNo => "invoiceNo",
            DocumentField::InvoiceDate => "invoiceDate",
            DocumentField::DueDate => "dueDate",
            DocumentField::Notes => "notes",
            DocumentField::SignerName => "signerName",
        }
    }
}

impl FromStr for DocumentField {
    type Err = CoreError;

    /// Accepts the element id (`companyName`) or its kebab form (`company-name`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_ascii_lowercase();

        DocumentField::ALL
            .into_iter()
            .find(|f| f.element_id().to_ascii_lowercase() == wanted)
            .ok_or_else(|| CoreError::UnknownField(s.to_string()))
    }
}

/// Values of every [`DocumentField`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DocumentFields {
    pub company_name: String,
    pub company_address: String,
    pub company_phone: String,
    pub company_email: String,
    pub client_name: String,
    pub client_address: String,
    pub client_contact: String,
    pub invoice_no: String,
    pub invoice_date: String,
    pub due_date: String,
    pub notes: String,
    pub signer_name: String,
}

impl Default for DocumentFields {
    fn default() -> Self {
        DocumentFields {
            company_name: String::new(),
            company_address: String::new(),
            company_phone: String::new(),
            company_email: String::new(),
            client_name: String::new(),
            client_address: String::new(),
            client_contact: String::new(),
            invoice_no: DEFAULT_INVOICE_NO.to_string(),
            invoice_date: String::new(),
            due_date: String::new(),
            notes: String::new(),
            signer_name: DEFAULT_SIGNER_NAME.to_string(),
        }
    }
}

impl DocumentFields {
    /// Compiled-in defaults with the invoice date set to `today` and the
    /// due date [`DEFAULT_PAYMENT_TERM_DAYS`] later.
    pub fn dated(today: NaiveDate) -> Self {
        let due = today
            .checked_add_days(Days::new(DEFAULT_PAYMENT_TERM_DAYS))
            .unwrap_or(today);

        DocumentFields {
            invoice_date: today.format("%Y-%m-%d").to_string(),
            due_date: due.format("%Y-%m-%d").to_string(),
            ..DocumentFields::default()
        }
    }

    pub fn get(&self, field: DocumentField) -> &str {
        match field {
            DocumentField::CompanyName => &self.company_name,
            DocumentField::CompanyAddress => &self.company_address,
            DocumentField::CompanyPhone => &self.company_phone,
            DocumentField::CompanyEmail => &self.company_email,
            DocumentField::ClientName => &self.client_name,
            DocumentField::ClientAddress => &self.client_address,
            DocumentField::ClientContact => &self.client_contact,
            DocumentField::InvoiceNo => &self.invoice_no,
            DocumentField::InvoiceDate => &self.invoice_date,
            DocumentField::DueDate => &self.due_date,
            DocumentField::Notes => &self.notes,
            DocumentField::SignerName => &self.signer_name,
        }
    }

    pub fn set(&mut self, field: DocumentField, value: impl Into<String>) {
        let slot = match field {
            DocumentField::CompanyName => &mut self.company_name,
            DocumentField::CompanyAddress => &mut self.company_address,
            DocumentField::CompanyPhone => &mut self.company_phone,
            DocumentField::CompanyEmail => &mut self.company_email,
            DocumentField::ClientName => &mut self.client_name,
            DocumentField::ClientAddress => &mut self.client_address,
            DocumentField::ClientContact => &mut self.client_contact,
            DocumentField::InvoiceNo => &mut self.invoice_no,
            DocumentField::InvoiceDate => &mut self.invoice_date,
            DocumentField::DueDate => &mut self.due_date,
            DocumentField::Notes => &mut self.notes,
            DocumentField::SignerName => &mut self.signer_name,
        };
        *slot = value.into();
    }
}

// =============================================================================
// Labels
// =============================================================================

/// A user-editable caption on the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LabelKey {
    From,
    To,
    Title,
    Subtitle,
    InvoiceNo,
    Date,
    Due,
    Notes,
    HeaderItem,
    HeaderDesc,
    HeaderQty,
    HeaderPrice,
    HeaderDisc,
    HeaderTax,
    HeaderTotal,
    Recipient,
    Sender,
    Subtotal,
    TotalDisc,
    TotalTax,
    GrandTotal,
}

impl LabelKey {
    pub const ALL: [LabelKey; 21] = [
        LabelKey::From,
        LabelKey::To,
        LabelKey::Title,
        LabelKey::Subtitle,
        LabelKey::InvoiceNo,
        LabelKey::Date,
        LabelKey::Due,
        LabelKey::Notes,
        LabelKey::HeaderItem,
        LabelKey::HeaderDesc,
        LabelKey::HeaderQty,
        LabelKey::HeaderPrice,
        LabelKey::HeaderDisc,
        LabelKey::HeaderTax,
        LabelKey::HeaderTotal,
        LabelKey::Recipient,
        LabelKey::Sender,
        LabelKey::Subtotal,
        LabelKey::TotalDisc,
        LabelKey::TotalTax,
        LabelKey::GrandTotal,
    ];

    /// Key inside the persisted `labels` object.
    pub const fn storage_key(&self) -> &'static str {
        match self {
            LabelKey::From => "from",
            LabelKey::To => "to",
            LabelKey::Title => "title",
            LabelKey::Subtitle => "subtitle",
            LabelKey::InvoiceNo => "invNo",
            LabelKey::Date => "date",
            LabelKey::Due => "due",
            LabelKey::Notes => "notes",
            LabelKey::HeaderItem => "hItem",
            LabelKey::HeaderDesc => "hDesc",
            LabelKey::HeaderQty => "hQty",
            LabelKey::HeaderPrice => "hPrice",
            LabelKey::HeaderDisc => "hDisc",
            LabelKey::HeaderTax => "hTax",
            LabelKey::HeaderTotal => "hTotal",
            LabelKey::Recipient => "recipient",
            LabelKey::Sender => "sender",
            LabelKey::Subtotal => "lSub",
            LabelKey::TotalDisc => "lDisc",
            LabelKey::TotalTax => "lTax",
            LabelKey::GrandTotal => "lGrand",
        }
    }

    /// Input element holding the caption.
    pub const fn element_id(&self) -> &'static str {
        match self {
            LabelKey::From => "labelFrom",
            LabelKey::To => "labelTo",
            LabelKey::Title => "labelInvoiceTitle",
            LabelKey::Subtitle => "labelInvoiceSubtitle",
            LabelKey::InvoiceNo => "labelInvoiceNo",
            LabelKey::Date => "labelDate",
            LabelKey::Due => "labelDue",
            LabelKey::Notes => "labelNotes",
            LabelKey::HeaderItem => "headerItem",
            LabelKey::HeaderDesc => "headerDesc",
            LabelKey::HeaderQty => "headerQty",
            LabelKey::HeaderPrice => "headerPrice",
            LabelKey::HeaderDisc => "headerDisc",
            LabelKey::HeaderTax => "headerTax",
            LabelKey::HeaderTotal => "headerTotal",
            LabelKey::Recipient => "labelRecipient",
            LabelKey::Sender => "labelSender",
            LabelKey::Subtotal => "labelSubtotal",
            LabelKey::TotalDisc => "labelTotalDisc",
            LabelKey::TotalTax => "labelTotalTax",
            LabelKey::GrandTotal => "labelGrandTotal",
        }
    }

    pub const fn default_text(&self) -> &'static str {
        match self {
            LabelKey::From => "Dari (Perusahaan)",
            LabelKey::To => "Tagihan Untuk (Klien)",
            LabelKey::Title => "INVOICE",
            LabelKey::Subtitle => "Original Document",
            LabelKey::InvoiceNo => "Nomor Referensi",
            LabelKey::Date => "Tanggal Terbit",
            LabelKey::Due => "Jatuh Tempo",
            LabelKey::Notes => "Catatan / Metode Pembayaran",
            LabelKey::HeaderItem => "Item",
            LabelKey::HeaderDesc => "Deskripsi",
            LabelKey::HeaderQty => "Qty",
            LabelKey::HeaderPrice => "Harga",
            LabelKey::HeaderDisc => "Disc %",
            LabelKey::HeaderTax => "Pajak %",
            LabelKey::HeaderTotal => "Total",
            LabelKey::Recipient => "Penerima",
            LabelKey::Sender => "Hormat Kami",
            LabelKey::Subtotal => "Subtotal",
            LabelKey::TotalDisc => "Total Diskon",
            LabelKey::TotalTax => "Total Pajak",
            LabelKey::GrandTotal => "Total Tagihan",
        }
    }

    fn position(&self) -> usize {
        *self as usize
    }
}

impl FromStr for LabelKey {
    type Err = CoreError;

    /// Accepts the storage key (`invNo`) or the element id (`labelInvoiceNo`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        LabelKey::ALL
            .into_iter()
            .find(|k| {
                k.storage_key().eq_ignore_ascii_case(wanted)
                    || k.element_id().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| CoreError::UnknownLabel(s.to_string()))
    }
}

/// Caption overrides for every [`LabelKey`].
///
/// Serializes as a flat JSON object keyed by [`LabelKey::storage_key`].
#[derive(Debug, Clone, PartialEq)]
pub struct Labels {
    values: Vec<String>,
}

impl Default for Labels {
    fn default() -> Self {
        Labels {
            values: LabelKey::ALL
                .iter()
                .map(|k| k.default_text().to_string())
                .collect(),
        }
    }
}

impl Labels {
    pub fn get(&self, key: LabelKey) -> &str {
        &self.values[key.position()]
    }

    pub fn set(&mut self, key: LabelKey, value: impl Into<String>) {
        self.values[key.position()] = value.into();
    }

    pub fn iter(&self) -> impl Iterator<Item = (LabelKey, &str)> {
        LabelKey::ALL.into_iter().map(move |k| (k, self.get(k)))
    }
}

impl Serialize for Labels {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(LabelKey::ALL.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key.storage_key(), value)?;
        }
        map.end()
    }
}

// =============================================================================
// Settings
// =============================================================================

/// Column visibility flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub show_disc: bool,
    pub show_tax: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            show_disc: true,
            show_tax: true,
        }
    }
}

impl Settings {
    pub fn shows(&self, column: Column) -> bool {
        match column {
            Column::Discount => self.show_disc,
            Column::Tax => self.show_tax,
        }
    }

    pub fn set(&mut self, column: Column, visible: bool) {
        match column {
            Column::Discount => self.show_disc = visible,
            Column::Tax => self.show_tax = visible,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
