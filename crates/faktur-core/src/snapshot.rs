//! # Document Snapshot
//!
//! The whole document as one JSON value, written on every edit and read
//! once on startup.
//!
//! ## Stored Shape
//! ```text
//! {
//!   "companyName": "...", ..., "signerName": "...",   ← DocumentFields, flattened
//!   "items":    [ { "name", "desc", "qty", "price", "disc", "tax" }, ... ],
//!   "labels":   { "from": "...", ..., "lGrand": "..." },
//!   "settings": { "showDisc": true, "showTax": true }
//! }
//! ```
//!
//! ## Restore Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  key                 │ absent        │ present                           │
//! │──────────────────────┼───────────────┼───────────────────────────────────│
//! │  text field          │ keep default  │ value, or default when empty      │
//! │  invoiceDate/dueDate │ keep today    │ value, or today when empty        │
//! │  items               │ keep default  │ lenient items, [] → one default   │
//! │  labels              │ keep defaults │ per key: value or default         │
//! │  settings            │ keep defaults │ per flag: value, missing → false  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Restoring never fails on shape: only text that is not JSON at all is
//! reported, and the caller keeps its defaults in that case.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::CoreResult;
use crate::types::{DocumentField, DocumentFields, LabelKey, Labels, LineItem, Settings};

/// Everything persisted under the document key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentSnapshot {
    #[serde(flatten)]
    pub fields: DocumentFields,
    pub items: Vec<LineItem>,
    pub labels: Labels,
    pub settings: Settings,
}

impl DocumentSnapshot {
    /// Encodes the snapshot as JSON text.
    pub fn to_json(&self) -> CoreResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Applies stored JSON on top of `base`.
    ///
    /// `base` carries the compiled-in defaults (with today's dates); every
    /// key missing or empty in `json` keeps its base value.
    ///
    /// ## Errors
    /// `CoreError::Snapshot` when `json` is not JSON. A JSON value of the
    /// wrong shape (array, string, ...) restores as `base` unchanged.
    pub fn restore(json: &str, base: DocumentSnapshot) -> CoreResult<DocumentSnapshot> {
        let value: Value = serde_json::from_str(json)?;
        let Some(root) = value.as_object() else {
            return Ok(base);
        };

        let mut snapshot = base;
        snapshot.apply_fields(root);
        snapshot.apply_items(root);
        if let Some(labels) = root.get("labels").and_then(Value::as_object) {
            snapshot.apply_labels(labels);
        }
        if let Some(settings) = root.get("settings").and_then(Value::as_object) {
            snapshot.settings = Settings {
                show_disc: flag(settings, "showDisc"),
                show_tax: flag(settings, "showTax"),
            };
        }
        Ok(snapshot)
    }

    fn apply_fields(&mut self, root: &Map<String, Value>) {
        for field in DocumentField::ALL {
            if let Some(text) = root.get(field.element_id()).and_then(non_empty_text) {
                self.fields.set(field, text);
            }
        }
    }

    fn apply_items(&mut self, root: &Map<String, Value>) {
        let Some(Value::Array(raw)) = root.get("items") else {
            return;
        };

        let items: Vec<LineItem> = raw
            .iter()
            .filter(|v| v.is_object())
            .filter_map(|v| serde_json::from_value(v.clone()).ok())
            .collect();

        self.items = if items.is_empty() {
            vec![LineItem::default()]
        } else {
            items
        };
    }

    fn apply_labels(&mut self, stored: &Map<String, Value>) {
        let mut labels = Labels::default();
        for key in LabelKey::ALL {
            if let Some(text) = stored.get(key.storage_key()).and_then(non_empty_text) {
                labels.set(key, text);
            }
        }
        self.labels = labels;
    }
}

/// A stored value as field text; empty strings, null and non-scalars count as missing.
fn non_empty_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn flag(settings: &Map<String, Value>, key: &str) -> bool {
    settings.get(key).and_then(Value::as_bool).unwrap_or(false)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn base() -> DocumentSnapshot {
        let today = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        DocumentSnapshot {
            fields: DocumentFields::dated(today),
            items: vec![LineItem::default()],
            labels: Labels::default(),
            settings: Settings::default(),
        }
    }

    #[test]
    fn test_round_trip() {
        let mut snapshot = base();
        snapshot.fields.company_name = "PT Maju Jaya".to_string();
        snapshot.fields.notes = "Transfer BCA 123".to_string();
        snapshot.items = vec![
            LineItem {
                name: "Jasa Desain".to_string(),
                qty: 2.0,
                price: 100_000.0,
                disc: 10.0,
                tax: 11.0,
                ..LineItem::default()
            },
            LineItem::default(),
        ];
        snapshot.labels.set(LabelKey::Title, "FAKTUR");
        snapshot.settings.show_tax = false;

        let json = snapshot.to_json().unwrap();
        let restored = DocumentSnapshot::restore(&json, base()).unwrap();
        assert_eq!(restored, snapshot);
    }

    #[test]
    fn test_snapshot_keys_are_flat_camel_case() {
        let json = base().to_json().unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["invoiceNo"], "INV/2026/001");
        assert_eq!(value["invoiceDate"], "2026-03-01");
        assert_eq!(value["dueDate"], "2026-03-31");
        assert_eq!(value["items"].as_array().unwrap().len(), 1);
        assert_eq!(value["labels"]["hTotal"], "Total");
        assert_eq!(value["settings"]["showDisc"], true);
    }

    #[test]
    fn test_empty_strings_fall_back_to_defaults() {
        let json = r#"{"invoiceNo":"","signerName":"","invoiceDate":"","companyName":"Toko A"}"#;
        let restored = DocumentSnapshot::restore(json, base()).unwrap();

        assert_eq!(restored.fields.invoice_no, "INV/2026/001");
        assert_eq!(restored.fields.signer_name, "Admin Keuangan");
        assert_eq!(restored.fields.invoice_date, "2026-03-01");
        assert_eq!(restored.fields.company_name, "Toko A");
    }

    #[test]
    fn test_missing_sections_keep_defaults() {
        let restored = DocumentSnapshot::restore(r#"{"clientName":"Budi"}"#, base()).unwrap();

        assert_eq!(restored.fields.client_name, "Budi");
        assert_eq!(restored.items, vec![LineItem::default()]);
        assert_eq!(restored.labels, Labels::default());
        assert_eq!(restored.settings, Settings::default());
    }

    #[test]
    fn test_empty_item_list_loads_one_default() {
        let restored = DocumentSnapshot::restore(r#"{"items":[]}"#, base()).unwrap();
        assert_eq!(restored.items, vec![LineItem::default()]);
    }

    #[test]
    fn test_partial_labels_fill_in_defaults() {
        let json = r#"{"labels":{"title":"KWITANSI","lGrand":""}}"#;
        let restored = DocumentSnapshot::restore(json, base()).unwrap();

        assert_eq!(restored.labels.get(LabelKey::Title), "KWITANSI");
        assert_eq!(restored.labels.get(LabelKey::GrandTotal), "Total Tagihan");
        assert_eq!(restored.labels.get(LabelKey::From), "Dari (Perusahaan)");
    }

    #[test]
    fn test_settings_missing_flag_reads_false() {
        let restored =
            DocumentSnapshot::restore(r#"{"settings":{"showDisc":true}}"#, base()).unwrap();
        assert!(restored.settings.show_disc);
        assert!(!restored.settings.show_tax);
    }

    #[test]
    fn test_old_snapshot_with_string_numbers() {
        let json = r#"{"items":[{"name":"Kopi","qty":"2","price":15000}]}"#;
        let restored = DocumentSnapshot::restore(json, base()).unwrap();

        let item = &restored.items[0];
        assert_eq!(item.name, "Kopi");
        assert_eq!(item.qty, 2.0);
        assert_eq!(item.price, 15_000.0);
        assert!(item.disc.is_nan());
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(DocumentSnapshot::restore("{oops", base()).is_err());
    }

    #[test]
    fn test_non_object_json_keeps_base() {
        let restored = DocumentSnapshot::restore("[1,2,3]", base()).unwrap();
        assert_eq!(restored, base());
    }
}
