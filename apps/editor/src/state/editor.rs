//! # Editor Controller
//!
//! Owns the one open document and keeps surface and storage in step with it.
//!
//! ## Edit Cycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   EditorEvent ──► mutate model ──► render ──► recompute ──► save        │
//! │                        │                                     │          │
//! │                        │ no-op (bad index,                   │ failure  │
//! │                        ▼ last row)                           ▼          │
//! │                    stop here                            warn! and go on │
//! │                                                                         │
//! │   open / clear:  defaults ──► load logo ──► load document ──► render    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ownership
//! The editor holds every piece of document state itself. Hosts share it
//! through [`EditorState`](super::EditorState); nothing is global.
//!
//! Storage failures during edits are logged and swallowed: the document on
//! screen stays authoritative and the next successful save catches storage
//! up. A failed clear is the exception; it is reported to the caller and
//! the document stays as it was.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::NaiveDate;
use tracing::{debug, error, info, warn};

use faktur_core::validation::{is_blank, sanitize_file_stem};
use faktur_core::{
    calculate, Column, CurrencyFormat, DocumentField, DocumentFields, DocumentSnapshot, ItemField,
    ItemList, LabelKey, Labels, LineItem, Settings, Totals, BLANK_NOTES,
};
use faktur_db::{DbResult, DocumentRepository};

use crate::dialogs::{Dialogs, CLEAR_PROMPT, CONVERTING_LABEL, EXPORT_FAILED_ALERT};
use crate::export::{ExportError, ExportJob, ExportReceipt, ExportTicket, CLONE_CLASS};
use crate::render;
use crate::surface::{ids, Surface};

/// A user action on the document.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    AddItem,
    RemoveItem {
        index: usize,
    },
    UpdateItem {
        index: usize,
        field: ItemField,
        value: String,
    },
    SetField {
        field: DocumentField,
        value: String,
    },
    SetLabel {
        key: LabelKey,
        text: String,
    },
    SetColumn {
        column: Column,
        visible: bool,
    },
    /// Focus left the notes input.
    NotesBlurred,
}

/// Result of [`Editor::clear`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearOutcome {
    Cleared,
    Cancelled,
}

/// The single-document editor.
pub struct Editor<S: Surface> {
    items: ItemList,
    fields: DocumentFields,
    labels: Labels,
    settings: Settings,
    logo: Option<String>,
    today: NaiveDate,
    format: CurrencyFormat,
    surface: S,
    dialogs: Box<dyn Dialogs + Send>,
    documents: DocumentRepository,
    exporting: Arc<AtomicBool>,
}

impl<S: Surface> Editor<S> {
    /// Loads the stored document (or defaults) and renders it.
    ///
    /// Never fails: unreadable storage leaves the defaults in place.
    pub async fn open(
        surface: S,
        dialogs: Box<dyn Dialogs + Send>,
        documents: DocumentRepository,
        today: NaiveDate,
    ) -> Self {
        let mut editor = Editor {
            items: ItemList::new(),
            fields: DocumentFields::dated(today),
            labels: Labels::default(),
            settings: Settings::default(),
            logo: None,
            today,
            format: CurrencyFormat::idr(),
            surface,
            dialogs,
            documents,
            exporting: Arc::new(AtomicBool::new(false)),
        };
        editor.reload().await;
        editor
    }

    /// Resets to defaults, applies whatever storage holds, renders.
    async fn reload(&mut self) {
        self.items.reset();
        self.fields = DocumentFields::dated(self.today);
        self.labels = Labels::default();
        self.settings = Settings::default();
        self.logo = None;

        match self.documents.load_logo().await {
            Ok(logo) => self.logo = logo,
            Err(e) => warn!(error = %e, "Could not read stored logo"),
        }

        match self.documents.load(self.snapshot()).await {
            Ok(Some(snapshot)) => {
                self.items.replace_all(snapshot.items);
                self.fields = snapshot.fields;
                self.labels = snapshot.labels;
                self.settings = snapshot.settings;
                info!(items = self.items.len(), "Document restored");
            }
            Ok(None) => debug!("Starting from defaults"),
            Err(e) => warn!(error = %e, "Could not read stored document, using defaults"),
        }

        self.render_all();
    }

    // =========================================================================
    // Items
    // =========================================================================

    pub async fn add_item(&mut self) {
        self.items.add();
        self.refresh_items();
        self.save().await;
    }

    /// Removes a row. Returns false, changing nothing, for the last
    /// remaining row or an index past the end.
    pub async fn remove_item(&mut self, index: usize) -> bool {
        if !self.items.remove(index) {
            debug!(index, len = self.items.len(), "Row not removed");
            return false;
        }
        self.refresh_items();
        self.save().await;
        true
    }

    /// Overwrites one cell from raw input. Returns false for a bad index.
    pub async fn update_item(&mut self, index: usize, field: ItemField, raw: &str) -> bool {
        if !self.items.update(index, field, raw) {
            debug!(index, %field, "Row not found");
            return false;
        }
        self.refresh_items();
        self.save().await;
        true
    }

    // =========================================================================
    // Document
    // =========================================================================

    pub async fn handle(&mut self, event: EditorEvent) {
        match event {
            EditorEvent::AddItem => self.add_item().await,
            EditorEvent::RemoveItem { index } => {
                self.remove_item(index).await;
            }
            EditorEvent::UpdateItem {
                index,
                field,
                value,
            } => {
                self.update_item(index, field, &value).await;
            }
            EditorEvent::SetField { field, value } => self.set_field(field, &value).await,
            EditorEvent::SetLabel { key, text } => self.set_label(key, &text).await,
            EditorEvent::SetColumn { column, visible } => self.set_column(column, visible).await,
            EditorEvent::NotesBlurred => self.check_notes().await,
        }
    }

    /// Sets a header, party or footer field. Blank notes become `-`.
    pub async fn set_field(&mut self, field: DocumentField, value: &str) {
        self.fields.set(field, value);
        self.surface.set_value(field.element_id(), value);
        if field == DocumentField::Notes {
            self.fill_blank_notes();
        }
        render::update_print_visibility(&mut self.surface);
        self.save().await;
    }

    /// Replaces blank notes with `-` and saves; otherwise does nothing.
    pub async fn check_notes(&mut self) {
        if self.fill_blank_notes() {
            self.save().await;
        }
    }

    fn fill_blank_notes(&mut self) -> bool {
        if !is_blank(&self.fields.notes) {
            return false;
        }
        self.fields.notes = BLANK_NOTES.to_string();
        self.surface
            .set_value(DocumentField::Notes.element_id(), BLANK_NOTES);
        true
    }

    pub async fn set_label(&mut self, key: LabelKey, text: &str) {
        self.labels.set(key, text);
        render::render_label(&mut self.surface, key, text);
        self.save().await;
    }

    /// Shows or hides the discount or tax column.
    pub async fn set_column(&mut self, column: Column, visible: bool) {
        self.settings.set(column, visible);
        self.surface.set_checked(column.toggle_id(), visible);
        render::apply_column_visibility(&mut self.surface);
        self.save().await;
    }

    /// Shows the uploaded image and stores it as a data URI.
    ///
    /// A failed save (usually the storage quota) is logged; the logo still
    /// shows for this session.
    pub async fn upload_logo(&mut self, bytes: &[u8], mime: &str) {
        let data_uri = format!("data:{};base64,{}", mime, STANDARD.encode(bytes));
        render::render_logo(&mut self.surface, Some(&data_uri));

        if let Err(e) = self.documents.save_logo(&data_uri).await {
            error!(error = %e, size = data_uri.len(), "Failed to store logo");
        }
        self.logo = Some(data_uri);
    }

    /// Wipes the stored document and logo after confirmation, then starts
    /// over from the defaults.
    ///
    /// ## Errors
    /// Storage refused the delete. The editor keeps the current document
    /// and nothing is reloaded.
    pub async fn clear(&mut self) -> DbResult<ClearOutcome> {
        if !self.dialogs.confirm(CLEAR_PROMPT) {
            debug!("Clear cancelled");
            return Ok(ClearOutcome::Cancelled);
        }

        if let Err(e) = self.documents.clear().await {
            error!(error = %e, "Could not clear stored document");
            return Err(e);
        }
        self.reload().await;
        Ok(ClearOutcome::Cleared)
    }

    // =========================================================================
    // Export Hooks
    // =========================================================================

    /// Puts the download button into its busy state and captures the
    /// invoice area.
    ///
    /// Returns [`ExportError::InProgress`], changing nothing, while the
    /// ticket of an earlier export is still alive.
    pub fn begin_export(&mut self) -> Result<ExportJob, ExportError> {
        let ticket = ExportTicket::acquire(&self.exporting)?;

        let button_label = self.surface.text(ids::DOWNLOAD_BUTTON);
        if button_label.is_some() {
            self.surface.set_text(ids::DOWNLOAD_BUTTON, CONVERTING_LABEL);
            self.surface.set_disabled(ids::DOWNLOAD_BUTTON, true);
        }

        let subtree = self.surface.clone_subtree(ids::INVOICE_AREA).map(|mut clone| {
            clone.add_class(CLONE_CLASS);
            clone
        });

        Ok(ExportJob {
            button_label,
            file_name: format!("{}.pdf", sanitize_file_stem(&self.fields.invoice_no)),
            subtree,
            ticket,
        })
    }

    /// Restores the download button, reports a failure to the user and
    /// returns the editor to idle.
    pub fn finish_export(
        &mut self,
        ticket: ExportTicket,
        button_label: Option<&str>,
        result: &Result<ExportReceipt, ExportError>,
    ) {
        if let Some(label) = button_label {
            self.surface.set_text(ids::DOWNLOAD_BUTTON, label);
            self.surface.set_disabled(ids::DOWNLOAD_BUTTON, false);
        }

        if let Err(e) = result {
            error!(error = %e, "PDF export failed");
            self.dialogs.alert(EXPORT_FAILED_ALERT);
        }
        drop(ticket);
    }

    pub fn is_exporting(&self) -> bool {
        self.exporting.load(Ordering::Acquire)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn snapshot(&self) -> DocumentSnapshot {
        DocumentSnapshot {
            fields: self.fields.clone(),
            items: self.items.as_slice().to_vec(),
            labels: self.labels.clone(),
            settings: self.settings,
        }
    }

    pub fn totals(&self) -> Totals {
        calculate(self.items.as_slice())
    }

    pub fn items(&self) -> &[LineItem] {
        self.items.as_slice()
    }

    pub fn fields(&self) -> &DocumentFields {
        &self.fields
    }

    pub fn labels(&self) -> &Labels {
        &self.labels
    }

    pub fn settings(&self) -> Settings {
        self.settings
    }

    pub fn logo(&self) -> Option<&str> {
        self.logo.as_deref()
    }

    pub fn format(&self) -> &CurrencyFormat {
        &self.format
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn render_all(&mut self) {
        render::render_fields(&mut self.surface, &self.fields, &self.labels, &self.settings);
        render::render_logo(&mut self.surface, self.logo.as_deref());
        self.refresh_items();
        render::update_print_visibility(&mut self.surface);
    }

    /// Full rebuild of the rows plus the summary block.
    fn refresh_items(&mut self) {
        render::render_items(&mut self.surface, &self.items, &self.format);
        let totals = self.totals();
        render::render_totals(&mut self.surface, &totals, &self.format);
    }

    async fn save(&self) {
        if let Err(e) = self.documents.save(&self.snapshot()).await {
            warn!(error = %e, "Document not saved");
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use faktur_core::{DOCUMENT_KEY, LOGO_KEY};
    use faktur_db::{Database, DbConfig};

    use crate::dialogs::ScriptedDialogs;
    use crate::surface::{Display, MemorySurface, PRINT_HIDDEN_CLASS};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 5, 4).unwrap()
    }

    async fn setup() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    async fn open(db: &Database, dialogs: ScriptedDialogs) -> Editor<MemorySurface> {
        Editor::open(
            MemorySurface::from_template(),
            Box::new(dialogs),
            db.documents(),
            today(),
        )
        .await
    }

    async fn fill_scenario(editor: &mut Editor<MemorySurface>) {
        editor.update_item(0, ItemField::Name, "Jasa Desain").await;
        editor.update_item(0, ItemField::Qty, "2").await;
        editor.update_item(0, ItemField::Price, "100000").await;
        editor.update_item(0, ItemField::Disc, "10").await;
        editor.update_item(0, ItemField::Tax, "11").await;
    }

    #[tokio::test]
    async fn test_open_fresh_document() {
        let db = setup().await;
        let editor = open(&db, ScriptedDialogs::default()).await;
        let s = editor.surface();

        assert_eq!(editor.items().len(), 1);
        assert_eq!(s.rows().len(), 1);
        assert_eq!(s.value("invoiceDate").as_deref(), Some("2026-05-04"));
        assert_eq!(s.value("dueDate").as_deref(), Some("2026-06-03"));
        assert_eq!(s.value("invoiceNo").as_deref(), Some("INV/2026/001"));
        assert_eq!(s.text(ids::GRAND_TOTAL).as_deref(), Some("Rp0"));
        assert_eq!(s.text(ids::TOTAL_DISC).as_deref(), Some("(Rp0)"));
        assert_eq!(s.checked("showDisc"), Some(true));
        assert_eq!(s.element(ids::LOGO_PREVIEW).unwrap().display, Display::None);

        // Blank optional contacts start out of print.
        assert!(s.parent_of("companyPhone").unwrap().classes.contains(PRINT_HIDDEN_CLASS));
    }

    #[tokio::test]
    async fn test_scenario_totals_and_reload() {
        let db = setup().await;
        let mut editor = open(&db, ScriptedDialogs::default()).await;
        fill_scenario(&mut editor).await;

        let s = editor.surface();
        assert_eq!(s.text(ids::SUBTOTAL).as_deref(), Some("Rp200.000"));
        assert_eq!(s.text(ids::TOTAL_DISC).as_deref(), Some("(Rp20.000)"));
        assert_eq!(s.text(ids::TOTAL_TAX).as_deref(), Some("Rp19.800"));
        assert_eq!(s.text(ids::GRAND_TOTAL).as_deref(), Some("Rp199.800"));
        assert_eq!(s.rows()[0].total, "Rp199.800");

        let saved = editor.snapshot();
        let reopened = open(&db, ScriptedDialogs::default()).await;
        assert_eq!(reopened.snapshot(), saved);
        assert_eq!(
            reopened.surface().text(ids::GRAND_TOTAL).as_deref(),
            Some("Rp199.800")
        );
    }

    #[tokio::test]
    async fn test_add_then_remove_rows() {
        let db = setup().await;
        let mut editor = open(&db, ScriptedDialogs::default()).await;

        editor.add_item().await;
        editor.update_item(1, ItemField::Name, "Hosting").await;
        assert_eq!(editor.surface().rows().len(), 2);
        assert!(editor.surface().rows().iter().all(|r| r.can_remove));

        assert!(editor.remove_item(0).await);
        assert_eq!(editor.items()[0].name, "Hosting");
        assert_eq!(editor.surface().rows().len(), 1);
        assert!(!editor.surface().rows()[0].can_remove);
    }

    #[tokio::test]
    async fn test_removing_last_row_changes_nothing() {
        let db = setup().await;
        let mut editor = open(&db, ScriptedDialogs::default()).await;
        let before = editor.surface().clone();

        assert!(!editor.remove_item(0).await);
        assert_eq!(editor.items().len(), 1);
        assert_eq!(editor.surface(), &before);
        // No save happened either.
        assert_eq!(db.kv().get(DOCUMENT_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_out_of_range_edits_are_ignored() {
        let db = setup().await;
        let mut editor = open(&db, ScriptedDialogs::default()).await;

        assert!(!editor.update_item(5, ItemField::Price, "100").await);
        assert!(!editor.remove_item(5).await);
        assert_eq!(editor.items()[0], LineItem::default());
    }

    #[tokio::test]
    async fn test_non_numeric_input_counts_as_zero() {
        let db = setup().await;
        let mut editor = open(&db, ScriptedDialogs::default()).await;
        fill_scenario(&mut editor).await;
        editor.update_item(0, ItemField::Qty, "abc").await;

        assert!(editor.items()[0].qty.is_nan());
        assert_eq!(editor.totals().grand_total, 0.0);
        assert_eq!(editor.surface().rows()[0].cell(ItemField::Qty), "");
    }

    #[tokio::test]
    async fn test_hidden_column_persists() {
        let db = setup().await;
        let mut editor = open(&db, ScriptedDialogs::default()).await;
        editor.set_column(Column::Discount, false).await;

        let s = editor.surface();
        assert_eq!(s.rows()[0].disc_display, Display::None);
        assert_eq!(s.element("rowTotalDisc").unwrap().display, Display::None);

        let reopened = open(&db, ScriptedDialogs::default()).await;
        assert!(!reopened.settings().show_disc);
        assert!(reopened.settings().show_tax);
        assert_eq!(reopened.surface().checked("showDisc"), Some(false));
        assert_eq!(reopened.surface().rows()[0].disc_display, Display::None);
        assert_eq!(
            reopened.surface().parent_of("headerDisc").unwrap().display,
            Display::None
        );
    }

    #[tokio::test]
    async fn test_blank_notes_become_dash() {
        let db = setup().await;
        let mut editor = open(&db, ScriptedDialogs::default()).await;

        editor.handle(EditorEvent::NotesBlurred).await;
        assert_eq!(editor.fields().notes, "-");
        assert_eq!(editor.surface().value("notes").as_deref(), Some("-"));

        editor.set_field(DocumentField::Notes, "Transfer BCA").await;
        editor.handle(EditorEvent::NotesBlurred).await;
        assert_eq!(editor.fields().notes, "Transfer BCA");

        editor.set_field(DocumentField::Notes, "   ").await;
        assert_eq!(editor.fields().notes, "-");
    }

    #[tokio::test]
    async fn test_print_visibility_follows_edits() {
        let db = setup().await;
        let mut editor = open(&db, ScriptedDialogs::default()).await;
        let hidden = |e: &Editor<MemorySurface>| {
            e.surface()
                .parent_of("companyEmail")
                .unwrap()
                .classes
                .contains(PRINT_HIDDEN_CLASS)
        };

        assert!(hidden(&editor));
        editor.set_field(DocumentField::CompanyEmail, "halo@studio.id").await;
        assert!(!hidden(&editor));
        editor.set_field(DocumentField::CompanyEmail, "").await;
        assert!(hidden(&editor));
    }

    #[tokio::test]
    async fn test_labels_are_saved() {
        let db = setup().await;
        let mut editor = open(&db, ScriptedDialogs::default()).await;
        editor
            .handle(EditorEvent::SetLabel {
                key: LabelKey::GrandTotal,
                text: "Jumlah".to_string(),
            })
            .await;

        assert_eq!(editor.surface().value("labelGrandTotal").as_deref(), Some("Jumlah"));
        let reopened = open(&db, ScriptedDialogs::default()).await;
        assert_eq!(reopened.labels().get(LabelKey::GrandTotal), "Jumlah");
    }

    #[tokio::test]
    async fn test_logo_upload_and_reload() {
        let db = setup().await;
        let mut editor = open(&db, ScriptedDialogs::default()).await;
        editor.upload_logo(&[1, 2, 3], "image/png").await;

        assert_eq!(editor.logo(), Some("data:image/png;base64,AQID"));
        let preview = editor.surface().element(ids::LOGO_PREVIEW).unwrap();
        assert_eq!(preview.display, Display::Block);
        assert_eq!(preview.src.as_deref(), Some("data:image/png;base64,AQID"));

        let reopened = open(&db, ScriptedDialogs::default()).await;
        assert_eq!(reopened.logo(), Some("data:image/png;base64,AQID"));
        assert_eq!(
            reopened.surface().element(ids::LOGO_TEXT).unwrap().display,
            Display::None
        );
    }

    #[tokio::test]
    async fn test_quota_failure_keeps_editor_usable() {
        let db = Database::new(DbConfig::in_memory().max_value_bytes(64))
            .await
            .unwrap();
        let mut editor = open(&db, ScriptedDialogs::default()).await;

        editor.upload_logo(&[0u8; 256], "image/png").await;
        assert!(editor.logo().is_some());
        assert_eq!(db.kv().get(LOGO_KEY).await.unwrap(), None);

        // The snapshot is also larger than 64 bytes; edits still apply.
        editor.update_item(0, ItemField::Price, "500").await;
        assert_eq!(editor.totals().grand_total, 500.0);
        assert_eq!(editor.surface().text(ids::GRAND_TOTAL).as_deref(), Some("Rp500"));
    }

    #[tokio::test]
    async fn test_malformed_storage_opens_with_defaults() {
        let db = setup().await;
        db.kv().set(DOCUMENT_KEY, "not json").await.unwrap();

        let editor = open(&db, ScriptedDialogs::default()).await;
        assert_eq!(editor.items().len(), 1);
        assert_eq!(editor.fields().invoice_no, "INV/2026/001");
    }

    #[tokio::test]
    async fn test_stored_empty_items_open_as_one_row() {
        let db = setup().await;
        db.kv()
            .set(DOCUMENT_KEY, r#"{"clientName":"CV Sinar","items":[]}"#)
            .await
            .unwrap();

        let editor = open(&db, ScriptedDialogs::default()).await;
        assert_eq!(editor.items(), &[LineItem::default()]);
        assert_eq!(editor.fields().client_name, "CV Sinar");
        assert_eq!(editor.surface().rows().len(), 1);
    }

    #[tokio::test]
    async fn test_cancelled_clear_changes_nothing() {
        let db = setup().await;
        let dialogs = ScriptedDialogs::answering(false);
        let mut editor = open(&db, dialogs.clone()).await;
        fill_scenario(&mut editor).await;
        editor.upload_logo(&[1, 2, 3], "image/png").await;

        let before = editor.snapshot();
        let surface = editor.surface().clone();

        assert_eq!(editor.clear().await.unwrap(), ClearOutcome::Cancelled);
        assert_eq!(dialogs.prompts(), vec![CLEAR_PROMPT.to_string()]);
        assert_eq!(editor.snapshot(), before);
        assert_eq!(editor.surface(), &surface);
        assert!(db.kv().get(DOCUMENT_KEY).await.unwrap().is_some());
        assert!(db.kv().get(LOGO_KEY).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_confirmed_clear_starts_over() {
        let db = setup().await;
        let mut editor = open(&db, ScriptedDialogs::answering(true)).await;
        fill_scenario(&mut editor).await;
        editor.set_column(Column::Tax, false).await;
        editor.upload_logo(&[1, 2, 3], "image/png").await;

        assert_eq!(editor.clear().await.unwrap(), ClearOutcome::Cleared);

        assert_eq!(editor.items(), &[LineItem::default()]);
        assert_eq!(editor.settings(), Settings::default());
        assert_eq!(editor.logo(), None);
        let s = editor.surface();
        assert_eq!(s.text(ids::GRAND_TOTAL).as_deref(), Some("Rp0"));
        assert_eq!(s.rows()[0].tax_display, Display::Default);
        assert_eq!(s.element(ids::LOGO_PREVIEW).unwrap().display, Display::None);
        assert_eq!(db.kv().get(DOCUMENT_KEY).await.unwrap(), None);
        assert_eq!(db.kv().get(LOGO_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_failed_clear_keeps_document() {
        let db = setup().await;
        let mut editor = open(&db, ScriptedDialogs::answering(true)).await;
        fill_scenario(&mut editor).await;
        let before = editor.snapshot();

        db.close().await;

        assert!(editor.clear().await.is_err());
        assert_eq!(editor.snapshot(), before);
        assert_eq!(
            editor.surface().text(ids::GRAND_TOTAL).as_deref(),
            Some("Rp199.800")
        );
    }

    #[tokio::test]
    async fn test_begin_and_finish_export() {
        let db = setup().await;
        let dialogs = ScriptedDialogs::default();
        let mut editor = open(&db, dialogs.clone()).await;
        editor.set_field(DocumentField::InvoiceNo, "").await;

        let job = editor.begin_export().unwrap();
        assert_eq!(job.file_name, "Invoice.pdf");
        assert_eq!(job.button_label.as_deref(), Some("Download PDF"));
        assert!(job.subtree.as_ref().unwrap().has_class(CLONE_CLASS));

        let button = editor.surface().element(ids::DOWNLOAD_BUTTON).unwrap();
        assert_eq!(button.text, CONVERTING_LABEL);
        assert!(button.disabled);
        // The live invoice area is untouched.
        assert!(editor.surface().element(ids::INVOICE_AREA).unwrap().classes.is_empty());

        // A second start while the first is running changes nothing.
        let busy_surface = editor.surface().clone();
        assert!(matches!(editor.begin_export(), Err(ExportError::InProgress)));
        assert_eq!(editor.surface(), &busy_surface);
        assert!(editor.is_exporting());

        let ExportJob {
            button_label,
            ticket,
            ..
        } = job;
        editor.finish_export(ticket, button_label.as_deref(), &Err(ExportError::MissingSubtree));
        let button = editor.surface().element(ids::DOWNLOAD_BUTTON).unwrap();
        assert_eq!(button.text, "Download PDF");
        assert!(!button.disabled);
        assert_eq!(dialogs.alerts(), vec![EXPORT_FAILED_ALERT.to_string()]);
        assert!(!editor.is_exporting());
        assert!(editor.begin_export().is_ok());
    }

    #[tokio::test]
    async fn test_editor_on_empty_surface() {
        let db = setup().await;
        let mut editor = Editor::open(
            MemorySurface::empty(),
            Box::new(ScriptedDialogs::default()),
            db.documents(),
            today(),
        )
        .await;

        editor.add_item().await;
        editor.set_column(Column::Tax, false).await;
        assert_eq!(editor.items().len(), 2);
        assert_eq!(editor.surface(), &MemorySurface::empty());

        let job = editor.begin_export().unwrap();
        assert!(job.button_label.is_none());
        assert!(job.subtree.is_none());
    }
}
