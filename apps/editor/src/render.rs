//! # Renderer
//!
//! Projects editor state onto a [`Surface`].
//!
//! ## Passes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  render_items            full rebuild of itemsBody, then ──┐            │
//! │  apply_column_visibility ◄─────────────────────────────────┘            │
//! │  render_totals           the four summary displays                      │
//! │  render_fields           inputs, labels, checkboxes                     │
//! │  render_logo             preview image vs placeholder                   │
//! │  update_print_visibility wrappers of blank optional contacts            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every pass tolerates missing elements and may run any number of
//! times: running one twice leaves the surface as running it once.

use faktur_core::validation::is_blank;
use faktur_core::{
    Column, CurrencyFormat, DocumentField, DocumentFields, ItemField, ItemList, LabelKey, Labels,
    LineAmounts, LineItem, Settings, Totals,
};

use crate::surface::{ids, Display, RowView, Surface, PRINT_HIDDEN_CLASS};

// =============================================================================
// Items
// =============================================================================

/// Builds the row for one item.
pub fn row_view(
    index: usize,
    item: &LineItem,
    can_remove: bool,
    format: &CurrencyFormat,
) -> RowView {
    RowView {
        index,
        cells: ItemField::ALL.map(|field| item.display_value(field)),
        total: format.format(LineAmounts::of(item).total),
        can_remove,
        disc_display: Display::Default,
        tax_display: Display::Default,
    }
}

/// Rebuilds every row, then re-applies column visibility to the new cells.
pub fn render_items<S: Surface + ?Sized>(
    surface: &mut S,
    items: &ItemList,
    format: &CurrencyFormat,
) {
    let can_remove = items.len() > 1;
    let rows = items
        .iter()
        .enumerate()
        .map(|(index, item)| row_view(index, item, can_remove, format))
        .collect();

    surface.replace_rows(rows);
    apply_column_visibility(surface);
}

/// Shows or hides the discount and tax columns from the toggle checkboxes.
///
/// Does nothing when either checkbox is missing. Shown cells get their
/// inline display cleared, summary rows are laid out as `flex`.
pub fn apply_column_visibility<S: Surface + ?Sized>(surface: &mut S) {
    let (Some(show_disc), Some(show_tax)) = (
        surface.checked(Column::Discount.toggle_id()),
        surface.checked(Column::Tax.toggle_id()),
    ) else {
        return;
    };

    for (column, shown) in [(Column::Discount, show_disc), (Column::Tax, show_tax)] {
        let cell = if shown { Display::Default } else { Display::None };
        surface.set_column_display(column.cell_class(), cell);

        if surface.has_element(column.header_id()) {
            surface.set_parent_display(column.header_id(), cell);
        }

        let summary = if shown { Display::Flex } else { Display::None };
        surface.set_display(column.summary_row_id(), summary);
    }
}

// =============================================================================
// Totals
// =============================================================================

/// Writes the four summary displays. The discount shows as a deduction.
pub fn render_totals<S: Surface + ?Sized>(
    surface: &mut S,
    totals: &Totals,
    format: &CurrencyFormat,
) {
    surface.set_text(ids::SUBTOTAL, &format.format(totals.subtotal));
    surface.set_text(ids::TOTAL_DISC, &format.format_deduction(totals.total_discount));
    surface.set_text(ids::TOTAL_TAX, &format.format(totals.total_tax));
    surface.set_text(ids::GRAND_TOTAL, &format.format(totals.grand_total));
}

// =============================================================================
// Document Fields
// =============================================================================

/// Projects fields, labels and column settings into their inputs.
pub fn render_fields<S: Surface + ?Sized>(
    surface: &mut S,
    fields: &DocumentFields,
    labels: &Labels,
    settings: &Settings,
) {
    for field in DocumentField::ALL {
        surface.set_value(field.element_id(), fields.get(field));
    }
    for (key, text) in labels.iter() {
        surface.set_value(key.element_id(), text);
    }
    for column in Column::ALL {
        surface.set_checked(column.toggle_id(), settings.shows(column));
    }
}

/// Writes one label input.
pub fn render_label<S: Surface + ?Sized>(surface: &mut S, key: LabelKey, text: &str) {
    surface.set_value(key.element_id(), text);
}

/// Shows the logo preview, or the placeholder text when there is no logo.
pub fn render_logo<S: Surface + ?Sized>(surface: &mut S, logo: Option<&str>) {
    match logo {
        Some(src) => {
            surface.set_image(ids::LOGO_PREVIEW, src);
            surface.set_display(ids::LOGO_PREVIEW, Display::Block);
            surface.set_display(ids::LOGO_TEXT, Display::None);
        }
        None => {
            surface.set_display(ids::LOGO_PREVIEW, Display::None);
            surface.set_display(ids::LOGO_TEXT, Display::Default);
        }
    }
}

/// Leaves blank phone, email and client contact lines out of print.
pub fn update_print_visibility<S: Surface + ?Sized>(surface: &mut S) {
    for id in ids::PRINT_OPTIONAL {
        if let Some(value) = surface.value(id) {
            surface.set_parent_class(id, PRINT_HIDDEN_CLASS, is_blank(&value));
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::MemorySurface;

    fn scenario_items() -> ItemList {
        let mut items = ItemList::new();
        items.update(0, ItemField::Name, "Jasa Desain");
        items.update(0, ItemField::Qty, "2");
        items.update(0, ItemField::Price, "100000");
        items.update(0, ItemField::Disc, "10");
        items.update(0, ItemField::Tax, "11");
        items
    }

    #[test]
    fn test_render_items_builds_rows() {
        let mut s = MemorySurface::from_template();
        let idr = CurrencyFormat::idr();
        let mut items = scenario_items();
        items.add();

        render_items(&mut s, &items, &idr);

        let rows = s.rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].index, 0);
        assert_eq!(rows[1].index, 1);
        assert_eq!(rows[0].cell(ItemField::Name), "Jasa Desain");
        assert_eq!(rows[0].cell(ItemField::Price), "100000");
        assert_eq!(rows[0].total, "Rp199.800");
        assert_eq!(rows[1].total, "Rp0");
        assert!(rows[0].can_remove);
    }

    #[test]
    fn test_single_row_cannot_be_removed() {
        let mut s = MemorySurface::from_template();
        render_items(&mut s, &ItemList::new(), &CurrencyFormat::idr());
        assert!(!s.rows()[0].can_remove);
    }

    #[test]
    fn test_render_totals_scenario() {
        let mut s = MemorySurface::from_template();
        let totals = faktur_core::calculate(scenario_items().as_slice());
        render_totals(&mut s, &totals, &CurrencyFormat::idr());

        assert_eq!(s.text(ids::SUBTOTAL).as_deref(), Some("Rp200.000"));
        assert_eq!(s.text(ids::TOTAL_DISC).as_deref(), Some("(Rp20.000)"));
        assert_eq!(s.text(ids::TOTAL_TAX).as_deref(), Some("Rp19.800"));
        assert_eq!(s.text(ids::GRAND_TOTAL).as_deref(), Some("Rp199.800"));
    }

    #[test]
    fn test_hidden_discount_column() {
        let mut s = MemorySurface::from_template();
        s.set_checked("showDisc", false);
        render_items(&mut s, &scenario_items(), &CurrencyFormat::idr());

        assert_eq!(s.rows()[0].disc_display, Display::None);
        assert_eq!(s.rows()[0].tax_display, Display::Default);
        assert_eq!(s.parent_of("headerDisc").unwrap().display, Display::None);
        assert_eq!(s.parent_of("headerTax").unwrap().display, Display::Default);
        assert_eq!(s.element("rowTotalDisc").unwrap().display, Display::None);
        assert_eq!(s.element("rowTotalTax").unwrap().display, Display::Flex);
    }

    #[test]
    fn test_column_visibility_is_idempotent() {
        let mut s = MemorySurface::from_template();
        s.set_checked("showTax", false);
        render_items(&mut s, &scenario_items(), &CurrencyFormat::idr());

        apply_column_visibility(&mut s);
        let once = s.clone();
        apply_column_visibility(&mut s);
        assert_eq!(s, once);
    }

    #[test]
    fn test_column_visibility_without_checkboxes_touches_nothing() {
        let mut s = MemorySurface::from_template();
        s.remove("showTax");
        s.set_display("rowTotalDisc", Display::Block);
        let before = s.clone();

        apply_column_visibility(&mut s);
        assert_eq!(s, before);

        let mut empty = MemorySurface::empty();
        apply_column_visibility(&mut empty);
        assert_eq!(empty, MemorySurface::empty());
    }

    #[test]
    fn test_column_visibility_without_header() {
        let mut s = MemorySurface::from_template();
        s.remove("headerDisc");
        s.set_checked("showDisc", false);

        apply_column_visibility(&mut s);
        assert_eq!(s.element("headerDiscCell").unwrap().display, Display::Default);
        assert_eq!(s.element("rowTotalDisc").unwrap().display, Display::None);
    }

    #[test]
    fn test_print_visibility_follows_blank_fields() {
        let mut s = MemorySurface::from_template();
        s.set_value("companyPhone", "0812-3456");
        s.set_value("companyEmail", "   ");
        update_print_visibility(&mut s);

        let hidden = |s: &MemorySurface, id: &str| {
            s.parent_of(id).unwrap().classes.contains(PRINT_HIDDEN_CLASS)
        };
        assert!(!hidden(&s, "companyPhone"));
        assert!(hidden(&s, "companyEmail"));
        assert!(hidden(&s, "clientContact"));

        s.set_value("clientContact", "Budi");
        update_print_visibility(&mut s);
        assert!(!hidden(&s, "clientContact"));
    }

    #[test]
    fn test_render_fields_and_logo() {
        let mut s = MemorySurface::from_template();
        let mut fields = DocumentFields::default();
        fields.client_name = "CV Sinar".to_string();
        let mut labels = Labels::default();
        labels.set(LabelKey::Title, "KWITANSI");
        let settings = Settings {
            show_disc: false,
            show_tax: true,
        };

        render_fields(&mut s, &fields, &labels, &settings);
        assert_eq!(s.value("clientName").as_deref(), Some("CV Sinar"));
        assert_eq!(s.value("invoiceNo").as_deref(), Some("INV/2026/001"));
        assert_eq!(s.value("labelInvoiceTitle").as_deref(), Some("KWITANSI"));
        assert_eq!(s.checked("showDisc"), Some(false));

        render_logo(&mut s, Some("data:image/png;base64,AAAA"));
        assert_eq!(s.element(ids::LOGO_PREVIEW).unwrap().display, Display::Block);
        assert_eq!(s.element(ids::LOGO_TEXT).unwrap().display, Display::None);

        render_logo(&mut s, None);
        assert_eq!(s.element(ids::LOGO_PREVIEW).unwrap().display, Display::None);
        assert_eq!(s.element(ids::LOGO_TEXT).unwrap().display, Display::Default);
    }
}
