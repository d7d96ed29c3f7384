//! # Rendering Surface
//!
//! The narrow interface the editor renders into, addressed by element id.
//!
//! ## Template Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  invoiceArea ─────────────────────────────────────────────────────────  │
//! │  │ logoPreview / logoText        labelInvoiceTitle  labelInvoiceSubtitle│
//! │  │ companyName  companyAddress  [companyPhone] [companyEmail]           │
//! │  │ clientName   clientAddress   [clientContact]                         │
//! │  │ invoiceNo    invoiceDate     dueDate                                 │
//! │  │ ┌ headerItem │ headerDesc │ headerQty │ headerPrice │ headerDisc* │  │
//! │  │ │ headerTax* │ headerTotal ─────────────────────────────────────┐ │  │
//! │  │ │ itemsBody: one RowView per line item                          │ │  │
//! │  │ └────────────────────────────────────────────────────────────────┘  │
//! │  │ subtotalDisplay  rowTotalDisc:totalDiscDisplay                       │
//! │  │ rowTotalTax:totalTaxDisplay  grandTotalDisplay                      │
//! │  │ notes  signerName                                                   │
//! │  └────────────────────────────────────────────────────────────────────  │
//! │  toolbar: showDisc  showTax  downloadPdf   (outside the document)       │
//! │                                                                         │
//! │  [x]  wrapped: the parent gets `d-print-none` when x is blank           │
//! │  x*   the parent cell is hidden with its column                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every setter is a no-op for an unknown id, and every getter returns
//! `None`, so a missing element never stops a render pass.

use std::collections::{BTreeMap, BTreeSet};

use faktur_core::{Column, DocumentField, ItemField, LabelKey};

/// Fixed element ids outside the document model.
pub mod ids {
    pub const INVOICE_AREA: &str = "invoiceArea";
    pub const ITEMS_BODY: &str = "itemsBody";
    pub const LOGO_PREVIEW: &str = "logoPreview";
    pub const LOGO_TEXT: &str = "logoText";
    pub const DOWNLOAD_BUTTON: &str = "downloadPdf";
    pub const SUBTOTAL: &str = "subtotalDisplay";
    pub const TOTAL_DISC: &str = "totalDiscDisplay";
    pub const TOTAL_TAX: &str = "totalTaxDisplay";
    pub const GRAND_TOTAL: &str = "grandTotalDisplay";

    /// Inputs whose wrapper is left out of print when empty.
    pub const PRINT_OPTIONAL: [&str; 3] = ["companyPhone", "companyEmail", "clientContact"];
}

/// Class added to a blank optional field's wrapper.
pub const PRINT_HIDDEN_CLASS: &str = "d-print-none";

/// CSS `display` values the editor uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Display {
    /// Inline style cleared; the stylesheet decides.
    #[default]
    Default,
    None,
    Flex,
    Block,
}

// =============================================================================
// Row View
// =============================================================================

/// One rendered item row.
///
/// `index` is captured when the row is built; edits coming from this row
/// carry it back in the event.
#[derive(Debug, Clone, PartialEq)]
pub struct RowView {
    pub index: usize,
    /// Input values in [`ItemField::ALL`] order.
    pub cells: [String; 6],
    /// Formatted row total.
    pub total: String,
    pub can_remove: bool,
    pub disc_display: Display,
    pub tax_display: Display,
}

impl RowView {
    pub fn cell(&self, field: ItemField) -> &str {
        let pos = ItemField::ALL
            .iter()
            .position(|f| *f == field)
            .unwrap_or_default();
        &self.cells[pos]
    }

    fn display_mut(&mut self, class: &str) -> Option<&mut Display> {
        if class == Column::Discount.cell_class() {
            Some(&mut self.disc_display)
        } else if class == Column::Tax.cell_class() {
            Some(&mut self.tax_display)
        } else {
            None
        }
    }
}

// =============================================================================
// Surface Trait
// =============================================================================

/// What the renderer needs from a document surface.
pub trait Surface {
    fn has_element(&self, id: &str) -> bool;

    fn value(&self, id: &str) -> Option<String>;
    fn set_value(&mut self, id: &str, value: &str);

    fn checked(&self, id: &str) -> Option<bool>;
    fn set_checked(&mut self, id: &str, checked: bool);

    fn text(&self, id: &str) -> Option<String>;
    fn set_text(&mut self, id: &str, text: &str);

    fn set_display(&mut self, id: &str, display: Display);
    /// Sets `display` on the element's parent.
    fn set_parent_display(&mut self, id: &str, display: Display);
    /// Adds (`on`) or removes a class on the element's parent.
    fn set_parent_class(&mut self, id: &str, class: &str, on: bool);

    fn set_disabled(&mut self, id: &str, disabled: bool);
    fn set_image(&mut self, id: &str, src: &str);

    /// Replaces every row of the items body.
    fn replace_rows(&mut self, rows: Vec<RowView>);
    /// Sets `display` on every cell carrying `class`.
    fn set_column_display(&mut self, class: &str, display: Display);

    /// Deep copy of the subtree rooted at `id`, detached from the surface.
    fn clone_subtree(&self, id: &str) -> Option<Subtree>;
}

// =============================================================================
// Elements
// =============================================================================

/// State of one element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    pub value: String,
    pub checked: bool,
    pub text: String,
    pub display: Display,
    pub disabled: bool,
    pub src: Option<String>,
    pub classes: BTreeSet<String>,
    pub parent: Option<String>,
    /// False for toolbar controls that are not part of the printed document.
    pub in_document: bool,
}

/// A detached copy of part of the surface, handed to the rasterizer.
#[derive(Debug, Clone, PartialEq)]
pub struct Subtree {
    pub root: String,
    pub classes: BTreeSet<String>,
    pub elements: BTreeMap<String, Element>,
    pub rows: Vec<RowView>,
}

impl Subtree {
    pub fn add_class(&mut self, class: &str) {
        self.classes.insert(class.to_string());
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    pub fn element(&self, id: &str) -> Option<&Element> {
        self.elements.get(id)
    }

    /// True unless the element is missing or hidden with `display: none`.
    pub fn is_visible(&self, id: &str) -> bool {
        self.elements
            .get(id)
            .is_some_and(|e| e.display != Display::None)
    }
}

// =============================================================================
// Memory Surface
// =============================================================================

/// In-memory surface carrying every id of the invoice template.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemorySurface {
    elements: BTreeMap<String, Element>,
    rows: Vec<RowView>,
}

impl MemorySurface {
    /// A surface with no elements at all.
    pub fn empty() -> Self {
        MemorySurface::default()
    }

    /// A surface with the full invoice template.
    pub fn from_template() -> Self {
        let mut s = MemorySurface::empty();

        s.insert(ids::INVOICE_AREA, Element::default());
        s.insert(ids::ITEMS_BODY, Element::default());

        for field in DocumentField::ALL {
            let id = field.element_id();
            if ids::PRINT_OPTIONAL.contains(&id) {
                let wrapper = format!("{}Wrap", id);
                s.insert(&wrapper, Element::default());
                s.insert_child(id, &wrapper);
            } else {
                s.insert(id, Element::default());
            }
        }

        for key in LabelKey::ALL {
            s.insert(
                key.element_id(),
                Element {
                    value: key.default_text().to_string(),
                    ..Element::default()
                },
            );
        }

        for column in Column::ALL {
            let cell = format!("{}Cell", column.header_id());
            s.insert(&cell, Element::default());
            if let Some(header) = s.elements.get_mut(column.header_id()) {
                header.parent = Some(cell);
            }
            s.insert(column.summary_row_id(), Element {
                display: Display::Flex,
                ..Element::default()
            });
            s.insert_toolbar(column.toggle_id(), Element {
                checked: true,
                ..Element::default()
            });
        }

        for id in [ids::SUBTOTAL, ids::TOTAL_DISC, ids::TOTAL_TAX, ids::GRAND_TOTAL] {
            s.insert(id, Element::default());
        }

        s.insert(ids::LOGO_PREVIEW, Element {
            display: Display::None,
            ..Element::default()
        });
        s.insert(ids::LOGO_TEXT, Element {
            text: "Upload Logo".to_string(),
            ..Element::default()
        });
        s.insert_toolbar(ids::DOWNLOAD_BUTTON, Element {
            text: "Download PDF".to_string(),
            ..Element::default()
        });

        s
    }

    /// Adds or replaces an element; used to build partial templates.
    pub fn insert(&mut self, id: &str, element: Element) {
        self.elements.insert(
            id.to_string(),
            Element {
                in_document: true,
                ..element
            },
        );
    }

    fn insert_child(&mut self, id: &str, parent: &str) {
        self.insert(id, Element {
            parent: Some(parent.to_string()),
            ..Element::default()
        });
    }

    fn insert_toolbar(&mut self, id: &str, element: Element) {
        self.elements.insert(
            id.to_string(),
            Element {
                in_document: false,
                ..element
            },
        );
    }

    /// Removes an element; used to simulate a half-rendered template.
    pub fn remove(&mut self, id: &str) {
        self.elements.remove(id);
    }

    pub fn element(&self, id: &str) -> Option<&Element> {
        self.elements.get(id)
    }

    pub fn rows(&self) -> &[RowView] {
        &self.rows
    }

    /// The parent element of `id`, if both exist.
    pub fn parent_of(&self, id: &str) -> Option<&Element> {
        let parent = self.elements.get(id)?.parent.as_deref()?;
        self.elements.get(parent)
    }

    fn with<F: FnOnce(&mut Element)>(&mut self, id: &str, f: F) {
        if let Some(el) = self.elements.get_mut(id) {
            f(el);
        }
    }

    fn with_parent<F: FnOnce(&mut Element)>(&mut self, id: &str, f: F) {
        let parent = self.elements.get(id).and_then(|e| e.parent.clone());
        if let Some(parent) = parent {
            self.with(&parent, f);
        }
    }
}

impl Surface for MemorySurface {
    fn has_element(&self, id: &str) -> bool {
        self.elements.contains_key(id)
    }

    fn value(&self, id: &str) -> Option<String> {
        self.elements.get(id).map(|e| e.value.clone())
    }

    fn set_value(&mut self, id: &str, value: &str) {
        self.with(id, |e| e.value = value.to_string());
    }

    fn checked(&self, id: &str) -> Option<bool> {
        self.elements.get(id).map(|e| e.checked)
    }

    fn set_checked(&mut self, id: &str, checked: bool) {
        self.with(id, |e| e.checked = checked);
    }

    fn text(&self, id: &str) -> Option<String> {
        self.elements.get(id).map(|e| e.text.clone())
    }

    fn set_text(&mut self, id: &str, text: &str) {
        self.with(id, |e| e.text = text.to_string());
    }

    fn set_display(&mut self, id: &str, display: Display) {
        self.with(id, |e| e.display = display);
    }

    fn set_parent_display(&mut self, id: &str, display: Display) {
        self.with_parent(id, |e| e.display = display);
    }

    fn set_parent_class(&mut self, id: &str, class: &str, on: bool) {
        self.with_parent(id, |e| {
            if on {
                e.classes.insert(class.to_string());
            } else {
                e.classes.remove(class);
            }
        });
    }

    fn set_disabled(&mut self, id: &str, disabled: bool) {
        self.with(id, |e| e.disabled = disabled);
    }

    fn set_image(&mut self, id: &str, src: &str) {
        self.with(id, |e| e.src = Some(src.to_string()));
    }

    fn replace_rows(&mut self, rows: Vec<RowView>) {
        if self.has_element(ids::ITEMS_BODY) {
            self.rows = rows;
        }
    }

    fn set_column_display(&mut self, class: &str, display: Display) {
        for row in &mut self.rows {
            if let Some(slot) = row.display_mut(class) {
                *slot = display;
            }
        }
    }

    fn clone_subtree(&self, id: &str) -> Option<Subtree> {
        let root = self.elements.get(id)?;
        let elements = self
            .elements
            .iter()
            .filter(|(key, e)| e.in_document && key.as_str() != id)
            .map(|(key, e)| (key.clone(), e.clone()))
            .collect();

        Some(Subtree {
            root: id.to_string(),
            classes: root.classes.clone(),
            elements,
            rows: self.rows.clone(),
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_has_every_bound_id() {
        let s = MemorySurface::from_template();
        for field in DocumentField::ALL {
            assert!(s.has_element(field.element_id()), "{}", field.element_id());
        }
        for key in LabelKey::ALL {
            assert_eq!(s.value(key.element_id()).as_deref(), Some(key.default_text()));
        }
        for column in Column::ALL {
            assert_eq!(s.checked(column.toggle_id()), Some(true));
            assert!(s.parent_of(column.header_id()).is_some());
            assert!(s.has_element(column.summary_row_id()));
        }
        for id in ids::PRINT_OPTIONAL {
            assert!(s.parent_of(id).is_some());
        }
    }

    #[test]
    fn test_unknown_ids_are_ignored() {
        let mut s = MemorySurface::empty();
        s.set_value("nope", "x");
        s.set_parent_display("nope", Display::None);
        s.replace_rows(Vec::new());

        assert_eq!(s, MemorySurface::empty());
        assert_eq!(s.value("nope"), None);
        assert_eq!(s.checked("nope"), None);
    }

    #[test]
    fn test_parent_class_toggles() {
        let mut s = MemorySurface::from_template();
        s.set_parent_class("companyPhone", PRINT_HIDDEN_CLASS, true);
        assert!(s.parent_of("companyPhone").unwrap().classes.contains(PRINT_HIDDEN_CLASS));

        s.set_parent_class("companyPhone", PRINT_HIDDEN_CLASS, false);
        assert!(s.parent_of("companyPhone").unwrap().classes.is_empty());
    }

    #[test]
    fn test_clone_subtree_is_detached_and_skips_toolbar() {
        let s = MemorySurface::from_template();
        let mut clone = s.clone_subtree(ids::INVOICE_AREA).unwrap();
        clone.add_class("pdf-clone-mode");

        assert!(clone.has_class("pdf-clone-mode"));
        assert!(s.element(ids::INVOICE_AREA).unwrap().classes.is_empty());
        assert!(clone.element(ids::DOWNLOAD_BUTTON).is_none());
        assert!(clone.element("showDisc").is_none());
        assert!(clone.element("companyName").is_some());
    }

    #[test]
    fn test_clone_of_missing_root() {
        assert!(MemorySurface::empty().clone_subtree(ids::INVOICE_AREA).is_none());
    }
}
