//! Table mount point
//!
//! Replaces the children of a container element with a freshly built
//! `<table>` on every load.

use csvchart::{TableModel, TableMount, ViewerError, ViewerResult};
use wasm_bindgen::JsValue;
use web_sys::{Document, Element};

use super::dom_error;

/// DOM container that holds the rendered table
pub struct DomTableMount {
    document: Document,
    root: Element,
}

impl DomTableMount {
    pub fn new(root: Element) -> ViewerResult<Self> {
        let document = root
            .owner_document()
            .ok_or_else(|| ViewerError::Render("Table container has no document".to_string()))?;
        Ok(Self { document, root })
    }

    fn build(&self, table: &TableModel) -> Result<Element, JsValue> {
        let table_el = self.document.create_element("table")?;

        let thead = self.document.create_element("thead")?;
        let header_row = self.document.create_element("tr")?;
        for label in &table.header {
            header_row.append_child(&self.cell("th", label)?)?;
        }
        thead.append_child(&header_row)?;
        table_el.append_child(&thead)?;

        let tbody = self.document.create_element("tbody")?;
        for row in &table.rows {
            let tr = self.document.create_element("tr")?;
            for value in row {
                tr.append_child(&self.cell("td", value)?)?;
            }
            tbody.append_child(&tr)?;
        }
        table_el.append_child(&tbody)?;

        Ok(table_el)
    }

    fn cell(&self, tag: &str, text: &str) -> Result<Element, JsValue> {
        let cell = self.document.create_element(tag)?;
        cell.set_text_content(Some(text));
        Ok(cell)
    }
}

impl TableMount for DomTableMount {
    fn replace(&mut self, table: &TableModel) -> ViewerResult<()> {
        // Build first so a failure leaves the previous table in place
        let table_el = self.build(table).map_err(dom_error)?;
        self.root.set_inner_html("");
        self.root.append_child(&table_el).map_err(dom_error)?;
        Ok(())
    }
}
