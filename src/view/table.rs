use serde::Serialize;
use serde_json::{Map, Value};

use crate::query::pager::{PageSize, Pager};

pub const EMPTY_MESSAGE: &str = "Nenhum dado encontrado.";

type FieldFn<'a, T> = Box<dyn Fn(&T) -> Value + 'a>;
type RenderFn<'a, T> = Box<dyn Fn(&T) -> String + 'a>;

enum Cell<'a, T> {
    /// The raw value, left for the client to format.
    Field(FieldFn<'a, T>),
    /// Text already formatted for display.
    Render(RenderFn<'a, T>),
}

pub struct Column<'a, T> {
    key: &'static str,
    header: &'static str,
    cell: Cell<'a, T>,
}

pub struct Table<'a, T> {
    columns: Vec<Column<'a, T>>,
    empty_message: &'static str,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct TablePage {
    pub headers: Vec<&'static str>,
    pub rows: Vec<Map<String, Value>>,
    pub page: usize,
    pub page_size: PageSize,
    pub total_rows: usize,
    pub total_pages: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_message: Option<&'static str>,
}

impl<'a, T> Column<'a, T> {
    pub fn field<F>(key: &'static str, header: &'static str, accessor: F) -> Self
    where
        F: Fn(&T) -> Value + 'a,
    {
        Self {
            key,
            header,
            cell: Cell::Field(Box::new(accessor)),
        }
    }
    pub fn render<F>(key: &'static str, header: &'static str, render: F) -> Self
    where
        F: Fn(&T) -> String + 'a,
    {
        Self {
            key,
            header,
            cell: Cell::Render(Box::new(render)),
        }
    }
    fn value(&self, row: &T) -> Value {
        match &self.cell {
            Cell::Field(accessor) => accessor(row),
            Cell::Render(render) => Value::String(render(row)),
        }
    }
}

impl<'a, T> Table<'a, T> {
    pub fn new(columns: Vec<Column<'a, T>>) -> Self {
        Self {
            columns,
            empty_message: EMPTY_MESSAGE,
        }
    }
    pub fn with_empty_message(mut self, message: &'static str) -> Self {
        self.empty_message = message;
        self
    }
    pub fn headers(&self) -> Vec<&'static str> {
        self.columns.iter().map(|column| column.header).collect()
    }
    pub fn row(&self, row: &T) -> Map<String, Value> {
        self.columns
            .iter()
            .map(|column| (column.key.to_string(), column.value(row)))
            .collect()
    }
    /// Renders the rows on the pager's current page.
    pub fn page(&self, rows: &[T], pager: &Pager) -> TablePage {
        TablePage {
            headers: self.headers(),
            rows: pager.slice(rows).iter().map(|row| self.row(row)).collect(),
            page: pager.page(),
            page_size: pager.page_size(),
            total_rows: pager.total_rows(),
            total_pages: pager.total_pages(),
            empty_message: rows.is_empty().then_some(self.empty_message),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::{models::ppe_item::PpeItem, store::fixtures, view::format_price};

    fn table<'a>() -> Table<'a, PpeItem> {
        Table::new(vec![
            Column::field("id", "ID", |item: &PpeItem| json!(item._id)),
            Column::field("current_stock", "Estoque", |item: &PpeItem| {
                json!(item.current_stock)
            }),
            Column::render("unit_price", "Preço", |item: &PpeItem| {
                format_price(item.unit_price)
            }),
        ])
    }

    #[test]
    fn field_columns_keep_raw_values_and_render_columns_format() {
        let items = fixtures::ppe_items();
        let page = table().page(&items, &Pager::new(items.len(), PageSize::Five));
        assert_eq!(page.headers, vec!["ID", "Estoque", "Preço"]);
        assert_eq!(page.rows.len(), 5);
        assert_eq!(page.rows[0]["current_stock"], json!(150));
        assert_eq!(page.rows[0]["unit_price"], json!("R$ 5.50"));
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.empty_message, None);
    }

    #[test]
    fn second_page_holds_the_remainder() {
        let items = fixtures::ppe_items();
        let pager = Pager::at(items.len(), PageSize::Five, Some(2));
        let page = table().page(&items, &pager);
        assert_eq!(page.page, 2);
        assert_eq!(page.rows.len(), 2);
        assert_eq!(page.rows[1]["id"], json!("ppe7"));
    }

    #[test]
    fn empty_tables_carry_the_message() {
        let page = table()
            .with_empty_message("Nenhum EPI encontrado.")
            .page(&[], &Pager::new(0, PageSize::Ten));
        assert!(page.rows.is_empty());
        assert_eq!(page.empty_message, Some("Nenhum EPI encontrado."));
        assert_eq!(page.total_pages, 0);
    }
}
