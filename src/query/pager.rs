use std::ops::Range;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Serialize, Deserialize, Debug, Default, PartialEq, Eq)]
#[serde(try_from = "usize", into = "usize")]
pub enum PageSize {
    Five,
    #[default]
    Ten,
    Twenty,
    Fifty,
}

/// Page state of a table. Pages are 1-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pager {
    page: usize,
    page_size: PageSize,
    total_rows: usize,
}

impl TryFrom<usize> for PageSize {
    type Error = String;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        match value {
            5 => Ok(PageSize::Five),
            10 => Ok(PageSize::Ten),
            20 => Ok(PageSize::Twenty),
            50 => Ok(PageSize::Fifty),
            other => Err(format!("page size must be 5, 10, 20 or 50, got {other}")),
        }
    }
}

impl From<PageSize> for usize {
    fn from(size: PageSize) -> Self {
        match size {
            PageSize::Five => 5,
            PageSize::Ten => 10,
            PageSize::Twenty => 20,
            PageSize::Fifty => 50,
        }
    }
}

impl Pager {
    pub fn new(total_rows: usize, page_size: PageSize) -> Self {
        Self {
            page: 1,
            page_size,
            total_rows,
        }
    }
    /// A pager opened on `page` when that page exists, else on page 1.
    pub fn at(total_rows: usize, page_size: PageSize, page: Option<usize>) -> Self {
        let mut pager = Self::new(total_rows, page_size);
        if let Some(page) = page {
            pager.go_to(page);
        }
        pager
    }
    pub fn page(&self) -> usize {
        self.page
    }
    pub fn page_size(&self) -> PageSize {
        self.page_size
    }
    pub fn total_rows(&self) -> usize {
        self.total_rows
    }
    pub fn total_pages(&self) -> usize {
        let size = usize::from(self.page_size);
        (self.total_rows + size - 1) / size
    }
    /// Moves to `page` if it exists. Returns whether the page changed hands.
    pub fn go_to(&mut self, page: usize) -> bool {
        if page > 0 && page <= self.total_pages() {
            self.page = page;
            true
        } else {
            false
        }
    }
    pub fn window(&self) -> Range<usize> {
        let size = usize::from(self.page_size);
        let start = ((self.page - 1) * size).min(self.total_rows);
        let end = (start + size).min(self.total_rows);
        start..end
    }
    pub fn slice<'a, T>(&self, rows: &'a [T]) -> &'a [T] {
        let window = self.window();
        &rows[window.start.min(rows.len())..window.end.min(rows.len())]
    }
}
