//! Derived view computation - pure filter/sort/paginate over the catalog
//!
//! The derived view is recomputed from scratch on every render; the raw
//! catalog is never mutated for display.

use crate::domain::entities::Product;

/// Fixed number of products per page
pub const PAGE_SIZE: usize = 8;

/// Maximum number of page buttons shown at once
const MAX_PAGE_BUTTONS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

/// The list view's query state: filter text, price sort order, page number
#[derive(Debug, Clone)]
pub struct ListQuery {
    filter: String,
    sort: SortOrder,
    page: usize,
}

impl ListQuery {
    pub fn new() -> Self {
        Self {
            filter: String::new(),
            sort: SortOrder::Ascending,
            page: 1,
        }
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn sort(&self) -> SortOrder {
        self.sort
    }

    pub fn page(&self) -> usize {
        self.page
    }

    /// Changing the filter always jumps back to the first page
    pub fn set_filter(&mut self, filter: impl Into<String>) {
        self.filter = filter.into();
        self.page = 1;
    }

    /// Changing the sort order keeps the current page
    pub fn set_sort(&mut self, sort: SortOrder) {
        self.sort = sort;
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }
}

impl Default for ListQuery {
    fn default() -> Self {
        Self::new()
    }
}

/// One renderable page of the catalog
#[derive(Debug, Clone)]
pub struct DerivedView {
    pub items: Vec<Product>,
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    /// Page numbers to render as buttons, at most five, centered on the
    /// current page and shifted (never shrunk) near the edges
    pub page_window: Vec<usize>,
}

/// Compute the derived view: filter, stable price sort, fixed-size page
pub fn compute(catalog: &[Product], query: &ListQuery) -> DerivedView {
    let needle = query.filter.to_lowercase();
    let mut items: Vec<Product> = catalog
        .iter()
        .filter(|p| p.title.to_lowercase().contains(&needle))
        .cloned()
        .collect();

    // Stable sort: products with equal prices keep their relative order
    items.sort_by(|a, b| {
        let ord = a.price.partial_cmp(&b.price).unwrap_or(std::cmp::Ordering::Equal);
        match query.sort {
            SortOrder::Ascending => ord,
            SortOrder::Descending => ord.reverse(),
        }
    });

    let total_items = items.len();
    let total_pages = total_items.div_ceil(PAGE_SIZE);
    let page = query.page.clamp(1, total_pages.max(1));

    let start = (page - 1) * PAGE_SIZE;
    let items: Vec<Product> = items.into_iter().skip(start).take(PAGE_SIZE).collect();

    DerivedView {
        items,
        page,
        total_pages,
        total_items,
        page_window: page_window(page, total_pages),
    }
}

/// Select which page buttons to show: all of them when five or fewer
/// exist, otherwise a five-wide window around the current page, clamped
/// so it never runs past either edge.
pub fn page_window(current: usize, total_pages: usize) -> Vec<usize> {
    if total_pages <= MAX_PAGE_BUTTONS {
        return (1..=total_pages).collect();
    }
    let current = current.clamp(1, total_pages);
    let half = MAX_PAGE_BUTTONS / 2;
    let start = current
        .saturating_sub(half)
        .clamp(1, total_pages - (MAX_PAGE_BUTTONS - 1));
    (start..start + MAX_PAGE_BUTTONS).collect()
}
