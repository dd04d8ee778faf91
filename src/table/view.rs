//! Search, sort and pagination state for one list screen

use std::borrow::Cow;
use std::marker::PhantomData;
use crate::utils::errors::{AdminError, Result};
use super::paginator::Paginator;
use super::sort::{compare_for, SortConfig, SortDirection, SortValue};

/// A column shown by the table renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub key: &'static str,
    pub label: &'static str,
    pub sortable: bool,
}

impl Column {
    pub const fn sortable(key: &'static str, label: &'static str) -> Self {
        Self { key, label, sortable: true }
    }

    pub const fn fixed(key: &'static str, label: &'static str) -> Self {
        Self { key, label, sortable: false }
    }
}

/// A record that can be listed, searched and sorted
pub trait TableRow {
    /// Columns in display order
    fn columns() -> &'static [Column];

    /// Value used when sorting by `key`
    fn sort_value(&self, key: &str) -> SortValue;

    /// Fields matched by the search box
    fn search_fields(&self) -> Vec<Cow<'_, str>>;

    /// Display text for each column, in `columns()` order
    fn cells(&self) -> Vec<String>;

    fn sort_keys() -> Vec<&'static str> {
        Self::columns()
            .iter()
            .filter(|c| c.sortable)
            .map(|c| c.key)
            .collect()
    }
}

/// One page of the filtered and sorted rows
#[derive(Debug)]
pub struct Page<'a, R> {
    pub items: Vec<&'a R>,
    pub current_page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub can_go_back: bool,
    pub can_go_forward: bool,
}

/// Client-side table state
#[derive(Debug, Clone)]
pub struct TableView<R> {
    search: String,
    sort: Option<SortConfig>,
    paginator: Paginator,
    _rows: PhantomData<fn() -> R>,
}

impl<R: TableRow> TableView<R> {
    pub fn new(page_size: usize) -> Self {
        Self {
            search: String::new(),
            sort: None,
            paginator: Paginator::new(page_size),
            _rows: PhantomData,
        }
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn sort(&self) -> Option<SortConfig> {
        self.sort
    }

    pub fn paginator(&self) -> &Paginator {
        &self.paginator
    }

    /// Change the search term; always returns to the first page
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
        self.paginator.reset();
    }

    fn resolve_key(key: &str) -> Result<&'static str> {
        R::sort_keys()
            .into_iter()
            .find(|k| *k == key)
            .ok_or_else(|| {
                AdminError::validation(format!(
                    "Cannot sort by '{}'; sortable columns: {}",
                    key,
                    R::sort_keys().join(", ")
                ))
            })
    }

    /// Header click: same key flips direction, a new key starts ascending
    pub fn toggle_sort(&mut self, key: &str) -> Result<SortConfig> {
        let key = Self::resolve_key(key)?;
        let next = match self.sort {
            Some(current) if current.key == key => SortConfig {
                key,
                direction: current.direction.flipped(),
            },
            _ => SortConfig {
                key,
                direction: SortDirection::Asc,
            },
        };
        self.sort = Some(next);
        Ok(next)
    }

    pub fn set_sort(&mut self, key: &str, direction: SortDirection) -> Result<SortConfig> {
        let key = Self::resolve_key(key)?;
        let config = SortConfig { key, direction };
        self.sort = Some(config);
        Ok(config)
    }

    pub fn clear_sort(&mut self) {
        self.sort = None;
    }

    fn matches(&self, row: &R) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let term = self.search.to_lowercase();
        row.search_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(&term))
    }

    /// Filtered rows, sorted when a sort is active; fetch order otherwise
    pub fn apply<'a>(&self, rows: &'a [R]) -> Vec<&'a R> {
        let mut visible: Vec<&R> = rows.iter().filter(|r| self.matches(r)).collect();

        if let Some(SortConfig { key, direction }) = self.sort {
            // Extract once; `sort_by` is stable so equal keys keep fetch order
            let mut keyed: Vec<(SortValue, &R)> =
                visible.into_iter().map(|r| (r.sort_value(key), r)).collect();
            keyed.sort_by(|(a, _), (b, _)| compare_for(a, b, direction));
            visible = keyed.into_iter().map(|(_, r)| r).collect();
        }

        visible
    }

    /// Number of rows matching the current search
    pub fn filtered_len(&self, rows: &[R]) -> usize {
        rows.iter().filter(|r| self.matches(r)).count()
    }

    /// Current page of filtered, sorted rows
    pub fn page<'a>(&self, rows: &'a [R]) -> Page<'a, R> {
        let visible = self.apply(rows);
        let total_items = visible.len();
        let range = self.paginator.range(total_items);

        Page {
            items: visible[range].to_vec(),
            current_page: self.paginator.current_page(),
            total_pages: self.paginator.total_pages(total_items),
            total_items,
            can_go_back: self.paginator.can_go_back(),
            can_go_forward: self.paginator.can_go_forward(total_items),
        }
    }

    /// Jump to a zero-based page; out-of-range requests are ignored
    pub fn go_to_page(&mut self, page: usize, rows: &[R]) -> bool {
        let total = self.filtered_len(rows);
        self.paginator.go_to(page, total)
    }

    pub fn first_page(&mut self, rows: &[R]) -> bool {
        let total = self.filtered_len(rows);
        self.paginator.first(total)
    }

    pub fn previous_page(&mut self, rows: &[R]) -> bool {
        let total = self.filtered_len(rows);
        self.paginator.previous(total)
    }

    pub fn next_page(&mut self, rows: &[R]) -> bool {
        let total = self.filtered_len(rows);
        self.paginator.next(total)
    }

    pub fn last_page(&mut self, rows: &[R]) -> bool {
        let total = self.filtered_len(rows);
        self.paginator.last(total)
    }

    /// Keep the cursor valid after rows were removed
    pub fn clamp_page(&mut self, rows: &[R]) {
        let total = self.filtered_len(rows);
        self.paginator.clamp(total);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        name: &'static str,
        qty: i64,
    }

    const COLUMNS: &[Column] = &[
        Column::sortable("name", "Name"),
        Column::sortable("qty", "Qty"),
        Column::fixed("actions", "Actions"),
    ];

    impl TableRow for Item {
        fn columns() -> &'static [Column] {
            COLUMNS
        }

        fn sort_value(&self, key: &str) -> SortValue {
            match key {
                "name" => SortValue::text(Some(self.name)),
                "qty" => SortValue::Number(self.qty as f64),
                _ => SortValue::Missing,
            }
        }

        fn search_fields(&self) -> Vec<Cow<'_, str>> {
            vec![Cow::Borrowed(self.name)]
        }

        fn cells(&self) -> Vec<String> {
            vec![self.name.to_string(), self.qty.to_string(), String::new()]
        }
    }

    fn items() -> Vec<Item> {
        vec![
            Item { name: "Gamma", qty: 2 },
            Item { name: "alpha", qty: 1 },
            Item { name: "Beta", qty: 2 },
            Item { name: "delta", qty: 1 },
        ]
    }

    fn names<'a>(rows: &[&'a Item]) -> Vec<&'a str> {
        rows.iter().map(|r| r.name).collect()
    }

    #[test]
    fn test_toggle_sort_flips_and_resets() {
        let mut view = TableView::<Item>::new(10);
        assert_eq!(view.toggle_sort("name").unwrap().direction, SortDirection::Asc);
        assert_eq!(view.toggle_sort("name").unwrap().direction, SortDirection::Desc);
        assert_eq!(view.toggle_sort("qty").unwrap().direction, SortDirection::Asc);
    }

    #[test]
    fn test_unsortable_key_rejected() {
        let mut view = TableView::<Item>::new(10);
        assert!(view.toggle_sort("actions").is_err());
        assert!(view.set_sort("nope", SortDirection::Asc).is_err());
        assert!(view.sort().is_none());
    }

    #[test]
    fn test_sort_by_name() {
        let rows = items();
        let mut view = TableView::<Item>::new(10);
        assert_eq!(names(&view.apply(&rows)), vec!["Gamma", "alpha", "Beta", "delta"]);

        view.toggle_sort("name").unwrap();
        assert_eq!(names(&view.apply(&rows)), vec!["alpha", "Beta", "delta", "Gamma"]);

        view.toggle_sort("name").unwrap();
        assert_eq!(names(&view.apply(&rows)), vec!["Gamma", "delta", "Beta", "alpha"]);
    }

    #[test]
    fn test_sort_is_stable_for_equal_keys() {
        let rows = items();
        let mut view = TableView::<Item>::new(10);
        view.set_sort("qty", SortDirection::Asc).unwrap();
        assert_eq!(names(&view.apply(&rows)), vec!["alpha", "delta", "Gamma", "Beta"]);

        view.set_sort("qty", SortDirection::Desc).unwrap();
        assert_eq!(names(&view.apply(&rows)), vec!["Gamma", "Beta", "alpha", "delta"]);
    }

    #[test]
    fn test_search_filters_and_resets_page() {
        let rows = items();
        let mut view = TableView::<Item>::new(1);
        assert!(view.go_to_page(3, &rows));

        view.set_search("ALP");
        assert_eq!(view.paginator().current_page(), 0);
        assert_eq!(names(&view.apply(&rows)), vec!["alpha"]);

        view.set_search("");
        assert_eq!(view.apply(&rows).len(), 4);
    }

    #[test]
    fn test_page_slices() {
        let rows = items();
        let mut view = TableView::<Item>::new(3);
        let page = view.page(&rows);
        assert_eq!(page.items.len(), 3);
        assert_eq!(page.total_pages, 2);
        assert!(page.can_go_forward);
        assert!(!page.can_go_back);

        assert!(view.next_page(&rows));
        let page = view.page(&rows);
        assert_eq!(names(&page.items), vec!["delta"]);
        assert!(!view.next_page(&rows));
    }

    #[test]
    fn test_clamp_after_removal() {
        let mut rows = items();
        let mut view = TableView::<Item>::new(2);
        assert!(view.last_page(&rows));
        rows.truncate(2);
        view.clamp_page(&rows);
        assert_eq!(view.paginator().current_page(), 0);
    }
}
