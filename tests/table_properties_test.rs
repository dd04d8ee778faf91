//! Property tests for the client-side table: stable sorting, pagination
//! coverage and search filtering

use std::borrow::Cow;
use proptest::prelude::*;
use ticketnow_admin::table::{Column, Paginator, SortDirection, SortValue, TableRow, TableView};

#[derive(Debug, Clone)]
struct Row {
    position: usize,
    rank: Option<i64>,
    label: String,
}

const COLUMNS: &[Column] = &[
    Column::fixed("position", "#"),
    Column::sortable("rank", "Rank"),
    Column::sortable("label", "Label"),
];

impl TableRow for Row {
    fn columns() -> &'static [Column] {
        COLUMNS
    }

    fn sort_value(&self, key: &str) -> SortValue {
        match key {
            "rank" => SortValue::number(self.rank.map(|r| r as f64)),
            "label" => SortValue::text(Some(self.label.as_str())),
            _ => SortValue::Missing,
        }
    }

    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        vec![Cow::Borrowed(self.label.as_str())]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.position.to_string(),
            self.rank.map(|r| r.to_string()).unwrap_or_default(),
            self.label.clone(),
        ]
    }
}

fn rows_strategy() -> impl Strategy<Value = Vec<Row>> {
    prop::collection::vec((prop::option::of(0i64..5), "[a-cA-C]{0,4}"), 0..60).prop_map(|items| {
        items
            .into_iter()
            .enumerate()
            .map(|(position, (rank, label))| Row { position, rank, label })
            .collect()
    })
}

proptest! {
    #[test]
    fn sort_is_stable_in_both_directions(rows in rows_strategy(), descending in any::<bool>()) {
        let direction = if descending { SortDirection::Desc } else { SortDirection::Asc };
        let mut view = TableView::<Row>::new(1000);
        view.set_sort("rank", direction).unwrap();

        let sorted = view.apply(&rows);
        prop_assert_eq!(sorted.len(), rows.len());

        for pair in sorted.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            match (a.rank, b.rank) {
                (Some(x), Some(y)) if x == y => prop_assert!(a.position < b.position),
                (Some(x), Some(y)) if descending => prop_assert!(x > y),
                (Some(x), Some(y)) => prop_assert!(x < y),
                // Missing ranks go last in either direction
                (None, Some(_)) => prop_assert!(false, "missing rank sorted before a present one"),
                (Some(_), None) => {}
                (None, None) => prop_assert!(a.position < b.position),
            }
        }
    }

    #[test]
    fn pages_cover_every_row_once(rows in rows_strategy(), page_size in 1usize..12) {
        let mut view = TableView::<Row>::new(page_size);
        let expected_pages = rows.len().div_ceil(page_size);
        prop_assert_eq!(view.page(&rows).total_pages, expected_pages);

        let mut seen = Vec::new();
        for page in 0..expected_pages {
            prop_assert!(view.go_to_page(page, &rows));
            let current = view.page(&rows);
            prop_assert!(current.items.len() <= page_size);
            seen.extend(current.items.iter().map(|r| r.position));
        }

        prop_assert_eq!(seen, (0..rows.len()).collect::<Vec<_>>());
        prop_assert!(!view.go_to_page(expected_pages, &rows));
    }

    #[test]
    fn search_filters_case_insensitively(rows in rows_strategy(), term in "[a-c]{1,2}") {
        let mut view = TableView::<Row>::new(5);
        view.go_to_page(1, &rows);
        view.set_search(term.to_uppercase());

        prop_assert_eq!(view.paginator().current_page(), 0);
        let matching = view.apply(&rows);
        prop_assert!(matching.iter().all(|r| r.label.to_lowercase().contains(&term)));
        let expected = rows.iter().filter(|r| r.label.to_lowercase().contains(&term)).count();
        prop_assert_eq!(matching.len(), expected);
    }

    #[test]
    fn clamp_keeps_page_in_range(total in 0usize..100, shrink_to in 0usize..100, page_size in 1usize..10) {
        let mut paginator = Paginator::new(page_size);
        paginator.last(total);
        paginator.clamp(shrink_to);

        let pages = paginator.total_pages(shrink_to);
        prop_assert!(paginator.current_page() < pages.max(1));
    }
}

#[test]
fn toggle_restarts_ascending_on_new_key() {
    let mut view = TableView::<Row>::new(10);
    assert_eq!(view.toggle_sort("rank").unwrap().direction, SortDirection::Asc);
    assert_eq!(view.toggle_sort("rank").unwrap().direction, SortDirection::Desc);
    assert_eq!(view.toggle_sort("label").unwrap().direction, SortDirection::Asc);
    assert!(view.toggle_sort("position").is_err());
}
