//! Client-side table state shared by every list screen
//!
//! Rows are fetched in full and then filtered, sorted and paginated in
//! memory. Sorting is stable: rows with equal keys keep their fetch order in
//! both directions.

pub mod sort;
pub mod paginator;
pub mod view;

pub use sort::{SortConfig, SortDirection, SortValue};
pub use paginator::Paginator;
pub use view::{Column, Page, TableRow, TableView};
