//! TicketNow Admin
//!
//! Administrative console for the TicketNow event-ticketing platform.
//! This library provides REST clients for the events and payments backends,
//! client-side table state (search, sort, pagination) and one screen per
//! managed resource, with confirmation dialogs around destructive actions.

pub mod config;
pub mod models;
pub mod services;
pub mod table;
pub mod ui;
pub mod screens;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{AdminError, Result};

// Re-export main components for easy access
pub use services::ServiceFactory;
pub use table::{SortDirection, TableView};
pub use ui::{Confirmer, ConsoleConfirmer, ScriptedConfirmer};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
