//! Generic presentation utilities: error display, confirmation dialogs and
//! table rendering

pub mod confirm;
pub mod error_message;
pub mod render;

pub use confirm::{ConsoleConfirmer, Confirmer, Dialog, Notice, NoticeKind, ScriptedConfirmer};
pub use error_message::ErrorMessage;
pub use render::{render_footer, render_table};
