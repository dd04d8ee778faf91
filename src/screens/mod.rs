//! Screens module
//!
//! One screen per resource. Each composes the generic table state, the
//! error display and the confirmation dialogs with the REST clients it
//! needs.

pub mod forms;
pub mod events;
pub mod event_types;
pub mod payment_logs;
pub mod reservations;
pub mod ticket_types;
pub mod waiting_queues;
pub mod users;
pub mod bookings;

pub use events::{EventRow, EventsScreen};
pub use event_types::EventTypesScreen;
pub use payment_logs::{PaymentRow, PaymentLogsScreen};
pub use reservations::ReservationsScreen;
pub use ticket_types::TicketTypesScreen;
pub use waiting_queues::WaitingQueuesScreen;
pub use users::UsersScreen;
pub use bookings::BookingsScreen;

use std::future::Future;
use tracing::warn;
use crate::table::{Page, SortConfig, SortDirection, TableRow, TableView};
use crate::ui::{render_table, Confirmer, Dialog, ErrorMessage, Notice};
use crate::utils::errors::{AdminError, Result};
use crate::utils::logging::{log_admin_action, log_admin_cancelled};

/// Result of a confirmed mutation
#[derive(Debug)]
pub enum Outcome<T> {
    Done(T),
    Cancelled,
    Failed(AdminError),
}

impl<T> Outcome<T> {
    pub fn is_done(&self) -> bool {
        matches!(self, Outcome::Done(_))
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Outcome::Cancelled)
    }
}

/// Result of a delete (or status toggle) confirmed through a dialog
pub type DeleteOutcome = Outcome<()>;

/// Rows plus their table state, loading flag and last error
#[derive(Debug)]
pub struct ListState<R> {
    rows: Vec<R>,
    view: TableView<R>,
    loading: bool,
    error: Option<ErrorMessage>,
}

impl<R: TableRow> ListState<R> {
    pub fn new(page_size: usize) -> Self {
        Self {
            rows: Vec::new(),
            view: TableView::new(page_size),
            loading: false,
            error: None,
        }
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn error(&self) -> Option<&ErrorMessage> {
        self.error.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn view(&self) -> &TableView<R> {
        &self.view
    }

    pub(crate) fn begin_load(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Store fetched rows, or keep the previous ones and record the failure
    pub(crate) fn finish_load(&mut self, result: Result<Vec<R>>, failure: &str) {
        self.loading = false;
        match result {
            Ok(rows) => {
                self.rows = rows;
                self.view.clamp_page(&self.rows);
            }
            Err(e) => {
                warn!(error = %e, "{}", failure);
                self.error = Some(ErrorMessage::with_cause(failure, &e));
            }
        }
    }

    pub(crate) fn set_error(&mut self, message: ErrorMessage) {
        self.error = Some(message);
    }

    /// Drop rows matching `pred`; returns how many were removed
    pub(crate) fn remove_where(&mut self, pred: impl Fn(&R) -> bool) -> usize {
        let before = self.rows.len();
        self.rows.retain(|r| !pred(r));
        self.view.clamp_page(&self.rows);
        before - self.rows.len()
    }

    pub(crate) fn update_where(&mut self, pred: impl Fn(&R) -> bool, apply: impl Fn(&mut R)) {
        self.rows.iter_mut().filter(|r| pred(r)).for_each(apply);
    }

    pub fn search(&mut self, term: &str) {
        self.view.set_search(term);
    }

    pub fn toggle_sort(&mut self, key: &str) -> Result<SortConfig> {
        self.view.toggle_sort(key)
    }

    pub fn set_sort(&mut self, key: &str, direction: SortDirection) -> Result<SortConfig> {
        self.view.set_sort(key, direction)
    }

    pub fn go_to_page(&mut self, page: usize) -> bool {
        self.view.go_to_page(page, &self.rows)
    }

    pub fn next_page(&mut self) -> bool {
        self.view.next_page(&self.rows)
    }

    pub fn previous_page(&mut self) -> bool {
        self.view.previous_page(&self.rows)
    }

    pub fn first_page(&mut self) -> bool {
        self.view.first_page(&self.rows)
    }

    pub fn last_page(&mut self) -> bool {
        self.view.last_page(&self.rows)
    }

    /// Current page of filtered and sorted rows
    pub fn visible(&self) -> Page<'_, R> {
        self.view.page(&self.rows)
    }

    /// Error line (if any) followed by the table
    pub fn render(&self, title: &str) -> String {
        let mut out = String::new();
        if let Some(error) = &self.error {
            out.push_str(&format!("{}\n", error));
        }
        if self.loading {
            out.push_str("Loading…\n");
            return out;
        }
        out.push_str(&render_table(title, &self.visible(), self.view.sort()));
        out
    }
}

/// Labels used for logging and notices around a mutation
pub(crate) struct Action<'a> {
    pub resource: &'a str,
    pub name: &'a str,
    pub target: String,
}

/// Ask first, then run `call`; notify the outcome either way
pub(crate) async fn confirm_then<T, Fut>(
    confirmer: &dyn Confirmer,
    dialog: Dialog,
    action: Action<'_>,
    success: Notice,
    failure: &str,
    call: Fut,
) -> Result<Outcome<T>>
where
    Fut: Future<Output = Result<T>>,
{
    if !confirmer.confirm(&dialog)? {
        log_admin_cancelled(action.resource, action.name, Some(&action.target));
        return Ok(Outcome::Cancelled);
    }
    Ok(submit(confirmer, action, success, failure, call).await)
}

/// Run `call` and notify; used by forms, where submitting is the confirmation
pub(crate) async fn submit<T, Fut>(
    confirmer: &dyn Confirmer,
    action: Action<'_>,
    success: Notice,
    failure: &str,
    call: Fut,
) -> Outcome<T>
where
    Fut: Future<Output = Result<T>>,
{
    match call.await {
        Ok(value) => {
            log_admin_action(action.resource, action.name, Some(&action.target), None);
            confirmer.notify(&success);
            Outcome::Done(value)
        }
        Err(e) => {
            warn!(resource = action.resource, action = action.name, error = %e, "Admin action failed");
            confirmer.notify(&Notice::error(failure));
            Outcome::Failed(e)
        }
    }
}
