//! Waiting queue screen

use std::borrow::Cow;
use crate::models::{CreatedId, QueueStatus, WaitingQueue};
use crate::services::{ServiceFactory, WaitingQueueService};
use crate::table::{Column, SortValue, TableRow};
use crate::ui::{Confirmer, Dialog, Notice};
use crate::utils::errors::Result;
use crate::utils::helpers::format_display_datetime;
use super::forms::WaitingQueueForm;
use super::{confirm_then, submit, Action, DeleteOutcome, ListState, Outcome};

const QUEUE_COLUMNS: &[Column] = &[
    Column::fixed("id", "ID"),
    Column::sortable("user_id", "User"),
    Column::sortable("event_id", "Event"),
    Column::fixed("reservation_id", "Reservation"),
    Column::sortable("status", "Status"),
    Column::sortable("created_at", "Joined"),
];

impl TableRow for WaitingQueue {
    fn columns() -> &'static [Column] {
        QUEUE_COLUMNS
    }

    fn sort_value(&self, key: &str) -> SortValue {
        match key {
            "user_id" => SortValue::text(Some(&self.user_id)),
            "event_id" => SortValue::text(Some(&self.event_id)),
            "status" => SortValue::text(Some(self.status.as_str())),
            "created_at" => SortValue::date(self.created_at.as_deref()),
            _ => SortValue::Missing,
        }
    }

    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        vec![
            Cow::Borrowed(self.user_id.as_str()),
            Cow::Borrowed(self.event_id.as_str()),
            Cow::Borrowed(self.status.as_str()),
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone().unwrap_or_default(),
            self.user_id.clone(),
            self.event_id.clone(),
            self.reservation_id.clone(),
            self.status.to_string(),
            format_display_datetime(self.created_at.as_deref()),
        ]
    }
}

pub struct WaitingQueuesScreen {
    service: WaitingQueueService,
    list: ListState<WaitingQueue>,
}

impl WaitingQueuesScreen {
    pub fn new(services: &ServiceFactory, page_size: usize) -> Self {
        Self {
            service: services.waiting_queue_service.clone(),
            list: ListState::new(page_size),
        }
    }

    pub fn list(&self) -> &ListState<WaitingQueue> {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut ListState<WaitingQueue> {
        &mut self.list
    }

    pub async fn refresh(&mut self) {
        self.list.begin_load();
        let result = self.service.list().await;
        self.list.finish_load(result, "Failed to load the waiting queue.");
    }

    pub async fn get(&self, id: &str) -> Result<WaitingQueue> {
        self.service.get(id).await
    }

    pub async fn create(&mut self, form: WaitingQueueForm, confirmer: &dyn Confirmer) -> Result<Outcome<CreatedId>> {
        let payload = form.into_new()?;
        let action = Action {
            resource: "waiting_queue",
            name: "create",
            target: payload.reservation_id.clone(),
        };
        let outcome = submit(
            confirmer,
            action,
            Notice::success("Created", "The entry was added to the waiting queue."),
            "The entry could not be added to the waiting queue.",
            self.service.create(&payload),
        )
        .await;
        if outcome.is_done() {
            self.refresh().await;
        }
        Ok(outcome)
    }

    /// Ask, then mark the entry as notified
    pub async fn notify(&mut self, id: &str, confirmer: &dyn Confirmer) -> Result<Outcome<()>> {
        let action = Action {
            resource: "waiting_queue",
            name: "notify",
            target: id.to_string(),
        };
        let outcome = confirm_then(
            confirmer,
            Dialog::new("Notify this user?", "They will be invited to complete the purchase.")
                .with_confirm_label("Yes, notify"),
            action,
            Notice::success("Notified", "The user has been notified."),
            "The user could not be notified.",
            self.service.notify(id),
        )
        .await?;
        if outcome.is_done() {
            self.list
                .update_where(|q| q.id.as_deref() == Some(id), |q| q.status = QueueStatus::Notified);
        }
        Ok(outcome)
    }

    pub async fn delete(&mut self, id: &str, confirmer: &dyn Confirmer) -> Result<DeleteOutcome> {
        let action = Action {
            resource: "waiting_queue",
            name: "delete",
            target: id.to_string(),
        };
        let outcome = confirm_then(
            confirmer,
            Dialog::delete("Remove this entry from the waiting queue?"),
            action,
            Notice::success("Deleted", "The entry has been removed."),
            "The entry could not be removed.",
            self.service.delete(id),
        )
        .await?;
        if outcome.is_done() {
            self.list.remove_where(|q| q.id.as_deref() == Some(id));
        }
        Ok(outcome)
    }

    pub fn render(&self) -> String {
        self.list.render("Waiting queue")
    }
}
