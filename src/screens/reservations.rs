//! Reservations screen
//!
//! Reservations are created by the checkout flow; here they can be viewed,
//! moved between statuses, cancelled or deleted.

use std::borrow::Cow;
use crate::models::{Reservation, ReservationStatus};
use crate::services::{ReservationService, ServiceFactory};
use crate::table::{Column, SortValue, TableRow};
use crate::ui::{Confirmer, Dialog, Notice};
use crate::utils::errors::Result;
use crate::utils::helpers::{format_amount, format_display_datetime};
use super::forms::ReservationForm;
use super::{confirm_then, submit, Action, DeleteOutcome, ListState, Outcome};

const RESERVATION_COLUMNS: &[Column] = &[
    Column::fixed("id", "ID"),
    Column::sortable("user_id", "User"),
    Column::sortable("event_id", "Event"),
    Column::fixed("tickets", "Tickets"),
    Column::sortable("total_amount", "Total"),
    Column::sortable("status", "Status"),
    Column::sortable("created_at", "Created"),
];

impl TableRow for Reservation {
    fn columns() -> &'static [Column] {
        RESERVATION_COLUMNS
    }

    fn sort_value(&self, key: &str) -> SortValue {
        match key {
            "user_id" => SortValue::text(Some(&self.user_id)),
            "event_id" => SortValue::text(Some(&self.event_id)),
            "total_amount" => SortValue::number(Some(self.total_amount)),
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
        let total = match &self.currency {
            Some(currency) => format!("{} {}", format_amount(self.total_amount), currency),
            None => format_amount(self.total_amount),
        };
        vec![
            self.id.clone(),
            self.user_id.clone(),
            self.event_id.clone(),
            self.ticket_count().to_string(),
            total,
            self.status.to_string(),
            format_display_datetime(self.created_at.as_deref()),
        ]
    }
}

pub struct ReservationsScreen {
    service: ReservationService,
    list: ListState<Reservation>,
}

impl ReservationsScreen {
    pub fn new(services: &ServiceFactory, page_size: usize) -> Self {
        Self {
            service: services.reservation_service.clone(),
            list: ListState::new(page_size),
        }
    }

    pub fn list(&self) -> &ListState<Reservation> {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut ListState<Reservation> {
        &mut self.list
    }

    pub async fn refresh(&mut self) {
        self.list.begin_load();
        let result = self.service.list().await;
        self.list.finish_load(result, "Failed to load reservations.");
    }

    pub async fn get(&self, id: &str) -> Result<Reservation> {
        self.service.get(id).await
    }

    /// Change the status (and optionally the cancellation reason)
    pub async fn update(&mut self, id: &str, form: ReservationForm, confirmer: &dyn Confirmer) -> Result<Outcome<()>> {
        let changes = form.into_update()?;
        let action = Action {
            resource: "reservation",
            name: "update",
            target: id.to_string(),
        };
        let outcome = submit(
            confirmer,
            action,
            Notice::success("Updated", "The reservation was updated successfully."),
            "The reservation could not be updated.",
            self.service.update(id, &changes),
        )
        .await;
        if outcome.is_done() {
            self.refresh().await;
        }
        Ok(outcome)
    }

    /// Ask, then mark the reservation cancelled
    pub async fn cancel(&mut self, id: &str, reason: Option<&str>, confirmer: &dyn Confirmer) -> Result<Outcome<()>> {
        let action = Action {
            resource: "reservation",
            name: "cancel",
            target: id.to_string(),
        };
        let outcome = confirm_then(
            confirmer,
            Dialog::new("Cancel this reservation?", "The tickets will be released.")
                .with_confirm_label("Yes, cancel"),
            action,
            Notice::success("Cancelled", "The reservation has been cancelled."),
            "The reservation could not be cancelled.",
            self.service.cancel(id, reason),
        )
        .await?;
        if outcome.is_done() {
            let reason = reason.map(str::to_string);
            self.list.update_where(
                |r| r.id == id,
                |r| {
                    r.status = ReservationStatus::Cancelled;
                    r.cancellation_reason = reason.clone();
                },
            );
        }
        Ok(outcome)
    }

    pub async fn delete(&mut self, id: &str, confirmer: &dyn Confirmer) -> Result<DeleteOutcome> {
        let action = Action {
            resource: "reservation",
            name: "delete",
            target: id.to_string(),
        };
        let outcome = confirm_then(
            confirmer,
            Dialog::delete("Delete this reservation?"),
            action,
            Notice::success("Deleted", "The reservation has been deleted."),
            "The reservation could not be deleted.",
            self.service.delete(id),
        )
        .await?;
        if outcome.is_done() {
            self.list.remove_where(|r| r.id == id);
        }
        Ok(outcome)
    }

    pub fn render(&self) -> String {
        self.list.render("Reservations")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cells_show_ticket_count_and_currency() {
        let reservation: Reservation = serde_json::from_value(serde_json::json!({
            "id": "r1",
            "event_id": "e1",
            "user_id": "u1",
            "status": "pending",
            "total_amount": "300",
            "currency": "MXN",
            "tickets": [
                {"ticket_type_id": "t1", "quantity": 2, "unit_price": 100, "subtotal": 200},
                {"ticket_type_id": "t2", "quantity": 1, "unit_price": "100", "subtotal": "100"}
            ]
        }))
        .unwrap();

        let cells = reservation.cells();
        assert_eq!(cells[3], "3");
        assert_eq!(cells[4], "300.00 MXN");
        assert_eq!(reservation.sort_value("tickets"), SortValue::Missing);
    }
}
