//! Payment logs screen
//!
//! Each log is shown with the guest behind its reservation. When the
//! reservation is unknown the reservation id is shown instead.

use std::borrow::Cow;
use crate::models::{CreatedId, PaymentLog, Reservation};
use crate::services::{PaymentLogService, ReservationService, ServiceFactory};
use crate::table::{Column, SortValue, TableRow};
use crate::ui::{Confirmer, Dialog, Notice};
use crate::utils::errors::Result;
use crate::utils::helpers::{format_amount, format_display_datetime};
use super::forms::PaymentLogForm;
use super::{confirm_then, submit, Action, DeleteOutcome, ListState, Outcome};

#[derive(Debug, Clone, PartialEq)]
pub struct PaymentRow {
    pub log: PaymentLog,
    pub guest_name: String,
}

impl PaymentRow {
    pub fn join(log: PaymentLog, reservations: &[Reservation]) -> Self {
        let guest_name = reservations
            .iter()
            .find(|r| r.id == log.reservation_id)
            .map(|r| r.user_id.clone())
            .unwrap_or_else(|| log.reservation_id.clone());
        Self { log, guest_name }
    }
}

const PAYMENT_COLUMNS: &[Column] = &[
    Column::fixed("id", "ID"),
    Column::sortable("guest_name", "Guest"),
    Column::sortable("status", "Status"),
    Column::sortable("amount", "Amount"),
    Column::sortable("registered_at", "Registered"),
    Column::sortable("created_at", "Created"),
];

impl TableRow for PaymentRow {
    fn columns() -> &'static [Column] {
        PAYMENT_COLUMNS
    }

    fn sort_value(&self, key: &str) -> SortValue {
        match key {
            "guest_name" => SortValue::text(Some(&self.guest_name)),
            "status" => SortValue::text(Some(self.log.status.as_str())),
            "amount" => SortValue::number(Some(self.log.amount)),
            "registered_at" => SortValue::date(self.log.registered_at.as_deref()),
            "created_at" => SortValue::date(self.log.created_at.as_deref()),
            _ => SortValue::Missing,
        }
    }

    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        vec![
            Cow::Borrowed(self.guest_name.as_str()),
            Cow::Borrowed(self.log.status.as_str()),
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.log.id.clone(),
            self.guest_name.clone(),
            self.log.status.to_string(),
            format_amount(self.log.amount),
            format_display_datetime(self.log.registered_at.as_deref()),
            format_display_datetime(self.log.created_at.as_deref()),
        ]
    }
}

pub struct PaymentLogsScreen {
    logs: PaymentLogService,
    reservations: ReservationService,
    known_reservations: Vec<Reservation>,
    list: ListState<PaymentRow>,
}

impl PaymentLogsScreen {
    pub fn new(services: &ServiceFactory, page_size: usize) -> Self {
        Self {
            logs: services.payment_log_service.clone(),
            reservations: services.reservation_service.clone(),
            known_reservations: Vec::new(),
            list: ListState::new(page_size),
        }
    }

    pub fn list(&self) -> &ListState<PaymentRow> {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut ListState<PaymentRow> {
        &mut self.list
    }

    /// Reservations offered by the payment form
    pub fn reservations(&self) -> &[Reservation] {
        &self.known_reservations
    }

    pub async fn refresh(&mut self) {
        self.list.begin_load();
        let loaded = tokio::try_join!(self.logs.list(), self.reservations.list());
        let rows = loaded.map(|(logs, reservations)| {
            let rows = logs
                .into_iter()
                .map(|log| PaymentRow::join(log, &reservations))
                .collect::<Vec<_>>();
            self.known_reservations = reservations;
            rows
        });
        self.list.finish_load(rows, "Failed to load payments or reservations.");
    }

    pub async fn get(&self, id: &str) -> Result<PaymentLog> {
        self.logs.get(id).await
    }

    pub async fn create(&mut self, form: PaymentLogForm, confirmer: &dyn Confirmer) -> Result<Outcome<CreatedId>> {
        let payload = form.into_new(&self.known_reservations)?;
        let action = Action {
            resource: "payment_log",
            name: "create",
            target: payload.reservation_id.clone(),
        };
        let outcome = submit(
            confirmer,
            action,
            Notice::success("Created", "The payment was registered successfully."),
            "The payment could not be registered.",
            self.logs.create(&payload),
        )
        .await;
        if outcome.is_done() {
            self.refresh().await;
        }
        Ok(outcome)
    }

    pub async fn update(&mut self, id: &str, form: PaymentLogForm, confirmer: &dyn Confirmer) -> Result<Outcome<()>> {
        let changes = form.into_update(&self.known_reservations)?;
        let action = Action {
            resource: "payment_log",
            name: "update",
            target: id.to_string(),
        };
        let outcome = submit(
            confirmer,
            action,
            Notice::success("Updated", "The payment was updated successfully."),
            "The payment could not be updated.",
            self.logs.update(id, &changes),
        )
        .await;
        if outcome.is_done() {
            self.refresh().await;
        }
        Ok(outcome)
    }

    pub async fn delete(&mut self, id: &str, confirmer: &dyn Confirmer) -> Result<DeleteOutcome> {
        let action = Action {
            resource: "payment_log",
            name: "delete",
            target: id.to_string(),
        };
        let outcome = confirm_then(
            confirmer,
            Dialog::delete("Delete this payment?"),
            action,
            Notice::success("Deleted", "The payment has been deleted."),
            "The payment could not be deleted.",
            self.logs.delete(id),
        )
        .await?;
        if outcome.is_done() {
            self.list.remove_where(|r| r.log.id == id);
        }
        Ok(outcome)
    }

    pub fn render(&self) -> String {
        self.list.render("Payments")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log(id: &str, reservation_id: &str) -> PaymentLog {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "reservation_id": reservation_id,
            "status": "approved",
            "amount": "120.5"
        }))
        .unwrap()
    }

    #[test]
    fn test_guest_falls_back_to_reservation_id() {
        let reservations: Vec<Reservation> = serde_json::from_value(serde_json::json!([
            {"id": "r1", "event_id": "e1", "user_id": "maria", "status": "confirmed", "total_amount": 120.5}
        ]))
        .unwrap();

        assert_eq!(PaymentRow::join(log("p1", "r1"), &reservations).guest_name, "maria");
        assert_eq!(PaymentRow::join(log("p2", "r404"), &reservations).guest_name, "r404");
    }

    #[test]
    fn test_status_is_searchable() {
        let row = PaymentRow::join(log("p1", "r1"), &[]);
        assert!(row.search_fields().iter().any(|f| *f == "approved"));
        assert_eq!(row.cells()[3], "120.50");
    }
}
