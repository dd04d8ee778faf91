//! Bookings screen
//!
//! Ticket reservations of the signed-in account on the events backend,
//! plus guest bookings and PDF ticket downloads.

use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::info;
use crate::models::{MessageResponse, TicketReservation};
use crate::services::{ServiceFactory, TicketReservationService};
use crate::table::{Column, SortValue, TableRow};
use crate::ui::{Confirmer, Dialog, Notice};
use crate::utils::errors::Result;
use crate::utils::helpers::{format_display_datetime, parse_amount};
use super::forms::{BookingForm, GuestDetails};
use super::{confirm_then, submit, Action, ListState, Outcome};

const BOOKING_COLUMNS: &[Column] = &[
    Column::sortable("reservation_id", "ID"),
    Column::sortable("event_id", "Event"),
    Column::sortable("quantity", "Quantity"),
    Column::sortable("total_price", "Total"),
    Column::sortable("reserved_at", "Reserved"),
    Column::fixed("guest_email", "Guest"),
];

impl TableRow for TicketReservation {
    fn columns() -> &'static [Column] {
        BOOKING_COLUMNS
    }

    fn sort_value(&self, key: &str) -> SortValue {
        match key {
            "reservation_id" => SortValue::number(Some(self.reservation_id as f64)),
            "event_id" => SortValue::number(self.event_id.map(|id| id as f64)),
            "quantity" => SortValue::number(Some(self.quantity as f64)),
            "total_price" => SortValue::number(parse_amount(&self.total_price)),
            "reserved_at" => SortValue::date(Some(&self.reserved_at)),
            _ => SortValue::Missing,
        }
    }

    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        let mut fields = vec![Cow::Owned(self.reservation_id.to_string())];
        fields.extend(self.guest_name.as_deref().map(Cow::Borrowed));
        fields.extend(self.guest_email.as_deref().map(Cow::Borrowed));
        fields
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.reservation_id.to_string(),
            self.event_id.map(|id| id.to_string()).unwrap_or_default(),
            self.quantity.to_string(),
            self.total_price.clone(),
            format_display_datetime(Some(&self.reserved_at)),
            self.guest_email.clone().unwrap_or_default(),
        ]
    }
}

/// File name used when saving a ticket PDF into a directory
pub fn ticket_file_name(reservation_id: i64) -> String {
    format!("ticket-{}.pdf", reservation_id)
}

pub struct BookingsScreen {
    service: TicketReservationService,
    list: ListState<TicketReservation>,
}

impl BookingsScreen {
    pub fn new(services: &ServiceFactory, page_size: usize) -> Self {
        Self {
            service: services.ticket_reservation_service.clone(),
            list: ListState::new(page_size),
        }
    }

    pub fn list(&self) -> &ListState<TicketReservation> {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut ListState<TicketReservation> {
        &mut self.list
    }

    pub async fn refresh(&mut self) {
        self.list.begin_load();
        let result = self.service.mine().await;
        self.list.finish_load(result, "Failed to load your reservations.");
    }

    /// Whether the backend still accepts the configured token
    pub async fn check_session(&self) -> Result<bool> {
        self.service.check_token().await
    }

    pub async fn create(&mut self, form: BookingForm, confirmer: &dyn Confirmer) -> Result<Outcome<TicketReservation>> {
        let payload = form.into_create()?;
        let action = Action {
            resource: "booking",
            name: "create",
            target: payload.event_id.to_string(),
        };
        let outcome = submit(
            confirmer,
            action,
            Notice::success("Reserved", "The tickets were reserved successfully."),
            "The tickets could not be reserved.",
            self.service.create(&payload),
        )
        .await;
        if outcome.is_done() {
            self.refresh().await;
        }
        Ok(outcome)
    }

    /// Guest bookings do not belong to the account, so the list is untouched
    pub async fn create_guest(
        &mut self,
        form: BookingForm,
        guest: GuestDetails,
        confirmer: &dyn Confirmer,
    ) -> Result<Outcome<TicketReservation>> {
        let payload = form.into_guest(guest)?;
        let action = Action {
            resource: "booking",
            name: "create_guest",
            target: payload.guest_email.clone(),
        };
        Ok(submit(
            confirmer,
            action,
            Notice::success("Reserved", "The guest tickets were reserved successfully."),
            "The guest tickets could not be reserved.",
            self.service.create_guest(&payload),
        )
        .await)
    }

    pub async fn update(
        &mut self,
        reservation_id: i64,
        form: BookingForm,
        confirmer: &dyn Confirmer,
    ) -> Result<Outcome<TicketReservation>> {
        let payload = form.into_update(reservation_id)?;
        let action = Action {
            resource: "booking",
            name: "update",
            target: reservation_id.to_string(),
        };
        let outcome = submit(
            confirmer,
            action,
            Notice::success("Updated", "The reservation was updated successfully."),
            "The reservation could not be updated.",
            self.service.update(&payload),
        )
        .await;
        if outcome.is_done() {
            self.refresh().await;
        }
        Ok(outcome)
    }

    /// Ask, cancel on the backend, then drop the row
    pub async fn cancel(&mut self, reservation_id: i64, confirmer: &dyn Confirmer) -> Result<Outcome<MessageResponse>> {
        let action = Action {
            resource: "booking",
            name: "cancel",
            target: reservation_id.to_string(),
        };
        let outcome = confirm_then(
            confirmer,
            Dialog::new("Cancel this reservation?", "Your tickets will be released.")
                .with_confirm_label("Yes, cancel"),
            action,
            Notice::success("Cancelled", "The reservation has been cancelled."),
            "The reservation could not be cancelled.",
            self.service.cancel(reservation_id),
        )
        .await?;
        if outcome.is_done() {
            self.list.remove_where(|r| r.reservation_id == reservation_id);
        }
        Ok(outcome)
    }

    /// Save the ticket PDF; a directory target gets `ticket-<id>.pdf` inside it
    pub async fn download_ticket(&self, reservation_id: i64, target: &Path) -> Result<PathBuf> {
        let bytes = self.service.pdf(reservation_id).await?;
        let path = if tokio::fs::metadata(target).await.map(|m| m.is_dir()).unwrap_or(false) {
            target.join(ticket_file_name(reservation_id))
        } else {
            target.to_path_buf()
        };
        tokio::fs::write(&path, &bytes).await?;
        info!(reservation_id = reservation_id, path = %path.display(), size = bytes.len(), "Ticket saved");
        Ok(path)
    }

    pub fn render(&self) -> String {
        self.list.render("My reservations")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn booking(id: i64, total: &str) -> TicketReservation {
        TicketReservation {
            reservation_id: id,
            user_id: Some(1),
            event_id: Some(10),
            quantity: 2,
            total_price: total.to_string(),
            reserved_at: "2025-04-02T10:15:00.000Z".to_string(),
            guest_email: None,
            guest_name: None,
            guest_phone: None,
        }
    }

    #[test]
    fn test_total_price_sorts_numerically() {
        assert_eq!(booking(1, "500.00").sort_value("total_price"), SortValue::Number(500.0));
        assert_eq!(booking(2, "n/a").sort_value("total_price"), SortValue::Missing);
    }

    #[test]
    fn test_ticket_file_name() {
        assert_eq!(ticket_file_name(42), "ticket-42.pdf");
    }
}
