//! Create/edit forms and their validation
//!
//! A form is filled (from flags or from an existing record), validated
//! without touching the network, and turned into the payload its service
//! expects.

use std::path::PathBuf;
use crate::models::{
    CreateEventPayload, CreateGuestReservationPayload, CreateTicketReservationPayload, CreateEventTypePayload, Event, EventType, NewPaymentLog, PaymentLog,
    PaymentLogUpdate, PaymentStatus, QueueStatus, Reservation, ReservationStatus,
    ReservationUpdate, TicketType, TicketTypeUpdate, UpdateEventPayload, UpdateEventTypePayload,
    UpdateTicketReservationPayload, UpdateUserPayload, User, WaitingQueue,
};
use crate::utils::errors::{AdminError, Result};
use crate::utils::helpers::{is_valid_email, is_valid_phone, parse_timestamp, to_datetime_local};

fn required(value: &str, message: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AdminError::validation(message));
    }
    Ok(trimmed.to_string())
}

fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn check_window(start: &str, end: &str, what: &str) -> Result<()> {
    let start_at = parse_timestamp(start)
        .ok_or_else(|| AdminError::validation(format!("{} start is not a valid date", what)))?;
    let end_at = parse_timestamp(end)
        .ok_or_else(|| AdminError::validation(format!("{} end is not a valid date", what)))?;
    if end_at < start_at {
        return Err(AdminError::validation(format!("{} end cannot be before its start", what)));
    }
    Ok(())
}

/// Event create/edit form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventForm {
    pub event_name: String,
    pub description: String,
    pub short_description: String,
    pub event_type_id: Option<i64>,
    pub start_datetime: String,
    pub end_datetime: String,
    pub capacity: i64,
    /// Left out of the request when absent
    pub base_price: Option<f64>,
    pub image_path: Option<PathBuf>,
}

impl EventForm {
    /// Prefill from an existing event; dates become `YYYY-MM-DDTHH:MM`
    pub fn from_event(event: &Event) -> Self {
        Self {
            event_name: event.event_name.clone(),
            description: event.description.clone().unwrap_or_default(),
            short_description: event.short_description.clone().unwrap_or_default(),
            event_type_id: event.event_type_id,
            start_datetime: to_datetime_local(&event.start_datetime).unwrap_or_default(),
            end_datetime: to_datetime_local(&event.end_datetime).unwrap_or_default(),
            capacity: event.capacity,
            base_price: event.base_price,
            image_path: None,
        }
    }

    fn check(&self, types: &[EventType]) -> Result<String> {
        let name = required(&self.event_name, "Name is required")?;
        let type_id = self
            .event_type_id
            .ok_or_else(|| AdminError::validation("Select an event type"))?;
        if !types.iter().any(|t| t.event_type_id == type_id) {
            return Err(AdminError::validation(format!("Unknown event type {}", type_id)));
        }
        check_window(&self.start_datetime, &self.end_datetime, "Event")?;
        if self.capacity < 0 {
            return Err(AdminError::validation("Capacity cannot be negative"));
        }
        if self.base_price.is_some_and(|p| p < 0.0 || p.is_nan()) {
            return Err(AdminError::validation("Price cannot be negative"));
        }
        Ok(name)
    }

    pub fn into_create(self, types: &[EventType]) -> Result<CreateEventPayload> {
        let event_name = self.check(types)?;
        Ok(CreateEventPayload {
            event_name,
            description: optional(&self.description),
            short_description: optional(&self.short_description),
            event_type_id: self.event_type_id,
            start_datetime: self.start_datetime.trim().to_string(),
            end_datetime: self.end_datetime.trim().to_string(),
            capacity: self.capacity,
            base_price: self.base_price,
            image_path: self.image_path,
        })
    }

    pub fn into_update(self, event_id: i64, types: &[EventType]) -> Result<UpdateEventPayload> {
        let event_name = self.check(types)?;
        Ok(UpdateEventPayload {
            event_id,
            event_name: Some(event_name),
            description: optional(&self.description),
            short_description: optional(&self.short_description),
            event_type_id: self.event_type_id,
            start_datetime: Some(self.start_datetime.trim().to_string()),
            end_datetime: Some(self.end_datetime.trim().to_string()),
            capacity: Some(self.capacity),
            base_price: self.base_price,
            image_path: self.image_path,
        })
    }
}

/// Event type create/edit form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventTypeForm {
    pub type_name: String,
    pub description: String,
}

impl EventTypeForm {
    pub fn from_event_type(event_type: &EventType) -> Self {
        Self {
            type_name: event_type.type_name.clone(),
            description: event_type.description.clone().unwrap_or_default(),
        }
    }

    pub fn into_create(self) -> Result<CreateEventTypePayload> {
        Ok(CreateEventTypePayload {
            type_name: required(&self.type_name, "Name is required")?,
            description: optional(&self.description),
        })
    }

    pub fn into_update(self, event_type_id: i64) -> Result<UpdateEventTypePayload> {
        let CreateEventTypePayload { type_name, description } = self.into_create()?;
        Ok(UpdateEventTypePayload {
            event_type_id,
            type_name,
            description,
        })
    }
}

/// Payment log create/edit form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaymentLogForm {
    pub reservation_id: String,
    pub status: Option<PaymentStatus>,
    pub amount: f64,
}

impl PaymentLogForm {
    pub fn from_log(log: &PaymentLog) -> Self {
        Self {
            reservation_id: log.reservation_id.clone(),
            status: Some(log.status),
            amount: log.amount,
        }
    }

    fn check(&self, reservations: &[Reservation]) -> Result<(String, PaymentStatus)> {
        let reservation_id = required(&self.reservation_id, "Select a reservation")?;
        if !reservations.iter().any(|r| r.id == reservation_id) {
            return Err(AdminError::validation(format!("Unknown reservation {}", reservation_id)));
        }
        let status = self.status.ok_or_else(|| AdminError::validation("Select a status"))?;
        if self.amount <= 0.0 || self.amount.is_nan() {
            return Err(AdminError::validation("Enter a valid amount"));
        }
        Ok((reservation_id, status))
    }

    pub fn into_new(self, reservations: &[Reservation]) -> Result<NewPaymentLog> {
        let (reservation_id, status) = self.check(reservations)?;
        Ok(NewPaymentLog {
            reservation_id,
            status,
            amount: self.amount,
            gateway_response: None,
        })
    }

    pub fn into_update(self, reservations: &[Reservation]) -> Result<PaymentLogUpdate> {
        let (reservation_id, status) = self.check(reservations)?;
        Ok(PaymentLogUpdate {
            reservation_id: Some(reservation_id),
            status: Some(status),
            amount: Some(self.amount),
        })
    }
}

/// Reservation edit form; the payments backend owns everything but status
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReservationForm {
    pub status: Option<ReservationStatus>,
    pub cancellation_reason: Option<String>,
}

impl ReservationForm {
    pub fn into_update(self) -> Result<ReservationUpdate> {
        let reason = self.cancellation_reason.as_deref().and_then(optional);
        if self.status.is_none() && reason.is_none() {
            return Err(AdminError::validation("Nothing to update"));
        }
        if reason.is_some() && !matches!(self.status, None | Some(ReservationStatus::Cancelled)) {
            return Err(AdminError::validation(
                "A cancellation reason only applies to cancelled reservations",
            ));
        }
        Ok(ReservationUpdate {
            status: self.status,
            cancellation_reason: reason,
            ..Default::default()
        })
    }
}

/// Ticket type create/edit form
#[derive(Debug, Clone, PartialEq)]
pub struct TicketTypeForm {
    pub event_id: String,
    pub name: String,
    pub price: f64,
    pub max_quantity: i64,
    pub current_stock: i64,
    pub is_active: bool,
    pub sales_start_at: String,
    pub sales_end_at: String,
}

impl TicketTypeForm {
    pub fn from_ticket_type(ticket_type: &TicketType) -> Self {
        Self {
            event_id: ticket_type.event_id.clone(),
            name: ticket_type.name.clone(),
            price: ticket_type.price,
            max_quantity: ticket_type.max_quantity,
            current_stock: ticket_type.current_stock,
            is_active: ticket_type.is_active,
            sales_start_at: ticket_type.sales_start_at.clone(),
            sales_end_at: ticket_type.sales_end_at.clone(),
        }
    }

    fn check(&self) -> Result<()> {
        required(&self.event_id, "Select an event")?;
        required(&self.name, "Name is required")?;
        if self.price < 0.0 || self.price.is_nan() {
            return Err(AdminError::validation("Price cannot be negative"));
        }
        if self.max_quantity < 0 || self.current_stock < 0 {
            return Err(AdminError::validation("Quantities cannot be negative"));
        }
        if self.current_stock > self.max_quantity {
            return Err(AdminError::validation("Current stock cannot exceed the maximum quantity"));
        }
        check_window(&self.sales_start_at, &self.sales_end_at, "Sales window")
    }

    pub fn into_new(self) -> Result<TicketType> {
        self.check()?;
        Ok(TicketType {
            id: None,
            event_id: self.event_id.trim().to_string(),
            name: self.name.trim().to_string(),
            price: self.price,
            max_quantity: self.max_quantity,
            current_stock: self.current_stock,
            is_active: self.is_active,
            sales_start_at: self.sales_start_at,
            sales_end_at: self.sales_end_at,
            metadata: None,
            created_at: None,
            updated_at: None,
        })
    }

    pub fn into_update(self) -> Result<TicketTypeUpdate> {
        self.check()?;
        Ok(TicketTypeUpdate {
            name: Some(self.name.trim().to_string()),
            price: Some(self.price),
            max_quantity: Some(self.max_quantity),
            current_stock: Some(self.current_stock),
            is_active: Some(self.is_active),
            sales_start_at: Some(self.sales_start_at),
            sales_end_at: Some(self.sales_end_at),
        })
    }
}

/// Waiting queue entry form
#[derive(Debug, Clone, PartialEq)]
pub struct WaitingQueueForm {
    pub reservation_id: String,
    pub event_id: String,
    pub user_id: String,
    pub status: QueueStatus,
}

impl WaitingQueueForm {
    pub fn into_new(self) -> Result<WaitingQueue> {
        Ok(WaitingQueue {
            id: None,
            reservation_id: required(&self.reservation_id, "Reservation is required")?,
            event_id: required(&self.event_id, "Event is required")?,
            user_id: required(&self.user_id, "User is required")?,
            status: self.status,
            created_at: None,
            updated_at: None,
        })
    }
}

/// Profile edit form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserForm {
    pub username: Option<String>,
    pub phone: Option<String>,
}

impl UserForm {
    pub fn from_user(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            phone: user.phone.clone(),
        }
    }

    pub fn into_update(self, user_id: i64) -> Result<UpdateUserPayload> {
        if let Some(username) = &self.username {
            required(username, "Username cannot be blank")?;
        }
        if let Some(phone) = self.phone.as_deref().map(str::trim).filter(|p| !p.is_empty()) {
            if !is_valid_phone(phone) {
                return Err(AdminError::validation("Phone number is not valid"));
            }
        }
        Ok(UpdateUserPayload {
            user_id,
            username: self.username.map(|u| u.trim().to_string()),
            phone: self.phone.as_deref().and_then(optional),
        })
    }
}

/// Ticket booking form, for a signed-in user or a guest
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingForm {
    pub event_id: i64,
    pub quantity: i64,
}

impl BookingForm {
    fn check(&self) -> Result<()> {
        if self.event_id <= 0 {
            return Err(AdminError::validation("Select an event"));
        }
        if self.quantity < 1 {
            return Err(AdminError::validation("Quantity must be at least 1"));
        }
        Ok(())
    }

    pub fn into_create(self) -> Result<CreateTicketReservationPayload> {
        self.check()?;
        Ok(CreateTicketReservationPayload {
            event_id: self.event_id,
            quantity: self.quantity,
        })
    }

    pub fn into_guest(self, guest: GuestDetails) -> Result<CreateGuestReservationPayload> {
        self.check()?;
        let guest_name = required(&guest.name, "Guest name is required")?;
        let guest_email = required(&guest.email, "Guest email is required")?;
        if !is_valid_email(&guest_email) {
            return Err(AdminError::validation("Guest email is not valid"));
        }
        let guest_phone = required(&guest.phone, "Guest phone is required")?;
        if !is_valid_phone(&guest_phone) {
            return Err(AdminError::validation("Phone number is not valid"));
        }
        Ok(CreateGuestReservationPayload {
            event_id: self.event_id,
            quantity: self.quantity,
            guest_name,
            guest_email,
            guest_phone,
        })
    }

    pub fn into_update(self, reservation_id: i64) -> Result<UpdateTicketReservationPayload> {
        if self.quantity < 1 {
            return Err(AdminError::validation("Quantity must be at least 1"));
        }
        Ok(UpdateTicketReservationPayload {
            reservation_id,
            quantity: self.quantity,
        })
    }
}

/// Contact details for a booking made without an account
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GuestDetails {
    pub name: String,
    pub email: String,
    pub phone: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn concert_type() -> EventType {
        EventType {
            event_type_id: 1,
            type_name: "Concert".to_string(),
            description: None,
            is_active: Some(true),
            created_at: None,
            updated_at: None,
        }
    }

    fn event_form() -> EventForm {
        EventForm {
            event_name: "  Summer Fest ".to_string(),
            event_type_id: Some(1),
            start_datetime: "2025-07-01T18:00".to_string(),
            end_datetime: "2025-07-01T23:30".to_string(),
            capacity: 500,
            base_price: Some(250.0),
            ..Default::default()
        }
    }

    #[test]
    fn test_event_form_valid() {
        let payload = event_form().into_create(&[concert_type()]).unwrap();
        assert_eq!(payload.event_name, "Summer Fest");
        assert_eq!(payload.description, None);
        assert_eq!(payload.base_price, Some(250.0));
    }

    #[test]
    fn test_event_form_without_price_omits_it() {
        let mut form = event_form();
        form.base_price = None;
        let payload = form.into_create(&[concert_type()]).unwrap();
        assert_eq!(payload.base_price, None);

        let mut form = event_form();
        form.base_price = Some(-5.0);
        assert_matches!(form.into_create(&[concert_type()]), Err(AdminError::Validation(m)) if m == "Price cannot be negative");
    }

    #[test]
    fn test_event_form_rules() {
        let types = [concert_type()];

        let mut form = event_form();
        form.event_name = "   ".to_string();
        assert_matches!(form.into_create(&types), Err(AdminError::Validation(m)) if m == "Name is required");

        let mut form = event_form();
        form.event_type_id = None;
        assert_matches!(form.into_create(&types), Err(AdminError::Validation(m)) if m == "Select an event type");

        let mut form = event_form();
        form.event_type_id = Some(99);
        assert!(form.into_create(&types).is_err());

        let mut form = event_form();
        form.end_datetime = "2025-07-01T17:00".to_string();
        assert!(form.into_create(&types).is_err());

        let mut form = event_form();
        form.capacity = -1;
        assert!(form.into_update(4, &types).is_err());
    }

    #[test]
    fn test_event_form_prefill() {
        let event = Event {
            event_id: 4,
            event_name: "Opera".to_string(),
            description: Some("Gala".to_string()),
            short_description: None,
            event_type_id: Some(1),
            start_datetime: "2025-09-10T19:00:00.000Z".to_string(),
            end_datetime: "2025-09-10T22:00:00.000Z".to_string(),
            capacity: 80,
            base_price: None,
            is_active: Some(true),
            image: None,
            created_at: None,
            updated_at: None,
        };
        let form = EventForm::from_event(&event);
        assert_eq!(form.start_datetime, "2025-09-10T19:00");
        assert_eq!(form.base_price, None);

        let update = form.into_update(4, &[concert_type()]).unwrap();
        assert_eq!(update.event_id, 4);
        assert_eq!(update.base_price, None);
        assert_eq!(update.description.as_deref(), Some("Gala"));
    }

    #[test]
    fn test_event_type_form() {
        let form = EventTypeForm { type_name: "".to_string(), description: "x".to_string() };
        assert!(form.into_create().is_err());

        let form = EventTypeForm { type_name: " Theatre ".to_string(), description: " ".to_string() };
        let update = form.into_update(3).unwrap();
        assert_eq!(update.type_name, "Theatre");
        assert_eq!(update.description, None);
    }

    #[test]
    fn test_payment_form_rules() {
        let reservations: Vec<Reservation> = serde_json::from_str(
            r#"[{"id": "r1", "event_id": "e1", "user_id": "u1", "status": "pending", "total_amount": 10, "currency": "MXN"}]"#,
        )
        .unwrap();

        let form = PaymentLogForm { reservation_id: "r1".to_string(), status: Some(PaymentStatus::Approved), amount: 10.0 };
        assert!(form.clone().into_new(&reservations).is_ok());

        let zero = PaymentLogForm { amount: 0.0, ..form.clone() };
        assert_matches!(zero.into_new(&reservations), Err(AdminError::Validation(m)) if m == "Enter a valid amount");

        let no_status = PaymentLogForm { status: None, ..form.clone() };
        assert!(no_status.into_update(&reservations).is_err());

        let unknown = PaymentLogForm { reservation_id: "r9".to_string(), ..form };
        assert!(unknown.into_new(&reservations).is_err());
    }

    #[test]
    fn test_reservation_form() {
        assert!(ReservationForm::default().into_update().is_err());

        let form = ReservationForm {
            status: Some(ReservationStatus::Confirmed),
            cancellation_reason: Some("late".to_string()),
        };
        assert!(form.into_update().is_err());

        let form = ReservationForm {
            status: Some(ReservationStatus::Cancelled),
            cancellation_reason: Some(" duplicate ".to_string()),
        };
        assert_eq!(form.into_update().unwrap().cancellation_reason.as_deref(), Some("duplicate"));
    }

    #[test]
    fn test_ticket_type_form() {
        let form = TicketTypeForm {
            event_id: "e1".to_string(),
            name: "VIP".to_string(),
            price: 900.0,
            max_quantity: 50,
            current_stock: 60,
            is_active: true,
            sales_start_at: "2025-01-01T00:00:00Z".to_string(),
            sales_end_at: "2025-02-01T00:00:00Z".to_string(),
        };
        assert!(form.clone().into_new().is_err());

        let ok = TicketTypeForm { current_stock: 50, ..form };
        let created = ok.into_new().unwrap();
        assert_eq!(created.id, None);
        assert_eq!(created.name, "VIP");
    }

    #[test]
    fn test_waiting_queue_form() {
        let form = WaitingQueueForm {
            reservation_id: "r1".to_string(),
            event_id: "".to_string(),
            user_id: "u1".to_string(),
            status: QueueStatus::Waiting,
        };
        assert_matches!(form.into_new(), Err(AdminError::Validation(m)) if m == "Event is required");
    }

    #[test]
    fn test_user_form() {
        let form = UserForm { username: Some("ana".to_string()), phone: Some("abc".to_string()) };
        assert!(form.into_update(1).is_err());

        let form = UserForm { username: None, phone: Some("  ".to_string()) };
        let update = form.into_update(1).unwrap();
        assert_eq!(update.phone, None);
        assert_eq!(update.username, None);
    }

    #[test]
    fn test_booking_form() {
        let form = BookingForm { event_id: 3, quantity: 0 };
        assert_matches!(form.into_create(), Err(AdminError::Validation(m)) if m == "Quantity must be at least 1");

        let form = BookingForm { event_id: 3, quantity: 2 };
        let guest = GuestDetails {
            name: "Ana".to_string(),
            email: "not-an-email".to_string(),
            phone: "+52 55 1234 5678".to_string(),
        };
        assert!(form.clone().into_guest(guest.clone()).is_err());

        let guest = GuestDetails { email: " ana@example.com ".to_string(), ..guest };
        let payload = form.into_guest(guest).unwrap();
        assert_eq!(payload.guest_email, "ana@example.com");
        assert_eq!(payload.quantity, 2);
    }
}
