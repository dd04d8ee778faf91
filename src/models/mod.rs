//! Data models module
//!
//! Records mirrored from the events and payments backends, plus the
//! payloads sent to them.

pub mod common;
pub mod auth;
pub mod event;
pub mod event_type;
pub mod user;
pub mod ticket_reservation;
pub mod reservation;
pub mod payment_log;
pub mod ticket_type;
pub mod waiting_queue;

// Re-export commonly used models
pub use common::{CreatedId, MessageResponse};
pub use auth::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse, AuthUser, TokenCheck};
pub use event::{Event, CreateEventPayload, UpdateEventPayload};
pub use event_type::{EventType, CreateEventTypePayload, UpdateEventTypePayload};
pub use user::{User, UpdateUserPayload, StatusResponse};
pub use ticket_reservation::{TicketReservation, CreateTicketReservationPayload, CreateGuestReservationPayload, UpdateTicketReservationPayload};
pub use reservation::{Reservation, ReservedTicket, ReservationStatus, ReservationUpdate, NewReservation};
pub use payment_log::{PaymentLog, PaymentStatus, NewPaymentLog, PaymentLogUpdate};
pub use ticket_type::{TicketType, TicketTypeUpdate};
pub use waiting_queue::{WaitingQueue, QueueStatus, WaitingQueueUpdate};
