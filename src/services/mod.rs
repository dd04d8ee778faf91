//! Services module
//!
//! REST clients for the two backends: the events backend (auth, events,
//! event types, users, ticket reservations) and the payments backend
//! (reservations, payment logs, ticket types, waiting queues).

pub mod http;
pub mod auth;
pub mod events;
pub mod event_types;
pub mod users;
pub mod ticket_reservations;
pub mod reservations;
pub mod payment_logs;
pub mod ticket_types;
pub mod waiting_queues;

// Re-export commonly used services
pub use http::RestClient;
pub use auth::AuthService;
pub use events::EventService;
pub use event_types::EventTypeService;
pub use users::UserService;
pub use ticket_reservations::TicketReservationService;
pub use reservations::ReservationService;
pub use payment_logs::PaymentLogService;
pub use ticket_types::TicketTypeService;
pub use waiting_queues::WaitingQueueService;

use crate::config::settings::Settings;
use crate::utils::errors::Result;

/// Service factory for creating and managing all services
#[derive(Debug, Clone)]
pub struct ServiceFactory {
    pub auth_service: AuthService,
    pub event_service: EventService,
    pub event_type_service: EventTypeService,
    pub user_service: UserService,
    pub ticket_reservation_service: TicketReservationService,
    pub reservation_service: ReservationService,
    pub payment_log_service: PaymentLogService,
    pub ticket_type_service: TicketTypeService,
    pub waiting_queue_service: WaitingQueueService,
    express: RestClient,
    fastapi: RestClient,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services initialized
    pub fn new(settings: &Settings) -> Result<Self> {
        let express_root = format!("{}/api", settings.api.express_url.trim_end_matches('/'));
        let express = RestClient::new(&express_root, &settings.api, settings.auth.token.clone())?;
        let fastapi = RestClient::new(&settings.api.fastapi_url, &settings.api, settings.auth.token.clone())?;

        Ok(Self::from_clients(express, fastapi))
    }

    fn from_clients(express: RestClient, fastapi: RestClient) -> Self {
        Self {
            auth_service: AuthService::new(express.clone()),
            event_service: EventService::new(express.clone()),
            event_type_service: EventTypeService::new(express.clone()),
            user_service: UserService::new(express.clone()),
            ticket_reservation_service: TicketReservationService::new(express.clone()),
            reservation_service: ReservationService::new(fastapi.clone()),
            payment_log_service: PaymentLogService::new(fastapi.clone()),
            ticket_type_service: TicketTypeService::new(fastapi.clone()),
            waiting_queue_service: WaitingQueueService::new(fastapi.clone()),
            express,
            fastapi,
        }
    }

    /// Rebuild every service with a new bearer token, e.g. right after login
    pub fn with_token(&self, token: Option<String>) -> Self {
        Self::from_clients(
            self.express.with_token(token.clone()),
            self.fastapi.with_token(token),
        )
    }

    /// Whether requests carry a bearer token
    pub fn is_authenticated(&self) -> bool {
        self.express.has_token()
    }

    /// Events backend root, including the `/api` prefix
    pub fn events_backend_url(&self) -> &str {
        self.express.base_url()
    }

    /// Payments backend root
    pub fn payments_backend_url(&self) -> &str {
        self.fastapi.base_url()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_roots() {
        let mut settings = Settings::default();
        settings.api.express_url = "http://events.local/".to_string();
        settings.api.fastapi_url = "http://payments.local".to_string();

        let factory = ServiceFactory::new(&settings).unwrap();
        assert_eq!(factory.events_backend_url(), "http://events.local/api");
        assert_eq!(factory.payments_backend_url(), "http://payments.local");
        assert!(!factory.is_authenticated());
        assert!(factory.with_token(Some("t0k3n".to_string())).is_authenticated());
    }
}
