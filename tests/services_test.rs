//! REST client tests against mock backends
//!
//! Each test checks the method, path and body a service sends and how the
//! answer (or failure) comes back.

mod helpers;

use assert_matches::assert_matches;
use helpers::*;
use serde_json::json;
use ticketnow_admin::models::{
    CreateEventPayload, NewPaymentLog, PaymentStatus, UpdateTicketReservationPayload,
};
use ticketnow_admin::AdminError;
use wiremock::{
    matchers::{body_json, header, header_regex, method, path},
    Mock, ResponseTemplate,
};

#[tokio::test]
async fn test_login_returns_token() {
    init_test_logging();
    let backend = BackendMockServer::new().await;

    Mock::given(method("POST"))
        .and(path("/api/login"))
        .and(body_json(json!({"email": "admin@ticketnow.mx", "password": "supersecret"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "jwt-abc",
            "user": {"user_id": 1, "email": "admin@ticketnow.mx"}
        })))
        .expect(1)
        .mount(&backend.events)
        .await;

    let services = backend.anonymous_services();
    let response = services
        .auth_service
        .login(" admin@ticketnow.mx ", "supersecret")
        .await
        .expect("Login should succeed");

    assert_eq!(response.token, "jwt-abc");
    assert!(services.with_token(Some(response.token)).is_authenticated());
}

#[tokio::test]
async fn test_login_rejected_maps_to_authentication_error() {
    let backend = BackendMockServer::new().await;
    backend
        .mock_events("POST", "/login", 401, json!({"message": "Invalid credentials"}))
        .await;

    let result = backend
        .anonymous_services()
        .auth_service
        .login("admin@ticketnow.mx", "wrongpassword")
        .await;

    assert_matches!(result, Err(AdminError::Authentication(msg)) if msg == "Invalid credentials");
}

#[tokio::test]
async fn test_short_password_never_reaches_backend() {
    let backend = BackendMockServer::new().await;
    backend.forbid_events("POST", "/login").await;

    let result = backend
        .anonymous_services()
        .auth_service
        .login("admin@ticketnow.mx", "short")
        .await;

    assert_matches!(result, Err(AdminError::Validation(_)));
}

#[tokio::test]
async fn test_event_list_accepts_string_prices() {
    let backend = BackendMockServer::new().await;
    backend
        .mock_events(
            "GET",
            "/events",
            200,
            json!([event_json(1, "Jazz Night", Some(1)), event_json(2, "Expo", None)]),
        )
        .await;

    let events = backend.services().event_service.list().await.unwrap();

    assert_eq!(events.len(), 2);
    assert_eq!(events[0].base_price, Some(450.0));
    assert_eq!(events[1].event_type_id, None);
}

#[tokio::test]
async fn test_missing_event_is_not_found() {
    let backend = BackendMockServer::new().await;
    backend
        .mock_events("GET", "/events/99", 404, json!({"message": "Event not found"}))
        .await;

    let result = backend.services().event_service.get(99).await;

    assert_matches!(result, Err(AdminError::NotFound { resource, id }) if resource == "Event" && id == "99");
}

#[tokio::test]
async fn test_event_create_is_multipart_with_bearer() {
    let backend = BackendMockServer::new().await;

    Mock::given(method("POST"))
        .and(path("/api/events"))
        .and(header("authorization", format!("Bearer {}", TEST_TOKEN).as_str()))
        .and(header_regex("content-type", "^multipart/form-data"))
        .respond_with(ResponseTemplate::new(201).set_body_json(event_json(12, "Opera", Some(1))))
        .expect(1)
        .mount(&backend.events)
        .await;

    let payload = CreateEventPayload {
        event_name: "Opera".to_string(),
        event_type_id: Some(1),
        start_datetime: "2025-06-20T20:00".to_string(),
        end_datetime: "2025-06-20T23:00".to_string(),
        capacity: 200,
        base_price: Some(450.0),
        ..Default::default()
    };
    let created = backend.services().event_service.create(&payload).await.unwrap();

    assert_eq!(created.event_id, 12);
}

#[tokio::test]
async fn test_event_create_without_price_omits_field() {
    let backend = BackendMockServer::new().await;
    backend
        .mock_events("POST", "/events", 201, event_json(14, "Free Expo", None))
        .await;

    let payload = CreateEventPayload {
        event_name: "Free Expo".to_string(),
        start_datetime: "2025-06-20T10:00".to_string(),
        end_datetime: "2025-06-20T18:00".to_string(),
        capacity: 50,
        ..Default::default()
    };
    backend.services().event_service.create(&payload).await.unwrap();

    let requests = backend.events.received_requests().await.unwrap();
    let body = String::from_utf8_lossy(&requests[0].body).into_owned();
    assert!(body.contains("name=\"event_name\""));
    assert!(body.contains("name=\"capacity\""));
    assert!(!body.contains("name=\"base_price\""));
}

#[tokio::test]
async fn test_event_image_is_uploaded() {
    let backend = BackendMockServer::new().await;
    let dir = tempfile::tempdir().unwrap();
    let image = dir.path().join("poster.png");
    std::fs::write(&image, b"\x89PNG fake image").unwrap();

    Mock::given(method("POST"))
        .and(path("/api/events"))
        .respond_with(ResponseTemplate::new(201).set_body_json(event_json(13, "Poster", None)))
        .expect(1)
        .mount(&backend.events)
        .await;

    let payload = CreateEventPayload {
        event_name: "Poster".to_string(),
        start_datetime: "2025-06-20T20:00".to_string(),
        end_datetime: "2025-06-20T23:00".to_string(),
        image_path: Some(image),
        ..Default::default()
    };
    backend.services().event_service.create(&payload).await.unwrap();

    let requests = backend.events.received_requests().await.unwrap();
    let body = String::from_utf8_lossy(&requests[0].body).into_owned();
    assert!(body.contains("filename=\"poster.png\""));
    assert!(body.contains("image/png"));
}

#[tokio::test]
async fn test_users_require_token() {
    let backend = BackendMockServer::new().await;
    backend.forbid_events("GET", "/users").await;

    let result = backend.anonymous_services().user_service.list().await;

    assert_matches!(result, Err(AdminError::Authentication(_)));
}

#[tokio::test]
async fn test_rejected_token_is_authentication_error() {
    let backend = BackendMockServer::new().await;

    Mock::given(method("GET"))
        .and(path("/api/users"))
        .and(header("authorization", format!("Bearer {}", TEST_TOKEN).as_str()))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "Token expired"})))
        .expect(1)
        .mount(&backend.events)
        .await;

    let result = backend.services().user_service.list().await;

    assert_matches!(result, Err(AdminError::Authentication(msg)) if msg == "Token expired");
}

#[tokio::test]
async fn test_toggle_user_status() {
    let backend = BackendMockServer::new().await;

    Mock::given(method("PATCH"))
        .and(path("/api/users/5/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": false})))
        .expect(1)
        .mount(&backend.events)
        .await;

    let status = backend.services().user_service.toggle_status(5).await.unwrap();
    assert!(!status);
}

#[tokio::test]
async fn test_booking_update_sends_only_quantity() {
    let backend = BackendMockServer::new().await;

    Mock::given(method("PUT"))
        .and(path("/api/ticket-reservations/7"))
        .and(body_json(json!({"quantity": 3})))
        .respond_with(ResponseTemplate::new(200).set_body_json(ticket_reservation_json(7, 3)))
        .expect(1)
        .mount(&backend.events)
        .await;

    let payload = UpdateTicketReservationPayload { reservation_id: 7, quantity: 3 };
    let updated = backend
        .services()
        .ticket_reservation_service
        .update(&payload)
        .await
        .unwrap();

    assert_eq!(updated.total_price, "750.00");
}

#[tokio::test]
async fn test_ticket_pdf_bytes() {
    let backend = BackendMockServer::new().await;

    Mock::given(method("GET"))
        .and(path("/api/ticket-reservations/7/pdf"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "application/pdf")
                .set_body_bytes(b"%PDF-1.4 ticket".to_vec()),
        )
        .mount(&backend.events)
        .await;

    let bytes = backend.services().ticket_reservation_service.pdf(7).await.unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[tokio::test]
async fn test_reservation_cancel_puts_status_and_reason() {
    let backend = BackendMockServer::new().await;

    Mock::given(method("PUT"))
        .and(path("/reservations/res-1"))
        .and(body_json(json!({"status": "cancelled", "cancellation_reason": "duplicate"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "updated"})))
        .expect(1)
        .mount(&backend.payments)
        .await;

    backend
        .services()
        .reservation_service
        .cancel("res-1", Some("duplicate"))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_payment_log_create_returns_id() {
    let backend = BackendMockServer::new().await;

    Mock::given(method("POST"))
        .and(path("/payment-logs"))
        .and(body_json(json!({"reservation_id": "res-1", "status": "approved", "amount": 500.0})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "pay-9"})))
        .expect(1)
        .mount(&backend.payments)
        .await;

    let payload = NewPaymentLog {
        reservation_id: "res-1".to_string(),
        status: PaymentStatus::Approved,
        amount: 500.0,
        gateway_response: None,
    };
    let created = backend.services().payment_log_service.create(&payload).await.unwrap();

    assert_eq!(created.id, "pay-9");
}

#[tokio::test]
async fn test_payments_backend_detail_becomes_api_error() {
    let backend = BackendMockServer::new().await;
    backend
        .mock_payments("DELETE", "/payment-logs/pay-1", 422, json!({"detail": "Payment already settled"}))
        .await;

    let result = backend.services().payment_log_service.delete("pay-1").await;

    assert_matches!(result, Err(AdminError::Api { status: 422, message }) if message == "Payment already settled");
}

#[tokio::test]
async fn test_empty_delete_response_is_accepted() {
    let backend = BackendMockServer::new().await;

    Mock::given(method("DELETE"))
        .and(path("/waiting-queues/q-1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&backend.payments)
        .await;

    backend.services().waiting_queue_service.delete("q-1").await.unwrap();
}

#[tokio::test]
async fn test_queue_notify_marks_entry_notified() {
    let backend = BackendMockServer::new().await;

    Mock::given(method("PUT"))
        .and(path("/waiting-queues/q-1"))
        .and(body_json(json!({"status": "notified"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "ok"})))
        .expect(1)
        .mount(&backend.payments)
        .await;

    backend.services().waiting_queue_service.notify("q-1").await.unwrap();
}

#[tokio::test]
async fn test_ticket_types_for_event_filters_locally() {
    let backend = BackendMockServer::new().await;
    let ticket = |id: &str, event: &str| {
        json!({
            "id": id,
            "event_id": event,
            "name": "General",
            "price": "250.00",
            "max_quantity": 100,
            "current_stock": 40,
            "is_active": true,
            "sales_start_at": "2025-01-01T00:00:00",
            "sales_end_at": "2025-06-01T00:00:00"
        })
    };
    backend
        .mock_payments(
            "GET",
            "/ticket-types",
            200,
            json!([ticket("t1", "evt-1"), ticket("t2", "evt-2"), ticket("t3", "evt-1")]),
        )
        .await;

    let types = backend.services().ticket_type_service.for_event("evt-1").await.unwrap();
    let ids: Vec<_> = types.iter().filter_map(|t| t.id.as_deref()).collect();

    assert_eq!(ids, vec!["t1", "t3"]);
}

#[tokio::test]
async fn test_unreachable_backend_is_http_error() {
    let mut settings = ticketnow_admin::Settings::default();
    settings.api.express_url = "http://127.0.0.1:9".to_string();
    settings.api.timeout_seconds = 1;
    let services = ticketnow_admin::ServiceFactory::new(&settings).unwrap();

    let result = services.event_service.list().await;

    assert_matches!(result, Err(AdminError::Http(_)));
}
