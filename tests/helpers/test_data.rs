//! JSON fixtures shaped like the backend responses

use serde_json::{json, Value};

pub fn event_json(id: i64, name: &str, type_id: Option<i64>) -> Value {
    json!({
        "event_id": id,
        "event_name": name,
        "description": format!("{} description", name),
        "event_type_id": type_id,
        "start_datetime": "2025-06-20T20:00:00.000Z",
        "end_datetime": "2025-06-20T23:00:00.000Z",
        "capacity": 200,
        "base_price": "450.00",
        "is_active": true
    })
}

pub fn event_type_json(id: i64, name: &str) -> Value {
    json!({
        "event_type_id": id,
        "type_name": name,
        "description": null,
        "created_at": "2025-01-10T12:00:00.000Z"
    })
}

pub fn reservation_json(id: &str, user_id: &str, status: &str) -> Value {
    json!({
        "id": id,
        "event_id": "evt-1",
        "user_id": user_id,
        "tickets": [
            {"ticket_type_id": "tt-1", "quantity": 2, "unit_price": 250.0, "subtotal": 500.0}
        ],
        "status": status,
        "total_amount": 500.0,
        "currency": "MXN",
        "created_at": "2025-05-01T10:00:00"
    })
}

pub fn payment_log_json(id: &str, reservation_id: &str, status: &str, amount: f64) -> Value {
    json!({
        "id": id,
        "reservation_id": reservation_id,
        "status": status,
        "amount": amount,
        "registered_at": "2025-05-01T10:05:00",
        "created_at": "2025-05-01T10:05:00"
    })
}

pub fn user_json(id: i64, username: &str, status: bool) -> Value {
    json!({
        "user_id": id,
        "username": username,
        "email": format!("{}@ticketnow.mx", username),
        "phone": "+52 55 1234 5678",
        "status": status,
        "created_at": "2025-02-01T09:00:00.000Z"
    })
}

pub fn queue_entry_json(id: &str, user_id: &str, status: &str) -> Value {
    json!({
        "id": id,
        "reservation_id": "res-1",
        "event_id": "evt-1",
        "user_id": user_id,
        "status": status,
        "created_at": "2025-05-02T08:00:00"
    })
}

pub fn ticket_reservation_json(id: i64, quantity: i64) -> Value {
    json!({
        "reservation_id": id,
        "user_id": 1,
        "event_id": 10,
        "quantity": quantity,
        "total_price": format!("{:.2}", quantity as f64 * 250.0),
        "reserved_at": "2025-05-03T18:30:00.000Z"
    })
}

pub fn ticket_type_json(id: &str, event_id: &str, name: &str, price: &str) -> Value {
    json!({
        "id": id,
        "event_id": event_id,
        "name": name,
        "price": price,
        "max_quantity": 100,
        "current_stock": 40,
        "is_active": true,
        "sales_start_at": "2025-01-01T00:00:00",
        "sales_end_at": "2025-06-01T00:00:00"
    })
}
