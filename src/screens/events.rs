//! Events screen
//!
//! Lists events joined with their event type name. Events and types are
//! fetched together and fail as a unit.

use std::borrow::Cow;
use crate::models::{Event, EventType};
use crate::services::{EventService, EventTypeService, ServiceFactory};
use crate::table::{Column, SortValue, TableRow};
use crate::ui::{Confirmer, Dialog, Notice};
use crate::utils::errors::Result;
use crate::utils::helpers::{format_amount, format_display_datetime};
use super::forms::EventForm;
use super::{confirm_then, submit, Action, DeleteOutcome, ListState, Outcome};

/// Shown when an event's type is not in the loaded list
pub const UNKNOWN_TYPE: &str = "—";

const LOAD_FAILED: &str = "Failed to load events or event types.";

/// Event plus its resolved type name
#[derive(Debug, Clone, PartialEq)]
pub struct EventRow {
    pub event: Event,
    pub type_name: String,
}

impl EventRow {
    /// Resolve the type name by linear lookup
    pub fn join(event: Event, types: &[EventType]) -> Self {
        let type_name = event
            .event_type_id
            .and_then(|id| types.iter().find(|t| t.event_type_id == id))
            .map(|t| t.type_name.clone())
            .unwrap_or_else(|| UNKNOWN_TYPE.to_string());
        Self { event, type_name }
    }
}

const EVENT_COLUMNS: &[Column] = &[
    Column::fixed("event_id", "ID"),
    Column::sortable("event_name", "Name"),
    Column::sortable("description", "Description"),
    Column::sortable("type_name", "Type"),
    Column::sortable("start_datetime", "Start"),
    Column::sortable("end_datetime", "End"),
    Column::sortable("capacity", "Capacity"),
    Column::sortable("base_price", "Price"),
];

impl TableRow for EventRow {
    fn columns() -> &'static [Column] {
        EVENT_COLUMNS
    }

    fn sort_value(&self, key: &str) -> SortValue {
        let e = &self.event;
        match key {
            "event_name" => SortValue::text(Some(&e.event_name)),
            "description" => SortValue::text(e.description.as_deref()),
            "type_name" => SortValue::text(Some(&self.type_name)),
            "start_datetime" => SortValue::date(Some(&e.start_datetime)),
            "end_datetime" => SortValue::date(Some(&e.end_datetime)),
            "capacity" => SortValue::number(Some(e.capacity as f64)),
            "base_price" => SortValue::number(e.base_price),
            _ => SortValue::Missing,
        }
    }

    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        let mut fields = vec![
            Cow::Borrowed(self.event.event_name.as_str()),
            Cow::Borrowed(self.type_name.as_str()),
        ];
        if let Some(description) = &self.event.description {
            fields.push(Cow::Borrowed(description.as_str()));
        }
        fields
    }

    fn cells(&self) -> Vec<String> {
        let e = &self.event;
        vec![
            e.event_id.to_string(),
            e.event_name.clone(),
            e.description.clone().unwrap_or_default(),
            self.type_name.clone(),
            format_display_datetime(Some(&e.start_datetime)),
            format_display_datetime(Some(&e.end_datetime)),
            e.capacity.to_string(),
            e.base_price.map(format_amount).unwrap_or_default(),
        ]
    }
}

/// Event list with create, edit and delete
pub struct EventsScreen {
    events: EventService,
    event_types: EventTypeService,
    types: Vec<EventType>,
    list: ListState<EventRow>,
}

impl EventsScreen {
    pub fn new(services: &ServiceFactory, page_size: usize) -> Self {
        Self {
            events: services.event_service.clone(),
            event_types: services.event_type_service.clone(),
            types: Vec::new(),
            list: ListState::new(page_size),
        }
    }

    pub fn list(&self) -> &ListState<EventRow> {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut ListState<EventRow> {
        &mut self.list
    }

    /// Event types from the last successful load, used by the form selector
    pub fn event_types(&self) -> &[EventType] {
        &self.types
    }

    /// Fetch events and event types in parallel
    pub async fn refresh(&mut self) {
        self.list.begin_load();
        let loaded = tokio::try_join!(self.events.list(), self.event_types.list());
        let rows = loaded.map(|(events, types)| {
            let rows = events
                .into_iter()
                .map(|e| EventRow::join(e, &types))
                .collect::<Vec<_>>();
            self.types = types;
            rows
        });
        self.list.finish_load(rows, LOAD_FAILED);
    }

    pub async fn get(&self, event_id: i64) -> Result<Event> {
        self.events.get(event_id).await
    }

    /// Validate and create; the list is reloaded afterwards
    pub async fn create(&mut self, form: EventForm, confirmer: &dyn Confirmer) -> Result<Outcome<Event>> {
        let payload = form.into_create(&self.types)?;
        let action = Action {
            resource: "event",
            name: "create",
            target: payload.event_name.clone(),
        };
        let outcome = submit(
            confirmer,
            action,
            Notice::success("Created", "The event was created successfully."),
            "The event could not be created.",
            self.events.create(&payload),
        )
        .await;
        if outcome.is_done() {
            self.refresh().await;
        }
        Ok(outcome)
    }

    pub async fn update(&mut self, event_id: i64, form: EventForm, confirmer: &dyn Confirmer) -> Result<Outcome<Event>> {
        let payload = form.into_update(event_id, &self.types)?;
        let action = Action {
            resource: "event",
            name: "update",
            target: event_id.to_string(),
        };
        let outcome = submit(
            confirmer,
            action,
            Notice::success("Updated", "The event was updated successfully."),
            "The event could not be updated.",
            self.events.update(&payload),
        )
        .await;
        if outcome.is_done() {
            self.refresh().await;
        }
        Ok(outcome)
    }

    /// Ask, delete, then drop the row locally
    pub async fn delete(&mut self, event_id: i64, confirmer: &dyn Confirmer) -> Result<DeleteOutcome> {
        let action = Action {
            resource: "event",
            name: "delete",
            target: event_id.to_string(),
        };
        let outcome = confirm_then(
            confirmer,
            Dialog::delete("Delete this event?"),
            action,
            Notice::success("Deleted", "The event has been deleted."),
            "The event could not be deleted.",
            self.events.delete(event_id),
        )
        .await?;
        if outcome.is_done() {
            self.list.remove_where(|r| r.event.event_id == event_id);
        }
        Ok(outcome)
    }

    pub fn render(&self) -> String {
        self.list.render("Events")
    }
}
