//! Event types screen

use std::borrow::Cow;
use crate::models::EventType;
use crate::services::{EventTypeService, ServiceFactory};
use crate::table::{Column, SortValue, TableRow};
use crate::ui::{Confirmer, Dialog, Notice};
use crate::utils::errors::Result;
use crate::utils::helpers::format_display_datetime;
use super::forms::EventTypeForm;
use super::{confirm_then, submit, Action, DeleteOutcome, ListState, Outcome};

const EVENT_TYPE_COLUMNS: &[Column] = &[
    Column::sortable("event_type_id", "ID"),
    Column::sortable("type_name", "Name"),
    Column::sortable("description", "Description"),
    Column::sortable("created_at", "Created"),
];

impl TableRow for EventType {
    fn columns() -> &'static [Column] {
        EVENT_TYPE_COLUMNS
    }

    fn sort_value(&self, key: &str) -> SortValue {
        match key {
            "event_type_id" => SortValue::number(Some(self.event_type_id as f64)),
            "type_name" => SortValue::text(Some(&self.type_name)),
            "description" => SortValue::text(self.description.as_deref()),
            "created_at" => SortValue::date(self.created_at.as_deref()),
            _ => SortValue::Missing,
        }
    }

    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        let mut fields = vec![Cow::Borrowed(self.type_name.as_str())];
        if let Some(description) = &self.description {
            fields.push(Cow::Borrowed(description.as_str()));
        }
        fields
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.event_type_id.to_string(),
            self.type_name.clone(),
            self.description.clone().unwrap_or_default(),
            format_display_datetime(self.created_at.as_deref()),
        ]
    }
}

pub struct EventTypesScreen {
    service: EventTypeService,
    list: ListState<EventType>,
}

impl EventTypesScreen {
    pub fn new(services: &ServiceFactory, page_size: usize) -> Self {
        Self {
            service: services.event_type_service.clone(),
            list: ListState::new(page_size),
        }
    }

    pub fn list(&self) -> &ListState<EventType> {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut ListState<EventType> {
        &mut self.list
    }

    pub async fn refresh(&mut self) {
        self.list.begin_load();
        let result = self.service.list().await;
        self.list.finish_load(result, "Failed to load event types.");
    }

    pub async fn get(&self, event_type_id: i64) -> Result<EventType> {
        self.service.get(event_type_id).await
    }

    pub async fn create(&mut self, form: EventTypeForm, confirmer: &dyn Confirmer) -> Result<Outcome<EventType>> {
        let payload = form.into_create()?;
        let action = Action {
            resource: "event_type",
            name: "create",
            target: payload.type_name.clone(),
        };
        let outcome = submit(
            confirmer,
            action,
            Notice::success("Created", "The event type was created successfully."),
            "The event type could not be created.",
            self.service.create(&payload),
        )
        .await;
        if outcome.is_done() {
            self.refresh().await;
        }
        Ok(outcome)
    }

    pub async fn update(
        &mut self,
        event_type_id: i64,
        form: EventTypeForm,
        confirmer: &dyn Confirmer,
    ) -> Result<Outcome<EventType>> {
        let payload = form.into_update(event_type_id)?;
        let action = Action {
            resource: "event_type",
            name: "update",
            target: event_type_id.to_string(),
        };
        let outcome = submit(
            confirmer,
            action,
            Notice::success("Updated", "The event type was updated successfully."),
            "The event type could not be updated.",
            self.service.update(&payload),
        )
        .await;
        if outcome.is_done() {
            self.refresh().await;
        }
        Ok(outcome)
    }

    pub async fn delete(&mut self, event_type_id: i64, confirmer: &dyn Confirmer) -> Result<DeleteOutcome> {
        let action = Action {
            resource: "event_type",
            name: "delete",
            target: event_type_id.to_string(),
        };
        let outcome = confirm_then(
            confirmer,
            Dialog::delete("Delete this event type?"),
            action,
            Notice::success("Deleted", "The event type has been deleted."),
            "The event type could not be deleted.",
            self.service.delete(event_type_id),
        )
        .await?;
        if outcome.is_done() {
            self.list.remove_where(|t| t.event_type_id == event_type_id);
        }
        Ok(outcome)
    }

    pub fn render(&self) -> String {
        self.list.render("Event types")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{SortDirection, TableView};

    fn event_type(id: i64, name: &str, description: Option<&str>, created_at: Option<&str>) -> EventType {
        EventType {
            event_type_id: id,
            type_name: name.to_string(),
            description: description.map(str::to_string),
            is_active: None,
            created_at: created_at.map(str::to_string),
            updated_at: None,
        }
    }

    #[test]
    fn test_every_column_is_sortable() {
        assert_eq!(
            EventType::sort_keys(),
            vec!["event_type_id", "type_name", "description", "created_at"]
        );
    }

    #[test]
    fn test_search_covers_name_and_description() {
        let rows = vec![
            event_type(1, "Concert", Some("Live music"), None),
            event_type(2, "Theatre", None, None),
            event_type(3, "Workshop", Some("Hands-on MUSIC class"), None),
        ];
        let mut view = TableView::<EventType>::new(10);
        view.set_search("music");
        let ids: Vec<i64> = view.apply(&rows).iter().map(|t| t.event_type_id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_created_at_sorts_chronologically_with_missing_last() {
        let rows = vec![
            event_type(1, "A", None, Some("2025-03-01T10:00:00.000Z")),
            event_type(2, "B", None, None),
            event_type(3, "C", None, Some("2024-11-20T10:00:00.000Z")),
        ];
        let mut view = TableView::<EventType>::new(10);
        view.set_sort("created_at", SortDirection::Asc).unwrap();
        let ids: Vec<i64> = view.apply(&rows).iter().map(|t| t.event_type_id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }
}
