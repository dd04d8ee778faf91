//! Ticket types screen

use std::borrow::Cow;
use crate::models::{CreatedId, TicketType};
use crate::services::{ServiceFactory, TicketTypeService};
use crate::table::{Column, SortValue, TableRow};
use crate::ui::{Confirmer, Dialog, Notice};
use crate::utils::errors::Result;
use crate::utils::helpers::{format_amount, format_display_datetime};
use super::forms::TicketTypeForm;
use super::{confirm_then, submit, Action, DeleteOutcome, ListState, Outcome};

const TICKET_TYPE_COLUMNS: &[Column] = &[
    Column::fixed("id", "ID"),
    Column::sortable("name", "Name"),
    Column::sortable("event_id", "Event"),
    Column::sortable("price", "Price"),
    Column::sortable("current_stock", "Stock"),
    Column::fixed("is_active", "Active"),
    Column::sortable("sales_start_at", "Sales start"),
    Column::sortable("sales_end_at", "Sales end"),
];

impl TableRow for TicketType {
    fn columns() -> &'static [Column] {
        TICKET_TYPE_COLUMNS
    }

    fn sort_value(&self, key: &str) -> SortValue {
        match key {
            "name" => SortValue::text(Some(&self.name)),
            "event_id" => SortValue::text(Some(&self.event_id)),
            "price" => SortValue::number(Some(self.price)),
            "current_stock" => SortValue::number(Some(self.current_stock as f64)),
            "sales_start_at" => SortValue::date(Some(&self.sales_start_at)),
            "sales_end_at" => SortValue::date(Some(&self.sales_end_at)),
            _ => SortValue::Missing,
        }
    }

    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        vec![Cow::Borrowed(self.name.as_str()), Cow::Borrowed(self.event_id.as_str())]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone().unwrap_or_default(),
            self.name.clone(),
            self.event_id.clone(),
            format_amount(self.price),
            format!("{}/{}", self.current_stock, self.max_quantity),
            if self.is_active { "yes" } else { "no" }.to_string(),
            format_display_datetime(Some(&self.sales_start_at)),
            format_display_datetime(Some(&self.sales_end_at)),
        ]
    }
}

pub struct TicketTypesScreen {
    service: TicketTypeService,
    list: ListState<TicketType>,
}

impl TicketTypesScreen {
    pub fn new(services: &ServiceFactory, page_size: usize) -> Self {
        Self {
            service: services.ticket_type_service.clone(),
            list: ListState::new(page_size),
        }
    }

    pub fn list(&self) -> &ListState<TicketType> {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut ListState<TicketType> {
        &mut self.list
    }

    pub async fn refresh(&mut self) {
        self.list.begin_load();
        let result = self.service.list().await;
        self.list.finish_load(result, "Failed to load ticket types.");
    }

    /// Load only the ticket types of one event
    pub async fn refresh_for_event(&mut self, event_id: &str) {
        self.list.begin_load();
        let result = self.service.for_event(event_id).await;
        self.list.finish_load(result, "Failed to load ticket types.");
    }

    pub async fn get(&self, id: &str) -> Result<TicketType> {
        self.service.get(id).await
    }

    pub async fn create(&mut self, form: TicketTypeForm, confirmer: &dyn Confirmer) -> Result<Outcome<CreatedId>> {
        let payload = form.into_new()?;
        let action = Action {
            resource: "ticket_type",
            name: "create",
            target: payload.name.clone(),
        };
        let outcome = submit(
            confirmer,
            action,
            Notice::success("Created", "The ticket type was created successfully."),
            "The ticket type could not be created.",
            self.service.create(&payload),
        )
        .await;
        if outcome.is_done() {
            self.refresh().await;
        }
        Ok(outcome)
    }

    pub async fn update(&mut self, id: &str, form: TicketTypeForm, confirmer: &dyn Confirmer) -> Result<Outcome<()>> {
        let changes = form.into_update()?;
        let action = Action {
            resource: "ticket_type",
            name: "update",
            target: id.to_string(),
        };
        let outcome = submit(
            confirmer,
            action,
            Notice::success("Updated", "The ticket type was updated successfully."),
            "The ticket type could not be updated.",
            self.service.update(id, &changes),
        )
        .await;
        if outcome.is_done() {
            self.refresh().await;
        }
        Ok(outcome)
    }

    pub async fn delete(&mut self, id: &str, confirmer: &dyn Confirmer) -> Result<DeleteOutcome> {
        let action = Action {
            resource: "ticket_type",
            name: "delete",
            target: id.to_string(),
        };
        let outcome = confirm_then(
            confirmer,
            Dialog::delete("Delete this ticket type?"),
            action,
            Notice::success("Deleted", "The ticket type has been deleted."),
            "The ticket type could not be deleted.",
            self.service.delete(id),
        )
        .await?;
        if outcome.is_done() {
            self.list.remove_where(|t| t.id.as_deref() == Some(id));
        }
        Ok(outcome)
    }

    pub fn render(&self) -> String {
        self.list.render("Ticket types")
    }
}
