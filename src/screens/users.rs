//! Users screen
//!
//! Accounts are never deleted from the console. Deactivating or
//! reactivating one is the destructive action and asks first.

use std::borrow::Cow;
use crate::models::User;
use crate::services::{ServiceFactory, UserService};
use crate::table::{Column, SortValue, TableRow};
use crate::ui::{Confirmer, Dialog, Notice};
use crate::utils::errors::Result;
use crate::utils::helpers::format_display_datetime;
use super::forms::UserForm;
use super::{confirm_then, submit, Action, ListState, Outcome};

const USER_COLUMNS: &[Column] = &[
    Column::sortable("user_id", "ID"),
    Column::sortable("username", "Username"),
    Column::sortable("email", "Email"),
    Column::fixed("phone", "Phone"),
    Column::sortable("status", "Active"),
    Column::sortable("created_at", "Created"),
];

impl TableRow for User {
    fn columns() -> &'static [Column] {
        USER_COLUMNS
    }

    fn sort_value(&self, key: &str) -> SortValue {
        match key {
            "user_id" => SortValue::number(Some(self.user_id as f64)),
            "username" => SortValue::text(self.username.as_deref()),
            "email" => SortValue::text(Some(&self.email)),
            "status" => self.status.map(SortValue::Bool).unwrap_or(SortValue::Missing),
            "created_at" => SortValue::date(self.created_at.as_deref()),
            _ => SortValue::Missing,
        }
    }

    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        [self.username.as_deref(), Some(self.email.as_str()), self.phone.as_deref()]
            .into_iter()
            .flatten()
            .map(Cow::Borrowed)
            .collect()
    }

    fn cells(&self) -> Vec<String> {
        let status = match self.status {
            Some(true) => "yes",
            Some(false) => "no",
            None => "",
        };
        vec![
            self.user_id.to_string(),
            self.username.clone().unwrap_or_default(),
            self.email.clone(),
            self.phone.clone().unwrap_or_default(),
            status.to_string(),
            format_display_datetime(self.created_at.as_deref()),
        ]
    }
}

pub struct UsersScreen {
    service: UserService,
    list: ListState<User>,
}

impl UsersScreen {
    pub fn new(services: &ServiceFactory, page_size: usize) -> Self {
        Self {
            service: services.user_service.clone(),
            list: ListState::new(page_size),
        }
    }

    pub fn list(&self) -> &ListState<User> {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut ListState<User> {
        &mut self.list
    }

    pub async fn refresh(&mut self) {
        self.list.begin_load();
        let result = self.service.list().await;
        self.list.finish_load(result, "Failed to load users.");
    }

    pub async fn get(&self, user_id: i64) -> Result<User> {
        self.service.get(user_id).await
    }

    pub async fn update(&mut self, user_id: i64, form: UserForm, confirmer: &dyn Confirmer) -> Result<Outcome<User>> {
        let payload = form.into_update(user_id)?;
        let action = Action {
            resource: "user",
            name: "update",
            target: user_id.to_string(),
        };
        let outcome = submit(
            confirmer,
            action,
            Notice::success("Updated", "The profile was updated successfully."),
            "The profile could not be updated.",
            self.service.update(&payload),
        )
        .await;
        if let Outcome::Done(user) = &outcome {
            let user = user.clone();
            self.list.update_where(|u| u.user_id == user_id, |u| *u = user.clone());
        }
        Ok(outcome)
    }

    /// Ask, then flip the account's active flag; yields the new status
    pub async fn toggle_status(&mut self, user_id: i64, confirmer: &dyn Confirmer) -> Result<Outcome<bool>> {
        let deactivating = self
            .list
            .rows()
            .iter()
            .find(|u| u.user_id == user_id)
            .and_then(|u| u.status)
            .unwrap_or(true);
        let dialog = if deactivating {
            Dialog::new("Deactivate this user?", "They will no longer be able to sign in.")
                .with_confirm_label("Yes, deactivate")
        } else {
            Dialog::new("Reactivate this user?", "They will be able to sign in again.")
                .with_confirm_label("Yes, reactivate")
        };
        let action = Action {
            resource: "user",
            name: "toggle_status",
            target: user_id.to_string(),
        };
        let outcome = confirm_then(
            confirmer,
            dialog,
            action,
            Notice::success("Updated", "The user status has been changed."),
            "The user status could not be changed.",
            self.service.toggle_status(user_id),
        )
        .await?;
        if let Outcome::Done(status) = outcome {
            self.list.update_where(|u| u.user_id == user_id, |u| u.status = Some(status));
        }
        Ok(outcome)
    }

    pub fn render(&self) -> String {
        self.list.render("Users")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{SortDirection, TableView};

    fn user(id: i64, username: Option<&str>, status: Option<bool>) -> User {
        User {
            user_id: id,
            username: username.map(str::to_string),
            email: format!("user{}@ticketnow.mx", id),
            phone: None,
            status,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_status_sort_puts_unknown_last() {
        let rows = vec![user(1, None, None), user(2, None, Some(true)), user(3, None, Some(false))];
        let mut view = TableView::<User>::new(10);
        view.set_sort("status", SortDirection::Desc).unwrap();
        let ids: Vec<i64> = view.apply(&rows).iter().map(|u| u.user_id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn test_search_skips_missing_fields() {
        let row = user(4, None, Some(true));
        assert_eq!(row.search_fields().len(), 1);
        assert_eq!(row.cells()[1], "");
    }
}
