//! Fixtures shared by the unit tests.

use crate::bulk::{BulkAction, BulkActionCatalog};
use crate::model::{FilterField, FilterValue, Record, SelectOption};

/// A user-like row: name and email are searchable, role/approved/sessions
/// are filterable. `sessions` is the numeric id.
#[derive(Debug, Clone, PartialEq)]
pub struct TestRecord {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub approved: bool,
    pub sessions: f64,
    pub joined: String,
}

impl Record for TestRecord {
    fn record_id(&self) -> String {
        self.id.clone()
    }

    fn searchable_text(&self) -> Vec<String> {
        vec![self.name.clone(), self.email.clone()]
    }

    fn field_value(&self, field_id: &str) -> Option<FilterValue> {
        match field_id {
            "name" => Some(FilterValue::from(self.name.as_str())),
            "email" => Some(FilterValue::from(self.email.as_str())),
            "role" => Some(FilterValue::from(self.role.as_str())),
            "approved" => Some(FilterValue::Bool(self.approved)),
            "sessions" => Some(FilterValue::Number(self.sessions)),
            "joined" => Some(FilterValue::from(self.joined.as_str())),
            _ => None,
        }
    }
}

pub fn user(id: &str, name: &str, role: &str, approved: bool) -> TestRecord {
    let first = name.split_whitespace().next().unwrap_or(name).to_lowercase();
    TestRecord {
        id: id.to_string(),
        name: name.to_string(),
        email: format!("{}@example.com", first),
        role: role.to_string(),
        approved,
        sessions: id.parse().unwrap_or(0.0),
        joined: format!("2024-01-{:02}", id.parse::<u32>().unwrap_or(1)),
    }
}

pub fn sample_users() -> Vec<TestRecord> {
    vec![
        user("1", "John Carter", "ADMIN", true),
        user("2", "Joan Watson", "USER", false),
        user("3", "Bob Stone", "USER", true),
        user("4", "Joseph Hale", "USER", false),
    ]
}

pub fn user_fields() -> Vec<FilterField> {
    vec![
        FilterField::select(
            "role",
            "Role",
            vec![
                SelectOption::new("ADMIN", "Admin"),
                SelectOption::new("USER", "User"),
            ],
        ),
        FilterField::text("email", "Email").with_placeholder("Filter by email"),
        FilterField::date("joined", "Joined on"),
        FilterField::boolean("approved", "Approved only"),
        FilterField::number("sessions", "Sessions"),
    ]
}

/// approve (needs confirmation, only for unapproved users), export (no
/// confirmation) and delete (destructive).
pub fn user_actions(records: &[TestRecord]) -> BulkActionCatalog {
    let pending: Vec<String> = records
        .iter()
        .filter(|r| !r.approved)
        .map(|r| r.id.clone())
        .collect();

    BulkActionCatalog::new(vec![
        BulkAction::new("approve", "Approve Users")
            .with_confirmation("Are you sure you want to approve the selected users?")
            .eligible_when(move |ids| ids.iter().any(|id| pending.contains(id))),
        BulkAction::new("export", "Export Data"),
        BulkAction::new("delete", "Delete Users")
            .destructive()
            .with_confirmation("This will permanently delete the selected users and all their data."),
    ])
}
