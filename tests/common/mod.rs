use sift::bulk::{BulkAction, BulkActionCatalog};
use sift::model::{FilterField, FilterValue, Record, SelectOption};

#[derive(Debug, Clone, PartialEq)]
pub struct Client {
    pub id: u32,
    pub name: String,
    pub email: String,
    pub status: String,
    pub vip: bool,
    pub next_session: String,
}

impl Record for Client {
    fn record_id(&self) -> String {
        self.id.to_string()
    }

    fn searchable_text(&self) -> Vec<String> {
        vec![self.name.clone(), self.email.clone()]
    }

    fn field_value(&self, field_id: &str) -> Option<FilterValue> {
        match field_id {
            "status" => Some(self.status.as_str().into()),
            "vip" => Some(self.vip.into()),
            "next_session" if !self.next_session.is_empty() => {
                Some(self.next_session.as_str().into())
            }
            _ => None,
        }
    }
}

pub fn client(id: u32, name: &str, status: &str, vip: bool, next_session: &str) -> Client {
    Client {
        id,
        name: name.to_string(),
        email: format!("{}@clinic.test", name.to_lowercase().replace(' ', ".")),
        status: status.to_string(),
        vip,
        next_session: next_session.to_string(),
    }
}

pub fn clients() -> Vec<Client> {
    vec![
        client(1, "Ana Lima", "active", true, "2024-03-04T09:30:00Z"),
        client(2, "Bruno Costa", "active", false, "2024-03-04"),
        client(3, "Carla Dias", "inactive", false, ""),
        client(4, "Anderson Reis", "active", false, "2024-03-05"),
        client(5, "Diana Prado", "inactive", true, ""),
    ]
}

pub fn client_fields() -> Vec<FilterField> {
    vec![
        FilterField::select(
            "status",
            "Status",
            vec![
                SelectOption::new("active", "Active"),
                SelectOption::new("inactive", "Inactive"),
            ],
        ),
        FilterField::boolean("vip", "VIP only"),
        FilterField::date("next_session", "Next session"),
    ]
}

pub fn client_actions() -> BulkActionCatalog {
    BulkActionCatalog::new(vec![
        BulkAction::new("deactivate", "Deactivate Clients")
            .with_confirmation("Deactivate the selected clients?"),
        BulkAction::new("export", "Export Data"),
        BulkAction::new("delete", "Delete Clients").destructive(),
    ])
}
