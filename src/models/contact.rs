use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Contact record as returned by the server.
///
/// Everything but `id` and `favorite` is nullable on the wire; the
/// server stores whatever the creating client sent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contact {
    pub id: i64,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub birthday: Option<NaiveDate>,
    #[serde(default)]
    pub comments: Option<String>,
    #[serde(default)]
    pub favorite: bool,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub updated_at: Option<NaiveDateTime>,
}

impl Contact {
    pub fn full_name(&self) -> String {
        let first = self.first_name.as_deref().unwrap_or("");
        let last = self.last_name.as_deref().unwrap_or("");
        format!("{} {}", first, last).trim().to_string()
    }
}

/// Payload for creating or replacing a contact (`POST`/`PUT /contacts`).
#[derive(Debug, Clone, Default, Serialize)]
pub struct NewContact {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub birthday: Option<NaiveDate>,
    pub comments: Option<String>,
    pub favorite: bool,
}

impl NewContact {
    /// Build a replacement payload from an existing record, used by the
    /// update flow to merge partial edits into a full `PUT` body.
    pub fn from_contact(contact: &Contact) -> Self {
        Self {
            first_name: contact.first_name.clone().unwrap_or_default(),
            last_name: contact.last_name.clone().unwrap_or_default(),
            email: contact.email.clone().unwrap_or_default(),
            phone: contact.phone.clone(),
            birthday: contact.birthday,
            comments: contact.comments.clone(),
            favorite: contact.favorite,
        }
    }
}
