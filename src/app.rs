//! Command flows for the contactbook client.
//!
//! The `App` struct owns the API client for one process run. The session
//! token is captured from storage exactly once when the app is built;
//! nothing re-reads storage afterwards, so a token written by another
//! process is only picked up by the next run.

use std::io::Write;

use anyhow::Result;
use chrono::NaiveDate;
use tracing::{info, warn};

use crate::api::ApiClient;
use crate::auth::TokenStore;
use crate::config::Config;
use crate::models::NewContact;
use crate::view;

/// Partial contact edits collected from the command line.
/// Unset fields keep their stored values.
#[derive(Debug, Default, Clone)]
pub struct ContactEdits {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub birthday: Option<NaiveDate>,
    pub comments: Option<String>,
    pub favorite: Option<bool>,
}

#[derive(Debug)]
pub struct App {
    client: ApiClient,
}

impl App {
    /// Build an app for authenticated commands, capturing the stored
    /// session once. Fails up front when no token has been persisted
    /// rather than sending an unauthenticated request.
    pub fn connect(config: &Config, store: &TokenStore) -> Result<Self> {
        let session = store.load()?.ok_or_else(|| {
            anyhow::anyhow!("No saved session. Please run `contactbook login` first.")
        })?;
        let client = ApiClient::new(config.api_base_url())?.with_session(&session);
        Ok(Self::with_client(client))
    }

    /// Build an app around an existing client.
    pub fn with_client(client: ApiClient) -> Self {
        Self { client }
    }

    /// Fetch and render the contact list
    pub async fn list(&self, out: &mut impl Write) -> Result<()> {
        let contacts = self.client.list_contacts().await?;
        view::render_contact_list(out, &contacts)?;
        Ok(())
    }

    /// Fetch and render a single contact
    pub async fn show(&self, id: i64, out: &mut impl Write) -> Result<()> {
        let contact = self.client.get_contact(id).await?;
        view::render_contact_detail(out, &contact)?;
        Ok(())
    }

    /// Create a contact, then re-fetch and render the list exactly once.
    ///
    /// A failed refresh after a successful create is logged and ignored;
    /// the create itself is already committed server-side.
    pub async fn add(&self, contact: &NewContact, out: &mut impl Write) -> Result<()> {
        let created = self.client.create_contact(contact).await?;
        info!(id = created.id, "Contact created");
        writeln!(out, "Created contact {}", created.id)?;

        match self.client.list_contacts().await {
            Ok(contacts) => view::render_contact_list(out, &contacts)?,
            Err(e) => warn!(error = %e, "Contact list refresh after create failed"),
        }
        Ok(())
    }

    /// Apply partial edits to a contact. The server only accepts full
    /// replacement, so the stored record is fetched and merged first.
    pub async fn update(&self, id: i64, edits: &ContactEdits, out: &mut impl Write) -> Result<()> {
        let existing = self.client.get_contact(id).await?;
        let mut payload = NewContact::from_contact(&existing);

        if let Some(ref v) = edits.first_name {
            payload.first_name = v.clone();
        }
        if let Some(ref v) = edits.last_name {
            payload.last_name = v.clone();
        }
        if let Some(ref v) = edits.email {
            payload.email = v.clone();
        }
        if let Some(ref v) = edits.phone {
            payload.phone = Some(v.clone());
        }
        if let Some(v) = edits.birthday {
            payload.birthday = Some(v);
        }
        if let Some(ref v) = edits.comments {
            payload.comments = Some(v.clone());
        }
        if let Some(v) = edits.favorite {
            payload.favorite = v;
        }

        let updated = self.client.update_contact(id, &payload).await?;
        info!(id = updated.id, "Contact updated");
        view::render_contact_detail(out, &updated)?;
        Ok(())
    }

    /// Delete a contact by id
    pub async fn remove(&self, id: i64, out: &mut impl Write) -> Result<()> {
        self.client.delete_contact(id).await?;
        info!(id, "Contact deleted");
        writeln!(out, "Deleted contact {}", id)?;
        Ok(())
    }

    /// Search contacts by name or email and render matches
    pub async fn search(&self, query: &str, out: &mut impl Write) -> Result<()> {
        let contacts = self.client.search_contacts(query).await?;
        view::render_contact_list(out, &contacts)?;
        Ok(())
    }

    /// Render contacts with birthdays in the next `days` days
    pub async fn birthdays(&self, days: u32, out: &mut impl Write) -> Result<()> {
        let contacts = self.client.upcoming_birthdays(days).await?;
        view::render_contact_list(out, &contacts)?;
        Ok(())
    }
}
