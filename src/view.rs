//! Rendering of contact data into an injected output stream.
//!
//! The render functions take the target writer as an argument rather
//! than printing to a global handle, so callers (and tests) decide where
//! output lands. The list view shows one row per contact: id, first
//! name, and phone, in the order the server returned them.

use std::io::{self, Write};

use crate::models::Contact;
use crate::utils::{format_optional, format_phone};

/// Render the contact list, one row per contact.
pub fn render_contact_list(out: &mut impl Write, contacts: &[Contact]) -> io::Result<()> {
    for contact in contacts {
        let phone = contact
            .phone
            .as_deref()
            .map(format_phone)
            .unwrap_or_else(|| "-".to_string());
        writeln!(
            out,
            "{:>5}  {:<20}  {}",
            contact.id,
            format_optional(&contact.first_name, "-"),
            phone
        )?;
    }
    Ok(())
}

/// Render the full detail view for a single contact.
pub fn render_contact_detail(out: &mut impl Write, contact: &Contact) -> io::Result<()> {
    writeln!(out, "Id:        {}", contact.id)?;
    writeln!(out, "Name:      {}", contact.full_name())?;
    writeln!(out, "Email:     {}", format_optional(&contact.email, "-"))?;
    let phone = contact
        .phone
        .as_deref()
        .map(format_phone)
        .unwrap_or_else(|| "-".to_string());
    writeln!(out, "Phone:     {}", phone)?;
    if let Some(birthday) = contact.birthday {
        writeln!(out, "Birthday:  {}", birthday.format("%Y-%m-%d"))?;
    }
    if let Some(ref comments) = contact.comments {
        writeln!(out, "Comments:  {}", comments)?;
    }
    writeln!(out, "Favorite:  {}", if contact.favorite { "yes" } else { "no" })?;
    Ok(())
}
