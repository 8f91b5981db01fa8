//! Data models for contacts-service entities.
//!
//! This module contains the wire-facing data structures:
//!
//! - `Contact`, `NewContact`: contact records and the creation payload
//! - `NewUser`, `UserProfile`: signup request and response

pub mod contact;
pub mod user;

pub use contact::{Contact, NewContact};
pub use user::{NewUser, UserProfile};
