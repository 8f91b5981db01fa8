//! REST API client module for the contacts service.
//!
//! This module provides the `ApiClient` for communicating with the
//! contacts API: credential exchange against `/auth`, and authenticated
//! CRUD and search operations against `/contacts`.
//!
//! Protected endpoints use JWT bearer token authentication obtained
//! through the login endpoint.

pub mod client;
pub mod error;

pub use client::ApiClient;
pub use error::ApiError;
