//! Authentication module for managing the persisted token pair.
//!
//! This module provides:
//! - `TokenPair`: the token pair returned by a successful login
//! - `TokenStore`: durable storage of the tokens under fixed keys
//! - `SessionContext`: the one-shot token capture handed to the API client
//!
//! Tokens are persisted until overwritten by a new login; the client
//! never deletes them.

pub mod session;

pub use session::{SessionContext, TokenPair, TokenStore};
