//! Token persistence and session capture.
//!
//! A successful login yields a `TokenPair`; `TokenStore` persists the two
//! tokens as independent string values under fixed key names, mirroring
//! the storage contract the contacts server expects its clients to keep.
//! Resource commands build a `SessionContext` from the store exactly once
//! per process; nothing re-reads storage after that.

// Allow dead code: the refresh token is stored and carried but has no
// consumer, matching the server contract
#![allow(dead_code)]

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Storage key for the access token
const ACCESS_TOKEN_KEY: &str = "accessToken";

/// Storage key for the refresh token
const REFRESH_TOKEN_KEY: &str = "refreshToken";

/// Token pair returned by `POST /auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    /// Always "bearer" as issued by the server
    #[serde(default)]
    pub token_type: Option<String>,
}

/// Token state captured once when a resource command starts.
///
/// The refresh token is carried but never sent anywhere; the server's
/// refresh endpoint is not consumed by this client.
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub access_token: String,
    pub refresh_token: Option<String>,
}

/// Durable storage for the token pair.
///
/// Each token lives in its own file named after its storage key, holding
/// the raw token string. Only a successful login writes these values;
/// concurrent logins are last-writer-wins.
pub struct TokenStore {
    dir: PathBuf,
}

impl TokenStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Persist both tokens. Both writes must succeed; a failed login
    /// never reaches this point.
    pub fn save(&self, tokens: &TokenPair) -> Result<()> {
        std::fs::create_dir_all(&self.dir)
            .context("Failed to create token storage directory")?;
        std::fs::write(self.key_path(ACCESS_TOKEN_KEY), &tokens.access_token)
            .context("Failed to write access token")?;
        std::fs::write(self.key_path(REFRESH_TOKEN_KEY), &tokens.refresh_token)
            .context("Failed to write refresh token")?;
        Ok(())
    }

    /// Capture the stored session, if any.
    ///
    /// Returns `None` when no access token has been persisted. A missing
    /// refresh token is tolerated; it is dead weight in this client.
    pub fn load(&self) -> Result<Option<SessionContext>> {
        let access_path = self.key_path(ACCESS_TOKEN_KEY);
        if !access_path.exists() {
            return Ok(None);
        }
        let access_token = std::fs::read_to_string(&access_path)
            .context("Failed to read access token")?;
        let refresh_token = std::fs::read_to_string(self.key_path(REFRESH_TOKEN_KEY)).ok();

        Ok(Some(SessionContext {
            access_token,
            refresh_token,
        }))
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}
