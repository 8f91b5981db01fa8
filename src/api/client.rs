//! API client for communicating with the contacts REST API.
//!
//! This module provides the `ApiClient` struct for the credential
//! exchange and for authenticated contact operations. Success codes are
//! exact (login 200, create 201, delete 204); anything else becomes a
//! typed `ApiError` carrying the response body. Each operation issues
//! exactly one request: no retry, no timeout.

use anyhow::{Context, Result};
use reqwest::{header, Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::auth::{SessionContext, TokenPair};
use crate::models::{Contact, NewContact, NewUser, UserProfile};

use super::ApiError;

/// API client for the contacts service.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Create a new API client against the given base URL.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder().build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            token: None,
        })
    }

    /// Attach the captured session to this client.
    /// The token is fixed for the client's lifetime; storage is not re-read.
    pub fn with_session(mut self, session: &SessionContext) -> Self {
        self.token = Some(session.access_token.clone());
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn auth_headers(&self) -> Result<header::HeaderMap> {
        let mut headers = header::HeaderMap::new();
        if let Some(ref token) = self.token {
            headers.insert(
                header::AUTHORIZATION,
                header::HeaderValue::from_str(&format!("Bearer {}", token))?,
            );
        }
        Ok(headers)
    }

    /// Check that a response has exactly the expected status, returning a
    /// typed error carrying the body if not.
    async fn expect_status(
        response: reqwest::Response,
        expected: StatusCode,
    ) -> Result<reqwest::Response> {
        if response.status() == expected {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body).into())
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self
            .client
            .get(url)
            .headers(self.auth_headers()?)
            .send()
            .await
            .with_context(|| format!("Failed to send GET request to {}", url))?;

        let response = Self::expect_status(response, StatusCode::OK).await?;
        response
            .json()
            .await
            .with_context(|| format!("Failed to parse JSON response from {}", url))
    }

    // ===== Credential exchange =====

    /// Exchange a username/password pair for a token pair.
    ///
    /// The credentials are sent form-urlencoded and used for exactly this
    /// one request; they are never stored or logged.
    pub async fn login(&self, username: &str, password: &str) -> Result<TokenPair> {
        let url = self.url("/auth/login");

        let response = self
            .client
            .post(&url)
            .form(&[("username", username), ("password", password)])
            .send()
            .await
            .context("Failed to send login request")?;

        let response = Self::expect_status(response, StatusCode::OK).await?;
        response
            .json()
            .await
            .context("Failed to parse token response")
    }

    /// Register a new account.
    pub async fn signup(&self, user: &NewUser) -> Result<UserProfile> {
        let url = self.url("/auth/signup");

        let response = self
            .client
            .post(&url)
            .json(user)
            .send()
            .await
            .context("Failed to send signup request")?;

        let response = Self::expect_status(response, StatusCode::CREATED).await?;
        response
            .json()
            .await
            .context("Failed to parse signup response")
    }

    // ===== Contact operations =====

    /// Fetch the full contact list for the authenticated user
    pub async fn list_contacts(&self) -> Result<Vec<Contact>> {
        self.get_json(&self.url("/contacts")).await
    }

    /// Fetch a single contact by id
    pub async fn get_contact(&self, id: i64) -> Result<Contact> {
        self.get_json(&self.url(&format!("/contacts/{}", id))).await
    }

    /// Create a contact, expecting 201 with the stored record
    pub async fn create_contact(&self, contact: &NewContact) -> Result<Contact> {
        let url = self.url("/contacts");

        let response = self
            .client
            .post(&url)
            .headers(self.auth_headers()?)
            .json(contact)
            .send()
            .await
            .context("Failed to send create-contact request")?;

        let response = Self::expect_status(response, StatusCode::CREATED).await?;
        response
            .json()
            .await
            .context("Failed to parse created contact")
    }

    /// Replace a contact by id
    pub async fn update_contact(&self, id: i64, contact: &NewContact) -> Result<Contact> {
        let url = self.url(&format!("/contacts/{}", id));

        let response = self
            .client
            .put(&url)
            .headers(self.auth_headers()?)
            .json(contact)
            .send()
            .await
            .context("Failed to send update-contact request")?;

        let response = Self::expect_status(response, StatusCode::OK).await?;
        response
            .json()
            .await
            .context("Failed to parse updated contact")
    }

    /// Delete a contact by id, expecting 204
    pub async fn delete_contact(&self, id: i64) -> Result<()> {
        let url = self.url(&format!("/contacts/{}", id));

        let response = self
            .client
            .delete(&url)
            .headers(self.auth_headers()?)
            .send()
            .await
            .context("Failed to send delete-contact request")?;

        Self::expect_status(response, StatusCode::NO_CONTENT).await?;
        Ok(())
    }

    /// Search contacts by name or email.
    /// The query becomes a path segment, so it is percent-encoded rather
    /// than interpolated raw.
    pub async fn search_contacts(&self, query: &str) -> Result<Vec<Contact>> {
        let mut url =
            reqwest::Url::parse(&self.base_url).context("Invalid API base URL")?;
        url.path_segments_mut()
            .map_err(|_| anyhow::anyhow!("API base URL cannot be a base"))?
            .pop_if_empty()
            .extend(["contacts", "search_by", query]);
        self.get_json(url.as_str()).await
    }

    /// Fetch contacts with a birthday within the next `days` days
    pub async fn upcoming_birthdays(&self, days: u32) -> Result<Vec<Contact>> {
        let url = self.url("/contacts/search/birthdays");
        debug!(days, "Fetching upcoming birthdays");

        let response = self
            .client
            .get(&url)
            .query(&[("days", days)])
            .headers(self.auth_headers()?)
            .send()
            .await
            .context("Failed to send birthdays request")?;

        let response = Self::expect_status(response, StatusCode::OK).await?;
        response
            .json()
            .await
            .context("Failed to parse birthdays response")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string_contains, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn session(token: &str) -> SessionContext {
        SessionContext {
            access_token: token.to_string(),
            refresh_token: None,
        }
    }

    fn contact_json(id: i64, first_name: &str, phone: &str) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "first_name": first_name,
            "last_name": "Test",
            "email": format!("{}@example.com", first_name.to_lowercase()),
            "phone": phone,
            "favorite": false
        })
    }

    #[tokio::test]
    async fn login_sends_form_credentials_and_returns_tokens() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .and(header("content-type", "application/x-www-form-urlencoded"))
            .and(body_string_contains("username=ivan%40example.com"))
            .and(body_string_contains("password=secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "acc-123",
                "refresh_token": "ref-456",
                "token_type": "bearer"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri()).unwrap();
        let tokens = client.login("ivan@example.com", "secret").await.unwrap();
        assert_eq!(tokens.access_token, "acc-123");
        assert_eq!(tokens.refresh_token, "ref-456");
    }

    #[tokio::test]
    async fn login_rejection_is_typed_unauthorized() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(serde_json::json!({"detail": "Invalid password"})),
            )
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri()).unwrap();
        let err = client.login("ivan@example.com", "wrong").await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ApiError>(),
            Some(ApiError::Unauthorized)
        ));
    }

    #[tokio::test]
    async fn rejected_login_persists_no_tokens() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(serde_json::json!({"detail": "Invalid password"})),
            )
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let store = crate::auth::TokenStore::new(dir.path().to_path_buf());

        // Same flow as the login command: save only runs on success
        let client = ApiClient::new(server.uri()).unwrap();
        if let Ok(tokens) = client.login("ivan@example.com", "wrong").await {
            store.save(&tokens).unwrap();
        }
        assert!(store.load().unwrap().is_none());
    }

    #[tokio::test]
    async fn list_sends_exact_bearer_header() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/contacts"))
            .and(header("authorization", "Bearer abc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri()).unwrap().with_session(&session("abc"));
        let contacts = client.list_contacts().await.unwrap();
        assert!(contacts.is_empty());
    }

    #[tokio::test]
    async fn list_preserves_response_order() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/contacts"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                contact_json(3, "Ivan", "+380441234567"),
                contact_json(1, "Oleg", "+380447654321"),
                contact_json(2, "Anna", "+380440000000"),
            ])))
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri()).unwrap().with_session(&session("abc"));
        let contacts = client.list_contacts().await.unwrap();
        let ids: Vec<i64> = contacts.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[tokio::test]
    async fn list_failure_is_silent_no_data() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/contacts"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri()).unwrap().with_session(&session("abc"));
        let err = client.list_contacts().await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ApiError>(),
            Some(ApiError::ServerError(_))
        ));
    }

    #[tokio::test]
    async fn create_sends_json_and_requires_201() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/contacts"))
            .and(header("authorization", "Bearer abc"))
            .and(header("content-type", "application/json"))
            .and(body_string_contains("\"first_name\":\"Ivan\""))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(contact_json(10, "Ivan", "+380441234567")),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri()).unwrap().with_session(&session("abc"));
        let new_contact = NewContact {
            first_name: "Ivan".to_string(),
            last_name: "Batig".to_string(),
            email: "ivan@example.com".to_string(),
            phone: Some("+380441234567".to_string()),
            ..Default::default()
        };
        let created = client.create_contact(&new_contact).await.unwrap();
        assert_eq!(created.id, 10);
    }

    #[tokio::test]
    async fn create_rejection_carries_error_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/contacts"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_json(serde_json::json!({"detail": "Invalid phone number"})),
            )
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri()).unwrap().with_session(&session("abc"));
        let err = client
            .create_contact(&NewContact::default())
            .await
            .unwrap_err();
        match err.downcast_ref::<ApiError>() {
            Some(ApiError::BadRequest(body)) => assert!(body.contains("Invalid phone number")),
            other => panic!("expected BadRequest, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn create_conflict_on_duplicate_email() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/contacts"))
            .respond_with(
                ResponseTemplate::new(409)
                    .set_body_json(serde_json::json!({"detail": "Email is exist!"})),
            )
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri()).unwrap().with_session(&session("abc"));
        let err = client
            .create_contact(&NewContact::default())
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ApiError>(),
            Some(ApiError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn delete_requires_204() {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/contacts/5"))
            .and(header("authorization", "Bearer abc"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri()).unwrap().with_session(&session("abc"));
        client.delete_contact(5).await.unwrap();
    }

    #[tokio::test]
    async fn search_encodes_the_query_segment() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/contacts/search_by/Ivan%20Batig"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                contact_json(3, "Ivan", "+380441234567"),
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri()).unwrap().with_session(&session("abc"));
        let contacts = client.search_contacts("Ivan Batig").await.unwrap();
        assert_eq!(contacts.len(), 1);
    }

    #[tokio::test]
    async fn birthdays_passes_days_query() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/contacts/search/birthdays"))
            .and(query_param("days", "7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                contact_json(4, "Anna", "+380440000000"),
            ])))
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri()).unwrap().with_session(&session("abc"));
        let contacts = client.upcoming_birthdays(7).await.unwrap();
        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].first_name.as_deref(), Some("Anna"));
    }

    #[tokio::test]
    async fn signup_posts_json_and_requires_201() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/auth/signup"))
            .and(body_string_contains("\"username\":\"ivan\""))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "id": 1,
                "username": "ivan",
                "email": "ivan@example.com",
                "avatar": null,
                "roles": "user"
            })))
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri()).unwrap();
        let user = NewUser {
            username: "ivan".to_string(),
            email: "ivan@example.com".to_string(),
            password: "secret".to_string(),
        };
        let profile = client.signup(&user).await.unwrap();
        assert_eq!(profile.username, "ivan");
    }
}
