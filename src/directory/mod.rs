//! Directory API integration.
//!
//! This module is responsible for asynchronous interaction with the user
//! directory API, including:
//! - Authentication (login, registration) and session tokens
//! - CRUD operations over user records
//! - Typed errors for authorization and API failures

mod client;
mod error;
mod models;
mod resource;

pub use error::DirectoryError;
pub use models::{AuthResponse, UserPayload};
pub use resource::{Address, Company, Geo, Session, User};

use chrono::prelude::*;
use client::Client;
use log::*;
use models::{LoginRequest, RegisterRequest, Resource};
use reqwest::Method;

/// Responsible for asynchronous interaction with the directory API including
/// transformation of response data into explicitly-defined types.
///
pub struct Directory {
    client: Client,
}

impl Directory {
    /// Returns a new instance for the given base URL, resuming an existing
    /// session when a token is provided.
    ///
    pub fn new(base_url: &str, access_token: Option<&str>) -> Directory {
        debug!("Initializing directory client for {}...", base_url);
        Directory {
            client: Client::new(base_url, access_token),
        }
    }

    /// Attach a session token to all subsequent requests.
    ///
    pub fn set_access_token(&mut self, token: &str) {
        self.client.set_access_token(token);
    }

    /// Drop the session token; subsequent requests are anonymous.
    ///
    pub fn clear_access_token(&mut self) {
        self.client.clear_access_token();
    }

    /// Exchange credentials for a session. On success the returned token is
    /// attached to all subsequent requests.
    ///
    pub async fn log_in(
        &mut self,
        username: &str,
        password: &str,
    ) -> Result<Session, DirectoryError> {
        debug!("Requesting session token for user '{}'...", username);
        let body = serde_json::to_value(LoginRequest { username, password })?;
        let response = self.client.call(Method::POST, "auth/login", Some(body)).await?;
        let auth: AuthResponse = Client::parse(response).await?;
        self.client.set_access_token(&auth.token);
        info!("Authenticated as '{}'", auth.username);
        Ok(Session {
            token: auth.token,
            username: auth.username,
            email: auth.email,
            logged_in_at: Utc::now(),
        })
    }

    /// Create an account and return the session issued for it.
    ///
    pub async fn register(
        &mut self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<Session, DirectoryError> {
        debug!("Registering account for user '{}'...", username);
        let body = serde_json::to_value(RegisterRequest {
            username,
            email,
            password,
        })?;
        let response = self
            .client
            .call(Method::POST, "auth/register", Some(body))
            .await?;
        let auth: AuthResponse = Client::parse(response).await?;
        info!("Registered account '{}'", auth.username);
        Ok(Session {
            token: auth.token,
            username: auth.username,
            email: auth.email,
            logged_in_at: Utc::now(),
        })
    }

    /// Returns a vector of all user records.
    ///
    pub async fn users(&mut self) -> Result<Vec<User>, DirectoryError> {
        debug!("Requesting all user records...");
        let response = self.client.call(Method::GET, User::endpoint(), None).await?;
        let users: Vec<User> = Client::parse(response).await?;
        debug!("Retrieved {} user records", users.len());
        Ok(users)
    }

    /// Return the user record with the given id.
    ///
    pub async fn user(&mut self, id: i64) -> Result<User, DirectoryError> {
        debug!("Requesting user record {}...", id);
        let path = format!("{}/{}", User::endpoint(), id);
        match self.client.call(Method::GET, &path, None).await {
            Ok(response) => Client::parse(response).await,
            Err(DirectoryError::Api { status: 404, .. }) => {
                Err(DirectoryError::UserNotFound { id })
            }
            Err(e) => Err(e),
        }
    }

    /// Create a user record and return it with its server-assigned id.
    ///
    pub async fn create_user(&mut self, user: &UserPayload) -> Result<User, DirectoryError> {
        debug!("Creating user record for '{}'...", user.username);
        let body = serde_json::to_value(user)?;
        let response = self
            .client
            .call(Method::POST, User::endpoint(), Some(body))
            .await?;
        Client::parse(response).await
    }

    /// Update the user record with the given id and return the stored result.
    ///
    pub async fn update_user(
        &mut self,
        id: i64,
        user: &UserPayload,
    ) -> Result<User, DirectoryError> {
        debug!("Updating user record {}...", id);
        let path = format!("{}/{}", User::endpoint(), id);
        let body = serde_json::to_value(user)?;
        match self.client.call(Method::PUT, &path, Some(body)).await {
            Ok(response) => Client::parse(response).await,
            Err(DirectoryError::Api { status: 404, .. }) => {
                Err(DirectoryError::UserNotFound { id })
            }
            Err(e) => Err(e),
        }
    }

    /// Delete the user record with the given id.
    ///
    pub async fn delete_user(&mut self, id: i64) -> Result<(), DirectoryError> {
        debug!("Deleting user record {}...", id);
        let path = format!("{}/{}", User::endpoint(), id);
        match self.client.call(Method::DELETE, &path, None).await {
            Ok(_) => Ok(()),
            Err(DirectoryError::Api { status: 404, .. }) => {
                Err(DirectoryError::UserNotFound { id })
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::uuid::UUIDv4;
    use fake::{Fake, Faker};
    use httpmock::MockServer;
    use serde_json::json;
    use uuid::Uuid;

    #[tokio::test]
    async fn log_in_success() -> Result<(), DirectoryError> {
        let token: Uuid = UUIDv4.fake();
        let server = MockServer::start();
        let mock = server
            .mock_async(|when, then| {
                when.method("POST")
                    .path("/auth/login")
                    .json_body(json!({ "username": "ada", "password": "secret" }));
                then.status(200).json_body(json!({
                    "token": token.to_string(),
                    "username": "ada",
                    "email": "ada@example.com",
                }));
            })
            .await;

        let mut directory = Directory::new(&server.base_url(), None);
        let session = directory.log_in("ada", "secret").await?;
        mock.assert_async().await;
        assert_eq!(session.token, token.to_string());
        assert_eq!(session.username, "ada");
        assert_eq!(session.email.as_deref(), Some("ada@example.com"));
        Ok(())
    }

    #[tokio::test]
    async fn log_in_attaches_token_to_later_requests() -> Result<(), DirectoryError> {
        let token: Uuid = UUIDv4.fake();
        let server = MockServer::start();
        server
            .mock_async(|when, then| {
                when.method("POST").path("/auth/login");
                then.status(200)
                    .json_body(json!({ "token": token.to_string(), "username": "ada" }));
            })
            .await;
        let users_mock = server
            .mock_async(|when, then| {
                when.method("GET")
                    .path("/users")
                    .header("Authorization", &format!("Bearer {}", token));
                then.status(200).json_body(json!([]));
            })
            .await;

        let mut directory = Directory::new(&server.base_url(), None);
        directory.log_in("ada", "secret").await?;
        let users = directory.users().await?;
        users_mock.assert_async().await;
        assert!(users.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn log_in_unauthorized() {
        let server = MockServer::start();
        let mock = server
            .mock_async(|when, then| {
                when.method("POST").path("/auth/login");
                then.status(401);
            })
            .await;

        let mut directory = Directory::new(&server.base_url(), None);
        let result = directory.log_in("ada", "wrong").await;
        assert!(matches!(result, Err(DirectoryError::Unauthorized)));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn register_success() -> Result<(), DirectoryError> {
        let token: Uuid = UUIDv4.fake();
        let server = MockServer::start();
        let mock = server
            .mock_async(|when, then| {
                when.method("POST").path("/auth/register").json_body(json!({
                    "username": "grace",
                    "email": "grace@example.com",
                    "password": "hopper1",
                }));
                then.status(200)
                    .json_body(json!({ "token": token.to_string(), "username": "grace" }));
            })
            .await;

        let mut directory = Directory::new(&server.base_url(), None);
        let session = directory
            .register("grace", "grace@example.com", "hopper1")
            .await?;
        mock.assert_async().await;
        assert_eq!(session.username, "grace");
        Ok(())
    }

    #[tokio::test]
    async fn users_success() -> Result<(), DirectoryError> {
        let token: Uuid = UUIDv4.fake();
        let listed: [User; 2] = [Faker.fake(), Faker.fake()];

        let server = MockServer::start();
        let mock = server
            .mock_async(|when, then| {
                when.method("GET")
                    .path("/users")
                    .header("Authorization", &format!("Bearer {}", token));
                then.status(200)
                    .json_body(serde_json::to_value(&listed).unwrap());
            })
            .await;

        let mut directory = Directory::new(&server.base_url(), Some(&token.to_string()));
        let users = directory.users().await?;
        mock.assert_async().await;
        assert_eq!(users.len(), 2);
        assert_eq!(users[0], listed[0]);
        Ok(())
    }

    #[tokio::test]
    async fn user_not_found() {
        let server = MockServer::start();
        server
            .mock_async(|when, then| {
                when.method("GET").path("/users/42");
                then.status(404);
            })
            .await;

        let mut directory = Directory::new(&server.base_url(), None);
        let result = directory.user(42).await;
        assert!(matches!(result, Err(DirectoryError::UserNotFound { id: 42 })));
    }

    #[tokio::test]
    async fn create_user_success() -> Result<(), DirectoryError> {
        let payload: UserPayload = Faker.fake();
        let mut stored: User = Faker.fake();
        stored.username = payload.username.clone();

        let server = MockServer::start();
        let mock = server
            .mock_async(|when, then| {
                when.method("POST")
                    .path("/users")
                    .json_body(serde_json::to_value(&payload).unwrap());
                then.status(201)
                    .json_body(serde_json::to_value(&stored).unwrap());
            })
            .await;

        let mut directory = Directory::new(&server.base_url(), None);
        let created = directory.create_user(&payload).await?;
        mock.assert_async().await;
        assert_eq!(created.id, stored.id);
        assert_eq!(created.username, payload.username);
        Ok(())
    }

    #[tokio::test]
    async fn update_user_success() -> Result<(), DirectoryError> {
        let payload: UserPayload = Faker.fake();
        let mut stored: User = Faker.fake();
        stored.id = 5;

        let server = MockServer::start();
        let mock = server
            .mock_async(|when, then| {
                when.method("PUT")
                    .path("/users/5")
                    .json_body(serde_json::to_value(&payload).unwrap());
                then.status(200)
                    .json_body(serde_json::to_value(&stored).unwrap());
            })
            .await;

        let mut directory = Directory::new(&server.base_url(), None);
        let updated = directory.update_user(5, &payload).await?;
        mock.assert_async().await;
        assert_eq!(updated.id, 5);
        Ok(())
    }

    #[tokio::test]
    async fn delete_user_success() -> Result<(), DirectoryError> {
        let server = MockServer::start();
        let mock = server
            .mock_async(|when, then| {
                when.method("DELETE").path("/users/5");
                then.status(204);
            })
            .await;

        let mut directory = Directory::new(&server.base_url(), None);
        directory.delete_user(5).await?;
        mock.assert_async().await;
        Ok(())
    }
}
