//! HTTP client for directory API requests.
//!
//! This module provides a low-level HTTP client wrapper for making requests
//! to the directory API, attaching the session token and mapping error
//! responses to typed errors.

use super::error::DirectoryError;
use log::*;
use reqwest::{Method, Response};
use serde::de::DeserializeOwned;

/// Makes requests to the directory API on behalf of the current session.
///
pub struct Client {
    pub(crate) base_url: String,
    pub(crate) access_token: Option<String>,
    pub(crate) http_client: reqwest::Client,
}

impl Client {
    /// Returns a new instance for the given base URL and, if a session
    /// already exists, its token.
    ///
    /// # Panics
    /// Panics if the HTTP client cannot be created. This should never happen
    /// in practice as reqwest::Client::builder().build() only fails on
    /// invalid configuration, which we don't use.
    pub fn new(base_url: &str, access_token: Option<&str>) -> Self {
        Client {
            base_url: base_url.trim_end_matches('/').to_owned(),
            access_token: access_token.map(str::to_owned),
            http_client: reqwest::Client::builder()
                .build()
                .expect("Failed to create HTTP client - this should never happen"),
        }
    }

    /// Attach a session token to all subsequent requests.
    ///
    pub fn set_access_token(&mut self, token: &str) {
        self.access_token = Some(token.to_owned());
    }

    /// Drop the session token; subsequent requests are anonymous.
    ///
    pub fn clear_access_token(&mut self) {
        self.access_token = None;
    }

    /// Make a request and return the response, or a typed error for 401 and
    /// other non-success statuses.
    ///
    pub(crate) async fn call(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<Response, DirectoryError> {
        let request_url = format!("{}/{}", self.base_url, path);
        let mut request = self.http_client.request(method, &request_url);
        if let Some(token) = &self.access_token {
            request = request.header("Authorization", format!("Bearer {}", token));
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await?;
        let status = response.status();

        if status.as_u16() == 401 {
            warn!("Directory API rejected the session (status 401)");
            return Err(DirectoryError::Unauthorized);
        }
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("Unable to read response"));
            error!("API request failed with status {}: {}", status, message);
            return Err(DirectoryError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response)
    }

    /// Read and deserialize a response body, logging the raw body when it
    /// does not conform to the expected shape.
    ///
    pub(crate) async fn parse<T: DeserializeOwned>(
        response: Response,
    ) -> Result<T, DirectoryError> {
        let bytes = response.bytes().await?;
        match serde_json::from_slice::<T>(&bytes) {
            Ok(data) => Ok(data),
            Err(e) => {
                error!(
                    "Failed to deserialize API response: {}. Response body: {}",
                    e,
                    String::from_utf8_lossy(&bytes)
                );
                Err(DirectoryError::Deserialization(e))
            }
        }
    }
}
