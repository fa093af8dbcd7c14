//! Wire types for directory API requests and responses.

use super::resource::{Address, Company, User};
use fake::Dummy;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Implemented by record types fetched from the API. Names the collection
/// endpoint the records live under.
///
pub trait Resource: DeserializeOwned {
    fn endpoint() -> &'static str;
}

impl Resource for User {
    fn endpoint() -> &'static str {
        "users"
    }
}

/// Defines login request payload.
///
#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Defines registration request payload.
///
#[derive(Debug, Serialize)]
pub struct RegisterRequest<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

/// Defines authentication response data.
///
#[derive(Clone, Debug, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Defines the payload for creating or updating a user record. Identical to
/// a record minus the server-assigned id.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPayload {
    pub name: String,
    pub username: String,
    pub email: String,
    pub phone: String,
    pub website: String,
    pub address: Address,
    pub company: Company,
}
