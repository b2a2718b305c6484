//! Account model and related payloads

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Account as returned to callers; the password digest never leaves the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Account {
    pub id: i64,
    pub name: String,
    pub email: String,
}

/// New account creation payload, password still in clear text
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Request for `POST /users/signup`
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl From<SignupRequest> for NewAccount {
    fn from(req: SignupRequest) -> Self {
        Self {
            name: req.name,
            email: req.email,
            password: req.password,
        }
    }
}

/// Request for `POST /users/signin`
#[derive(Debug, Deserialize)]
pub struct SigninRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Response for signup and signin: the identity plus a fresh token
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub token: String,
}

/// Request for `POST /users/update`
#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub password: String,
}

/// Response for `POST /users/update`
#[derive(Debug, Serialize)]
pub struct UpdateProfileResponse {
    pub name: String,
    pub message: &'static str,
}

/// Response for the `GET /users` debug listing
#[derive(Debug, Serialize)]
pub struct AccountsResponse {
    pub users: Vec<Account>,
}
