//! API request/response models for signup and login.

use crate::api::models::users::UserResponse;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SignupRequest {
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub password: String,
}

/// Login payload. Both fields are optional at the deserialization level so
/// that a missing field surfaces as our own validation error rather than a
/// deserializer rejection.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SignupResponseData {
    pub user: UserResponse,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SignupResponse {
    pub status: String,
    pub token: String,
    pub data: SignupResponseData,
}

impl SignupResponse {
    pub fn new(token: String, user: UserResponse) -> Self {
        Self {
            status: "success".to_string(),
            token,
            data: SignupResponseData { user },
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LoginResponse {
    pub status: String,
    pub token: String,
}

impl LoginResponse {
    pub fn new(token: String) -> Self {
        Self {
            status: "success".to_string(),
            token,
        }
    }
}
