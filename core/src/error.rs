//! Error types for the wishlist API client.
//!
//! # Design
//! The wire taxonomy is flat: every non-2xx response is `RequestFailed`,
//! carrying the server's `message` when the body had one. The remaining
//! variants cover local failures (bad form input, JSON problems, transport).
//!
//! `Display` is the technical description used in logs. What the user sees
//! in the status line comes from [`ApiError::user_message`].

use thiserror::Error;

use crate::messages;
use crate::types::ErrorBody;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a non-2xx status.
    #[error("request failed with status {status}{}", suffix(.message))]
    RequestFailed { status: u16, message: Option<String> },

    /// A 2xx response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The operation needs a wishlist id and the form has none.
    #[error("wishlist id is required")]
    MissingId,

    /// A numeric form field holds something that is not a number.
    #[error("field `{field}` is not a valid number: {value:?}")]
    InvalidField { field: &'static str, value: String },

    /// The request never produced an HTTP response.
    #[error("transport error: {0}")]
    Transport(String),
}

impl ApiError {
    /// Build a `RequestFailed` from a non-2xx status and its raw body,
    /// extracting the JSON `message` when there is one.
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.message)
            .filter(|m| !m.is_empty());
        ApiError::RequestFailed { status, message }
    }

    /// Text shown in the status line for this failure.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::RequestFailed {
                message: Some(message),
                ..
            } => message.clone(),
            ApiError::MissingId => messages::ID_REQUIRED.to_string(),
            ApiError::InvalidField { field, .. } => {
                format!("Invalid Wishlist: {field} must be a number")
            }
            _ => messages::SERVER_ERROR.to_string(),
        }
    }
}

fn suffix(message: &Option<String>) -> String {
    message.as_deref().map(|m| format!(": {m}")).unwrap_or_default()
}
