// API module - HTML table page and JSON endpoints

pub mod rest;
pub mod view;

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct SortRequest {
    pub key: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl From<&crate::error::AppError> for ErrorResponse {
    fn from(err: &crate::error::AppError) -> Self {
        ErrorResponse {
            error: err.code().to_string(),
            message: err.user_message(),
        }
    }
}
