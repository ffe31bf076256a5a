// src/api/schemas.rs
use serde::Serialize;
use std::collections::BTreeMap;
use utoipa::ToSchema;

/// Standard success envelope
#[derive(Serialize, ToSchema)]
#[serde(bound = "T: Serialize")]
pub struct SuccessResponse<T> {
    /// Always true for successful responses
    #[schema(example = true)]
    pub success: bool,
    /// Response payload (`null` for deletions)
    pub data: T,
    #[schema(example = "User retrieved successfully")]
    pub message: String,
}

/// Standard error envelope
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Always false for error responses
    #[schema(example = false)]
    pub success: bool,
    /// Always null
    #[schema(value_type = Option<Object>)]
    pub data: Option<serde_json::Value>,
    #[schema(example = "User not found.")]
    pub message: String,
}

/// Error envelope of a 422 response
#[derive(Serialize, ToSchema)]
pub struct ValidationErrorResponse {
    #[schema(example = false)]
    pub success: bool,
    #[schema(value_type = Option<Object>)]
    pub data: Option<serde_json::Value>,
    #[schema(example = "The given data was invalid.")]
    pub message: String,
    /// Messages keyed by field name; nested profile fields use `profile.<field>`
    #[schema(example = json!({"email": ["The email has already been taken."]}))]
    pub errors: BTreeMap<String, Vec<String>>,
}
