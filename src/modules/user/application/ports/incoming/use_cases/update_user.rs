use async_trait::async_trait;
use serde::Deserialize;

use crate::modules::user::application::domain::UserDetails;
use crate::shared::patch::PatchField;
use crate::shared::validation::FieldErrors;

/// Partial update of a user. Absent fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateUserInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub password_confirmation: Option<String>,
    pub profile: Option<UpdateProfileInput>,
}

/// Profile fields as sent by the client, before validation.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct UpdateProfileInput {
    pub phone: PatchField<String>,
    pub birth_date: PatchField<String>,
    pub gender: PatchField<String>,
    pub bio: PatchField<String>,
    pub website: PatchField<String>,
    pub address_line1: PatchField<String>,
    pub address_line2: PatchField<String>,
    pub city: PatchField<String>,
    pub state: PatchField<String>,
    pub postal_code: PatchField<String>,
    pub country_code: PatchField<String>,
    pub preferences: PatchField<serde_json::Value>,
    pub is_public: PatchField<bool>,
    pub marketing_consent: PatchField<bool>,
    pub timezone: PatchField<String>,
    pub locale: PatchField<String>,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum UpdateUserError {
    #[error("User not found")]
    NotFound,

    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[async_trait]
pub trait UpdateUserUseCase: Send + Sync {
    async fn execute(&self, id: i64, input: UpdateUserInput)
        -> Result<UserDetails, UpdateUserError>;
}
