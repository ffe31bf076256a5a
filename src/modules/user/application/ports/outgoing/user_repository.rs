// src/modules/user/application/ports/outgoing/user_repository.rs

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::auth::application::domain::Role;
use crate::modules::user::application::domain::{Gender, User};
use crate::shared::patch::PatchField;

//
// ──────────────────────────────────────────────────────────
// DTOs
// ──────────────────────────────────────────────────────────
//

/// Already validated and normalized; `password_hash` is never plain text.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateUserData {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}

/// `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatchUserData {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub profile: Option<PatchProfileData>,
}

impl PatchUserData {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.password_hash.is_none()
            && self.profile.as_ref().is_none_or(PatchProfileData::is_empty)
    }
}

/// Nullable columns use `PatchField`; the rest cannot be cleared.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatchProfileData {
    pub phone: PatchField<String>,
    pub birth_date: PatchField<NaiveDate>,
    pub gender: PatchField<Gender>,
    pub bio: PatchField<String>,
    pub website: PatchField<String>,
    pub address_line1: PatchField<String>,
    pub address_line2: PatchField<String>,
    pub city: PatchField<String>,
    pub state: PatchField<String>,
    pub postal_code: PatchField<String>,
    pub country_code: PatchField<String>,
    pub preferences: Option<serde_json::Value>,
    pub is_public: Option<bool>,
    pub marketing_consent: Option<bool>,
    pub timezone: Option<String>,
    pub locale: Option<String>,
}

impl PatchProfileData {
    pub fn is_empty(&self) -> bool {
        self.phone.is_unset()
            && self.birth_date.is_unset()
            && self.gender.is_unset()
            && self.bio.is_unset()
            && self.website.is_unset()
            && self.address_line1.is_unset()
            && self.address_line2.is_unset()
            && self.city.is_unset()
            && self.state.is_unset()
            && self.postal_code.is_unset()
            && self.country_code.is_unset()
            && self.preferences.is_none()
            && self.is_public.is_none()
            && self.marketing_consent.is_none()
            && self.timezone.is_none()
            && self.locale.is_none()
    }
}

//
// ──────────────────────────────────────────────────────────
// Errors
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum UserRepositoryError {
    #[error("Email already exists")]
    EmailAlreadyExists,

    #[error("User not found")]
    UserNotFound,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

//
// ──────────────────────────────────────────────────────────
// Port (write side)
// ──────────────────────────────────────────────────────────
//

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create_user(&self, data: CreateUserData) -> Result<User, UserRepositoryError>;

    /// Updates user columns and upserts the profile in one transaction.
    /// Only active users can be patched.
    async fn patch_user(&self, id: i64, data: PatchUserData) -> Result<User, UserRepositoryError>;

    /// Fails with `UserNotFound` when there is no active user with `id`.
    async fn soft_delete_user(&self, id: i64) -> Result<(), UserRepositoryError>;

    /// Clears the deletion marker. Restoring an active user is a no-op.
    /// Fails with `EmailAlreadyExists` when an active user took the email
    /// in the meantime.
    async fn restore_user(&self, id: i64) -> Result<User, UserRepositoryError>;

    /// Keeps the original timestamp when already verified.
    async fn mark_email_verified(&self, id: i64) -> Result<User, UserRepositoryError>;
}
