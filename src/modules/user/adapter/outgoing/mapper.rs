use chrono::Utc;

use super::sea_orm_entity::{posts, user_profiles, users};
use crate::auth::application::domain::Role;
use crate::modules::user::application::domain::{Gender, Lifecycle, Post, User, UserProfile};

/// Rows that violate column invariants (unknown enum strings).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{0}")]
pub struct CorruptRow(pub String);

pub fn user_from_model(model: users::Model) -> Result<User, CorruptRow> {
    let role = model
        .role
        .parse::<Role>()
        .map_err(|e| CorruptRow(format!("user {}: {}", model.id, e)))?;

    Ok(User {
        id: model.id,
        name: model.name,
        email: model.email,
        password_hash: model.password_hash,
        email_verified_at: model.email_verified_at.map(|t| t.with_timezone(&Utc)),
        remember_token: model.remember_token,
        role,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
        lifecycle: Lifecycle::from_marker(model.deleted_at.map(|t| t.with_timezone(&Utc))),
    })
}

pub fn profile_from_model(model: user_profiles::Model) -> Result<UserProfile, CorruptRow> {
    let gender = model
        .gender
        .as_deref()
        .map(str::parse::<Gender>)
        .transpose()
        .map_err(|e| CorruptRow(format!("profile {}: {}", model.user_id, e)))?;

    Ok(UserProfile {
        user_id: model.user_id,
        phone: model.phone,
        birth_date: model.birth_date,
        gender,
        bio: model.bio,
        website: model.website,
        address_line1: model.address_line1,
        address_line2: model.address_line2,
        city: model.city,
        state: model.state,
        postal_code: model.postal_code,
        country_code: model.country_code,
        preferences: model.preferences,
        is_public: model.is_public,
        marketing_consent: model.marketing_consent,
        timezone: model.timezone,
        locale: model.locale,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    })
}

pub fn post_from_model(model: posts::Model) -> Post {
    Post {
        id: model.id,
        user_id: model.user_id,
        title: model.title,
        body: model.body,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}
