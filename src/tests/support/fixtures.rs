use chrono::{DateTime, NaiveDate, Utc};

use crate::auth::application::domain::Role;
use crate::modules::user::application::domain::{
    Gender, Lifecycle, Post, User, UserDetails, UserProfile,
};

pub fn fixed_time() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2025-01-15T10:00:00Z")
        .unwrap()
        .with_timezone(&Utc)
}

pub fn sample_user(id: i64) -> User {
    User {
        id,
        name: "John Doe".to_string(),
        email: "john@example.com".to_string(),
        password_hash: "$argon2id$v=19$m=1024,t=1,p=1$c2FsdA$aGFzaA".to_string(),
        email_verified_at: None,
        remember_token: None,
        role: Role::Member,
        created_at: fixed_time(),
        updated_at: fixed_time(),
        lifecycle: Lifecycle::Active,
    }
}

pub fn user_with(id: i64, name: &str, email: &str) -> User {
    User {
        name: name.to_string(),
        email: email.to_string(),
        ..sample_user(id)
    }
}

pub fn deleted_user(id: i64) -> User {
    User {
        lifecycle: Lifecycle::Deleted { at: fixed_time() },
        ..sample_user(id)
    }
}

pub fn sample_profile(user_id: i64) -> UserProfile {
    UserProfile {
        user_id,
        phone: Some("+1 555 0100".to_string()),
        birth_date: NaiveDate::from_ymd_opt(1990, 5, 17),
        gender: Some(Gender::Male),
        bio: Some("Hello".to_string()),
        website: None,
        address_line1: None,
        address_line2: None,
        city: Some("Springfield".to_string()),
        state: None,
        postal_code: None,
        country_code: Some("US".to_string()),
        preferences: serde_json::json!({}),
        is_public: true,
        marketing_consent: false,
        timezone: "UTC".to_string(),
        locale: "en".to_string(),
        created_at: fixed_time(),
        updated_at: fixed_time(),
    }
}

pub fn sample_post(id: i64, user_id: i64) -> Post {
    Post {
        id,
        user_id,
        title: format!("Post {}", id),
        body: "Body".to_string(),
        created_at: fixed_time(),
        updated_at: fixed_time(),
    }
}

pub fn sample_details(id: i64) -> UserDetails {
    UserDetails {
        user: sample_user(id),
        profile: Some(sample_profile(id)),
        posts: vec![sample_post(1, id)],
    }
}
