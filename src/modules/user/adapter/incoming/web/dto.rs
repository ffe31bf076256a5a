use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::modules::user::application::domain::{Post, User, UserDetails, UserProfile};
use crate::modules::user::application::ports::incoming::use_cases::{
    CreateUserInput, UpdateProfileInput, UpdateUserInput,
};
use crate::modules::user::application::ports::outgoing::{
    DeletedScope, PageRequest, PageResult, UserCriteria,
};
use crate::shared::patch::PatchField;
use crate::shared::validation::FieldErrors;

//
// ──────────────────────────────────────────────────────────
// Requests
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct CreateUserRequest {
    #[schema(example = "John Doe")]
    pub name: Option<String>,

    #[schema(example = "john@example.com")]
    pub email: Option<String>,

    /// Between 8 and 128 characters
    #[schema(example = "secret123")]
    pub password: Option<String>,

    #[schema(example = "secret123")]
    pub password_confirmation: Option<String>,
}

impl From<CreateUserRequest> for CreateUserInput {
    fn from(req: CreateUserRequest) -> Self {
        CreateUserInput {
            name: req.name,
            email: req.email,
            password: req.password,
            password_confirmation: req.password_confirmation,
        }
    }
}

/// Every field is optional; omitted fields keep their stored value.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateUserRequest {
    #[schema(example = "Jane Doe")]
    pub name: Option<String>,

    #[schema(example = "jane@example.com")]
    pub email: Option<String>,

    pub password: Option<String>,

    pub password_confirmation: Option<String>,

    pub profile: Option<UpdateProfileRequest>,
}

/// Nullable fields accept `null` to clear the stored value.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct UpdateProfileRequest {
    #[schema(value_type = Option<String>, example = "+1 555 0100")]
    pub phone: PatchField<String>,

    /// `YYYY-MM-DD`, before today
    #[schema(value_type = Option<String>, example = "1990-04-12")]
    pub birth_date: PatchField<String>,

    /// `male` | `female` | `other` | `prefer_not_to_say`
    #[schema(value_type = Option<String>, example = "female")]
    pub gender: PatchField<String>,

    #[schema(value_type = Option<String>)]
    pub bio: PatchField<String>,

    #[schema(value_type = Option<String>, example = "https://example.com")]
    pub website: PatchField<String>,

    #[schema(value_type = Option<String>)]
    pub address_line1: PatchField<String>,

    #[schema(value_type = Option<String>)]
    pub address_line2: PatchField<String>,

    #[schema(value_type = Option<String>)]
    pub city: PatchField<String>,

    #[schema(value_type = Option<String>)]
    pub state: PatchField<String>,

    #[schema(value_type = Option<String>)]
    pub postal_code: PatchField<String>,

    /// ISO 3166-1 alpha-2
    #[schema(value_type = Option<String>, example = "US")]
    pub country_code: PatchField<String>,

    #[schema(value_type = Option<Object>)]
    pub preferences: PatchField<serde_json::Value>,

    #[schema(value_type = Option<bool>)]
    pub is_public: PatchField<bool>,

    #[schema(value_type = Option<bool>)]
    pub marketing_consent: PatchField<bool>,

    #[schema(value_type = Option<String>, example = "UTC")]
    pub timezone: PatchField<String>,

    #[schema(value_type = Option<String>, example = "en")]
    pub locale: PatchField<String>,
}

impl From<UpdateProfileRequest> for UpdateProfileInput {
    fn from(req: UpdateProfileRequest) -> Self {
        UpdateProfileInput {
            phone: req.phone,
            birth_date: req.birth_date,
            gender: req.gender,
            bio: req.bio,
            website: req.website,
            address_line1: req.address_line1,
            address_line2: req.address_line2,
            city: req.city,
            state: req.state,
            postal_code: req.postal_code,
            country_code: req.country_code,
            preferences: req.preferences,
            is_public: req.is_public,
            marketing_consent: req.marketing_consent,
            timezone: req.timezone,
            locale: req.locale,
        }
    }
}

impl From<UpdateUserRequest> for UpdateUserInput {
    fn from(req: UpdateUserRequest) -> Self {
        UpdateUserInput {
            name: req.name,
            email: req.email,
            password: req.password,
            password_confirmation: req.password_confirmation,
            profile: req.profile.map(Into::into),
        }
    }
}

/// Accepts `true`/`false` and `1`/`0`.
fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

const FLAG_MESSAGE: &str = "field must be true or false.";

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListUsersQuery {
    /// 1-based page number (default 1)
    pub page: Option<u64>,

    /// Items per page (default 15, max 100)
    pub per_page: Option<u64>,

    /// Case-insensitive substring of name or email
    pub search: Option<String>,

    /// `true` for verified users only, `false` for unverified only
    pub verified: Option<String>,

    /// `exclude` (default) | `include` | `only`
    #[param(value_type = Option<String>)]
    pub deleted: Option<DeletedScope>,
}

impl ListUsersQuery {
    pub fn to_criteria(&self) -> Result<(UserCriteria, PageRequest), FieldErrors> {
        let mut criteria = UserCriteria::all().with_deleted(self.deleted.unwrap_or_default());

        if let Some(term) = &self.search {
            criteria = criteria.and_search(term);
        }

        if let Some(raw) = &self.verified {
            match parse_flag(raw) {
                Some(verified) => criteria = criteria.and_verified(verified),
                None => return Err(FieldErrors::single("verified", format!("The verified {}", FLAG_MESSAGE))),
            }
        }

        Ok((criteria, PageRequest::new(self.page, self.per_page)))
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct GetUserQuery {
    /// Also return soft-deleted users
    pub include_deleted: Option<String>,
}

impl GetUserQuery {
    pub fn include_deleted(&self) -> Result<bool, FieldErrors> {
        match &self.include_deleted {
            None => Ok(false),
            Some(raw) => parse_flag(raw).ok_or_else(|| {
                FieldErrors::single(
                    "include_deleted",
                    format!("The include deleted {}", FLAG_MESSAGE),
                )
            }),
        }
    }
}

//
// ──────────────────────────────────────────────────────────
// Responses
// ──────────────────────────────────────────────────────────
//

/// Public view of a user. Never carries the password hash or remember token.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    #[schema(example = 1)]
    pub id: i64,

    #[schema(example = "John Doe")]
    pub name: String,

    #[schema(example = "john@example.com")]
    pub email: String,

    pub email_verified_at: Option<DateTime<Utc>>,

    #[schema(example = "member")]
    pub role: String,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,

    pub deleted_at: Option<DateTime<Utc>>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            id: user.id,
            name: user.name,
            email: user.email,
            email_verified_at: user.email_verified_at,
            role: user.role.to_string(),
            created_at: user.created_at,
            updated_at: user.updated_at,
            deleted_at: user.lifecycle.deleted_at(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProfileResponse {
    pub phone: Option<String>,
    pub birth_date: Option<NaiveDate>,
    #[schema(example = "female")]
    pub gender: Option<String>,
    pub bio: Option<String>,
    pub website: Option<String>,
    pub address_line1: Option<String>,
    pub address_line2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    #[schema(example = "US")]
    pub country_code: Option<String>,
    #[schema(value_type = Object)]
    pub preferences: serde_json::Value,
    pub is_public: bool,
    pub marketing_consent: bool,
    #[schema(example = "UTC")]
    pub timezone: String,
    #[schema(example = "en")]
    pub locale: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserProfile> for ProfileResponse {
    fn from(p: UserProfile) -> Self {
        ProfileResponse {
            phone: p.phone,
            birth_date: p.birth_date,
            gender: p.gender.map(|g| g.as_str().to_string()),
            bio: p.bio,
            website: p.website,
            address_line1: p.address_line1,
            address_line2: p.address_line2,
            city: p.city,
            state: p.state,
            postal_code: p.postal_code,
            country_code: p.country_code,
            preferences: p.preferences,
            is_public: p.is_public,
            marketing_consent: p.marketing_consent,
            timezone: p.timezone,
            locale: p.locale,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PostResponse {
    pub id: i64,
    pub title: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Post> for PostResponse {
    fn from(p: Post) -> Self {
        PostResponse {
            id: p.id,
            title: p.title,
            body: p.body,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

/// A user with its profile (`null` when none exists yet) and posts.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserDetailsResponse {
    #[serde(flatten)]
    pub user: UserResponse,
    pub profile: Option<ProfileResponse>,
    pub posts: Vec<PostResponse>,
}

impl From<UserDetails> for UserDetailsResponse {
    fn from(details: UserDetails) -> Self {
        UserDetailsResponse {
            user: details.user.into(),
            profile: details.profile.map(Into::into),
            posts: details.posts.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PageLinks {
    pub first: String,
    pub last: String,
    pub prev: Option<String>,
    pub next: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PageMeta {
    pub current_page: u64,
    pub per_page: u64,
    pub total: u64,
    pub last_page: u64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserPageResponse {
    pub items: Vec<UserResponse>,
    pub links: PageLinks,
    pub meta: PageMeta,
}

impl UserPageResponse {
    /// Links keep every query parameter of the current request except `page`.
    pub fn new(result: PageResult<User>, path: &str, query_string: &str) -> Self {
        let last_page = result.last_page();
        let current = result.page;
        let url = |page: u64| page_url(path, query_string, page);

        UserPageResponse {
            links: PageLinks {
                first: url(1),
                last: url(last_page),
                prev: (current > 1).then(|| url(current - 1)),
                next: (current < last_page).then(|| url(current + 1)),
            },
            meta: PageMeta {
                current_page: current,
                per_page: result.per_page,
                total: result.total,
                last_page,
            },
            items: result.items.into_iter().map(UserResponse::from).collect(),
        }
    }
}

fn page_url(path: &str, query_string: &str, page: u64) -> String {
    let rest: Vec<&str> = query_string
        .split('&')
        .filter(|pair| !pair.is_empty() && !pair.starts_with("page="))
        .collect();

    if rest.is_empty() {
        format!("{}?page={}", path, page)
    } else {
        format!("{}?page={}&{}", path, page, rest.join("&"))
    }
}
