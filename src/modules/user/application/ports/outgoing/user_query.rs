// src/modules/user/application/ports/outgoing/user_query.rs

use async_trait::async_trait;
use serde::Deserialize;

use crate::modules::user::application::domain::{User, UserDetails};

//
// ──────────────────────────────────────────────────────────
// Criteria
// ──────────────────────────────────────────────────────────
//

/// Which rows a read may see with respect to soft deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeletedScope {
    #[default]
    Exclude,
    Include,
    Only,
}

/// Filters for listing users. Built through the named constructors and
/// combined with the `and_*` methods.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserCriteria {
    pub verified: Option<bool>,
    pub search: Option<String>,
    pub deleted: DeletedScope,
}

impl UserCriteria {
    pub fn all() -> Self {
        Self::default()
    }

    /// `true` keeps users with a verification timestamp, `false` those without.
    pub fn verified(verified: bool) -> Self {
        Self::all().and_verified(verified)
    }

    /// Case-insensitive substring match on name or email.
    pub fn search_by_name_or_email(term: &str) -> Self {
        Self::all().and_search(term)
    }

    pub fn and_verified(mut self, verified: bool) -> Self {
        self.verified = Some(verified);
        self
    }

    /// Blank terms are ignored.
    pub fn and_search(mut self, term: &str) -> Self {
        let term = term.trim();
        self.search = (!term.is_empty()).then(|| term.to_string());
        self
    }

    pub fn with_deleted(mut self, scope: DeletedScope) -> Self {
        self.deleted = scope;
        self
    }
}

pub const DEFAULT_PER_PAGE: u64 = 15;
pub const MAX_PER_PAGE: u64 = 100;
/// Highest page whose offset still fits a signed 64-bit `OFFSET`.
pub const MAX_PAGE: u64 = i64::MAX as u64 / MAX_PER_PAGE + 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub per_page: u64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl PageRequest {
    /// Missing values take defaults; `page` is clamped to `1..=MAX_PAGE`
    /// and `per_page` to `1..=MAX_PER_PAGE`.
    pub fn new(page: Option<u64>, per_page: Option<u64>) -> Self {
        Self {
            page: page.unwrap_or(1).clamp(1, MAX_PAGE),
            per_page: per_page
                .unwrap_or(DEFAULT_PER_PAGE)
                .clamp(1, MAX_PER_PAGE),
        }
    }

    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.per_page)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageResult<T> {
    pub items: Vec<T>,
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
}

impl<T> PageResult<T> {
    /// Always at least 1, even for an empty result.
    pub fn last_page(&self) -> u64 {
        if self.total == 0 || self.per_page == 0 {
            1
        } else {
            self.total.div_ceil(self.per_page)
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PageResult<U> {
        PageResult {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            per_page: self.per_page,
            total: self.total,
        }
    }
}

//
// ──────────────────────────────────────────────────────────
// Errors
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum UserQueryError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Corrupt row: {0}")]
    CorruptRow(String),
}

//
// ──────────────────────────────────────────────────────────
// Port (read side)
// ──────────────────────────────────────────────────────────
//

#[async_trait]
pub trait UserQuery: Send + Sync {
    async fn find_by_id(&self, id: i64, scope: DeletedScope)
        -> Result<Option<User>, UserQueryError>;

    /// `email` is expected to be normalized already.
    async fn find_by_email(
        &self,
        email: &str,
        scope: DeletedScope,
    ) -> Result<Option<User>, UserQueryError>;

    /// User with profile and posts.
    async fn find_details(
        &self,
        id: i64,
        scope: DeletedScope,
    ) -> Result<Option<UserDetails>, UserQueryError>;

    /// Newest first.
    async fn list(
        &self,
        criteria: UserCriteria,
        page: PageRequest,
    ) -> Result<PageResult<User>, UserQueryError>;

    /// Whether an active user other than `except_id` holds `email`.
    async fn email_in_use(
        &self,
        email: &str,
        except_id: Option<i64>,
    ) -> Result<bool, UserQueryError>;
}
