use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;

use crate::modules::user::application::domain::{
    Lifecycle, Post, User, UserDetails, UserProfile,
};
use crate::modules::user::application::ports::outgoing::user_query::{
    DeletedScope, PageRequest, PageResult, UserCriteria, UserQuery, UserQueryError,
};
use crate::modules::user::application::ports::outgoing::user_repository::{
    CreateUserData, PatchProfileData, PatchUserData, UserRepository, UserRepositoryError,
};
use crate::tests::support::fixtures::fixed_time;

#[derive(Default)]
struct Store {
    users: Vec<User>,
    profiles: HashMap<i64, UserProfile>,
    posts: Vec<Post>,
    failure: Option<String>,
}

/// Both sides of the user persistence ports over one shared in-memory
/// table. Clones share state.
#[derive(Clone, Default)]
pub struct InMemoryUsers {
    store: Arc<Mutex<Store>>,
}

fn visible(user: &User, scope: DeletedScope) -> bool {
    match scope {
        DeletedScope::Exclude => !user.is_deleted(),
        DeletedScope::Include => true,
        DeletedScope::Only => user.is_deleted(),
    }
}

impl InMemoryUsers {
    pub fn with_users(users: Vec<User>) -> Self {
        let this = Self::default();
        this.store.lock().unwrap().users = users;
        this
    }

    pub fn add_post(&self, post: Post) {
        self.store.lock().unwrap().posts.push(post);
    }

    pub fn add_profile(&self, profile: UserProfile) {
        self.store
            .lock()
            .unwrap()
            .profiles
            .insert(profile.user_id, profile);
    }

    /// Every following call fails with a database error.
    pub fn fail_with(&self, message: &str) {
        self.store.lock().unwrap().failure = Some(message.to_string());
    }

    pub fn user(&self, id: i64) -> Option<User> {
        self.store
            .lock()
            .unwrap()
            .users
            .iter()
            .find(|u| u.id == id)
            .cloned()
    }

    pub fn profile(&self, id: i64) -> Option<UserProfile> {
        self.store.lock().unwrap().profiles.get(&id).cloned()
    }

    fn check_query(&self) -> Result<(), UserQueryError> {
        match &self.store.lock().unwrap().failure {
            Some(msg) => Err(UserQueryError::DatabaseError(msg.clone())),
            None => Ok(()),
        }
    }

    fn check_repo(&self) -> Result<(), UserRepositoryError> {
        match &self.store.lock().unwrap().failure {
            Some(msg) => Err(UserRepositoryError::DatabaseError(msg.clone())),
            None => Ok(()),
        }
    }
}

fn email_taken(store: &Store, email: &str, except_id: Option<i64>) -> bool {
    store
        .users
        .iter()
        .any(|u| !u.is_deleted() && u.email == email && Some(u.id) != except_id)
}

fn apply_profile_patch(profile: &mut UserProfile, patch: PatchProfileData) {
    fn set<T>(target: &mut Option<T>, change: crate::shared::patch::PatchField<T>) {
        if let Some(value) = change.into_change() {
            *target = value;
        }
    }

    set(&mut profile.phone, patch.phone);
    set(&mut profile.birth_date, patch.birth_date);
    set(&mut profile.gender, patch.gender);
    set(&mut profile.bio, patch.bio);
    set(&mut profile.website, patch.website);
    set(&mut profile.address_line1, patch.address_line1);
    set(&mut profile.address_line2, patch.address_line2);
    set(&mut profile.city, patch.city);
    set(&mut profile.state, patch.state);
    set(&mut profile.postal_code, patch.postal_code);
    set(&mut profile.country_code, patch.country_code);

    if let Some(v) = patch.preferences {
        profile.preferences = v;
    }
    if let Some(v) = patch.is_public {
        profile.is_public = v;
    }
    if let Some(v) = patch.marketing_consent {
        profile.marketing_consent = v;
    }
    if let Some(v) = patch.timezone {
        profile.timezone = v;
    }
    if let Some(v) = patch.locale {
        profile.locale = v;
    }
}

fn empty_profile(user_id: i64) -> UserProfile {
    UserProfile {
        user_id,
        phone: None,
        birth_date: None,
        gender: None,
        bio: None,
        website: None,
        address_line1: None,
        address_line2: None,
        city: None,
        state: None,
        postal_code: None,
        country_code: None,
        preferences: serde_json::json!({}),
        is_public: true,
        marketing_consent: false,
        timezone: "UTC".to_string(),
        locale: "en".to_string(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

#[async_trait]
impl UserQuery for InMemoryUsers {
    async fn find_by_id(
        &self,
        id: i64,
        scope: DeletedScope,
    ) -> Result<Option<User>, UserQueryError> {
        self.check_query()?;
        Ok(self.user(id).filter(|u| visible(u, scope)))
    }

    async fn find_by_email(
        &self,
        email: &str,
        scope: DeletedScope,
    ) -> Result<Option<User>, UserQueryError> {
        self.check_query()?;
        let store = self.store.lock().unwrap();
        Ok(store
            .users
            .iter()
            .find(|u| u.email == email && visible(u, scope))
            .cloned())
    }

    async fn find_details(
        &self,
        id: i64,
        scope: DeletedScope,
    ) -> Result<Option<UserDetails>, UserQueryError> {
        self.check_query()?;
        let store = self.store.lock().unwrap();
        let Some(user) = store
            .users
            .iter()
            .find(|u| u.id == id && visible(u, scope))
            .cloned()
        else {
            return Ok(None);
        };

        Ok(Some(UserDetails {
            profile: store.profiles.get(&id).cloned(),
            posts: store
                .posts
                .iter()
                .filter(|p| p.user_id == id)
                .cloned()
                .collect(),
            user,
        }))
    }

    async fn list(
        &self,
        criteria: UserCriteria,
        page: PageRequest,
    ) -> Result<PageResult<User>, UserQueryError> {
        self.check_query()?;
        let store = self.store.lock().unwrap();

        let mut matching: Vec<User> = store
            .users
            .iter()
            .filter(|u| visible(u, criteria.deleted))
            .filter(|u| criteria.verified.is_none_or(|v| u.is_verified() == v))
            .filter(|u| {
                criteria.search.as_ref().is_none_or(|term| {
                    let term = term.to_lowercase();
                    u.name.to_lowercase().contains(&term) || u.email.to_lowercase().contains(&term)
                })
            })
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        let total = matching.len() as u64;
        let items = matching
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.per_page as usize)
            .collect();

        Ok(PageResult {
            items,
            page: page.page,
            per_page: page.per_page,
            total,
        })
    }

    async fn email_in_use(
        &self,
        email: &str,
        except_id: Option<i64>,
    ) -> Result<bool, UserQueryError> {
        self.check_query()?;
        Ok(email_taken(&self.store.lock().unwrap(), email, except_id))
    }
}

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn create_user(&self, data: CreateUserData) -> Result<User, UserRepositoryError> {
        self.check_repo()?;
        let mut store = self.store.lock().unwrap();

        if email_taken(&store, &data.email, None) {
            return Err(UserRepositoryError::EmailAlreadyExists);
        }

        let id = store.users.iter().map(|u| u.id).max().unwrap_or(0) + 1;
        let user = User {
            id,
            name: data.name,
            email: data.email,
            password_hash: data.password_hash,
            email_verified_at: None,
            remember_token: None,
            role: data.role,
            created_at: fixed_time(),
            updated_at: fixed_time(),
            lifecycle: Lifecycle::Active,
        };
        store.users.push(user.clone());

        Ok(user)
    }

    async fn patch_user(&self, id: i64, data: PatchUserData) -> Result<User, UserRepositoryError> {
        self.check_repo()?;
        let mut store = self.store.lock().unwrap();

        if let Some(email) = &data.email {
            if email_taken(&store, email, Some(id)) {
                return Err(UserRepositoryError::EmailAlreadyExists);
            }
        }

        let user = store
            .users
            .iter_mut()
            .find(|u| u.id == id && !u.is_deleted())
            .ok_or(UserRepositoryError::UserNotFound)?;

        if let Some(name) = data.name {
            user.name = name;
        }
        if let Some(email) = data.email {
            user.email = email;
        }
        if let Some(hash) = data.password_hash {
            user.password_hash = hash;
        }
        user.updated_at = Utc::now();
        let updated = user.clone();

        if let Some(patch) = data.profile.filter(|p| !p.is_empty()) {
            let profile = store
                .profiles
                .entry(id)
                .or_insert_with(|| empty_profile(id));
            apply_profile_patch(profile, patch);
        }

        Ok(updated)
    }

    async fn soft_delete_user(&self, id: i64) -> Result<(), UserRepositoryError> {
        self.check_repo()?;
        let mut store = self.store.lock().unwrap();
        let user = store
            .users
            .iter_mut()
            .find(|u| u.id == id && !u.is_deleted())
            .ok_or(UserRepositoryError::UserNotFound)?;

        user.lifecycle = Lifecycle::Deleted { at: Utc::now() };
        Ok(())
    }

    async fn restore_user(&self, id: i64) -> Result<User, UserRepositoryError> {
        self.check_repo()?;
        let mut store = self.store.lock().unwrap();
        let email = store
            .users
            .iter()
            .find(|u| u.id == id)
            .map(|u| u.email.clone())
            .ok_or(UserRepositoryError::UserNotFound)?;

        if email_taken(&store, &email, Some(id)) {
            return Err(UserRepositoryError::EmailAlreadyExists);
        }

        let user = store
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(UserRepositoryError::UserNotFound)?;

        user.lifecycle = Lifecycle::Active;
        Ok(user.clone())
    }

    async fn mark_email_verified(&self, id: i64) -> Result<User, UserRepositoryError> {
        self.check_repo()?;
        let mut store = self.store.lock().unwrap();
        let user = store
            .users
            .iter_mut()
            .find(|u| u.id == id && !u.is_deleted())
            .ok_or(UserRepositoryError::UserNotFound)?;

        if user.email_verified_at.is_none() {
            user.email_verified_at = Some(Utc::now());
        }
        Ok(user.clone())
    }
}
