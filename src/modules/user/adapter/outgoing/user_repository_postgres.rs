// src/modules/user/adapter/outgoing/user_repository_postgres.rs

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::entity::prelude::DateTimeWithTimeZone;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, QueryFilter, Set, TransactionTrait,
};
use std::sync::Arc;
use tracing::error;

use super::mapper::user_from_model;
use super::sea_orm_entity::user_profiles;
use super::sea_orm_entity::users::{self, ActiveModel, Column, Entity};
use crate::modules::user::application::domain::User;
use crate::modules::user::application::ports::outgoing::user_repository::{
    CreateUserData, PatchProfileData, PatchUserData, UserRepository, UserRepositoryError,
};
use crate::shared::patch::PatchField;

#[derive(Clone, Debug)]
pub struct UserRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl UserRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    fn map_db_err(e: DbErr) -> UserRepositoryError {
        UserRepositoryError::DatabaseError(e.to_string())
    }

    /// The partial unique index on active emails is the only unique
    /// constraint a write here can trip.
    fn map_write_err(e: DbErr) -> UserRepositoryError {
        let msg = e.to_string().to_lowercase();
        let unique = msg.contains("duplicate") || msg.contains("unique") || msg.contains("23505");

        if unique && msg.contains("email") {
            UserRepositoryError::EmailAlreadyExists
        } else {
            Self::map_db_err(e)
        }
    }

    fn to_user(model: users::Model) -> Result<User, UserRepositoryError> {
        user_from_model(model).map_err(|e| {
            error!(error = %e, "Corrupt user row");
            UserRepositoryError::DatabaseError(e.to_string())
        })
    }

    /// Updates the active row matching `id` and returns it, if any.
    async fn update_active<C>(
        conn: &C,
        id: i64,
        changes: ActiveModel,
    ) -> Result<Option<users::Model>, UserRepositoryError>
    where
        C: ConnectionTrait,
    {
        let rows = Entity::update_many()
            .set(changes)
            .filter(Column::Id.eq(id))
            .filter(Column::DeletedAt.is_null())
            .exec_with_returning(conn)
            .await
            .map_err(Self::map_write_err)?;

        Ok(rows.into_iter().next())
    }

    async fn upsert_profile<C>(
        conn: &C,
        user_id: i64,
        patch: PatchProfileData,
    ) -> Result<(), UserRepositoryError>
    where
        C: ConnectionTrait,
    {
        let now: DateTimeWithTimeZone = Utc::now().into();

        let existing = user_profiles::Entity::find_by_id(user_id)
            .one(conn)
            .await
            .map_err(Self::map_db_err)?;

        match existing {
            Some(model) => {
                let mut active: user_profiles::ActiveModel = model.into();
                apply_profile_patch(&mut active, patch);
                active.updated_at = Set(now);
                active.update(conn).await.map_err(Self::map_db_err)?;
            }
            None => {
                let mut active = user_profiles::ActiveModel {
                    user_id: Set(user_id),
                    preferences: Set(serde_json::json!({})),
                    is_public: Set(true),
                    marketing_consent: Set(false),
                    timezone: Set("UTC".to_string()),
                    locale: Set("en".to_string()),
                    created_at: Set(now),
                    updated_at: Set(now),
                    ..Default::default()
                };
                apply_profile_patch(&mut active, patch);
                active.insert(conn).await.map_err(Self::map_db_err)?;
            }
        }

        Ok(())
    }
}

fn set_nullable<V>(target: &mut ActiveValue<Option<V>>, change: PatchField<V>)
where
    Option<V>: Into<sea_orm::Value>,
{
    if let Some(value) = change.into_change() {
        *target = Set(value);
    }
}

fn apply_profile_patch(active: &mut user_profiles::ActiveModel, patch: PatchProfileData) {
    set_nullable(&mut active.phone, patch.phone);
    set_nullable(&mut active.birth_date, patch.birth_date);
    set_nullable(
        &mut active.gender,
        patch.gender.map(|g| g.as_str().to_string()),
    );
    set_nullable(&mut active.bio, patch.bio);
    set_nullable(&mut active.website, patch.website);
    set_nullable(&mut active.address_line1, patch.address_line1);
    set_nullable(&mut active.address_line2, patch.address_line2);
    set_nullable(&mut active.city, patch.city);
    set_nullable(&mut active.state, patch.state);
    set_nullable(&mut active.postal_code, patch.postal_code);
    set_nullable(&mut active.country_code, patch.country_code);

    if let Some(v) = patch.preferences {
        active.preferences = Set(v);
    }
    if let Some(v) = patch.is_public {
        active.is_public = Set(v);
    }
    if let Some(v) = patch.marketing_consent {
        active.marketing_consent = Set(v);
    }
    if let Some(v) = patch.timezone {
        active.timezone = Set(v);
    }
    if let Some(v) = patch.locale {
        active.locale = Set(v);
    }
}

#[async_trait]
impl UserRepository for UserRepositoryPostgres {
    async fn create_user(&self, data: CreateUserData) -> Result<User, UserRepositoryError> {
        let now: DateTimeWithTimeZone = Utc::now().into();

        let model = ActiveModel {
            name: Set(data.name),
            email: Set(data.email),
            password_hash: Set(data.password_hash),
            email_verified_at: Set(None),
            remember_token: Set(None),
            role: Set(data.role.as_str().to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
            ..Default::default()
        };

        let inserted = model
            .insert(&*self.db)
            .await
            .map_err(Self::map_write_err)?;

        Self::to_user(inserted)
    }

    async fn patch_user(&self, id: i64, data: PatchUserData) -> Result<User, UserRepositoryError> {
        let txn = self.db.begin().await.map_err(Self::map_db_err)?;

        let mut changes = <ActiveModel as Default>::default();
        if let Some(name) = data.name {
            changes.name = Set(name);
        }
        if let Some(email) = data.email {
            changes.email = Set(email);
        }
        if let Some(hash) = data.password_hash {
            changes.password_hash = Set(hash);
        }
        changes.updated_at = Set(Utc::now().into());

        // Dropping `txn` on an early return rolls it back.
        let updated = Self::update_active(&txn, id, changes)
            .await?
            .ok_or(UserRepositoryError::UserNotFound)?;

        if let Some(profile) = data.profile.filter(|p| !p.is_empty()) {
            Self::upsert_profile(&txn, id, profile).await?;
        }

        txn.commit().await.map_err(Self::map_db_err)?;

        Self::to_user(updated)
    }

    async fn soft_delete_user(&self, id: i64) -> Result<(), UserRepositoryError> {
        let now: DateTimeWithTimeZone = Utc::now().into();

        let mut changes = <ActiveModel as Default>::default();
        changes.deleted_at = Set(Some(now));
        changes.updated_at = Set(now);

        let result = Entity::update_many()
            .set(changes)
            .filter(Column::Id.eq(id))
            .filter(Column::DeletedAt.is_null())
            .exec(&*self.db)
            .await
            .map_err(Self::map_db_err)?;

        if result.rows_affected == 0 {
            return Err(UserRepositoryError::UserNotFound);
        }

        Ok(())
    }

    async fn restore_user(&self, id: i64) -> Result<User, UserRepositoryError> {
        let model = Entity::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(Self::map_db_err)?
            .ok_or(UserRepositoryError::UserNotFound)?;

        if model.deleted_at.is_none() {
            return Self::to_user(model);
        }

        let mut changes = <ActiveModel as Default>::default();
        changes.deleted_at = Set(None);
        changes.updated_at = Set(Utc::now().into());

        let restored = Entity::update_many()
            .set(changes)
            .filter(Column::Id.eq(id))
            .exec_with_returning(&*self.db)
            .await
            .map_err(Self::map_write_err)?
            .into_iter()
            .next()
            .ok_or(UserRepositoryError::UserNotFound)?;

        Self::to_user(restored)
    }

    async fn mark_email_verified(&self, id: i64) -> Result<User, UserRepositoryError> {
        let model = Entity::find_by_id(id)
            .filter(Column::DeletedAt.is_null())
            .one(&*self.db)
            .await
            .map_err(Self::map_db_err)?
            .ok_or(UserRepositoryError::UserNotFound)?;

        if model.email_verified_at.is_some() {
            return Self::to_user(model);
        }

        let now: DateTimeWithTimeZone = Utc::now().into();
        let mut changes = <ActiveModel as Default>::default();
        changes.email_verified_at = Set(Some(now));
        changes.updated_at = Set(now);

        let verified = Self::update_active(&*self.db, id, changes)
            .await?
            .ok_or(UserRepositoryError::UserNotFound)?;

        Self::to_user(verified)
    }
}
