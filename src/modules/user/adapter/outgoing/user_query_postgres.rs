// src/modules/user/adapter/outgoing/user_query_postgres.rs

use async_trait::async_trait;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::{
    sea_query::Expr, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    ModelTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select,
};
use std::sync::Arc;

use super::mapper::{post_from_model, profile_from_model, user_from_model, CorruptRow};
use super::sea_orm_entity::users::{self, Column, Entity};
use super::sea_orm_entity::{posts, user_profiles};
use crate::modules::user::application::domain::{User, UserDetails};
use crate::modules::user::application::ports::outgoing::user_query::{
    DeletedScope, PageRequest, PageResult, UserCriteria, UserQuery, UserQueryError,
};

// ============================================================================
// Query Implementation
// ============================================================================

#[derive(Clone, Debug)]
pub struct UserQueryPostgres {
    db: Arc<DatabaseConnection>,
}

impl UserQueryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserQuery for UserQueryPostgres {
    async fn find_by_id(
        &self,
        id: i64,
        scope: DeletedScope,
    ) -> Result<Option<User>, UserQueryError> {
        let model = scoped(Entity::find_by_id(id), scope)
            .one(&*self.db)
            .await
            .map_err(map_db_err)?;

        model.map(to_user).transpose()
    }

    async fn find_by_email(
        &self,
        email: &str,
        scope: DeletedScope,
    ) -> Result<Option<User>, UserQueryError> {
        let model = scoped(Entity::find(), scope)
            .filter(Column::Email.eq(email))
            .one(&*self.db)
            .await
            .map_err(map_db_err)?;

        model.map(to_user).transpose()
    }

    async fn find_details(
        &self,
        id: i64,
        scope: DeletedScope,
    ) -> Result<Option<UserDetails>, UserQueryError> {
        let Some(model) = scoped(Entity::find_by_id(id), scope)
            .one(&*self.db)
            .await
            .map_err(map_db_err)?
        else {
            return Ok(None);
        };

        let profile = model
            .find_related(user_profiles::Entity)
            .one(&*self.db)
            .await
            .map_err(map_db_err)?
            .map(profile_from_model)
            .transpose()
            .map_err(map_corrupt)?;

        let posts = model
            .find_related(posts::Entity)
            .order_by_desc(posts::Column::CreatedAt)
            .order_by_desc(posts::Column::Id)
            .all(&*self.db)
            .await
            .map_err(map_db_err)?
            .into_iter()
            .map(post_from_model)
            .collect();

        Ok(Some(UserDetails {
            user: to_user(model)?,
            profile,
            posts,
        }))
    }

    async fn list(
        &self,
        criteria: UserCriteria,
        page: PageRequest,
    ) -> Result<PageResult<User>, UserQueryError> {
        let mut query = scoped(Entity::find(), criteria.deleted);

        if let Some(verified) = criteria.verified {
            query = if verified {
                query.filter(Column::EmailVerifiedAt.is_not_null())
            } else {
                query.filter(Column::EmailVerifiedAt.is_null())
            };
        }

        if let Some(ref term) = criteria.search {
            let pattern = format!("%{}%", escape_like(term));
            query = query.filter(
                Condition::any()
                    .add(Expr::col(Column::Name).ilike(&pattern))
                    .add(Expr::col(Column::Email).ilike(&pattern)),
            );
        }

        query = query
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id);

        let total = query.clone().count(&*self.db).await.map_err(map_db_err)?;

        let models = query
            .offset(page.offset())
            .limit(page.per_page)
            .all(&*self.db)
            .await
            .map_err(map_db_err)?;

        let items = models
            .into_iter()
            .map(to_user)
            .collect::<Result<Vec<_>, _>>()?;

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
        let mut query = scoped(Entity::find(), DeletedScope::Exclude).filter(Column::Email.eq(email));

        if let Some(id) = except_id {
            query = query.filter(Column::Id.ne(id));
        }

        let count = query.count(&*self.db).await.map_err(map_db_err)?;

        Ok(count > 0)
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

fn scoped(query: Select<Entity>, scope: DeletedScope) -> Select<Entity> {
    match scope {
        DeletedScope::Exclude => query.filter(Column::DeletedAt.is_null()),
        DeletedScope::Include => query,
        DeletedScope::Only => query.filter(Column::DeletedAt.is_not_null()),
    }
}

/// Escapes `LIKE` metacharacters so the term matches literally.
fn escape_like(term: &str) -> String {
    term.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

fn to_user(model: users::Model) -> Result<User, UserQueryError> {
    user_from_model(model).map_err(map_corrupt)
}

fn map_corrupt(e: CorruptRow) -> UserQueryError {
    UserQueryError::CorruptRow(e.0)
}

fn map_db_err(e: DbErr) -> UserQueryError {
    UserQueryError::DatabaseError(e.to_string())
}

// ============================================================================
// Tests
// ============================================================================
