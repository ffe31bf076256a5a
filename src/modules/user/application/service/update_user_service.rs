use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

use crate::auth::application::ports::outgoing::PasswordHasher;
use crate::modules::user::application::domain::UserDetails;
use crate::modules::user::application::ports::incoming::use_cases::{
    UpdateUserError, UpdateUserInput, UpdateUserUseCase,
};
use crate::modules::user::application::ports::outgoing::{
    DeletedScope, PatchUserData, UserQuery, UserRepository, UserRepositoryError,
};
use crate::modules::user::application::validation::{
    check_email, check_name, check_password, check_profile, EMAIL_TAKEN,
};
use crate::shared::validation::FieldErrors;

pub struct UpdateUserService<Q, R>
where
    Q: UserQuery,
    R: UserRepository,
{
    query: Q,
    repository: R,
    password_hasher: Arc<dyn PasswordHasher + Send + Sync>,
}

impl<Q, R> UpdateUserService<Q, R>
where
    Q: UserQuery,
    R: UserRepository,
{
    pub fn new(
        query: Q,
        repository: R,
        password_hasher: Arc<dyn PasswordHasher + Send + Sync>,
    ) -> Self {
        Self {
            query,
            repository,
            password_hasher,
        }
    }
}

fn query_failed(e: impl ToString) -> UpdateUserError {
    UpdateUserError::RepositoryError(e.to_string())
}

#[async_trait]
impl<Q, R> UpdateUserUseCase for UpdateUserService<Q, R>
where
    Q: UserQuery + Send + Sync,
    R: UserRepository + Send + Sync,
{
    async fn execute(
        &self,
        id: i64,
        input: UpdateUserInput,
    ) -> Result<UserDetails, UpdateUserError> {
        let existing = self
            .query
            .find_by_id(id, DeletedScope::Exclude)
            .await
            .map_err(query_failed)?
            .ok_or(UpdateUserError::NotFound)?;

        let mut errors = FieldErrors::default();
        let mut patch = PatchUserData::default();

        if input.name.is_some() {
            patch.name = check_name(&mut errors, input.name.as_deref());
        }

        if input.email.is_some() {
            // Uniqueness only matters when the address actually changes.
            if let Some(email) = check_email(&mut errors, input.email.as_deref()) {
                if email != existing.email {
                    let taken = self
                        .query
                        .email_in_use(&email, Some(id))
                        .await
                        .map_err(query_failed)?;
                    if taken {
                        errors.add("email", EMAIL_TAKEN);
                    } else {
                        patch.email = Some(email);
                    }
                }
            }
        }

        let mut new_password = None;
        if input.password.is_some() || input.password_confirmation.is_some() {
            new_password = check_password(
                &mut errors,
                input.password.as_deref(),
                input.password_confirmation.as_deref(),
            );
        }

        if let Some(profile) = input.profile {
            patch.profile = Some(check_profile(&mut errors, profile));
        }

        errors.into_result().map_err(UpdateUserError::Validation)?;

        if let Some(password) = new_password {
            let hash = self
                .password_hasher
                .hash_password(&password)
                .await
                .map_err(|e| UpdateUserError::HashingFailed(e.to_string()))?;
            patch.password_hash = Some(hash);
        }

        if !patch.is_empty() {
            self.repository
                .patch_user(id, patch)
                .await
                .map_err(|e| match e {
                    UserRepositoryError::UserNotFound => UpdateUserError::NotFound,
                    UserRepositoryError::EmailAlreadyExists => {
                        UpdateUserError::Validation(FieldErrors::single("email", EMAIL_TAKEN))
                    }
                    other => query_failed(other),
                })?;

            info!(user_id = id, "User updated");
        }

        self.query
            .find_details(id, DeletedScope::Exclude)
            .await
            .map_err(query_failed)?
            .ok_or(UpdateUserError::NotFound)
    }
}
