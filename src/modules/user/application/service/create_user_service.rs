use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

use crate::auth::application::domain::Role;
use crate::auth::application::ports::outgoing::PasswordHasher;
use crate::email::application::ports::outgoing::UserEmailNotifier;
use crate::modules::user::application::domain::User;
use crate::modules::user::application::ports::incoming::use_cases::{
    CreateUserError, CreateUserInput, CreateUserUseCase,
};
use crate::modules::user::application::ports::outgoing::{
    CreateUserData, UserQuery, UserRepository, UserRepositoryError,
};
use crate::modules::user::application::validation::{
    check_email, check_name, check_password, EMAIL_TAKEN,
};
use crate::shared::validation::FieldErrors;

//
// ──────────────────────────────────────────────────────────
// Service
// ──────────────────────────────────────────────────────────
//

pub struct CreateUserService<Q, R>
where
    Q: UserQuery,
    R: UserRepository,
{
    query: Q,
    repository: R,
    password_hasher: Arc<dyn PasswordHasher + Send + Sync>,
    email_notifier: Arc<dyn UserEmailNotifier + Send + Sync>,
}

impl<Q, R> CreateUserService<Q, R>
where
    Q: UserQuery,
    R: UserRepository,
{
    pub fn new(
        query: Q,
        repository: R,
        password_hasher: Arc<dyn PasswordHasher + Send + Sync>,
        email_notifier: Arc<dyn UserEmailNotifier + Send + Sync>,
    ) -> Self {
        Self {
            query,
            repository,
            password_hasher,
            email_notifier,
        }
    }

    /// Detached: the caller never waits for, or hears about, delivery.
    fn dispatch_verification_email(&self, user: User) {
        let notifier = Arc::clone(&self.email_notifier);

        tokio::spawn(async move {
            let user_id = user.id;
            if let Err(e) = notifier.send_verification_email(user).await {
                warn!(user_id, error = %e, "Failed to send verification email");
            }
        });
    }
}

#[async_trait]
impl<Q, R> CreateUserUseCase for CreateUserService<Q, R>
where
    Q: UserQuery + Send + Sync,
    R: UserRepository + Send + Sync,
{
    async fn execute(&self, input: CreateUserInput) -> Result<User, CreateUserError> {
        let mut errors = FieldErrors::default();

        let name = check_name(&mut errors, input.name.as_deref());
        let email = check_email(&mut errors, input.email.as_deref());
        let password = check_password(
            &mut errors,
            input.password.as_deref(),
            input.password_confirmation.as_deref(),
        );

        if let Some(email) = &email {
            let taken = self
                .query
                .email_in_use(email, None)
                .await
                .map_err(|e| CreateUserError::RepositoryError(e.to_string()))?;
            if taken {
                errors.add("email", EMAIL_TAKEN);
            }
        }

        let (Some(name), Some(email), Some(password)) = (name, email, password) else {
            return Err(CreateUserError::Validation(errors));
        };
        errors.into_result().map_err(CreateUserError::Validation)?;

        let password_hash = self
            .password_hasher
            .hash_password(&password)
            .await
            .map_err(|e| CreateUserError::HashingFailed(e.to_string()))?;

        let user = self
            .repository
            .create_user(CreateUserData {
                name,
                email,
                password_hash,
                role: Role::Member,
            })
            .await
            .map_err(|e| match e {
                // Lost a race with a concurrent registration.
                UserRepositoryError::EmailAlreadyExists => {
                    CreateUserError::Validation(FieldErrors::single("email", EMAIL_TAKEN))
                }
                other => CreateUserError::RepositoryError(other.to_string()),
            })?;

        info!(user_id = user.id, "User created");

        self.dispatch_verification_email(user.clone());

        Ok(user)
    }
}
