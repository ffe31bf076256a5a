use std::sync::Arc;

use crate::auth::application::ports::outgoing::{PasswordHasher, TokenProvider};
use crate::email::application::ports::outgoing::UserEmailNotifier;
use crate::modules::user::application::ports::incoming::use_cases::{
    CreateUserUseCase, DeleteUserUseCase, GetUserUseCase, ListUsersUseCase, RestoreUserUseCase,
    UpdateUserUseCase, VerifyEmailUseCase,
};
use crate::modules::user::application::ports::outgoing::{UserQuery, UserRepository};
use crate::modules::user::application::service::{
    CreateUserService, DeleteUserService, GetUserService, ListUsersService, RestoreUserService,
    UpdateUserService, VerifyEmailService,
};

#[derive(Clone)]
pub struct UserUseCases {
    pub list: Arc<dyn ListUsersUseCase + Send + Sync>,
    pub create: Arc<dyn CreateUserUseCase + Send + Sync>,
    pub get: Arc<dyn GetUserUseCase + Send + Sync>,
    pub update: Arc<dyn UpdateUserUseCase + Send + Sync>,
    pub delete: Arc<dyn DeleteUserUseCase + Send + Sync>,
    pub restore: Arc<dyn RestoreUserUseCase + Send + Sync>,
    pub verify_email: Arc<dyn VerifyEmailUseCase + Send + Sync>,
}

impl UserUseCases {
    /// Wires every user service over one read side and one write side.
    pub fn new<Q, R>(
        query: Q,
        repository: R,
        password_hasher: Arc<dyn PasswordHasher + Send + Sync>,
        email_notifier: Arc<dyn UserEmailNotifier + Send + Sync>,
        token_provider: Arc<dyn TokenProvider + Send + Sync>,
    ) -> Self
    where
        Q: UserQuery + Clone + 'static,
        R: UserRepository + Clone + 'static,
    {
        Self {
            list: Arc::new(ListUsersService::new(query.clone())),
            create: Arc::new(CreateUserService::new(
                query.clone(),
                repository.clone(),
                Arc::clone(&password_hasher),
                email_notifier,
            )),
            get: Arc::new(GetUserService::new(query.clone())),
            update: Arc::new(UpdateUserService::new(
                query,
                repository.clone(),
                password_hasher,
            )),
            delete: Arc::new(DeleteUserService::new(repository.clone())),
            restore: Arc::new(RestoreUserService::new(repository.clone())),
            verify_email: Arc::new(VerifyEmailService::new(repository, token_provider)),
        }
    }
}
