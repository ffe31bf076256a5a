use std::sync::Arc;

use actix_web::web;

use crate::auth::application::use_cases::{LoginUserService, LoginUserUseCase};
use crate::modules::user::application::user_use_cases::UserUseCases;
use crate::tests::support::auth_helper::test_token_provider;
use crate::tests::support::doubles::{RecordingEmailNotifier, StubPasswordHasher};
use crate::tests::support::in_memory_users::InMemoryUsers;
use crate::AppState;

/// Real services over an in-memory store, with doubles at the edges.
/// Individual pieces can be swapped before `build`.
#[derive(Default)]
pub struct TestAppStateBuilder {
    store: InMemoryUsers,
    password_hasher: StubPasswordHasher,
    email_notifier: RecordingEmailNotifier,
    login_user: Option<Arc<dyn LoginUserUseCase + Send + Sync>>,
}

impl TestAppStateBuilder {
    pub fn with_users(mut self, store: InMemoryUsers) -> Self {
        self.store = store;
        self
    }

    pub fn with_password_hasher(mut self, hasher: StubPasswordHasher) -> Self {
        self.password_hasher = hasher;
        self
    }

    pub fn with_email_notifier(mut self, notifier: RecordingEmailNotifier) -> Self {
        self.email_notifier = notifier;
        self
    }

    pub fn with_login_user(mut self, uc: impl LoginUserUseCase + 'static) -> Self {
        self.login_user = Some(Arc::new(uc));
        self
    }

    pub fn build(self) -> web::Data<AppState> {
        let password_hasher = Arc::new(self.password_hasher);

        let login_user_use_case = self.login_user.unwrap_or_else(|| {
            Arc::new(LoginUserService::new(
                self.store.clone(),
                password_hasher.clone(),
                test_token_provider(),
            ))
        });

        web::Data::new(AppState {
            user: UserUseCases::new(
                self.store.clone(),
                self.store,
                password_hasher,
                Arc::new(self.email_notifier),
                test_token_provider(),
            ),
            login_user_use_case,
        })
    }
}
