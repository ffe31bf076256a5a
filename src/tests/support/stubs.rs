use async_trait::async_trait;

use crate::auth::application::use_cases::{
    LoginError, LoginOutput, LoginRequest, LoginUserUseCase,
};

/// Login use case with a canned outcome.
#[derive(Clone)]
pub struct StubLoginUserUseCase {
    result: Result<LoginOutput, LoginError>,
}

impl StubLoginUserUseCase {
    pub fn failure(error: LoginError) -> Self {
        Self { result: Err(error) }
    }
}

#[async_trait]
impl LoginUserUseCase for StubLoginUserUseCase {
    async fn execute(&self, _request: LoginRequest) -> Result<LoginOutput, LoginError> {
        self.result.clone()
    }
}
