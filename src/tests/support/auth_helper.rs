use std::sync::Arc;

use crate::auth::adapter::outgoing::jwt::{JwtConfig, JwtTokenService};
use crate::auth::application::domain::Role;
use crate::auth::application::ports::outgoing::TokenProvider;

pub const TEST_JWT_SECRET: &str = "test_secret_key_for_testing_only_0123456789";

pub fn create_test_jwt_service() -> JwtTokenService {
    JwtTokenService::new(JwtConfig {
        secret_key: TEST_JWT_SECRET.to_string(),
        issuer: "users_api_test".to_string(),
        access_token_expiry: 3600,
        verification_token_expiry: 86400,
    })
}

pub fn test_token_provider() -> Arc<dyn TokenProvider + Send + Sync> {
    Arc::new(create_test_jwt_service())
}

/// `Authorization` header value for a user with the given role.
pub fn bearer_for(user_id: i64, role: Role) -> String {
    let token = create_test_jwt_service()
        .generate_access_token(user_id, role)
        .expect("token generation should succeed");
    format!("Bearer {}", token)
}
