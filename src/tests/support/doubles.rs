use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::auth::application::ports::outgoing::password_hasher::{HashError, PasswordHasher};
use crate::email::application::ports::outgoing::user_email_notifier::{
    UserEmailNotificationError, UserEmailNotifier,
};
use crate::modules::user::application::domain::User;

/// Reversible "hash" so tests can assert on what was stored.
#[derive(Clone, Default)]
pub struct StubPasswordHasher {
    fail: bool,
}

impl StubPasswordHasher {
    pub fn failing() -> Self {
        Self { fail: true }
    }
}

#[async_trait]
impl PasswordHasher for StubPasswordHasher {
    async fn hash_password(&self, password: &str) -> Result<String, HashError> {
        if self.fail {
            return Err(HashError::HashFailed);
        }
        Ok(format!("hashed:{}", password))
    }

    async fn verify_password(&self, password: &str, hash: &str) -> Result<bool, HashError> {
        if self.fail {
            return Err(HashError::VerifyFailed);
        }
        Ok(hash == format!("hashed:{}", password))
    }
}

#[derive(Clone, Default)]
pub struct RecordingEmailNotifier {
    sent: Arc<Mutex<Vec<i64>>>,
    fail: bool,
}

impl RecordingEmailNotifier {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Ids of users a verification email was requested for.
    pub fn sent_to(&self) -> Vec<i64> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl UserEmailNotifier for RecordingEmailNotifier {
    async fn send_verification_email(&self, user: User) -> Result<(), UserEmailNotificationError> {
        self.sent.lock().unwrap().push(user.id);
        if self.fail {
            return Err(UserEmailNotificationError::EmailSendingFailed(
                "smtp down".to_string(),
            ));
        }
        Ok(())
    }
}
