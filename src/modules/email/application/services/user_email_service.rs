use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use tracing::info;

use crate::auth::application::ports::outgoing::TokenProvider;
use crate::email::application::ports::outgoing::email_sender::EmailSender;
use crate::email::application::ports::outgoing::user_email_notifier::{
    UserEmailNotificationError, UserEmailNotifier,
};
use crate::modules::user::application::domain::User;

/// Sends account emails that carry a signed link back into the API.
#[derive(Clone)]
pub struct UserEmailService {
    token_provider: Arc<dyn TokenProvider + Send + Sync>,
    sender: Arc<dyn EmailSender + Send + Sync>,
    app_url: String,
}

impl fmt::Debug for UserEmailService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserEmailService")
            .field("sender", &"<dyn EmailSender>")
            .field("app_url", &self.app_url)
            .finish()
    }
}

impl UserEmailService {
    pub fn new(
        token_provider: Arc<dyn TokenProvider + Send + Sync>,
        sender: Arc<dyn EmailSender + Send + Sync>,
        app_url: impl Into<String>,
    ) -> Self {
        Self {
            token_provider,
            sender,
            app_url: app_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn verification_link(&self, token: &str) -> String {
        format!("{}/api/auth/email-verification/{}", self.app_url, token)
    }
}

#[async_trait]
impl UserEmailNotifier for UserEmailService {
    async fn send_verification_email(&self, user: User) -> Result<(), UserEmailNotificationError> {
        let token = self
            .token_provider
            .generate_verification_token(user.id)
            .map_err(|e| UserEmailNotificationError::TokenGenerationFailed(e.to_string()))?;

        let link = self.verification_link(&token);
        let body = format!(
            "<p>Hello {},</p>\
             <p>Please confirm your email address by following this link:</p>\
             <p><a href=\"{link}\">{link}</a></p>",
            user.name,
            link = link
        );

        self.sender
            .send_email(&user.email, "Verify your email address", &body)
            .await
            .map_err(|e| UserEmailNotificationError::EmailSendingFailed(e.to_string()))?;

        info!(user_id = user.id, "Verification email sent");
        Ok(())
    }
}
