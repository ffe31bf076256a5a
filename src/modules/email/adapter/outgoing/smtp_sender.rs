use async_trait::async_trait;
use lettre::transport::smtp::authentication::Credentials;
use lettre::message::{header::ContentType, Mailbox};
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::email::application::ports::outgoing::email_sender::{EmailSendError, EmailSender};
use crate::shared::config::{parsed_or, required, ConfigError};

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: Message) -> Result<(), EmailSendError>;
}

#[async_trait]
impl Mailer for AsyncSmtpTransport<Tokio1Executor> {
    async fn send(&self, email: Message) -> Result<(), EmailSendError> {
        AsyncTransport::send(self, email)
            .await
            .map(|_resp| ())
            .map_err(|e| EmailSendError::Transport(e.to_string()))
    }
}

pub struct SmtpEmailSender {
    mailer: Box<dyn Mailer>,
    from_email: String,
}

impl SmtpEmailSender {
    pub fn new_with_mailer(mailer: Box<dyn Mailer>, from_email: &str) -> Self {
        Self {
            mailer,
            from_email: from_email.to_string(),
        }
    }

    /// Authenticated relay over TLS.
    pub fn new(
        smtp_server: &str,
        smtp_username: &str,
        smtp_password: &str,
        from_email: &str,
    ) -> Result<Self, ConfigError> {
        let creds = Credentials::new(smtp_username.to_string(), smtp_password.to_string());

        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(smtp_server)
            .map_err(|e| ConfigError::Invalid {
                key: "SMTP_SERVER",
                value: e.to_string(),
            })?
            .credentials(creds)
            .build();

        Ok(Self::new_with_mailer(Box::new(transport), from_email))
    }

    /// Plain SMTP without TLS or auth (Mailpit, MailHog).
    pub fn new_local(host: &str, port: u16, from_email: &str) -> Self {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host)
            .port(port)
            .build();

        Self::new_with_mailer(Box::new(transport), from_email)
    }

    /// Uses a local catcher when `SMTP_LOCAL=true`, a relay otherwise.
    pub fn from_env() -> Result<Self, ConfigError> {
        let from_email = required("EMAIL_FROM")?;

        if parsed_or::<bool>("SMTP_LOCAL", false)? {
            let host = std::env::var("SMTP_HOST").unwrap_or_else(|_| "localhost".to_string());
            let port = parsed_or::<u16>("SMTP_PORT", 1025)?;
            return Ok(Self::new_local(&host, port, &from_email));
        }

        let server = required("SMTP_SERVER")?;
        let username = required("SMTP_USERNAME")?;
        let password = required("SMTP_PASSWORD")?;

        Self::new(&server, &username, &password, &from_email)
    }
}

#[async_trait]
impl EmailSender for SmtpEmailSender {
    async fn send_email(&self, to: &str, subject: &str, body: &str) -> Result<(), EmailSendError> {
        let from: Mailbox = self
            .from_email
            .parse()
            .map_err(|e| EmailSendError::InvalidAddress(format!("from: {}", e)))?;
        let to: Mailbox = to
            .parse()
            .map_err(|e| EmailSendError::InvalidAddress(format!("to: {}", e)))?;

        let email = Message::builder()
            .from(from)
            .to(to)
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(body.to_string())
            .map_err(|e| EmailSendError::BuildFailed(e.to_string()))?;

        self.mailer.send(email).await
    }
}
