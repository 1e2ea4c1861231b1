//! Email delivery for contact messages using lettre

use folio_contact::{DeliveryError, MessageSender, Payload};
use lettre::{
    Address, Message, SmtpTransport, Transport,
    message::{Mailbox, header},
    transport::smtp::authentication::Credentials,
};
use serde::Deserialize;

const CONTACT_SUBJECT: &str = "New message from contact page";

#[derive(Debug, Deserialize, Clone)]
pub struct EmailConfig {
    #[serde(default = "default_smtp_host")]
    pub smtp_host: String,
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    #[serde(default)]
    pub smtp_username: String,
    #[serde(default)]
    pub smtp_password: String,
    #[serde(default = "default_from_address")]
    pub from_address: String,
    /// Build messages but never open an SMTP connection.
    #[serde(default)]
    pub dry_run: bool,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            smtp_host: default_smtp_host(),
            smtp_port: default_smtp_port(),
            smtp_username: String::new(),
            smtp_password: String::new(),
            from_address: default_from_address(),
            dry_run: false,
        }
    }
}

fn default_smtp_host() -> String {
    "localhost".to_string()
}

fn default_smtp_port() -> u16 {
    1025
}

fn default_from_address() -> String {
    "noreply@folio.localhost".to_string()
}

/// Email service relaying contact form messages
#[derive(Clone)]
pub struct EmailService {
    mailer: SmtpTransport,
    from: String,
    skip_sending: bool,
}

impl EmailService {
    /// Create a new email service from configuration
    pub fn new(config: &EmailConfig) -> anyhow::Result<Self> {
        let mailer = if config.smtp_username.is_empty() || config.smtp_password.is_empty() {
            tracing::info!(
                smtp_host = %config.smtp_host,
                smtp_port = config.smtp_port,
                "SMTP credentials not configured, using unauthenticated connection (e.g., MailDev)"
            );
            SmtpTransport::builder_dangerous(&config.smtp_host)
                .port(config.smtp_port)
                .build()
        } else {
            tracing::info!(
                smtp_host = %config.smtp_host,
                smtp_port = config.smtp_port,
                from = %config.from_address,
                "Email service initialized with authentication and TLS"
            );

            let creds =
                Credentials::new(config.smtp_username.clone(), config.smtp_password.clone());

            SmtpTransport::relay(&config.smtp_host)?
                .port(config.smtp_port)
                .credentials(creds)
                .build()
        };

        Ok(Self {
            mailer,
            from: config.from_address.clone(),
            skip_sending: config.dry_run,
        })
    }

    /// Email service that logs messages and skips SMTP entirely.
    pub fn new_mock(config: &EmailConfig) -> Self {
        let mailer = SmtpTransport::builder_dangerous("localhost")
            .port(1025)
            .build();

        tracing::info!(
            from = %config.from_address,
            "Mock email service initialized (SMTP calls skipped)"
        );

        Self {
            mailer,
            from: config.from_address.clone(),
            skip_sending: true,
        }
    }

    pub fn build_message(&self, payload: &Payload) -> anyhow::Result<Message> {
        let recipient = Mailbox::new(
            Some(payload.recipient_name.to_owned()),
            payload.recipient_identity.parse::<Address>()?,
        );
        let reply_to = Mailbox::new(
            Some(payload.sender_name.to_owned()),
            payload.reply_to.parse::<Address>()?,
        );

        Ok(Message::builder()
            .from(self.from.parse()?)
            .to(recipient)
            .reply_to(reply_to)
            .subject(CONTACT_SUBJECT)
            .header(header::ContentType::TEXT_PLAIN)
            .body(payload.body.to_owned())?)
    }
}

#[async_trait::async_trait]
impl MessageSender for EmailService {
    #[tracing::instrument(
        name = "email.send",
        skip_all,
        fields(to = %payload.recipient_identity, reply_to = %payload.reply_to)
    )]
    async fn send(&self, payload: &Payload) -> Result<(), DeliveryError> {
        let message = self.build_message(payload)?;

        if self.skip_sending {
            tracing::info!("Mock email service: Skipping actual SMTP send");
            return Ok(());
        }

        tracing::info!("Sending email text plain");

        let mailer = self.mailer.clone();
        tokio::task::spawn_blocking(move || mailer.send(&message))
            .await
            .map_err(|err| DeliveryError::new(err.to_string()))?
            .map_err(|err| {
                tracing::error!(error = %err, "Failed to send contact message via SMTP");
                DeliveryError::new(err.to_string())
            })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use folio_contact::{FormFields, Recipient};

    use super::*;

    fn payload(email: &str) -> Payload {
        Payload::compose(
            &FormFields {
                name: "Ada".to_owned(),
                email: email.to_owned(),
                message: "Hello, I would like to connect.".to_owned(),
            },
            &Recipient::new("Site Owner", "owner@folio.localhost"),
        )
    }

    #[test]
    fn test_build_message_addresses_recipient_and_reply_to() -> anyhow::Result<()> {
        let service = EmailService::new_mock(&EmailConfig::default());

        let message = service.build_message(&payload("ada@example.com"))?;
        let formatted = String::from_utf8(message.formatted())?;

        assert!(formatted.contains("owner@folio.localhost"), "{formatted}");
        assert!(formatted.contains("Reply-To: "), "{formatted}");
        assert!(formatted.contains("<ada@example.com>"), "{formatted}");
        assert!(formatted.contains("Subject: New message from contact page"));
        assert!(formatted.contains("From: noreply@folio.localhost"));

        Ok(())
    }

    #[test]
    fn test_build_message_rejects_unparseable_reply_to() {
        let service = EmailService::new_mock(&EmailConfig::default());

        assert!(service.build_message(&payload("ada@exa mple.com")).is_err());
    }

    #[tokio::test]
    async fn test_mock_send_succeeds_without_smtp() {
        let service = EmailService::new_mock(&EmailConfig::default());

        let result = service.send(&payload("ada@example.com")).await;

        assert_eq!(result, Ok(()));
    }

    #[tokio::test]
    async fn test_mock_send_reports_invalid_address() {
        let service = EmailService::new_mock(&EmailConfig::default());

        let result = service.send(&payload("not an address")).await;

        let err = result.expect_err("invalid reply-to should fail");
        assert!(err.detail.is_some());
    }

    #[test]
    fn test_dry_run_config_skips_sending() -> anyhow::Result<()> {
        let config = EmailConfig {
            dry_run: true,
            ..Default::default()
        };

        let service = EmailService::new(&config)?;

        assert!(service.skip_sending);

        Ok(())
    }
}
