//! Tests for the contact command flow

use std::sync::Arc;

use folio::cli::contact::{MessageArgs, SUCCESS_BANNER, deliver};
use folio_contact::{
    DeliveryError, EMAIL_INVALID, MESSAGE_TOO_SHORT, MessageSender, Payload, Recipient,
};
use folio_notification::{EmailConfig, EmailService};

struct RejectingSender;

#[async_trait::async_trait]
impl MessageSender for RejectingSender {
    async fn send(&self, _payload: &Payload) -> Result<(), DeliveryError> {
        Err(DeliveryError::new("quota exceeded"))
    }
}

fn recipient() -> Recipient {
    Recipient::new("Portfolio Owner", "owner@folio.localhost")
}

fn valid_args() -> MessageArgs {
    MessageArgs {
        name: "Ada".to_string(),
        email: "ada@example.com".to_string(),
        message: "Hello, I would like to connect.".to_string(),
    }
}

#[tokio::test]
async fn test_deliver_with_mock_email_service() -> anyhow::Result<()> {
    let service = Arc::new(EmailService::new_mock(&EmailConfig::default()));

    let banner = deliver(service, recipient(), valid_args()).await?;

    assert_eq!(banner, SUCCESS_BANNER);

    Ok(())
}

#[tokio::test]
async fn test_deliver_reports_field_errors() {
    let service = Arc::new(EmailService::new_mock(&EmailConfig::default()));
    let args = MessageArgs {
        email: "ada at example.com".to_string(),
        message: "hi".to_string(),
        ..valid_args()
    };

    let err = deliver(service, recipient(), args)
        .await
        .expect_err("invalid form should not be sent");

    let text = err.to_string();
    assert!(text.contains(EMAIL_INVALID), "{text}");
    assert!(text.contains(MESSAGE_TOO_SHORT), "{text}");
}

#[tokio::test]
async fn test_deliver_surfaces_delivery_failure() {
    let err = deliver(Arc::new(RejectingSender), recipient(), valid_args())
        .await
        .expect_err("rejected send should fail");

    assert_eq!(err.to_string(), "Error sending message: quota exceeded");
}
