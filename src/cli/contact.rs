use std::sync::Arc;

use folio_contact::{
    ContactForm, DeliveryError, Field, FieldErrors, FormFields, MESSAGE_SOFT_LIMIT,
    MessageSender, Recipient, Submission, SubmissionState,
};
use folio_notification::EmailService;

use crate::config::Config;

pub const SUCCESS_BANNER: &str = "Message sent successfully! I'll get back to you soon.";

#[derive(clap::Args, Clone, Debug, Default)]
pub struct MessageArgs {
    /// Your name
    #[arg(long, default_value = "")]
    pub name: String,

    /// Your email address
    #[arg(long, default_value = "")]
    pub email: String,

    /// What would you like to say?
    #[arg(long, default_value = "")]
    pub message: String,
}

impl From<MessageArgs> for FormFields {
    fn from(value: MessageArgs) -> Self {
        Self {
            name: value.name,
            email: value.email,
            message: value.message,
        }
    }
}

pub fn render_errors(errors: &FieldErrors) -> String {
    errors
        .iter()
        .map(|(field, message)| format!("{field}: {message}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Validate a message without sending it
pub fn check(args: MessageArgs) -> anyhow::Result<()> {
    let fields = FormFields::from(args);
    warn_soft_limit(&fields);

    let errors = fields.errors();
    if !errors.is_empty() {
        anyhow::bail!("{}", render_errors(&errors));
    }

    println!("Contact form is valid");

    Ok(())
}

/// Validate and relay a message through the configured email service
pub async fn send(config: Config, args: MessageArgs, dry_run: bool) -> anyhow::Result<()> {
    let mut email_config = config.email;
    email_config.dry_run |= dry_run;

    let service = Arc::new(EmailService::new(&email_config)?);
    let banner = deliver(service, config.contact.recipient(), args).await?;
    println!("{banner}");

    Ok(())
}

/// Drives a contact form session to completion and returns the success text.
pub async fn deliver<S: MessageSender>(
    sender: Arc<S>,
    recipient: Recipient,
    args: MessageArgs,
) -> anyhow::Result<&'static str> {
    let form = ContactForm::new(sender, recipient);
    form.update_field(Field::Name, args.name);
    form.update_field(Field::Email, args.email);
    form.update_field(Field::Message, args.message);
    warn_soft_limit(&form.fields());

    match form.submit() {
        Submission::Invalid => anyhow::bail!("{}", render_errors(&form.errors())),
        Submission::Ignored => anyhow::bail!("contact form is busy"),
        Submission::Dispatched(delivery) => delivery.settled().await,
    }

    if form.state() == SubmissionState::Succeeded {
        return Ok(SUCCESS_BANNER);
    }

    let failure = form
        .failure()
        .unwrap_or_else(|| DeliveryError::unknown().to_string());

    anyhow::bail!(failure)
}

fn warn_soft_limit(fields: &FormFields) {
    if fields.exceeds_soft_limit() {
        tracing::warn!(
            length = fields.message_len(),
            limit = MESSAGE_SOFT_LIMIT,
            "Message is longer than the suggested length"
        );
    }
}
