use crate::FormFields;

/// Fixed "to" identity every message from the form is addressed to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Recipient {
    pub name: String,
    pub identity: String,
}

impl Recipient {
    pub fn new(name: impl Into<String>, identity: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            identity: identity.into(),
        }
    }
}

/// Outbound message handed to a [`crate::MessageSender`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Payload {
    pub sender_name: String,
    pub sender_email: String,
    pub recipient_name: String,
    pub recipient_identity: String,
    pub body: String,
    pub reply_to: String,
}

impl Payload {
    pub fn compose(fields: &FormFields, recipient: &Recipient) -> Self {
        let body = format!(
            r#"Message from: {name}
Email: {email}

Message:
{message}

---
This message was sent from your portfolio contact form.
Reply directly to: {email}"#,
            name = fields.name,
            email = fields.email,
            message = fields.message,
        );

        Self {
            sender_name: fields.name.to_owned(),
            sender_email: fields.email.to_owned(),
            recipient_name: recipient.name.to_owned(),
            recipient_identity: recipient.identity.to_owned(),
            body,
            reply_to: fields.email.to_owned(),
        }
    }
}
