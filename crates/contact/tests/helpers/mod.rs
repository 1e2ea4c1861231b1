use std::sync::{Arc, Mutex};

use folio_contact::{ContactForm, DeliveryError, Field, MessageSender, Payload, Recipient};
use tokio::sync::Notify;

pub struct FakeSender {
    sent: Mutex<Vec<Payload>>,
    outcome: Mutex<Result<(), DeliveryError>>,
    gate: Option<Notify>,
}

#[allow(dead_code)]
impl FakeSender {
    pub fn ok() -> Arc<Self> {
        Self::build(Ok(()), None)
    }

    pub fn failing(detail: impl Into<String>) -> Arc<Self> {
        Self::build(Err(DeliveryError::new(detail)), None)
    }

    /// Sender whose sends stay pending until [`FakeSender::release`].
    pub fn gated() -> Arc<Self> {
        Self::build(Ok(()), Some(Notify::new()))
    }

    fn build(outcome: Result<(), DeliveryError>, gate: Option<Notify>) -> Arc<Self> {
        Arc::new(Self {
            sent: Mutex::new(vec![]),
            outcome: Mutex::new(outcome),
            gate,
        })
    }

    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.notify_one();
        }
    }

    pub fn set_outcome(&self, outcome: Result<(), DeliveryError>) {
        *self.outcome.lock().unwrap() = outcome;
    }

    pub fn sent(&self) -> Vec<Payload> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl MessageSender for FakeSender {
    async fn send(&self, payload: &Payload) -> Result<(), DeliveryError> {
        self.sent.lock().unwrap().push(payload.clone());

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        self.outcome.lock().unwrap().clone()
    }
}

pub fn recipient() -> Recipient {
    Recipient::new("Site Owner", "owner@folio.localhost")
}

pub fn form(sender: &Arc<FakeSender>) -> ContactForm<FakeSender> {
    ContactForm::new(Arc::clone(sender), recipient())
}

pub fn fill<S: MessageSender>(form: &ContactForm<S>, name: &str, email: &str, message: &str) {
    form.update_field(Field::Name, name);
    form.update_field(Field::Email, email);
    form.update_field(Field::Message, message);
}

#[allow(dead_code)]
pub fn fill_valid<S: MessageSender>(form: &ContactForm<S>) {
    fill(
        form,
        "Ada",
        "ada@example.com",
        "Hello, I would like to connect.",
    );
}
