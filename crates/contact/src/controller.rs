use std::{
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use tokio::{
    sync::watch,
    task::{AbortHandle, JoinHandle},
};

use crate::{
    DeliveryError, Field, FieldErrors, FormFields, MessageSender, Payload, Recipient,
    SubmissionState,
};

/// How long the success banner stays up before the form goes back to idle.
pub const SUCCESS_DISPLAY: Duration = Duration::from_secs(5);

/// Result of a call to [`ContactForm::submit`].
#[derive(Debug)]
pub enum Submission {
    /// At least one field failed validation, see [`ContactForm::errors`].
    Invalid,
    /// A send is already in flight or the form was disposed.
    Ignored,
    Dispatched(Delivery),
}

/// Handle on an in-flight send.
#[derive(Debug)]
#[must_use]
pub struct Delivery(JoinHandle<()>);

impl Delivery {
    /// Waits until the send outcome has been applied to the form.
    pub async fn settled(self) {
        if let Err(err) = self.0.await {
            tracing::error!(error = %err, "Contact delivery task failed");
        }
    }
}

#[derive(Default)]
struct Inner {
    fields: FormFields,
    errors: FieldErrors,
    state: SubmissionState,
    failure: Option<DeliveryError>,
    disposed: bool,
    revert: Option<AbortHandle>,
}

impl Inner {
    fn cancel_revert(&mut self) {
        if let Some(task) = self.revert.take() {
            task.abort();
        }
    }
}

struct Shared {
    inner: Mutex<Inner>,
    state_tx: watch::Sender<SubmissionState>,
    recipient: Recipient,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn transition(&self, inner: &mut Inner, state: SubmissionState) {
        tracing::debug!(from = %inner.state, to = %state, "Contact form transition");
        inner.state = state;
        self.state_tx.send_replace(state);
    }

    fn settle(self: &Arc<Self>, result: Result<(), DeliveryError>) {
        let mut inner = self.lock();
        if inner.disposed {
            tracing::debug!("Contact form disposed before delivery settled, ignoring outcome");
            return;
        }

        match result {
            Ok(()) => {
                tracing::info!(to = %self.recipient.identity, "Contact message sent");

                inner.fields = FormFields::default();
                self.transition(&mut inner, SubmissionState::Succeeded);

                let shared = Arc::clone(self);
                let task = tokio::spawn(async move {
                    tokio::time::sleep(SUCCESS_DISPLAY).await;
                    shared.revert_success();
                });
                inner.revert = Some(task.abort_handle());
            }
            Err(err) => {
                tracing::warn!(error = %err, "Failed to send contact message");

                inner.failure = Some(err);
                self.transition(&mut inner, SubmissionState::Failed);
            }
        }
    }

    fn revert_success(&self) {
        let mut inner = self.lock();
        if inner.disposed || inner.state != SubmissionState::Succeeded {
            return;
        }

        inner.revert = None;
        self.transition(&mut inner, SubmissionState::Idle);
    }
}

/// Contact form session: field values, validation messages and the
/// submission lifecycle. Delivery is delegated to a [`MessageSender`].
///
/// Dropping the form disposes it.
pub struct ContactForm<S: MessageSender> {
    shared: Arc<Shared>,
    sender: Arc<S>,
}

impl<S: MessageSender> ContactForm<S> {
    pub fn new(sender: Arc<S>, recipient: Recipient) -> Self {
        let (state_tx, _) = watch::channel(SubmissionState::Idle);

        Self {
            shared: Arc::new(Shared {
                inner: Mutex::new(Inner::default()),
                state_tx,
                recipient,
            }),
            sender,
        }
    }

    pub fn fields(&self) -> FormFields {
        self.shared.lock().fields.clone()
    }

    pub fn errors(&self) -> FieldErrors {
        self.shared.lock().errors.clone()
    }

    pub fn state(&self) -> SubmissionState {
        self.shared.lock().state
    }

    /// Text of the last delivery failure, while the form is `Failed`.
    pub fn failure(&self) -> Option<String> {
        let inner = self.shared.lock();
        if inner.state != SubmissionState::Failed {
            return None;
        }

        inner.failure.as_ref().map(ToString::to_string)
    }

    pub fn subscribe(&self) -> watch::Receiver<SubmissionState> {
        self.shared.state_tx.subscribe()
    }

    pub fn is_disposed(&self) -> bool {
        self.shared.lock().disposed
    }

    /// Stores the value and drops any error shown for that field without
    /// checking the new value.
    pub fn update_field(&self, field: Field, value: impl Into<String>) {
        let mut inner = self.shared.lock();
        if inner.disposed {
            return;
        }

        inner.fields.set(field, value);
        inner.errors.clear(field);
    }

    /// Recomputes every field error. Returns true when the form is valid.
    pub fn validate(&self) -> bool {
        let mut inner = self.shared.lock();
        if inner.disposed {
            return false;
        }

        let errors = inner.fields.errors();
        inner.errors = errors;
        inner.errors.is_empty()
    }

    /// Validates and, when valid, hands the message to the sender in the
    /// background. Must be called from within a tokio runtime.
    pub fn submit(&self) -> Submission {
        let mut inner = self.shared.lock();
        if inner.disposed {
            return Submission::Ignored;
        }

        if inner.state.is_sending() {
            tracing::debug!("Contact message already sending, ignoring submit");
            return Submission::Ignored;
        }

        let errors = inner.fields.errors();
        inner.errors = errors;
        if !inner.errors.is_empty() {
            tracing::debug!(errors = inner.errors.len(), "Contact form is invalid");
            return Submission::Invalid;
        }

        inner.cancel_revert();
        inner.failure = None;
        let payload = Payload::compose(&inner.fields, &self.shared.recipient);
        self.shared.transition(&mut inner, SubmissionState::Sending);
        drop(inner);

        tracing::info!(
            name = %payload.sender_name,
            email = %payload.sender_email,
            to = %payload.recipient_identity,
            "Sending contact message"
        );

        let shared = Arc::clone(&self.shared);
        let sender = Arc::clone(&self.sender);
        let handle = tokio::spawn(async move {
            let result = sender.send(&payload).await;
            shared.settle(result);
        });

        Submission::Dispatched(Delivery(handle))
    }

    /// Closes the success banner before the display window ends.
    pub fn dismiss_success(&self) {
        let mut inner = self.shared.lock();
        if inner.disposed || inner.state != SubmissionState::Succeeded {
            return;
        }

        inner.cancel_revert();
        self.shared.transition(&mut inner, SubmissionState::Idle);
    }

    /// Detaches the form. Pending timers are cancelled and an in-flight send
    /// can no longer change anything.
    pub fn dispose(&self) {
        let mut inner = self.shared.lock();
        if inner.disposed {
            return;
        }

        inner.disposed = true;
        inner.cancel_revert();
        tracing::debug!(state = %inner.state, "Contact form disposed");
    }
}

impl<S: MessageSender> Drop for ContactForm<S> {
    fn drop(&mut self) {
        self.dispose();
    }
}
