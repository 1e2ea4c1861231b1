use strum::{AsRefStr, Display, EnumString, VariantArray};

/// Lifecycle of a single contact form submission.
#[derive(
    EnumString, Display, VariantArray, Default, Clone, Copy, Debug, PartialEq, Eq, AsRefStr,
)]
pub enum SubmissionState {
    #[default]
    Idle,
    Sending,
    Succeeded,
    Failed,
}

impl SubmissionState {
    pub fn is_sending(&self) -> bool {
        matches!(self, Self::Sending)
    }
}
