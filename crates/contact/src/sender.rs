use crate::Payload;

const UNKNOWN_ERROR: &str = "Unknown error occurred";

/// Failure reported by a [`MessageSender`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Error sending message: {}", .detail.as_deref().unwrap_or(UNKNOWN_ERROR))]
pub struct DeliveryError {
    pub detail: Option<String>,
}

impl DeliveryError {
    pub fn new(detail: impl Into<String>) -> Self {
        let detail = detail.into();
        Self {
            detail: (!detail.trim().is_empty()).then_some(detail),
        }
    }

    pub fn unknown() -> Self {
        Self { detail: None }
    }
}

impl From<anyhow::Error> for DeliveryError {
    fn from(value: anyhow::Error) -> Self {
        Self::new(value.to_string())
    }
}

/// Delivers a composed contact message. The controller treats the transport
/// as opaque and only looks at success or failure.
#[async_trait::async_trait]
pub trait MessageSender: Send + Sync + 'static {
    async fn send(&self, payload: &Payload) -> Result<(), DeliveryError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_falls_back_to_unknown() {
        assert_eq!(
            DeliveryError::unknown().to_string(),
            "Error sending message: Unknown error occurred"
        );
        assert_eq!(DeliveryError::new("  ").detail, None);
        assert_eq!(
            DeliveryError::new("quota exceeded").to_string(),
            "Error sending message: quota exceeded"
        );
    }
}
