use shared::domain::EventId;
use thiserror::Error;

/// Failures surfaced to the participant as a banner.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeedError {
    #[error("Could not load your event feed. Please try again. ({detail})")]
    Load { detail: String },
    #[error("Unable to register your swipe. Please try again. ({detail})")]
    Submission { event_id: EventId, detail: String },
}

impl FeedError {
    /// Banner text without the transport detail.
    pub fn user_message(&self) -> &'static str {
        match self {
            FeedError::Load { .. } => "Could not load your event feed. Please try again.",
            FeedError::Submission { .. } => "Unable to register your swipe. Please try again.",
        }
    }

    pub fn detail(&self) -> &str {
        match self {
            FeedError::Load { detail } | FeedError::Submission { detail, .. } => detail,
        }
    }
}
