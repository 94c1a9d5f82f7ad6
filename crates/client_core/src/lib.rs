//! Swipe-decision engine: gesture recognition, feed consumption and decision
//! submission against the events backend.

use anyhow::Result;
use async_trait::async_trait;
use shared::domain::{Category, Decision, Event};

pub mod card;
pub mod config;
pub mod error;
pub mod feed;
pub mod gesture;
mod http;

pub use card::CardView;
pub use config::{load_settings, ClientSettings};
pub use error::FeedError;
pub use feed::{FeedController, FeedSession, PendingDecision, SubmissionOutcome};
pub use gesture::{
    CardCursor, CardKey, CardVisual, GestureInput, GestureReaction, GestureRecognizer,
    GestureState, EXIT_ANIMATION, SWIPE_THRESHOLD,
};
pub use http::HttpBackend;

/// Source of the ranked candidate events for the signed-in participant.
#[async_trait]
pub trait FeedProvider: Send + Sync {
    async fn fetch_feed(&self) -> Result<Vec<Event>>;
}

/// Durable store for swipe decisions. A call either records the decision or
/// fails; there is no partial success.
#[async_trait]
pub trait DecisionSink: Send + Sync {
    async fn submit(&self, decision: Decision) -> Result<()>;
}

#[async_trait]
pub trait CategoryResolver: Send + Sync {
    async fn fetch_categories(&self) -> Result<Vec<Category>>;
}

/// Fixed category table supplied by the host.
#[derive(Debug, Clone, Default)]
pub struct StaticCategories(pub Vec<Category>);

#[async_trait]
impl CategoryResolver for StaticCategories {
    async fn fetch_categories(&self) -> Result<Vec<Category>> {
        Ok(self.0.clone())
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
