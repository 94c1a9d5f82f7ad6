//! Feed consumption and decision submission.

mod session;

pub use session::{FeedSession, PendingDecision, SubmissionOutcome};

use std::sync::Arc;

use shared::domain::{CategoryMap, Choice, Event};
use tracing::{info, warn};

use crate::{error::FeedError, CategoryResolver, DecisionSink, FeedProvider};

/// Drives one feed view: loads events and category names, hands out the
/// current card and serializes decision submissions through the session's
/// in-flight guard.
pub struct FeedController {
    feed: Arc<dyn FeedProvider>,
    sink: Arc<dyn DecisionSink>,
    resolver: Arc<dyn CategoryResolver>,
    session: FeedSession,
    categories: CategoryMap,
}

impl FeedController {
    pub fn new(
        feed: Arc<dyn FeedProvider>,
        sink: Arc<dyn DecisionSink>,
        resolver: Arc<dyn CategoryResolver>,
    ) -> Self {
        Self {
            feed,
            sink,
            resolver,
            session: FeedSession::default(),
            categories: CategoryMap::default(),
        }
    }

    pub fn from_backend<B>(backend: Arc<B>) -> Self
    where
        B: FeedProvider + DecisionSink + CategoryResolver + 'static,
    {
        Self::new(backend.clone(), backend.clone(), backend)
    }

    /// Fetches the feed and the category table concurrently. A category
    /// failure keeps the previous table; a feed failure leaves an empty
    /// session with a banner.
    pub async fn load_feed(&mut self) {
        let (events, categories) =
            tokio::join!(self.feed.fetch_feed(), self.resolver.fetch_categories());

        match categories {
            Ok(categories) => {
                self.categories = CategoryMap::from_categories(categories);
                info!(count = self.categories.len(), "feed: categories loaded");
            }
            Err(err) => warn!("feed: failed to load categories: {err:#}"),
        }

        match events {
            Ok(events) => self.session.load_succeeded(events),
            Err(err) => self.session.load_failed(format!("{err:#}")),
        }
    }

    pub async fn reload(&mut self) {
        self.load_feed().await;
    }

    pub fn current_item(&self) -> Option<&Event> {
        self.session.current_item()
    }

    /// Records `choice` for the current item. The position only advances
    /// once the sink has confirmed the decision.
    pub async fn submit_decision(&mut self, choice: Choice) -> SubmissionOutcome {
        let Some(ticket) = self.session.begin_submission(choice) else {
            return SubmissionOutcome::Ignored;
        };
        let mut guard = InFlightGuard {
            session: &mut self.session,
            ticket: Some(ticket),
        };
        let result = self.sink.submit(ticket.decision()).await;
        guard.ticket = None;
        guard
            .session
            .complete_submission(ticket, result.map_err(|err| format!("{err:#}")))
    }

    pub fn session(&self) -> &FeedSession {
        &self.session
    }

    pub fn categories(&self) -> &CategoryMap {
        &self.categories
    }

    pub fn position(&self) -> usize {
        self.session.position()
    }

    pub fn is_submitting(&self) -> bool {
        self.session.is_submitting()
    }

    pub fn is_exhausted(&self) -> bool {
        self.session.is_exhausted()
    }

    pub fn banner(&self) -> Option<&FeedError> {
        self.session.banner()
    }
}

/// Releases the in-flight slot if the submission future is dropped before
/// the sink answers.
struct InFlightGuard<'a> {
    session: &'a mut FeedSession,
    ticket: Option<PendingDecision>,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        if let Some(ticket) = self.ticket.take() {
            self.session.abandon_submission(ticket);
        }
    }
}

#[cfg(test)]
#[path = "../tests/feed_tests.rs"]
mod tests;
