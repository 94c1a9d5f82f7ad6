use shared::domain::{Choice, Decision, Event};
use tracing::{debug, info, warn};

use crate::error::FeedError;

/// A decision handed to the sink, identifying the session and slot it was
/// taken from. Only one can be outstanding per session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingDecision {
    decision: Decision,
    position: usize,
    generation: u64,
}

impl PendingDecision {
    pub fn decision(&self) -> Decision {
        self.decision
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// No current item, or another submission is outstanding.
    Ignored,
    Recorded { position: usize },
    Rejected,
    /// The ticket belongs to a session that has since been reloaded.
    Stale,
}

/// Ordered feed items, the cursor into them and the in-flight guard.
#[derive(Debug, Clone, Default)]
pub struct FeedSession {
    items: Vec<Event>,
    position: usize,
    in_flight: Option<PendingDecision>,
    generation: u64,
    banner: Option<FeedError>,
}

impl FeedSession {
    pub fn new(items: Vec<Event>) -> Self {
        Self {
            items,
            ..Self::default()
        }
    }

    /// Replaces the items after a successful feed fetch. Any outstanding
    /// ticket becomes stale.
    pub fn load_succeeded(&mut self, items: Vec<Event>) {
        info!(count = items.len(), "feed: loaded");
        self.replace(items);
        self.banner = None;
    }

    pub fn load_failed(&mut self, detail: impl Into<String>) {
        let detail = detail.into();
        warn!("feed: load failed: {detail}");
        self.replace(Vec::new());
        self.banner = Some(FeedError::Load { detail });
    }

    fn replace(&mut self, items: Vec<Event>) {
        self.items = items;
        self.position = 0;
        self.in_flight = None;
        self.generation = self.generation.wrapping_add(1);
    }

    pub fn items(&self) -> &[Event] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn current_item(&self) -> Option<&Event> {
        self.items.get(self.position)
    }

    pub fn is_exhausted(&self) -> bool {
        self.position >= self.items.len()
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn in_flight(&self) -> Option<&PendingDecision> {
        self.in_flight.as_ref()
    }

    pub fn banner(&self) -> Option<&FeedError> {
        self.banner.as_ref()
    }

    pub fn dismiss_banner(&mut self) {
        self.banner = None;
    }

    /// `(position + 1, len)` while a card is displayed.
    pub fn counter(&self) -> Option<(usize, usize)> {
        self.current_item()
            .map(|_| (self.position + 1, self.items.len()))
    }

    /// Takes the in-flight slot for the current item. Returns `None` when the
    /// feed is exhausted or a submission is already outstanding.
    pub fn begin_submission(&mut self, choice: Choice) -> Option<PendingDecision> {
        if self.in_flight.is_some() {
            debug!("feed: submission already in flight; ignoring {}", choice.label());
            return None;
        }
        let event = self.current_item()?;
        let pending = PendingDecision {
            decision: Decision::new(event.id, choice),
            position: self.position,
            generation: self.generation,
        };
        self.in_flight = Some(pending);
        self.banner = None;
        debug!(
            event_id = pending.decision.event_id.0,
            liked = pending.decision.liked,
            position = pending.position,
            "feed: submission started"
        );
        Some(pending)
    }

    /// Releases the guard for a submission whose answer will never arrive.
    /// The position is kept and the failure banner is shown.
    pub fn abandon_submission(&mut self, ticket: PendingDecision) -> SubmissionOutcome {
        self.complete_submission(ticket, Err("submission cancelled before the backend answered"))
    }

    /// Applies the sink's answer for `ticket` and releases the guard.
    pub fn complete_submission<E: std::fmt::Display>(
        &mut self,
        ticket: PendingDecision,
        result: Result<(), E>,
    ) -> SubmissionOutcome {
        if ticket.generation != self.generation || self.in_flight != Some(ticket) {
            debug!(
                event_id = ticket.decision.event_id.0,
                "feed: dropping result for a replaced session"
            );
            return SubmissionOutcome::Stale;
        }
        self.in_flight = None;

        match result {
            Ok(()) => {
                self.position = (self.position + 1).min(self.items.len());
                info!(
                    event_id = ticket.decision.event_id.0,
                    liked = ticket.decision.liked,
                    position = self.position,
                    "feed: decision recorded"
                );
                SubmissionOutcome::Recorded {
                    position: self.position,
                }
            }
            Err(err) => {
                let detail = err.to_string();
                warn!(
                    event_id = ticket.decision.event_id.0,
                    "feed: decision submission failed: {detail}"
                );
                self.banner = Some(FeedError::Submission {
                    event_id: ticket.decision.event_id,
                    detail,
                });
                SubmissionOutcome::Rejected
            }
        }
    }
}
