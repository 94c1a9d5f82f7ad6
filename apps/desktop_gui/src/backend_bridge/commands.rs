//! Commands queued from the UI thread to the backend worker.

use client_core::PendingDecision;

#[derive(Debug, Clone)]
pub enum BackendCommand {
    /// Fetch the feed and the category table together.
    LoadFeed,
    SubmitDecision { ticket: PendingDecision },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::LoadFeed => "load_feed",
            BackendCommand::SubmitDecision { .. } => "submit_decision",
        }
    }
}
