//! Backend-to-UI events and error modeling for the swipe window.

use std::fmt;

use client_core::PendingDecision;
use shared::domain::{Category, Event};

pub enum UiEvent {
    FeedLoaded(Vec<Event>),
    FeedFailed(UiError),
    CategoriesLoaded(Vec<Category>),
    DecisionSettled {
        ticket: PendingDecision,
        result: Result<(), UiError>,
    },
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Auth,
    Transport,
    Validation,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    FeedLoad,
    SubmitDecision,
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("401")
            || message_lower.contains("403")
            || message_lower.contains("unauthorized")
            || message_lower.contains("forbidden")
            || message_lower.contains("not authenticated")
            || message_lower.contains("invalid token")
        {
            UiErrorCategory::Auth
        } else if message_lower.contains("invalid")
            || message_lower.contains("validation")
            || message_lower.contains("missing")
            || message_lower.contains("malformed")
            || message_lower.contains("not available")
            || message_lower.contains("already")
        {
            UiErrorCategory::Validation
        } else if message_lower.contains("timed out")
            || message_lower.contains("timeout")
            || message_lower.contains("connection")
            || message_lower.contains("connect")
            || message_lower.contains("network")
            || message_lower.contains("unavailable")
            || message_lower.contains("disconnect")
        {
            UiErrorCategory::Transport
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn requires_reauth(&self) -> bool {
        self.category == UiErrorCategory::Auth
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for UiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

#[cfg(test)]
#[path = "../tests/events_tests.rs"]
mod tests;
