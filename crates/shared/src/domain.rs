use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);
    };
}

id_newtype!(EventId);
id_newtype!(CategoryId);

/// A candidate event as returned by the feed endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organizer_name: Option<String>,
    #[serde(rename = "categories", default)]
    pub category_ids: Vec<CategoryId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "picture", default, skip_serializing_if = "Option::is_none")]
    pub picture_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

/// Read-only lookup from category id to display name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryMap {
    names: HashMap<CategoryId, String>,
}

impl CategoryMap {
    pub fn from_categories(categories: impl IntoIterator<Item = Category>) -> Self {
        Self {
            names: categories
                .into_iter()
                .map(|category| (category.id, category.name))
                .collect(),
        }
    }

    pub fn name(&self, id: CategoryId) -> Option<&str> {
        self.names.get(&id).map(String::as_str)
    }

    /// Display label for a chip; unknown ids render blank.
    pub fn label(&self, id: CategoryId) -> &str {
        self.name(id).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// The participant's verdict on one card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Choice {
    Save,
    Skip,
}

impl Choice {
    pub fn from_liked(liked: bool) -> Self {
        if liked {
            Choice::Save
        } else {
            Choice::Skip
        }
    }

    pub fn liked(self) -> bool {
        matches!(self, Choice::Save)
    }

    pub fn label(self) -> &'static str {
        match self {
            Choice::Save => "save",
            Choice::Skip => "skip",
        }
    }
}

/// Body of a swipe submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    pub event_id: EventId,
    pub liked: bool,
}

impl Decision {
    pub fn new(event_id: EventId, choice: Choice) -> Self {
        Self {
            event_id,
            liked: choice.liked(),
        }
    }

    pub fn choice(&self) -> Choice {
        Choice::from_liked(self.liked)
    }
}
