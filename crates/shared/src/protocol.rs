use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::{Category, Event, EventId};

/// `GET participants/feed/`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedResponse {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub events: Vec<Event>,
}

/// `GET public/categories/`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoriesResponse {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub categories: Vec<Category>,
}

/// `POST participants/swipes/` acknowledgement.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SwipeAck {
    #[serde(default)]
    pub detail: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwipeRecord {
    pub event_id: EventId,
    pub liked: bool,
    pub created_at: DateTime<Utc>,
}

/// `GET participants/swipes/history/`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SwipeHistoryResponse {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub swipes: Vec<SwipeRecord>,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_or_missing_events_decode_as_empty_feed() {
        let null: FeedResponse = serde_json::from_str(r#"{"events": null}"#).expect("null");
        assert!(null.events.is_empty());

        let missing: FeedResponse = serde_json::from_str("{}").expect("missing");
        assert!(missing.events.is_empty());
    }

    #[test]
    fn decodes_history_records() {
        let history: SwipeHistoryResponse = serde_json::from_str(
            r#"{"swipes": [{"event_id": 3, "liked": true, "created_at": "2025-01-02T10:00:00Z"}]}"#,
        )
        .expect("history");
        assert_eq!(history.swipes.len(), 1);
        assert_eq!(history.swipes[0].event_id, EventId(3));
        assert!(history.swipes[0].liked);
    }
}
