//! Display model for one feed card.

use chrono::{DateTime, Local, Utc};
use rust_decimal::Decimal;
use shared::domain::{CategoryMap, Event};

#[derive(Debug, Clone, PartialEq)]
pub struct CardView<'a> {
    pub title: &'a str,
    pub price: Option<String>,
    pub date: Option<String>,
    pub organizer: Option<&'a str>,
    /// One label per category id, in event order; unresolved ids are blank.
    pub chips: Vec<&'a str>,
    pub description: Option<&'a str>,
    pub picture_url: Option<&'a str>,
}

impl<'a> CardView<'a> {
    pub fn new(event: &'a Event, categories: &'a CategoryMap) -> Self {
        Self {
            title: &event.title,
            price: event.price.map(format_price),
            date: event.date.map(format_date),
            organizer: non_blank(event.organizer_name.as_deref()),
            chips: event
                .category_ids
                .iter()
                .map(|id| categories.label(*id))
                .collect(),
            description: non_blank(event.description.as_deref()),
            picture_url: non_blank(event.picture_url.as_deref()),
        }
    }
}

pub fn format_price(price: Decimal) -> String {
    format!("€{:.2}", price.round_dp(2))
}

pub fn format_date(date: DateTime<Utc>) -> String {
    date.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}

pub fn counter_label(position: usize, len: usize) -> String {
    format!("{} / {}", position + 1, len)
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use shared::domain::{Category, CategoryId, EventId};

    use super::*;

    fn event() -> Event {
        Event {
            id: EventId(1),
            title: "Street food market".to_string(),
            price: Some(Decimal::new(5, 0)),
            date: Some("2025-06-01T18:00:00Z".parse().expect("timestamp")),
            organizer_name: Some("City Council".to_string()),
            category_ids: vec![CategoryId(2), CategoryId(99)],
            description: Some(String::new()),
            picture_url: None,
        }
    }

    #[test]
    fn resolves_chips_and_formats_fields() {
        let categories = CategoryMap::from_categories(vec![Category {
            id: CategoryId(2),
            name: "Food".to_string(),
        }]);
        let event = event();
        let view = CardView::new(&event, &categories);

        assert_eq!(view.title, "Street food market");
        assert_eq!(view.price.as_deref(), Some("€5.00"));
        assert!(view.date.is_some());
        assert_eq!(view.organizer, Some("City Council"));
        assert_eq!(view.chips, vec!["Food", ""]);
        assert_eq!(view.description, None);
        assert_eq!(view.picture_url, None);
    }

    #[test]
    fn rounds_prices_to_cents() {
        assert_eq!(format_price(Decimal::new(12499, 3)), "€12.50");
        assert_eq!(format_price(Decimal::ZERO), "€0.00");
    }

    #[test]
    fn counter_is_one_based() {
        assert_eq!(counter_label(0, 2), "1 / 2");
        assert_eq!(counter_label(1, 2), "2 / 2");
    }
}
