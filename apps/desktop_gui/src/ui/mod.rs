//! UI layer: the swipe window shell and the card widget.

pub mod app;
pub mod card;

pub use app::SwipeApp;
