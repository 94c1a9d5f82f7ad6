//! Wire and domain types shared by the swipe client crates.

pub mod domain;
pub mod error;
pub mod protocol;
