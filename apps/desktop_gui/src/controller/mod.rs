//! Controller layer: backend events, error modeling and command dispatch.

pub mod events;
pub mod orchestration;
