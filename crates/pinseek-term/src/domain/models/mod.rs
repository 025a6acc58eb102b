//! Data models shared between the UI loop and its background services.

mod action;
mod event;

pub use action::Action;
pub use event::Event;
