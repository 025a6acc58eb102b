//! Terminal user interface for the Pinseek postal lookup.
//!
//! This crate renders the single search screen: a six-digit input box, the
//! result list with a detail overlay, and the banners for lookups that fail
//! or match nothing. All search logic lives in `pinseek-core`; this layer
//! observes session state and forwards user commands to it.

pub mod application;
pub mod domain;

pub use application::ui::{destruct_terminal_for_panic, start_loop};
pub use domain::models::{Action, Event};
pub use domain::services::{ActionsService, AppState, AppStateProps, EventsService};
