//! Services backing the UI loop: state handling, background lookups, and
//! input multiplexing.

pub mod actions;
pub mod app_state;
pub mod events;

pub use actions::ActionsService;
pub use app_state::AppState;
pub use app_state::AppStateProps;
pub use events::EventsService;
