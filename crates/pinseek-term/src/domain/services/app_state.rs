use anyhow::Result;
use tokio::sync::mpsc;

use crate::domain::models::Action;
use pinseek_core::LookupOutcome;
use pinseek_core::PinseekError;
use pinseek_core::SearchSession;

#[cfg(test)]
#[path = "app_state_test.rs"]
mod tests;

pub struct AppStateProps {
    /// Endpoint named in the footer so the user can tell a mock from the
    /// real service.
    pub api_url: String,
}

/// Everything the draw functions read and the event loop mutates.
///
/// The search logic itself lives in [`SearchSession`]; this wrapper adds the
/// purely presentational state around it (the result-list highlight and the
/// spinner frame) and translates keyboard events into session commands.
pub struct AppState {
    pub session: SearchSession,
    pub highlighted: Option<usize>,
    pub spinner_frame: u64,
    pub api_url: String,
}

impl AppState {
    pub fn new(props: AppStateProps) -> AppState {
        return AppState {
            session: SearchSession::new(),
            highlighted: None,
            spinner_frame: 0,
            api_url: props.api_url,
        };
    }

    /// Append a typed character to the input field. The session rejects
    /// anything that would not leave zero to six digits behind, so stray
    /// letters and a seventh digit are dropped here without ceremony.
    pub fn handle_char_input(&mut self, input: char) {
        let candidate = format!("{}{}", self.session.input(), input);
        self.session.set_input(&candidate);
    }

    pub fn handle_backspace(&mut self) {
        let mut candidate = self.session.input().to_string();
        candidate.pop();
        self.session.set_input(&candidate);
    }

    /// Pasted text is appended whole; the session discards the paste if the
    /// combined value is not a digit prefix.
    pub fn handle_paste(&mut self, text: &str) {
        let candidate = format!("{}{}", self.session.input(), text.trim());
        self.session.set_input(&candidate);
    }

    /// Enter closes the detail view when it is open, opens it when a result
    /// row is highlighted, and otherwise submits the input for lookup.
    pub fn handle_enter(&mut self, tx: &mpsc::UnboundedSender<Action>) -> Result<()> {
        if self.session.detail().is_some() {
            self.session.dismiss_detail();
            return Ok(());
        }

        if let Some(index) = self.highlighted {
            self.session.select_record(index);
            return Ok(());
        }

        if let Some(request) = self.session.submit() {
            tx.send(Action::Lookup(request))?;
        }

        return Ok(());
    }

    pub fn handle_escape(&mut self) {
        if self.session.detail().is_some() {
            self.session.dismiss_detail();
            return;
        }

        self.highlighted = None;
    }

    /// The home affordance: back to a pristine screen. Any in-flight lookup
    /// resolves as stale afterwards.
    pub fn handle_home(&mut self) {
        self.session.reset();
        self.highlighted = None;
    }

    pub fn scroll_up(&mut self) {
        match self.highlighted {
            Some(0) | None => self.highlighted = None,
            Some(index) => self.highlighted = Some(index - 1),
        }
    }

    pub fn scroll_down(&mut self) {
        let result_count = self.session.results().len();
        if result_count == 0 {
            return;
        }

        self.highlighted = match self.highlighted {
            None => Some(0),
            Some(index) => Some((index + 1).min(result_count - 1)),
        };
    }

    /// Feed a worker's resolution into the session. A stale generation is
    /// dropped by the session; an applied one replaces the result list, so
    /// the old highlight no longer points at anything meaningful.
    pub fn handle_lookup_resolved(
        &mut self,
        generation: u64,
        outcome: Result<LookupOutcome, PinseekError>,
    ) {
        if self.session.resolve(generation, outcome) {
            self.highlighted = None;
        } else {
            log::debug!(
                "Dropped lookup resolution for superseded generation {}",
                generation
            );
        }
    }

    pub fn handle_tick(&mut self) {
        self.spinner_frame = self.spinner_frame.wrapping_add(1);
    }
}
