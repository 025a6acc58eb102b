//! Search session state machine
//!
//! A session owns the input field and the lifecycle of the lookup it drives:
//! typing, submitting, waiting on the network, and landing on results, no
//! matches, or a failure. The session is a pure reducer — it never performs
//! I/O itself. A valid submit hands back a [`LookupRequest`] for the caller
//! to execute; the eventual outcome is fed back through [`SearchSession::resolve`].
//!
//! Every valid submit and every reset bumps a generation counter, and each
//! outbound request carries the generation it was issued under. A resolution
//! whose generation no longer matches is dropped on the floor, so a slow
//! response can never overwrite a newer search or a freshly reset screen.

use crate::core_types::{LookupOutcome, PostOffice};
use crate::errors::PinseekError;
use crate::pincode::{is_partial_pincode, Pincode};

/// Message surfaced when a lookup completes without any matching records.
pub const NO_DATA_MESSAGE: &str = "No data found for the provided Pincode.";

/// Lifecycle phase of the current search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    /// Nothing submitted since the last reset.
    Idle,
    /// The last submit was rejected by local validation.
    Invalid,
    /// A lookup is in flight.
    Loading,
    /// The last lookup returned at least one record.
    Success,
    /// The last lookup completed cleanly but matched nothing.
    Empty,
    /// The last lookup failed.
    Error,
}

/// A lookup the session wants performed, stamped with the generation that
/// must accompany its resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    pub pincode: Pincode,
    pub generation: u64,
}

/// What the presentation layer should show below the input field. Derived
/// from session state on demand; at most one of these is active at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayState<'a> {
    /// Nothing to show yet.
    Blank,
    /// A lookup is in flight.
    Loading,
    /// A validation or lookup failure message.
    ErrorBanner(&'a str),
    /// A completed search matched nothing.
    NoData,
    /// Matching records to list.
    Results(&'a [PostOffice]),
}

/// State for a single search screen.
///
/// Exactly one session exists per process. It is created at startup and
/// lives until exit; `reset` returns it to its initial state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSession {
    pincode_input: String,
    phase: SearchPhase,
    has_searched: bool,
    results: Vec<PostOffice>,
    error_message: Option<String>,
    detail: Option<PostOffice>,
    generation: u64,
}

impl SearchSession {
    pub fn new() -> Self {
        Self {
            pincode_input: String::new(),
            phase: SearchPhase::Idle,
            has_searched: false,
            results: Vec::new(),
            error_message: None,
            detail: None,
            generation: 0,
        }
    }

    pub fn input(&self) -> &str {
        &self.pincode_input
    }

    pub fn phase(&self) -> SearchPhase {
        self.phase
    }

    pub fn has_searched(&self) -> bool {
        self.has_searched
    }

    pub fn results(&self) -> &[PostOffice] {
        &self.results
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// The record currently open in the detail view, if any.
    pub fn detail(&self) -> Option<&PostOffice> {
        self.detail.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Replace the input field with `candidate`.
    ///
    /// Only strings of zero to six digits are accepted; anything else is
    /// silently ignored and the session is left untouched. An accepted edit
    /// clears any displayed error message, and a pending `Invalid` verdict
    /// is withdrawn entirely since the offending input is gone.
    ///
    /// Returns whether the candidate was accepted.
    pub fn set_input(&mut self, candidate: &str) -> bool {
        if !is_partial_pincode(candidate) {
            return false;
        }
        self.pincode_input = candidate.to_string();
        self.error_message = None;
        if self.phase == SearchPhase::Invalid {
            self.phase = SearchPhase::Idle;
        }
        true
    }

    /// Submit the current input for lookup.
    ///
    /// An input that is not a complete six-digit pincode moves the session
    /// to `Invalid` and returns `None` — nothing goes out on the wire. A
    /// complete pincode moves the session to `Loading`, bumps the
    /// generation, and returns the request the caller must execute. The
    /// caller reports back through [`resolve`](Self::resolve).
    ///
    /// Submitting while a lookup is already in flight is allowed; the
    /// generation bump makes the newer request win and the older response
    /// fall on the floor.
    pub fn submit(&mut self) -> Option<LookupRequest> {
        match Pincode::parse(&self.pincode_input) {
            Ok(pincode) => {
                self.phase = SearchPhase::Loading;
                self.has_searched = true;
                self.results.clear();
                self.error_message = None;
                self.generation += 1;
                Some(LookupRequest {
                    pincode,
                    generation: self.generation,
                })
            }
            Err(err) => {
                self.phase = SearchPhase::Invalid;
                self.error_message = Some(err.to_string());
                self.results.clear();
                self.has_searched = false;
                None
            }
        }
    }

    /// Apply the outcome of a lookup issued at `generation`.
    ///
    /// A resolution carrying a stale generation — the user reset or
    /// resubmitted in the meantime — is discarded without touching any
    /// state. Returns whether the outcome was applied.
    pub fn resolve(
        &mut self,
        generation: u64,
        outcome: Result<LookupOutcome, PinseekError>,
    ) -> bool {
        if generation != self.generation {
            return false;
        }
        match outcome {
            Ok(LookupOutcome::Matches(records)) => {
                self.phase = SearchPhase::Success;
                self.results = records;
                self.error_message = None;
            }
            Ok(LookupOutcome::NoMatches) => {
                self.phase = SearchPhase::Empty;
                self.results.clear();
                self.error_message = Some(NO_DATA_MESSAGE.to_string());
            }
            Err(err) => {
                self.phase = SearchPhase::Error;
                self.results.clear();
                self.error_message = Some(err.to_string());
            }
        }
        true
    }

    /// Return unconditionally to the initial state.
    ///
    /// Clears the input, results, error, and detail view, and bumps the
    /// generation so any still-outstanding lookup resolves as stale.
    pub fn reset(&mut self) {
        self.pincode_input.clear();
        self.phase = SearchPhase::Idle;
        self.has_searched = false;
        self.results.clear();
        self.error_message = None;
        self.detail = None;
        self.generation += 1;
    }

    /// Open the detail view on the result at `index`.
    ///
    /// Returns whether a record existed at that position.
    pub fn select_record(&mut self, index: usize) -> bool {
        match self.results.get(index) {
            Some(record) => {
                self.detail = Some(record.clone());
                true
            }
            None => false,
        }
    }

    /// Close the detail view.
    pub fn dismiss_detail(&mut self) {
        self.detail = None;
    }

    /// Derive what the presentation layer should show below the input.
    ///
    /// Priority mirrors the screen's layering: an in-flight lookup first,
    /// then any error message, then results, then the no-data banner for a
    /// completed search that came back empty.
    pub fn display(&self) -> DisplayState<'_> {
        if self.phase == SearchPhase::Loading {
            return DisplayState::Loading;
        }
        if let Some(message) = self.error_message.as_deref() {
            return DisplayState::ErrorBanner(message);
        }
        if !self.results.is_empty() {
            return DisplayState::Results(&self.results);
        }
        if self.has_searched {
            return DisplayState::NoData;
        }
        DisplayState::Blank
    }
}

impl Default for SearchSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pincode::INVALID_PINCODE_MESSAGE;

    fn sample_office(name: &str) -> PostOffice {
        PostOffice {
            name: Some(name.to_string()),
            branch_type: Some("Sub Post Office".to_string()),
            delivery_status: Some("Delivery".to_string()),
            circle: Some("Delhi".to_string()),
            ..Default::default()
        }
    }

    fn loaded_session(names: &[&str]) -> SearchSession {
        let mut session = SearchSession::new();
        session.set_input("110001");
        let request = session.submit().unwrap();
        let records = names.iter().map(|n| sample_office(n)).collect();
        assert!(session.resolve(request.generation, Ok(LookupOutcome::Matches(records))));
        session
    }

    #[test]
    fn test_new_session_is_pristine() {
        let session = SearchSession::new();
        assert_eq!(session.phase(), SearchPhase::Idle);
        assert_eq!(session.input(), "");
        assert!(!session.has_searched());
        assert!(session.results().is_empty());
        assert!(session.error_message().is_none());
        assert!(session.detail().is_none());
        assert_eq!(session.display(), DisplayState::Blank);
    }

    #[test]
    fn test_set_input_accepts_digit_prefixes() {
        let mut session = SearchSession::new();
        assert!(session.set_input("1"));
        assert!(session.set_input("110"));
        assert!(session.set_input("110001"));
        assert_eq!(session.input(), "110001");
    }

    #[test]
    fn test_set_input_rejection_leaves_state_untouched() {
        let mut session = loaded_session(&["Connaught Place"]);
        session.set_input("1100");
        let before = session.clone();

        assert!(!session.set_input("1100a"));
        assert!(!session.set_input("1100011"));
        assert!(!session.set_input("11 00"));
        assert_eq!(session, before);
    }

    #[test]
    fn test_set_input_clears_error_message() {
        let mut session = SearchSession::new();
        session.set_input("123");
        session.submit();
        assert!(session.error_message().is_some());

        session.set_input("1234");
        assert!(session.error_message().is_none());
    }

    #[test]
    fn test_invalid_verdict_withdrawn_on_edit() {
        let mut session = SearchSession::new();
        session.set_input("12");
        session.submit();
        assert_eq!(session.phase(), SearchPhase::Invalid);

        session.set_input("123");
        assert_eq!(session.phase(), SearchPhase::Idle);
        assert_eq!(session.display(), DisplayState::Blank);
    }

    #[test]
    fn test_submit_with_short_input_is_invalid() {
        let mut session = SearchSession::new();
        session.set_input("11000");

        assert!(session.submit().is_none());
        assert_eq!(session.phase(), SearchPhase::Invalid);
        assert_eq!(session.error_message(), Some(INVALID_PINCODE_MESSAGE));
        assert!(session.results().is_empty());
        assert!(!session.has_searched());
    }

    #[test]
    fn test_submit_with_empty_input_is_invalid() {
        let mut session = SearchSession::new();
        assert!(session.submit().is_none());
        assert_eq!(session.phase(), SearchPhase::Invalid);
    }

    #[test]
    fn test_invalid_submit_clears_prior_results() {
        let mut session = loaded_session(&["Connaught Place"]);
        session.set_input("1100");

        session.submit();
        assert_eq!(session.phase(), SearchPhase::Invalid);
        assert!(session.results().is_empty());
    }

    #[test]
    fn test_valid_submit_enters_loading_with_request() {
        let mut session = SearchSession::new();
        session.set_input("110001");

        let request = session.submit().unwrap();
        assert_eq!(request.pincode.as_str(), "110001");
        assert_eq!(request.generation, session.generation());
        assert_eq!(session.phase(), SearchPhase::Loading);
        assert!(session.has_searched());
        assert!(session.error_message().is_none());
        assert!(session.results().is_empty());
        assert_eq!(session.display(), DisplayState::Loading);
    }

    #[test]
    fn test_each_valid_submit_bumps_generation() {
        let mut session = SearchSession::new();
        session.set_input("110001");
        let first = session.submit().unwrap();
        let second = session.submit().unwrap();
        assert_eq!(second.generation, first.generation + 1);
    }

    #[test]
    fn test_resolve_with_matches_enters_success() {
        let mut session = SearchSession::new();
        session.set_input("110001");
        let request = session.submit().unwrap();

        let records = vec![sample_office("Connaught Place"), sample_office("Baroda House")];
        assert!(session.resolve(request.generation, Ok(LookupOutcome::Matches(records))));
        assert_eq!(session.phase(), SearchPhase::Success);
        assert_eq!(session.results().len(), 2);
        assert!(session.error_message().is_none());
        match session.display() {
            DisplayState::Results(records) => assert_eq!(records.len(), 2),
            other => panic!("Expected results display, got {:?}", other),
        }
    }

    #[test]
    fn test_resolve_with_no_matches_enters_empty() {
        let mut session = SearchSession::new();
        session.set_input("999999");
        let request = session.submit().unwrap();

        assert!(session.resolve(request.generation, Ok(LookupOutcome::NoMatches)));
        assert_eq!(session.phase(), SearchPhase::Empty);
        assert!(session.results().is_empty());
        assert_eq!(session.error_message(), Some(NO_DATA_MESSAGE));
        assert_eq!(session.display(), DisplayState::ErrorBanner(NO_DATA_MESSAGE));
    }

    #[test]
    fn test_resolve_with_failure_enters_error() {
        let mut session = SearchSession::new();
        session.set_input("110001");
        let request = session.submit().unwrap();

        let failure = PinseekError::NetworkError("connection refused".to_string());
        assert!(session.resolve(request.generation, Err(failure)));
        assert_eq!(session.phase(), SearchPhase::Error);
        assert!(session.results().is_empty());
        assert_eq!(
            session.error_message(),
            Some("Lookup request failed: connection refused")
        );
    }

    #[test]
    fn test_results_stay_empty_through_failure() {
        let mut session = loaded_session(&["Connaught Place"]);
        let request = session.submit().unwrap();

        session.resolve(
            request.generation,
            Err(PinseekError::NetworkError("timed out".to_string())),
        );
        assert!(session.results().is_empty());
    }

    #[test]
    fn test_stale_resolution_after_reset_is_dropped() {
        let mut session = SearchSession::new();
        session.set_input("110001");
        let request = session.submit().unwrap();

        session.reset();
        let records = vec![sample_office("Connaught Place")];
        assert!(!session.resolve(request.generation, Ok(LookupOutcome::Matches(records))));
        assert_eq!(session.phase(), SearchPhase::Idle);
        assert!(session.results().is_empty());
        assert!(!session.has_searched());
    }

    #[test]
    fn test_stale_resolution_after_resubmit_is_dropped() {
        let mut session = SearchSession::new();
        session.set_input("110001");
        let first = session.submit().unwrap();
        session.set_input("560001");
        let second = session.submit().unwrap();

        // The older response loses the race
        let stale = vec![sample_office("Connaught Place")];
        assert!(!session.resolve(first.generation, Ok(LookupOutcome::Matches(stale))));
        assert_eq!(session.phase(), SearchPhase::Loading);

        let fresh = vec![sample_office("Bangalore GPO")];
        assert!(session.resolve(second.generation, Ok(LookupOutcome::Matches(fresh))));
        assert_eq!(session.phase(), SearchPhase::Success);
        assert_eq!(session.results()[0].display_name(), "Bangalore GPO");
    }

    #[test]
    fn test_in_flight_response_survives_invalid_resubmit() {
        // An invalid submit does not bump the generation, so a response to
        // the still-current request lands and replaces the invalid verdict.
        let mut session = SearchSession::new();
        session.set_input("110001");
        let request = session.submit().unwrap();
        session.set_input("1100");
        session.submit();
        assert_eq!(session.phase(), SearchPhase::Invalid);

        let records = vec![sample_office("Connaught Place")];
        assert!(session.resolve(request.generation, Ok(LookupOutcome::Matches(records))));
        assert_eq!(session.phase(), SearchPhase::Success);
        assert_eq!(session.results().len(), 1);
        assert!(session.error_message().is_none());
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let mut session = loaded_session(&["Connaught Place"]);
        session.select_record(0);
        assert!(session.detail().is_some());

        session.reset();
        assert_eq!(session.phase(), SearchPhase::Idle);
        assert_eq!(session.input(), "");
        assert!(session.results().is_empty());
        assert!(session.error_message().is_none());
        assert!(!session.has_searched());
        assert!(session.detail().is_none());
        assert_eq!(session.display(), DisplayState::Blank);
    }

    #[test]
    fn test_reset_from_error_state() {
        let mut session = SearchSession::new();
        session.set_input("110001");
        let request = session.submit().unwrap();
        session.resolve(
            request.generation,
            Err(PinseekError::NetworkError("boom".to_string())),
        );

        session.reset();
        assert_eq!(session.phase(), SearchPhase::Idle);
        assert!(session.error_message().is_none());
    }

    #[test]
    fn test_select_record_opens_detail() {
        let mut session = loaded_session(&["Connaught Place", "Baroda House"]);

        assert!(session.select_record(1));
        assert_eq!(session.detail().unwrap().display_name(), "Baroda House");

        session.dismiss_detail();
        assert!(session.detail().is_none());
    }

    #[test]
    fn test_select_record_out_of_bounds_is_noop() {
        let mut session = loaded_session(&["Connaught Place"]);
        assert!(!session.select_record(5));
        assert!(session.detail().is_none());
    }

    #[test]
    fn test_no_data_banner_survives_input_edit() {
        // Editing the input clears the error message, but the completed
        // empty search keeps showing its no-data banner.
        let mut session = SearchSession::new();
        session.set_input("999999");
        let request = session.submit().unwrap();
        session.resolve(request.generation, Ok(LookupOutcome::NoMatches));
        assert_eq!(session.display(), DisplayState::ErrorBanner(NO_DATA_MESSAGE));

        session.set_input("9999");
        assert_eq!(session.phase(), SearchPhase::Empty);
        assert!(session.error_message().is_none());
        assert_eq!(session.display(), DisplayState::NoData);
    }

    #[test]
    fn test_error_banner_falls_back_to_no_data_after_edit() {
        let mut session = SearchSession::new();
        session.set_input("110001");
        let request = session.submit().unwrap();
        session.resolve(
            request.generation,
            Err(PinseekError::NetworkError("boom".to_string())),
        );
        assert!(matches!(session.display(), DisplayState::ErrorBanner(_)));

        session.set_input("11000");
        assert_eq!(session.phase(), SearchPhase::Error);
        assert_eq!(session.display(), DisplayState::NoData);
    }

    #[test]
    fn test_results_persist_through_input_edit() {
        let mut session = loaded_session(&["Connaught Place"]);
        session.set_input("5600");

        assert_eq!(session.phase(), SearchPhase::Success);
        match session.display() {
            DisplayState::Results(records) => assert_eq!(records.len(), 1),
            other => panic!("Expected results display, got {:?}", other),
        }
    }

    #[test]
    fn test_results_empty_whenever_error_is_set() {
        // Holds across every path that sets a message
        let mut session = SearchSession::new();
        session.set_input("12");
        session.submit();
        assert!(session.error_message().is_some() && session.results().is_empty());

        let mut session = loaded_session(&["Connaught Place"]);
        let request = session.submit().unwrap();
        session.resolve(request.generation, Ok(LookupOutcome::NoMatches));
        assert!(session.error_message().is_some() && session.results().is_empty());

        let mut session = loaded_session(&["Connaught Place"]);
        let request = session.submit().unwrap();
        session.resolve(
            request.generation,
            Err(PinseekError::ParseError("bad json".to_string())),
        );
        assert!(session.error_message().is_some() && session.results().is_empty());
    }
}
