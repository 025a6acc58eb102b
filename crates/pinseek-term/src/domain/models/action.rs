use pinseek_core::LookupRequest;

/// Work the UI asks the background service to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Lookup(LookupRequest),
}
