use pinseek_core::LookupOutcome;
use pinseek_core::PinseekError;

#[derive(Debug)]
pub enum Event {
    KeyboardCharInput(char),
    KeyboardBackspace,
    KeyboardEnter,
    KeyboardEsc,
    KeyboardHome,
    KeyboardCTRLC,
    KeyboardPaste(String),
    LookupResolved {
        generation: u64,
        outcome: Result<LookupOutcome, PinseekError>,
    },
    UITick,
    UIScrollDown,
    UIScrollUp,
}
