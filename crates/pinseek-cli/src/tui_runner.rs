use anyhow::Result;
use std::io;
use tokio::sync::mpsc;
use tokio::task;

use crossterm::{
    cursor,
    event::{DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use pinseek_core::{LookupClientBox, PinseekConfig, PostalApiClient};
use pinseek_term::application::ui::{destruct_terminal_for_panic, start_loop};
use pinseek_term::domain::models::{Action, Event};
use pinseek_term::domain::services::{ActionsService, AppStateProps};
use ratatui::{backend::CrosstermBackend, Terminal};

/// Put the terminal into raw mode and run the UI loop until it exits.
async fn start_tui(
    props: AppStateProps,
    tx: mpsc::UnboundedSender<Action>,
    rx: mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    let stdout = io::stdout();
    let mut stdout = stdout.lock();

    enable_raw_mode()?;
    crossterm::execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;

    let term_backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(term_backend)?;

    let result = start_loop(&mut terminal, props, tx, rx).await;

    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    )?;

    let _ = crossterm::execute!(io::stdout(), cursor::Show);

    result
}

/// Wire the lookup client and background services to the UI and run it.
pub async fn run_tui(config: PinseekConfig) -> Result<()> {
    std::panic::set_hook(Box::new(|panic_info| {
        destruct_terminal_for_panic();
        better_panic::Settings::auto().create_panic_handler()(panic_info);
    }));

    let lookup_client: LookupClientBox = Box::new(PostalApiClient::with_base_url(
        config.api.base_url.as_str(),
        config.api.timeout(),
    ));

    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();
    let (event_tx, event_rx) = mpsc::unbounded_channel::<Event>();

    let mut background_futures = task::JoinSet::new();
    background_futures
        .spawn(async move { ActionsService::start(lookup_client, event_tx, &mut action_rx).await });

    let props = AppStateProps {
        api_url: config.api.base_url.clone(),
    };

    let ui_future = start_tui(props, action_tx, event_rx);

    let result = tokio::select!(
        res = background_futures.join_next() => res.unwrap().unwrap(),
        res = ui_future => res,
    );

    if result.is_err() {
        destruct_terminal_for_panic();
    }

    result
}
