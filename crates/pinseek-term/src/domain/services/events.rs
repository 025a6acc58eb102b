use anyhow::Result;
use crossterm::event::Event as CrosstermEvent;
use crossterm::event::EventStream;
use futures::StreamExt;
use tokio::sync::mpsc;
use tokio::time;

use crate::domain::models::Event;

/// Multiplexes terminal input, events posted by background workers, and a
/// periodic tick into a single stream for the UI loop.
pub struct EventsService {
    crossterm_events: EventStream,
    events: mpsc::UnboundedReceiver<Event>,
}

impl EventsService {
    pub fn new(events: mpsc::UnboundedReceiver<Event>) -> EventsService {
        return EventsService {
            crossterm_events: EventStream::new(),
            events,
        };
    }

    fn handle_crossterm(&self, event: CrosstermEvent) -> Option<Event> {
        match event {
            CrosstermEvent::Paste(text) => {
                return Some(Event::KeyboardPaste(text));
            }
            CrosstermEvent::Mouse(mouseevent) => match mouseevent.kind {
                crossterm::event::MouseEventKind::ScrollUp => {
                    return Some(Event::UIScrollUp);
                }
                crossterm::event::MouseEventKind::ScrollDown => {
                    return Some(Event::UIScrollDown);
                }
                _ => {
                    return None;
                }
            },
            CrosstermEvent::Key(keyevent) => {
                let ctrl = keyevent
                    .modifiers
                    .contains(crossterm::event::KeyModifiers::CONTROL);

                match keyevent.code {
                    crossterm::event::KeyCode::Char('c') if ctrl => {
                        return Some(Event::KeyboardCTRLC);
                    }
                    // Ctrl+H doubles as the home shortcut named in the footer.
                    crossterm::event::KeyCode::Char('h') if ctrl => {
                        return Some(Event::KeyboardHome);
                    }
                    crossterm::event::KeyCode::Char(c) => {
                        return Some(Event::KeyboardCharInput(c));
                    }
                    crossterm::event::KeyCode::Backspace => {
                        return Some(Event::KeyboardBackspace);
                    }
                    crossterm::event::KeyCode::Enter => {
                        return Some(Event::KeyboardEnter);
                    }
                    crossterm::event::KeyCode::Esc => {
                        return Some(Event::KeyboardEsc);
                    }
                    crossterm::event::KeyCode::Home => {
                        return Some(Event::KeyboardHome);
                    }
                    crossterm::event::KeyCode::Up => {
                        return Some(Event::UIScrollUp);
                    }
                    crossterm::event::KeyCode::Down => {
                        return Some(Event::UIScrollDown);
                    }
                    _ => {
                        return None;
                    }
                }
            }
            _ => return None,
        }
    }

    pub async fn next(&mut self) -> Result<Event> {
        loop {
            let evt = tokio::select! {
                event = self.events.recv() => event,
                event = self.crossterm_events.next() => match event {
                    Some(Ok(input)) => self.handle_crossterm(input),
                    Some(Err(_)) => None,
                    None => None
                },
                _ = time::sleep(time::Duration::from_millis(500)) => Some(Event::UITick)
            };

            if let Some(event) = evt {
                return Ok(event);
            }
        }
    }
}
