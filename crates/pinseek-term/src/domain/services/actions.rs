use std::sync::Arc;

use anyhow::Result;
use tokio::sync::mpsc;

use crate::domain::models::Action;
use crate::domain::models::Event;
use pinseek_core::LookupClientBox;

/// Owns the lookup client and executes actions posted by the UI loop.
///
/// Each lookup runs in its own task so a slow response never blocks the
/// channel. Workers report back through [`Event::LookupResolved`], carrying
/// the generation the request was issued under; the session decides on
/// arrival whether the response is still current.
pub struct ActionsService {}

impl ActionsService {
    pub async fn start(
        lookup_client: LookupClientBox,
        event_tx: mpsc::UnboundedSender<Event>,
        rx: &mut mpsc::UnboundedReceiver<Action>,
    ) -> Result<()> {
        let lookup_client_arc = Arc::new(lookup_client);

        loop {
            if let Some(action) = rx.recv().await {
                match action {
                    Action::Lookup(request) => {
                        let client_worker = lookup_client_arc.clone();
                        let worker_event_tx = event_tx.clone();
                        tokio::spawn(async move {
                            let outcome = client_worker.lookup(&request.pincode).await;
                            // A failed send means the UI is already gone.
                            let _ = worker_event_tx.send(Event::LookupResolved {
                                generation: request.generation,
                                outcome,
                            });
                        });
                    }
                }
            }
        }
    }
}
