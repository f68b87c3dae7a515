//! Per-session event loop.
//!
//! All stimuli for one session (transport input, the progress tick,
//! store-call completions) are funneled into a single queue and applied
//! to the state machine strictly in arrival order. Store work runs on its
//! own task and reports back through the same queue, so at most one call
//! is in flight per session and a completion can never race a tick. A
//! completion for a session that already went away fails to enqueue and
//! is discarded.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tracing::debug;

use super::{SessionHandle, SessionId};
use crate::clipboard;
use crate::error::{Error, Result};
use crate::id::PasteId;
use crate::store::{guarded, PasteStore};
use crate::ui::{
    layout, render, Action, InputEvent, Model, Phase, SessionEvent, WorkOutcome, WorkRequest,
};

/// Cadence of the cosmetic progress tick.
const TICK_INTERVAL: Duration = Duration::from_millis(250);

/// Capacity of the merged per-session event queue.
const EVENT_QUEUE: usize = 64;

pub(super) async fn run(
    id: SessionId,
    handle: SessionHandle,
    store: Arc<dyn PasteStore>,
) -> Result<()> {
    let SessionHandle {
        geometry,
        term: _,
        mut input,
        output,
    } = handle;
    let (events_tx, mut events) = mpsc::channel(EVENT_QUEUE);

    // Transport input joins the queue as-is; when the provider drops the
    // stream, a disconnect is synthesized so the loop winds down.
    let forward_tx = events_tx.clone();
    let forward = tokio::spawn(async move {
        while let Some(event) = input.recv().await {
            if forward_tx.send(SessionEvent::Input(event)).await.is_err() {
                return;
            }
        }
        let _ = forward_tx
            .send(SessionEvent::Input(InputEvent::Disconnect))
            .await;
    });

    let tick_tx = events_tx.clone();
    let ticker = tokio::spawn(async move {
        let mut tick = tokio::time::interval(TICK_INTERVAL);
        tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            tick.tick().await;
            if tick_tx.send(SessionEvent::Tick).await.is_err() {
                return;
            }
        }
    });

    let mut model = Model::new(geometry.width, geometry.height);
    let result = drive(id, &mut model, &mut events, &events_tx, &output, &store).await;

    forward.abort();
    ticker.abort();
    result
}

async fn drive(
    id: SessionId,
    model: &mut Model,
    events: &mut mpsc::Receiver<SessionEvent>,
    events_tx: &mpsc::Sender<SessionEvent>,
    output: &mpsc::Sender<Vec<u8>>,
    store: &Arc<dyn PasteStore>,
) -> Result<()> {
    if paint(output, model).await.is_err() {
        return Ok(());
    }

    while let Some(event) = events.recv().await {
        // Ticks outside `Working` change nothing; skip the repaint.
        let repaint = !matches!(event, SessionEvent::Tick)
            || matches!(model.phase(), Phase::Working { .. });

        match model.update(event) {
            Action::None => {}
            Action::Quit => {
                debug!(session = %id, "quit requested");
                return Ok(());
            }
            Action::Start(request) => start_work(
                request,
                Arc::clone(store),
                events_tx.clone(),
                output.clone(),
            ),
        }

        if repaint && paint(output, model).await.is_err() {
            // The peer is gone; nothing left to drive.
            return Ok(());
        }
    }
    Ok(())
}

async fn paint(output: &mpsc::Sender<Vec<u8>>, model: &Model) -> Result<()> {
    let frame = render(model);
    let bytes = layout(&frame, model.width(), model.height());
    output.send(bytes).await.map_err(|_| Error::SessionClosed)
}

/// Run one store workflow in the background and feed the outcome back
/// into the session's event queue.
fn start_work(
    request: WorkRequest,
    store: Arc<dyn PasteStore>,
    events: mpsc::Sender<SessionEvent>,
    output: mpsc::Sender<Vec<u8>>,
) {
    tokio::spawn(async move {
        let outcome = perform(request, store.as_ref(), &output).await;
        // If the session ended while the call was in flight, the queue is
        // gone and the outcome is dropped on the floor.
        let _ = events.send(SessionEvent::WorkDone(outcome)).await;
    });
}

async fn perform(
    request: WorkRequest,
    store: &dyn PasteStore,
    output: &mpsc::Sender<Vec<u8>>,
) -> WorkOutcome {
    match request {
        WorkRequest::Create { content } => {
            let id = match PasteId::generate() {
                Ok(id) => id,
                Err(e) => return WorkOutcome::Failed(e.to_string()),
            };
            match guarded(store.set(&id, &content)).await {
                Ok(()) => WorkOutcome::Created(id),
                Err(e) => WorkOutcome::Failed(e.to_string()),
            }
        }
        WorkRequest::Retrieve { input } => {
            let id = match input.trim().parse::<PasteId>() {
                Ok(id) => id,
                // A malformed id can never name a stored paste.
                Err(_) => return WorkOutcome::NotFound,
            };
            if let Err(e) = guarded(store.sync()).await {
                return WorkOutcome::Failed(e.to_string());
            }
            match guarded(store.get(&id)).await {
                Ok(content) => {
                    clipboard::deliver(output, &content).await;
                    WorkOutcome::Copied
                }
                Err(Error::PasteNotFound(_)) => WorkOutcome::NotFound,
                Err(e) => WorkOutcome::Failed(e.to_string()),
            }
        }
    }
}
