//! Telemetry batching with bounded retry.
//!
//! Events accumulate locally and leave in batches: when the buffer hits
//! the per-request cap, on a fixed interval, at game over, and on
//! teardown. A failed submission re-queues only the most recent
//! `retry_tail` events of the batch, ahead of anything that accumulated
//! meanwhile; older events are accepted as lost.

use game_core::{GameEvent, GameEventKind};
use proto::{TelemetryEvent, TelemetryRequest};

use crate::api::ApiClient;

/// How many events of a failed batch survive for the next attempt.
/// An arbitrary but deliberate bound; tune via [`TelemetryBuffer::with_retry_tail`].
pub const DEFAULT_RETRY_TAIL: usize = 50;

/// Append-only event buffer, drained on every flush
#[derive(Debug, Clone)]
pub struct TelemetryBuffer {
    events: Vec<TelemetryEvent>,
    max_per_request: usize,
    retry_tail: usize,
}

impl TelemetryBuffer {
    pub fn new(max_per_request: usize) -> Self {
        Self::with_retry_tail(max_per_request, DEFAULT_RETRY_TAIL)
    }

    pub fn with_retry_tail(max_per_request: usize, retry_tail: usize) -> Self {
        Self {
            events: Vec::new(),
            max_per_request: max_per_request.max(1),
            retry_tail,
        }
    }

    pub fn push(&mut self, event: TelemetryEvent) {
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Whether the buffer reached the per-request cap
    pub fn is_full(&self) -> bool {
        self.events.len() >= self.max_per_request
    }

    pub fn max_per_request(&self) -> usize {
        self.max_per_request
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Take everything, leaving the buffer empty
    pub fn drain(&mut self) -> Vec<TelemetryEvent> {
        std::mem::take(&mut self.events)
    }

    /// Put the tail of a failed batch back, ahead of newly accumulated events
    pub fn requeue_tail(&mut self, mut batch: Vec<TelemetryEvent>) {
        let keep_from = batch.len().saturating_sub(self.retry_tail);
        let mut restored = batch.split_off(keep_from);
        restored.append(&mut self.events);
        self.events = restored;
    }
}

/// Drain the buffer and ship one batch.
///
/// The buffer is emptied before the transport is invoked. Without a
/// session id the batch is dropped outright - anonymous play records
/// nothing. At most `max_per_request` events go on the wire; a failed
/// send restores the batch tail for the next flush.
pub fn flush(api: &dyn ApiClient, session_id: Option<&str>, buffer: &mut TelemetryBuffer) {
    if buffer.is_empty() {
        return;
    }
    let batch = buffer.drain();

    let Some(session_id) = session_id else {
        log::debug!("no session, dropping {} telemetry events", batch.len());
        return;
    };

    let events: Vec<TelemetryEvent> = batch.iter().take(buffer.max_per_request()).cloned().collect();
    let request = TelemetryRequest {
        session_id: session_id.to_string(),
        events,
    };

    match api.send_events(&request) {
        Ok(_) => {}
        Err(err) => {
            log::warn!("telemetry submission failed, re-queueing tail: {err}");
            buffer.requeue_tail(batch);
        }
    }
}

/// Map an engine event onto the wire shape
pub fn wire_event(event: &GameEvent) -> TelemetryEvent {
    match event.kind {
        GameEventKind::BallHit(kind) => TelemetryEvent {
            t: event.t_ms,
            event_type: "ball_hit".into(),
            ball_id: Some(kind.wire_name().into()),
            kind: Some(kind.wire_name().into()),
            hit: Some(true),
        },
        GameEventKind::BallMissed(kind) => TelemetryEvent {
            t: event.t_ms,
            event_type: "ball_missed".into(),
            ball_id: Some(kind.wire_name().into()),
            kind: Some(kind.wire_name().into()),
            hit: Some(false),
        },
        GameEventKind::Miss => TelemetryEvent {
            t: event.t_ms,
            event_type: "miss".into(),
            ball_id: None,
            kind: None,
            hit: Some(false),
        },
        GameEventKind::LifeLost => TelemetryEvent {
            t: event.t_ms,
            event_type: "life_lost".into(),
            ball_id: None,
            kind: None,
            hit: Some(false),
        },
    }
}
