//! Scheduler loop
//!
//! One long-lived task per session. Each cycle promotes the head of the
//! queue into the current slot, resolves it, hands it to the transport, and
//! waits for the completion signal before applying repeat policy. The only
//! blocking points are the idle poll and the completion wait; queue edits
//! from other tasks proceed freely in between.

use crate::error::Result;
use crate::session::Session;
use crate::transport::TrackDone;
use aria_core::RepeatMode;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// How often the loop re-checks transport readiness and queue contents
/// while idle. Bounds worst-case start latency for a newly enqueued track.
pub(crate) const IDLE_POLL: Duration = Duration::from_millis(500);

/// Delay after a failed cycle before the loop tries again
const ERROR_BACKOFF: Duration = Duration::from_secs(1);

/// Outcome of one scheduler cycle
enum Cycle {
    /// No transport, or nothing to play
    Idle,
    /// A track completed (or the cycle was dropped because the current slot
    /// changed underneath it)
    Completed,
    /// The track could not be started and was dropped through the
    /// completion path
    Skipped,
}

/// Run the scheduler loop until the session task is aborted
pub(crate) async fn run(session: Arc<Session>) {
    info!(session = %session.id(), "player loop started");
    loop {
        match cycle(&session).await {
            Ok(Cycle::Completed) => {}
            // A skipped track waits out a poll as well, so an unresolvable
            // track under `track` repeat cannot spin the loop hot.
            Ok(Cycle::Idle | Cycle::Skipped) => tokio::time::sleep(IDLE_POLL).await,
            Err(err) => {
                warn!(session = %session.id(), error = %err, "player cycle failed");
                tokio::time::sleep(ERROR_BACKOFF).await;
            }
        }
    }
}

async fn cycle(session: &Arc<Session>) -> Result<Cycle> {
    // Promote the next track into the current slot under the guard.
    let (track, transport, volume) = {
        let mut state = session.inner.lock().await;
        let Some(transport) = state.transport.clone() else {
            return Ok(Cycle::Idle);
        };
        let track = match state.current.clone() {
            Some(track) => track,
            None => match state.queue.pop_front() {
                Some(track) => {
                    state.current = Some(track.clone());
                    track
                }
                None => return Ok(Cycle::Idle),
            },
        };
        (track, transport, state.volume)
    };

    // Loading: resolve the locator into a streamable handle. Failure means
    // the track is unavailable; it finishes immediately so a broken track
    // never stalls the queue.
    let source = match session.resolver.resolve(&track.source_url).await {
        Ok(Some(source)) => source,
        Ok(None) => {
            warn!(
                session = %session.id(),
                title = track.display_title(),
                "source unavailable, skipping"
            );
            finish_track(session).await;
            return Ok(Cycle::Skipped);
        }
        Err(err) => {
            warn!(
                session = %session.id(),
                title = track.display_title(),
                error = %err,
                "resolution failed, skipping"
            );
            finish_track(session).await;
            return Ok(Cycle::Skipped);
        }
    };

    // A stop or teardown may have cleared the slot while we were resolving;
    // starting the transport now would resurrect a track the user ended.
    {
        let state = session.inner.lock().await;
        if state.current.as_ref() != Some(&track) {
            debug!(session = %session.id(), "current slot changed during load, dropping cycle");
            return Ok(Cycle::Completed);
        }
    }

    let (done, finished) = TrackDone::new();
    if let Err(err) = transport.play(&source, volume, done).await {
        warn!(
            session = %session.id(),
            title = track.display_title(),
            error = %err,
            "transport rejected track, skipping"
        );
        finish_track(session).await;
        return Ok(Cycle::Skipped);
    }
    debug!(session = %session.id(), title = track.display_title(), "track started");

    // Awaiting-completion: the transport raises the signal on natural end,
    // stop, or skip. A dropped signal (transport died) counts as completion.
    let _ = finished.await;

    finish_track(session).await;
    Ok(Cycle::Completed)
}

/// Post-completion dispatch: apply repeat policy to the current slot
///
/// Reads the slot rather than trusting the cycle's local copy, because a
/// concurrent `stop` may already have cleared it.
async fn finish_track(session: &Arc<Session>) {
    let mut state = session.inner.lock().await;
    match state.repeat {
        // Slot retained; the next cycle replays the same track.
        RepeatMode::Track => {}
        RepeatMode::Queue => {
            if let Some(track) = state.current.take() {
                state.queue.push_back(track);
            }
        }
        RepeatMode::Off | RepeatMode::Auto => {
            state.current = None;
        }
    }
}
