use std::time::Duration;

use tokio::time::Instant;

use crate::player::config::LOAD_SAFETY_TIMEOUT_MS;
use crate::player::graph::GraphBuildOutcome;
use crate::player::media::MediaElement;
use crate::player::transport::events::{
    emit_duration_event, emit_loading_event, emit_tick_event, emit_track_ended_event,
};
use crate::player::transport::handlers::playback;
use crate::player::transport::state::{SessionState, TransportPhase};
use crate::player::types::{RepeatMode, TrackDescriptor};

pub(crate) fn handle_change_track<M: MediaElement>(
    state: &mut SessionState<M>,
    track: TrackDescriptor,
) {
    log::info!("Transport: Loading track '{}' ({}).", track.title, track.id);

    // Any readiness still in flight belongs to the previous track; dropping
    // the ready flag and replacing the deadline cancels both.
    state.ready_to_play = false;
    state.current_time = 0.0;
    state.duration = None;
    state.set_phase(TransportPhase::Loading);

    state.media.set_source(&track.source_url);
    state.media.load();
    // Rate and volume persist across track changes within the session.
    state.media.set_playback_rate(state.playback_rate);
    state.media.set_volume(state.effective_volume());
    state.current_track = Some(track);

    state.loading_indicator = true;
    state.loading_deadline =
        Some(Instant::now() + Duration::from_millis(LOAD_SAFETY_TIMEOUT_MS));
    emit_loading_event(&state.events, true);
}

pub(crate) fn handle_media_ready<M: MediaElement>(state: &mut SessionState<M>) {
    state.ready_to_play = true;
    state.loading_deadline = None;
    if state.loading_indicator {
        state.loading_indicator = false;
        emit_loading_event(&state.events, false);
    }

    // The graph exists from first readiness onward; hand-tuned gains from
    // before that moment are applied in the same step.
    if state.graph.ensure_built() == GraphBuildOutcome::Built {
        if let Err(e) = state.graph.tune_all(state.equalizer.gains()) {
            log::error!("Transport: Failed to apply gains to fresh graph: {}", e);
        }
    }

    if matches!(state.phase, TransportPhase::Idle | TransportPhase::Loading) {
        state.set_phase(TransportPhase::Ready);
    }

    if state.desired_playing && state.phase != TransportPhase::Playing {
        log::debug!("Transport: Readiness arrived with play latched; starting playback.");
        playback::issue_play(state);
    }
}

/// The 8-second fallback. Clears the spinner, never starts playback, and
/// leaves the latched intent alone for a late readiness signal.
pub(crate) fn handle_loading_timeout<M: MediaElement>(state: &mut SessionState<M>) {
    log::warn!(
        "Transport: Readiness did not arrive within {} ms; clearing loading indicator.",
        LOAD_SAFETY_TIMEOUT_MS
    );
    state.loading_deadline = None;
    if state.loading_indicator {
        state.loading_indicator = false;
        emit_loading_event(&state.events, false);
    }
}

pub(crate) fn handle_media_metadata<M: MediaElement>(state: &mut SessionState<M>, duration: f64) {
    state.duration = Some(duration);
    emit_duration_event(&state.events, duration);
}

pub(crate) fn handle_media_tick<M: MediaElement>(state: &mut SessionState<M>, position: f64) {
    state.current_time = position;
    emit_tick_event(&state.events, position);
}

pub(crate) fn handle_media_ended<M: MediaElement>(state: &mut SessionState<M>) {
    if state.repeat_mode == RepeatMode::One {
        log::debug!("Transport: Track ended with repeat-one active; rewinding in place.");
        // Same track, same graph: rewind and resume without a Loading pass.
        state.media.set_current_time(0.0);
        state.current_time = 0.0;
        emit_tick_event(&state.events, 0.0);
        if let Err(e) = state.media.play() {
            log::error!("Transport: Replay after repeat-one failed: {}", e);
            state.set_phase(TransportPhase::Paused);
        }
        return;
    }

    let track_id = state
        .current_track
        .as_ref()
        .map(|t| t.id.clone())
        .unwrap_or_default();
    log::info!("Transport: Track '{}' ended.", track_id);
    if let Some(duration) = state.duration {
        state.current_time = duration;
    }
    // The playlist collaborator owns what happens next; the latched intent
    // survives so a queued track change resumes playback.
    state.set_phase(TransportPhase::Ready);
    emit_track_ended_event(&state.events, &track_id);
}
