use tokio::sync::oneshot;

use crate::player::config::{PLAYBACK_RATE_MAX, PLAYBACK_RATE_MIN};
use crate::player::media::MediaElement;
use crate::player::transport::events::{
    emit_error_event, emit_rate_event, emit_tick_event, emit_volume_event,
};
use crate::player::transport::state::{PlaybackSnapshot, SessionState, TransportPhase};
use crate::player::types::RepeatMode;

pub(crate) fn handle_play<M: MediaElement>(state: &mut SessionState<M>) {
    state.desired_playing = true;
    if state.ready_to_play {
        issue_play(state);
    } else {
        log::debug!("Transport: Play requested before readiness; latching intent.");
    }
}

/// Asks the media element to start. Rejection (platform gesture policies)
/// is logged and absorbed: the session parks in Paused and the next
/// user-initiated play tries again.
pub(crate) fn issue_play<M: MediaElement>(state: &mut SessionState<M>) {
    state.media.set_playback_rate(state.playback_rate);
    match state.media.play() {
        Ok(()) => state.set_phase(TransportPhase::Playing),
        Err(e) => {
            log::error!("Transport: play() rejected: {}. Remaining paused.", e);
            emit_error_event(&state.events, &e.to_string());
            state.desired_playing = false;
            state.set_phase(TransportPhase::Paused);
        }
    }
}

pub(crate) fn handle_pause<M: MediaElement>(state: &mut SessionState<M>) {
    state.desired_playing = false;
    state.media.pause();
    if state.ready_to_play {
        state.set_phase(TransportPhase::Paused);
    }
    // Not ready: the cleared latch is all there is to do; the phase stays
    // Loading until readiness or the safety timeout.
}

pub(crate) fn handle_toggle_play<M: MediaElement>(state: &mut SessionState<M>) {
    if state.desired_playing {
        handle_pause(state);
    } else {
        handle_play(state);
    }
}

pub(crate) fn handle_seek<M: MediaElement>(state: &mut SessionState<M>, position_seconds: f64) {
    let position = if let Some(duration) = state.duration {
        position_seconds.clamp(0.0, duration)
    } else {
        position_seconds.max(0.0)
    };
    state.media.set_current_time(position);
    state.current_time = position;
    emit_tick_event(&state.events, position);
}

pub(crate) fn handle_set_rate<M: MediaElement>(state: &mut SessionState<M>, rate: f32) {
    let clamped = rate.clamp(PLAYBACK_RATE_MIN, PLAYBACK_RATE_MAX);
    state.playback_rate = clamped;
    state.media.set_playback_rate(clamped);
    emit_rate_event(&state.events, clamped);
}

pub(crate) fn handle_set_volume<M: MediaElement>(state: &mut SessionState<M>, level: f32) {
    state.volume = level.clamp(0.0, 1.0);
    state.media.set_volume(state.effective_volume());
    emit_volume_event(&state.events, state.volume, state.muted);
}

pub(crate) fn handle_set_muted<M: MediaElement>(state: &mut SessionState<M>, muted: bool) {
    state.muted = muted;
    state.media.set_volume(state.effective_volume());
    emit_volume_event(&state.events, state.volume, state.muted);
}

pub(crate) fn handle_set_repeat_mode<M: MediaElement>(
    state: &mut SessionState<M>,
    mode: RepeatMode,
) {
    state.repeat_mode = mode;
}

pub(crate) fn handle_set_visualizer_visible<M: MediaElement>(
    state: &mut SessionState<M>,
    visible: bool,
) {
    state.visualizer_visible = visible;
    state.update_sampler();
}

pub(crate) fn handle_query_state<M: MediaElement>(
    state: &SessionState<M>,
    reply: oneshot::Sender<PlaybackSnapshot>,
) {
    if reply.send(state.snapshot()).is_err() {
        log::warn!("Transport: State query dropped before the reply was read.");
    }
}
