use std::time::Duration;

use tokio::time::Instant;

use crate::player::media::MediaElement;
use crate::player::transport::events::emit_sleep_timer_event;
use crate::player::transport::handlers::playback;
use crate::player::transport::state::SessionState;

/// Schedules the sleep deadline. Exactly one deadline is ever pending: a
/// new schedule replaces the old one.
pub(crate) fn handle_set_sleep_timer<M: MediaElement>(state: &mut SessionState<M>, minutes: u64) {
    if state.sleep_deadline.is_some() {
        log::debug!("Transport: Replacing pending sleep timer.");
    }
    let total = Duration::from_secs(minutes * 60);
    state.sleep_deadline = Some(Instant::now() + total);
    emit_sleep_timer_event(&state.events, Some(total.as_secs()));
    log::info!("Transport: Sleep timer set for {} minute(s).", minutes);
}

pub(crate) fn handle_cancel_sleep_timer<M: MediaElement>(state: &mut SessionState<M>) {
    if state.sleep_deadline.take().is_some() {
        emit_sleep_timer_event(&state.events, None);
        log::info!("Transport: Sleep timer cancelled.");
    }
}

/// Deadline reached: issue a pause intent and clear the timer.
pub(crate) fn handle_sleep_timer_fired<M: MediaElement>(state: &mut SessionState<M>) {
    log::info!("Transport: Sleep timer fired; pausing playback.");
    state.sleep_deadline = None;
    emit_sleep_timer_event(&state.events, None);
    playback::handle_pause(state);
}
