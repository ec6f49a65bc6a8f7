use crate::player::media::MediaElement;
use crate::player::transport::events::emit_equalizer_event;
use crate::player::transport::state::SessionState;

/// Stores one clamped band gain and pushes it into the live filter for that
/// band only. State update and propagation happen in the same dispatch, so
/// no block routed afterwards sees stale gains.
pub(crate) fn handle_set_band_gain<M: MediaElement>(
    state: &mut SessionState<M>,
    band: usize,
    gain_db: f32,
) {
    match state.equalizer.set_gain(band, gain_db) {
        Ok(clamped) => {
            if let Err(e) = state.graph.tune_band(band, clamped) {
                log::error!("Transport: Failed to tune band {}: {}", band, e);
            }
            emit_equalizer_event(&state.events, &state.equalizer);
        }
        Err(e) => log::warn!("Transport: Rejected gain update: {}", e),
    }
}

pub(crate) fn handle_select_preset<M: MediaElement>(state: &mut SessionState<M>, name: &str) {
    // Unknown names are rejected inside the equalizer state; nothing to
    // propagate or emit in that case.
    if let Some(gains) = state.equalizer.select_preset(name) {
        if let Err(e) = state.graph.tune_all(&gains) {
            log::error!("Transport: Failed to apply preset '{}': {}", name, e);
        }
        emit_equalizer_event(&state.events, &state.equalizer);
    }
}

pub(crate) fn handle_reset_equalizer<M: MediaElement>(state: &mut SessionState<M>) {
    let gains = state.equalizer.reset();
    if let Err(e) = state.graph.tune_all(&gains) {
        log::error!("Transport: Failed to reset equalizer: {}", e);
    }
    emit_equalizer_event(&state.events, &state.equalizer);
}
