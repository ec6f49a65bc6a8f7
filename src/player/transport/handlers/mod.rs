pub(crate) mod effects;
pub(crate) mod playback;
pub(crate) mod timer;
pub(crate) mod track;

use crate::player::media::{MediaElement, MediaEvent};
use crate::player::transport::commands::TransportCommand;
use crate::player::transport::state::SessionState;

pub(crate) fn dispatch_command<M: MediaElement>(
    state: &mut SessionState<M>,
    command: TransportCommand,
) {
    match command {
        TransportCommand::ChangeTrack(track) => track::handle_change_track(state, track),
        TransportCommand::Play => playback::handle_play(state),
        TransportCommand::Pause => playback::handle_pause(state),
        TransportCommand::TogglePlay => playback::handle_toggle_play(state),
        TransportCommand::Seek { position_seconds } => {
            playback::handle_seek(state, position_seconds)
        }
        TransportCommand::SetPlaybackRate { rate } => playback::handle_set_rate(state, rate),
        TransportCommand::SetVolume { level } => playback::handle_set_volume(state, level),
        TransportCommand::SetMuted(muted) => playback::handle_set_muted(state, muted),
        TransportCommand::SetRepeatMode(mode) => playback::handle_set_repeat_mode(state, mode),
        TransportCommand::SetBandGain { band, gain_db } => {
            effects::handle_set_band_gain(state, band, gain_db)
        }
        TransportCommand::SelectPreset { name } => effects::handle_select_preset(state, &name),
        TransportCommand::ResetEqualizer => effects::handle_reset_equalizer(state),
        TransportCommand::SetSleepTimer { minutes } => {
            timer::handle_set_sleep_timer(state, minutes)
        }
        TransportCommand::CancelSleepTimer => timer::handle_cancel_sleep_timer(state),
        TransportCommand::SetVisualizerVisible(visible) => {
            playback::handle_set_visualizer_visible(state, visible)
        }
        TransportCommand::QueryState(reply) => playback::handle_query_state(state, reply),
        // Shutdown is intercepted by the session loop before dispatch.
        TransportCommand::Shutdown(_) => unreachable!("Shutdown handled by the session loop"),
    }
}

pub(crate) fn dispatch_media_event<M: MediaElement>(
    state: &mut SessionState<M>,
    event: MediaEvent,
) {
    match event {
        MediaEvent::CanPlay => track::handle_media_ready(state),
        MediaEvent::LoadedMetadata { duration } => track::handle_media_metadata(state, duration),
        MediaEvent::TimeUpdate { position } => track::handle_media_tick(state, position),
        MediaEvent::Ended => track::handle_media_ended(state),
    }
}
