use tokio::sync::oneshot;

use crate::player::transport::state::PlaybackSnapshot;
use crate::player::types::{RepeatMode, TrackDescriptor};

/// Everything the host can ask the session loop to do. One variant per
/// operation; the loop applies them in arrival order.
#[derive(Debug)]
pub enum TransportCommand {
    ChangeTrack(TrackDescriptor),
    Play,
    Pause,
    TogglePlay,
    Seek {
        position_seconds: f64,
    },
    SetPlaybackRate {
        rate: f32,
    },
    SetVolume {
        level: f32,
    },
    SetMuted(bool),
    SetRepeatMode(RepeatMode),
    SetBandGain {
        band: usize,
        gain_db: f32,
    },
    SelectPreset {
        name: String,
    },
    ResetEqualizer,
    SetSleepTimer {
        minutes: u64,
    },
    CancelSleepTimer,
    SetVisualizerVisible(bool),
    QueryState(oneshot::Sender<PlaybackSnapshot>),
    Shutdown(oneshot::Sender<()>),
}
