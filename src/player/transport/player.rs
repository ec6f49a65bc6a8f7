use tokio::sync::{mpsc, oneshot};

use crate::player::errors::TransportError;
use crate::player::transport::commands::TransportCommand;
use crate::player::transport::state::PlaybackSnapshot;
use crate::player::types::{RepeatMode, TrackDescriptor};

/// Cloneable command handle over the session loop. Every method enqueues
/// one command; the loop applies them in order.
#[derive(Clone)]
pub struct Player {
    commands: mpsc::Sender<TransportCommand>,
}

impl Player {
    pub(crate) fn new(commands: mpsc::Sender<TransportCommand>) -> Self {
        Player { commands }
    }

    pub async fn change_track(&self, track: TrackDescriptor) -> Result<(), TransportError> {
        log::info!("CMD: Change track to '{}' ({}).", track.title, track.id);
        self.send(TransportCommand::ChangeTrack(track)).await
    }

    pub async fn play(&self) -> Result<(), TransportError> {
        log::info!("CMD: Play.");
        self.send(TransportCommand::Play).await
    }

    pub async fn pause(&self) -> Result<(), TransportError> {
        log::info!("CMD: Pause.");
        self.send(TransportCommand::Pause).await
    }

    pub async fn toggle_play(&self) -> Result<(), TransportError> {
        log::info!("CMD: Toggle play/pause.");
        self.send(TransportCommand::TogglePlay).await
    }

    pub async fn seek(&self, position_seconds: f64) -> Result<(), TransportError> {
        log::info!("CMD: Seek to {:.2}s.", position_seconds);
        self.send(TransportCommand::Seek { position_seconds }).await
    }

    pub async fn set_playback_rate(&self, rate: f32) -> Result<(), TransportError> {
        log::info!("CMD: Set playback rate {}.", rate);
        self.send(TransportCommand::SetPlaybackRate { rate }).await
    }

    pub async fn set_volume(&self, level: f32) -> Result<(), TransportError> {
        log::debug!("CMD: Set volume {}.", level);
        self.send(TransportCommand::SetVolume { level }).await
    }

    pub async fn set_muted(&self, muted: bool) -> Result<(), TransportError> {
        log::debug!("CMD: Set muted {}.", muted);
        self.send(TransportCommand::SetMuted(muted)).await
    }

    pub async fn set_repeat_mode(&self, mode: RepeatMode) -> Result<(), TransportError> {
        log::info!("CMD: Set repeat mode {:?}.", mode);
        self.send(TransportCommand::SetRepeatMode(mode)).await
    }

    pub async fn set_band_gain(&self, band: usize, gain_db: f32) -> Result<(), TransportError> {
        log::debug!("CMD: Set band {} gain {} dB.", band, gain_db);
        self.send(TransportCommand::SetBandGain { band, gain_db })
            .await
    }

    pub async fn select_preset(&self, name: &str) -> Result<(), TransportError> {
        log::info!("CMD: Select equalizer preset '{}'.", name);
        self.send(TransportCommand::SelectPreset {
            name: name.to_string(),
        })
        .await
    }

    pub async fn reset_equalizer(&self) -> Result<(), TransportError> {
        log::info!("CMD: Reset equalizer.");
        self.send(TransportCommand::ResetEqualizer).await
    }

    pub async fn set_sleep_timer(&self, minutes: u64) -> Result<(), TransportError> {
        log::info!("CMD: Set sleep timer {} minute(s).", minutes);
        self.send(TransportCommand::SetSleepTimer { minutes }).await
    }

    pub async fn cancel_sleep_timer(&self) -> Result<(), TransportError> {
        log::info!("CMD: Cancel sleep timer.");
        self.send(TransportCommand::CancelSleepTimer).await
    }

    pub async fn set_visualizer_visible(&self, visible: bool) -> Result<(), TransportError> {
        log::debug!("CMD: Set visualizer visible {}.", visible);
        self.send(TransportCommand::SetVisualizerVisible(visible))
            .await
    }

    /// Point-in-time transport state, as the session loop sees it.
    pub async fn playback_state(&self) -> Result<PlaybackSnapshot, TransportError> {
        log::debug!("CMD: Query playback state.");
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(TransportCommand::QueryState(reply_tx)).await?;
        reply_rx
            .await
            .map_err(|e| TransportError::ReplyDropped(e.to_string()))
    }

    /// Stops the session loop and waits for it to acknowledge.
    pub async fn shutdown(&self) -> Result<(), TransportError> {
        log::info!("CMD: Shutdown.");
        let (ack_tx, ack_rx) = oneshot::channel();
        self.send(TransportCommand::Shutdown(ack_tx)).await?;
        ack_rx
            .await
            .map_err(|e| TransportError::ShutdownSignalError(e.to_string()))
    }

    async fn send(&self, command: TransportCommand) -> Result<(), TransportError> {
        self.commands.send(command).await.map_err(TransportError::from)
    }
}
