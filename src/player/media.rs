use tokio::sync::mpsc;

use crate::player::config::MEDIA_EVENT_CHAN_SIZE;
use crate::player::errors::MediaError;

// --- Media Element Collaborator ---

/// The media-element-like primitive the transport drives. Implementations
/// own source management, decoding and output; the engine only issues
/// intent. `play` may be rejected by the platform (e.g. gesture policies)
/// and the transport absorbs that.
pub trait MediaElement: Send + 'static {
    fn set_source(&mut self, url: &str);
    fn load(&mut self);
    fn play(&mut self) -> Result<(), MediaError>;
    fn pause(&mut self);
    fn set_current_time(&mut self, seconds: f64);
    fn set_volume(&mut self, level: f32);
    fn set_playback_rate(&mut self, rate: f32);
}

/// Notifications the media element feeds back into the session loop.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaEvent {
    /// Enough is buffered to begin playback.
    CanPlay,
    LoadedMetadata { duration: f64 },
    TimeUpdate { position: f64 },
    Ended,
}

pub type MediaEventSender = mpsc::Sender<MediaEvent>;
pub type MediaEventReceiver = mpsc::Receiver<MediaEvent>;

/// Channel pair wiring a media element's notifications into a session.
pub fn media_event_channel() -> (MediaEventSender, MediaEventReceiver) {
    mpsc::channel(MEDIA_EVENT_CHAN_SIZE)
}
