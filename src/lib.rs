//! Headless music-player engine: a playback session owning a 10-band
//! equalizer graph, a spectrum analyser and the transport state machine,
//! driven over channels by a host UI.

pub mod player;

pub use player::equalizer::{EQ_PRESETS, EqualizerState};
pub use player::errors::{GraphError, MediaError, TransportError};
pub use player::graph::{AudioTap, GraphHandle, SpectrumHandle};
pub use player::media::{
    MediaElement, MediaEvent, MediaEventReceiver, MediaEventSender, media_event_channel,
};
pub use player::queue::{PlaylistProvider, TrackQueue};
pub use player::spectrum::{RenderSurface, SpectrumSampler};
pub use player::transport::events::PlayerEvent;
pub use player::transport::state::{PlaybackSnapshot, TransportPhase};
pub use player::transport::{Player, SessionHandles, spawn_session, start};
pub use player::types::{RepeatMode, TrackDescriptor};
