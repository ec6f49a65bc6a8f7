use std::sync::{Arc, Mutex};

use serde::Serialize;
use tokio::time::Instant;

use crate::player::config::DEFAULT_VOLUME;
use crate::player::equalizer::EqualizerState;
use crate::player::graph::GraphHandle;
use crate::player::media::MediaElement;
use crate::player::spectrum::{RenderSurface, SpectrumSampler};
use crate::player::transport::events::{EventSender, emit_status_event};
use crate::player::types::{RepeatMode, TrackDescriptor};

/// The transport state machine.
///
/// ```text
/// Idle -> Loading -> Ready -> Playing <-> Paused
///           ^
///           `-- re-entered on every track-identity change
/// ```
///
/// Readiness gates `Playing`: a play intent that arrives earlier is latched
/// in `desired_playing` and replayed exactly once when readiness fires.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportPhase {
    Idle,
    Loading,
    Ready,
    Playing,
    Paused,
}

/// Point-in-time view of the transport, answered over a oneshot reply.
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackSnapshot {
    pub phase: TransportPhase,
    pub desired_playing: bool,
    pub ready_to_play: bool,
    pub is_loading: bool,
    pub current_time: f64,
    pub duration: Option<f64>,
    pub playback_rate: f32,
    pub volume: f32,
    pub muted: bool,
    pub repeat_mode: RepeatMode,
}

/// Everything the session loop owns. Nothing here is shared: commands and
/// media notifications interleave on one loop, so plain fields suffice.
pub(crate) struct SessionState<M: MediaElement> {
    pub(crate) media: M,
    pub(crate) graph: GraphHandle,
    pub(crate) equalizer: EqualizerState,
    pub(crate) sampler: SpectrumSampler,
    pub(crate) events: EventSender,

    pub(crate) phase: TransportPhase,
    pub(crate) desired_playing: bool,
    pub(crate) ready_to_play: bool,
    pub(crate) loading_indicator: bool,
    pub(crate) loading_deadline: Option<Instant>,

    pub(crate) current_track: Option<TrackDescriptor>,
    pub(crate) current_time: f64,
    pub(crate) duration: Option<f64>,
    pub(crate) playback_rate: f32,
    pub(crate) volume: f32,
    pub(crate) muted: bool,
    pub(crate) repeat_mode: RepeatMode,

    pub(crate) sleep_deadline: Option<Instant>,

    pub(crate) visualizer_visible: bool,
}

impl<M: MediaElement> SessionState<M> {
    pub(crate) fn new<S: RenderSurface>(
        media: M,
        surface: S,
        graph: GraphHandle,
        events: EventSender,
    ) -> Self {
        let sampler = SpectrumSampler::new(
            graph.spectrum_handle(),
            Arc::new(Mutex::new(surface)) as Arc<Mutex<dyn RenderSurface>>,
        );
        SessionState {
            media,
            graph,
            equalizer: EqualizerState::new(),
            sampler,
            events,
            phase: TransportPhase::Idle,
            desired_playing: false,
            ready_to_play: false,
            loading_indicator: false,
            loading_deadline: None,
            current_track: None,
            current_time: 0.0,
            duration: None,
            playback_rate: 1.0,
            volume: DEFAULT_VOLUME,
            muted: false,
            repeat_mode: RepeatMode::Off,
            sleep_deadline: None,
            visualizer_visible: false,
        }
    }

    pub(crate) fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.volume }
    }

    pub(crate) fn snapshot(&self) -> PlaybackSnapshot {
        PlaybackSnapshot {
            phase: self.phase,
            desired_playing: self.desired_playing,
            ready_to_play: self.ready_to_play,
            is_loading: self.loading_indicator,
            current_time: self.current_time,
            duration: self.duration,
            playback_rate: self.playback_rate,
            volume: self.volume,
            muted: self.muted,
            repeat_mode: self.repeat_mode,
        }
    }

    /// Single phase-transition point: logs the edge, emits a status event
    /// when the playing flag flips, and keeps the sampler in step.
    pub(crate) fn set_phase(&mut self, phase: TransportPhase) {
        if self.phase == phase {
            return;
        }
        log::debug!("Transport: {:?} -> {:?}", self.phase, phase);
        let was_playing = self.phase == TransportPhase::Playing;
        self.phase = phase;
        let now_playing = phase == TransportPhase::Playing;
        if was_playing != now_playing {
            emit_status_event(&self.events, now_playing);
        }
        self.update_sampler();
    }

    /// The sampling loop runs only while playing with a visible surface and
    /// a live analyser; any other combination stops it (which clears the
    /// surface).
    pub(crate) fn update_sampler(&mut self) {
        let should_run = self.phase == TransportPhase::Playing
            && self.visualizer_visible
            && self.graph.is_active();
        if should_run {
            self.sampler.start();
        } else {
            self.sampler.stop();
        }
    }
}
