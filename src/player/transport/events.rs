use serde::Serialize;
use tokio::sync::broadcast;

use crate::player::config::{EQ_BAND_COUNT, EVENT_CHAN_SIZE};
use crate::player::equalizer::EqualizerState;

// --- Event Payloads for the Host UI ---

#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackStatusPayload {
    pub is_playing: bool,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LoadingPayload {
    pub is_loading: bool,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PositionTickPayload {
    pub current_time: f64,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DurationPayload {
    pub duration: f64,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TrackEndedPayload {
    pub track_id: String,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RatePayload {
    pub rate: f32,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VolumePayload {
    pub volume: f32,
    pub muted: bool,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EqualizerPayload {
    pub preset: String,
    pub gains: [f32; EQ_BAND_COUNT],
}

#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SleepTimerPayload {
    /// Seconds until the pending deadline; `None` when no timer is set.
    pub remaining_secs: Option<u64>,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ErrorPayload {
    pub error: String,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PlayerEvent {
    Status(PlaybackStatusPayload),
    Loading(LoadingPayload),
    Tick(PositionTickPayload),
    Duration(DurationPayload),
    TrackEnded(TrackEndedPayload),
    RateChanged(RatePayload),
    VolumeChanged(VolumePayload),
    EqualizerChanged(EqualizerPayload),
    SleepTimerChanged(SleepTimerPayload),
    Error(ErrorPayload),
}

// --- Event Emitter Helpers ---

#[derive(Clone)]
pub struct EventSender {
    tx: broadcast::Sender<PlayerEvent>,
}

impl EventSender {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(EVENT_CHAN_SIZE);
        EventSender { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<PlayerEvent> {
        self.tx.subscribe()
    }

    fn send(&self, event: PlayerEvent) {
        // A send only fails when nobody is subscribed, which is fine.
        if self.tx.send(event).is_err() {
            log::trace!("No subscribers for player event.");
        }
    }
}

impl Default for EventSender {
    fn default() -> Self {
        EventSender::new()
    }
}

pub(crate) fn emit_status_event(events: &EventSender, is_playing: bool) {
    events.send(PlayerEvent::Status(PlaybackStatusPayload { is_playing }));
}

pub(crate) fn emit_loading_event(events: &EventSender, is_loading: bool) {
    events.send(PlayerEvent::Loading(LoadingPayload { is_loading }));
}

pub(crate) fn emit_tick_event(events: &EventSender, current_time: f64) {
    events.send(PlayerEvent::Tick(PositionTickPayload { current_time }));
}

pub(crate) fn emit_duration_event(events: &EventSender, duration: f64) {
    events.send(PlayerEvent::Duration(DurationPayload { duration }));
}

pub(crate) fn emit_track_ended_event(events: &EventSender, track_id: &str) {
    events.send(PlayerEvent::TrackEnded(TrackEndedPayload {
        track_id: track_id.to_string(),
    }));
}

pub(crate) fn emit_rate_event(events: &EventSender, rate: f32) {
    events.send(PlayerEvent::RateChanged(RatePayload { rate }));
}

pub(crate) fn emit_volume_event(events: &EventSender, volume: f32, muted: bool) {
    events.send(PlayerEvent::VolumeChanged(VolumePayload { volume, muted }));
}

pub(crate) fn emit_equalizer_event(events: &EventSender, equalizer: &EqualizerState) {
    events.send(PlayerEvent::EqualizerChanged(EqualizerPayload {
        preset: equalizer.preset().to_string(),
        gains: *equalizer.gains(),
    }));
}

pub(crate) fn emit_sleep_timer_event(events: &EventSender, remaining_secs: Option<u64>) {
    events.send(PlayerEvent::SleepTimerChanged(SleepTimerPayload {
        remaining_secs,
    }));
}

pub(crate) fn emit_error_event(events: &EventSender, error: &str) {
    events.send(PlayerEvent::Error(ErrorPayload {
        error: error.to_string(),
    }));
}
