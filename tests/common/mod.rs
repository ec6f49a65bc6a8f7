use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::broadcast;

use open_player::player::errors::MediaError;
use open_player::{MediaElement, PlayerEvent, RenderSurface, TrackDescriptor};

pub fn init_logs() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .is_test(true)
        .try_init();
}

// --- Scripted Media Element ---

#[derive(Debug, Clone, PartialEq)]
pub enum MediaCall {
    SetSource(String),
    Load,
    Play,
    Pause,
    SetCurrentTime(f64),
    SetVolume(f32),
    SetPlaybackRate(f32),
}

#[derive(Clone, Default)]
pub struct MediaLog {
    calls: Arc<Mutex<Vec<MediaCall>>>,
}

impl MediaLog {
    pub fn calls(&self) -> Vec<MediaCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, call: &MediaCall) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| *c == call)
            .count()
    }

    fn push(&self, call: MediaCall) {
        self.calls.lock().unwrap().push(call);
    }
}

/// Media element double: records every call and lets the test decide
/// whether `play` is rejected (platform gesture policies).
pub struct MockMedia {
    pub log: MediaLog,
    pub reject_play: Arc<AtomicBool>,
}

impl MockMedia {
    pub fn new() -> (Self, MediaLog, Arc<AtomicBool>) {
        let log = MediaLog::default();
        let reject_play = Arc::new(AtomicBool::new(false));
        let media = MockMedia {
            log: log.clone(),
            reject_play: Arc::clone(&reject_play),
        };
        (media, log, reject_play)
    }
}

impl MediaElement for MockMedia {
    fn set_source(&mut self, url: &str) {
        self.log.push(MediaCall::SetSource(url.to_string()));
    }
    fn load(&mut self) {
        self.log.push(MediaCall::Load);
    }
    fn play(&mut self) -> Result<(), MediaError> {
        self.log.push(MediaCall::Play);
        if self.reject_play.load(Ordering::Relaxed) {
            Err(MediaError::PlayRejected {
                reason: "user gesture required".to_string(),
            })
        } else {
            Ok(())
        }
    }
    fn pause(&mut self) {
        self.log.push(MediaCall::Pause);
    }
    fn set_current_time(&mut self, seconds: f64) {
        self.log.push(MediaCall::SetCurrentTime(seconds));
    }
    fn set_volume(&mut self, level: f32) {
        self.log.push(MediaCall::SetVolume(level));
    }
    fn set_playback_rate(&mut self, rate: f32) {
        self.log.push(MediaCall::SetPlaybackRate(rate));
    }
}

// --- Render Surfaces ---

pub struct NullSurface;

impl RenderSurface for NullSurface {
    fn draw_bars(&mut self, _heights: &[f32]) {}
    fn clear(&mut self) {}
}

#[derive(Default)]
pub struct CountingSurface {
    pub frames: Arc<Mutex<usize>>,
    pub clears: Arc<Mutex<usize>>,
}

impl RenderSurface for CountingSurface {
    fn draw_bars(&mut self, _heights: &[f32]) {
        *self.frames.lock().unwrap() += 1;
    }
    fn clear(&mut self) {
        *self.clears.lock().unwrap() += 1;
    }
}

// --- Fixtures & Event Helpers ---

pub fn track(id: &str) -> TrackDescriptor {
    TrackDescriptor {
        id: id.to_string(),
        title: format!("Track {}", id),
        artist: "Artist".to_string(),
        source_url: format!("https://media.test/{}.mp3", id),
        image_url: None,
        lyrics: None,
    }
}

/// Receives events until one matches, returning everything seen up to and
/// including the match. Panics on timeout.
pub async fn collect_until(
    rx: &mut broadcast::Receiver<PlayerEvent>,
    limit: Duration,
    mut pred: impl FnMut(&PlayerEvent) -> bool,
) -> Vec<PlayerEvent> {
    let mut seen = Vec::new();
    let result = tokio::time::timeout(limit, async {
        loop {
            let event = rx.recv().await.expect("event channel closed");
            let matched = pred(&event);
            seen.push(event);
            if matched {
                break;
            }
        }
    })
    .await;
    assert!(
        result.is_ok(),
        "timed out waiting for event; saw: {:?}",
        seen
    );
    seen
}

/// Receives events, skipping non-matching ones, until one matches.
pub async fn wait_for(
    rx: &mut broadcast::Receiver<PlayerEvent>,
    limit: Duration,
    pred: impl FnMut(&PlayerEvent) -> bool,
) -> PlayerEvent {
    collect_until(rx, limit, pred)
        .await
        .pop()
        .expect("collect_until returns at least the match")
}

/// True when no event arrives within the window.
pub async fn no_event_matching(
    rx: &mut broadcast::Receiver<PlayerEvent>,
    limit: Duration,
    mut pred: impl FnMut(&PlayerEvent) -> bool,
) -> bool {
    let result = tokio::time::timeout(limit, async {
        loop {
            match rx.recv().await {
                Ok(event) => {
                    if pred(&event) {
                        break;
                    }
                }
                Err(_) => std::future::pending::<()>().await,
            }
        }
    })
    .await;
    result.is_err()
}
