use crate::player::types::{RepeatMode, TrackDescriptor};

/// The playlist/queue collaborator as the engine consumes it. Advance
/// policy (shuffle order, repeat-all wraparound) lives behind this trait;
/// the engine itself only ever acts on [`RepeatMode::One`].
pub trait PlaylistProvider {
    fn current(&self) -> Option<&TrackDescriptor>;
    fn next(&mut self) -> Option<&TrackDescriptor>;
    fn previous(&mut self) -> Option<&TrackDescriptor>;
    fn is_shuffle(&self) -> bool;
    fn repeat_mode(&self) -> RepeatMode;
}

/// Vec-backed reference queue: sequential navigation with repeat-all
/// wraparound. The shuffle flag is carried for hosts that reorder on top.
#[derive(Debug, Clone)]
pub struct TrackQueue {
    tracks: Vec<TrackDescriptor>,
    position: usize,
    shuffle: bool,
    repeat_mode: RepeatMode,
}

impl TrackQueue {
    pub fn new(tracks: Vec<TrackDescriptor>) -> Self {
        TrackQueue {
            tracks,
            position: 0,
            shuffle: false,
            repeat_mode: RepeatMode::Off,
        }
    }

    pub fn toggle_shuffle(&mut self) {
        self.shuffle = !self.shuffle;
    }

    pub fn cycle_repeat_mode(&mut self) -> RepeatMode {
        self.repeat_mode = self.repeat_mode.cycled();
        self.repeat_mode
    }

    pub fn set_repeat_mode(&mut self, mode: RepeatMode) {
        self.repeat_mode = mode;
    }

    /// Up to `count` tracks queued after the current one.
    pub fn up_next(&self, count: usize) -> &[TrackDescriptor] {
        let start = (self.position + 1).min(self.tracks.len());
        let end = (start + count).min(self.tracks.len());
        &self.tracks[start..end]
    }
}

impl PlaylistProvider for TrackQueue {
    fn current(&self) -> Option<&TrackDescriptor> {
        self.tracks.get(self.position)
    }

    fn next(&mut self) -> Option<&TrackDescriptor> {
        if self.tracks.is_empty() {
            return None;
        }
        if self.position + 1 < self.tracks.len() {
            self.position += 1;
        } else if self.repeat_mode == RepeatMode::All {
            self.position = 0;
        } else {
            return None;
        }
        self.current()
    }

    fn previous(&mut self) -> Option<&TrackDescriptor> {
        if self.tracks.is_empty() {
            return None;
        }
        if self.position > 0 {
            self.position -= 1;
        } else if self.repeat_mode == RepeatMode::All {
            self.position = self.tracks.len() - 1;
        } else {
            return None;
        }
        self.current()
    }

    fn is_shuffle(&self) -> bool {
        self.shuffle
    }

    fn repeat_mode(&self) -> RepeatMode {
        self.repeat_mode
    }
}
