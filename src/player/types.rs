use serde::{Deserialize, Serialize};

// --- Track Metadata ---

/// Descriptor of one playable track as the playlist collaborator hands it
/// over. Only `id` and `source_url` matter to the engine; the rest rides
/// along for the UI.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TrackDescriptor {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub source_url: String,
    pub image_url: Option<String>,
    pub lyrics: Option<String>,
}

// --- Playback Modes ---

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RepeatMode {
    Off,
    All,
    One,
}

impl RepeatMode {
    /// Next mode in the UI toggle order.
    pub fn cycled(self) -> Self {
        match self {
            RepeatMode::Off => RepeatMode::All,
            RepeatMode::All => RepeatMode::One,
            RepeatMode::One => RepeatMode::Off,
        }
    }
}
