use crate::player::config::{EQ_BAND_COUNT, EQ_GAIN_MAX_DB, EQ_GAIN_MIN_DB};
use crate::player::errors::GraphError;

/// Fixed preset catalog, one literal gain array per name. Band order
/// follows the chain: 31 Hz up to 16 kHz.
pub const EQ_PRESETS: &[(&str, [f32; EQ_BAND_COUNT])] = &[
    ("Off", [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
    ("Pop", [-1.0, 2.0, 4.0, 4.0, 3.0, 0.0, -1.0, -2.0, -2.0, -2.0]),
    ("Dance", [4.0, 6.0, 2.0, 0.0, 0.0, 2.0, 4.0, 4.0, 2.0, 0.0]),
    ("Blues", [3.0, 5.0, 3.0, 1.0, 0.0, 0.0, 0.0, 1.0, 2.0, 2.0]),
    ("Classical", [4.0, 3.0, 2.0, 1.0, -1.0, -1.0, 0.0, 2.0, 3.0, 3.0]),
    ("Jazz", [3.0, 3.0, 1.0, 1.0, -1.0, -1.0, 0.0, 1.0, 3.0, 4.0]),
    ("Rock", [5.0, 4.0, 3.0, 1.0, -1.0, -1.0, 1.0, 3.0, 4.0, 5.0]),
    ("Bass Boost", [6.0, 5.0, 4.0, 2.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
    ("Vocal Boost", [-2.0, -2.0, -1.0, 1.0, 3.0, 5.0, 4.0, 3.0, 1.0, 0.0]),
];

/// Label reported once any band has been hand-tuned. Not a selectable
/// catalog entry.
pub const CUSTOM_PRESET_LABEL: &str = "Custom";

pub fn preset_gains(name: &str) -> Option<&'static [f32; EQ_BAND_COUNT]> {
    EQ_PRESETS
        .iter()
        .find(|(preset, _)| *preset == name)
        .map(|(_, gains)| gains)
}

/// The 10 gain values plus the selected preset label. Pure state: callers
/// propagate the returned gains into the live graph, which keeps the graph
/// behind its single owner.
#[derive(Debug, Clone, PartialEq)]
pub struct EqualizerState {
    gains: [f32; EQ_BAND_COUNT],
    preset: String,
}

impl EqualizerState {
    pub fn new() -> Self {
        EqualizerState {
            gains: [0.0; EQ_BAND_COUNT],
            preset: "Off".to_string(),
        }
    }

    pub fn gains(&self) -> &[f32; EQ_BAND_COUNT] {
        &self.gains
    }

    pub fn preset(&self) -> &str {
        &self.preset
    }

    /// Stores the clamped gain for one band and marks the state as
    /// hand-tuned. Returns the value actually stored so the caller can
    /// propagate exactly that to the live filter.
    pub fn set_gain(&mut self, index: usize, value_db: f32) -> Result<f32, GraphError> {
        if index >= EQ_BAND_COUNT {
            return Err(GraphError::BandIndexOutOfRange {
                index,
                count: EQ_BAND_COUNT,
            });
        }
        let clamped = value_db.clamp(EQ_GAIN_MIN_DB, EQ_GAIN_MAX_DB);
        self.gains[index] = clamped;
        // Any manual tweak leaves the catalog, even when the value matches.
        self.preset = CUSTOM_PRESET_LABEL.to_string();
        Ok(clamped)
    }

    /// Replaces all 10 gains with a catalog entry. Unknown names are a
    /// no-op: state stays untouched and `None` is returned.
    pub fn select_preset(&mut self, name: &str) -> Option<[f32; EQ_BAND_COUNT]> {
        match preset_gains(name) {
            Some(gains) => {
                self.gains = *gains;
                self.preset = name.to_string();
                Some(*gains)
            }
            None => {
                log::warn!("Equalizer: Unknown preset '{}', ignoring.", name);
                None
            }
        }
    }

    pub fn reset(&mut self) -> [f32; EQ_BAND_COUNT] {
        self.select_preset("Off")
            .unwrap_or([0.0; EQ_BAND_COUNT])
    }
}

impl Default for EqualizerState {
    fn default() -> Self {
        EqualizerState::new()
    }
}
