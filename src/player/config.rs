// --- Equalizer Band Constants ---
pub const EQ_BAND_COUNT: usize = 10;
pub const EQ_BAND_FREQUENCIES_HZ: [f32; EQ_BAND_COUNT] = [
    31.0, 62.0, 125.0, 250.0, 500.0, 1000.0, 2000.0, 4000.0, 8000.0, 16000.0,
];
pub const EQ_GAIN_MIN_DB: f32 = -20.0;
pub const EQ_GAIN_MAX_DB: f32 = 20.0;
pub const EQ_PEAKING_Q_FACTOR: f32 = 1.0;
pub const EQ_SHELF_Q_FACTOR: f32 = std::f32::consts::FRAC_1_SQRT_2;

// --- Graph Constants ---
// No decoded stream reaches the graph directly, so coefficients are computed
// at the rate the host pipeline runs at.
pub const GRAPH_SAMPLE_RATE_HZ: f32 = 44_100.0;

// --- Analyser Constants ---
pub const ANALYSER_FFT_SIZE: usize = 256;
pub const ANALYSER_BIN_COUNT: usize = ANALYSER_FFT_SIZE / 2;
pub const ANALYSER_MIN_DECIBELS: f32 = -100.0;
pub const ANALYSER_MAX_DECIBELS: f32 = -30.0;
/// Exponential smoothing applied to bin magnitudes between reads.
pub const ANALYSER_SMOOTHING: f32 = 0.8;

// --- Spectrum Sampler Constants ---
pub const SPECTRUM_FRAME_INTERVAL_MS: u64 = 16; // display refresh cadence
/// Byte bin (0-255) to bar height.
pub const SPECTRUM_BAR_SCALE: f32 = 0.5;

// --- Transport Constants ---
/// Loading indicator is force-cleared after this long even if readiness
/// never fires. A heuristic against network stalls, not a delivery bound.
pub const LOAD_SAFETY_TIMEOUT_MS: u64 = 8_000;
pub const COMMAND_CHAN_SIZE: usize = 64;
pub const EVENT_CHAN_SIZE: usize = 64;
pub const MEDIA_EVENT_CHAN_SIZE: usize = 64;

// -- Initial Values --
pub const DEFAULT_VOLUME: f32 = 0.8;
pub const PLAYBACK_RATE_MIN: f32 = 0.25;
pub const PLAYBACK_RATE_MAX: f32 = 4.0;
