use std::sync::Arc;

use rustfft::{Fft, FftPlanner, num_complex::Complex};

use crate::player::config::{
    ANALYSER_BIN_COUNT, ANALYSER_FFT_SIZE, ANALYSER_MAX_DECIBELS, ANALYSER_MIN_DECIBELS,
    ANALYSER_SMOOTHING,
};

/// Frequency-domain tap at the end of the filter chain.
///
/// Keeps the last fft-size samples in a ring and produces byte-scaled
/// magnitude bins on demand. Reading a snapshot is a pull: it never touches
/// chain configuration, only the smoothing state that belongs to the
/// analyser itself.
pub struct Analyser {
    ring: [f32; ANALYSER_FFT_SIZE],
    write_pos: usize,
    fft: Arc<dyn Fft<f32>>,
    window: [f32; ANALYSER_FFT_SIZE],
    smoothed: [f32; ANALYSER_BIN_COUNT],
    scratch: Vec<Complex<f32>>,
}

impl Analyser {
    pub(crate) fn new() -> Self {
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(ANALYSER_FFT_SIZE);

        // Hann window
        let mut window = [0.0f32; ANALYSER_FFT_SIZE];
        for (i, w) in window.iter_mut().enumerate() {
            *w = 0.5
                * (1.0
                    - (2.0 * std::f32::consts::PI * i as f32 / ANALYSER_FFT_SIZE as f32).cos());
        }

        Analyser {
            ring: [0.0; ANALYSER_FFT_SIZE],
            write_pos: 0,
            fft,
            window,
            smoothed: [0.0; ANALYSER_BIN_COUNT],
            scratch: vec![Complex::new(0.0, 0.0); ANALYSER_FFT_SIZE],
        }
    }

    pub(crate) fn push_samples(&mut self, block: &[f32]) {
        for &sample in block {
            self.ring[self.write_pos] = sample;
            self.write_pos = (self.write_pos + 1) % ANALYSER_FFT_SIZE;
        }
    }

    /// Current frequency snapshot, one byte (0-255) per bin.
    ///
    /// Magnitudes are smoothed between reads, converted to dB and mapped
    /// over the [min, max] decibel range, matching what the visualizer
    /// expects from an analyser node.
    pub(crate) fn byte_frequency_data(&mut self, out: &mut [u8; ANALYSER_BIN_COUNT]) {
        for i in 0..ANALYSER_FFT_SIZE {
            let sample = self.ring[(self.write_pos + i) % ANALYSER_FFT_SIZE];
            self.scratch[i] = Complex::new(sample * self.window[i], 0.0);
        }
        self.fft.process(&mut self.scratch);

        let norm = 1.0 / ANALYSER_FFT_SIZE as f32;
        let db_span = ANALYSER_MAX_DECIBELS - ANALYSER_MIN_DECIBELS;
        for (k, out_byte) in out.iter_mut().enumerate() {
            let magnitude = self.scratch[k].norm() * norm;
            let smoothed =
                ANALYSER_SMOOTHING * self.smoothed[k] + (1.0 - ANALYSER_SMOOTHING) * magnitude;
            self.smoothed[k] = smoothed;

            let db = if smoothed > 0.0 {
                20.0 * smoothed.log10()
            } else {
                ANALYSER_MIN_DECIBELS
            };
            let scaled = (db - ANALYSER_MIN_DECIBELS) / db_span;
            *out_byte = (255.0 * scaled.clamp(0.0, 1.0)).round() as u8;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::config::GRAPH_SAMPLE_RATE_HZ;

    #[test]
    fn silence_produces_all_zero_bins() {
        let mut analyser = Analyser::new();
        let mut bins = [0u8; ANALYSER_BIN_COUNT];
        analyser.byte_frequency_data(&mut bins);
        assert!(bins.iter().all(|&b| b == 0));
    }

    #[test]
    fn sine_at_bin_center_peaks_in_that_bin() {
        let mut analyser = Analyser::new();

        // A sine landing exactly on bin 8 so leakage stays in the neighbors.
        let target_bin = 8usize;
        let freq = target_bin as f32 * GRAPH_SAMPLE_RATE_HZ / ANALYSER_FFT_SIZE as f32;
        let samples: Vec<f32> = (0..ANALYSER_FFT_SIZE)
            .map(|n| {
                (2.0 * std::f32::consts::PI * freq * n as f32 / GRAPH_SAMPLE_RATE_HZ).sin()
            })
            .collect();
        analyser.push_samples(&samples);

        let mut bins = [0u8; ANALYSER_BIN_COUNT];
        analyser.byte_frequency_data(&mut bins);

        let loudest = bins
            .iter()
            .enumerate()
            .max_by_key(|&(_, &b)| b)
            .map(|(k, _)| k)
            .unwrap();
        assert_eq!(loudest, target_bin);
        assert!(bins[target_bin] > 0);
        // Far-away bins stay quiet.
        assert!(bins[ANALYSER_BIN_COUNT - 1] < bins[target_bin]);
    }

    #[test]
    fn smoothing_decays_after_signal_stops() {
        let mut analyser = Analyser::new();
        let samples: Vec<f32> = (0..ANALYSER_FFT_SIZE)
            .map(|n| {
                (2.0 * std::f32::consts::PI * 8.0 * n as f32 / ANALYSER_FFT_SIZE as f32).sin()
            })
            .collect();
        analyser.push_samples(&samples);

        let mut bins = [0u8; ANALYSER_BIN_COUNT];
        analyser.byte_frequency_data(&mut bins);
        let loud = bins[8];

        // Overwrite the ring with silence; repeated reads must decay, not
        // freeze.
        analyser.push_samples(&[0.0; ANALYSER_FFT_SIZE]);
        for _ in 0..32 {
            analyser.byte_frequency_data(&mut bins);
        }
        assert!(bins[8] < loud);
    }
}
