use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::player::config::{ANALYSER_BIN_COUNT, SPECTRUM_BAR_SCALE, SPECTRUM_FRAME_INTERVAL_MS};
use crate::player::graph::SpectrumHandle;

/// Where the per-frame bar heights go. Theming and geometry are the host's
/// concern; the engine only hands over heights.
pub trait RenderSurface: Send + 'static {
    fn draw_bars(&mut self, heights: &[f32]);
    fn clear(&mut self);
}

struct SamplerTask {
    cancel: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

/// Cancelable per-frame sampling loop.
///
/// Pulls the analyser snapshot once per frame and forwards bar heights to
/// the surface. `start` while already running is a no-op, so no two loops
/// ever draw concurrently; `stop` cancels the loop and the task clears the
/// surface on its way out instead of freezing on a stale frame.
pub struct SpectrumSampler {
    spectrum: SpectrumHandle,
    surface: Arc<Mutex<dyn RenderSurface>>,
    task: Option<SamplerTask>,
}

impl SpectrumSampler {
    pub fn new(spectrum: SpectrumHandle, surface: Arc<Mutex<dyn RenderSurface>>) -> Self {
        SpectrumSampler {
            spectrum,
            surface,
            task: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.task
            .as_ref()
            .is_some_and(|task| !task.handle.is_finished())
    }

    /// Spawns the sampling loop. Must run inside a Tokio runtime.
    pub fn start(&mut self) {
        if self.is_running() {
            log::debug!("Spectrum: Sampler already running; start ignored.");
            return;
        }

        let (cancel_tx, mut cancel_rx) = watch::channel(false);
        let spectrum = self.spectrum.clone();
        let surface = Arc::clone(&self.surface);

        let handle = tokio::spawn(async move {
            let mut ticker =
                tokio::time::interval(Duration::from_millis(SPECTRUM_FRAME_INTERVAL_MS));
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            let mut bins = [0u8; ANALYSER_BIN_COUNT];
            let mut heights = [0.0f32; ANALYSER_BIN_COUNT];

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        if spectrum.byte_frequency_data(&mut bins) {
                            for (height, &bin) in heights.iter_mut().zip(bins.iter()) {
                                *height = f32::from(bin) * SPECTRUM_BAR_SCALE;
                            }
                            if let Ok(mut surface) = surface.lock() {
                                surface.draw_bars(&heights);
                            }
                        }
                    }
                    changed = cancel_rx.changed() => {
                        if changed.is_err() || *cancel_rx.borrow() {
                            break;
                        }
                    }
                }
            }
            if let Ok(mut surface) = surface.lock() {
                surface.clear();
            }
        });

        self.task = Some(SamplerTask {
            cancel: cancel_tx,
            handle,
        });
        log::debug!("Spectrum: Sampler started.");
    }

    /// Cancels the loop. Safe to call when not running.
    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            if task.cancel.send(true).is_err() {
                // Task already finished; nothing to cancel.
                return;
            }
            log::debug!("Spectrum: Sampler stopped.");
        }
    }
}

impl Drop for SpectrumSampler {
    fn drop(&mut self) {
        self.stop();
    }
}
