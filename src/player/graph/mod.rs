use std::sync::{Arc, Mutex};

use biquad::{Biquad as _, Coefficients, DirectForm1, ToHertz, Type};

use crate::player::config::{
    EQ_BAND_COUNT, EQ_BAND_FREQUENCIES_HZ, EQ_PEAKING_Q_FACTOR, EQ_SHELF_Q_FACTOR,
    GRAPH_SAMPLE_RATE_HZ,
};
use crate::player::errors::GraphError;

pub mod analyser;
pub use analyser::Analyser;

use crate::player::config::ANALYSER_BIN_COUNT;

// --- Band Filters ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BandKind {
    LowShelf,
    Peaking,
    HighShelf,
}

impl BandKind {
    /// Lowest band is a low shelf and the highest a high shelf for more
    /// impact at the spectrum edges; everything between is a peaking filter.
    fn for_band(index: usize) -> BandKind {
        if index == 0 {
            BandKind::LowShelf
        } else if index == EQ_BAND_COUNT - 1 {
            BandKind::HighShelf
        } else {
            BandKind::Peaking
        }
    }
}

struct BandFilter {
    kind: BandKind,
    center_hz: f32,
    gain_db: f32,
    filter: DirectForm1<f32>,
}

impl BandFilter {
    fn new(index: usize, center_hz: f32, sample_rate: f32) -> Result<Self, GraphError> {
        let kind = BandKind::for_band(index);
        let coeffs = calculate_band_coefficients(index, kind, center_hz, 0.0, sample_rate)?;
        Ok(BandFilter {
            kind,
            center_hz,
            gain_db: 0.0,
            filter: DirectForm1::<f32>::new(coeffs),
        })
    }

    fn retune(&mut self, index: usize, gain_db: f32, sample_rate: f32) -> Result<(), GraphError> {
        let coeffs =
            calculate_band_coefficients(index, self.kind, self.center_hz, gain_db, sample_rate)?;
        self.filter.update_coefficients(coeffs);
        log::trace!(
            "Graph: Band {} ({:?} @ {} Hz) {} -> {} dB.",
            index,
            self.kind,
            self.center_hz,
            self.gain_db,
            gain_db
        );
        self.gain_db = gain_db;
        Ok(())
    }
}

fn calculate_band_coefficients(
    band: usize,
    kind: BandKind,
    center_hz: f32,
    gain_db: f32,
    sample_rate: f32,
) -> Result<Coefficients<f32>, GraphError> {
    let (filter_type, q) = match kind {
        BandKind::LowShelf => (Type::LowShelf(gain_db), EQ_SHELF_Q_FACTOR),
        BandKind::Peaking => (Type::PeakingEQ(gain_db), EQ_PEAKING_Q_FACTOR),
        BandKind::HighShelf => (Type::HighShelf(gain_db), EQ_SHELF_Q_FACTOR),
    };
    Coefficients::<f32>::from_params(filter_type, sample_rate.hz(), center_hz.hz(), q).map_err(
        |e| GraphError::CoefficientCalculation {
            band,
            filter_type: format!("{:?}: {:?}", kind, e),
        },
    )
}

// --- The Filter Graph ---

/// Fixed chain: tap -> filter[0] -> ... -> filter[9] -> analyser -> output.
pub struct AudioGraph {
    sample_rate: f32,
    bands: Vec<BandFilter>,
    analyser: Analyser,
}

impl AudioGraph {
    pub(crate) fn build_at(sample_rate: f32) -> Result<Self, GraphError> {
        let bands = EQ_BAND_FREQUENCIES_HZ
            .iter()
            .enumerate()
            .map(|(index, &freq)| BandFilter::new(index, freq, sample_rate))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(AudioGraph {
            sample_rate,
            bands,
            analyser: Analyser::new(),
        })
    }

    fn tune_band(&mut self, index: usize, gain_db: f32) -> Result<(), GraphError> {
        let sample_rate = self.sample_rate;
        let band = self
            .bands
            .get_mut(index)
            .ok_or(GraphError::BandIndexOutOfRange {
                index,
                count: EQ_BAND_COUNT,
            })?;
        band.retune(index, gain_db, sample_rate)
    }

    fn process_block(&mut self, input: &[f32], output: &mut Vec<f32>) {
        for &sample in input {
            let mut x = sample;
            for band in &mut self.bands {
                x = band.filter.run(x);
            }
            output.push(x);
        }
        self.analyser.push_samples(output);
    }

    #[cfg(test)]
    fn band_gains(&self) -> Vec<f32> {
        self.bands.iter().map(|b| b.gain_db).collect()
    }

    #[cfg(test)]
    fn band_kinds(&self) -> Vec<BandKind> {
        self.bands.iter().map(|b| b.kind).collect()
    }
}

// --- Shared Handles ---

enum GraphState {
    /// Not built yet; blocks pass through untouched.
    Idle,
    Active(AudioGraph),
    /// Construction failed; playback continues without EQ or visualization.
    Degraded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphBuildOutcome {
    Built,
    AlreadyBuilt,
    Unavailable,
}

/// Owner of the filter graph. Only the holder of this handle may tune band
/// parameters; sample routing and spectrum reads go through the narrower
/// [`AudioTap`] and [`SpectrumHandle`] views.
pub struct GraphHandle {
    inner: Arc<Mutex<GraphState>>,
}

impl GraphHandle {
    pub fn new() -> Self {
        GraphHandle {
            inner: Arc::new(Mutex::new(GraphState::Idle)),
        }
    }

    /// Builds the graph if it does not exist. Idempotent: calling while a
    /// graph already exists is a no-op (prevents double-routing), and a
    /// failed construction leaves the handle permanently in pass-through.
    pub fn ensure_built(&self) -> GraphBuildOutcome {
        self.ensure_built_at(GRAPH_SAMPLE_RATE_HZ)
    }

    pub(crate) fn ensure_built_at(&self, sample_rate: f32) -> GraphBuildOutcome {
        let Ok(mut state) = self.inner.lock() else {
            return GraphBuildOutcome::Unavailable;
        };
        match &*state {
            GraphState::Active(_) => GraphBuildOutcome::AlreadyBuilt,
            GraphState::Degraded => GraphBuildOutcome::Unavailable,
            GraphState::Idle => match AudioGraph::build_at(sample_rate) {
                Ok(graph) => {
                    log::info!(
                        "Graph: Built {}-band filter chain at {} Hz.",
                        EQ_BAND_COUNT,
                        sample_rate
                    );
                    *state = GraphState::Active(graph);
                    GraphBuildOutcome::Built
                }
                Err(e) => {
                    log::error!(
                        "Graph: Construction failed: {}. Continuing with pass-through playback.",
                        e
                    );
                    *state = GraphState::Degraded;
                    GraphBuildOutcome::Unavailable
                }
            },
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(
            self.inner.lock().as_deref(),
            Ok(GraphState::Active(_))
        )
    }

    /// Retunes a single band. A no-op while no graph exists; gains applied
    /// later at build time come from the equalizer state.
    pub fn tune_band(&self, index: usize, gain_db: f32) -> Result<(), GraphError> {
        let mut state = self.inner.lock().map_err(|_| GraphError::GraphLock {
            reason: "Mutex poisoned while tuning band".to_string(),
        })?;
        match &mut *state {
            GraphState::Active(graph) => graph.tune_band(index, gain_db),
            _ => {
                log::debug!("Graph: No live graph; band {} gain deferred.", index);
                Ok(())
            }
        }
    }

    /// Retunes all bands in one batch.
    pub fn tune_all(&self, gains: &[f32; EQ_BAND_COUNT]) -> Result<(), GraphError> {
        let mut state = self.inner.lock().map_err(|_| GraphError::GraphLock {
            reason: "Mutex poisoned while tuning bands".to_string(),
        })?;
        match &mut *state {
            GraphState::Active(graph) => {
                for (index, &gain_db) in gains.iter().enumerate() {
                    graph.tune_band(index, gain_db)?;
                }
                Ok(())
            }
            _ => {
                log::debug!("Graph: No live graph; batch gains deferred.");
                Ok(())
            }
        }
    }

    pub fn tap(&self) -> AudioTap {
        AudioTap {
            inner: Arc::clone(&self.inner),
        }
    }

    pub fn spectrum_handle(&self) -> SpectrumHandle {
        SpectrumHandle {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl Default for GraphHandle {
    fn default() -> Self {
        GraphHandle::new()
    }
}

/// Sample-routing view of the graph. Cannot tune anything.
#[derive(Clone)]
pub struct AudioTap {
    inner: Arc<Mutex<GraphState>>,
}

impl AudioTap {
    /// Routes one block through the chain into `output`. While the graph is
    /// unbuilt or degraded the block passes through untouched, so playback
    /// never blocks on the audio subsystem.
    pub fn process_block(&self, input: &[f32], output: &mut Vec<f32>) {
        output.clear();
        if let Ok(mut state) = self.inner.lock() {
            if let GraphState::Active(graph) = &mut *state {
                graph.process_block(input, output);
                return;
            }
        }
        output.extend_from_slice(input);
    }
}

/// Read-only view for the spectrum sampler.
#[derive(Clone)]
pub struct SpectrumHandle {
    inner: Arc<Mutex<GraphState>>,
}

impl SpectrumHandle {
    /// Pulls the current frequency snapshot. Returns false when there is no
    /// live analyser (graph unbuilt or degraded), in which case `out` is
    /// left untouched.
    pub fn byte_frequency_data(&self, out: &mut [u8; ANALYSER_BIN_COUNT]) -> bool {
        match self.inner.lock() {
            Ok(mut state) => match &mut *state {
                GraphState::Active(graph) => {
                    graph.analyser.byte_frequency_data(out);
                    true
                }
                _ => false,
            },
            Err(_) => false,
        }
    }
}
