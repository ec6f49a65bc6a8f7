use thiserror::Error;

#[derive(Error, Debug)]
pub enum GraphError {
    #[error("Failed to calculate {filter_type} coefficients for band {band}")]
    CoefficientCalculation { band: usize, filter_type: String },
    #[error("Band index {index} out of range (0..{count})")]
    BandIndexOutOfRange { index: usize, count: usize },
    #[error("Failed to lock audio graph: {reason}")]
    GraphLock { reason: String },
}

#[derive(Error, Debug)]
pub enum MediaError {
    #[error("Playback rejected by platform: {reason}")]
    PlayRejected { reason: String },
    #[error("Media source unavailable: {reason}")]
    SourceUnavailable { reason: String },
}

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Tokio MPSC send error for transport command: {0}")]
    MpscSendError(
        #[from]
        tokio::sync::mpsc::error::SendError<crate::player::transport::commands::TransportCommand>,
    ),
    #[error("Failed to receive shutdown acknowledgement: {0}")]
    ShutdownSignalError(String),
    #[error("Transport reply channel dropped: {0}")]
    ReplyDropped(String),
}

// Command results cross the host boundary as strings; this centralizes the
// conversion.
impl From<GraphError> for String {
    fn from(err: GraphError) -> String {
        err.to_string()
    }
}
impl From<TransportError> for String {
    fn from(err: TransportError) -> String {
        err.to_string()
    }
}
