use thiserror::Error;
use uuid::Uuid;

/// Errors raised at the I/O, store and validation boundaries.
///
/// The layout engine itself never returns these: bounds, positions,
/// connectors and the drag state machine are total over their inputs.
#[derive(Error, Debug)]
pub enum TimelineError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid project file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Phase not found: {id}")]
    PhaseNotFound { id: Uuid },

    #[error("Dependency cycle detected through {} phases", cycle.len())]
    DependencyCycle { cycle: Vec<Uuid> },

    #[error("Store rejected the update: {0}")]
    Store(String),

    #[error("Commit worker is no longer running")]
    WorkerDisconnected,
}

pub type Result<T> = std::result::Result<T, TimelineError>;
