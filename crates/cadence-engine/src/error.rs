use std::fmt;

use thiserror::Error;

use crate::device::GraphicsApi;

/// The engine module could not be obtained. The loop never starts.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Fetching or compiling the module failed.
    #[error("engine module failed to load: {0}")]
    Rejected(String),

    /// The module resolved but does not export the expected constructor.
    #[error("engine module does not export `{0}`")]
    MissingExport(String),
}

/// Surface or context acquisition failed. The loop never starts.
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("no drawing surface named `{id}`")]
    SurfaceNotFound { id: String },

    /// The host does not support the requested graphics API.
    #[error("failed to initialize {api}")]
    ContextUnavailable { api: GraphicsApi },

    #[error("engine client construction failed")]
    ClientConstruction(#[source] anyhow::Error),
}

/// Which engine call failed.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum EnginePhase {
    Update,
    Render,
}

impl fmt::Display for EnginePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EnginePhase::Update => "update",
            EnginePhase::Render => "render",
        })
    }
}

/// An engine call failed during an executed frame. The loop halts.
#[derive(Debug, Error)]
#[error("engine {phase} failed")]
pub struct EngineFailure {
    pub phase: EnginePhase,
    #[source]
    pub source: anyhow::Error,
}

impl EngineFailure {
    pub(crate) fn new(phase: EnginePhase, source: anyhow::Error) -> Self {
        Self { phase, source }
    }
}

/// Any fatal driver error. None of these are retried.
#[derive(Debug, Error)]
pub enum DriverError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Bootstrap(#[from] BootstrapError),

    #[error(transparent)]
    Engine(#[from] EngineFailure),
}
