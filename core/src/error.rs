use crate::types::{AgentId, Tick};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    // ── Usage errors: the caller asked for something the state forbids ──
    #[error("Human {human} is not sick; secondary cases are undefined")]
    NotSick { human: AgentId },

    #[error("Human {human} has no open sickness record")]
    NoOpenSickness { human: AgentId },

    #[error("Agent {id} not found")]
    UnknownAgent { id: AgentId },

    #[error("Agent {id} already registered as a {kind}")]
    DuplicateAgent { id: AgentId, kind: &'static str },

    // ── Data errors: the data itself is incomplete or malformed ─────────
    #[error("Contact with {other} starting at tick {start} has not ended")]
    OpenContact { other: AgentId, start: Tick },

    #[error("Agent {id} has an empty trajectory")]
    EmptyTrajectory { id: AgentId },

    #[error("Agent {id} is invalid: {reason}")]
    InvalidAgent { id: AgentId, reason: String },

    // ── Configuration ──────────────────────────────────────────────────
    #[error("Invalid config: {field} {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SimError {
    /// The caller violated an operation's precondition.
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            Self::NotSick { .. }
                | Self::NoOpenSickness { .. }
                | Self::UnknownAgent { .. }
                | Self::DuplicateAgent { .. }
        )
    }

    /// The data handed to the core cannot answer the question asked of it.
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            Self::OpenContact { .. } | Self::EmptyTrajectory { .. } | Self::InvalidAgent { .. }
        )
    }
}

pub type SimResult<T> = Result<T, SimError>;
