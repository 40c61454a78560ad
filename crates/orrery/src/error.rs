//! Error types for orrery.
//!
//! The formulas in [`crate::sim::formulas`] are total and never fail. Only
//! registry-level lookups and configuration parsing return [`SimResult`].

use thiserror::Error;

use crate::api::types::BodyId;

/// Result type alias for orrery operations.
pub type SimResult<T> = Result<T, SimError>;

/// Unified error type for the simulation core.
#[derive(Debug, Error)]
pub enum SimError {
    /// A computation needed the body's parent, but the body is a root.
    #[error("body '{body}' has no parent body")]
    MissingParent {
        /// Display name of the offending body.
        body: String,
    },

    /// A computation needed a positive, finite mass.
    #[error("body '{body}' has no usable mass")]
    MissingMass {
        /// Display name of the offending body.
        body: String,
    },

    /// Another body in the system already uses this name.
    #[error("a body named '{name}' already exists")]
    DuplicateName {
        /// The contested name.
        name: String,
    },

    /// Lookup by an id this registry never issued.
    #[error("no body with id {id:?} in this system")]
    UnknownBody {
        /// The id that failed to resolve.
        id: BodyId,
    },

    /// A configuration value is outside the range the simulation can run with.
    #[error("invalid configuration: {field} {reason}")]
    InvalidConfig {
        /// Name of the offending `SimConfig` field.
        field: &'static str,
        reason: &'static str,
    },

    /// Configuration JSON could not be parsed.
    #[error("configuration error: {0}")]
    Config(#[from] serde_json::Error),
}
