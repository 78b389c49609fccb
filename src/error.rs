//! Error types for the frame store.
//!
//! Most operations are total: an absent frame, slot, or facet, or a
//! conflicting create, reports failure through a `bool` or an empty
//! `Option` rather than an error. `FrameError` covers the cases that
//! surface as hard failures of the triggering call: delegation cycles,
//! capability (executor) failures, and persistence I/O.

use thiserror::Error;

/// Hard failures raised by canonical operations
#[derive(Debug, Error)]
pub enum FrameError {
    #[error("delegation cycle detected for slot '{slot}' at frame '{frame}'")]
    DelegationCycle { frame: String, slot: String },

    #[error("capability not registered: '{0}'")]
    UnknownCapability(String),

    #[error("capability '{name}' failed: {source}")]
    CapabilityFailed {
        name: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("document store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("document encode/decode error: {0}")]
    Codec(#[from] serde_json::Error),

    #[error("invalid document for frame '{frame}': {reason}")]
    InvalidDocument { frame: String, reason: String },
}
