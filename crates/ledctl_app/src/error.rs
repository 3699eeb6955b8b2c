//! Error Types
//!
//! The crate-wide error enum. Every failure category maps onto one
//! variant each; only fatal init failures ever leave `main` as an
//! `Err`, every other category is logged and handled at its own layer.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    /// Malformed control input.
    #[error("malformed control input: {0}")]
    MalformedControl(#[from] ledctl_proto::ProtoError),

    /// An operation referenced a scene/effect/palette id that does not
    /// exist.
    #[error("unknown target: {0}")]
    UnknownTarget(#[from] ledctl_scene::SceneError),

    /// Scene file I/O or parse failure. Distinguished from
    /// [`EngineError::UnknownTarget`] only by provenance; both wrap
    /// [`ledctl_scene::SceneError`], so this variant is reserved for
    /// load-path failures surfaced directly to `main` (e.g. the initial
    /// scene directory scan).
    #[error("scene load error: {0}")]
    SceneLoad(String),

    /// Fatal init failure: cannot bind the inbound socket or cannot
    /// resolve an output destination.
    #[error("fatal initialization error: {0}")]
    Init(#[from] std::io::Error),

    /// Settings file present but not valid JSON.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
