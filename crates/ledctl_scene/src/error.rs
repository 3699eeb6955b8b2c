//! Error Types
//!
//! Covers scene-file I/O/parse failures and unknown-target mutation
//! requests. Every fallible [`SceneManager`](crate::manager::SceneManager)
//! operation returns one of these without mutating state on failure.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SceneError {
    /// File I/O failure while loading a scene file.
    #[error("scene file I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON structurally valid but not a recognized scene shape: must have
    /// a `scene_ID` root key or a `scenes` array.
    #[error("unrecognized scene file shape: {0}")]
    UnrecognizedShape(String),

    /// JSON parse failure.
    #[error("scene JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// `switch_scene`/`set_effect`/`set_palette`/`update_palette_color`
    /// referenced an id that does not resolve.
    #[error("unknown {kind} id: {id}")]
    UnknownTarget {
        /// `"scene"`, `"effect"`, or `"palette"`.
        kind: &'static str,
        /// The id as given, formatted for display.
        id: String,
    },

    /// No scene is currently active.
    #[error("no active scene")]
    NoActiveScene,

    /// A color index outside `[0, 5]` was given to `update_palette_color`.
    #[error("palette color index {0} out of range (expected 0..=5)")]
    InvalidColorIndex(usize),

    /// A loaded segment failed its structural validation (`length`/`color`
    /// arity, `move_range` ordering) or duplicated another segment's id
    /// within the same effect.
    #[error("invalid segment: {0}")]
    InvalidSegment(#[from] ledctl_core::CoreError),
}

pub type Result<T> = std::result::Result<T, SceneError>;
