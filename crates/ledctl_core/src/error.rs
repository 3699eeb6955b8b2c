//! Error Types
//!
//! Covers the structural invariants of the animation model. Rendering
//! itself never fails: an out-of-range palette index resolves to black
//! rather than erroring, per the segment color-synthesis rule, so this
//! type only guards construction-time validation.

use thiserror::Error;

/// Errors raised while constructing or validating core animation types.
#[derive(Error, Debug)]
pub enum CoreError {
    /// `length.len() > color.len()`, violating the segment invariant.
    #[error("segment {segment_id}: length has {length_len} parts but color has only {color_len}")]
    SegmentLengthExceedsColor {
        /// The offending segment's id.
        segment_id: u32,
        /// `length.len()`.
        length_len: usize,
        /// `color.len()`.
        color_len: usize,
    },

    /// `move_range = [lo, hi]` is not well-ordered (`lo >= hi`).
    #[error("segment {segment_id}: move_range [{lo}, {hi}] is not well-ordered")]
    InvalidMoveRange {
        /// The offending segment's id.
        segment_id: u32,
        /// The lower bound as given.
        lo: f32,
        /// The upper bound as given.
        hi: f32,
    },

    /// A duplicate segment id was inserted into an effect.
    #[error("duplicate segment id {0} within effect")]
    DuplicateSegmentId(u32),
}

/// Alias for `Result<T, CoreError>`.
pub type Result<T> = std::result::Result<T, CoreError>;
