#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::module_name_repetitions)]

//! Animation model and compositor: segment kinematics, palette-indexed
//! color synthesis, and multi-segment frame compositing.
//!
//! This crate is the pure, deterministic core of the engine: nothing here
//! touches the network, the filesystem, or wall-clock time. Callers pass
//! in `dt` and get back [`Frame`]s.

pub mod color;
pub mod effect;
pub mod error;
pub mod frame;
pub mod segment;

pub use color::{Palette, PaletteId, Rgb};
pub use effect::Effect;
pub use error::{CoreError, Result};
pub use frame::Frame;
pub use segment::Segment;
