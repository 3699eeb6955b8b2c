//! A real-time LED animation playback engine with OSC remote control.
//!
//! The crate is a thin façade over its workspace members:
//!
//! - [`ledctl_core`]: segment kinematics, palette/frame types, and the
//!   per-effect compositor.
//! - [`ledctl_scene`]: scene/effect/palette ownership, the scene-manager
//!   mutation mediator, and the pattern-transition state machine.
//! - [`ledctl_proto`]: inbound OSC address parsing and argument
//!   validation.
//! - [`ledctl_output`]: outbound LED frame wire encoding and UDP
//!   fan-out.
//! - [`ledctl_app`]: the frame loop, the control dispatcher, and
//!   settings loading.

#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::too_many_arguments)]

pub use ledctl_app::{EngineError, Settings, run};
pub use ledctl_core::{Effect, Frame, Palette, PaletteId, Rgb, Segment};
pub use ledctl_output::OutputSink;
pub use ledctl_proto::{Command, OscType, ProtoError, parse as parse_control_address};
pub use ledctl_scene::{Scene, SceneManager, TransitionConfig};
