//! Scene, effect, and palette ownership; the scene-manager mutation
//! mediator; and the pattern-transition state machine.

#![warn(clippy::all, clippy::pedantic)]

mod error;
mod load;
mod manager;
mod scene;
mod transition;

pub use error::{Result, SceneError};
pub use load::parse_scene_file;
pub use manager::{SceneManager, TransitionConfig};
pub use scene::Scene;
pub use transition::{PatternTransition, TransitionPhase};
