pub mod actions;
pub mod config;
pub mod dice;
pub mod error;
pub mod model;
pub mod pathfinding;
pub mod rules;

#[cfg(feature = "python")]
mod python;

pub use actions::core::ActionRegistry;
pub use config::EngineConfig;
pub use dice::{DiceSource, RandomDice, ScriptedDice};
pub use error::{EngineError, Result};
pub use model::action::Action;
pub use model::game::GameState;
pub use model::result::{ActionOutcome, ActionResult};
