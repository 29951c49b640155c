use super::event::GameEvent;
use super::game::GameState;
use serde::{Deserialize, Serialize};

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionOutcome {
    Ok,
    /// Legally attempted but stopped before it had an effect.
    Failed,
    /// The acting side's turn ends.
    Turnover,
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct ActionResult {
    pub state: GameState,
    pub events: Vec<GameEvent>,
    pub outcome: ActionOutcome,
}

impl ActionResult {
    pub fn is_turnover(&self) -> bool {
        self.outcome == ActionOutcome::Turnover
    }
}
