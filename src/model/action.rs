use crate::model::enums::ActionType;
use crate::model::position::Square;
use crate::pathfinding::Path;
use serde::{Deserialize, Serialize};

/// A requested action. `position` is the target square of passes and throws, `target` the
/// player being blocked, fouled, handed to or thrown, and `path` the squares moved before
/// the action itself.
#[derive(Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Clone)]
pub struct Action {
    action_type: ActionType,
    player: Option<String>,
    position: Option<Square>,
    #[serde(default)]
    target: Option<String>,
    #[serde(default)]
    second_target: Option<String>,
    #[serde(default)]
    path: Path,
}

impl Action {
    pub fn new(action_type: ActionType, player: Option<String>, position: Option<Square>) -> Self {
        Action {
            action_type,
            player,
            position,
            target: None,
            second_target: None,
            path: Path::default(),
        }
    }

    pub fn end_turn() -> Self {
        Action::new(ActionType::EndTurn, None, None)
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn with_second_target(mut self, target: impl Into<String>) -> Self {
        self.second_target = Some(target.into());
        self
    }

    pub fn with_path(mut self, path: Path) -> Self {
        self.path = path;
        self
    }

    pub fn action_type(&self) -> ActionType {
        self.action_type
    }

    pub fn player(&self) -> Option<&str> {
        self.player.as_deref()
    }

    pub fn position(&self) -> Option<Square> {
        self.position
    }

    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    pub fn second_target(&self) -> Option<&str> {
        self.second_target.as_deref()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
