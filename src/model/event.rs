use super::enums::{BlockDiceFace, Skill};
use super::position::Square;
use serde::{Deserialize, Serialize};

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventKind {
    ActionDeclared,
    Move,
    StandUp,
    Dodge,
    GoForIt,
    Leap,
    Pickup,
    Catch,
    Bounce,
    ThrowIn,
    Pass,
    Interception,
    HandOff,
    Block,
    BlockDie,
    Push,
    StandFirm,
    FollowUp,
    CrowdSurf,
    KnockDown,
    Armour,
    Injury,
    Casualty,
    SkillReroll,
    ProCheck,
    TeamReroll,
    LonerCheck,
    SkillUsed,
    Foul,
    Ejection,
    BigGuyCheck,
    ThrowTeamMate,
    Landing,
    Explosion,
    Touchdown,
    Turnover,
    EndTurn,
    DepthCapReached,
}

/// Append-only record of something that happened during a resolution. Never read back by the
/// engine.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct GameEvent {
    pub kind: EventKind,
    pub player: Option<String>,
    pub target: Option<String>,
    pub from: Option<Square>,
    pub to: Option<Square>,
    pub roll: Option<i32>,
    pub success: bool,
    pub skill: Option<Skill>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub face: Option<BlockDiceFace>,
}

impl GameEvent {
    pub fn new(kind: EventKind) -> Self {
        GameEvent {
            kind,
            player: None,
            target: None,
            from: None,
            to: None,
            roll: None,
            success: true,
            skill: None,
            face: None,
        }
    }

    pub fn with_player(mut self, player_id: &str) -> Self {
        self.player = Some(player_id.to_string());
        self
    }

    pub fn with_target(mut self, player_id: &str) -> Self {
        self.target = Some(player_id.to_string());
        self
    }

    pub fn with_from(mut self, square: Option<Square>) -> Self {
        self.from = square;
        self
    }

    pub fn with_to(mut self, square: Option<Square>) -> Self {
        self.to = square;
        self
    }

    pub fn with_roll(mut self, roll: impl Into<i32>) -> Self {
        self.roll = Some(roll.into());
        self
    }

    pub fn with_success(mut self, success: bool) -> Self {
        self.success = success;
        self
    }

    pub fn with_skill(mut self, skill: Skill) -> Self {
        self.skill = Some(skill);
        self
    }

    pub fn with_face(mut self, face: BlockDiceFace) -> Self {
        self.face = Some(face);
        self
    }
}
