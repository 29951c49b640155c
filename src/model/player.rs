use super::enums::{PlayerCondition, Skill, TeamSide};
use super::position::Square;
use super::skills::SkillSet;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerState {
    pub condition: PlayerCondition,
    pub has_moved: bool,
    pub has_acted: bool,
    pub used_blitz: bool,
    pub lost_tacklezones: bool,
    pub pro_used: bool,
    /// Squares moved this activation, including stand up costs and GFIs.
    pub movement_used: u8,
}

impl Default for PlayerState {
    fn default() -> Self {
        PlayerState {
            condition: PlayerCondition::Standing,
            has_moved: false,
            has_acted: false,
            used_blitz: false,
            lost_tacklezones: false,
            pro_used: false,
            movement_used: 0,
        }
    }
}

impl PlayerState {
    /// Clears the per-turn flags. Stunned players roll over to prone.
    pub fn reset_for_new_turn(&mut self) {
        if self.condition == PlayerCondition::Stunned {
            self.condition = PlayerCondition::Prone;
        }
        self.has_moved = false;
        self.has_acted = false;
        self.used_blitz = false;
        self.lost_tacklezones = false;
        self.pro_used = false;
        self.movement_used = 0;
    }
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Player {
    pub player_id: String,
    pub side: TeamSide,
    pub skills: SkillSet,
    pub ma: u8,
    pub st: u8,
    pub ag: u8,
    pub av: u8,
    #[serde(default)]
    pub state: PlayerState,
    pub position: Option<Square>,
}

impl Default for Player {
    fn default() -> Self {
        Player {
            player_id: Uuid::new_v4().to_string(),
            side: TeamSide::Home,
            skills: SkillSet::new(),
            ma: 6,
            st: 3,
            ag: 3,
            av: 8,
            position: None,
            state: PlayerState::default(),
        }
    }
}

impl Player {
    pub fn get_ma(&self) -> u8 {
        self.ma.clamp(1, 10)
    }

    pub fn get_st(&self) -> u8 {
        self.st.clamp(1, 10)
    }

    pub fn get_ag(&self) -> u8 {
        self.ag.clamp(1, 10)
    }

    pub fn get_av(&self) -> u8 {
        self.av.clamp(1, 10)
    }

    pub fn has_skill(&self, skill: Skill) -> bool {
        self.skills.has(skill)
    }

    pub fn is_standing(&self) -> bool {
        self.state.condition.is_standing() && self.position.is_some()
    }

    /// Standing and not distracted: the player threatens the squares around it.
    pub fn exerts_tacklezones(&self) -> bool {
        self.is_standing() && !self.state.lost_tacklezones
    }

    pub fn movement_left(&self) -> i32 {
        self.get_ma() as i32 - self.state.movement_used as i32
    }
}
