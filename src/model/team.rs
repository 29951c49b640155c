use super::enums::TeamSide;
use serde::{Deserialize, Serialize};

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Team {
    pub side: TeamSide,
    pub rerolls: u8,
    pub score: u8,
    pub turn_number: u8,
    #[serde(default)]
    pub reroll_used_this_turn: bool,
    #[serde(default)]
    pub blitz_used: bool,
    #[serde(default)]
    pub pass_used: bool,
    #[serde(default)]
    pub handoff_used: bool,
    #[serde(default)]
    pub foul_used: bool,
}

impl Team {
    pub fn new(side: TeamSide) -> Self {
        Team {
            side,
            rerolls: 3,
            score: 0,
            turn_number: 0,
            reroll_used_this_turn: false,
            blitz_used: false,
            pass_used: false,
            handoff_used: false,
            foul_used: false,
        }
    }

    pub fn can_use_reroll(&self) -> bool {
        self.rerolls > 0 && !self.reroll_used_this_turn
    }

    /// Spends one team reroll for this turn.
    pub fn use_reroll(&mut self) {
        self.rerolls = self.rerolls.saturating_sub(1);
        self.reroll_used_this_turn = true;
    }

    pub fn reset_for_new_turn(&mut self) {
        self.reroll_used_this_turn = false;
        self.blitz_used = false;
        self.pass_used = false;
        self.handoff_used = false;
        self.foul_used = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reroll_once_per_turn() {
        let mut team = Team::new(TeamSide::Home);
        assert!(team.can_use_reroll());
        team.use_reroll();
        assert_eq!(team.rerolls, 2);
        assert!(!team.can_use_reroll());
        team.reset_for_new_turn();
        assert!(team.can_use_reroll());
    }
}
