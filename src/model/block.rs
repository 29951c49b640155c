use crate::model::position::Square;
use serde::{Deserialize, Serialize};

/// Everything the block resolver needs to know about one block.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct BlockParams {
    pub attacker: String,
    pub defender: String,
    pub is_blitz: bool,
    /// Horns adds +1 ST; only the first block of a blitz gets it.
    pub horns_bonus: bool,
    pub follow_up: bool,
    /// Set on the forced second block of a frenzied attacker.
    pub frenzy_block: bool,
    pub defender_strength_bonus: u8,
}

impl BlockParams {
    pub fn new(attacker: &str, defender: &str) -> Self {
        BlockParams {
            attacker: attacker.to_string(),
            defender: defender.to_string(),
            is_blitz: false,
            horns_bonus: false,
            follow_up: true,
            frenzy_block: false,
            defender_strength_bonus: 0,
        }
    }

    pub fn blitz(attacker: &str, defender: &str) -> Self {
        BlockParams {
            is_blitz: true,
            horns_bonus: true,
            ..BlockParams::new(attacker, defender)
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub struct BlockDice {
    pub count: u8,
    pub attacker_chooses: bool,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub enum BlockPrecheck {
    /// No pre-block skill intervened, roll the block dice.
    Proceed,
    /// Foul Appearance: the block never happens.
    Wasted,
    /// Chainsaw or Stab replaced the block with an armour roll.
    WeaponUsed,
}

/// The chosen face translated into what happens to both players, before any pushback.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub enum BlockOutcome {
    AttackerDown,
    Wrestled,
    BothDown {
        attacker_falls: bool,
        defender_falls: bool,
    },
    Pushback {
        knock_down: bool,
    },
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub enum PushResult {
    Pushed { from: Square, to: Square },
    StoodFirm,
    CrowdSurf { from: Square },
    /// The chain grew past the depth cap; nobody moved.
    ChainAbandoned,
}

impl PushResult {
    pub fn vacated(&self) -> Option<Square> {
        match self {
            PushResult::Pushed { from, .. } | PushResult::CrowdSurf { from } => Some(*from),
            PushResult::StoodFirm | PushResult::ChainAbandoned => None,
        }
    }
}
