use crate::error::Result;
use crate::model::constants::{
    MAX_BOUNCE_DEPTH, MAX_CHAIN_PUSH_DEPTH, MAX_GFI, MAX_GFI_SPRINT, MAX_PASS_RANGE,
};
use serde::{Deserialize, Serialize};

/// Tunable limits of the resolver. Missing JSON fields fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Bounces beyond this depth leave the ball where it is.
    pub max_bounce_depth: u8,
    /// Chain pushes deeper than this are abandoned and nobody moves.
    pub max_chain_push_depth: u8,
    pub max_pass_range: u32,
    pub max_gfi: u8,
    pub max_gfi_sprint: u8,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            max_bounce_depth: MAX_BOUNCE_DEPTH,
            max_chain_push_depth: MAX_CHAIN_PUSH_DEPTH,
            max_pass_range: MAX_PASS_RANGE,
            max_gfi: MAX_GFI,
            max_gfi_sprint: MAX_GFI_SPRINT,
        }
    }
}

impl EngineConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn gfi_allowance(&self, sprint: bool) -> u8 {
        if sprint {
            self.max_gfi_sprint
        } else {
            self.max_gfi
        }
    }
}
