use crate::error::Result;
use crate::model::constants::{LEAP_COST, STAND_UP_COST};
use crate::model::enums::Skill;
use crate::model::game::GameState;
use crate::model::position::Square;
use crate::rules::tacklezones::{count_tacklezones, dodge_target_for, leap_target_for};
use serde::{Deserialize, Serialize};

/// One square of a move, annotated with the rolls it needs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveStep {
    pub square: Square,
    #[serde(default)]
    pub requires_dodge: bool,
    #[serde(default)]
    pub dodge_target: Option<u8>,
    #[serde(default)]
    pub is_gfi: bool,
    #[serde(default)]
    pub leap: bool,
}

impl MoveStep {
    pub fn new(square: Square) -> Self {
        MoveStep {
            square,
            requires_dodge: false,
            dodge_target: None,
            is_gfi: false,
            leap: false,
        }
    }

    pub fn cost(&self) -> u8 {
        if self.leap {
            LEAP_COST
        } else {
            1
        }
    }
}

/// A sequence of annotated steps (does NOT include the starting square).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Path {
    pub steps: Vec<MoveStep>,
}

impl Path {
    pub fn new(steps: Vec<MoveStep>) -> Self {
        Path { steps }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Final destination, if the path moves at all.
    pub fn target(&self) -> Option<Square> {
        self.steps.last().map(|step| step.square)
    }

    pub fn squares(&self) -> impl Iterator<Item = Square> + '_ {
        self.steps.iter().map(|step| step.square)
    }

    pub fn movement_cost(&self) -> u32 {
        self.steps.iter().map(|step| u32::from(step.cost())).sum()
    }

    pub fn gfis_used(&self) -> usize {
        self.steps.iter().filter(|step| step.is_gfi).count()
    }

    /// Annotates plain squares for `player_id` as the pathfinder would: dodges when leaving a
    /// tacklezone, GFIs once the movement allowance is spent. Squares two away become leaps.
    pub fn annotate(game_state: &GameState, player_id: &str, squares: &[Square]) -> Result<Path> {
        let player = game_state.get_player(player_id)?;
        let mut current = player
            .position
            .ok_or("Cannot annotate a path for a player off the pitch")?;
        let mut used = player.state.movement_used as i32;
        if player.state.condition.is_down() && !player.has_skill(Skill::JumpUp) {
            used += STAND_UP_COST as i32;
        }

        let mut steps = Vec::with_capacity(squares.len());
        for square in squares {
            let leap = current.distance(square) == 2;
            let mut step = MoveStep::new(*square);
            step.leap = leap;
            used += step.cost() as i32;
            step.is_gfi = used > player.get_ma() as i32;

            if leap {
                step.dodge_target = Some(leap_target_for(game_state, player, square));
            } else if count_tacklezones(game_state, &current, player.side, None) > 0 {
                step.requires_dodge = true;
                step.dodge_target = Some(dodge_target_for(game_state, player, &current, square));
            }
            steps.push(step);
            current = *square;
        }
        Ok(Path::new(steps))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_new() {
        let path = Path::default();
        assert!(path.is_empty());
        assert_eq!(path.target(), None);
        assert_eq!(path.movement_cost(), 0);
    }

    #[test]
    fn test_path_cost_counts_leaps_twice() {
        let mut leap = MoveStep::new(Square::new(4, 4));
        leap.leap = true;
        let mut gfi = MoveStep::new(Square::new(5, 4));
        gfi.is_gfi = true;
        let path = Path::new(vec![MoveStep::new(Square::new(2, 4)), leap, gfi]);

        assert_eq!(path.len(), 3);
        assert_eq!(path.movement_cost(), 4);
        assert_eq!(path.gfis_used(), 1);
        assert_eq!(path.target(), Some(Square::new(5, 4)));
    }

    #[test]
    fn test_long_path_cost_does_not_wrap() {
        let steps = (0..300)
            .map(|i| MoveStep::new(Square::new(5 + i % 2, 7)))
            .collect();
        let path = Path::new(steps);
        assert_eq!(path.movement_cost(), 300);
    }
}
