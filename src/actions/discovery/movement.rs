use crate::error::Result;
use crate::model::action::Action;
use crate::model::constants::STAND_UP_COST;
use crate::model::enums::{ActionType, PlayerCondition, Skill};
use crate::model::game::GameState;
use crate::model::player::Player;
use crate::pathfinding::Path;

/// Stand up for prone players and one-square moves to every free neighbour. Longer paths
/// come from the pathfinder.
pub fn move_discovery(game_state: &GameState, player: &Player, actions: &mut Vec<Action>) -> Result<()> {
    let square = player
        .position
        .ok_or("Player has no position in move discovery")?;

    if player.state.condition == PlayerCondition::Prone
        && (player.has_skill(Skill::JumpUp) || player.movement_left() >= STAND_UP_COST as i32)
    {
        actions.push(Action::new(
            ActionType::StandUp,
            Some(player.player_id.clone()),
            None,
        ));
    }

    for neighbour in square.get_adjacent_squares(true) {
        if game_state.is_occupied(&neighbour) {
            continue;
        }
        let path = Path::annotate(game_state, &player.player_id, &[neighbour])?;
        actions.push(
            Action::new(
                ActionType::Move,
                Some(player.player_id.clone()),
                Some(neighbour),
            )
            .with_path(path),
        );
    }
    Ok(())
}
