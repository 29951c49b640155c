use crate::error::Result;
use crate::model::action::Action;
use crate::model::enums::{ActionType, Skill};
use crate::model::game::GameState;
use crate::model::player::Player;
use crate::pathfinding::Path;

/// Blocks, blitzes and multiple blocks against standing enemies.
pub fn block_discovery(game_state: &GameState, player: &Player, actions: &mut Vec<Action>) -> Result<()> {
    let square = player
        .position
        .ok_or("Player has no position in block discovery")?;
    let player_id = player.player_id.clone();
    let adjacent: Vec<&Player> = game_state.adjacent_standing(&square, player.side.opponent());

    if player.is_standing() {
        for opponent in &adjacent {
            actions.push(
                Action::new(ActionType::Block, Some(player_id.clone()), None)
                    .with_target(opponent.player_id.clone()),
            );
        }
    }

    if !game_state.team(player.side).blitz_used {
        for opponent in game_state.players_of(player.side.opponent()) {
            let Some(target_square) = opponent.position.filter(|_| opponent.is_standing()) else {
                continue;
            };
            let blitz = Action::new(ActionType::Blitz, Some(player_id.clone()), None)
                .with_target(opponent.player_id.clone());
            if square.is_adjacent(&target_square) {
                actions.push(blitz);
                continue;
            }
            // One step away: the first free square next to both.
            let step = square
                .get_adjacent_squares(true)
                .into_iter()
                .filter(|next| !game_state.is_occupied(next))
                .find(|next| next.is_adjacent(&target_square));
            if let Some(step) = step {
                let path = Path::annotate(game_state, &player_id, &[step])?;
                actions.push(blitz.with_path(path));
            }
        }
    }

    if player.has_skill(Skill::MultipleBlock) && !player.has_skill(Skill::Frenzy) && player.is_standing() {
        for (index, first) in adjacent.iter().enumerate() {
            for second in &adjacent[index + 1..] {
                actions.push(
                    Action::new(ActionType::MultipleBlock, Some(player_id.clone()), None)
                        .with_target(first.player_id.clone())
                        .with_second_target(second.player_id.clone()),
                );
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::enums::TeamSide;
    use crate::model::position::Square;

    fn player(id: &str, side: TeamSide, x: i32, y: i32) -> Player {
        Player {
            player_id: id.to_string(),
            side,
            position: Some(Square::new(x, y)),
            ..Default::default()
        }
    }

    #[test]
    fn test_block_and_blitz_targets() {
        let mut state = GameState::default();
        state.add_player(player("attacker", TeamSide::Home, 5, 5));
        state.add_player(player("near", TeamSide::Away, 6, 5));
        state.add_player(player("reachable", TeamSide::Away, 7, 7));
        state.add_player(player("far", TeamSide::Away, 12, 12));
        let mut actions = Vec::new();
        block_discovery(&state, &state.players["attacker"], &mut actions).unwrap();

        let blocks: Vec<_> = actions
            .iter()
            .filter(|action| action.action_type() == ActionType::Block)
            .collect();
        assert_eq!(blocks.len(), 1);
        let blitz_targets: Vec<_> = actions
            .iter()
            .filter(|action| action.action_type() == ActionType::Blitz)
            .filter_map(|action| action.target())
            .collect();
        assert_eq!(blitz_targets, vec!["near", "reachable"]);
    }

    #[test]
    fn test_multiple_block_pairs() {
        let mut state = GameState::default();
        let mut attacker = player("attacker", TeamSide::Home, 5, 5);
        attacker.skills.add(Skill::MultipleBlock);
        state.add_player(attacker);
        state.add_player(player("a", TeamSide::Away, 6, 5));
        state.add_player(player("b", TeamSide::Away, 4, 5));
        state.add_player(player("c", TeamSide::Away, 5, 6));
        state.home.blitz_used = true;
        let mut actions = Vec::new();
        block_discovery(&state, &state.players["attacker"], &mut actions).unwrap();
        let pairs = actions
            .iter()
            .filter(|action| action.action_type() == ActionType::MultipleBlock)
            .count();
        assert_eq!(pairs, 3);
    }
}
