use crate::config::EngineConfig;
use crate::error::Result;
use crate::model::action::Action;
use crate::model::enums::{ActionType, Skill};
use crate::model::game::GameState;
use crate::model::player::Player;
use crate::model::position::Square;

/// Spacing of the landing grid offered for team-mate throws.
const THROW_GRID_STEP: usize = 3;

pub fn foul_discovery(game_state: &GameState, player: &Player, actions: &mut Vec<Action>) -> Result<()> {
    if game_state.team(player.side).foul_used {
        return Ok(());
    }
    let square = player
        .position
        .ok_or("Player has no position in foul discovery")?;
    let victims = game_state.players_of(player.side.opponent()).filter(|opponent| {
        opponent.state.condition.is_down() && opponent.position.is_some_and(|p| p.is_adjacent(&square))
    });
    for victim in victims {
        actions.push(
            Action::new(ActionType::Foul, Some(player.player_id.clone()), None)
                .with_target(victim.player_id.clone()),
        );
    }
    Ok(())
}

/// Throw Team-Mate, bombs and Hypnotic Gaze for the players that have them.
pub fn special_discovery(
    game_state: &GameState,
    player: &Player,
    config: &EngineConfig,
    actions: &mut Vec<Action>,
) -> Result<()> {
    if !player.is_standing() {
        return Ok(());
    }
    let square = player
        .position
        .ok_or("Player has no position in special discovery")?;
    let pass_used = game_state.team(player.side).pass_used;

    if player.has_skill(Skill::ThrowTeamMate) && !pass_used {
        let landing_squares = throw_grid(&square, config.max_pass_range);
        let projectiles = game_state
            .adjacent_standing(&square, player.side)
            .into_iter()
            .filter(|team_mate| team_mate.has_skill(Skill::RightStuff));
        for projectile in projectiles {
            for to in landing_squares.iter().filter(|to| !game_state.is_occupied(to)) {
                actions.push(
                    Action::new(ActionType::ThrowTeamMate, Some(player.player_id.clone()), Some(*to))
                        .with_target(projectile.player_id.clone()),
                );
            }
        }
    }

    if player.has_skill(Skill::Bombardier) && !pass_used {
        let targets = game_state
            .players_of(player.side.opponent())
            .filter(|opponent| opponent.is_standing())
            .filter_map(|opponent| opponent.position)
            .filter(|to| square.distance(to) <= config.max_pass_range);
        for to in targets {
            actions.push(Action::new(
                ActionType::BombThrow,
                Some(player.player_id.clone()),
                Some(to),
            ));
        }
    }

    if player.has_skill(Skill::HypnoticGaze) {
        for opponent in game_state.adjacent_standing(&square, player.side.opponent()) {
            actions.push(
                Action::new(ActionType::HypnoticGaze, Some(player.player_id.clone()), None)
                    .with_target(opponent.player_id.clone()),
            );
        }
    }
    Ok(())
}

fn throw_grid(from: &Square, range: u32) -> Vec<Square> {
    let reach = range as i32;
    (-reach..=reach)
        .step_by(THROW_GRID_STEP)
        .flat_map(|dx| {
            (-reach..=reach)
                .step_by(THROW_GRID_STEP)
                .map(move |dy| from.offset(dx, dy))
        })
        .filter(|to| to.is_on_pitch() && to != from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::enums::{PlayerCondition, TeamSide};

    fn player(id: &str, side: TeamSide, x: i32, y: i32, skills: &[Skill]) -> Player {
        Player {
            player_id: id.to_string(),
            side,
            position: Some(Square::new(x, y)),
            skills: skills.iter().copied().collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_foul_only_on_downed_neighbours() {
        let mut state = GameState::default();
        state.add_player(player("fouler", TeamSide::Home, 5, 5, &[]));
        let mut down = player("down", TeamSide::Away, 6, 5, &[]);
        down.state.condition = PlayerCondition::Prone;
        state.add_player(down);
        state.add_player(player("up", TeamSide::Away, 4, 5, &[]));
        let mut actions = Vec::new();
        foul_discovery(&state, &state.players["fouler"], &mut actions).unwrap();
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].target(), Some("down"));
    }

    #[test]
    fn test_throw_grid_stays_in_range() {
        let from = Square::new(12, 7);
        let grid = throw_grid(&from, 13);
        assert!(!grid.is_empty());
        assert!(grid.iter().all(|to| to.is_on_pitch() && from.distance(to) <= 13));
        assert!(!grid.contains(&from));
    }

    #[test]
    fn test_throw_needs_right_stuff_team_mate() {
        let mut state = GameState::default();
        state.add_player(player("ogre", TeamSide::Home, 5, 5, &[Skill::ThrowTeamMate]));
        state.add_player(player("lineman", TeamSide::Home, 6, 5, &[]));
        let mut actions = Vec::new();
        special_discovery(&state, &state.players["ogre"], &EngineConfig::default(), &mut actions).unwrap();
        assert!(actions.is_empty());

        state.add_player(player("goblin", TeamSide::Home, 4, 5, &[Skill::RightStuff]));
        special_discovery(&state, &state.players["ogre"], &EngineConfig::default(), &mut actions).unwrap();
        assert!(!actions.is_empty());
        assert!(actions.iter().all(|action| action.target() == Some("goblin")));
    }

    #[test]
    fn test_gaze_and_bomb_targets() {
        let mut state = GameState::default();
        state.add_player(player(
            "vampire",
            TeamSide::Home,
            5,
            5,
            &[Skill::HypnoticGaze, Skill::Bombardier],
        ));
        state.add_player(player("victim", TeamSide::Away, 6, 6, &[]));
        let mut actions = Vec::new();
        special_discovery(&state, &state.players["vampire"], &EngineConfig::default(), &mut actions).unwrap();
        let kinds: Vec<_> = actions.iter().map(|action| action.action_type()).collect();
        assert_eq!(kinds, vec![ActionType::BombThrow, ActionType::HypnoticGaze]);
    }
}
