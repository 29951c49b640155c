use crate::config::EngineConfig;
use crate::error::Result;
use crate::model::action::Action;
use crate::model::enums::{ActionType, Skill};
use crate::model::game::GameState;
use crate::model::player::Player;

/// Passes and hand-offs from the ball carrier to standing team-mates.
pub fn pass_discovery(
    game_state: &GameState,
    player: &Player,
    config: &EngineConfig,
    actions: &mut Vec<Action>,
) -> Result<()> {
    if !game_state.ball.is_carried_by(&player.player_id) || player.has_skill(Skill::NoHands) {
        return Ok(());
    }
    let square = player
        .position
        .ok_or("Ball carrier has no position in pass discovery")?;
    let team = game_state.team(player.side);

    let receivers = game_state
        .players_of(player.side)
        .filter(|team_mate| team_mate.player_id != player.player_id && team_mate.is_standing());
    for receiver in receivers {
        let Some(to) = receiver.position else {
            continue;
        };
        let distance = square.distance(&to);
        if !team.pass_used && distance <= config.max_pass_range {
            actions.push(Action::new(
                ActionType::Pass,
                Some(player.player_id.clone()),
                Some(to),
            ));
        }
        if !team.handoff_used && distance == 1 {
            actions.push(
                Action::new(ActionType::Handoff, Some(player.player_id.clone()), None)
                    .with_target(receiver.player_id.clone()),
            );
        }
    }
    Ok(())
}
