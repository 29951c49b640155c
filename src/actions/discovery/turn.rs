use crate::actions::discovery::block::block_discovery;
use crate::actions::discovery::movement::move_discovery;
use crate::actions::discovery::pass::pass_discovery;
use crate::actions::discovery::special::{foul_discovery, special_discovery};
use crate::actions::validation::collect_violations;
use crate::config::EngineConfig;
use crate::error::Result;
use crate::model::action::Action;
use crate::model::enums::{ActionType, GamePhase, PlayerCondition, Skill};
use crate::model::game::GameState;
use crate::model::player::Player;
use tracing::trace;

/// Every legal action of the active side: ending the turn first, then per player in id order.
pub fn turn_discovery(game_state: &GameState, config: &EngineConfig) -> Result<Vec<Action>> {
    if game_state.phase != GamePhase::Play {
        return Ok(vec![]);
    }

    let mut candidates = vec![Action::end_turn()];
    for player in game_state.players_of(game_state.active_side) {
        if !can_activate(player) {
            continue;
        }
        if player.has_skill(Skill::BallAndChain) {
            candidates.push(Action::new(
                ActionType::BallAndChain,
                Some(player.player_id.clone()),
                None,
            ));
            continue;
        }

        move_discovery(game_state, player, &mut candidates)?;
        if player.state.has_moved {
            continue;
        }
        block_discovery(game_state, player, &mut candidates)?;
        pass_discovery(game_state, player, config, &mut candidates)?;
        foul_discovery(game_state, player, &mut candidates)?;
        special_discovery(game_state, player, config, &mut candidates)?;
    }

    let found = candidates.len();
    let actions: Vec<Action> = candidates
        .into_iter()
        .filter(|action| collect_violations(game_state, action, config).is_empty())
        .collect();
    trace!(found, legal = actions.len(), "turn discovery");
    Ok(actions)
}

fn can_activate(player: &Player) -> bool {
    player.position.is_some()
        && player.state.condition != PlayerCondition::Stunned
        && !player.state.has_acted
}
