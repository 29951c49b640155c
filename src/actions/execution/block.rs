use crate::actions::common::{begin_activation, requested_path};
use crate::actions::execution::movement::{follow_path, PathOutcome};
use crate::error::Result;
use crate::model::action::Action;
use crate::model::block::BlockParams;
use crate::model::enums::ActionType;
use crate::model::result::ActionOutcome;
use crate::rules::block::{resolve_block, resolve_multiple_block};
use crate::rules::context::ResolutionContext;
use tracing::debug;

pub fn block_execution(ctx: &mut ResolutionContext, action: &Action) -> Result<ActionOutcome> {
    let attacker = action.player().ok_or("Block without a player")?;
    let defender = action.target().ok_or("Block without a target")?;
    if let Some(outcome) = begin_activation(ctx, attacker, ActionType::Block)? {
        return Ok(outcome);
    }
    resolve_block(ctx, &BlockParams::new(attacker, defender))
}

/// Moves along the path, then blocks. A blitzer held up on the way keeps its turn but
/// never throws the block.
pub fn blitz_execution(ctx: &mut ResolutionContext, action: &Action) -> Result<ActionOutcome> {
    let attacker = action.player().ok_or("Blitz without a player")?;
    let defender = action.target().ok_or("Blitz without a target")?;
    if let Some(outcome) = begin_activation(ctx, attacker, ActionType::Blitz)? {
        return Ok(outcome);
    }

    let path = requested_path(&ctx.game_state, action, attacker)?;
    match follow_path(ctx, attacker, &path)? {
        PathOutcome::Turnover => return Ok(ActionOutcome::Turnover),
        PathOutcome::Stopped => return Ok(ActionOutcome::Ok),
        PathOutcome::Completed => {}
    }

    let blitzer = ctx.game_state.get_player(attacker)?;
    let target = ctx.game_state.get_player(defender)?;
    let in_reach = match (blitzer.position, target.position) {
        (Some(a), Some(d)) => a.is_adjacent(&d),
        _ => false,
    };
    if !blitzer.is_standing() || !target.is_standing() || !in_reach {
        debug!(attacker, defender, "blitz target out of reach after the move");
        return Ok(ActionOutcome::Ok);
    }
    resolve_block(ctx, &BlockParams::blitz(attacker, defender))
}

pub fn multiple_block_execution(ctx: &mut ResolutionContext, action: &Action) -> Result<ActionOutcome> {
    let attacker = action.player().ok_or("Multiple block without a player")?;
    let first = action.target().ok_or("Multiple block without a first target")?;
    let second = action
        .second_target()
        .ok_or("Multiple block without a second target")?;
    if let Some(outcome) = begin_activation(ctx, attacker, ActionType::MultipleBlock)? {
        return Ok(outcome);
    }
    resolve_multiple_block(ctx, attacker, first, second)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::dice::ScriptedDice;
    use crate::model::enums::{PlayerCondition, Skill, TeamSide};
    use crate::model::game::GameState;
    use crate::model::player::Player;
    use crate::model::position::Square;
    use crate::pathfinding::Path;

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
    fn test_blitz_moves_then_blocks_with_horns() {
        let mut state = GameState::default();
        state.add_player(player("blitzer", TeamSide::Home, 5, 5, &[Skill::Horns]));
        state.add_player(player("target", TeamSide::Away, 8, 5, &[]));
        let config = EngineConfig::default();
        // Horns makes it 4 against 3: two dice, DD and Pushed; armour 1+1
        let mut dice = ScriptedDice::new([6, 3, 1, 1]);
        let (outcome, state) = {
            let mut ctx = ResolutionContext::new(state, &mut dice, &config);
            let path = Path::annotate(&ctx.game_state, "blitzer", &[Square::new(6, 5), Square::new(7, 5)]).unwrap();
            let action = Action::new(ActionType::Blitz, Some("blitzer".to_string()), None)
                .with_target("target")
                .with_path(path);
            (blitz_execution(&mut ctx, &action).unwrap(), ctx.game_state)
        };
        assert_eq!(outcome, ActionOutcome::Ok);
        assert!(dice.is_exhausted());
        assert!(state.home.blitz_used);
        assert_eq!(state.players["target"].position, Some(Square::new(9, 5)));
        assert_eq!(state.players["target"].state.condition, PlayerCondition::Prone);
        assert_eq!(state.players["blitzer"].position, Some(Square::new(8, 5)));
    }

    #[test]
    fn test_failed_wild_animal_wastes_block_only_when_not_blocking() {
        let mut state = GameState::default();
        state.add_player(player("animal", TeamSide::Home, 5, 5, &[Skill::WildAnimal]));
        state.add_player(player("target", TeamSide::Away, 6, 5, &[]));
        let config = EngineConfig::default();
        // no Wild Animal roll for a block: single die, Pushed
        let mut dice = ScriptedDice::new([3]);
        let outcome = {
            let mut ctx = ResolutionContext::new(state, &mut dice, &config);
            let action = Action::new(ActionType::Block, Some("animal".to_string()), None).with_target("target");
            block_execution(&mut ctx, &action).unwrap()
        };
        assert_eq!(outcome, ActionOutcome::Ok);
        assert!(dice.is_exhausted());
    }
}
