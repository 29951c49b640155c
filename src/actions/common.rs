use crate::actions::execution::big_guy::pre_action_check;
use crate::error::Result;
use crate::model::action::Action;
use crate::model::constants::PITCH_WIDTH;
use crate::model::enums::{ActionType, GamePhase, TeamSide};
use crate::model::event::{EventKind, GameEvent};
use crate::model::game::GameState;
use crate::model::result::ActionOutcome;
use crate::pathfinding::Path;
use crate::rules::context::ResolutionContext;
use tracing::debug;

/// Column a carrier of `side` has to stand in to score.
pub fn scoring_column(side: TeamSide) -> i32 {
    match side {
        TeamSide::Home => PITCH_WIDTH - 1,
        TeamSide::Away => 0,
    }
}

/// Marks the player and the team as having used the action. On the first activation of the
/// turn the big guy checks are rolled; `Some` carries the outcome when the activation ends
/// there.
pub fn begin_activation(
    ctx: &mut ResolutionContext,
    player_id: &str,
    action_type: ActionType,
) -> Result<Option<ActionOutcome>> {
    let player = ctx.game_state.get_player_mut(player_id)?;
    let fresh = !player.state.has_moved && !player.state.has_acted;
    let side = player.side;
    match action_type {
        ActionType::Move | ActionType::StandUp => player.state.has_moved = true,
        ActionType::Blitz => {
            player.state.has_acted = true;
            player.state.used_blitz = true;
        }
        _ => player.state.has_acted = true,
    }

    let team = ctx.game_state.team_mut(side);
    match action_type {
        ActionType::Blitz => team.blitz_used = true,
        ActionType::Pass | ActionType::ThrowTeamMate | ActionType::BombThrow => team.pass_used = true,
        ActionType::Handoff => team.handoff_used = true,
        ActionType::Foul => team.foul_used = true,
        _ => {}
    }

    if fresh && !pre_action_check(ctx, player_id, action_type)? {
        return Ok(Some(ActionOutcome::Failed));
    }
    Ok(None)
}

/// The path requested with the action. A plain move to one square without annotations gets
/// annotated here.
pub fn requested_path(game_state: &GameState, action: &Action, player_id: &str) -> Result<Path> {
    if !action.path().is_empty() {
        return Ok(action.path().clone());
    }
    match (action.action_type(), action.position()) {
        (ActionType::Move, Some(square)) => Path::annotate(game_state, player_id, &[square]),
        _ => Ok(Path::default()),
    }
}

/// Scores for a standing carrier in the opposing end zone. Returns whether a touchdown was
/// scored.
pub fn check_touchdown(ctx: &mut ResolutionContext) -> Result<bool> {
    if ctx.game_state.phase != GamePhase::Play {
        return Ok(false);
    }
    let Some(carrier) = ctx.game_state.carrier() else {
        return Ok(false);
    };
    let Some(square) = carrier.position else {
        return Ok(false);
    };
    if !carrier.is_standing() || square.x != scoring_column(carrier.side) {
        return Ok(false);
    }

    let carrier_id = carrier.player_id.clone();
    let side = carrier.side;
    let team = ctx.game_state.team_mut(side);
    team.score += 1;
    let score = team.score;
    ctx.game_state.phase = GamePhase::Touchdown;
    ctx.emit(
        GameEvent::new(EventKind::Touchdown)
            .with_player(&carrier_id)
            .with_to(Some(square))
            .with_roll(score),
    );
    debug!(carrier = %carrier_id, ?side, score, "touchdown");
    Ok(true)
}
