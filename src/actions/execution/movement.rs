use crate::actions::common::{begin_activation, requested_path};
use crate::error::Result;
use crate::model::action::Action;
use crate::model::constants::STAND_UP_COST;
use crate::model::enums::{ActionType, PlayerCondition, Skill};
use crate::model::event::{EventKind, GameEvent};
use crate::model::position::Square;
use crate::model::result::ActionOutcome;
use crate::pathfinding::{MoveStep, Path};
use crate::rules::ball::{resolve_bounce, resolve_pickup};
use crate::rules::context::ResolutionContext;
use crate::rules::injury::{knock_down, InjuryContext};
use crate::rules::reroll::attempt_roll;
use crate::rules::tacklezones::{dodge_target_for, gfi_target, leap_target_for, source_threats};
use tracing::debug;

const SHADOWING_TARGET: i32 = 6;

/// How far a player got along a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathOutcome {
    Completed,
    /// Held in place (Tentacles) or unable to stand up; the player is fine.
    Stopped,
    /// A roll failed and the player is on the ground.
    Turnover,
}

pub fn move_execution(ctx: &mut ResolutionContext, action: &Action) -> Result<ActionOutcome> {
    let player_id = action.player().ok_or("Move without a player")?;
    if let Some(outcome) = begin_activation(ctx, player_id, ActionType::Move)? {
        return Ok(outcome);
    }
    let path = requested_path(&ctx.game_state, action, player_id)?;
    match follow_path(ctx, player_id, &path)? {
        PathOutcome::Turnover => Ok(ActionOutcome::Turnover),
        PathOutcome::Completed | PathOutcome::Stopped => Ok(ActionOutcome::Ok),
    }
}

pub fn stand_up_execution(ctx: &mut ResolutionContext, action: &Action) -> Result<ActionOutcome> {
    let player_id = action.player().ok_or("Stand up without a player")?;
    if let Some(outcome) = begin_activation(ctx, player_id, ActionType::StandUp)? {
        return Ok(outcome);
    }
    if stand_up(ctx, player_id)? {
        Ok(ActionOutcome::Ok)
    } else {
        Ok(ActionOutcome::Failed)
    }
}

/// Gets a prone player on its feet: free with Jump Up, otherwise three squares of movement.
/// Fails without enough movement left.
pub fn stand_up(ctx: &mut ResolutionContext, player_id: &str) -> Result<bool> {
    let player = ctx.game_state.get_player_mut(player_id)?;
    if player.state.condition != PlayerCondition::Prone {
        return Ok(player.is_standing());
    }
    let jump_up = player.has_skill(Skill::JumpUp);
    let able = jump_up || player.movement_left() >= STAND_UP_COST as i32;
    if able {
        player.state.condition = PlayerCondition::Standing;
        player.state.has_moved = true;
        if !jump_up {
            player.state.movement_used = player.state.movement_used.saturating_add(STAND_UP_COST);
        }
    }
    let from = player.position;

    let mut event = GameEvent::new(EventKind::StandUp)
        .with_player(player_id)
        .with_from(from)
        .with_success(able);
    if jump_up {
        event = event.with_skill(Skill::JumpUp);
    }
    ctx.emit(event);
    Ok(able)
}

/// Stands the player up if needed, then walks the steps in order until one of them stops
/// the move.
pub fn follow_path(ctx: &mut ResolutionContext, player_id: &str, path: &Path) -> Result<PathOutcome> {
    if !stand_up(ctx, player_id)? {
        return Ok(PathOutcome::Stopped);
    }
    for step in &path.steps {
        match move_step(ctx, player_id, step)? {
            PathOutcome::Completed => {}
            stopped => return Ok(stopped),
        }
    }
    Ok(PathOutcome::Completed)
}

/// One square of movement with its leap, dodge and GFI rolls, then Shadowing and a pickup
/// if the ball lies there.
pub fn move_step(ctx: &mut ResolutionContext, player_id: &str, step: &MoveStep) -> Result<PathOutcome> {
    let player = ctx.game_state.get_player(player_id)?;
    let from = player.position.ok_or("Moving player is off the pitch")?;
    let to = step.square;
    let side = player.side;

    let mut dodged = false;
    if step.leap {
        let target = step
            .dodge_target
            .unwrap_or_else(|| leap_target_for(&ctx.game_state, player, &to));
        spend_movement(ctx, player_id, step.cost())?;
        let attempt = attempt_roll(ctx, player_id, target, None, false)?;
        ctx.emit(
            GameEvent::new(EventKind::Leap)
                .with_player(player_id)
                .with_from(Some(from))
                .with_to(Some(to))
                .with_roll(attempt.roll)
                .with_skill(Skill::Leap)
                .with_success(attempt.success),
        );
        if !attempt.success {
            return fall_at(ctx, player_id, to);
        }
    } else {
        if step.requires_dodge && held_by_tentacles(ctx, player_id, from)? {
            return Ok(PathOutcome::Stopped);
        }
        spend_movement(ctx, player_id, step.cost())?;

        if step.requires_dodge {
            let player = ctx.game_state.get_player(player_id)?;
            let target = step
                .dodge_target
                .unwrap_or_else(|| dodge_target_for(&ctx.game_state, player, &from, &to));
            let tackled = source_threats(&ctx.game_state, &from, side).tackle;
            let attempt = attempt_roll(ctx, player_id, target, Some(Skill::Dodge), tackled)?;
            ctx.emit(
                GameEvent::new(EventKind::Dodge)
                    .with_player(player_id)
                    .with_from(Some(from))
                    .with_to(Some(to))
                    .with_roll(attempt.roll)
                    .with_success(attempt.success),
            );
            if !attempt.success {
                return fall_at(ctx, player_id, to);
            }
            dodged = true;
        }
    }

    if step.is_gfi {
        let target = gfi_target(ctx.game_state.weather);
        let attempt = attempt_roll(ctx, player_id, target, Some(Skill::SureFeet), false)?;
        ctx.emit(
            GameEvent::new(EventKind::GoForIt)
                .with_player(player_id)
                .with_to(Some(to))
                .with_roll(attempt.roll)
                .with_success(attempt.success),
        );
        if !attempt.success {
            return fall_at(ctx, player_id, to);
        }
    }

    ctx.game_state.move_player(player_id, to)?;
    ctx.emit(
        GameEvent::new(EventKind::Move)
            .with_player(player_id)
            .with_from(Some(from))
            .with_to(Some(to)),
    );

    if dodged {
        shadow(ctx, player_id, from)?;
    }

    if ctx.game_state.ball.is_loose_at(&to) && !resolve_pickup(ctx, player_id)? {
        return Ok(PathOutcome::Turnover);
    }
    Ok(PathOutcome::Completed)
}

fn spend_movement(ctx: &mut ResolutionContext, player_id: &str, cost: u8) -> Result<()> {
    let state = &mut ctx.game_state.get_player_mut(player_id)?.state;
    state.movement_used = state.movement_used.saturating_add(cost);
    state.has_moved = true;
    Ok(())
}

/// A failed roll: the player ends up on the target square and falls there.
fn fall_at(ctx: &mut ResolutionContext, player_id: &str, square: Square) -> Result<PathOutcome> {
    ctx.game_state.move_player(player_id, square)?;
    let injury = InjuryContext::for_victim(ctx.game_state.get_player(player_id)?);
    knock_down(ctx, player_id, injury)?;
    if ctx.game_state.ball.is_loose_at(&square) {
        resolve_bounce(ctx, square, 0)?;
    }
    debug!(player_id, ?square, "player fell while moving");
    Ok(PathOutcome::Turnover)
}

/// The first Tentacles enemy next to `from` tries to hold the leaving player: D6 + ST each,
/// the mover escapes only by beating the holder.
fn held_by_tentacles(ctx: &mut ResolutionContext, player_id: &str, from: Square) -> Result<bool> {
    let mover = ctx.game_state.get_player(player_id)?;
    let mover_st = mover.get_st();
    let holder = ctx
        .game_state
        .players_of(mover.side.opponent())
        .filter(|enemy| enemy.exerts_tacklezones() && enemy.has_skill(Skill::Tentacles))
        .find(|enemy| enemy.position.is_some_and(|square| square.is_adjacent(&from)))
        .map(|enemy| (enemy.player_id.clone(), enemy.get_st()));
    let Some((holder_id, holder_st)) = holder else {
        return Ok(false);
    };

    let escape = ctx.d6()?.saturating_add(mover_st);
    let hold = ctx.d6()?.saturating_add(holder_st);
    let held = escape <= hold;
    ctx.emit(
        GameEvent::new(EventKind::SkillUsed)
            .with_player(&holder_id)
            .with_target(player_id)
            .with_skill(Skill::Tentacles)
            .with_roll(hold)
            .with_success(held),
    );
    Ok(held)
}

/// After a successful dodge, the first Shadowing enemy next to the vacated square may
/// follow into it: D6 + its MA − the dodger's MA of 6 or more.
fn shadow(ctx: &mut ResolutionContext, player_id: &str, vacated: Square) -> Result<()> {
    let mover = ctx.game_state.get_player(player_id)?;
    let mover_ma = mover.get_ma() as i32;
    let shadower = ctx
        .game_state
        .players_of(mover.side.opponent())
        .filter(|enemy| enemy.exerts_tacklezones() && enemy.has_skill(Skill::Shadowing))
        .find(|enemy| enemy.position.is_some_and(|square| square.is_adjacent(&vacated)))
        .map(|enemy| (enemy.player_id.clone(), enemy.get_ma() as i32, enemy.position));
    let Some((shadower_id, shadower_ma, shadower_from)) = shadower else {
        return Ok(());
    };

    let roll = ctx.d6()?;
    let follows = roll as i32 + shadower_ma - mover_ma >= SHADOWING_TARGET
        && !ctx.game_state.is_occupied(&vacated);
    ctx.emit(
        GameEvent::new(EventKind::SkillUsed)
            .with_player(&shadower_id)
            .with_target(player_id)
            .with_skill(Skill::Shadowing)
            .with_roll(roll)
            .with_success(follows),
    );
    if follows {
        ctx.game_state.move_player(&shadower_id, vacated)?;
        ctx.emit(
            GameEvent::new(EventKind::Move)
                .with_player(&shadower_id)
                .with_from(shadower_from)
                .with_to(Some(vacated))
                .with_skill(Skill::Shadowing),
        );
    }
    Ok(())
}
