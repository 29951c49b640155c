use crate::actions::common::{begin_activation, requested_path};
use crate::actions::execution::movement::{follow_path, PathOutcome};
use crate::error::Result;
use crate::model::action::Action;
use crate::model::ball::Ball;
use crate::model::enums::{ActionType, Skill, TeamSide};
use crate::model::event::{EventKind, GameEvent};
use crate::model::game::GameState;
use crate::model::position::Square;
use crate::model::result::ActionOutcome;
use crate::rules::ball::{land_ball, resolve_bounce, resolve_throw_in};
use crate::rules::context::ResolutionContext;
use crate::rules::reroll::attempt_roll;
use crate::rules::tacklezones::{interception_target_for, pass_target_for};
use tracing::debug;

// Only a natural 1 fumbles; the accuracy target decides the rest.
const FUMBLE_TARGET: u8 = 2;
const HAIL_MARY_SCATTERS: usize = 3;
const ACCURATE_CATCH_MODIFIER: i32 = 1;
const HAND_OFF_CATCH_MODIFIER: i32 = 1;

pub fn pass_execution(ctx: &mut ResolutionContext, action: &Action) -> Result<ActionOutcome> {
    let passer = action.player().ok_or("Pass without a player")?;
    let target = action.position().ok_or("Pass without a target square")?;
    if let Some(outcome) = begin_activation(ctx, passer, ActionType::Pass)? {
        return Ok(outcome);
    }

    let path = requested_path(&ctx.game_state, action, passer)?;
    if follow_path(ctx, passer, &path)? == PathOutcome::Turnover {
        return Ok(ActionOutcome::Turnover);
    }
    if !ctx.game_state.ball.is_carried_by(passer) {
        debug!(passer, "pass abandoned, passer has no ball");
        return Ok(ActionOutcome::Ok);
    }
    resolve_pass(ctx, passer, target)
}

/// Throws the ball at `target`: interception, accuracy with the Pass reroll, then scatter
/// and catch. Ok only if the passing side ends up holding the ball.
pub fn resolve_pass(ctx: &mut ResolutionContext, passer_id: &str, target: Square) -> Result<ActionOutcome> {
    let passer = ctx.game_state.get_player(passer_id)?;
    let from = passer.position.ok_or("Passer is off the pitch")?;
    let side = passer.side;
    let distance = from.distance(&target);

    if passer.has_skill(Skill::HailMaryPass) && distance > ctx.config.max_pass_range {
        return resolve_hail_mary(ctx, passer_id, from, target);
    }

    if let Some(interceptor) = find_interceptor(&ctx.game_state, passer_id, &from, &target) {
        if resolve_interception(ctx, passer_id, &interceptor)? {
            return Ok(ActionOutcome::Turnover);
        }
    }

    let passer = ctx.game_state.get_player(passer_id)?;
    let accuracy = pass_target_for(&ctx.game_state, passer, distance);
    let attempt = attempt_roll(ctx, passer_id, FUMBLE_TARGET, Some(Skill::Pass), false)?;
    let accurate = attempt.success && attempt.roll >= accuracy;
    ctx.emit(
        GameEvent::new(EventKind::Pass)
            .with_player(passer_id)
            .with_from(Some(from))
            .with_to(Some(target))
            .with_roll(attempt.roll)
            .with_success(accurate),
    );
    debug!(passer_id, distance, accuracy, roll = attempt.roll, accurate, "pass");

    ctx.game_state.ball = Ball::OnGround { position: from };
    if !attempt.success {
        resolve_bounce(ctx, from, 0)?;
        return Ok(ActionOutcome::Turnover);
    }

    if accurate {
        land_ball(ctx, target, ACCURATE_CATCH_MODIFIER, 0)?;
    } else {
        let d8 = ctx.d8()?;
        let d6 = ctx.d6()?;
        scatter_and_land(ctx, target, d8, d6 as i32)?;
    }
    Ok(holding_outcome(&ctx.game_state, side))
}

/// Over maximum range: a 1 fumbles, anything else flies three random squares from the
/// target and can never be intercepted.
fn resolve_hail_mary(
    ctx: &mut ResolutionContext,
    passer_id: &str,
    from: Square,
    target: Square,
) -> Result<ActionOutcome> {
    let side = ctx.game_state.get_player(passer_id)?.side;
    let roll = ctx.d6()?;
    let fumbled = roll == 1;
    ctx.emit(
        GameEvent::new(EventKind::Pass)
            .with_player(passer_id)
            .with_from(Some(from))
            .with_to(Some(target))
            .with_roll(roll)
            .with_skill(Skill::HailMaryPass)
            .with_success(!fumbled),
    );
    ctx.game_state.ball = Ball::OnGround { position: from };
    if fumbled {
        resolve_bounce(ctx, from, 0)?;
        return Ok(ActionOutcome::Turnover);
    }

    let mut square = target;
    for _ in 0..HAIL_MARY_SCATTERS {
        let next = square.scatter(ctx.d8()?, 1);
        if !next.is_on_pitch() {
            resolve_throw_in(ctx, square.clamp_to_pitch(), 0)?;
            return Ok(holding_outcome(&ctx.game_state, side));
        }
        square = next;
    }
    land_ball(ctx, square, 0, 0)?;
    Ok(holding_outcome(&ctx.game_state, side))
}

/// Inaccurate ball: `distance` squares in the d8 direction. Leaving the pitch hands it to
/// the crowd from the last square it crossed.
fn scatter_and_land(ctx: &mut ResolutionContext, target: Square, d8: u8, distance: i32) -> Result<()> {
    let landing = target.scatter(d8, distance);
    if landing.is_on_pitch() {
        return land_ball(ctx, landing, 0, 0);
    }
    let last_on_pitch = (0..distance)
        .rev()
        .map(|steps| target.scatter(d8, steps))
        .find(Square::is_on_pitch)
        .unwrap_or_else(|| target.clamp_to_pitch());
    resolve_throw_in(ctx, last_on_pitch, 0)
}

/// Squares strictly between `from` and `to` on a Bresenham line.
pub fn pass_line(from: &Square, to: &Square) -> Vec<Square> {
    let (dx, dy) = ((to.x - from.x).abs(), -(to.y - from.y).abs());
    let (sx, sy) = ((to.x - from.x).signum(), (to.y - from.y).signum());
    let mut error = dx + dy;
    let (mut x, mut y) = (from.x, from.y);
    let mut squares = Vec::new();

    while (x, y) != (to.x, to.y) {
        let doubled = 2 * error;
        if doubled >= dy {
            error += dy;
            x += sx;
        }
        if doubled <= dx {
            error += dx;
            y += sy;
        }
        if (x, y) != (to.x, to.y) {
            squares.push(Square::new(x, y));
        }
    }
    squares
}

/// The first enemy along the line of the pass able to intercept: standing, with tacklezones
/// and hands.
pub fn find_interceptor(game_state: &GameState, passer_id: &str, from: &Square, to: &Square) -> Option<String> {
    let side = game_state.players.get(passer_id)?.side;
    pass_line(from, to).iter().find_map(|square| {
        game_state
            .player_at(square)
            .filter(|player| player.side != side)
            .filter(|player| player.exerts_tacklezones() && !player.has_skill(Skill::NoHands))
            .map(|player| player.player_id.clone())
    })
}

/// Interception attempt. Safe Throw makes a successful interceptor roll again.
fn resolve_interception(ctx: &mut ResolutionContext, passer_id: &str, interceptor_id: &str) -> Result<bool> {
    let interceptor = ctx.game_state.get_player(interceptor_id)?;
    let target = interception_target_for(&ctx.game_state, interceptor);
    let square = interceptor.position.ok_or("Interceptor is off the pitch")?;

    let mut roll = ctx.d6()?;
    if roll >= target && ctx.game_state.get_player(passer_id)?.has_skill(Skill::SafeThrow) {
        roll = ctx.d6()?;
        ctx.emit(
            GameEvent::new(EventKind::SkillUsed)
                .with_player(passer_id)
                .with_target(interceptor_id)
                .with_skill(Skill::SafeThrow)
                .with_roll(roll)
                .with_success(roll < target),
        );
    }
    let intercepted = roll >= target;
    ctx.emit(
        GameEvent::new(EventKind::Interception)
            .with_player(interceptor_id)
            .with_target(passer_id)
            .with_to(Some(square))
            .with_roll(roll)
            .with_success(intercepted),
    );
    if intercepted {
        ctx.game_state.ball = Ball::Carried {
            position: square,
            carrier: interceptor_id.to_string(),
        };
    }
    Ok(intercepted)
}

pub fn handoff_execution(ctx: &mut ResolutionContext, action: &Action) -> Result<ActionOutcome> {
    let giver = action.player().ok_or("Hand-off without a player")?;
    let receiver = action.target().ok_or("Hand-off without a receiver")?;
    if let Some(outcome) = begin_activation(ctx, giver, ActionType::Handoff)? {
        return Ok(outcome);
    }

    let path = requested_path(&ctx.game_state, action, giver)?;
    if follow_path(ctx, giver, &path)? == PathOutcome::Turnover {
        return Ok(ActionOutcome::Turnover);
    }

    let giving = ctx.game_state.get_player(giver)?;
    let taking = ctx.game_state.get_player(receiver)?;
    let side = giving.side;
    let (Some(from), Some(to)) = (giving.position, taking.position) else {
        return Ok(ActionOutcome::Ok);
    };
    if !ctx.game_state.ball.is_carried_by(giver) || !from.is_adjacent(&to) {
        debug!(giver, receiver, "hand-off abandoned");
        return Ok(ActionOutcome::Ok);
    }

    ctx.emit(
        GameEvent::new(EventKind::HandOff)
            .with_player(giver)
            .with_target(receiver)
            .with_from(Some(from))
            .with_to(Some(to)),
    );
    land_ball(ctx, to, HAND_OFF_CATCH_MODIFIER, 0)?;
    Ok(holding_outcome(&ctx.game_state, side))
}

fn holding_outcome(game_state: &GameState, side: TeamSide) -> ActionOutcome {
    match game_state.carrier() {
        Some(carrier) if carrier.side == side => ActionOutcome::Ok,
        _ => ActionOutcome::Turnover,
    }
}
