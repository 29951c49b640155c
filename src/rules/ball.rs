use crate::error::Result;
use crate::model::ball::Ball;
use crate::model::enums::Skill;
use crate::model::event::{EventKind, GameEvent};
use crate::model::position::Square;
use crate::rules::context::ResolutionContext;
use crate::rules::reroll::attempt_roll;
use crate::rules::tacklezones::{catch_target_for, pickup_target_for};
use tracing::warn;

/// Picks up the loose ball on the player's square. A failed pickup bounces the ball.
pub fn resolve_pickup(ctx: &mut ResolutionContext, player_id: &str) -> Result<bool> {
    let player = ctx.game_state.get_player(player_id)?;
    let square = player.position.ok_or("Pickup by a player off the pitch")?;

    if player.has_skill(Skill::NoHands) {
        ctx.emit(
            GameEvent::new(EventKind::Pickup)
                .with_player(player_id)
                .with_from(Some(square))
                .with_success(false),
        );
        resolve_bounce(ctx, square, 0)?;
        return Ok(false);
    }

    let target = pickup_target_for(&ctx.game_state, player);
    let attempt = attempt_roll(ctx, player_id, target, Some(Skill::SureHands), false)?;
    ctx.emit(
        GameEvent::new(EventKind::Pickup)
            .with_player(player_id)
            .with_from(Some(square))
            .with_roll(attempt.roll)
            .with_success(attempt.success),
    );

    if attempt.success {
        ctx.game_state.ball = Ball::Carried {
            position: square,
            carrier: player_id.to_string(),
        };
    } else {
        resolve_bounce(ctx, square, 0)?;
    }
    Ok(attempt.success)
}

/// Catch attempt by the player standing under the ball. On failure the ball stays on the
/// ground and the caller decides where it bounces.
pub fn resolve_catch(ctx: &mut ResolutionContext, player_id: &str, modifier: i32) -> Result<bool> {
    let player = ctx.game_state.get_player(player_id)?;
    let square = player.position.ok_or("Catch by a player off the pitch")?;

    if player.has_skill(Skill::NoHands) || !player.is_standing() {
        ctx.emit(
            GameEvent::new(EventKind::Catch)
                .with_player(player_id)
                .with_from(Some(square))
                .with_success(false),
        );
        return Ok(false);
    }

    let target = catch_target_for(&ctx.game_state, player, modifier);
    let attempt = attempt_roll(ctx, player_id, target, Some(Skill::Catch), false)?;
    ctx.emit(
        GameEvent::new(EventKind::Catch)
            .with_player(player_id)
            .with_from(Some(square))
            .with_roll(attempt.roll)
            .with_success(attempt.success),
    );

    if attempt.success {
        ctx.game_state.ball = Ball::Carried {
            position: square,
            carrier: player_id.to_string(),
        };
    }
    Ok(attempt.success)
}

/// Scatters a loose ball one square from `from`.
pub fn resolve_bounce(ctx: &mut ResolutionContext, from: Square, depth: u8) -> Result<()> {
    if depth > ctx.config.max_bounce_depth {
        warn!(?from, depth, "bounce depth cap reached, ball rests");
        ctx.emit(
            GameEvent::new(EventKind::DepthCapReached)
                .with_to(Some(from))
                .with_roll(depth),
        );
        ctx.game_state.ball = Ball::OnGround { position: from };
        return Ok(());
    }

    let d8 = ctx.d8()?;
    let to = from.scatter(d8, 1);
    ctx.emit(
        GameEvent::new(EventKind::Bounce)
            .with_from(Some(from))
            .with_to(Some(to))
            .with_roll(d8),
    );

    if !to.is_on_pitch() {
        return resolve_throw_in(ctx, from, depth);
    }
    land_ball(ctx, to, 0, depth)
}

/// The crowd throws the ball back: d8 direction, d6 squares, clamped to the pitch.
pub fn resolve_throw_in(ctx: &mut ResolutionContext, last_on_pitch: Square, depth: u8) -> Result<()> {
    let d8 = ctx.d8()?;
    let distance = ctx.d6()?;
    let to = last_on_pitch
        .scatter(d8, distance as i32)
        .clamp_to_pitch();
    ctx.emit(
        GameEvent::new(EventKind::ThrowIn)
            .with_from(Some(last_on_pitch))
            .with_to(Some(to))
            .with_roll(distance),
    );
    land_ball(ctx, to, 0, depth)
}

/// Ball comes down on an on-pitch square. A standing player there tries to catch it, anybody
/// else on the square makes it bounce again.
pub fn land_ball(ctx: &mut ResolutionContext, square: Square, modifier: i32, depth: u8) -> Result<()> {
    ctx.game_state.ball = Ball::OnGround { position: square };

    let Some(occupant) = ctx.game_state.player_at(&square) else {
        return Ok(());
    };
    if !occupant.is_standing() {
        return resolve_bounce(ctx, square, depth + 1);
    }

    let occupant_id = occupant.player_id.clone();
    if !resolve_catch(ctx, &occupant_id, modifier)? {
        resolve_bounce(ctx, square, depth + 1)?;
    }
    Ok(())
}

/// If the player carries the ball, it drops on their square and bounces.
pub fn drop_ball(ctx: &mut ResolutionContext, player_id: &str, square: Square) -> Result<()> {
    if !ctx.game_state.ball.is_carried_by(player_id) {
        return Ok(());
    }
    ctx.game_state.ball = Ball::OnGround { position: square };
    resolve_bounce(ctx, square, 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::dice::ScriptedDice;
    use crate::model::enums::{PlayerCondition, TeamSide};
    use crate::model::game::GameState;
    use crate::model::player::Player;

    fn player(id: &str, side: TeamSide, x: i32, y: i32) -> Player {
        Player {
            player_id: id.to_string(),
            side,
            position: Some(Square::new(x, y)),
            ..Default::default()
        }
    }

    fn resolve<F>(state: GameState, rolls: Vec<u8>, f: F) -> (GameState, usize)
    where
        F: FnOnce(&mut ResolutionContext) -> Result<()>,
    {
        let config = EngineConfig::default();
        let mut dice = ScriptedDice::new(rolls);
        let state = {
            let mut ctx = ResolutionContext::new(state, &mut dice, &config);
            f(&mut ctx).unwrap();
            ctx.game_state
        };
        (state, dice.remaining())
    }

    #[test]
    fn test_bounce_to_empty_square() {
        let (state, left) = resolve(GameState::default(), vec![3], |ctx| {
            resolve_bounce(ctx, Square::new(10, 7), 0)
        });
        assert_eq!(state.ball, Ball::OnGround { position: Square::new(11, 7) });
        assert_eq!(left, 0);
    }

    #[test]
    fn test_bounce_onto_standing_player_is_caught() {
        let mut state = GameState::default();
        state.add_player(player("catcher", TeamSide::Away, 10, 6));
        // d8 north, catch roll 6
        let (state, _) = resolve(state, vec![1, 6], |ctx| resolve_bounce(ctx, Square::new(10, 7), 0));
        assert!(state.ball.is_carried_by("catcher"));
    }

    #[test]
    fn test_bounce_over_prone_player() {
        let mut state = GameState::default();
        let mut prone = player("prone", TeamSide::Away, 10, 6);
        prone.state.condition = PlayerCondition::Prone;
        state.add_player(prone);
        // north onto the prone player, then east
        let (state, _) = resolve(state, vec![1, 3], |ctx| resolve_bounce(ctx, Square::new(10, 7), 0));
        assert_eq!(state.ball, Ball::OnGround { position: Square::new(11, 6) });
    }

    #[test]
    fn test_throw_in_clamps_to_pitch() {
        // bounce west off the pitch, throw-in east for 4 squares
        let (state, left) = resolve(GameState::default(), vec![7, 3, 4], |ctx| {
            resolve_bounce(ctx, Square::new(0, 7), 0)
        });
        assert_eq!(state.ball, Ball::OnGround { position: Square::new(4, 7) });
        assert_eq!(left, 0);

        let (state, _) = resolve(GameState::default(), vec![1, 6], |ctx| {
            resolve_throw_in(ctx, Square::new(3, 2), 0)
        });
        assert_eq!(state.ball, Ball::OnGround { position: Square::new(3, 0) });
    }

    #[test]
    fn test_depth_cap_leaves_ball() {
        let (state, left) = resolve(GameState::default(), vec![], |ctx| {
            resolve_bounce(ctx, Square::new(5, 5), 6)
        });
        assert_eq!(state.ball, Ball::OnGround { position: Square::new(5, 5) });
        assert_eq!(left, 0);
    }

    #[test]
    fn test_failed_pickup_bounces() {
        let mut state = GameState::default();
        state.home.rerolls = 0;
        state.add_player(player("picker", TeamSide::Home, 5, 5));
        state.ball = Ball::OnGround { position: Square::new(5, 5) };
        // pickup 2 (needs 3+), bounce south
        let (state, left) = resolve(state, vec![2, 5], |ctx| {
            assert!(!resolve_pickup(ctx, "picker")?);
            Ok(())
        });
        assert_eq!(state.ball, Ball::OnGround { position: Square::new(5, 6) });
        assert_eq!(left, 0);
    }

    #[test]
    fn test_sure_hands_reroll() {
        let mut state = GameState::default();
        let mut picker = player("picker", TeamSide::Home, 5, 5);
        picker.skills.add(Skill::SureHands);
        state.add_player(picker);
        state.ball = Ball::OnGround { position: Square::new(5, 5) };
        let (state, _) = resolve(state, vec![1, 4], |ctx| {
            assert!(resolve_pickup(ctx, "picker")?);
            Ok(())
        });
        assert!(state.ball.is_carried_by("picker"));
        assert_eq!(state.home.rerolls, 3);
    }
}
