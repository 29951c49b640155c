use crate::actions::common::begin_activation;
use crate::error::Result;
use crate::model::action::Action;
use crate::model::block::BlockParams;
use crate::model::enums::{ActionType, PlayerCondition, Skill, TeamSide};
use crate::model::event::{EventKind, GameEvent};
use crate::model::game::GameState;
use crate::model::position::Square;
use crate::model::result::ActionOutcome;
use crate::rules::ball::resolve_bounce;
use crate::rules::block::resolve_block;
use crate::rules::context::ResolutionContext;
use crate::rules::injury::{knock_down, resolve_crowd_surf, InjuryContext};
use crate::rules::reroll::team_reroll;
use crate::rules::tacklezones::{count_tacklezones, landing_target_for, pass_target_for};
use tracing::debug;

const BOMB_SCATTERS: usize = 3;
const GAZE_BASE_TARGET: u32 = 2;

/// Where a thrown object ended up.
enum Flight {
    Landed(Square),
    OffPitch,
}

/// Throws a Right Stuff team-mate at a square. Losing a ball the team-mate carried is the
/// only way this ends the turn.
pub fn throw_team_mate_execution(ctx: &mut ResolutionContext, action: &Action) -> Result<ActionOutcome> {
    let thrower_id = action.player().ok_or("Throw team-mate without a thrower")?;
    let projectile_id = action.target().ok_or("Throw team-mate without a team-mate")?;
    let target = action.position().ok_or("Throw team-mate without a target square")?;
    if let Some(outcome) = begin_activation(ctx, thrower_id, ActionType::ThrowTeamMate)? {
        return Ok(outcome);
    }

    let thrower = ctx.game_state.get_player(thrower_id)?;
    let from = thrower.position.ok_or("Thrower is off the pitch")?;
    let side = thrower.side;
    let always_hungry = thrower.has_skill(Skill::AlwaysHungry);
    let accuracy = pass_target_for(&ctx.game_state, thrower, from.distance(&target));
    let carried_ball = ctx.game_state.ball.is_carried_by(projectile_id);

    if always_hungry && eats_team_mate(ctx, thrower_id, projectile_id)? {
        return Ok(thrown_ball_outcome(ctx, side, carried_ball));
    }

    let roll = ctx.d6()?;
    let landing = if roll == 1 {
        from.scatter(ctx.d8()?, 1)
    } else if roll < accuracy {
        target.scatter(ctx.d8()?, 1)
    } else {
        target
    };
    ctx.emit(
        GameEvent::new(EventKind::ThrowTeamMate)
            .with_player(thrower_id)
            .with_target(projectile_id)
            .with_from(Some(from))
            .with_to(Some(landing))
            .with_roll(roll)
            .with_success(roll >= accuracy),
    );

    match find_landing(ctx, projectile_id, landing)? {
        Flight::OffPitch => resolve_crowd_surf(ctx, projectile_id)?,
        Flight::Landed(square) => land_team_mate(ctx, projectile_id, square)?,
    }
    Ok(thrown_ball_outcome(ctx, side, carried_ball))
}

/// Always Hungry: a 1 tries to eat the team-mate, who is gone for good unless a team reroll
/// saves it.
fn eats_team_mate(ctx: &mut ResolutionContext, thrower_id: &str, projectile_id: &str) -> Result<bool> {
    let mut roll = ctx.d6()?;
    if roll == 1 && team_reroll(ctx, thrower_id)? {
        roll = ctx.d6()?;
    }
    let eaten = roll == 1;
    ctx.emit(
        GameEvent::new(EventKind::SkillUsed)
            .with_player(thrower_id)
            .with_target(projectile_id)
            .with_skill(Skill::AlwaysHungry)
            .with_roll(roll)
            .with_success(!eaten),
    );
    if eaten {
        let dropped = ctx
            .game_state
            .remove_from_pitch(projectile_id, PlayerCondition::Injured)?;
        if let Some(square) = dropped {
            resolve_bounce(ctx, square, 0)?;
        }
        debug!(thrower_id, projectile_id, "team-mate eaten");
    }
    Ok(eaten)
}

/// Scatters one more square while the landing spot is taken by somebody else. After the
/// bounce cap the first free neighbour is used instead.
fn find_landing(ctx: &mut ResolutionContext, projectile_id: &str, first: Square) -> Result<Flight> {
    let mut square = first;
    for _ in 0..=ctx.config.max_bounce_depth {
        if !square.is_on_pitch() {
            return Ok(Flight::OffPitch);
        }
        if !occupied_by_other(&ctx.game_state, &square, projectile_id) {
            return Ok(Flight::Landed(square));
        }
        square = square.scatter(ctx.d8()?, 1);
    }
    if !square.is_on_pitch() {
        return Ok(Flight::OffPitch);
    }
    if !occupied_by_other(&ctx.game_state, &square, projectile_id) {
        return Ok(Flight::Landed(square));
    }

    let fallback = square
        .get_adjacent_squares(true)
        .into_iter()
        .find(|neighbour| !occupied_by_other(&ctx.game_state, neighbour, projectile_id));
    Ok(fallback.map_or(Flight::OffPitch, Flight::Landed))
}

fn occupied_by_other(game_state: &GameState, square: &Square, player_id: &str) -> bool {
    game_state
        .player_id_at(square)
        .is_some_and(|occupant| occupant != player_id)
}

/// Landing roll; a failure puts the team-mate down with armour and maybe injury.
fn land_team_mate(ctx: &mut ResolutionContext, projectile_id: &str, square: Square) -> Result<()> {
    let from = ctx.game_state.get_player(projectile_id)?.position;
    ctx.game_state.move_player(projectile_id, square)?;
    let projectile = ctx.game_state.get_player(projectile_id)?;
    let target = landing_target_for(&ctx.game_state, projectile, &square);
    let injury = InjuryContext::for_victim(projectile);
    let roll = ctx.d6()?;
    let landed = roll >= target;
    ctx.emit(
        GameEvent::new(EventKind::Landing)
            .with_player(projectile_id)
            .with_from(from)
            .with_to(Some(square))
            .with_roll(roll)
            .with_skill(Skill::RightStuff)
            .with_success(landed),
    );
    if !landed {
        knock_down(ctx, projectile_id, injury)?;
    }
    if ctx.game_state.ball.is_loose_at(&square) {
        resolve_bounce(ctx, square, 0)?;
    }
    Ok(())
}

fn thrown_ball_outcome(ctx: &ResolutionContext, side: TeamSide, carried_ball: bool) -> ActionOutcome {
    let still_held = ctx
        .game_state
        .carrier()
        .is_some_and(|carrier| carrier.side == side);
    if carried_ball && !still_held {
        ActionOutcome::Turnover
    } else {
        ActionOutcome::Ok
    }
}

/// Throws a bomb at a square. It explodes where it lands, knocking down every standing player
/// in the 3x3 area except the thrower. Never a turnover.
pub fn bomb_execution(ctx: &mut ResolutionContext, action: &Action) -> Result<ActionOutcome> {
    let thrower_id = action.player().ok_or("Bomb without a thrower")?;
    let target = action.position().ok_or("Bomb without a target square")?;
    if let Some(outcome) = begin_activation(ctx, thrower_id, ActionType::BombThrow)? {
        return Ok(outcome);
    }

    let thrower = ctx.game_state.get_player(thrower_id)?;
    let from = thrower.position.ok_or("Bomb thrower is off the pitch")?;
    let accuracy = pass_target_for(&ctx.game_state, thrower, from.distance(&target));

    let roll = ctx.d6()?;
    let mut landing = target;
    if roll == 1 {
        landing = from.scatter(ctx.d8()?, 1);
    } else if roll < accuracy {
        for _ in 0..BOMB_SCATTERS {
            landing = landing.scatter(ctx.d8()?, 1);
        }
    }
    ctx.emit(
        GameEvent::new(EventKind::Pass)
            .with_player(thrower_id)
            .with_from(Some(from))
            .with_to(Some(landing))
            .with_roll(roll)
            .with_skill(Skill::Bombardier)
            .with_success(roll >= accuracy),
    );

    if !landing.is_on_pitch() {
        debug!(thrower_id, ?landing, "bomb landed in the crowd");
        return Ok(ActionOutcome::Ok);
    }
    ctx.emit(
        GameEvent::new(EventKind::Explosion)
            .with_player(thrower_id)
            .with_to(Some(landing)),
    );

    let victims: Vec<String> = (-1..=1)
        .flat_map(|dx| (-1..=1).map(move |dy| landing.offset(dx, dy)))
        .filter(Square::is_on_pitch)
        .filter_map(|square| ctx.game_state.player_at(&square))
        .filter(|player| player.is_standing() && player.player_id != thrower_id)
        .map(|player| player.player_id.clone())
        .collect();
    for victim in victims {
        let injury = InjuryContext::for_victim(ctx.game_state.get_player(&victim)?);
        knock_down(ctx, &victim, injury)?;
    }
    Ok(ActionOutcome::Ok)
}

/// Hypnotic Gaze on an adjacent enemy: 2+ plus the gazer's own tacklezones, capped at 6.
pub fn hypnotic_gaze_execution(ctx: &mut ResolutionContext, action: &Action) -> Result<ActionOutcome> {
    let gazer_id = action.player().ok_or("Gaze without a player")?;
    let victim_id = action.target().ok_or("Gaze without a target")?;
    if let Some(outcome) = begin_activation(ctx, gazer_id, ActionType::HypnoticGaze)? {
        return Ok(outcome);
    }

    let gazer = ctx.game_state.get_player(gazer_id)?;
    let square = gazer.position.ok_or("Gazer is off the pitch")?;
    let zones = count_tacklezones(&ctx.game_state, &square, gazer.side, None);
    let target = (GAZE_BASE_TARGET + zones).min(6) as u8;

    let roll = ctx.d6()?;
    let hypnotised = roll >= target;
    ctx.emit(
        GameEvent::new(EventKind::SkillUsed)
            .with_player(gazer_id)
            .with_target(victim_id)
            .with_skill(Skill::HypnoticGaze)
            .with_roll(roll)
            .with_success(hypnotised),
    );
    if !hypnotised {
        return Ok(ActionOutcome::Turnover);
    }
    ctx.game_state.get_player_mut(victim_id)?.state.lost_tacklezones = true;
    Ok(ActionOutcome::Ok)
}

/// The Ball & Chain player lurches one random square per point of MA. Anybody standing in
/// the way gets blocked, the crowd knocks the player out. Never a turnover.
pub fn ball_and_chain_execution(ctx: &mut ResolutionContext, action: &Action) -> Result<ActionOutcome> {
    let player_id = action.player().ok_or("Ball & Chain without a player")?;
    if let Some(outcome) = begin_activation(ctx, player_id, ActionType::BallAndChain)? {
        return Ok(outcome);
    }

    let steps = ctx.game_state.get_player(player_id)?.get_ma();
    for _ in 0..steps {
        let player = ctx.game_state.get_player(player_id)?;
        if !player.is_standing() {
            break;
        }
        let from = player.position.ok_or("Ball & Chain player is off the pitch")?;
        let to = from.scatter(ctx.d8()?, 1);

        if !to.is_on_pitch() {
            let dropped = ctx
                .game_state
                .remove_from_pitch(player_id, PlayerCondition::KnockedOut)?;
            ctx.emit(
                GameEvent::new(EventKind::CrowdSurf)
                    .with_player(player_id)
                    .with_from(Some(from))
                    .with_skill(Skill::BallAndChain)
                    .with_success(false),
            );
            if let Some(square) = dropped {
                resolve_bounce(ctx, square, 0)?;
            }
            break;
        }

        let occupant = ctx
            .game_state
            .player_at(&to)
            .map(|occupant| (occupant.player_id.clone(), occupant.is_standing()));
        match occupant {
            Some((occupant_id, true)) => {
                let params = BlockParams {
                    follow_up: false,
                    ..BlockParams::new(player_id, &occupant_id)
                };
                resolve_block(ctx, &params)?;
            }
            Some((_, false)) => {}
            None => {
                ctx.game_state.move_player(player_id, to)?;
                ctx.emit(
                    GameEvent::new(EventKind::Move)
                        .with_player(player_id)
                        .with_from(Some(from))
                        .with_to(Some(to))
                        .with_skill(Skill::BallAndChain),
                );
                if ctx.game_state.ball.is_loose_at(&to) {
                    resolve_bounce(ctx, to, 0)?;
                }
            }
        }
    }
    Ok(ActionOutcome::Ok)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::dice::ScriptedDice;
    use crate::model::ball::Ball;
    use crate::model::player::Player;

    fn player(id: &str, side: TeamSide, x: i32, y: i32, skills: &[Skill]) -> Player {
        Player {
            player_id: id.to_string(),
            side,
            position: Some(Square::new(x, y)),
            skills: skills.iter().copied().collect(),
            ..Default::default()
        }
    }

    fn run(
        state: GameState,
        action: Action,
        rolls: Vec<u8>,
        execute: fn(&mut ResolutionContext, &Action) -> Result<ActionOutcome>,
    ) -> (ActionOutcome, GameState, Vec<EventKind>, usize) {
        let config = EngineConfig::default();
        let mut dice = ScriptedDice::new(rolls);
        let (outcome, state, kinds) = {
            let mut ctx = ResolutionContext::new(state, &mut dice, &config);
            let outcome = execute(&mut ctx, &action).unwrap();
            let kinds = ctx.events.iter().map(|event| event.kind).collect();
            (outcome, ctx.game_state, kinds)
        };
        (outcome, state, kinds, dice.remaining())
    }

    fn ttm_state(thrower_skills: &[Skill]) -> GameState {
        let mut state = GameState::default();
        state.add_player(player("troll", TeamSide::Home, 5, 7, thrower_skills));
        state.add_player(player("goblin", TeamSide::Home, 5, 8, &[Skill::RightStuff]));
        state.home.rerolls = 0;
        state
    }

    fn ttm_action(target: Square) -> Action {
        Action::new(ActionType::ThrowTeamMate, Some("troll".to_string()), Some(target)).with_target("goblin")
    }

    #[test]
    fn test_accurate_throw_and_landing() {
        let state = ttm_state(&[Skill::ThrowTeamMate]);
        // accurate 6, landing 4
        let (outcome, state, _, left) = run(state, ttm_action(Square::new(9, 7)), vec![6, 4], throw_team_mate_execution);
        assert_eq!(outcome, ActionOutcome::Ok);
        assert_eq!(left, 0);
        assert_eq!(state.players["goblin"].position, Some(Square::new(9, 7)));
        assert!(state.players["goblin"].is_standing());
        assert!(state.home.pass_used);
    }

    #[test]
    fn test_inaccurate_throw_scatters_off_occupied_square() {
        let mut state = ttm_state(&[Skill::ThrowTeamMate]);
        state.add_player(player("blocker", TeamSide::Away, 9, 6, &[]));
        // inaccurate 2, scatter north onto the blocker, scatter east, landing 1, armour 1+1
        let (outcome, state, _, left) =
            run(state, ttm_action(Square::new(9, 7)), vec![2, 1, 3, 1, 1, 1], throw_team_mate_execution);
        assert_eq!(outcome, ActionOutcome::Ok);
        assert_eq!(left, 0);
        let goblin = &state.players["goblin"];
        assert_eq!(goblin.position, Some(Square::new(10, 6)));
        assert_eq!(goblin.state.condition, PlayerCondition::Prone);
    }

    #[test]
    fn test_failed_landing_with_ball_is_turnover() {
        let mut state = ttm_state(&[Skill::ThrowTeamMate]);
        state.ball = Ball::Carried {
            position: Square::new(5, 8),
            carrier: "goblin".to_string(),
        };
        // accurate 6, landing 1, armour 1+1, bounce east
        let (outcome, state, _, left) =
            run(state, ttm_action(Square::new(9, 7)), vec![6, 1, 1, 1, 3], throw_team_mate_execution);
        assert_eq!(outcome, ActionOutcome::Turnover);
        assert_eq!(left, 0);
        assert_eq!(state.ball, Ball::OnGround { position: Square::new(10, 7) });
    }

    #[test]
    fn test_always_hungry_eats_team_mate() {
        let state = ttm_state(&[Skill::ThrowTeamMate, Skill::AlwaysHungry]);
        let (outcome, state, kinds, left) = run(state, ttm_action(Square::new(9, 7)), vec![1], throw_team_mate_execution);
        assert_eq!(outcome, ActionOutcome::Ok);
        assert_eq!(left, 0);
        assert_eq!(state.players["goblin"].state.condition, PlayerCondition::Injured);
        assert!(!kinds.contains(&EventKind::ThrowTeamMate));
    }

    #[test]
    fn test_bomb_knocks_down_area_but_not_thrower() {
        let mut state = GameState::default();
        state.add_player(player("bomber", TeamSide::Home, 5, 7, &[Skill::Bombardier]));
        state.add_player(player("a", TeamSide::Away, 8, 7, &[]));
        state.add_player(player("b", TeamSide::Away, 9, 8, &[]));
        state.add_player(player("far", TeamSide::Away, 11, 7, &[]));
        let action = Action::new(ActionType::BombThrow, Some("bomber".to_string()), Some(Square::new(8, 7)));
        // accurate 5, armour rolls 1+1 each
        let (outcome, state, kinds, left) = run(state, action, vec![5, 1, 1, 1, 1], bomb_execution);
        assert_eq!(outcome, ActionOutcome::Ok);
        assert_eq!(left, 0);
        assert!(kinds.contains(&EventKind::Explosion));
        assert_eq!(state.players["a"].state.condition, PlayerCondition::Prone);
        assert_eq!(state.players["b"].state.condition, PlayerCondition::Prone);
        assert!(state.players["far"].is_standing());
        assert!(state.players["bomber"].is_standing());
    }

    #[test]
    fn test_gaze_target_grows_with_tacklezones() {
        let mut state = GameState::default();
        state.add_player(player("vampire", TeamSide::Home, 5, 7, &[Skill::HypnoticGaze]));
        state.add_player(player("victim", TeamSide::Away, 6, 7, &[]));
        state.add_player(player("other", TeamSide::Away, 4, 7, &[]));
        let action = Action::new(ActionType::HypnoticGaze, Some("vampire".to_string()), None).with_target("victim");
        let (outcome, _, _, _) = run(state.clone(), action.clone(), vec![3], hypnotic_gaze_execution);
        assert_eq!(outcome, ActionOutcome::Turnover);
        let (outcome, state, _, _) = run(state, action, vec![4], hypnotic_gaze_execution);
        assert_eq!(outcome, ActionOutcome::Ok);
        assert!(state.players["victim"].state.lost_tacklezones);
    }

    #[test]
    fn test_ball_and_chain_leaves_pitch() {
        let mut state = GameState::default();
        let mut flail = player("flail", TeamSide::Home, 0, 7, &[Skill::BallAndChain]);
        flail.ma = 3;
        state.add_player(flail);
        let action = Action::new(ActionType::BallAndChain, Some("flail".to_string()), None);
        // east, then west twice: the second west step goes into the crowd
        let (outcome, state, _, left) = run(state, action, vec![3, 7, 7], ball_and_chain_execution);
        assert_eq!(outcome, ActionOutcome::Ok);
        assert_eq!(left, 0);
        assert_eq!(state.players["flail"].state.condition, PlayerCondition::KnockedOut);
        assert_eq!(state.players["flail"].position, None);
    }

    #[test]
    fn test_ball_and_chain_blocks_whoever_is_in_the_way() {
        let mut state = GameState::default();
        let mut flail = player("flail", TeamSide::Home, 5, 7, &[Skill::BallAndChain]);
        flail.ma = 1;
        state.add_player(flail);
        state.add_player(player("victim", TeamSide::Away, 6, 7, &[]));
        let action = Action::new(ActionType::BallAndChain, Some("flail".to_string()), None);
        // east into the victim, block die Pushed
        let (outcome, state, _, left) = run(state, action, vec![3, 3], ball_and_chain_execution);
        assert_eq!(outcome, ActionOutcome::Ok);
        assert_eq!(left, 0);
        assert_eq!(state.players["victim"].position, Some(Square::new(7, 7)));
        assert_eq!(state.players["flail"].position, Some(Square::new(5, 7)));
    }
}
