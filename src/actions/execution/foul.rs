use crate::actions::common::{begin_activation, requested_path};
use crate::actions::execution::movement::{follow_path, PathOutcome};
use crate::error::Result;
use crate::model::action::Action;
use crate::model::enums::{ActionType, PlayerCondition, Skill};
use crate::model::event::{EventKind, GameEvent};
use crate::model::result::ActionOutcome;
use crate::rules::ball::resolve_bounce;
use crate::rules::context::ResolutionContext;
use crate::rules::injury::{apply_injury, armour_broken, roll_injury, InjuryContext};
use crate::rules::tacklezones::count_assists;
use tracing::debug;

/// Kicks a player who is down. Never a turnover, even when the referee spots it.
pub fn foul_execution(ctx: &mut ResolutionContext, action: &Action) -> Result<ActionOutcome> {
    let fouler_id = action.player().ok_or("Foul without a player")?;
    let victim_id = action.target().ok_or("Foul without a target")?;
    if let Some(outcome) = begin_activation(ctx, fouler_id, ActionType::Foul)? {
        return Ok(outcome);
    }

    let path = requested_path(&ctx.game_state, action, fouler_id)?;
    match follow_path(ctx, fouler_id, &path)? {
        PathOutcome::Turnover => return Ok(ActionOutcome::Turnover),
        PathOutcome::Stopped => return Ok(ActionOutcome::Ok),
        PathOutcome::Completed => {}
    }

    let fouler = ctx.game_state.get_player(fouler_id)?;
    let victim = ctx.game_state.get_player(victim_id)?;
    let (Some(fouler_square), Some(victim_square)) = (fouler.position, victim.position) else {
        return Ok(ActionOutcome::Ok);
    };
    if !fouler_square.is_adjacent(&victim_square) || !victim.state.condition.is_down() {
        debug!(fouler_id, victim_id, "foul target out of reach");
        return Ok(ActionOutcome::Ok);
    }

    let excluded = [fouler_id, victim_id];
    let friendly = count_assists(&ctx.game_state, &victim_square, fouler.side, &excluded, Some(victim_id));
    let enemy = count_assists(&ctx.game_state, &fouler_square, victim.side, &excluded, Some(fouler_id));
    let modifier = friendly as i32 - enemy as i32 + i32::from(fouler.has_skill(Skill::DirtyPlayer));
    let injury = InjuryContext {
        stakes: fouler.has_skill(Skill::Stakes),
        ..InjuryContext::for_victim(victim)
    };
    let sneaky_git = fouler.has_skill(Skill::SneakyGit);
    let armour_value = victim.get_av();

    let first = ctx.d6()?;
    let second = ctx.d6()?;
    let roll = (first + second) as i32 + modifier;
    let broken = armour_broken(roll, armour_value, false);
    ctx.emit(
        GameEvent::new(EventKind::Foul)
            .with_player(fouler_id)
            .with_target(victim_id)
            .with_to(Some(victim_square))
            .with_roll(roll)
            .with_success(broken),
    );
    ctx.emit(
        GameEvent::new(EventKind::Armour)
            .with_player(victim_id)
            .with_roll(roll)
            .with_success(broken),
    );

    if broken {
        let outcome = roll_injury(ctx, victim_id, injury)?;
        apply_injury(ctx, victim_id, outcome)?;
    }

    if first == second && !sneaky_git {
        let dropped = ctx
            .game_state
            .remove_from_pitch(fouler_id, PlayerCondition::Ejected)?;
        ctx.emit(
            GameEvent::new(EventKind::Ejection)
                .with_player(fouler_id)
                .with_from(Some(fouler_square))
                .with_roll(first)
                .with_success(false),
        );
        if let Some(square) = dropped {
            resolve_bounce(ctx, square, 0)?;
        }
    }
    Ok(ActionOutcome::Ok)
}
