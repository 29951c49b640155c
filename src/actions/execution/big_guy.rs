use crate::error::Result;
use crate::model::enums::{ActionType, PlayerCondition, Skill};
use crate::model::event::{EventKind, GameEvent};
use crate::rules::ball::resolve_bounce;
use crate::rules::context::ResolutionContext;
use tracing::debug;

const REALLY_STUPID_ALONE: u8 = 4;
const REALLY_STUPID_WITH_ALLY: u8 = 2;
const WILD_ANIMAL_TARGET: u8 = 3;

/// Rolls the negative traits a player checks when it starts its activation. Returns `false`
/// when the activation ends without the action happening.
pub fn pre_action_check(ctx: &mut ResolutionContext, player_id: &str, action_type: ActionType) -> Result<bool> {
    let player = ctx.game_state.get_player(player_id)?;

    if player.has_skill(Skill::BoneHead) {
        let roll = ctx.d6()?;
        let passed = roll > 1;
        emit_check(ctx, player_id, Skill::BoneHead, roll, passed);
        if !passed {
            return distracted(ctx, player_id, true);
        }
    }

    let player = ctx.game_state.get_player(player_id)?;
    if player.has_skill(Skill::ReallyStupid) {
        let position = player.position.ok_or("Really Stupid check off the pitch")?;
        let has_help = ctx
            .game_state
            .adjacent_standing(&position, player.side)
            .iter()
            .any(|ally| ally.player_id != player_id && !ally.has_skill(Skill::ReallyStupid));
        let target = if has_help {
            REALLY_STUPID_WITH_ALLY
        } else {
            REALLY_STUPID_ALONE
        };
        let roll = ctx.d6()?;
        let passed = roll >= target;
        emit_check(ctx, player_id, Skill::ReallyStupid, roll, passed);
        if !passed {
            return distracted(ctx, player_id, true);
        }
    }

    let player = ctx.game_state.get_player(player_id)?;
    let blocking = matches!(action_type, ActionType::Block | ActionType::Blitz);
    if player.has_skill(Skill::WildAnimal) && !blocking {
        let roll = ctx.d6()?;
        let passed = roll >= WILD_ANIMAL_TARGET;
        emit_check(ctx, player_id, Skill::WildAnimal, roll, passed);
        if !passed {
            return distracted(ctx, player_id, false);
        }
    }

    let player = ctx.game_state.get_player(player_id)?;
    let moving = matches!(action_type, ActionType::Move | ActionType::Blitz);
    if player.has_skill(Skill::TakeRoot) && moving {
        let roll = ctx.d6()?;
        let passed = roll > 1;
        emit_check(ctx, player_id, Skill::TakeRoot, roll, passed);
        if !passed {
            return distracted(ctx, player_id, false);
        }
    }

    if ctx.game_state.get_player(player_id)?.has_skill(Skill::Bloodlust) {
        return bloodlust(ctx, player_id);
    }
    Ok(true)
}

/// On a 1 the vampire bites an adjacent thrall, who is knocked out, and carries on. With
/// nobody to bite it leaves the pitch.
fn bloodlust(ctx: &mut ResolutionContext, player_id: &str) -> Result<bool> {
    let roll = ctx.d6()?;
    let passed = roll > 1;
    emit_check(ctx, player_id, Skill::Bloodlust, roll, passed);
    if passed {
        return Ok(true);
    }

    let player = ctx.game_state.get_player(player_id)?;
    let position = player.position.ok_or("Bloodlust check off the pitch")?;
    let thrall = ctx
        .game_state
        .adjacent_standing(&position, player.side)
        .into_iter()
        .find(|ally| ally.player_id != player_id && !ally.has_skill(Skill::Bloodlust))
        .map(|ally| ally.player_id.clone());

    let (victim, condition, proceeds) = match thrall {
        Some(thrall) => (thrall, PlayerCondition::KnockedOut, true),
        None => (player_id.to_string(), PlayerCondition::Reserves, false),
    };
    let from = ctx.game_state.get_player(&victim)?.position;
    let dropped = ctx.game_state.remove_from_pitch(&victim, condition)?;
    ctx.emit(
        GameEvent::new(EventKind::Injury)
            .with_player(player_id)
            .with_target(&victim)
            .with_from(from)
            .with_skill(Skill::Bloodlust)
            .with_success(false),
    );
    if let Some(square) = dropped {
        resolve_bounce(ctx, square, 0)?;
    }
    debug!(player_id, victim = %victim, proceeds, "bloodlust");
    Ok(proceeds)
}

fn distracted(ctx: &mut ResolutionContext, player_id: &str, loses_tacklezones: bool) -> Result<bool> {
    let player = ctx.game_state.get_player_mut(player_id)?;
    player.state.has_moved = true;
    player.state.has_acted = true;
    if loses_tacklezones {
        player.state.lost_tacklezones = true;
    }
    Ok(false)
}

fn emit_check(ctx: &mut ResolutionContext, player_id: &str, skill: Skill, roll: u8, passed: bool) {
    ctx.emit(
        GameEvent::new(EventKind::BigGuyCheck)
            .with_player(player_id)
            .with_skill(skill)
            .with_roll(roll)
            .with_success(passed),
    );
}
