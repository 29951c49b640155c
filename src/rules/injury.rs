use crate::error::Result;
use crate::model::constants::{CLAW_ARMOUR_BREAK, KNOCKED_OUT_MAX, SKILL_CHECK_TARGET, STUNNED_MAX};
use crate::model::enums::{PlayerCondition, Skill};
use crate::model::event::{EventKind, GameEvent};
use crate::model::player::Player;
use crate::model::position::Square;
use crate::rules::ball::{drop_ball, resolve_bounce};
use crate::rules::context::ResolutionContext;

/// Modifiers the attacker (and the victim's own skills) bring to armour and injury rolls.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct InjuryContext {
    pub armour_modifier: i32,
    pub injury_modifier: i32,
    pub claw: bool,
    pub stakes: bool,
    pub decay: bool,
    pub nurgles_rot: bool,
}

impl InjuryContext {
    /// A fall with nobody to blame.
    pub fn for_victim(victim: &Player) -> Self {
        InjuryContext {
            decay: victim.has_skill(Skill::Decay),
            ..Default::default()
        }
    }

    pub fn from_attacker(attacker: &Player, victim: &Player) -> Self {
        let mighty_blow = i32::from(attacker.has_skill(Skill::MightyBlow));
        InjuryContext {
            armour_modifier: mighty_blow,
            injury_modifier: mighty_blow,
            claw: attacker.has_skill(Skill::Claw),
            stakes: attacker.has_skill(Skill::Stakes),
            decay: victim.has_skill(Skill::Decay),
            nurgles_rot: attacker.has_skill(Skill::NurglesRot),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InjuryOutcome {
    Stunned,
    KnockedOut,
    Casualty,
    /// Casualty saved by Regeneration: off the pitch but fit to play.
    Regenerated,
}

/// Armour breaks strictly above AV; Claw also breaks it on 8 or more.
pub fn armour_broken(roll: i32, armour_value: u8, claw: bool) -> bool {
    roll > armour_value as i32 || (claw && roll >= CLAW_ARMOUR_BREAK)
}

pub fn injury_band(roll: i32) -> InjuryOutcome {
    if roll <= STUNNED_MAX {
        InjuryOutcome::Stunned
    } else if roll <= KNOCKED_OUT_MAX {
        InjuryOutcome::KnockedOut
    } else {
        InjuryOutcome::Casualty
    }
}

/// Puts a standing player on the ground: prone, armour and maybe injury, then a carried ball
/// bounces from the square the player fell on.
pub fn knock_down(ctx: &mut ResolutionContext, player_id: &str, injury: InjuryContext) -> Result<()> {
    let player = ctx.game_state.get_player_mut(player_id)?;
    let square = player.position.ok_or("Knock down of a player off the pitch")?;
    player.state.condition = PlayerCondition::Prone;
    ctx.emit(
        GameEvent::new(EventKind::KnockDown)
            .with_player(player_id)
            .with_from(Some(square))
            .with_success(false),
    );

    let was_carrier = ctx.game_state.ball.is_carried_by(player_id);
    resolve_armour_and_injury(ctx, player_id, injury)?;
    if was_carrier {
        release_ball(ctx, player_id, square)?;
    }
    Ok(())
}

/// Chainsaw or Stab: armour roll on a player who is not knocked down first. Only a broken
/// armour puts them down.
pub fn resolve_weapon_hit(ctx: &mut ResolutionContext, player_id: &str, injury: InjuryContext) -> Result<bool> {
    let square = ctx
        .game_state
        .get_player(player_id)?
        .position
        .ok_or("Weapon used on a player off the pitch")?;
    let was_carrier = ctx.game_state.ball.is_carried_by(player_id);
    let broken = resolve_armour_and_injury(ctx, player_id, injury)?;
    if broken && was_carrier {
        release_ball(ctx, player_id, square)?;
    }
    Ok(broken)
}

fn release_ball(ctx: &mut ResolutionContext, player_id: &str, square: Square) -> Result<()> {
    // A removed carrier already left the ball on the ground at its square.
    if ctx.game_state.ball.is_carried_by(player_id) {
        drop_ball(ctx, player_id, square)
    } else if ctx.game_state.ball.is_loose_at(&square) {
        resolve_bounce(ctx, square, 0)
    } else {
        Ok(())
    }
}

/// Rolls armour and, if it breaks, injury. Returns whether the armour broke.
pub fn resolve_armour_and_injury(
    ctx: &mut ResolutionContext,
    player_id: &str,
    injury: InjuryContext,
) -> Result<bool> {
    let armour_value = ctx.game_state.get_player(player_id)?.get_av();
    let roll = ctx.two_d6()? as i32 + injury.armour_modifier;
    let broken = armour_broken(roll, armour_value, injury.claw);
    ctx.emit(
        GameEvent::new(EventKind::Armour)
            .with_player(player_id)
            .with_roll(roll)
            .with_success(broken),
    );

    if broken {
        let outcome = roll_injury(ctx, player_id, injury)?;
        apply_injury(ctx, player_id, outcome)?;
    }
    Ok(broken)
}

/// Rolls injury with Decay, Stunty, Thick Skull and Regeneration and returns the final
/// outcome without applying it.
pub fn roll_injury(
    ctx: &mut ResolutionContext,
    player_id: &str,
    injury: InjuryContext,
) -> Result<InjuryOutcome> {
    let player = ctx.game_state.get_player(player_id)?;
    let stunty = player.has_skill(Skill::Stunty);
    let thick_skull = player.has_skill(Skill::ThickSkull);
    let regeneration = player.has_skill(Skill::Regeneration);

    let mut roll = ctx.two_d6()? as i32 + injury.injury_modifier;
    if injury.decay {
        roll = roll.max(ctx.two_d6()? as i32 + injury.injury_modifier);
    }
    if stunty {
        roll += 1;
    }

    let mut outcome = injury_band(roll);
    ctx.emit(
        GameEvent::new(EventKind::Injury)
            .with_player(player_id)
            .with_roll(roll)
            .with_success(false),
    );

    if outcome == InjuryOutcome::KnockedOut && thick_skull {
        let check = ctx.d6()?;
        let saved = check >= SKILL_CHECK_TARGET;
        ctx.emit(
            GameEvent::new(EventKind::SkillUsed)
                .with_player(player_id)
                .with_skill(Skill::ThickSkull)
                .with_roll(check)
                .with_success(saved),
        );
        if saved {
            outcome = InjuryOutcome::Stunned;
        }
    }

    if outcome == InjuryOutcome::Casualty && regeneration && !injury.stakes {
        let check = ctx.d6()?;
        let saved = check >= SKILL_CHECK_TARGET;
        ctx.emit(
            GameEvent::new(EventKind::SkillUsed)
                .with_player(player_id)
                .with_skill(Skill::Regeneration)
                .with_roll(check)
                .with_success(saved),
        );
        if saved {
            outcome = InjuryOutcome::Regenerated;
        }
    }

    if outcome == InjuryOutcome::Casualty {
        let mut event = GameEvent::new(EventKind::Casualty)
            .with_player(player_id)
            .with_roll(roll)
            .with_success(false);
        if injury.nurgles_rot {
            event = event.with_skill(Skill::NurglesRot);
        }
        ctx.emit(event);
    }
    Ok(outcome)
}

/// Moves the player into the condition the injury left them in. A stunned player who is no
/// longer on the pitch (crowd surf) goes to the reserves.
pub fn apply_injury(ctx: &mut ResolutionContext, player_id: &str, outcome: InjuryOutcome) -> Result<()> {
    let on_pitch = ctx.game_state.get_player(player_id)?.position.is_some();
    match outcome {
        InjuryOutcome::Stunned if on_pitch => {
            ctx.game_state.get_player_mut(player_id)?.state.condition = PlayerCondition::Stunned;
        }
        InjuryOutcome::Stunned | InjuryOutcome::Regenerated => {
            ctx.game_state
                .remove_from_pitch(player_id, PlayerCondition::Reserves)?;
        }
        InjuryOutcome::KnockedOut => {
            ctx.game_state
                .remove_from_pitch(player_id, PlayerCondition::KnockedOut)?;
        }
        InjuryOutcome::Casualty => {
            ctx.game_state
                .remove_from_pitch(player_id, PlayerCondition::Injured)?;
        }
    }
    Ok(())
}

/// Pushed into the crowd: off the pitch, a carried ball bounces from the vacated square, and
/// an injury roll at +1 with no armour roll.
pub fn resolve_crowd_surf(ctx: &mut ResolutionContext, player_id: &str) -> Result<()> {
    let player = ctx.game_state.get_player(player_id)?;
    let from = player.position;
    let injury = InjuryContext {
        injury_modifier: 1,
        ..InjuryContext::for_victim(player)
    };

    let dropped = ctx
        .game_state
        .remove_from_pitch(player_id, PlayerCondition::Reserves)?;
    ctx.emit(
        GameEvent::new(EventKind::CrowdSurf)
            .with_player(player_id)
            .with_from(from)
            .with_success(false),
    );
    if let Some(square) = dropped {
        resolve_bounce(ctx, square, 0)?;
    }

    let outcome = roll_injury(ctx, player_id, injury)?;
    apply_injury(ctx, player_id, outcome)
}
