use crate::error::Result;
use crate::model::block::{BlockDice, BlockOutcome, BlockParams, BlockPrecheck, PushResult};
use crate::model::constants::MULTIPLE_BLOCK_STRENGTH_BONUS;
use crate::model::enums::{BlockDiceFace, PlayerCondition, Skill};
use crate::model::event::{EventKind, GameEvent};
use crate::model::game::GameState;
use crate::model::player::Player;
use crate::model::result::ActionOutcome;
use crate::rules::ball::{drop_ball, resolve_pickup};
use crate::rules::context::ResolutionContext;
use crate::rules::injury::{knock_down, resolve_weapon_hit, InjuryContext};
use crate::rules::pushback::push_player;
use crate::rules::reroll::{pro_reroll, team_reroll};
use crate::rules::tacklezones::count_assists;
use tracing::debug;

/// Skills that replace or void the block before any die is rolled, checked in order:
/// Foul Appearance, Chainsaw, Stab.
pub fn block_precheck(ctx: &mut ResolutionContext, params: &BlockParams) -> Result<BlockPrecheck> {
    let attacker = ctx.game_state.get_player(&params.attacker)?;
    let defender = ctx.game_state.get_player(&params.defender)?;
    let foul_appearance = defender.has_skill(Skill::FoulAppearance);
    let chainsaw = attacker.has_skill(Skill::Chainsaw);
    let stab = attacker.has_skill(Skill::Stab);
    let weapon_injury = InjuryContext::from_attacker(attacker, defender);
    let kickback_injury = InjuryContext::for_victim(attacker);

    if foul_appearance {
        let roll = ctx.d6()?;
        let wasted = roll == 1;
        ctx.emit(
            GameEvent::new(EventKind::SkillUsed)
                .with_player(&params.defender)
                .with_target(&params.attacker)
                .with_skill(Skill::FoulAppearance)
                .with_roll(roll)
                .with_success(wasted),
        );
        if wasted {
            return Ok(BlockPrecheck::Wasted);
        }
    }

    if chainsaw {
        let roll = ctx.d6()?;
        let kickback = roll == 1;
        ctx.emit(
            GameEvent::new(EventKind::SkillUsed)
                .with_player(&params.attacker)
                .with_target(&params.defender)
                .with_skill(Skill::Chainsaw)
                .with_roll(roll)
                .with_success(!kickback),
        );
        if kickback {
            knock_down(ctx, &params.attacker, kickback_injury)?;
        } else {
            resolve_weapon_hit(ctx, &params.defender, weapon_injury)?;
        }
        return Ok(BlockPrecheck::WeaponUsed);
    }

    if stab {
        ctx.emit(
            GameEvent::new(EventKind::SkillUsed)
                .with_player(&params.attacker)
                .with_target(&params.defender)
                .with_skill(Skill::Stab),
        );
        let injury = InjuryContext {
            stakes: weapon_injury.stakes,
            decay: weapon_injury.decay,
            ..Default::default()
        };
        resolve_weapon_hit(ctx, &params.defender, injury)?;
        return Ok(BlockPrecheck::WeaponUsed);
    }

    Ok(BlockPrecheck::Proceed)
}

/// Strength of attacker and defender including assists, Horns and the multiple block bonus.
pub fn block_strengths(game_state: &GameState, params: &BlockParams) -> Result<(u8, u8)> {
    let attacker = game_state.get_player(&params.attacker)?;
    let defender = game_state.get_player(&params.defender)?;
    let attacker_square = attacker.position.ok_or("Attacker is not on the pitch")?;
    let defender_square = defender.position.ok_or("Defender is not on the pitch")?;
    let participants = [params.attacker.as_str(), params.defender.as_str()];

    let mut attacker_st = attacker.get_st() as u32;
    if params.horns_bonus && params.is_blitz && attacker.has_skill(Skill::Horns) {
        attacker_st += 1;
    }
    attacker_st += count_assists(
        game_state,
        &defender_square,
        attacker.side,
        &participants,
        Some(&params.defender),
    );

    let defender_st = defender.get_st() as u32
        + params.defender_strength_bonus as u32
        + count_assists(
            game_state,
            &attacker_square,
            defender.side,
            &participants,
            Some(&params.attacker),
        );

    Ok((attacker_st.min(u8::MAX as u32) as u8, defender_st.min(u8::MAX as u32) as u8))
}

/// Equal strength rolls one die, stronger up to double two, more than double three. The
/// stronger side chooses.
pub fn block_dice(attacker_st: u8, defender_st: u8) -> BlockDice {
    let (stronger, weaker) = (attacker_st.max(defender_st), attacker_st.min(defender_st));
    let count = if stronger == weaker {
        1
    } else if stronger as u32 > 2 * weaker as u32 {
        3
    } else {
        2
    };
    BlockDice {
        count,
        attacker_chooses: attacker_st >= defender_st,
    }
}

/// How good a face is for the attacker, higher is better.
pub fn face_score(face: BlockDiceFace, attacker: &Player, defender: &Player) -> u8 {
    let attacker_block = attacker.has_skill(Skill::Block);
    let defender_block = defender.has_skill(Skill::Block);
    match face {
        BlockDiceFace::DefenderDown => 10,
        BlockDiceFace::DefenderStumbles => {
            if defender.has_skill(Skill::Dodge) && !attacker.has_skill(Skill::Tackle) {
                5
            } else {
                9
            }
        }
        BlockDiceFace::Pushed => 5,
        BlockDiceFace::BothDown => match (attacker_block, defender_block) {
            (true, false) => 8,
            (true, true) => 4,
            (false, true) => 1,
            (false, false) => 3,
        },
        BlockDiceFace::AttackerDown => 0,
    }
}

/// The chooser takes the best face for itself, the first one on ties.
pub fn choose_face(
    faces: &[BlockDiceFace],
    dice: BlockDice,
    attacker: &Player,
    defender: &Player,
) -> Option<BlockDiceFace> {
    let mut best: Option<(BlockDiceFace, u8)> = None;
    for face in faces {
        let score = face_score(*face, attacker, defender);
        let better = match best {
            None => true,
            Some((_, best_score)) if dice.attacker_chooses => score > best_score,
            Some((_, best_score)) => score < best_score,
        };
        if better {
            best = Some((*face, score));
        }
    }
    best.map(|(face, _)| face)
}

fn roll_pool(ctx: &mut ResolutionContext, params: &BlockParams, dice: BlockDice) -> Result<BlockDiceFace> {
    let mut faces = Vec::with_capacity(dice.count as usize);
    for _ in 0..dice.count {
        let face = ctx.block_die()?;
        ctx.emit(
            GameEvent::new(EventKind::BlockDie)
                .with_player(&params.attacker)
                .with_face(face),
        );
        faces.push(face);
    }

    let attacker = ctx.game_state.get_player(&params.attacker)?;
    let defender = ctx.game_state.get_player(&params.defender)?;
    let chosen = choose_face(&faces, dice, attacker, defender).ok_or("Empty block dice pool")?;

    if chosen == BlockDiceFace::BothDown && params.is_blitz && attacker.has_skill(Skill::Juggernaut) {
        ctx.emit(
            GameEvent::new(EventKind::SkillUsed)
                .with_player(&params.attacker)
                .with_skill(Skill::Juggernaut),
        );
        return Ok(BlockDiceFace::Pushed);
    }
    Ok(chosen)
}

fn worth_rerolling(face: BlockDiceFace, attacker: &Player) -> bool {
    match face {
        BlockDiceFace::AttackerDown => true,
        BlockDiceFace::BothDown => !attacker.has_skill(Skill::Block),
        _ => false,
    }
}

/// Rolls the pool and, on a bad face for the attacker, rerolls the whole pool once with Pro
/// or a team reroll.
pub fn roll_block(ctx: &mut ResolutionContext, params: &BlockParams, dice: BlockDice) -> Result<BlockDiceFace> {
    let chosen = roll_pool(ctx, params, dice)?;
    if !worth_rerolling(chosen, ctx.game_state.get_player(&params.attacker)?) {
        return Ok(chosen);
    }

    if pro_reroll(ctx, &params.attacker)? || team_reroll(ctx, &params.attacker)? {
        return roll_pool(ctx, params, dice);
    }
    Ok(chosen)
}

pub fn classify_face(face: BlockDiceFace, attacker: &Player, defender: &Player) -> BlockOutcome {
    let attacker_block = attacker.has_skill(Skill::Block);
    match face {
        BlockDiceFace::AttackerDown => BlockOutcome::AttackerDown,
        BlockDiceFace::BothDown => {
            let wrestle = defender.has_skill(Skill::Wrestle)
                || (attacker.has_skill(Skill::Wrestle) && !attacker_block);
            if wrestle {
                BlockOutcome::Wrestled
            } else {
                BlockOutcome::BothDown {
                    attacker_falls: !attacker_block,
                    defender_falls: !defender.has_skill(Skill::Block),
                }
            }
        }
        BlockDiceFace::Pushed => BlockOutcome::Pushback { knock_down: false },
        BlockDiceFace::DefenderStumbles => BlockOutcome::Pushback {
            knock_down: !(defender.has_skill(Skill::Dodge) && !attacker.has_skill(Skill::Tackle)),
        },
        BlockDiceFace::DefenderDown => BlockOutcome::Pushback { knock_down: true },
    }
}

fn apply_outcome(ctx: &mut ResolutionContext, params: &BlockParams, outcome: BlockOutcome) -> Result<ActionOutcome> {
    let attacker = ctx.game_state.get_player(&params.attacker)?;
    let defender = ctx.game_state.get_player(&params.defender)?;
    let attacker_square = attacker.position.ok_or("Attacker is not on the pitch")?;
    let attacker_fall = InjuryContext::for_victim(attacker);
    let defender_fall = InjuryContext::from_attacker(attacker, defender);
    let fend = defender.has_skill(Skill::Fend);
    let strip_ball = attacker.has_skill(Skill::StripBall) && !defender.has_skill(Skill::SureHands);

    match outcome {
        BlockOutcome::AttackerDown => {
            knock_down(ctx, &params.attacker, attacker_fall)?;
            Ok(ActionOutcome::Turnover)
        }
        BlockOutcome::Wrestled => {
            ctx.emit(
                GameEvent::new(EventKind::SkillUsed)
                    .with_player(&params.attacker)
                    .with_target(&params.defender)
                    .with_skill(Skill::Wrestle),
            );
            for id in [&params.attacker, &params.defender] {
                let player = ctx.game_state.get_player_mut(id)?;
                player.state.condition = PlayerCondition::Prone;
                let square = player.position.ok_or("Wrestled player is not on the pitch")?;
                drop_ball(ctx, id, square)?;
            }
            Ok(ActionOutcome::Ok)
        }
        BlockOutcome::BothDown {
            attacker_falls,
            defender_falls,
        } => {
            if defender_falls {
                knock_down(ctx, &params.defender, defender_fall)?;
            }
            if attacker_falls {
                knock_down(ctx, &params.attacker, attacker_fall)?;
                return Ok(ActionOutcome::Turnover);
            }
            Ok(ActionOutcome::Ok)
        }
        BlockOutcome::Pushback { knock_down: falls } => {
            let push = push_player(
                ctx,
                attacker_square,
                &params.defender,
                &params.attacker,
                params.is_blitz,
                0,
            )?;

            if let PushResult::Pushed { to, .. } = push {
                if !falls && strip_ball && ctx.game_state.ball.is_carried_by(&params.defender) {
                    ctx.emit(
                        GameEvent::new(EventKind::SkillUsed)
                            .with_player(&params.attacker)
                            .with_target(&params.defender)
                            .with_skill(Skill::StripBall),
                    );
                    drop_ball(ctx, &params.defender, to)?;
                }
            }

            if let Some(vacated) = push.vacated() {
                let defender_standing = matches!(push, PushResult::Pushed { .. }) && !falls;
                if params.follow_up && !(fend && defender_standing) {
                    ctx.game_state.move_player(&params.attacker, vacated)?;
                    ctx.emit(
                        GameEvent::new(EventKind::FollowUp)
                            .with_player(&params.attacker)
                            .with_from(Some(attacker_square))
                            .with_to(Some(vacated)),
                    );
                    if ctx.game_state.ball.is_loose_at(&vacated) {
                        resolve_pickup(ctx, &params.attacker)?;
                    }
                }
            }

            let defender_on_pitch = ctx.game_state.get_player(&params.defender)?.position.is_some();
            if falls && defender_on_pitch {
                knock_down(ctx, &params.defender, defender_fall)?;
            }
            Ok(ActionOutcome::Ok)
        }
    }
}

/// Resolves one block, including a forced Frenzy follow-up block. `Failed` means Foul
/// Appearance wasted it.
pub fn resolve_block(ctx: &mut ResolutionContext, params: &BlockParams) -> Result<ActionOutcome> {
    ctx.emit(
        GameEvent::new(EventKind::Block)
            .with_player(&params.attacker)
            .with_target(&params.defender)
            .with_success(!params.frenzy_block),
    );

    match block_precheck(ctx, params)? {
        BlockPrecheck::Wasted => return Ok(ActionOutcome::Failed),
        BlockPrecheck::WeaponUsed => return Ok(ActionOutcome::Ok),
        BlockPrecheck::Proceed => {}
    }

    let (mut attacker_st, defender_st) = block_strengths(&ctx.game_state, params)?;
    let attacker = ctx.game_state.get_player(&params.attacker)?;
    let defender = ctx.game_state.get_player(&params.defender)?;
    if attacker.has_skill(Skill::Dauntless) && defender_st > attacker_st {
        let (base_st, target_st) = (attacker.get_st(), defender.get_st());
        let roll = ctx.d6()?;
        let equalised = roll.saturating_add(base_st) > target_st;
        ctx.emit(
            GameEvent::new(EventKind::SkillUsed)
                .with_player(&params.attacker)
                .with_skill(Skill::Dauntless)
                .with_roll(roll)
                .with_success(equalised),
        );
        if equalised {
            attacker_st = defender_st;
        }
    }

    let dice = block_dice(attacker_st, defender_st);
    let face = roll_block(ctx, params, dice)?;
    let attacker = ctx.game_state.get_player(&params.attacker)?;
    let defender = ctx.game_state.get_player(&params.defender)?;
    let outcome = classify_face(face, attacker, defender);
    debug!(attacker = %params.attacker, defender = %params.defender, ?face, ?outcome, "block");

    if face == BlockDiceFace::DefenderStumbles && outcome == (BlockOutcome::Pushback { knock_down: false }) {
        ctx.emit(
            GameEvent::new(EventKind::SkillUsed)
                .with_player(&params.defender)
                .with_skill(Skill::Dodge),
        );
    }
    ctx.emit(
        GameEvent::new(EventKind::Block)
            .with_player(&params.attacker)
            .with_target(&params.defender)
            .with_face(face),
    );

    let result = apply_outcome(ctx, params, outcome)?;
    if result != ActionOutcome::Ok || params.frenzy_block {
        return Ok(result);
    }

    let attacker = ctx.game_state.get_player(&params.attacker)?;
    let defender = ctx.game_state.get_player(&params.defender)?;
    let adjacent = match (attacker.position, defender.position) {
        (Some(a), Some(d)) => a.is_adjacent(&d),
        _ => false,
    };
    if attacker.has_skill(Skill::Frenzy) && attacker.is_standing() && defender.is_standing() && adjacent {
        ctx.emit(
            GameEvent::new(EventKind::SkillUsed)
                .with_player(&params.attacker)
                .with_target(&params.defender)
                .with_skill(Skill::Frenzy),
        );
        let second = BlockParams {
            horns_bonus: false,
            frenzy_block: true,
            ..params.clone()
        };
        return resolve_block(ctx, &second);
    }
    Ok(result)
}

/// Two blocks against two different adjacent defenders, each at +2 ST and without
/// follow-up. A turnover on the first block cancels the second.
pub fn resolve_multiple_block(
    ctx: &mut ResolutionContext,
    attacker_id: &str,
    first: &str,
    second: &str,
) -> Result<ActionOutcome> {
    let mut outcomes = Vec::with_capacity(2);
    for defender in [first, second] {
        let params = BlockParams {
            follow_up: false,
            defender_strength_bonus: MULTIPLE_BLOCK_STRENGTH_BONUS,
            ..BlockParams::new(attacker_id, defender)
        };
        let outcome = resolve_block(ctx, &params)?;
        if outcome == ActionOutcome::Turnover {
            return Ok(ActionOutcome::Turnover);
        }
        if !ctx.game_state.get_player(attacker_id)?.is_standing() {
            return Ok(ActionOutcome::Ok);
        }
        outcomes.push(outcome);
    }

    if outcomes.iter().all(|outcome| *outcome == ActionOutcome::Failed) {
        Ok(ActionOutcome::Failed)
    } else {
        Ok(ActionOutcome::Ok)
    }
}
