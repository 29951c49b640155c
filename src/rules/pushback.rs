use crate::error::Result;
use crate::model::block::PushResult;
use crate::model::constants::SCATTER_OFFSETS;
use crate::model::enums::Skill;
use crate::model::event::{EventKind, GameEvent};
use crate::model::game::GameState;
use crate::model::position::Square;
use crate::rules::ball::resolve_bounce;
use crate::rules::context::ResolutionContext;
use crate::rules::injury::resolve_crowd_surf;
use tracing::warn;

/// Who decides where a pushed player ends up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushChooser {
    /// First empty square of the fan, or the first square if all are taken.
    Default,
    /// Side Step: the pushed player picks the square farthest from the attacker, the first
    /// in the fan on ties.
    SideStep { attacker: Square },
    /// Grab: the attacker picks the square closest to a sideline.
    Grab,
}

/// The three squares a player at `target` can be pushed into by a pusher at `pusher`:
/// straight back and the two diagonals, in that order, dropping squares off the pitch.
pub fn push_squares(pusher: &Square, target: &Square) -> Vec<Square> {
    let direction = pusher.direction_to(target);
    let Some(index) = SCATTER_OFFSETS.iter().position(|offset| *offset == direction) else {
        return Vec::new();
    };
    [index, (index + 1) % 8, (index + 7) % 8]
        .iter()
        .map(|i| {
            let (dx, dy) = SCATTER_OFFSETS[*i];
            target.offset(dx, dy)
        })
        .filter(|square| square.is_on_pitch())
        .collect()
}

/// Picks the destination among `candidates`. Empty squares always win over occupied ones.
pub fn choose_push_square(
    game_state: &GameState,
    candidates: &[Square],
    chooser: PushChooser,
) -> Option<Square> {
    let empty: Vec<Square> = candidates
        .iter()
        .copied()
        .filter(|square| !game_state.is_occupied(square))
        .collect();
    let pool = if empty.is_empty() { candidates } else { &empty[..] };

    match chooser {
        PushChooser::Default => pool.first().copied(),
        PushChooser::SideStep { attacker } => {
            let mut best: Option<(Square, u32)> = None;
            for square in pool {
                let distance = square.distance(&attacker);
                if best.map_or(true, |(_, farthest)| distance > farthest) {
                    best = Some((*square, distance));
                }
            }
            best.map(|(square, _)| square)
        }
        PushChooser::Grab => pool.iter().copied().min_by_key(Square::edge_distance),
    }
}

fn chooser_for(game_state: &GameState, player_id: &str, attacker_id: &str, is_blitz: bool, depth: u8) -> Result<PushChooser> {
    let grab = depth == 0 && !is_blitz && game_state.get_player(attacker_id)?.has_skill(Skill::Grab);
    let side_step = game_state.get_player(player_id)?.has_skill(Skill::SideStep);
    Ok(if side_step && !grab {
        let attacker = game_state
            .get_player(attacker_id)?
            .position
            .ok_or("Attacker is not on the pitch")?;
        PushChooser::SideStep { attacker }
    } else if grab {
        PushChooser::Grab
    } else {
        PushChooser::Default
    })
}

/// Pushes `player_id` away from `pusher`. Occupied destinations push their occupant on in
/// the same fan first, so the farthest player moves first. If anyone in the chain stands
/// firm or the chain outgrows the depth cap, nobody moves.
pub fn push_player(
    ctx: &mut ResolutionContext,
    pusher: Square,
    player_id: &str,
    attacker_id: &str,
    is_blitz: bool,
    depth: u8,
) -> Result<PushResult> {
    if depth > ctx.config.max_chain_push_depth {
        warn!(player_id, depth, "chain push depth cap reached, push abandoned");
        ctx.emit(
            GameEvent::new(EventKind::DepthCapReached)
                .with_player(player_id)
                .with_roll(depth)
                .with_success(false),
        );
        return Ok(PushResult::ChainAbandoned);
    }

    let chooser = chooser_for(&ctx.game_state, player_id, attacker_id, is_blitz, depth)?;
    let player = ctx.game_state.get_player(player_id)?;
    let from = player.position.ok_or("Pushed player is not on the pitch")?;

    if player.has_skill(Skill::StandFirm) && player.is_standing() {
        let juggernaut = is_blitz && ctx.game_state.get_player(attacker_id)?.has_skill(Skill::Juggernaut);
        if !juggernaut {
            ctx.emit(
                GameEvent::new(EventKind::StandFirm)
                    .with_player(player_id)
                    .with_skill(Skill::StandFirm)
                    .with_from(Some(from)),
            );
            return Ok(PushResult::StoodFirm);
        }
    }

    let candidates = push_squares(&pusher, &from);
    let Some(to) = choose_push_square(&ctx.game_state, &candidates, chooser) else {
        resolve_crowd_surf(ctx, player_id)?;
        return Ok(PushResult::CrowdSurf { from });
    };

    if let Some(occupant) = ctx.game_state.player_id_at(&to) {
        match push_player(ctx, from, &occupant, attacker_id, is_blitz, depth + 1)? {
            PushResult::StoodFirm => return Ok(PushResult::StoodFirm),
            PushResult::ChainAbandoned => return Ok(PushResult::ChainAbandoned),
            PushResult::Pushed { .. } | PushResult::CrowdSurf { .. } => {}
        }
    }

    ctx.game_state.move_player(player_id, to)?;
    let mut event = GameEvent::new(EventKind::Push)
        .with_player(player_id)
        .with_from(Some(from))
        .with_to(Some(to));
    if chooser != PushChooser::Default {
        let skill = match chooser {
            PushChooser::SideStep { .. } => Skill::SideStep,
            _ => Skill::Grab,
        };
        event = event.with_skill(skill);
    }
    ctx.emit(event);

    if ctx.game_state.ball.is_loose_at(&to) {
        resolve_bounce(ctx, to, 0)?;
    }
    Ok(PushResult::Pushed { from, to })
}
