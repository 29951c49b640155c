use crate::actions::common::requested_path;
use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use crate::model::action::Action;
use crate::model::constants::STAND_UP_COST;
use crate::model::enums::{ActionType, GamePhase, PlayerCondition, Skill};
use crate::model::game::GameState;
use crate::model::player::Player;
use crate::model::position::Square;
use crate::pathfinding::Path;

/// Rejects an illegal action before a single die is rolled, with every reason found.
pub fn validate_action(game_state: &GameState, action: &Action, config: &EngineConfig) -> Result<()> {
    let reasons = collect_violations(game_state, action, config);
    if reasons.is_empty() {
        Ok(())
    } else {
        Err(EngineError::Validation(reasons))
    }
}

pub fn collect_violations(game_state: &GameState, action: &Action, config: &EngineConfig) -> Vec<String> {
    let mut reasons = Vec::new();
    if game_state.phase != GamePhase::Play {
        reasons.push(format!("Game is not in play ({:?})", game_state.phase));
    }

    let action_type = action.action_type();
    if !action_type.requires_player() {
        return reasons;
    }
    let Some(player_id) = action.player() else {
        reasons.push(format!("{action_type:?} needs a player"));
        return reasons;
    };
    let Some(player) = game_state.players.get(player_id) else {
        reasons.push(format!("Player {player_id} not found"));
        return reasons;
    };
    let Some(square) = player.position else {
        reasons.push(format!("Player {player_id} is not on the pitch"));
        return reasons;
    };

    if player.side != game_state.active_side {
        reasons.push(format!("Player {player_id} is not on the active side"));
    }
    if player.state.condition == PlayerCondition::Stunned {
        reasons.push(format!("Player {player_id} is stunned"));
    }
    if player.state.has_acted {
        reasons.push(format!("Player {player_id} has already acted this turn"));
    }
    let continues_move = matches!(action_type, ActionType::Move | ActionType::StandUp);
    if player.state.has_moved && !continues_move {
        reasons.push(format!("Player {player_id} has already moved this turn"));
    }

    let ball_and_chain = player.has_skill(Skill::BallAndChain);
    if ball_and_chain && action_type != ActionType::BallAndChain {
        reasons.push(format!("Player {player_id} can only use its Ball & Chain action"));
    }

    let team = game_state.team(player.side);
    let team_action_used = match action_type {
        ActionType::Blitz => team.blitz_used,
        ActionType::Pass | ActionType::ThrowTeamMate | ActionType::BombThrow => team.pass_used,
        ActionType::Handoff => team.handoff_used,
        ActionType::Foul => team.foul_used,
        _ => false,
    };
    if team_action_used {
        reasons.push(format!("{action_type:?} was already used this turn"));
    }

    let path = match requested_path(game_state, action, player_id) {
        Ok(path) => path,
        Err(error) => {
            reasons.push(error.to_string());
            return reasons;
        }
    };
    check_path(game_state, player, &path, config, &mut reasons);
    let acting_from = path.target().unwrap_or(square);

    match action_type {
        ActionType::Move => {
            if path.is_empty() {
                reasons.push("Move needs a path or a destination".to_string());
            }
        }
        ActionType::StandUp => {
            if player.state.condition != PlayerCondition::Prone {
                reasons.push(format!("Player {player_id} is not prone"));
            }
        }
        ActionType::Block => {
            require_standing(player, &mut reasons);
            check_opponent(game_state, player, action.target(), &acting_from, true, &mut reasons);
        }
        ActionType::Blitz => {
            check_opponent(game_state, player, action.target(), &acting_from, true, &mut reasons);
        }
        ActionType::MultipleBlock => {
            require_skill(player, Skill::MultipleBlock, &mut reasons);
            require_standing(player, &mut reasons);
            check_opponent(game_state, player, action.target(), &acting_from, true, &mut reasons);
            check_opponent(game_state, player, action.second_target(), &acting_from, true, &mut reasons);
            if action.target().is_some() && action.target() == action.second_target() {
                reasons.push("Multiple block needs two different targets".to_string());
            }
        }
        ActionType::Foul => {
            check_opponent(game_state, player, action.target(), &acting_from, false, &mut reasons);
        }
        ActionType::Pass => {
            check_ball_access(game_state, player, &path, &mut reasons);
            match action.position() {
                Some(target) if target.is_on_pitch() => {
                    let in_range = acting_from.distance(&target) <= config.max_pass_range;
                    if !in_range && !player.has_skill(Skill::HailMaryPass) {
                        reasons.push(format!("Pass to {target:?} is out of range"));
                    }
                }
                _ => reasons.push("Pass needs a target square on the pitch".to_string()),
            }
        }
        ActionType::Handoff => {
            check_ball_access(game_state, player, &path, &mut reasons);
            check_team_mate(game_state, player, action.target(), &acting_from, &mut reasons);
        }
        ActionType::ThrowTeamMate => {
            require_skill(player, Skill::ThrowTeamMate, &mut reasons);
            require_standing(player, &mut reasons);
            if let Some(team_mate) = check_team_mate(game_state, player, action.target(), &square, &mut reasons) {
                if !team_mate.has_skill(Skill::RightStuff) {
                    reasons.push(format!("Player {} has no Right Stuff", team_mate.player_id));
                }
            }
            check_throw_target(action.position(), &square, config, &mut reasons);
        }
        ActionType::BombThrow => {
            require_skill(player, Skill::Bombardier, &mut reasons);
            require_standing(player, &mut reasons);
            check_throw_target(action.position(), &square, config, &mut reasons);
        }
        ActionType::HypnoticGaze => {
            require_skill(player, Skill::HypnoticGaze, &mut reasons);
            require_standing(player, &mut reasons);
            check_opponent(game_state, player, action.target(), &square, true, &mut reasons);
        }
        ActionType::BallAndChain => {
            require_skill(player, Skill::BallAndChain, &mut reasons);
            require_standing(player, &mut reasons);
        }
        ActionType::EndTurn => {}
    }
    reasons
}

/// Shape of a requested path: each step next to the previous one (two away for a leap),
/// on the pitch, empty, and the whole walk within MA plus the GFI allowance.
fn check_path(game_state: &GameState, player: &Player, path: &Path, config: &EngineConfig, reasons: &mut Vec<String>) {
    let Some(mut current) = player.position else {
        return;
    };
    let allowed = player.get_ma() as u32 + config.gfi_allowance(player.has_skill(Skill::Sprint)) as u32;
    if path.len() > allowed as usize {
        reasons.push(format!("Path has {} steps, {allowed} allowed", path.len()));
        return;
    }
    for step in &path.steps {
        let distance = current.distance(&step.square);
        if step.leap {
            if !player.has_skill(Skill::Leap) {
                reasons.push(format!("Player {} cannot leap", player.player_id));
            }
            if !(1..=2).contains(&distance) {
                reasons.push(format!("Leap to {:?} is out of reach", step.square));
            }
        } else if distance != 1 {
            reasons.push(format!("Step to {:?} is not adjacent", step.square));
        }
        if !step.square.is_on_pitch() {
            reasons.push(format!("Step to {:?} leaves the pitch", step.square));
        } else if game_state
            .player_at(&step.square)
            .is_some_and(|occupant| occupant.player_id != player.player_id)
        {
            reasons.push(format!("Square {:?} is occupied", step.square));
        }
        current = step.square;
    }

    let stand_up = if player.state.condition.is_down() && !player.has_skill(Skill::JumpUp) {
        STAND_UP_COST as u32
    } else {
        0
    };
    let needed = player.state.movement_used as u32 + stand_up + path.movement_cost();
    if !path.is_empty() && needed > allowed {
        reasons.push(format!("Path needs {needed} squares of movement, {allowed} allowed"));
    }
}

fn require_skill(player: &Player, skill: Skill, reasons: &mut Vec<String>) {
    if !player.has_skill(skill) {
        reasons.push(format!("Player {} has no {skill:?}", player.player_id));
    }
}

fn require_standing(player: &Player, reasons: &mut Vec<String>) {
    if !player.is_standing() {
        reasons.push(format!("Player {} is not standing", player.player_id));
    }
}

/// An enemy next to `from`: standing for blocks and gazes, down for fouls.
fn check_opponent(
    game_state: &GameState,
    player: &Player,
    target: Option<&str>,
    from: &Square,
    standing: bool,
    reasons: &mut Vec<String>,
) {
    let Some(target) = target else {
        reasons.push("Action needs a target player".to_string());
        return;
    };
    let Some(opponent) = game_state.players.get(target) else {
        reasons.push(format!("Target {target} not found"));
        return;
    };
    if opponent.side == player.side {
        reasons.push(format!("Target {target} is a team-mate"));
    }
    if standing && !opponent.is_standing() {
        reasons.push(format!("Target {target} is not standing"));
    }
    if !standing && !opponent.state.condition.is_down() {
        reasons.push(format!("Target {target} is not down"));
    }
    if !opponent.position.is_some_and(|square| square.is_adjacent(from)) {
        reasons.push(format!("Target {target} is not adjacent"));
    }
}

fn check_team_mate<'a>(
    game_state: &'a GameState,
    player: &Player,
    target: Option<&str>,
    from: &Square,
    reasons: &mut Vec<String>,
) -> Option<&'a Player> {
    let Some(target) = target else {
        reasons.push("Action needs a team-mate".to_string());
        return None;
    };
    let Some(team_mate) = game_state.players.get(target) else {
        reasons.push(format!("Team-mate {target} not found"));
        return None;
    };
    if team_mate.side != player.side || team_mate.player_id == player.player_id {
        reasons.push(format!("Player {target} is not a team-mate"));
    }
    if !team_mate.is_standing() {
        reasons.push(format!("Team-mate {target} is not standing"));
    }
    if !team_mate.position.is_some_and(|square| square.is_adjacent(from)) {
        reasons.push(format!("Team-mate {target} is not adjacent"));
    }
    Some(team_mate)
}

/// The player holds the ball or walks over it on the way.
fn check_ball_access(game_state: &GameState, player: &Player, path: &Path, reasons: &mut Vec<String>) {
    if player.has_skill(Skill::NoHands) {
        reasons.push(format!("Player {} has no hands", player.player_id));
    }
    let holds = game_state.ball.is_carried_by(&player.player_id);
    let on_the_way = path.squares().any(|square| game_state.ball.is_loose_at(&square));
    if !holds && !on_the_way {
        reasons.push(format!("Player {} has no ball", player.player_id));
    }
}

fn check_throw_target(target: Option<Square>, from: &Square, config: &EngineConfig, reasons: &mut Vec<String>) {
    match target {
        Some(target) if target.is_on_pitch() && target != *from => {
            if from.distance(&target) > config.max_pass_range {
                reasons.push(format!("Throw to {target:?} is out of range"));
            }
        }
        _ => reasons.push("Throw needs a target square on the pitch".to_string()),
    }
}
