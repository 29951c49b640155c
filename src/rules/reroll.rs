use crate::error::Result;
use crate::model::constants::SKILL_CHECK_TARGET;
use crate::model::enums::Skill;
use crate::model::event::{EventKind, GameEvent};
use crate::rules::context::ResolutionContext;
use tracing::trace;

/// Final die of a roll cascade and whether it met the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RollAttempt {
    pub roll: u8,
    pub success: bool,
}

/// Rolls against `target` and walks the reroll cascade on failure: the player's own reroll
/// skill, then Pro, then a team reroll. Only one of them ever fires per roll; a Pro check
/// that fails does not count as fired.
pub fn attempt_roll(
    ctx: &mut ResolutionContext,
    player_id: &str,
    target: u8,
    skill_reroll: Option<Skill>,
    skill_negated: bool,
) -> Result<RollAttempt> {
    let roll = ctx.d6()?;
    if roll >= target {
        return Ok(RollAttempt { roll, success: true });
    }

    if let Some(skill) = skill_reroll {
        if !skill_negated && ctx.game_state.get_player(player_id)?.has_skill(skill) {
            let roll = ctx.d6()?;
            let success = roll >= target;
            ctx.emit(
                GameEvent::new(EventKind::SkillReroll)
                    .with_player(player_id)
                    .with_skill(skill)
                    .with_roll(roll)
                    .with_success(success),
            );
            trace!(player_id, ?skill, roll, target, "skill reroll");
            return Ok(RollAttempt { roll, success });
        }
    }

    if pro_reroll(ctx, player_id)? {
        let roll = ctx.d6()?;
        let success = roll >= target;
        ctx.emit(
            GameEvent::new(EventKind::SkillReroll)
                .with_player(player_id)
                .with_skill(Skill::Pro)
                .with_roll(roll)
                .with_success(success),
        );
        return Ok(RollAttempt { roll, success });
    }

    if team_reroll(ctx, player_id)? {
        let roll = ctx.d6()?;
        let success = roll >= target;
        trace!(player_id, roll, target, "team reroll");
        return Ok(RollAttempt { roll, success });
    }

    Ok(RollAttempt {
        roll,
        success: false,
    })
}

/// Spends the player's Pro for this turn and rolls the 4+ check. `true` unlocks one more
/// attempt.
pub fn pro_reroll(ctx: &mut ResolutionContext, player_id: &str) -> Result<bool> {
    let player = ctx.game_state.get_player_mut(player_id)?;
    if !player.has_skill(Skill::Pro) || player.state.pro_used {
        return Ok(false);
    }
    player.state.pro_used = true;

    let roll = ctx.d6()?;
    let unlocked = roll >= SKILL_CHECK_TARGET;
    ctx.emit(
        GameEvent::new(EventKind::ProCheck)
            .with_player(player_id)
            .with_skill(Skill::Pro)
            .with_roll(roll)
            .with_success(unlocked),
    );
    Ok(unlocked)
}

/// Spends a team reroll if one is available this turn. The reroll is consumed even when
/// the Loner check then voids it.
pub fn team_reroll(ctx: &mut ResolutionContext, player_id: &str) -> Result<bool> {
    let player = ctx.game_state.get_player(player_id)?;
    let side = player.side;
    let loner = player.has_skill(Skill::Loner);

    let team = ctx.game_state.team_mut(side);
    if !team.can_use_reroll() {
        return Ok(false);
    }
    team.use_reroll();
    let remaining = team.rerolls;
    ctx.emit(
        GameEvent::new(EventKind::TeamReroll)
            .with_player(player_id)
            .with_roll(remaining),
    );

    if loner {
        let roll = ctx.d6()?;
        let passed = roll >= SKILL_CHECK_TARGET;
        ctx.emit(
            GameEvent::new(EventKind::LonerCheck)
                .with_player(player_id)
                .with_skill(Skill::Loner)
                .with_roll(roll)
                .with_success(passed),
        );
        return Ok(passed);
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::dice::ScriptedDice;
    use crate::model::game::GameState;
    use crate::model::player::Player;

    fn state_with(skills: &[Skill], rerolls: u8) -> GameState {
        let mut state = GameState::default();
        state.home.rerolls = rerolls;
        state.add_player(Player {
            player_id: "p".to_string(),
            skills: skills.iter().copied().collect(),
            ..Default::default()
        });
        state
    }

    fn run(state: GameState, rolls: Vec<u8>, skill: Option<Skill>) -> (RollAttempt, GameState, usize) {
        let config = EngineConfig::default();
        let mut dice = ScriptedDice::new(rolls);
        let (attempt, state) = {
            let mut ctx = ResolutionContext::new(state, &mut dice, &config);
            let attempt = attempt_roll(&mut ctx, "p", 4, skill, false).unwrap();
            (attempt, ctx.game_state)
        };
        (attempt, state, dice.remaining())
    }

    #[test]
    fn test_first_roll_success() {
        let (attempt, state, left) = run(state_with(&[], 3), vec![5, 6], None);
        assert_eq!(attempt, RollAttempt { roll: 5, success: true });
        assert_eq!(state.home.rerolls, 3);
        assert_eq!(left, 1);
    }

    #[test]
    fn test_skill_reroll_blocks_team_reroll() {
        let (attempt, state, left) =
            run(state_with(&[Skill::Dodge], 3), vec![1, 2, 6], Some(Skill::Dodge));
        assert!(!attempt.success);
        assert_eq!(state.home.rerolls, 3);
        assert!(!state.home.reroll_used_this_turn);
        assert_eq!(left, 1);
    }

    #[test]
    fn test_pro_check_failure_falls_through_to_team() {
        let (attempt, state, left) = run(state_with(&[Skill::Pro], 2), vec![1, 3, 5], None);
        assert!(attempt.success);
        assert!(state.players["p"].state.pro_used);
        assert_eq!(state.home.rerolls, 1);
        assert_eq!(left, 0);
    }

    #[test]
    fn test_pro_reroll_fires_alone() {
        let (attempt, state, left) = run(state_with(&[Skill::Pro], 2), vec![1, 4, 2, 6], None);
        assert!(!attempt.success);
        assert_eq!(state.home.rerolls, 2);
        assert_eq!(left, 1);
    }

    #[test]
    fn test_loner_spends_reroll_even_when_failing() {
        let (attempt, state, left) = run(state_with(&[Skill::Loner], 1), vec![2, 3, 6], None);
        assert!(!attempt.success);
        assert_eq!(state.home.rerolls, 0);
        assert!(state.home.reroll_used_this_turn);
        assert_eq!(left, 1);
    }

    #[test]
    fn test_team_reroll_once_per_turn() {
        let mut state = state_with(&[], 3);
        state.home.reroll_used_this_turn = true;
        let (attempt, state, left) = run(state, vec![2, 6], None);
        assert!(!attempt.success);
        assert_eq!(state.home.rerolls, 3);
        assert_eq!(left, 1);
    }
}
