use crate::error::Result;
use crate::model::enums::{PlayerCondition, Skill};
use crate::model::event::{EventKind, GameEvent};
use crate::model::result::ActionOutcome;
use crate::rules::ball::resolve_bounce;
use crate::rules::context::ResolutionContext;
use tracing::debug;

/// Hands the turn to the other side. The referee first sends off the acting side's secret
/// weapons, then the new side gets its turn counter bumped and its per-turn flags cleared.
pub fn end_turn_execution(ctx: &mut ResolutionContext) -> Result<ActionOutcome> {
    let side = ctx.game_state.active_side;

    let secret_weapons: Vec<String> = ctx
        .game_state
        .players_of(side)
        .filter(|player| player.has_skill(Skill::SecretWeapon) && player.position.is_some())
        .map(|player| player.player_id.clone())
        .collect();
    for player_id in secret_weapons {
        let from = ctx.game_state.get_player(&player_id)?.position;
        let dropped = ctx
            .game_state
            .remove_from_pitch(&player_id, PlayerCondition::Ejected)?;
        ctx.emit(
            GameEvent::new(EventKind::Ejection)
                .with_player(&player_id)
                .with_from(from)
                .with_skill(Skill::SecretWeapon)
                .with_success(false),
        );
        if let Some(square) = dropped {
            resolve_bounce(ctx, square, 0)?;
        }
    }

    let next = side.opponent();
    ctx.game_state.active_side = next;
    let team = ctx.game_state.team_mut(next);
    team.turn_number = team.turn_number.saturating_add(1);
    team.reset_for_new_turn();
    let turn_number = team.turn_number;
    for player in ctx.game_state.players.values_mut() {
        if player.side == next {
            player.state.reset_for_new_turn();
        }
    }

    ctx.emit(GameEvent::new(EventKind::EndTurn).with_roll(turn_number));
    debug!(?side, ?next, turn_number, "turn handed over");
    Ok(ActionOutcome::Ok)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::dice::ScriptedDice;
    use crate::model::ball::Ball;
    use crate::model::enums::TeamSide;
    use crate::model::game::GameState;
    use crate::model::player::Player;
    use crate::model::position::Square;

    #[test]
    fn test_end_turn_switches_side_and_resets() {
        let mut state = GameState::default();
        state.away.turn_number = 3;
        state.away.blitz_used = true;
        let mut stunned = Player {
            player_id: "stunned".to_string(),
            side: TeamSide::Away,
            position: Some(Square::new(10, 7)),
            ..Default::default()
        };
        stunned.state.condition = PlayerCondition::Stunned;
        stunned.state.has_acted = true;
        state.add_player(stunned);

        let config = EngineConfig::default();
        let mut dice = ScriptedDice::default();
        let mut ctx = ResolutionContext::new(state, &mut dice, &config);
        assert_eq!(end_turn_execution(&mut ctx).unwrap(), ActionOutcome::Ok);

        let state = ctx.game_state;
        assert_eq!(state.active_side, TeamSide::Away);
        assert_eq!(state.away.turn_number, 4);
        assert!(!state.away.blitz_used);
        let stunned = &state.players["stunned"];
        assert_eq!(stunned.state.condition, PlayerCondition::Prone);
        assert!(!stunned.state.has_acted);
    }

    #[test]
    fn test_secret_weapon_sent_off_with_ball() {
        let mut state = GameState::default();
        state.add_player(Player {
            player_id: "bomber".to_string(),
            position: Some(Square::new(4, 4)),
            skills: [Skill::SecretWeapon].into(),
            ..Default::default()
        });
        state.ball = Ball::Carried {
            position: Square::new(4, 4),
            carrier: "bomber".to_string(),
        };

        let config = EngineConfig::default();
        let mut dice = ScriptedDice::new([5]);
        let mut ctx = ResolutionContext::new(state, &mut dice, &config);
        end_turn_execution(&mut ctx).unwrap();

        assert_eq!(ctx.game_state.players["bomber"].state.condition, PlayerCondition::Ejected);
        assert_eq!(ctx.game_state.ball, Ball::OnGround { position: Square::new(4, 5) });
        assert!(ctx.game_state.check_invariants().is_ok());
    }
}
