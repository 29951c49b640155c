use crate::actions::common::check_touchdown;
use crate::actions::discovery::turn::turn_discovery;
use crate::actions::execution::block::{blitz_execution, block_execution, multiple_block_execution};
use crate::actions::execution::foul::foul_execution;
use crate::actions::execution::movement::{move_execution, stand_up_execution};
use crate::actions::execution::pass::{handoff_execution, pass_execution};
use crate::actions::execution::special::{
    ball_and_chain_execution, bomb_execution, hypnotic_gaze_execution, throw_team_mate_execution,
};
use crate::actions::execution::turn::end_turn_execution;
use crate::actions::validation::validate_action;
use crate::config::EngineConfig;
use crate::dice::DiceSource;
use crate::error::Result;
use crate::model::action::Action;
use crate::model::enums::ActionType;
use crate::model::event::{EventKind, GameEvent};
use crate::model::game::GameState;
use crate::model::result::{ActionOutcome, ActionResult};
use crate::rules::context::ResolutionContext;
use tracing::{debug, warn};

/// Registry that maps every action kind to its handler
pub struct ActionRegistry {
    config: EngineConfig,
}

impl Default for ActionRegistry {
    fn default() -> Self {
        ActionRegistry::new()
    }
}

impl ActionRegistry {
    pub fn new() -> Self {
        ActionRegistry::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        ActionRegistry { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Legal actions of the active side. A state the discovery cannot read yields nothing.
    pub fn available_actions(&self, game_state: &GameState) -> Vec<Action> {
        match turn_discovery(game_state, &self.config) {
            Ok(actions) => actions,
            Err(error) => {
                warn!(%error, "action discovery failed");
                vec![]
            }
        }
    }

    /// Resolves one action against a copy of `game_state`. Illegal actions are rejected before
    /// any die is rolled; running out of dice aborts the whole action.
    pub fn resolve(
        &self,
        game_state: &GameState,
        action: &Action,
        dice: &mut dyn DiceSource,
    ) -> Result<ActionResult> {
        validate_action(game_state, action, &self.config)?;
        let action_type = action.action_type();
        debug!(?action_type, player = ?action.player(), target = ?action.target(), "resolving action");

        let mut ctx = ResolutionContext::new(game_state.clone(), dice, &self.config);
        let mut declared = GameEvent::new(EventKind::ActionDeclared).with_to(action.position());
        if let Some(player_id) = action.player() {
            declared = declared.with_player(player_id);
        }
        if let Some(target) = action.target() {
            declared = declared.with_target(target);
        }
        ctx.emit(declared);

        let outcome = match action_type {
            ActionType::Move => move_execution(&mut ctx, action)?,
            ActionType::StandUp => stand_up_execution(&mut ctx, action)?,
            ActionType::Block => block_execution(&mut ctx, action)?,
            ActionType::Blitz => blitz_execution(&mut ctx, action)?,
            ActionType::MultipleBlock => multiple_block_execution(&mut ctx, action)?,
            ActionType::Pass => pass_execution(&mut ctx, action)?,
            ActionType::Handoff => handoff_execution(&mut ctx, action)?,
            ActionType::Foul => foul_execution(&mut ctx, action)?,
            ActionType::ThrowTeamMate => throw_team_mate_execution(&mut ctx, action)?,
            ActionType::BombThrow => bomb_execution(&mut ctx, action)?,
            ActionType::HypnoticGaze => hypnotic_gaze_execution(&mut ctx, action)?,
            ActionType::BallAndChain => ball_and_chain_execution(&mut ctx, action)?,
            ActionType::EndTurn => end_turn_execution(&mut ctx)?,
        };

        if action_type != ActionType::EndTurn {
            check_touchdown(&mut ctx)?;
        }
        debug!(?action_type, ?outcome, events = ctx.events.len(), "action resolved");
        Ok(ctx.finish(outcome))
    }
}
