use crate::config::EngineConfig;
use crate::dice::DiceSource;
use crate::error::Result;
use crate::model::enums::BlockDiceFace;
use crate::model::event::{EventKind, GameEvent};
use crate::model::game::GameState;
use crate::model::result::{ActionOutcome, ActionResult};
use tracing::trace;

/// Working copy of the state plus everything a resolution writes to. The caller's state is
/// cloned into it, so nothing the caller holds is ever mutated.
pub struct ResolutionContext<'a> {
    pub game_state: GameState,
    pub events: Vec<GameEvent>,
    pub config: &'a EngineConfig,
    dice: &'a mut dyn DiceSource,
}

impl<'a> ResolutionContext<'a> {
    pub fn new(game_state: GameState, dice: &'a mut dyn DiceSource, config: &'a EngineConfig) -> Self {
        ResolutionContext {
            game_state,
            events: Vec::new(),
            config,
            dice,
        }
    }

    pub fn emit(&mut self, event: GameEvent) {
        trace!(kind = ?event.kind, player = ?event.player, roll = ?event.roll, success = event.success);
        self.events.push(event);
    }

    pub fn d6(&mut self) -> Result<u8> {
        let roll = self.dice.d6()?;
        trace!(roll, "d6");
        Ok(roll)
    }

    pub fn d8(&mut self) -> Result<u8> {
        let roll = self.dice.d8()?;
        trace!(roll, "d8");
        Ok(roll)
    }

    pub fn two_d6(&mut self) -> Result<u8> {
        let roll = self.dice.two_d6()?;
        trace!(roll, "2d6");
        Ok(roll)
    }

    pub fn block_die(&mut self) -> Result<BlockDiceFace> {
        let face = self.dice.block_die()?;
        trace!(?face, "block die");
        Ok(face)
    }

    pub fn finish(mut self, outcome: ActionOutcome) -> ActionResult {
        if outcome == ActionOutcome::Turnover {
            let side = self.game_state.active_side;
            self.events.push(GameEvent::new(EventKind::Turnover).with_success(false));
            trace!(?side, "turnover");
        }
        ActionResult {
            state: self.game_state,
            events: self.events,
            outcome,
        }
    }
}
