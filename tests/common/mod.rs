#![allow(dead_code)]

use dicebowl_core::actions::core::registry::ActionRegistry;
use dicebowl_core::dice::ScriptedDice;
use dicebowl_core::error::Result;
use dicebowl_core::model::action::Action;
use dicebowl_core::model::ball::Ball;
use dicebowl_core::model::enums::{Skill, TeamSide};
use dicebowl_core::model::event::EventKind;
use dicebowl_core::model::game::GameState;
use dicebowl_core::model::player::Player;
use dicebowl_core::model::position::Square;
use dicebowl_core::model::result::ActionResult;
use dicebowl_core::pathfinding::Path;

pub const HOME_PLAYER_ID: &str = "home_player_id";
pub const AWAY_PLAYER_ID: &str = "away_player_id";

/// One home and one away player with the ball on the ground, home to act.
pub fn game_state_setup(
    home_x: i32,
    home_y: i32,
    away_x: i32,
    away_y: i32,
    ball_x: i32,
    ball_y: i32,
) -> GameState {
    StateBuilder::new()
        .home(HOME_PLAYER_ID, home_x, home_y)
        .away(AWAY_PLAYER_ID, away_x, away_y)
        .loose_ball(ball_x, ball_y)
        .build()
}

pub struct StateBuilder {
    state: GameState,
}

impl StateBuilder {
    pub fn new() -> Self {
        StateBuilder {
            state: GameState::default(),
        }
    }

    pub fn home(self, player_id: &str, x: i32, y: i32) -> Self {
        self.player(player_id, TeamSide::Home, x, y, &[])
    }

    pub fn away(self, player_id: &str, x: i32, y: i32) -> Self {
        self.player(player_id, TeamSide::Away, x, y, &[])
    }

    pub fn player(mut self, player_id: &str, side: TeamSide, x: i32, y: i32, skills: &[Skill]) -> Self {
        self.state.add_player(Player {
            player_id: player_id.to_string(),
            side,
            position: Some(Square::new(x, y)),
            skills: skills.iter().copied().collect(),
            ..Default::default()
        });
        self
    }

    pub fn edit(mut self, player_id: &str, edit: impl FnOnce(&mut Player)) -> Self {
        if let Some(player) = self.state.players.get_mut(player_id) {
            edit(player);
        }
        self
    }

    pub fn carrier(mut self, player_id: &str) -> Self {
        let position = self.state.players[player_id]
            .position
            .expect("carrier must be on the pitch");
        self.state.ball = Ball::Carried {
            position,
            carrier: player_id.to_string(),
        };
        self
    }

    pub fn loose_ball(mut self, x: i32, y: i32) -> Self {
        self.state.ball = Ball::OnGround {
            position: Square::new(x, y),
        };
        self
    }

    pub fn active(mut self, side: TeamSide) -> Self {
        self.state.active_side = side;
        self
    }

    pub fn rerolls(mut self, side: TeamSide, rerolls: u8) -> Self {
        self.state.team_mut(side).rerolls = rerolls;
        self
    }

    pub fn build(self) -> GameState {
        self.state
    }
}

/// Resolves `action` with the scripted rolls and returns the result with the unused rolls.
pub fn resolve(state: &GameState, action: &Action, rolls: &[u8]) -> Result<(ActionResult, usize)> {
    let mut dice = ScriptedDice::new(rolls.iter().copied());
    let result = ActionRegistry::new().resolve(state, action, &mut dice)?;
    Ok((result, dice.remaining()))
}

pub fn count_events(result: &ActionResult, kind: EventKind) -> usize {
    result.events.iter().filter(|event| event.kind == kind).count()
}

pub fn straight_path(state: &GameState, player_id: &str, squares: &[(i32, i32)]) -> Path {
    let squares: Vec<Square> = squares.iter().map(|(x, y)| Square::new(*x, *y)).collect();
    Path::annotate(state, player_id, &squares).expect("path annotation")
}
