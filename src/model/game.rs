use super::ball::Ball;
use super::enums::{GamePhase, PlayerCondition, TeamSide, WeatherType};
use super::player::Player;
use super::position::Square;
use super::team::Team;
use crate::error::Result;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub half: u8,
    pub phase: GamePhase,
    pub active_side: TeamSide,
    #[serde(default)]
    pub weather: WeatherType,
    pub home: Team,
    pub away: Team,
    /// Ordered by id so that iteration, and with it every resolution, is deterministic.
    pub players: BTreeMap<String, Player>,
    #[serde(default)]
    pub ball: Ball,
}

impl Default for GameState {
    fn default() -> Self {
        GameState {
            half: 1,
            phase: GamePhase::Play,
            active_side: TeamSide::Home,
            weather: WeatherType::default(),
            home: Team::new(TeamSide::Home),
            away: Team::new(TeamSide::Away),
            players: BTreeMap::new(),
            ball: Ball::OffPitch,
        }
    }
}

impl GameState {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn add_player(&mut self, player: Player) {
        self.players.insert(player.player_id.clone(), player);
    }

    pub fn get_player(&self, player_id: &str) -> Result<&Player> {
        Ok(self
            .players
            .get(player_id)
            .ok_or(format!("Player {player_id} not found"))?)
    }

    pub fn get_player_mut(&mut self, player_id: &str) -> Result<&mut Player> {
        Ok(self
            .players
            .get_mut(player_id)
            .ok_or(format!("Player {player_id} not found"))?)
    }

    pub fn player_at(&self, square: &Square) -> Option<&Player> {
        self.players
            .values()
            .find(|player| player.position.as_ref() == Some(square))
    }

    pub fn player_id_at(&self, square: &Square) -> Option<String> {
        self.player_at(square).map(|player| player.player_id.clone())
    }

    pub fn is_occupied(&self, square: &Square) -> bool {
        self.player_at(square).is_some()
    }

    pub fn team(&self, side: TeamSide) -> &Team {
        match side {
            TeamSide::Home => &self.home,
            TeamSide::Away => &self.away,
        }
    }

    pub fn team_mut(&mut self, side: TeamSide) -> &mut Team {
        match side {
            TeamSide::Home => &mut self.home,
            TeamSide::Away => &mut self.away,
        }
    }

    pub fn players_of(&self, side: TeamSide) -> impl Iterator<Item = &Player> {
        self.players.values().filter(move |player| player.side == side)
    }

    /// Players of `side` standing next to `square`.
    pub fn adjacent_standing(&self, square: &Square, side: TeamSide) -> Vec<&Player> {
        self.players_of(side)
            .filter(|player| player.is_standing())
            .filter(|player| player.position.is_some_and(|p| p.is_adjacent(square)))
            .collect()
    }

    /// Moves a player and, when it carries the ball, the ball with it.
    pub fn move_player(&mut self, player_id: &str, to: Square) -> Result<()> {
        self.get_player_mut(player_id)?.position = Some(to);
        if let Ball::Carried { position, carrier } = &mut self.ball {
            if carrier == player_id {
                *position = to;
            }
        }
        Ok(())
    }

    /// Takes a player off the pitch. A carried ball is left on the ground at the square the
    /// player occupied, which is returned so the caller can bounce it.
    pub fn remove_from_pitch(
        &mut self,
        player_id: &str,
        condition: PlayerCondition,
    ) -> Result<Option<Square>> {
        let player = self.get_player_mut(player_id)?;
        let vacated = player.position.take();
        player.state.condition = condition;

        if self.ball.is_carried_by(player_id) {
            let square = vacated.ok_or("Ball carrier has no position")?;
            self.ball = Ball::OnGround { position: square };
            return Ok(Some(square));
        }
        Ok(None)
    }

    pub fn carrier(&self) -> Option<&Player> {
        self.ball
            .carrier()
            .and_then(|carrier| self.players.get(carrier))
    }

    /// Checks the position/condition and ball invariants of a state.
    pub fn check_invariants(&self) -> Result<()> {
        for player in self.players.values() {
            if player.position.is_some() != player.state.condition.is_on_pitch() {
                return Err(format!(
                    "Player {} is {:?} with position {:?}",
                    player.player_id, player.state.condition, player.position
                )
                .into());
            }
        }
        if let Ball::Carried { position, carrier } = &self.ball {
            let player = self.get_player(carrier)?;
            if player.position != Some(*position) {
                return Err(format!("Ball at {position:?} but carrier {carrier} is elsewhere").into());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with_carrier() -> GameState {
        let mut state = GameState::default();
        state.add_player(Player {
            player_id: "carrier".to_string(),
            position: Some(Square::new(4, 4)),
            ..Default::default()
        });
        state.ball = Ball::Carried {
            position: Square::new(4, 4),
            carrier: "carrier".to_string(),
        };
        state
    }

    #[test]
    fn test_ball_follows_carrier() {
        let mut state = state_with_carrier();
        state.move_player("carrier", Square::new(5, 4)).unwrap();
        assert_eq!(state.ball.position(), Some(Square::new(5, 4)));
        assert!(state.check_invariants().is_ok());
    }

    #[test]
    fn test_removed_carrier_drops_ball() {
        let mut state = state_with_carrier();
        let dropped = state
            .remove_from_pitch("carrier", PlayerCondition::KnockedOut)
            .unwrap();
        assert_eq!(dropped, Some(Square::new(4, 4)));
        assert_eq!(
            state.ball,
            Ball::OnGround {
                position: Square::new(4, 4)
            }
        );
        assert!(state.check_invariants().is_ok());
    }

    #[test]
    fn test_json_roundtrip() {
        let state = state_with_carrier();
        let json = state.to_json().unwrap();
        assert_eq!(GameState::from_json(&json).unwrap(), state);
    }
}
