use super::position::Square;
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, PartialEq, Eq, Clone, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Ball {
    Carried {
        position: Square,
        carrier: String,
    },
    OnGround {
        position: Square,
    },
    #[default]
    OffPitch,
}

impl Ball {
    pub fn position(&self) -> Option<Square> {
        match self {
            Ball::Carried { position, .. } | Ball::OnGround { position } => Some(*position),
            Ball::OffPitch => None,
        }
    }

    pub fn carrier(&self) -> Option<&str> {
        match self {
            Ball::Carried { carrier, .. } => Some(carrier.as_str()),
            _ => None,
        }
    }

    pub fn is_carried_by(&self, player_id: &str) -> bool {
        self.carrier() == Some(player_id)
    }

    pub fn is_loose_at(&self, square: &Square) -> bool {
        matches!(self, Ball::OnGround { position } if position == square)
    }
}
