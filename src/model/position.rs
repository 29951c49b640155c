use crate::model::constants::{PITCH_HEIGHT, PITCH_WIDTH, SCATTER_OFFSETS};
use serde::{Deserialize, Serialize};

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize, Hash, PartialOrd, Ord)]
pub struct Square {
    pub x: i32,
    pub y: i32,
}

impl Square {
    pub fn new(x: i32, y: i32) -> Self {
        Square { x, y }
    }

    /// Default distance calculation (max of x and y differences)
    pub fn distance(&self, other: &Square) -> u32 {
        (self.x - other.x).abs().max((self.y - other.y).abs()) as u32
    }

    /// Returns True, if the square is adjacent (distance = 1)
    pub fn is_adjacent(&self, other: &Square) -> bool {
        self.distance(other) == 1
    }

    pub fn is_on_pitch(&self) -> bool {
        (0..PITCH_WIDTH).contains(&self.x) && (0..PITCH_HEIGHT).contains(&self.y)
    }

    pub fn offset(&self, dx: i32, dy: i32) -> Square {
        Square::new(self.x + dx, self.y + dy)
    }

    /// Square reached by moving `distance` steps in the d8 scatter direction.
    pub fn scatter(&self, d8: u8, distance: i32) -> Square {
        let (dx, dy) = scatter_offset(d8);
        self.offset(dx * distance, dy * distance)
    }

    /// Distance to the nearest pitch edge (0 on the outermost ring).
    pub fn edge_distance(&self) -> i32 {
        self.x
            .min(PITCH_WIDTH - 1 - self.x)
            .min(self.y)
            .min(PITCH_HEIGHT - 1 - self.y)
    }

    pub fn clamp_to_pitch(&self) -> Square {
        Square::new(
            self.x.clamp(0, PITCH_WIDTH - 1),
            self.y.clamp(0, PITCH_HEIGHT - 1),
        )
    }

    /// All 8 neighbours, including the ones off the pitch.
    pub fn get_adjacent_squares(&self, on_pitch_only: bool) -> Vec<Square> {
        SCATTER_OFFSETS
            .iter()
            .map(|(dx, dy)| self.offset(*dx, *dy))
            .filter(|square| !on_pitch_only || square.is_on_pitch())
            .collect()
    }

    /// Unit step (each axis in -1..=1) pointing from `self` towards `other`.
    pub fn direction_to(&self, other: &Square) -> (i32, i32) {
        ((other.x - self.x).signum(), (other.y - self.y).signum())
    }
}

/// Offset for a d8 scatter roll, clockwise from north (1 = N, 8 = NW).
pub fn scatter_offset(d8: u8) -> (i32, i32) {
    let index = d8.clamp(1, 8) as usize - 1;
    SCATTER_OFFSETS[index]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_is_chebyshev() {
        let a = Square::new(3, 3);
        assert_eq!(a.distance(&Square::new(5, 4)), 2);
        assert!(a.is_adjacent(&Square::new(4, 4)));
        assert!(!a.is_adjacent(&a));
    }

    #[test]
    fn test_adjacent_squares_at_corner() {
        let corner = Square::new(0, 0);
        assert_eq!(corner.get_adjacent_squares(false).len(), 8);
        assert_eq!(corner.get_adjacent_squares(true).len(), 3);
    }

    #[test]
    fn test_scatter_directions() {
        let origin = Square::new(10, 7);
        assert_eq!(origin.scatter(1, 1), Square::new(10, 6));
        assert_eq!(origin.scatter(3, 2), Square::new(12, 7));
        assert_eq!(origin.scatter(8, 1), Square::new(9, 6));
    }

    #[test]
    fn test_clamp_and_edge_distance() {
        let outside = Square::new(-3, 20);
        assert!(!outside.is_on_pitch());
        assert_eq!(outside.clamp_to_pitch(), Square::new(0, PITCH_HEIGHT - 1));
        assert_eq!(Square::new(1, 7).edge_distance(), 1);
    }
}
