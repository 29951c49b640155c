pub mod big_guy;
pub mod block;
pub mod foul;
pub mod movement;
pub mod pass;
pub mod special;
pub mod turn;
