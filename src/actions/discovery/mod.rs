pub mod block;
pub mod movement;
pub mod pass;
pub mod special;
pub mod turn;
