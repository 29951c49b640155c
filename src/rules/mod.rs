pub mod ball;
pub mod block;
pub mod context;
pub mod injury;
pub mod pushback;
pub mod reroll;
pub mod tacklezones;

pub use context::ResolutionContext;
