pub mod path;

pub use path::{MoveStep, Path};
