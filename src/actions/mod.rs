pub mod common;
pub mod core;
pub mod discovery;
pub mod execution;
pub mod validation;
