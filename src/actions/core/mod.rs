pub mod registry;

pub use registry::ActionRegistry;
