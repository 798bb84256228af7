//! Error types produced while synthesising, loading and rendering
//! configuration.

mod constructors;
mod factory;
mod types;

pub use factory::FactoryError;
pub use types::ConfigueError;
