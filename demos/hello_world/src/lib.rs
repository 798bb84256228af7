//! Library facade for the `hello_world` demo so integration tests can reuse
//! the configuration schema and greeting builder.

pub mod config;
pub mod error;
pub mod message;
