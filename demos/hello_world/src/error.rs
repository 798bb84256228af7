//! Error types for the `hello_world` demo.
use std::sync::Arc;
use thiserror::Error;

/// Errors raised by the hello world demo.
#[derive(Debug, Error)]
pub enum HelloWorldError {
    /// Configuration could not be composed or instantiated.
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<configue_cli::ConfigueError>),
    /// The configuration loaded but describes an impossible greeting.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// Writing the greeting failed.
    #[error("failed to write greeting: {0}")]
    Output(#[from] std::io::Error),
}

/// Validation issues detected before greeting anyone.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// No greeting words were provided.
    #[error("at least one salutation must be provided")]
    MissingSalutation,
    /// A salutation collapsed to nothing after trimming.
    #[error("salutations must contain visible characters (index {0})")]
    BlankSalutation(usize),
    /// Mutually exclusive delivery modes were enabled simultaneously.
    #[error("cannot combine delivery.excited with delivery.quiet")]
    ConflictingDeliveryModes,
    /// The recipient collapsed to nothing after trimming.
    #[error("the recipient must contain visible characters")]
    BlankRecipient,
}
