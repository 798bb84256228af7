//! Configuration schema for the `hello_world` demo.
//!
//! Every field can be set from YAML, JSON or TOML files passed with `-c` or
//! from dotted overrides such as `delivery.excited=true`. `recipient` has no
//! default and must be supplied; `farewell` is derived from it unless set.

use configue_cli::{FactoryError, Shadow, Structured};
use serde::Deserialize;

fn default_salutations() -> Vec<String> {
    vec!["Hello".to_owned()]
}

fn farewell_for(shadow: &Shadow) -> Result<String, FactoryError> {
    let recipient = shadow.get::<String>("recipient")?;
    Ok(format!("Goodbye, {recipient}"))
}

/// How the greeting is delivered.
#[derive(Clone, Debug, PartialEq, Eq, Structured, Deserialize)]
pub struct Delivery {
    /// Shout the greeting.
    #[configue(default = false)]
    pub excited: bool,
    /// Whisper the greeting.
    #[configue(default = false)]
    pub quiet: bool,
    /// Trailing punctuation for standard and excited greetings.
    #[configue(default = String::from("!"))]
    pub punctuation: String,
}

/// Delivery style derived from the boolean switches.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeliveryMode {
    /// Plain greeting.
    Standard,
    /// Upper-case greeting.
    Enthusiastic,
    /// Greeting trailing off with an ellipsis.
    Quiet,
}

impl Delivery {
    /// Resolve the delivery mode; conflicts are reported by validation.
    #[must_use]
    pub const fn mode(&self) -> DeliveryMode {
        match (self.excited, self.quiet) {
            (true, _) => DeliveryMode::Enthusiastic,
            (false, true) => DeliveryMode::Quiet,
            (false, false) => DeliveryMode::Standard,
        }
    }
}

/// Top-level demo configuration.
#[derive(Clone, Debug, PartialEq, Eq, Structured, Deserialize)]
pub struct GreetingConfig {
    /// Person being greeted.
    pub recipient: String,
    /// Words preceding the recipient.
    #[configue(factory = default_salutations)]
    pub salutations: Vec<String>,
    /// Optional line printed before the greeting.
    #[configue(default = None)]
    pub preamble: Option<String>,
    /// Delivery style.
    #[configue(nested)]
    pub delivery: Delivery,
    /// Closing line; defaults to a goodbye addressed to the recipient.
    #[configue(factory_takes_self = farewell_for)]
    pub farewell: String,
}
