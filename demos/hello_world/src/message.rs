//! Greeting planning and rendering for the `hello_world` demo.
use std::io::Write;

use crate::config::{DeliveryMode, GreetingConfig};
use crate::error::{HelloWorldError, ValidationError};

/// Computed greeting ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GreetingPlan {
    preamble: Option<String>,
    message: String,
    farewell: String,
}

impl GreetingPlan {
    /// Formatted greeting line.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Optional line preceding the greeting.
    #[must_use]
    pub fn preamble(&self) -> Option<&str> {
        self.preamble.as_deref()
    }

    /// Closing line.
    #[must_use]
    pub fn farewell(&self) -> &str {
        &self.farewell
    }
}

fn validate(config: &GreetingConfig) -> Result<(), ValidationError> {
    if config.recipient.trim().is_empty() {
        return Err(ValidationError::BlankRecipient);
    }
    if config.salutations.is_empty() {
        return Err(ValidationError::MissingSalutation);
    }
    if let Some(index) = config
        .salutations
        .iter()
        .position(|word| word.trim().is_empty())
    {
        return Err(ValidationError::BlankSalutation(index));
    }
    if config.delivery.excited && config.delivery.quiet {
        return Err(ValidationError::ConflictingDeliveryModes);
    }
    Ok(())
}

/// Build a [`GreetingPlan`] from the final configuration.
///
/// # Errors
///
/// Returns [`HelloWorldError::Validation`] when the configuration describes
/// an impossible greeting.
pub fn build_plan(config: &GreetingConfig) -> Result<GreetingPlan, HelloWorldError> {
    validate(config)?;
    let salutation = config
        .salutations
        .iter()
        .map(|word| word.trim())
        .collect::<Vec<_>>()
        .join(" ");
    let base = format!("{salutation}, {}", config.recipient.trim());
    let punctuation = config.delivery.punctuation.trim();
    let message = match config.delivery.mode() {
        DeliveryMode::Standard => format!("{base}{punctuation}"),
        DeliveryMode::Enthusiastic => format!("{}{punctuation}", base.to_uppercase()),
        DeliveryMode::Quiet => format!("{base}..."),
    };
    Ok(GreetingPlan {
        preamble: config
            .preamble
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(str::to_owned),
        message,
        farewell: config.farewell.clone(),
    })
}

/// Write the plan, one line per part.
///
/// # Errors
///
/// Propagates write failures.
pub fn write_plan(out: &mut dyn Write, plan: &GreetingPlan) -> std::io::Result<()> {
    if let Some(preamble) = plan.preamble() {
        writeln!(out, "{preamble}")?;
    }
    writeln!(out, "{}", plan.message())?;
    writeln!(out, "{}", plan.farewell())
}
