//! Extension for mapping foreign errors into [`ConfigueResult`].
//!
//! Saves the `.map_err(|e| Arc::new(ConfigueError::from(e)))` dance when a
//! `serde_json` or I/O error crosses into the crate's result alias.
//!
//! ```
//! use configue_cli::{ConfigueResult, ConfigueResultExt};
//!
//! fn parse() -> ConfigueResult<u16> {
//!     serde_json::from_str("8080").into_configue()
//! }
//! assert_eq!(parse().ok(), Some(8080));
//! ```

use std::sync::Arc;

use crate::{ConfigueError, ConfigueResult};

/// Converts `Result<T, E>` with `E: Into<ConfigueError>` into a
/// [`ConfigueResult`].
pub trait ConfigueResultExt<T> {
    /// Wrap the error side in a shared [`ConfigueError`].
    ///
    /// # Errors
    ///
    /// Propagates the original error after conversion.
    fn into_configue(self) -> ConfigueResult<T>;
}

impl<T, E> ConfigueResultExt<T> for Result<T, E>
where
    E: Into<ConfigueError>,
{
    fn into_configue(self) -> ConfigueResult<T> {
        self.map_err(|e| Arc::new(e.into()))
    }
}
