use std::time::Duration;

use thiserror::Error;

/// Errors surfaced by page objects and the browser session layer.
#[derive(Debug, Error)]
pub enum PageError {
    /// Bad `start_page` argument at construction time.
    #[error("start page must be either 'register' or 'login', got '{0}'")]
    InvalidStartPage(String),

    /// A timed wait ran out of budget before its condition held.
    #[error("wait condition '{condition}' timed out after {timeout:?}")]
    WaitTimeout { condition: String, timeout: Duration },

    /// The Node.js driver process failed to spawn.
    #[error("failed to spawn {script} (is Node.js installed?): {source}")]
    DriverSpawn {
        script: String,
        #[source]
        source: std::io::Error,
    },

    /// Reading from or writing to the driver process failed.
    #[error("driver i/o error: {0}")]
    DriverIo(String),

    /// A line from the driver was not the JSON we expected.
    #[error("invalid json from driver ({context}): {source}")]
    DriverJson {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The driver executed the command and reported failure
    /// (element not found, not interactable, navigation error).
    #[error("driver rejected '{command}': {error}")]
    DriverCommand { command: String, error: String },
}
