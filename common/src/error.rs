use thiserror::Error;

use crate::platform::Platform;

/// Problems with the run configuration.
///
/// All of these are detected before the first host command is issued.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid subnet '{input}': {reason}")]
    InvalidSubnet { input: String, reason: String },

    #[error("operation must be either 'add' or 'remove', got '{0}'")]
    InvalidOperation(String),

    #[error("either a device prefix or a device must be specified")]
    MissingDevice,

    #[error("a device prefix and a device are mutually exclusive")]
    ConflictingDevice,

    #[error("device name must not be empty")]
    EmptyDeviceName,

    #[error("dedicated dummy devices are not supported on {0}, use a shared device instead")]
    UnsupportedMode(Platform),

    #[error("'{0}' is not a valid constant name")]
    InvalidConstName(String),
}
