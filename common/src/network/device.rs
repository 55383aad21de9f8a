//! # Device Targets
//!
//! Decides which network device each provisioned address is bound to.
//!
//! * **Dedicated**: one fresh dummy device per address, named `prefix` + index
//!   (e.g. `test_zeth0`, `test_zeth1`, ...).
//! * **Shared**: every address becomes an alias on one existing device (e.g. `lo`).

use std::fmt;

use crate::error::ConfigError;
use crate::platform::Platform;

/// How addresses are attached to the host for the whole run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceMode {
    Dedicated { prefix: String },
    Shared { name: String },
}

impl DeviceMode {
    /// Builds the mode from the two mutually exclusive device options.
    ///
    /// Exactly one of `prefix` and `device` must be present, and dedicated mode
    /// is only accepted where the host supports dummy devices.
    pub fn from_options(
        prefix: Option<String>,
        device: Option<String>,
        platform: Platform,
    ) -> Result<Self, ConfigError> {
        let mode = match (prefix, device) {
            (Some(_), Some(_)) => return Err(ConfigError::ConflictingDevice),
            (None, None) => return Err(ConfigError::MissingDevice),
            (Some(prefix), None) => DeviceMode::Dedicated { prefix },
            (None, Some(name)) => DeviceMode::Shared { name },
        };

        match &mode {
            DeviceMode::Dedicated { prefix } if prefix.trim().is_empty() => {
                Err(ConfigError::EmptyDeviceName)
            }
            DeviceMode::Shared { name } if name.trim().is_empty() => {
                Err(ConfigError::EmptyDeviceName)
            }
            DeviceMode::Dedicated { .. } if !platform.supports_dummy_devices() => {
                Err(ConfigError::UnsupportedMode(platform))
            }
            _ => Ok(mode),
        }
    }

    /// Name of the device that hosts the `index`-th enumerated address.
    pub fn device_name(&self, index: usize) -> String {
        match self {
            DeviceMode::Dedicated { prefix } => format!("{prefix}{index}"),
            DeviceMode::Shared { name } => name.clone(),
        }
    }
}

impl fmt::Display for DeviceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceMode::Dedicated { prefix } => write!(f, "dedicated dummy devices ({prefix}N)"),
            DeviceMode::Shared { name } => write!(f, "aliases on {name}"),
        }
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
