use std::path::PathBuf;

use crate::error::ConfigError;
use crate::network::device::DeviceMode;
use crate::network::subnet::Subnet;
use crate::operation::Operation;
use crate::platform::Platform;

pub const DEFAULT_SUBNET: &str = "1.1.1.0/28";
pub const DEFAULT_OUTPUT: &str = "ips.rs";
pub const DEFAULT_CONST_NAME: &str = "IPS";

/// Raw, unvalidated options as they arrive from the command line.
#[derive(Debug, Clone, Default)]
pub struct Options {
    pub subnet: String,
    pub output: PathBuf,
    pub operation: String,
    pub dev_prefix: Option<String>,
    pub dev: Option<String>,
    pub const_name: String,
}

/// A fully validated run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Block of addresses to provision or tear down.
    pub subnet: Subnet,
    /// Generated source file, rewritten on every run.
    pub output: PathBuf,
    pub operation: Operation,
    pub device: DeviceMode,
    /// Name of the generated `pub const`.
    pub const_name: String,
    pub platform: Platform,
}

impl Config {
    /// Validates every option up front.
    ///
    /// Nothing touches the host before this returns `Ok`.
    pub fn from_options(options: Options, platform: Platform) -> Result<Self, ConfigError> {
        let subnet: Subnet = options.subnet.parse()?;
        let operation: Operation = options.operation.parse()?;
        let device = DeviceMode::from_options(options.dev_prefix, options.dev, platform)?;

        if !is_rust_identifier(&options.const_name) {
            return Err(ConfigError::InvalidConstName(options.const_name));
        }

        Ok(Config {
            subnet,
            output: options.output,
            operation,
            device,
            const_name: options.const_name,
            platform,
        })
    }
}

fn is_rust_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c == '_' || c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    s != "_" && chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
}
