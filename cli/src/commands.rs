pub mod provision;

use std::path::PathBuf;

use clap::{ArgAction, Parser};
use ipprov_common::config::{DEFAULT_CONST_NAME, DEFAULT_OUTPUT, DEFAULT_SUBNET, Options};

#[derive(Parser)]
#[command(name = "ipprov")]
#[command(version)]
#[command(about = "Provision test source IP addresses and generate a Rust list of them.")]
#[command(after_help = "\
Examples:
  ipprov --subnet 9.1.1.0/24 --file src/tools/ips.rs --dev-prefix test_zeth
  ipprov --subnet 9.1.1.0/24 --file src/tools/ips.rs --dev-prefix test_zeth --op remove
  ipprov --subnet 9.1.1.0/24 --file src/tools/ips.rs --dev lo0")]
pub struct CommandLine {
    /// Subnet whose addresses get provisioned
    #[arg(long, default_value = DEFAULT_SUBNET)]
    pub subnet: String,

    /// Output file with the generated list of addresses
    #[arg(long, default_value = DEFAULT_OUTPUT)]
    pub file: PathBuf,

    /// Operation to perform: add or remove
    #[arg(long, default_value = "add")]
    pub op: String,

    /// Create one dummy device per address, named <PREFIX><N> (Linux only)
    #[arg(long = "dev-prefix", alias = "dev_prefix", value_name = "PREFIX", conflicts_with = "dev")]
    pub dev_prefix: Option<String>,

    /// Existing device that receives every address as an alias (Linux and macOS)
    #[arg(long, value_name = "DEVICE")]
    pub dev: Option<String>,

    /// Name of the generated constant
    #[arg(long, default_value = DEFAULT_CONST_NAME)]
    pub const_name: String,

    /// Less output: -q hides the plan, summary and info lines, -qq warnings too (issued commands stay)
    #[arg(short, long, action = ArgAction::Count)]
    pub quiet: u8,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn to_options(&self) -> Options {
        Options {
            subnet: self.subnet.clone(),
            output: self.file.clone(),
            operation: self.op.clone(),
            dev_prefix: self.dev_prefix.clone(),
            dev: self.dev.clone(),
            const_name: self.const_name.clone(),
        }
    }
}
