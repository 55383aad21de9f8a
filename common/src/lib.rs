//! Domain types shared by the provisioning engine and the command line.
//!
//! * [`network::subnet`]: expands a CIDR block into addresses.
//! * [`network::device`]: dedicated vs shared device naming.
//! * [`network::mac`]: locally administered hardware addresses.
//! * [`config`]: the validated run configuration.

pub mod config;
pub mod error;
pub mod network;
pub mod operation;
pub mod platform;
