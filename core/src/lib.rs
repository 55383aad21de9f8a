//! Provisioning engine: turns a validated [`Config`](ipprov_common::config::Config)
//! into host commands and a generated address list.
//!
//! * [`command`]: structured host commands and the runner seam.
//! * [`operator`]: the four device actions.
//! * [`provisioner`]: the sequential driver loop.
//! * [`artifact`]: the generated `pub const` source file.

pub mod artifact;
pub mod command;
pub mod operator;
pub mod provisioner;
