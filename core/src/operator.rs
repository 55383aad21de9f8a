//! The **Device Operator**: attaches or detaches a single address on the host.
//!
//! The four host-level actions form a closed set, picked once per run from the
//! device mode and the operation. Each action expands into a short chain of
//! host commands that runs until the first failure.

use std::net::Ipv4Addr;

use ipprov_common::network::device::DeviceMode;
use ipprov_common::network::mac;
use ipprov_common::operation::Operation;
use ipprov_common::platform::Platform;
use rand::Rng;
use tracing::{debug, info, warn};

use crate::command::{CommandRunner, Escalation, HostCommand};

/// Tracing target of the issued-command echo. Quiet levels keep it visible.
pub const COMMAND_TARGET: &str = "ipprov::command";

/// Every way an address can be attached to or detached from the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceAction {
    /// New dummy device with a random local MAC, hosting exactly one address.
    CreateDedicatedDevice,
    /// Deletes the dummy device and, with it, its address.
    RemoveDedicatedDevice,
    /// Adds the address to an existing device.
    AddAliasAddress,
    /// Removes the address from an existing device.
    RemoveAliasAddress,
}

impl DeviceAction {
    pub fn select(mode: &DeviceMode, operation: Operation) -> Self {
        match (mode, operation) {
            (DeviceMode::Dedicated { .. }, Operation::Add) => DeviceAction::CreateDedicatedDevice,
            (DeviceMode::Dedicated { .. }, Operation::Remove) => DeviceAction::RemoveDedicatedDevice,
            (DeviceMode::Shared { .. }, Operation::Add) => DeviceAction::AddAliasAddress,
            (DeviceMode::Shared { .. }, Operation::Remove) => DeviceAction::RemoveAliasAddress,
        }
    }

    /// Host commands implementing this action, in execution order, before
    /// privilege escalation.
    pub fn plan<R: Rng + ?Sized>(
        &self,
        platform: Platform,
        device: &str,
        addr: Ipv4Addr,
        rng: &mut R,
    ) -> Vec<HostCommand> {
        let host_addr = format!("{addr}/32");
        let host_addr = host_addr.as_str();

        match (self, platform) {
            (DeviceAction::CreateDedicatedDevice, _) => {
                let mac = mac::random_local_mac(rng);
                vec![
                    ip(["link", "add", device, "type", "dummy"]),
                    ip(["link", "set", "dev", device, "address"]).arg(mac.to_string()),
                    ip(["addr", "add", host_addr, "dev", device]),
                    ip(["link", "set", "dev", device, "up"]),
                ]
            }
            (DeviceAction::RemoveDedicatedDevice, _) => vec![ip(["link", "delete", device])],
            (DeviceAction::AddAliasAddress, Platform::Linux) => vec![
                ip(["addr", "add", host_addr, "dev", device]),
                ip(["link", "set", "dev", device, "up"]),
            ],
            (DeviceAction::AddAliasAddress, Platform::MacOs) => {
                vec![ifconfig([device, "alias", host_addr])]
            }
            (DeviceAction::RemoveAliasAddress, Platform::Linux) => {
                vec![ip(["addr", "del", host_addr, "dev", device])]
            }
            (DeviceAction::RemoveAliasAddress, Platform::MacOs) => {
                vec![ifconfig([device, "-alias"]).arg(addr.to_string())]
            }
        }
    }
}

fn ip<'a>(args: impl IntoIterator<Item = &'a str>) -> HostCommand {
    HostCommand::new("ip").args(args)
}

fn ifconfig<'a>(args: impl IntoIterator<Item = &'a str>) -> HostCommand {
    HostCommand::new("ifconfig").args(args)
}

/// Privilege state carried across the calls of one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Session {
    /// Set once an alias addition has succeeded; the credential prompt has
    /// been answered by then and later calls must not block on one.
    pub credentials_cached: bool,
}

/// Applies [`DeviceAction`]s to the host through a [`CommandRunner`].
pub struct DeviceOperator<R, G> {
    runner: R,
    rng: G,
    platform: Platform,
    escalation: Escalation,
}

impl<R: CommandRunner, G: Rng> DeviceOperator<R, G> {
    pub fn new(runner: R, rng: G, platform: Platform, escalation: Escalation) -> Self {
        Self {
            runner,
            rng,
            platform,
            escalation,
        }
    }

    pub fn into_runner(self) -> R {
        self.runner
    }

    /// Runs `action` for one address and reports whether the host accepted it.
    ///
    /// Failures are never raised: a command that exits non-zero or cannot be
    /// started makes this return `false` and skips the rest of the chain.
    pub fn apply(
        &mut self,
        action: DeviceAction,
        device: &str,
        addr: Ipv4Addr,
        session: &mut Session,
    ) -> bool {
        let cached = action == DeviceAction::AddAliasAddress && session.credentials_cached;
        let escalation = self.escalation;
        let plan = action.plan(self.platform, device, addr, &mut self.rng);

        let success = plan
            .into_iter()
            .map(|command| command.escalate(escalation, cached))
            .all(|command| self.execute(&command));

        if action == DeviceAction::AddAliasAddress && !session.credentials_cached {
            if success {
                session.credentials_cached = true;
            } else if escalation == Escalation::Sudo {
                warn!("{addr} failed before sudo credentials were cached, the next address prompts again");
            }
        }

        debug!(?action, device, %addr, success, "device action finished");
        success
    }

    fn execute(&mut self, command: &HostCommand) -> bool {
        info!(target: COMMAND_TARGET, "{command}");
        match self.runner.run(command) {
            Ok(true) => true,
            Ok(false) => {
                warn!("Command failed: {command}");
                false
            }
            Err(e) => {
                warn!("Could not run '{}': {e}", command.program());
                false
            }
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
