//! The **Provisioning Driver**.
//!
//! Walks the subnet in order and hands each address to the
//! [`DeviceOperator`], one at a time. Later aliases on a shared device may rely
//! on earlier calls, so addresses are never reordered or run in parallel. A
//! failed address is recorded and the walk moves on; nothing is retried.

use std::net::Ipv4Addr;

use ipprov_common::config::Config;
use ipprov_common::operation::Operation;
use rand::Rng;
use tracing::{debug, info, warn};

use crate::artifact;
use crate::command::CommandRunner;
use crate::operator::{DeviceAction, DeviceOperator, Session};

/// What happened to a single enumerated address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressOutcome {
    /// Position of the address in the subnet.
    pub index: usize,
    pub addr: Ipv4Addr,
    pub device: String,
    /// `true` iff every host command for this address succeeded.
    pub success: bool,
}

/// Per-address results of a whole run, in enumeration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisioningReport {
    pub operation: Operation,
    pub action: DeviceAction,
    pub outcomes: Vec<AddressOutcome>,
}

impl ProvisioningReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.success).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    /// Addresses that belong in the artifact.
    ///
    /// Adding lists exactly the addresses the host accepted. Removing always
    /// clears the list, whatever the individual removals reported.
    pub fn available_addrs(&self) -> Vec<Ipv4Addr> {
        match self.operation {
            Operation::Add => self
                .outcomes
                .iter()
                .filter(|o| o.success)
                .map(|o| o.addr)
                .collect(),
            Operation::Remove => Vec::new(),
        }
    }
}

/// Applies the configured operation to every address of the subnet.
///
/// `on_progress` is called after each address, e.g. to advance a progress bar.
pub fn provision<R, G>(
    cfg: &Config,
    operator: &mut DeviceOperator<R, G>,
    mut on_progress: impl FnMut(&AddressOutcome),
) -> ProvisioningReport
where
    R: CommandRunner,
    G: Rng,
{
    let action = DeviceAction::select(&cfg.device, cfg.operation);
    let mut session = Session::default();
    let mut outcomes = Vec::new();

    debug!(?action, subnet = %cfg.subnet, "starting provisioning");

    for (index, addr) in cfg.subnet.addresses().enumerate() {
        let device = cfg.device.device_name(index);
        let success = operator.apply(action, &device, addr, &mut session);

        if !success {
            warn!("{addr} was not {} on {device}", cfg.operation.past_tense());
        }

        let outcome = AddressOutcome {
            index,
            addr,
            device,
            success,
        };
        on_progress(&outcome);
        outcomes.push(outcome);
    }

    ProvisioningReport {
        operation: cfg.operation,
        action,
        outcomes,
    }
}

/// Provisions the subnet, then rewrites the artifact from the results.
///
/// Only an artifact write failure is an error; host changes made before it are
/// left in place.
pub fn run<R, G>(
    cfg: &Config,
    operator: &mut DeviceOperator<R, G>,
    on_progress: impl FnMut(&AddressOutcome),
) -> anyhow::Result<ProvisioningReport>
where
    R: CommandRunner,
    G: Rng,
{
    let report = provision(cfg, operator, on_progress);
    let addrs = report.available_addrs();

    artifact::write(&cfg.output, &cfg.const_name, &addrs)?;
    info!("Wrote {} address(es) to {}", addrs.len(), cfg.output.display());

    Ok(report)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
