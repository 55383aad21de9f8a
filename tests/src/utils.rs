use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io;
use std::net::Ipv4Addr;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use ipprov_common::config::Config;
use ipprov_common::network::device::DeviceMode;
use ipprov_common::operation::Operation;
use ipprov_common::platform::Platform;
use ipprov_core::command::{CommandRunner, Escalation, HostCommand};
use ipprov_core::operator::DeviceOperator;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// In-memory stand-in for the host network stack.
///
/// Understands the `ip` and `ifconfig` invocations the operator issues and
/// rejects the ones the real tools would reject (duplicate devices, missing
/// devices, unknown addresses). `fail_addrs` simulates arbitrary host failures
/// for any command that mentions one of those addresses.
#[derive(Default)]
pub struct FakeHost {
    pub devices: BTreeMap<String, BTreeSet<Ipv4Addr>>,
    pub dummies: BTreeSet<String>,
    pub issued: Vec<HostCommand>,
    pub fail_addrs: BTreeSet<Ipv4Addr>,
}

impl FakeHost {
    pub fn with_device(name: &str) -> Self {
        let mut host = FakeHost::default();
        host.devices.insert(name.to_string(), BTreeSet::new());
        host
    }

    pub fn fail_on(mut self, addr: &str) -> Self {
        self.fail_addrs.insert(addr.parse().unwrap());
        self
    }

    pub fn addrs_on(&self, device: &str) -> Vec<Ipv4Addr> {
        self.devices
            .get(device)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default()
    }

    fn apply(&mut self, argv: &[&str]) -> bool {
        match argv {
            ["ip", "link", "add", dev, "type", "dummy"] => {
                if self.devices.contains_key(*dev) {
                    return false;
                }
                self.devices.insert(dev.to_string(), BTreeSet::new());
                self.dummies.insert(dev.to_string())
            }
            ["ip", "link", "set", "dev", dev, "address", _mac] => self.devices.contains_key(*dev),
            ["ip", "link", "set", "dev", dev, "up"] => self.devices.contains_key(*dev),
            ["ip", "link", "delete", dev] => {
                self.dummies.remove(*dev);
                self.devices.remove(*dev).is_some()
            }
            ["ip", "addr", "add", addr, "dev", dev] | ["ifconfig", dev, "alias", addr] => {
                let Some(addr) = host_addr(addr) else { return false };
                self.devices.get_mut(*dev).is_some_and(|set| set.insert(addr))
            }
            ["ip", "addr", "del", addr, "dev", dev] | ["ifconfig", dev, "-alias", addr] => {
                let Some(addr) = host_addr(addr) else { return false };
                self.devices.get_mut(*dev).is_some_and(|set| set.remove(&addr))
            }
            _ => false,
        }
    }
}

fn host_addr(s: &str) -> Option<Ipv4Addr> {
    s.strip_suffix("/32").unwrap_or(s).parse().ok()
}

impl CommandRunner for FakeHost {
    fn run(&mut self, command: &HostCommand) -> io::Result<bool> {
        self.issued.push(command.clone());

        let mut argv: Vec<&str> = std::iter::once(command.program())
            .chain(command.get_args().iter().map(String::as_str))
            .collect();
        if argv.first() == Some(&"sudo") {
            argv.remove(0);
            if argv.first() == Some(&"-n") {
                argv.remove(0);
            }
        }

        let mentions_failing = argv
            .iter()
            .filter_map(|arg| host_addr(arg))
            .any(|addr| self.fail_addrs.contains(&addr));
        if mentions_failing {
            return Ok(false);
        }

        Ok(self.apply(&argv))
    }
}

pub fn operator(host: FakeHost, platform: Platform, escalation: Escalation) -> DeviceOperator<FakeHost, StdRng> {
    DeviceOperator::new(host, StdRng::seed_from_u64(0x1bad), platform, escalation)
}

pub fn linux_operator(host: FakeHost) -> DeviceOperator<FakeHost, StdRng> {
    operator(host, Platform::Linux, Escalation::None)
}

/// Unique output path under the system temp dir.
pub fn scratch_file(name: &str) -> PathBuf {
    static COUNTER: AtomicUsize = AtomicUsize::new(0);
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir().join(format!("ipprov-it-{}-{n}-{name}.rs", std::process::id()))
}

pub fn config(subnet: &str, device: DeviceMode, operation: Operation, output: PathBuf) -> Config {
    Config {
        subnet: subnet.parse().unwrap(),
        output,
        operation,
        device,
        const_name: "IPS".into(),
        platform: Platform::Linux,
    }
}

pub fn dedicated(prefix: &str) -> DeviceMode {
    DeviceMode::Dedicated { prefix: prefix.into() }
}

pub fn shared(name: &str) -> DeviceMode {
    DeviceMode::Shared { name: name.into() }
}

/// The quoted entries of a generated artifact, in file order.
pub fn artifact_entries(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .filter_map(|line| line.trim().strip_prefix('"')?.strip_suffix("\",").map(str::to_string))
        .collect()
}
