#![cfg(test)]
use std::fs;
use std::net::Ipv4Addr;

use ipprov_common::config::{Config, Options};
use ipprov_common::error::ConfigError;
use ipprov_common::operation::Operation;
use ipprov_common::platform::Platform;
use ipprov_core::command::Escalation;
use ipprov_core::operator::DeviceAction;
use ipprov_core::provisioner;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::utils::{
    FakeHost, artifact_entries, config, dedicated, linux_operator, operator, scratch_file, shared,
};

/*************************************************************
                  Dedicated dummy devices
**************************************************************/

#[test]
fn dedicated_add_lists_every_address_and_creates_devices() {
    let output = scratch_file("dedicated-add");
    let cfg = config("9.1.1.0/30", dedicated("test_zeth"), Operation::Add, output.clone());
    let mut op = linux_operator(FakeHost::default());

    let report = provisioner::run(&cfg, &mut op, |_| {}).unwrap();
    let host = op.into_runner();

    assert_eq!(report.action, DeviceAction::CreateDedicatedDevice);
    assert_eq!(
        artifact_entries(&output),
        vec!["9.1.1.0", "9.1.1.1", "9.1.1.2", "9.1.1.3"]
    );
    let dummies: Vec<&str> = host.dummies.iter().map(String::as_str).collect();
    assert_eq!(dummies, vec!["test_zeth0", "test_zeth1", "test_zeth2", "test_zeth3"]);
    assert_eq!(host.addrs_on("test_zeth3"), vec![Ipv4Addr::new(9, 1, 1, 3)]);

    let _ = fs::remove_file(output);
}

#[test]
fn dedicated_add_then_remove_round_trips() {
    let output = scratch_file("dedicated-roundtrip");
    let add = config("9.1.1.0/30", dedicated("test_zeth"), Operation::Add, output.clone());
    let remove = Config { operation: Operation::Remove, ..add.clone() };

    let mut op = linux_operator(FakeHost::default());
    provisioner::run(&add, &mut op, |_| {}).unwrap();
    let report = provisioner::run(&remove, &mut op, |_| {}).unwrap();
    let host = op.into_runner();

    assert_eq!(report.succeeded(), 4);
    assert!(host.dummies.is_empty());
    assert!(host.devices.is_empty());
    assert!(artifact_entries(&output).is_empty());
    assert!(fs::read_to_string(&output).unwrap().contains("pub const IPS: &[&str] = &[];"));

    let _ = fs::remove_file(output);
}

#[test]
fn repeated_add_reports_duplicate_devices_as_failures() {
    let output = scratch_file("dedicated-twice");
    let cfg = config("9.1.1.0/30", dedicated("test_zeth"), Operation::Add, output.clone());
    let mut op = linux_operator(FakeHost::default());

    provisioner::run(&cfg, &mut op, |_| {}).unwrap();
    let second = provisioner::run(&cfg, &mut op, |_| {}).unwrap();

    // The host refuses to create the devices again; that is a per-address
    // failure, not an aborted run.
    assert_eq!(second.failed(), 4);
    assert!(artifact_entries(&output).is_empty());

    let _ = fs::remove_file(output);
}

#[test]
fn identical_runs_produce_identical_artifacts() {
    let first = scratch_file("idempotent-a");
    let second = scratch_file("idempotent-b");

    for output in [&first, &second] {
        let cfg = config("9.1.1.0/29", dedicated("test_zeth"), Operation::Add, output.clone());
        let host = FakeHost::default().fail_on("9.1.1.5");
        provisioner::run(&cfg, &mut linux_operator(host), |_| {}).unwrap();
    }

    assert_eq!(fs::read_to_string(&first).unwrap(), fs::read_to_string(&second).unwrap());

    let _ = fs::remove_file(first);
    let _ = fs::remove_file(second);
}

/*************************************************************
                     Shared device aliases
**************************************************************/

#[test]
fn shared_alias_failure_only_drops_that_address() {
    let output = scratch_file("shared-failure");
    let cfg = config("9.1.1.0/30", shared("lo"), Operation::Add, output.clone());
    let host = FakeHost::with_device("lo").fail_on("9.1.1.2");
    let mut op = linux_operator(host);

    let report = provisioner::run(&cfg, &mut op, |_| {}).unwrap();
    let host = op.into_runner();

    assert_eq!(report.action, DeviceAction::AddAliasAddress);
    assert_eq!(report.failed(), 1);
    assert_eq!(artifact_entries(&output), vec!["9.1.1.0", "9.1.1.1", "9.1.1.3"]);
    assert_eq!(
        host.addrs_on("lo"),
        vec![Ipv4Addr::new(9, 1, 1, 0), Ipv4Addr::new(9, 1, 1, 1), Ipv4Addr::new(9, 1, 1, 3)]
    );

    let _ = fs::remove_file(output);
}

#[test]
fn shared_add_then_remove_clears_aliases() {
    let output = scratch_file("shared-roundtrip");
    let add = config("10.20.0.0/29", shared("lo"), Operation::Add, output.clone());
    let remove = Config { operation: Operation::Remove, ..add.clone() };
    let mut op = linux_operator(FakeHost::with_device("lo"));

    provisioner::run(&add, &mut op, |_| {}).unwrap();
    assert_eq!(artifact_entries(&output).len(), 8);

    provisioner::run(&remove, &mut op, |_| {}).unwrap();
    let host = op.into_runner();

    assert!(host.addrs_on("lo").is_empty());
    assert!(host.devices.contains_key("lo"), "shared device must survive removal");
    assert!(artifact_entries(&output).is_empty());

    let _ = fs::remove_file(output);
}

#[test]
fn remove_clears_artifact_even_when_removals_fail() {
    let output = scratch_file("shared-remove-missing");
    fs::write(&output, "pub const IPS: &[&str] = &[\n    \"9.1.1.0\",\n];\n").unwrap();

    // Nothing was ever added, so every removal fails on the host.
    let cfg = config("9.1.1.0/30", shared("lo"), Operation::Remove, output.clone());
    let report = provisioner::run(&cfg, &mut linux_operator(FakeHost::with_device("lo")), |_| {}).unwrap();

    assert_eq!(report.failed(), 4);
    assert!(artifact_entries(&output).is_empty());

    let _ = fs::remove_file(output);
}

#[test]
fn macos_aliases_prompt_once_then_stay_non_interactive() {
    let output = scratch_file("macos-alias");
    let cfg = Config {
        platform: Platform::MacOs,
        ..config("9.1.1.0/31", shared("lo0"), Operation::Add, output.clone())
    };
    let mut op = operator(FakeHost::with_device("lo0"), Platform::MacOs, Escalation::Sudo);

    provisioner::run(&cfg, &mut op, |_| {}).unwrap();
    let issued: Vec<String> = op.into_runner().issued.iter().map(ToString::to_string).collect();

    assert_eq!(
        issued,
        vec!["sudo ifconfig lo0 alias 9.1.1.0/32", "sudo -n ifconfig lo0 alias 9.1.1.1/32"]
    );
    assert_eq!(artifact_entries(&output), vec!["9.1.1.0", "9.1.1.1"]);

    let _ = fs::remove_file(output);
}

/*************************************************************
                 Artifact / host consistency
**************************************************************/

#[test]
fn artifact_is_exactly_the_successful_subsequence() {
    let mut rng = StdRng::seed_from_u64(2024);

    for round in 0..8 {
        let output = scratch_file("subsequence");
        let mut host = FakeHost::with_device("lo");
        let subnet: ipprov_common::network::subnet::Subnet = "172.16.4.0/28".parse().unwrap();
        for addr in subnet.addresses() {
            if rng.random_bool(0.3) {
                host.fail_addrs.insert(addr);
            }
        }
        let expected: Vec<String> = subnet
            .addresses()
            .filter(|addr| !host.fail_addrs.contains(addr))
            .map(|addr| addr.to_string())
            .collect();

        let cfg = config("172.16.4.0/28", shared("lo"), Operation::Add, output.clone());
        let mut op = linux_operator(host);
        provisioner::run(&cfg, &mut op, |_| {}).unwrap();

        assert_eq!(artifact_entries(&output), expected, "round {round}");
        let on_host: Vec<String> = op.into_runner().addrs_on("lo").iter().map(ToString::to_string).collect();
        assert_eq!(on_host, expected, "round {round}");

        let _ = fs::remove_file(output);
    }
}

#[test]
fn unwritable_artifact_fails_after_host_changes() {
    let output = scratch_file("missing-dir").join("ips.rs");
    let cfg = config("9.1.1.0/31", shared("lo"), Operation::Add, output);
    let mut op = linux_operator(FakeHost::with_device("lo"));

    let result = provisioner::run(&cfg, &mut op, |_| {});
    let host = op.into_runner();

    assert!(result.is_err());
    // No rollback: the aliases stay on the host.
    assert_eq!(host.addrs_on("lo").len(), 2);
}

/*************************************************************
                  Configuration is checked first
**************************************************************/

#[test]
fn invalid_configuration_never_reaches_the_host() {
    let base = Options {
        subnet: "9.1.1.0/30".into(),
        output: scratch_file("never-written"),
        operation: "add".into(),
        dev_prefix: Some("test_zeth".into()),
        dev: None,
        const_name: "IPS".into(),
    };

    let cases = [
        (Options { dev: Some("lo".into()), ..base.clone() }, ConfigError::ConflictingDevice),
        (Options { dev_prefix: None, ..base.clone() }, ConfigError::MissingDevice),
        (Options { operation: "rm".into(), ..base.clone() }, ConfigError::InvalidOperation("rm".into())),
    ];

    for (options, expected) in cases {
        let output = options.output.clone();
        assert_eq!(Config::from_options(options, Platform::Linux), Err(expected));
        assert!(!output.exists());
    }

    assert!(matches!(
        Config::from_options(Options { subnet: "9.1.1.0/40".into(), ..base.clone() }, Platform::Linux),
        Err(ConfigError::InvalidSubnet { .. })
    ));
    assert_eq!(
        Config::from_options(base, Platform::MacOs),
        Err(ConfigError::UnsupportedMode(Platform::MacOs))
    );
}
