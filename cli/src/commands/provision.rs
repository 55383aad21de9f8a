use std::time::{Duration, Instant};

use colored::*;
use ipprov_common::config::Config;
use ipprov_core::command::CommandRunner;
use ipprov_core::operator::DeviceOperator;
use ipprov_core::provisioner::{self, ProvisioningReport};
use rand::Rng;
use tracing::warn;

use crate::terminal::{print, progress};

pub fn provision<R, G>(cfg: &Config, operator: &mut DeviceOperator<R, G>, quiet: u8) -> anyhow::Result<()>
where
    R: CommandRunner,
    G: Rng,
{
    print::header("provisioning plan", quiet);
    print::aligned_line("Subnet", format!("{} ({} addresses)", cfg.subnet, cfg.subnet.len()), quiet);
    print::aligned_line("Operation", cfg.operation, quiet);
    print::aligned_line("Devices", &cfg.device, quiet);
    print::aligned_line("Output", cfg.output.display(), quiet);

    let pb = progress::start(cfg.subnet.len());

    let start_time: Instant = Instant::now();
    let result = provisioner::run(cfg, operator, |outcome| {
        pb.set_message(outcome.addr.to_string());
        pb.inc(1);
    });
    progress::finish();

    let report: ProvisioningReport = result?;
    print_summary(cfg, &report, start_time.elapsed(), quiet);
    Ok(())
}

fn print_summary(cfg: &Config, report: &ProvisioningReport, total_time: Duration, quiet: u8) {
    if report.failed() > 0 {
        warn!(
            "{} of {} address(es) could not be {}",
            report.failed(),
            report.outcomes.len(),
            cfg.operation.past_tense()
        );
    }

    if quiet > 0 {
        return;
    }

    let done: ColoredString = format!("{}/{}", report.succeeded(), report.outcomes.len()).bold().green();
    let total_time: ColoredString = format!("{:.2}s", total_time.as_secs_f64()).bold().yellow();
    let listed: ColoredString = report.available_addrs().len().to_string().bold().cyan();

    print::fat_separator(quiet);
    print::centerln(&format!("{done} {} in {total_time}", cfg.operation.past_tense()));
    print::centerln(&format!("{listed} listed in {}", cfg.output.display()));
}
