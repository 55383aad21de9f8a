mod commands;
mod terminal;

use std::process::ExitCode;

use commands::{CommandLine, provision};
use ipprov_common::config::{Config, Options};
use ipprov_common::platform::Platform;
use ipprov_core::command::{CommandRunner, Escalation, SystemRunner};
use ipprov_core::operator::DeviceOperator;
use tracing::{error, info, warn};

use crate::terminal::logging;

const EXIT_OK: u8 = 0;
/// The artifact could not be written.
const EXIT_FAILURE: u8 = 1;
/// Exit status for configuration errors, matching clap's usage errors.
const EXIT_CONFIG_ERROR: u8 = 2;

fn main() -> ExitCode {
    let commands = CommandLine::parse_args();

    logging::init_logging(commands.quiet);

    let status = run(
        commands.to_options(),
        Platform::current(),
        SystemRunner,
        Escalation::detect(),
        commands.quiet,
    );
    ExitCode::from(status)
}

/// Validates `options` and provisions the subnet through `runner`, returning
/// the process exit status.
///
/// Addresses the host rejected do not change the status; only a bad
/// configuration or an unwritable artifact does.
fn run<R: CommandRunner>(
    options: Options,
    platform: Option<Platform>,
    runner: R,
    escalation: Escalation,
    quiet: u8,
) -> u8 {
    let Some(platform) = platform else {
        warn!("ipprov only works on Linux and macOS, nothing to do");
        return EXIT_OK;
    };

    let cfg = match Config::from_options(options, platform) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("{e}");
            return EXIT_CONFIG_ERROR;
        }
    };

    if escalation == Escalation::Sudo {
        info!("Not running as root, commands are issued through sudo");
    }

    let mut operator = DeviceOperator::new(runner, rand::rng(), cfg.platform, escalation);
    match provision::provision(&cfg, &mut operator, quiet) {
        Ok(()) => EXIT_OK,
        Err(e) => {
            error!("{e:#}");
            EXIT_FAILURE
        }
    }
}
