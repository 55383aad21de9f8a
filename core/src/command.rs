//! Structured host commands and the seam that executes them.
//!
//! Commands are always a program plus an explicit argument list. Nothing is
//! ever handed to a shell, so device names and addresses cannot be
//! reinterpreted as shell syntax.

use std::fmt;
use std::io;
use std::process::Command;

/// One external program invocation, e.g. `ip link delete test_zeth0`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostCommand {
    program: String,
    args: Vec<String>,
}

impl HostCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    /// Wraps the command according to the privilege level of the process.
    ///
    /// `cached` marks that a credential prompt already happened during this
    /// run, in which case sudo is told never to prompt again.
    pub fn escalate(self, escalation: Escalation, cached: bool) -> Self {
        match escalation {
            Escalation::None => self,
            Escalation::Sudo => {
                let mut sudo = HostCommand::new("sudo");
                if cached {
                    sudo = sudo.arg("-n");
                }
                sudo.arg(self.program).args(self.args)
            }
        }
    }
}

impl fmt::Display for HostCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// How host commands obtain administrative rights.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Escalation {
    /// Already running as root.
    None,
    /// Prefix every command with `sudo`.
    Sudo,
}

impl Escalation {
    pub fn detect() -> Self {
        if is_root::is_root() {
            Escalation::None
        } else {
            Escalation::Sudo
        }
    }
}

/// Executes host commands, one at a time, to completion.
pub trait CommandRunner {
    /// Returns `Ok(true)` when the command exited successfully and `Ok(false)`
    /// when it ran but failed. `Err` means it could not be started at all.
    fn run(&mut self, command: &HostCommand) -> io::Result<bool>;
}

/// Runs commands on the live host, inheriting stdio so the user sees the
/// tools' own output and can answer a sudo prompt.
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&mut self, command: &HostCommand) -> io::Result<bool> {
        let status = Command::new(command.program())
            .args(command.get_args())
            .status()?;
        Ok(status.success())
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
