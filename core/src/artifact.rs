//! The **Artifact Writer**.
//!
//! Renders the provisioned addresses as a Rust source file holding a single
//! `pub const NAME: &[&str]` and rewrites the output path with it.

use std::fmt::Write as _;
use std::fs;
use std::net::Ipv4Addr;
use std::path::Path;

use anyhow::Context;

const HEADER: &str = "\
// Generated by ipprov. Do not edit by hand.
//
// An empty list means no source addresses are provisioned on this host;
// tests should fall back to the local address pool instead.
";

/// Renders the artifact contents.
pub fn render(const_name: &str, addrs: &[Ipv4Addr]) -> String {
    let mut out = String::from(HEADER);
    out.push('\n');
    out.push_str("/// Source IP addresses provisioned for tests.\n");

    if addrs.is_empty() {
        let _ = writeln!(out, "pub const {const_name}: &[&str] = &[];");
        return out;
    }

    let _ = writeln!(out, "pub const {const_name}: &[&str] = &[");
    for addr in addrs {
        let _ = writeln!(out, "    \"{addr}\",");
    }
    out.push_str("];\n");
    out
}

/// Replaces whatever is at `path` with the rendered artifact.
pub fn write(path: &Path, const_name: &str, addrs: &[Ipv4Addr]) -> anyhow::Result<()> {
    fs::write(path, render(const_name, addrs))
        .with_context(|| format!("Failed to write address list to {}", path.display()))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
