//! xtask - Build and test automation for the usbserial driver crate
//!
//! Usage:
//!   cargo xtask test     # Run host tests (unit, integration, doctests)
//!   cargo xtask doc      # Build API docs with warnings denied
//!   cargo xtask help     # Show this help
//!
//! The driver is a `no_std` library; its logic runs on the host against
//! simulated collaborators, so `test` needs no target toolchain or QEMU.

use anyhow::{bail, Context, Result};
use std::process::Command;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let cmd = args.get(1).map(|s| s.as_str()).unwrap_or("help");

    match cmd {
        "test" => host_test()?,
        "doc" => doc()?,
        "help" | "--help" | "-h" => print_help(),
        _ => {
            eprintln!("Unknown command: {}", cmd);
            print_help();
            std::process::exit(1);
        }
    }

    Ok(())
}

fn print_help() {
    eprintln!(
        r#"xtask - usbserial driver build automation

USAGE:
    cargo xtask <command>

COMMANDS:
    test     Run host tests (unit, integration, doctests)
    doc      Build API docs with warnings denied
    help     Show this help
"#
    );
}

/// Run the host test suite for the driver package.
fn host_test() -> Result<()> {
    eprintln!("[xtask] Running host tests...");

    let status = Command::new("cargo")
        .args(["test", "-p", "eoss3-usbserial"])
        .status()
        .context("Failed to run cargo test")?;

    if !status.success() {
        bail!("Host tests failed");
    }

    eprintln!("[xtask] Host tests PASSED");
    Ok(())
}

/// Build the docs, treating rustdoc warnings as errors.
fn doc() -> Result<()> {
    eprintln!("[xtask] Building docs...");

    let status = Command::new("cargo")
        .args(["doc", "-p", "eoss3-usbserial", "--no-deps"])
        .env("RUSTDOCFLAGS", "-D warnings")
        .status()
        .context("Failed to run cargo doc")?;

    if !status.success() {
        bail!("Doc build failed");
    }

    eprintln!("[xtask] Docs built");
    Ok(())
}
