//! Stamps the crate with a version string for `capabilities`.
use std::process::Command;

const VERSION_VAR: &str = "NVIM_ADAPTER_VERSION";

/// `git describe` output for the checkout being built, if there is one.
fn describe() -> Option<String> {
    let output = Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let described = String::from_utf8(output.stdout).ok()?;
    let described = described.trim();
    (!described.is_empty()).then(|| described.to_string())
}

fn main() {
    println!("cargo::rerun-if-env-changed={VERSION_VAR}");
    println!("cargo::rerun-if-changed=.git/HEAD");
    println!("cargo::rerun-if-changed=.git/refs/");

    // An explicit value wins; a checkout without tags still gets a hash.
    if let Some(version) = std::env::var(VERSION_VAR).ok().or_else(describe) {
        println!("cargo::rustc-env={VERSION_VAR}={version}");
    }
}
