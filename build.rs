//! Stamp the build with the source revision.
//!
//! `QAJAQ_REVISION` is shown by `qajaq --version` and in the wasm debug
//! report, so a puzzle reported by seed can be regenerated on the same code.
//! It is `git describe --always --dirty` output, or "unknown" outside a
//! checkout.

use std::process::Command;

fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let text = String::from_utf8(output.stdout).ok()?;
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

fn main() {
    let revision = git(&["describe", "--always", "--dirty", "--abbrev=10"])
        .unwrap_or_else(|| "unknown".to_string());
    println!("cargo:rustc-env=QAJAQ_REVISION={revision}");

    // HEAD moves on checkout, the index on commit; either can change the revision
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/index");
}
