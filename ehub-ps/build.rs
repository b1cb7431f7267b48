//! Build identification for ehub-ps
//!
//! Exposes `GIT_HASH`, `BUILD_TIMESTAMP` and `BUILD_PROFILE` to `env!` so the
//! service can report them at startup and on `/health`.

use std::process::Command;

/// Short commit hash of the workspace, `unknown` outside a git checkout
fn git_short_hash() -> String {
    let output = match Command::new("git").args(["rev-parse", "--short=8", "HEAD"]).output() {
        Ok(output) if output.status.success() => output,
        _ => return "unknown".to_string(),
    };

    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

fn main() {
    let built_at = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "unknown".to_string());

    println!("cargo:rustc-env=GIT_HASH={}", git_short_hash());
    println!("cargo:rustc-env=BUILD_TIMESTAMP={}", built_at);
    println!("cargo:rustc-env=BUILD_PROFILE={}", profile);
}
