//! Build script to stamp the binary with a source revision
//!
//! `DRIVE_STATS_GIT_HASH` wins when set (release tarballs have no .git);
//! otherwise the short hash of HEAD, or "unknown".

use std::env;
use std::process::Command;

fn git_short_hash() -> Option<String> {
    let output = Command::new("git").args(["rev-parse", "--short", "HEAD"]).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let hash = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!hash.is_empty()).then_some(hash)
}

fn main() {
    let git_hash = env::var("DRIVE_STATS_GIT_HASH")
        .ok()
        .filter(|h| !h.is_empty())
        .or_else(git_short_hash)
        .unwrap_or_else(|| String::from("unknown"));

    println!("cargo:rustc-env=GIT_HASH={}", git_hash);

    println!("cargo:rerun-if-env-changed=DRIVE_STATS_GIT_HASH");
    println!("cargo:rerun-if-changed=.git/HEAD");
}
