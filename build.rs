use std::env;
use std::process::Command;

const PREFIX: &str = "FINANCE_CORE_BUILD";

fn main() {
    for path in ["build.rs", ".git/HEAD", ".git/refs"] {
        println!("cargo:rerun-if-changed={path}");
    }

    let hash = command_output("git", &["rev-parse", "--short", "HEAD"]);
    let status = command_output("git", &["status", "--porcelain"]).map(|porcelain| {
        if porcelain.is_empty() {
            "clean".to_string()
        } else {
            "dirty".to_string()
        }
    });
    let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true);

    emit("HASH", hash.filter(|value| !value.is_empty()));
    emit("STATUS", status);
    emit("TIMESTAMP", Some(timestamp));
    emit("TARGET", env::var("TARGET").ok());
    emit("PROFILE", env::var("PROFILE").ok());
    emit("RUSTC", command_output("rustc", &["--version"]));
}

fn emit(key: &str, value: Option<String>) {
    let value = value.unwrap_or_else(|| "unknown".to_string());
    println!("cargo:rustc-env={PREFIX}_{key}={value}");
}

/// Trimmed stdout of a successful command; `None` if it failed to run.
fn command_output(program: &str, args: &[&str]) -> Option<String> {
    let output = Command::new(program).args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    String::from_utf8(output.stdout)
        .ok()
        .map(|stdout| stdout.trim().to_string())
}
