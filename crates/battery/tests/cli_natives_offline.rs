//! Offline end-to-end flow for the natives pipeline: index a directory of
//! built artifacts, provision from it as a seed, then verify the cache.

use std::env::consts;
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use tempfile::TempDir;

fn battery_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_battery"))
}

fn platform_key() -> String {
    let arch = match consts::ARCH {
        "x86_64" => "amd64",
        other => other,
    };
    format!("{}.{}", arch, consts::OS)
}

#[test]
fn test_index_ensure_verify_roundtrip() {
    let dir = TempDir::new().expect("create temp dir");

    let artifacts = dir.path().join("artifacts");
    fs::create_dir_all(&artifacts).unwrap();
    let artifact_name = format!("{}.so", platform_key());
    fs::write(artifacts.join(&artifact_name), b"backend payload").unwrap();

    let manifest = dir.path().join("natives.json");
    let cache = dir.path().join("cache");

    // Index the artifacts directory into a manifest.
    let output = Command::new(battery_bin())
        .args(["natives", "index", "--dir"])
        .arg(&artifacts)
        .arg("--out")
        .arg(&manifest)
        .output()
        .expect("run natives index");
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(manifest.is_file());

    // Ensure offline, seeding from the artifacts directory.
    let output = Command::new(battery_bin())
        .args(["natives", "ensure", "--offline", "--manifest"])
        .arg(&manifest)
        .arg("--cache-dir")
        .arg(&cache)
        .arg("--seed-dir")
        .arg(&artifacts)
        .output()
        .expect("run natives ensure");
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let printed = String::from_utf8_lossy(&output.stdout);
    let cached = cache.join(&artifact_name);
    assert!(printed.trim().ends_with(&artifact_name));
    assert_eq!(fs::read(&cached).unwrap(), b"backend payload");

    // Verify the cached copy.
    let output = Command::new(battery_bin())
        .args(["natives", "verify", "--manifest"])
        .arg(&manifest)
        .arg("--cache-dir")
        .arg(&cache)
        .output()
        .expect("run natives verify");
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("OK"));

    // Tampering must fail verification.
    fs::write(&cached, b"tampered").unwrap();
    let output = Command::new(battery_bin())
        .args(["natives", "verify", "--manifest"])
        .arg(&manifest)
        .arg("--cache-dir")
        .arg(&cache)
        .output()
        .expect("run natives verify");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Digest mismatch"));
}

#[test]
fn test_ensure_offline_without_seed_fails() {
    let dir = TempDir::new().expect("create temp dir");

    let artifacts = dir.path().join("artifacts");
    fs::create_dir_all(&artifacts).unwrap();
    fs::write(artifacts.join(format!("{}.so", platform_key())), b"payload").unwrap();

    let manifest = dir.path().join("natives.json");
    let output = Command::new(battery_bin())
        .args(["natives", "index", "--dir"])
        .arg(&artifacts)
        .arg("--out")
        .arg(&manifest)
        .output()
        .expect("run natives index");
    assert!(output.status.success());

    let output = Command::new(battery_bin())
        .args(["natives", "ensure", "--offline", "--manifest"])
        .arg(&manifest)
        .arg("--cache-dir")
        .arg(dir.path().join("cache"))
        .output()
        .expect("run natives ensure");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Downloads are disabled"));
}
