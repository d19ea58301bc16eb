#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::fs;
use std::path::PathBuf;
use std::process::Command;

fn fixture_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("shop")
}

fn dtogen() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_dtogen"));
    cmd.env("DTOGEN_LOG_LEVEL", "error");
    cmd
}

#[test]
fn test_cli_generate_positional() {
    let out = tempfile::tempdir().unwrap();
    let output = dtogen()
        .arg("generate")
        .arg(fixture_dir())
        .arg(out.path())
        .arg("api")
        .arg("--http-client")
        .output()
        .expect("run cli");
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("2 endpoint(s), 6 model(s)"));
    assert!(stdout.contains("Done in"));
    assert!(out.path().join("Order.ts").exists());
    assert!(out.path().join("OrdersService.ts").exists());
    assert!(out.path().join("index.ts").exists());
}

#[test]
fn test_cli_generate_with_settings_file() {
    let out = tempfile::tempdir().unwrap();
    let settings = out.path().join("dtogen.yaml");
    let destination = out.path().join("generated");
    fs::write(
        &settings,
        format!(
            "source: {}\ndestination: {}\nfiles: [Acme.Api.client.yaml]\n",
            fixture_dir().display(),
            destination.display()
        ),
    )
    .unwrap();

    let status = dtogen()
        .arg("generate")
        .arg("--settings")
        .arg(&settings)
        .status()
        .expect("run cli");
    assert!(status.success());
    assert!(destination.join("Customer.ts").exists());
    assert!(!destination.join("CustomersService.ts").exists());
}

#[test]
fn test_cli_configuration_errors_exit_with_2() {
    let out = tempfile::tempdir().unwrap();
    let status = dtogen()
        .arg("generate")
        .arg("--settings")
        .arg(out.path().join("missing.json"))
        .status()
        .expect("run cli");
    assert_eq!(status.code(), Some(2));

    let bad = out.path().join("bad.json");
    fs::write(&bad, r#"{"source": "", "destination": "x"}"#).unwrap();
    let output = dtogen()
        .arg("generate")
        .arg("--settings")
        .arg(&bad)
        .output()
        .expect("run cli");
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Source is null or empty"));
}

#[test]
fn test_cli_missing_source_exits_with_1() {
    let out = tempfile::tempdir().unwrap();
    let status = dtogen()
        .arg("generate")
        .arg(out.path().join("nope"))
        .arg(out.path().join("dest"))
        .status()
        .expect("run cli");
    assert_eq!(status.code(), Some(1));
}

#[test]
fn test_cli_inspect_prints_graph() {
    let output = dtogen()
        .arg("inspect")
        .arg(fixture_dir())
        .output()
        .expect("run cli");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Endpoints (2):"));
    assert!(stdout.contains("GET GetOrder(id: number): Order"));
    assert!(stdout.contains("POST SaveOrder(order: Order): void"));
    assert!(stdout.contains("PUT Archive(id: number): boolean"));
    assert!(stdout.contains("Models (6):"));
    assert!(stdout.contains("* Acme.Contracts.Order (Acme.Contracts)"));
    assert!(stdout.contains("  Acme.Contracts.OrderLine (Acme.Contracts)"));
}
