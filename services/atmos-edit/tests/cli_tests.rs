//! End-to-end tests of the atmos-edit binary against a NetCDF file.

use std::path::Path;
use std::process::{Command, Output};

use atmos_common::{Quantity, Shape4};
use atmos_store::{AtmosSource, AtmosphereSnapshot, Field4, NetCdfSource};
use test_utils::{repeat_column, temp_test_dir_with_prefix, EXAMPLE_HEIGHTS, EXAMPLE_TEMPERATURE};

fn write_example(path: &Path) -> AtmosphereSnapshot {
    let shape = Shape4::new(2, 1, 1, EXAMPLE_HEIGHTS.len());
    let snapshot = AtmosphereSnapshot::new(
        Field4::new(shape, repeat_column(&EXAMPLE_HEIGHTS, 2)).unwrap(),
        Field4::new(shape, repeat_column(&EXAMPLE_TEMPERATURE, 2)).unwrap(),
        Field4::filled(shape, 1.0e18),
        Field4::filled(shape, 0.0),
        Field4::filled(shape, 2000.0),
    )
    .unwrap();
    NetCdfSource::create(path, &snapshot).unwrap();
    snapshot
}

fn run(args: &[&str]) -> Output {
    run_with_env(args, &[])
}

fn run_with_env(args: &[&str], env: &[(&str, &str)]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_atmos-edit"))
        .args(args)
        .env_remove("ATMOS_FILE")
        .env_remove("ATMOS_HEIGHT_MIN")
        .env_remove("ATMOS_HEIGHT_MAX")
        .env_remove("ATMOS_Y_PADDING")
        .env("RUST_LOG", "warn")
        .envs(env.iter().copied())
        .output()
        .expect("failed to run atmos-edit")
}

/// The JSON document that follows the summary lines on stdout.
fn json_report(output: &Output) -> serde_json::Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let start = stdout.find('{').expect("no JSON in stdout");
    serde_json::from_str(&stdout[start..]).unwrap()
}

fn read(path: &Path) -> AtmosphereSnapshot {
    NetCdfSource::open(path).unwrap().read().unwrap()
}

const EXAMPLE_EDIT: [&str; 10] = [
    "--quantity",
    "temperature",
    "--lower-height",
    "4.0",
    "--lower-value",
    "5000",
    "--upper-height",
    "2.0",
    "--upper-value",
    "4000",
];

#[test]
fn test_edit_writes_in_place() {
    let dir = temp_test_dir_with_prefix("atmos_cli");
    let path = dir.path().join("atmos.nc");
    let original = write_example(&path);
    let file = path.to_str().unwrap();

    let mut args = vec!["--file", file, "edit"];
    args.extend(EXAMPLE_EDIT);
    let output = run(&args);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("range edit over indices 2..3"), "stdout: {}", stdout);

    let edited = read(&path);
    assert_eq!(
        edited.column(Quantity::Temperature, 0).unwrap(),
        &[6000.0, 5500.0, 4500.0, 4500.0, 4000.0]
    );
    assert_eq!(
        edited.column(Quantity::Temperature, 1).unwrap(),
        original.column(Quantity::Temperature, 1).unwrap()
    );
}

#[test]
fn test_dry_run_leaves_file_alone() {
    let dir = temp_test_dir_with_prefix("atmos_cli");
    let path = dir.path().join("atmos.nc");
    let original = write_example(&path);
    let file = path.to_str().unwrap();

    let mut args = vec!["--file", file, "edit"];
    args.extend(EXAMPLE_EDIT);
    args.push("--dry-run");
    let output = run(&args);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("dry run"));

    assert_eq!(read(&path), original);
}

#[test]
fn test_output_copy() {
    let dir = temp_test_dir_with_prefix("atmos_cli");
    let path = dir.path().join("atmos.nc");
    let copy = dir.path().join("edited.nc");
    let original = write_example(&path);

    let mut args = vec!["--file", path.to_str().unwrap(), "edit"];
    args.extend(EXAMPLE_EDIT);
    args.extend(["--output", copy.to_str().unwrap()]);
    let output = run(&args);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    assert_eq!(read(&path), original);
    assert_eq!(read(&copy).column(Quantity::Temperature, 0).unwrap()[2], 4500.0);
}

#[test]
fn test_apply_script() {
    let dir = temp_test_dir_with_prefix("atmos_cli");
    let path = dir.path().join("atmos.nc");
    let script = dir.path().join("edits.yaml");
    write_example(&path);
    std::fs::write(
        &script,
        r#"
edits:
  - quantity: velocity_z
    time: 1
    lower_height: 3.0
    lower_value: -700.0
    upper_height: 3.0
    upper_value: -700.0
  - quantity: turbulence
    time: 1
    lower_height: 5.0
    lower_value: 0.0
    upper_height: 1.0
    upper_value: 4000.0
"#,
    )
    .unwrap();

    let output = run(&["--file", path.to_str().unwrap(), "apply", script.to_str().unwrap()]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let edited = read(&path);
    assert_eq!(edited.column(Quantity::VelocityZ, 1).unwrap(), &[0.0, 0.0, -700.0, 0.0, 0.0]);
    assert_eq!(
        edited.column(Quantity::Turbulence, 1).unwrap(),
        &[2000.0, 1000.0, 2000.0, 3000.0, 2000.0]
    );
    assert_eq!(edited.column(Quantity::VelocityZ, 0).unwrap(), &[0.0; 5]);
}

#[test]
fn test_show_json() {
    let dir = temp_test_dir_with_prefix("atmos_cli");
    let path = dir.path().join("atmos.nc");
    write_example(&path);

    let output = run(&[
        "--file",
        path.to_str().unwrap(),
        "show",
        "--height-min",
        "1.5",
        "--height-max",
        "4.5",
        "--format",
        "json",
    ]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["time_index"], 0);
    let temperature = &json["profiles"][0];
    assert_eq!(temperature["quantity"], "temperature");
    assert_eq!(temperature["points"].as_array().unwrap().len(), 3);
}

#[test]
fn test_invalid_time_fails() {
    let dir = temp_test_dir_with_prefix("atmos_cli");
    let path = dir.path().join("atmos.nc");
    let original = write_example(&path);

    let mut args = vec!["--file", path.to_str().unwrap(), "edit", "--time", "7"];
    args.extend(EXAMPLE_EDIT);
    let output = run(&args);
    assert!(!output.status.success());
    assert_eq!(read(&path), original);
}

#[test]
fn test_missing_file_fails() {
    let output = run(&["--file", "/nonexistent/atmos.nc", "info"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to open atmosphere file"));
}

#[test]
fn test_dry_run_shows_edited_profile() {
    let dir = temp_test_dir_with_prefix("atmos_cli");
    let path = dir.path().join("atmos.nc");
    let original = write_example(&path);

    let mut args = vec!["--file", path.to_str().unwrap(), "edit"];
    args.extend(EXAMPLE_EDIT);
    args.extend(["--dry-run", "--format", "json"]);
    let output = run(&args);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let json = json_report(&output);
    assert_eq!(json["time_index"], 0);
    let temperature = &json["profiles"][0];
    assert_eq!(temperature["quantity"], "temperature");
    let points = temperature["points"].as_array().unwrap();
    let at_3mm = points
        .iter()
        .find(|p| p[0].as_f64() == Some(3.0))
        .expect("no sample at 3 Mm");
    assert_eq!(at_3mm[1].as_f64(), Some(4500.0));

    assert_eq!(read(&path), original);
}

#[test]
fn test_show_flag_prints_edited_time_step() {
    let dir = temp_test_dir_with_prefix("atmos_cli");
    let path = dir.path().join("atmos.nc");
    write_example(&path);

    let mut args = vec!["--file", path.to_str().unwrap(), "edit", "--time", "1"];
    args.extend(EXAMPLE_EDIT);
    args.push("--show");
    let output = run(&args);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("time step 1"), "stdout: {}", stdout);
    assert!(stdout.contains("y-limits"));
    assert_eq!(read(&path).column(Quantity::Temperature, 1).unwrap()[2], 4500.0);
}

#[test]
fn test_bad_window_only_breaks_window_output() {
    let dir = temp_test_dir_with_prefix("atmos_cli");
    let path = dir.path().join("atmos.nc");
    write_example(&path);
    let file = path.to_str().unwrap();
    let inverted = [("ATMOS_HEIGHT_MIN", "4.0"), ("ATMOS_HEIGHT_MAX", "1.0")];

    let output = run_with_env(&["--file", file, "info"], &inverted);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let mut args = vec!["--file", file, "edit"];
    args.extend(EXAMPLE_EDIT);
    let output = run_with_env(&args, &inverted);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(read(&path).column(Quantity::Temperature, 0).unwrap()[2], 4500.0);

    let output = run_with_env(&["--file", file, "show"], &inverted);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid configuration"));
}

#[test]
fn test_file_from_environment() {
    let dir = temp_test_dir_with_prefix("atmos_cli");
    let path = dir.path().join("atmos.nc");
    write_example(&path);

    let output = run_with_env(&["info"], &[("ATMOS_FILE", path.to_str().unwrap())]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(String::from_utf8_lossy(&output.stdout).contains("shape (time, x, y, depth): (2, 1, 1, 5)"));
}
