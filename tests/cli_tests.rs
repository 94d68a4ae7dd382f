use std::fs;
use std::process::Command;

use assert_cmd::prelude::*;
use chrono::{NaiveDate, NaiveDateTime};
use predicates::prelude::*;
use serde::Serialize;

fn netspeed() -> Command {
    Command::cargo_bin("netspeed").unwrap()
}

/// Same field order as the on-disk usage record
#[derive(Serialize)]
struct SavedUsage {
    day_download: u64,
    week_download: u64,
    month_download: u64,
    year_download: u64,
    day_upload: u64,
    week_upload: u64,
    month_upload: u64,
    year_upload: u64,
    last_reset: NaiveDateTime,
}

fn write_state(path: &std::path::Path, usage: &SavedUsage) -> Result<(), Box<dyn std::error::Error>> {
    let mut bytes = b"NSPD\x01".to_vec();
    bytes.extend_from_slice(&bitcode::serialize(usage)?);
    fs::write(path, bytes)?;
    Ok(())
}

#[test]
fn stats_without_saved_state_prints_zeros() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let state = dir.path().join("usage_totals.bin");

    netspeed()
        .arg("--state-file")
        .arg(&state)
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("Download Today: 0.00 MB"))
        .stdout(predicate::str::contains("Upload This Year: 0.00 MB"))
        .stdout(predicate::str::contains("Last update: "));

    // stats is read-only
    assert!(!state.exists());
    Ok(())
}

#[test]
fn stats_recovers_from_corrupt_state() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let state = dir.path().join("usage_totals.bin");
    fs::write(&state, b"definitely not a usage record")?;

    netspeed()
        .arg("--state-file")
        .arg(&state)
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("Download This Month: 0.00 MB"));
    Ok(())
}

#[test]
fn watch_writes_state_that_stats_reads_back() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let state = dir.path().join("nested").join("usage_totals.bin");

    netspeed()
        .arg("--state-file")
        .arg(&state)
        .args(["--unit", "MB/s", "watch", "--count", "1"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^↓ \d+\.\d MB/s  ↑ \d+\.\d MB/s\n$")?);

    let bytes = fs::read(&state)?;
    assert_eq!(&bytes[..4], b"NSPD");
    assert_eq!(bytes[4], 1);

    netspeed()
        .arg("--state-file")
        .arg(&state)
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("Download This Week: "));
    Ok(())
}

#[test]
fn no_persist_leaves_no_file() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let state = dir.path().join("usage_totals.bin");

    netspeed()
        .arg("--state-file")
        .arg(&state)
        .args(["--no-persist", "watch", "-n", "1"])
        .assert()
        .success();

    assert!(!state.exists());
    Ok(())
}

#[test]
fn rejects_unknown_unit() -> Result<(), Box<dyn std::error::Error>> {
    netspeed()
        .args(["--unit", "GB/s", "stats"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown speed unit"));
    Ok(())
}

#[test]
fn rejects_unknown_theme() -> Result<(), Box<dyn std::error::Error>> {
    netspeed()
        .args(["--theme", "neon", "stats"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown theme"));
    Ok(())
}

#[test]
fn stats_zeroes_totals_from_past_periods() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let state = dir.path().join("usage_totals.bin");
    let gib = 1 << 30;
    let mib = 1 << 20;
    write_state(
        &state,
        &SavedUsage {
            day_download: gib,
            week_download: gib,
            month_download: gib,
            year_download: gib,
            day_upload: mib,
            week_upload: mib,
            month_upload: mib,
            year_upload: mib,
            last_reset: NaiveDate::from_ymd_opt(2020, 3, 1)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
        },
    )?;
    let before = fs::read(&state)?;

    netspeed()
        .arg("--state-file")
        .arg(&state)
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("Download Today: 0.00 MB"))
        .stdout(predicate::str::contains("Download This Year: 0.00 MB"))
        .stdout(predicate::str::contains("Upload This Year: 0.00 MB"))
        .stdout(predicate::str::contains("Last update: 2020-03-01 12:00:00"));

    assert_eq!(fs::read(&state)?, before);
    Ok(())
}
