//! Linux `power_supply` sysfs backend.
//!
//! Each directory below the sysfs root describes one power supply. A supply
//! is a battery when its `type` file reads `Battery` and its `scope` file
//! (if present) is not `Device`; peripheral batteries (wireless mice and
//! the like) report the `Device` scope and are skipped.
//!
//! The kernel exposes either the energy family (`energy_now` etc., µWh) or
//! the charge family (`charge_now` etc., µAh). Charge values are converted
//! to energy using the instantaneous voltage.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::time::Duration;

use tracing::warn;

use crate::battery::{Battery, Metrics};
use crate::error::{Error, Result};
use crate::state::State;
use crate::technology::Technology;

/// Rates below this are treated as "not flowing" for time estimates.
const MIN_RATE_WATTS: f64 = 0.01;

/// Probe one supply directory. Returns `None` for supplies that are not
/// usable batteries.
pub(crate) fn probe(dir: &Path) -> Result<Option<Battery>> {
    if !is_battery(dir)? {
        return Ok(None);
    }

    let metrics = match read_metrics(dir)? {
        Some(metrics) => metrics,
        None => {
            warn!(device = %dir.display(), "battery reports no energy or charge data, skipping");
            return Ok(None);
        }
    };

    let technology = read_string(dir, "technology")?
        .map(|value| Technology::from_sysfs(&value))
        .unwrap_or(Technology::Unknown);

    Ok(Some(Battery::new(
        dir.to_path_buf(),
        technology,
        read_string(dir, "manufacturer")?,
        read_string(dir, "model_name")?,
        read_string(dir, "serial_number")?,
        metrics,
    )))
}

/// Re-read the metrics of a known battery device.
pub(crate) fn refresh(battery: &mut Battery) -> Result<()> {
    let dir = battery.device.clone();
    if !dir.exists() {
        return Err(Error::DeviceGone(dir));
    }

    match read_metrics(&dir)? {
        Some(metrics) => {
            battery.set_metrics(metrics);
            Ok(())
        }
        None => Err(Error::DeviceGone(dir)),
    }
}

fn is_battery(dir: &Path) -> Result<bool> {
    let kind = match read_string(dir, "type")? {
        Some(kind) => kind,
        None => return Ok(false),
    };
    if kind != "Battery" {
        return Ok(false);
    }

    match read_string(dir, "scope")? {
        Some(scope) if scope == "Device" => Ok(false),
        _ => Ok(true),
    }
}

/// Read all metrics in one pass. `None` when the device exposes neither the
/// energy nor the charge file family.
fn read_metrics(dir: &Path) -> Result<Option<Metrics>> {
    let voltage = read_u64(dir, "voltage_now")?.map(|uv| uv as f64 / 1e6);

    // Energy family first (already in µWh), then charge (µAh) × voltage.
    let energies = if let Some(full) = read_u64(dir, "energy_full")? {
        Some((
            read_u64(dir, "energy_now")?.unwrap_or(0) as f64 / 1e6,
            full as f64 / 1e6,
            read_u64(dir, "energy_full_design")?.map(|v| v as f64 / 1e6),
        ))
    } else if let (Some(full), Some(voltage)) = (read_u64(dir, "charge_full")?, voltage) {
        let to_wh = |uah: u64| uah as f64 * voltage / 1e6;
        Some((
            read_u64(dir, "charge_now")?.map(to_wh).unwrap_or(0.0),
            to_wh(full),
            read_u64(dir, "charge_full_design")?.map(to_wh),
        ))
    } else {
        None
    };

    let (energy, energy_full, energy_full_design) = match energies {
        Some((energy, full, design)) => (energy, full, design.unwrap_or(full)),
        None => return Ok(None),
    };

    let energy_rate = if let Some(uw) = read_u64(dir, "power_now")? {
        uw as f64 / 1e6
    } else {
        match (read_u64(dir, "current_now")?, voltage) {
            (Some(ua), Some(voltage)) => ua as f64 * voltage / 1e6,
            _ => 0.0,
        }
    };

    let state = read_string(dir, "status")?
        .map(|value| State::from_sysfs(&value))
        .unwrap_or(State::Unknown);

    let state_of_charge = match read_u64(dir, "capacity")? {
        Some(percent) => percent as f64,
        None if energy_full > 0.0 => energy / energy_full * 100.0,
        None => 0.0,
    };

    let state_of_health = if energy_full_design > 0.0 {
        energy_full / energy_full_design * 100.0
    } else {
        100.0
    };

    let time_to_full = match state {
        State::Charging if energy_rate > MIN_RATE_WATTS => {
            duration_hours((energy_full - energy) / energy_rate)
        }
        _ => None,
    };
    let time_to_empty = match state {
        State::Discharging if energy_rate > MIN_RATE_WATTS => {
            duration_hours(energy / energy_rate)
        }
        _ => None,
    };

    Ok(Some(Metrics {
        state_of_charge: state_of_charge as f32,
        energy: energy as f32,
        energy_full: energy_full as f32,
        energy_full_design: energy_full_design as f32,
        energy_rate: energy_rate as f32,
        voltage: voltage.unwrap_or(0.0) as f32,
        state_of_health: state_of_health as f32,
        state,
        temperature: read_i64(dir, "temp")?.map(|tenths| tenths as f32 / 10.0),
        cycle_count: read_i64(dir, "cycle_count")?.and_then(|count| u64::try_from(count).ok().filter(|c| *c > 0)),
        time_to_full,
        time_to_empty,
    }))
}

fn duration_hours(hours: f64) -> Option<Duration> {
    if hours.is_finite() && hours >= 0.0 {
        Some(Duration::from_secs_f64(hours * 3600.0))
    } else {
        None
    }
}

/// Read a sysfs attribute as a trimmed string. Missing files and empty
/// contents are `None`.
fn read_string(dir: &Path, name: &str) -> Result<Option<String>> {
    let path = dir.join(name);
    match fs::read_to_string(&path) {
        Ok(content) => {
            let trimmed = content.trim();
            if trimmed.is_empty() {
                Ok(None)
            } else {
                Ok(Some(trimmed.to_string()))
            }
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(Error::io(path, e)),
    }
}

fn read_u64(dir: &Path, name: &str) -> Result<Option<u64>> {
    parse_number(dir, name)
}

fn read_i64(dir: &Path, name: &str) -> Result<Option<i64>> {
    parse_number(dir, name)
}

fn parse_number<T: std::str::FromStr>(dir: &Path, name: &str) -> Result<Option<T>> {
    match read_string(dir, name)? {
        Some(value) => value.parse().map(Some).map_err(|_| Error::Malformed {
            path: dir.join(name),
            value,
        }),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    fn write_supply(root: &Path, name: &str, files: &[(&str, &str)]) -> PathBuf {
        let dir = root.join(name);
        fs::create_dir_all(&dir).expect("create supply dir");
        for (file, content) in files {
            fs::write(dir.join(file), content).expect("write attribute");
        }
        dir
    }

    fn energy_battery(root: &Path) -> PathBuf {
        write_supply(
            root,
            "BAT0",
            &[
                ("type", "Battery\n"),
                ("status", "Discharging\n"),
                ("technology", "Li-ion\n"),
                ("capacity", "85\n"),
                ("energy_now", "38500000\n"),
                ("energy_full", "45000000\n"),
                ("energy_full_design", "50000000\n"),
                ("power_now", "7000000\n"),
                ("voltage_now", "12100000\n"),
                ("temp", "305\n"),
                ("cycle_count", "120\n"),
                ("manufacturer", "LGC\n"),
                ("model_name", "5B10W13930\n"),
                ("serial_number", "1234\n"),
            ],
        )
    }

    #[test]
    fn test_probe_energy_family() {
        let root = tempfile::tempdir().expect("create temp dir");
        let dir = energy_battery(root.path());

        let battery = probe(&dir).expect("probe").expect("is a battery");
        assert_eq!(battery.state(), State::Discharging);
        assert_eq!(battery.technology(), Technology::LithiumIon);
        assert_eq!(battery.vendor(), Some("LGC"));
        assert_eq!(battery.model(), Some("5B10W13930"));
        assert_eq!(battery.serial_number(), Some("1234"));
        assert_eq!(battery.cycle_count(), Some(120));

        assert!((battery.state_of_charge() - 85.0).abs() < 1e-3);
        assert!((battery.energy() - 38.5).abs() < 1e-3);
        assert!((battery.energy_full() - 45.0).abs() < 1e-3);
        assert!((battery.energy_full_design() - 50.0).abs() < 1e-3);
        assert!((battery.energy_rate() - 7.0).abs() < 1e-3);
        assert!((battery.voltage() - 12.1).abs() < 1e-3);
        assert!((battery.state_of_health() - 90.0).abs() < 1e-3);
        assert!((battery.temperature().unwrap() - 30.5).abs() < 1e-3);

        // 38.5 Wh at 7 W: 5.5 hours left.
        assert_eq!(battery.time_to_empty().unwrap().as_secs(), 19_800);
        assert!(battery.time_to_full().is_none());
    }

    #[test]
    fn test_probe_charge_family() {
        let root = tempfile::tempdir().expect("create temp dir");
        let dir = write_supply(
            root.path(),
            "BAT1",
            &[
                ("type", "Battery\n"),
                ("status", "Charging\n"),
                ("voltage_now", "10000000\n"), // 10 V
                ("charge_now", "2000000\n"),   // 2 Ah -> 20 Wh
                ("charge_full", "3000000\n"),  // 3 Ah -> 30 Wh
                ("charge_full_design", "4000000\n"),
                ("current_now", "500000\n"), // 0.5 A -> 5 W
            ],
        );

        let battery = probe(&dir).expect("probe").expect("is a battery");
        assert!((battery.energy() - 20.0).abs() < 1e-3);
        assert!((battery.energy_full() - 30.0).abs() < 1e-3);
        assert!((battery.energy_full_design() - 40.0).abs() < 1e-3);
        assert!((battery.energy_rate() - 5.0).abs() < 1e-3);
        // No capacity file: computed from energy.
        assert!((battery.state_of_charge() - 66.6667).abs() < 1e-2);
        assert!((battery.state_of_health() - 75.0).abs() < 1e-3);

        // (30 - 20) Wh at 5 W: 2 hours to full.
        assert_eq!(battery.time_to_full().unwrap().as_secs(), 7_200);
        assert!(battery.time_to_empty().is_none());

        // Optional metrics absent.
        assert!(battery.temperature().is_none());
        assert!(battery.cycle_count().is_none());
        assert!(battery.vendor().is_none());
        assert_eq!(battery.technology(), Technology::Unknown);
    }

    #[test]
    fn test_mains_supply_is_not_a_battery() {
        let root = tempfile::tempdir().expect("create temp dir");
        let dir = write_supply(root.path(), "AC", &[("type", "Mains\n"), ("online", "1\n")]);
        assert!(probe(&dir).expect("probe").is_none());
    }

    #[test]
    fn test_device_scope_is_skipped() {
        let root = tempfile::tempdir().expect("create temp dir");
        let dir = write_supply(
            root.path(),
            "hidpp_battery_0",
            &[
                ("type", "Battery\n"),
                ("scope", "Device\n"),
                ("capacity", "50\n"),
            ],
        );
        assert!(probe(&dir).expect("probe").is_none());
    }

    #[test]
    fn test_battery_without_energy_data_is_skipped() {
        let root = tempfile::tempdir().expect("create temp dir");
        let dir = write_supply(
            root.path(),
            "BAT9",
            &[("type", "Battery\n"), ("status", "Full\n")],
        );
        assert!(probe(&dir).expect("probe").is_none());
    }

    #[test]
    fn test_malformed_number_is_an_error() {
        let root = tempfile::tempdir().expect("create temp dir");
        let dir = write_supply(
            root.path(),
            "BAT0",
            &[
                ("type", "Battery\n"),
                ("energy_full", "not-a-number\n"),
                ("voltage_now", "12000000\n"),
            ],
        );

        let err = probe(&dir).unwrap_err();
        assert!(matches!(err, Error::Malformed { value, .. } if value == "not-a-number"));
    }

    #[test]
    fn test_refresh_rereads_values() {
        let root = tempfile::tempdir().expect("create temp dir");
        let dir = energy_battery(root.path());

        let mut battery = probe(&dir).expect("probe").expect("is a battery");
        fs::write(dir.join("energy_now"), "40000000\n").unwrap();
        fs::write(dir.join("status"), "Charging\n").unwrap();

        refresh(&mut battery).expect("refresh");
        assert!((battery.energy() - 40.0).abs() < 1e-3);
        assert_eq!(battery.state(), State::Charging);
        assert!(battery.time_to_full().is_some());
    }

    #[test]
    fn test_refresh_vanished_device() {
        let root = tempfile::tempdir().expect("create temp dir");
        let dir = energy_battery(root.path());

        let mut battery = probe(&dir).expect("probe").expect("is a battery");
        fs::remove_dir_all(&dir).unwrap();

        let err = refresh(&mut battery).unwrap_err();
        assert!(matches!(err, Error::DeviceGone(_)));
    }
}
