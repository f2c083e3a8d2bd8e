//! CPU temperature from sysfs.
//!
//! Prefers a known CPU hwmon chip, then the x86 package thermal zone,
//! then thermal_zone0 as a last resort.

use std::fs;
use std::path::{Path, PathBuf};

use super::ServiceError;

const HWMON_ROOT: &str = "/sys/class/hwmon";
const THERMAL_ROOT: &str = "/sys/class/thermal";
const CPU_CHIPS: [&str; 3] = ["coretemp", "k10temp", "zenpower"];

/// Current CPU temperature in degrees Celsius.
pub fn read() -> Result<f64, ServiceError> {
    let sensor = find_sensor(Path::new(HWMON_ROOT), Path::new(THERMAL_ROOT))
        .ok_or(ServiceError::NoSensor)?;
    read_celsius(&sensor)
}

fn find_sensor(hwmon_root: &Path, thermal_root: &Path) -> Option<PathBuf> {
    if let Ok(entries) = fs::read_dir(hwmon_root) {
        for entry in entries.flatten() {
            let chip = entry.path();
            let Ok(name) = fs::read_to_string(chip.join("name")) else {
                continue;
            };
            if CPU_CHIPS.contains(&name.trim()) {
                let input = chip.join("temp1_input");
                if input.is_file() {
                    return Some(input);
                }
            }
        }
    }

    if let Ok(entries) = fs::read_dir(thermal_root) {
        for entry in entries.flatten() {
            if !entry.file_name().to_string_lossy().starts_with("thermal_zone") {
                continue;
            }
            let zone = entry.path();
            let Ok(kind) = fs::read_to_string(zone.join("type")) else {
                continue;
            };
            if kind.trim() == "x86_pkg_temp" {
                let input = zone.join("temp");
                if input.is_file() {
                    return Some(input);
                }
            }
        }
    }

    let fallback = thermal_root.join("thermal_zone0").join("temp");
    fallback.is_file().then_some(fallback)
}

fn read_celsius(path: &Path) -> Result<f64, ServiceError> {
    let raw = fs::read_to_string(path).map_err(|source| ServiceError::Read {
        path: path.display().to_string(),
        source,
    })?;
    let value: f64 = raw.trim().parse().map_err(|_| {
        ServiceError::Malformed(format!("{}: {:?} is not a number", path.display(), raw.trim()))
    })?;
    // Kernel thermal interfaces report millidegrees.
    if value > 1000.0 {
        Ok(value / 1000.0)
    } else {
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    struct FakeSysfs {
        _dir: TempDir,
        hwmon: PathBuf,
        thermal: PathBuf,
    }

    fn sysfs() -> FakeSysfs {
        let dir = TempDir::new().unwrap();
        let hwmon = dir.path().join("hwmon");
        let thermal = dir.path().join("thermal");
        fs::create_dir_all(&hwmon).unwrap();
        fs::create_dir_all(&thermal).unwrap();
        FakeSysfs { _dir: dir, hwmon, thermal }
    }

    fn add_chip(root: &Path, index: u32, name: &str, temp: Option<&str>) {
        let chip = root.join(format!("hwmon{index}"));
        fs::create_dir_all(&chip).unwrap();
        fs::write(chip.join("name"), format!("{name}\n")).unwrap();
        if let Some(temp) = temp {
            fs::write(chip.join("temp1_input"), temp).unwrap();
        }
    }

    fn add_zone(root: &Path, index: u32, kind: &str, temp: &str) {
        let zone = root.join(format!("thermal_zone{index}"));
        fs::create_dir_all(&zone).unwrap();
        fs::write(zone.join("type"), format!("{kind}\n")).unwrap();
        fs::write(zone.join("temp"), temp).unwrap();
    }

    #[test]
    fn prefers_cpu_hwmon_chip() {
        let fake = sysfs();
        add_chip(&fake.hwmon, 0, "nvme", Some("30000"));
        add_chip(&fake.hwmon, 1, "k10temp", Some("47000"));
        add_zone(&fake.thermal, 0, "acpitz", "25000");

        let sensor = find_sensor(&fake.hwmon, &fake.thermal).unwrap();
        assert!(sensor.ends_with("hwmon1/temp1_input"));
        assert_eq!(read_celsius(&sensor).unwrap(), 47.0);
    }

    #[test]
    fn chip_without_input_is_skipped() {
        let fake = sysfs();
        add_chip(&fake.hwmon, 0, "coretemp", None);
        add_zone(&fake.thermal, 3, "x86_pkg_temp", "51000");

        let sensor = find_sensor(&fake.hwmon, &fake.thermal).unwrap();
        assert!(sensor.ends_with("thermal_zone3/temp"));
    }

    #[test]
    fn falls_back_to_zone_zero() {
        let fake = sysfs();
        add_zone(&fake.thermal, 0, "acpitz", "42123");

        let sensor = find_sensor(&fake.hwmon, &fake.thermal).unwrap();
        assert!(sensor.ends_with("thermal_zone0/temp"));
        let celsius = read_celsius(&sensor).unwrap();
        assert!((celsius - 42.123).abs() < 1e-9);
    }

    #[test]
    fn no_sensor_at_all() {
        let fake = sysfs();
        assert!(find_sensor(&fake.hwmon, &fake.thermal).is_none());
    }

    #[test]
    fn plain_degrees_are_not_scaled() {
        let fake = sysfs();
        add_zone(&fake.thermal, 0, "acpitz", "47\n");
        let sensor = find_sensor(&fake.hwmon, &fake.thermal).unwrap();
        assert_eq!(read_celsius(&sensor).unwrap(), 47.0);
    }

    #[test]
    fn junk_reading_is_an_error() {
        let fake = sysfs();
        add_zone(&fake.thermal, 0, "acpitz", "cold");
        let sensor = find_sensor(&fake.hwmon, &fake.thermal).unwrap();
        assert!(read_celsius(&sensor).is_err());
    }
}
