//! Aggregate CPU usage sampled through sysinfo.

use std::thread;

use sysinfo::{MINIMUM_CPU_UPDATE_INTERVAL, System};

use super::ServiceError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CpuStatus {
    /// Usage averaged across all cores, 0.0..=100.0.
    pub usage_percent: f64,
    pub core_count: usize,
    /// 1-minute load average.
    pub load_average: f64,
}

/// Sample aggregate usage. Usage is a delta between two refreshes, so this
/// blocks for sysinfo's minimum update interval.
pub fn sample() -> Result<CpuStatus, ServiceError> {
    let mut sys = System::new();
    sys.refresh_cpu_usage();
    thread::sleep(MINIMUM_CPU_UPDATE_INTERVAL);
    sys.refresh_cpu_usage();

    let cpus = sys.cpus();
    if cpus.is_empty() {
        return Err(ServiceError::Malformed("CPU sample: no cores reported".into()));
    }

    let total: f64 = cpus.iter().map(|cpu| f64::from(cpu.cpu_usage())).sum();
    Ok(CpuStatus {
        usage_percent: (total / cpus.len() as f64).clamp(0.0, 100.0),
        core_count: cpus.len(),
        load_average: System::load_average().one,
    })
}
