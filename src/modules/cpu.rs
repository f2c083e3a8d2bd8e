use log::warn;

use crate::icons;
use crate::output::{ModuleOutput, usage_class};
use crate::services::cpu::{self, CpuStatus};

const WARNING_PERCENT: f64 = 75.0;
const CRITICAL_PERCENT: f64 = 90.0;

pub fn output() -> ModuleOutput {
    match cpu::sample() {
        Ok(status) => render(&status),
        Err(e) => {
            warn!("cpu module falling back: {e}");
            ModuleOutput::fallback(icons::CPU, format!("CPU Error: {e}"))
        }
    }
}

fn render(status: &CpuStatus) -> ModuleOutput {
    let percent = status.usage_percent;
    let bar = if percent <= 0.0 {
        ""
    } else {
        icons::level_bar(percent, icons::USAGE_RAMP)
    };
    ModuleOutput {
        text: format!("{bar} {}", icons::CPU),
        tooltip: format!(
            "CPU Usage: {percent:.1}% | {} cores | Load: {:.2}",
            status.core_count, status.load_average,
        ),
        class: usage_class(percent, WARNING_PERCENT, CRITICAL_PERCENT).into(),
        percentage: Some(percent.round() as u8),
        alt: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(usage_percent: f64) -> CpuStatus {
        CpuStatus {
            usage_percent,
            core_count: 8,
            load_average: 1.25,
        }
    }

    #[test]
    fn renders_bar_and_tooltip() {
        let out = render(&status(42.3));
        assert_eq!(out.text, format!("▃ {}", icons::CPU));
        assert_eq!(out.tooltip, "CPU Usage: 42.3% | 8 cores | Load: 1.25");
        assert_eq!(out.class, "normal");
        assert_eq!(out.percentage, Some(42));
    }

    #[test]
    fn class_boundaries() {
        assert_eq!(render(&status(74.9)).class, "normal");
        assert_eq!(render(&status(75.0)).class, "warning");
        assert_eq!(render(&status(89.9)).class, "warning");
        assert_eq!(render(&status(90.0)).class, "critical");
    }

    #[test]
    fn idle_cpu_has_no_bar_glyph() {
        assert_eq!(render(&status(0.0)).text, format!(" {}", icons::CPU));
    }
}
