use log::warn;

use crate::icons;
use crate::output::{ModuleOutput, usage_class};
use crate::services::memory::MemoryStatus;

const WARNING_PERCENT: f64 = 75.0;
const CRITICAL_PERCENT: f64 = 90.0;

pub fn output() -> ModuleOutput {
    match MemoryStatus::read() {
        Ok(status) => render(&status),
        Err(e) => {
            warn!("memory module falling back: {e}");
            ModuleOutput::fallback(icons::MEMORY, format!("Memory Error: {e}"))
        }
    }
}

fn render(status: &MemoryStatus) -> ModuleOutput {
    let percent = status.used_percentage();
    let bar = if percent <= 0.0 {
        ""
    } else {
        icons::level_bar(percent, icons::USAGE_RAMP)
    };
    ModuleOutput {
        text: format!("{bar} {}", icons::MEMORY),
        tooltip: format!(
            "Used (Modern): {:.1}GB\nUsed (Traditional): {:.1}GB\nAvailable: {:.1}GB\nTotal: {:.1}GB ({percent:.1}%)",
            gb(status.used()),
            gb(status.used_traditional()),
            gb(status.available),
            gb(status.total),
        ),
        class: usage_class(percent, WARNING_PERCENT, CRITICAL_PERCENT).into(),
        percentage: Some(percent.round() as u8),
        alt: None,
    }
}

fn gb(kb: u64) -> f64 {
    kb as f64 / (1024.0 * 1024.0)
}
