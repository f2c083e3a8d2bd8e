use log::debug;

use crate::icons;
use crate::output::ModuleOutput;
use crate::services::audio::{AudioStatus, Device, Mixer};

pub fn output() -> ModuleOutput {
    // A mixer that cannot be queried reads as a muted microphone.
    let status = Mixer::detect()
        .and_then(|mixer| mixer.status(Device::Source))
        .unwrap_or_else(|e| {
            debug!("mic module treating mixer failure as muted: {e}");
            AudioStatus { volume_percent: 0, muted: true }
        });
    render(&status)
}

fn render(status: &AudioStatus) -> ModuleOutput {
    if status.muted {
        ModuleOutput {
            text: icons::MIC_MUTED.into(),
            tooltip: "Microphone: Muted".into(),
            class: "muted".into(),
            percentage: None,
            alt: Some("Muted".into()),
        }
    } else {
        let level = format!("{}%", status.volume_percent);
        ModuleOutput {
            text: icons::MIC_ACTIVE.into(),
            tooltip: format!("Microphone: {level}"),
            class: "active".into(),
            percentage: None,
            alt: Some(level),
        }
    }
}
