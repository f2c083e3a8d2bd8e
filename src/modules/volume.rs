use log::{debug, warn};

use crate::icons;
use crate::output::{ModuleOutput, usage_class};
use crate::services::ServiceError;
use crate::services::audio::{AudioStatus, Device, Mixer};

const WARNING_PERCENT: f64 = 85.0;
const CRITICAL_PERCENT: f64 = 100.0;

pub fn output() -> ModuleOutput {
    match Mixer::detect().and_then(|mixer| mixer.status(Device::Sink)) {
        Ok(status) => render(&status),
        Err(e @ (ServiceError::NoMixer | ServiceError::AudioNotReady)) => {
            debug!("volume module: {e}");
            not_ready()
        }
        Err(e) => {
            warn!("volume module falling back: {e}");
            ModuleOutput::fallback(icons::VOLUME_ZERO, format!("Volume Error: {e}"))
        }
    }
}

/// Shown while PipeWire is still starting up, styled like muted rather
/// than broken.
fn not_ready() -> ModuleOutput {
    ModuleOutput {
        text: format!("▁ {}", icons::VOLUME_MUTED),
        tooltip: "Audio not ready".into(),
        class: "muted".into(),
        percentage: Some(0),
        alt: None,
    }
}

fn render(status: &AudioStatus) -> ModuleOutput {
    if status.muted {
        return ModuleOutput {
            text: format!("▁ {}", icons::VOLUME_MUTED),
            tooltip: format!("Speaker: Muted (was {}%)", status.volume_percent),
            class: "muted".into(),
            percentage: Some(0),
            alt: None,
        };
    }

    let volume = status.volume_percent;
    let icon = if volume == 0 {
        icons::VOLUME_ZERO
    } else if volume <= 33 {
        icons::VOLUME_LOW
    } else {
        icons::VOLUME_HIGH
    };
    ModuleOutput {
        text: format!("{} {icon}", icons::level_bar(f64::from(volume), icons::VOLUME_RAMP)),
        tooltip: format!("Speaker Volume: {volume}%"),
        class: usage_class(f64::from(volume), WARNING_PERCENT, CRITICAL_PERCENT).into(),
        percentage: Some(volume.min(100) as u8),
        alt: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(volume_percent: u32, muted: bool) -> AudioStatus {
        AudioStatus { volume_percent, muted }
    }

    #[test]
    fn muted_shows_flat_bar_and_last_volume() {
        let out = render(&status(62, true));
        assert_eq!(out.text, format!("▁ {}", icons::VOLUME_MUTED));
        assert_eq!(out.tooltip, "Speaker: Muted (was 62%)");
        assert_eq!(out.class, "muted");
        assert_eq!(out.percentage, Some(0));
    }

    #[test]
    fn icon_tracks_the_level() {
        assert!(render(&status(0, false)).text.ends_with(icons::VOLUME_ZERO));
        assert!(render(&status(33, false)).text.ends_with(icons::VOLUME_LOW));
        assert!(render(&status(34, false)).text.ends_with(icons::VOLUME_HIGH));
        assert!(render(&status(95, false)).text.ends_with(icons::VOLUME_HIGH));
    }

    #[test]
    fn class_boundaries() {
        assert_eq!(render(&status(84, false)).class, "normal");
        assert_eq!(render(&status(85, false)).class, "warning");
        assert_eq!(render(&status(99, false)).class, "warning");
        assert_eq!(render(&status(100, false)).class, "critical");
    }

    #[test]
    fn amplified_volume_clamps_the_percentage_field() {
        let out = render(&status(127, false));
        assert_eq!(out.percentage, Some(100));
        assert_eq!(out.tooltip, "Speaker Volume: 127%");
    }

    #[test]
    fn not_ready_shape() {
        let out = not_ready();
        assert_eq!(out.tooltip, "Audio not ready");
        assert_eq!(out.class, "muted");
    }
}
