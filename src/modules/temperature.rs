use log::warn;

use crate::icons;
use crate::output::{ModuleOutput, usage_class};
use crate::services::{ServiceError, temperature};

const WARNING_CELSIUS: f64 = 80.0;
const CRITICAL_CELSIUS: f64 = 90.0;

pub fn output() -> ModuleOutput {
    match temperature::read() {
        Ok(celsius) => render(celsius),
        Err(e @ ServiceError::NoSensor) => {
            warn!("temperature module falling back: {e}");
            ModuleOutput::fallback(icons::TEMPERATURE, e.to_string())
        }
        Err(e) => {
            warn!("temperature module falling back: {e}");
            ModuleOutput::fallback(icons::TEMPERATURE, format!("Temperature Error: {e}"))
        }
    }
}

fn render(celsius: f64) -> ModuleOutput {
    // The bar maps the interesting 60-95°C span onto 0-100%.
    let scale = ((celsius - 60.0) * 100.0 / 35.0).clamp(0.0, 100.0);
    ModuleOutput {
        text: format!(
            "{} {}",
            icons::level_bar(scale, icons::TEMPERATURE_RAMP),
            icons::TEMPERATURE
        ),
        tooltip: format!("CPU Temperature: {celsius:.1}°C"),
        class: usage_class(celsius, WARNING_CELSIUS, CRITICAL_CELSIUS).into(),
        percentage: Some(celsius.round().clamp(0.0, 100.0) as u8),
        alt: None,
    }
}
