//! Central table of the nerd-font glyphs and level-bar ramps shared by
//! the status modules.

pub const MEMORY: &str = "󰾆";
pub const CPU: &str = "󰍛";
pub const TEMPERATURE: &str = "󰈸";

pub const MIC_ACTIVE: &str = "󰍬";
pub const MIC_MUTED: &str = "󰍭";

pub const VOLUME_MUTED: &str = "󰖁";
pub const VOLUME_ZERO: &str = "󰕿";
pub const VOLUME_LOW: &str = "󰖀";
pub const VOLUME_HIGH: &str = "󰕾";

pub const TIMER_IDLE: &str = "󰌾";
pub const TIMER_RUNNING: &str = "󰔛";
pub const TIMER_PAUSED: &str = "󰏤";
pub const TIMER_BREAK: &str = "☕";

/// Upper percentage bound for each block glyph; anything above the last
/// bound renders as the full block.
pub type Ramp = [(f64, &'static str)];

/// Usage meters (memory, cpu). Callers render 0% as an empty glyph.
pub const USAGE_RAMP: &Ramp = &[
    (15.0, "▁"),
    (30.0, "▂"),
    (45.0, "▃"),
    (60.0, "▄"),
    (75.0, "▅"),
    (85.0, "▆"),
    (95.0, "▇"),
];

/// Speaker volume, front-loaded so low volumes stay visible.
pub const VOLUME_RAMP: &Ramp = &[
    (2.0, "▁"),
    (5.0, "▂"),
    (10.0, "▃"),
    (20.0, "▄"),
    (35.0, "▅"),
    (50.0, "▆"),
    (75.0, "▇"),
];

pub const TEMPERATURE_RAMP: &Ramp = &[
    (10.0, "▁"),
    (25.0, "▂"),
    (40.0, "▃"),
    (55.0, "▄"),
    (70.0, "▅"),
    (80.0, "▆"),
    (90.0, "▇"),
];

pub fn level_bar(percent: f64, ramp: &Ramp) -> &'static str {
    for &(bound, glyph) in ramp {
        if percent <= bound {
            return glyph;
        }
    }
    "█"
}
