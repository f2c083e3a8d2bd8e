//! Waybar-facing renderers, one per panel segment.
//!
//! Each module turns a service status into a [`crate::output::ModuleOutput`]
//! and swallows failures into its fallback shape, so a poll always prints
//! valid JSON.

pub mod cpu;
pub mod memory;
pub mod mic;
pub mod pomodoro;
pub mod temperature;
pub mod volume;
