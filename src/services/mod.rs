//! System-state readers behind the status modules.
//!
//! Each service reads exactly one kind of source (procfs, sysfs, the
//! mixer CLI, the timer exchange files) and returns a typed status.
//! Rendering for the bar lives in [`crate::modules`].

pub mod audio;
pub mod cpu;
pub mod memory;
pub mod pomodoro;
pub mod temperature;

use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("cannot write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("malformed {0}")]
    Malformed(String),
    #[error("Temperature sensor not available")]
    NoSensor,
    #[error("no mixer tool available (tried wpctl, pamixer, pactl)")]
    NoMixer,
    #[error("audio server not ready")]
    AudioNotReady,
    #[error("{tool} failed: {detail}")]
    Tool { tool: &'static str, detail: String },
}
