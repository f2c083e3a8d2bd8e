//! Pomodoro timer state machine and its on-disk exchange files.
//!
//! State is a JSON snapshot overwritten whole on every change and read
//! back by the next poll. Click handlers talk to the poller through a
//! one-shot command file that the next invocation consumes (read, then
//! deleted). Neither file is locked: the bar polls far faster than a
//! human clicks.

use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Duration, Utc};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::config::PomodoroConfig;

use super::ServiceError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    Idle,
    Work,
    Break,
    BreakComplete,
}

impl Phase {
    pub fn class(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Work => "work",
            Self::Break => "break",
            Self::BreakComplete => "break_complete",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TimerState {
    pub mode: Phase,
    pub running: bool,
    pub end_time: Option<DateTime<Utc>>,
    /// Seconds left at the moment of pausing.
    pub paused_remaining: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Toggle,
    Reset,
}

#[derive(Serialize, Deserialize)]
struct CommandFile {
    action: Action,
}

impl TimerState {
    /// Seconds left in the current phase at `now`.
    pub fn remaining_seconds(&self, now: DateTime<Utc>) -> f64 {
        if self.running {
            self.end_time
                .map(|end| ((end - now).num_milliseconds() as f64 / 1000.0).max(0.0))
                .unwrap_or(0.0)
        } else {
            self.paused_remaining.unwrap_or(0.0).max(0.0)
        }
    }

    /// Full length of the current phase, for progress display.
    pub fn total_seconds(&self, config: &PomodoroConfig) -> f64 {
        match self.mode {
            Phase::Work => f64::from(config.work_minutes) * 60.0,
            Phase::Break => f64::from(config.break_minutes) * 60.0,
            Phase::Idle | Phase::BreakComplete => 0.0,
        }
    }

    pub fn apply(&mut self, action: Action, now: DateTime<Utc>, config: &PomodoroConfig) {
        match action {
            Action::Reset => *self = Self::default(),
            Action::Toggle => match (self.mode, self.running) {
                (Phase::Idle | Phase::BreakComplete, _) => {
                    self.mode = Phase::Work;
                    self.running = true;
                    self.end_time = Some(now + Duration::minutes(i64::from(config.work_minutes)));
                    self.paused_remaining = None;
                }
                (_, true) => {
                    // Pause: capture the remainder so resume can re-anchor it.
                    self.paused_remaining = Some(self.remaining_seconds(now));
                    self.running = false;
                }
                (_, false) => {
                    let remaining = self.paused_remaining.take().unwrap_or(0.0);
                    self.end_time =
                        Some(now + Duration::milliseconds((remaining * 1000.0) as i64));
                    self.running = true;
                }
            },
        }
    }

    /// Advance any phase transition that has expired by `now`. Returns
    /// true when the state changed and needs saving.
    pub fn advance(&mut self, now: DateTime<Utc>, config: &PomodoroConfig) -> bool {
        if !self.running || self.remaining_seconds(now) > 0.0 {
            return false;
        }
        match self.mode {
            Phase::Work => {
                self.mode = Phase::Break;
                self.end_time = Some(now + Duration::minutes(i64::from(config.break_minutes)));
                self.paused_remaining = None;
                true
            }
            Phase::Break => {
                self.mode = Phase::BreakComplete;
                self.running = false;
                self.end_time = None;
                self.paused_remaining = None;
                true
            }
            Phase::Idle | Phase::BreakComplete => false,
        }
    }
}

/// Well-known paths of the state snapshot and the command mailbox.
pub struct TimerFiles {
    pub state: PathBuf,
    pub command: PathBuf,
}

impl Default for TimerFiles {
    fn default() -> Self {
        Self {
            state: PathBuf::from("/tmp/waystatus-pomodoro.json"),
            command: PathBuf::from("/tmp/waystatus-pomodoro.cmd"),
        }
    }
}

impl TimerFiles {
    /// Missing or corrupt state reads as the idle default.
    pub fn load(&self) -> TimerState {
        match fs::read_to_string(&self.state) {
            Ok(text) => serde_json::from_str(&text).unwrap_or_else(|e| {
                warn!("discarding malformed timer state: {e}");
                TimerState::default()
            }),
            Err(e) => {
                debug!("no timer state ({e}), starting idle");
                TimerState::default()
            }
        }
    }

    pub fn save(&self, state: &TimerState) -> Result<(), ServiceError> {
        let text = serde_json::to_string(state)
            .map_err(|e| ServiceError::Malformed(format!("timer state: {e}")))?;
        fs::write(&self.state, text).map_err(|source| ServiceError::Write {
            path: self.state.display().to_string(),
            source,
        })
    }

    /// Take the pending click command, if any. The file is removed even
    /// when its contents are unreadable.
    pub fn take_command(&self) -> Option<Action> {
        let text = fs::read_to_string(&self.command).ok()?;
        if let Err(e) = fs::remove_file(&self.command) {
            warn!("cannot remove command file: {e}");
        }
        match serde_json::from_str::<CommandFile>(&text) {
            Ok(command) => Some(command.action),
            Err(e) => {
                warn!("discarding malformed command file: {e}");
                None
            }
        }
    }

    /// Post a click command for the next poll to consume.
    pub fn post_command(&self, action: Action) -> Result<(), ServiceError> {
        let text = serde_json::to_string(&CommandFile { action })
            .map_err(|e| ServiceError::Malformed(format!("timer command: {e}")))?;
        fs::write(&self.command, text).map_err(|source| ServiceError::Write {
            path: self.command.display().to_string(),
            source,
        })
    }
}
