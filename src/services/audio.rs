//! Speaker and microphone state through the system mixer CLI.
//!
//! Prefers PipeWire's wpctl, then pamixer, then plain pactl; the pamixer
//! path first confirms the audio server answers `pactl info`, since
//! pamixer blocks for a long time while PipeWire is still coming up.
//! Control operations post a desktop notification when notify-send is
//! installed.

use std::io;
use std::process::{Command, Stdio};

use log::{debug, warn};

use super::ServiceError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Device {
    Sink,
    Source,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioStatus {
    /// Percentage of the default device; can exceed 100 when amplified.
    pub volume_percent: u32,
    pub muted: bool,
}

/// Click/scroll handler actions exposed on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlAction {
    ToggleMute,
    Raise,
    Lower,
    Get,
}

impl ControlAction {
    pub fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "toggle" => Some(Self::ToggleMute),
            "up" | "inc" => Some(Self::Raise),
            "down" | "dec" => Some(Self::Lower),
            "get" => Some(Self::Get),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MixerOp {
    ToggleMute,
    Raise,
    Lower,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mixer {
    Wpctl,
    Pamixer,
    Pactl,
}

impl Mixer {
    /// First mixer tool present on PATH, in preference order.
    pub fn detect() -> Result<Self, ServiceError> {
        [Self::Wpctl, Self::Pamixer, Self::Pactl]
            .into_iter()
            .find(|mixer| tool_exists(mixer.tool()))
            .ok_or(ServiceError::NoMixer)
    }

    fn tool(self) -> &'static str {
        match self {
            Self::Wpctl => "wpctl",
            Self::Pamixer => "pamixer",
            Self::Pactl => "pactl",
        }
    }

    pub fn status(self, device: Device) -> Result<AudioStatus, ServiceError> {
        match self {
            Self::Wpctl => wpctl_status(device),
            Self::Pamixer => pamixer_status(device),
            Self::Pactl => pactl_status(device),
        }
    }

    fn set(self, device: Device, op: MixerOp) -> Result<(), ServiceError> {
        match self {
            Self::Wpctl => wpctl_set(device, op),
            Self::Pamixer => pamixer_set(device, op),
            Self::Pactl => pactl_set(device, op),
        }
    }
}

/// Perform a mixer control action on the default device, then report the
/// result with a desktop notification (`get` prints the bare percentage
/// instead).
pub fn control(device: Device, action: ControlAction) -> Result<(), ServiceError> {
    let mixer = Mixer::detect()?;

    let op = match action {
        ControlAction::Get => {
            println!("{}", mixer.status(device)?.volume_percent);
            return Ok(());
        }
        ControlAction::ToggleMute => MixerOp::ToggleMute,
        ControlAction::Raise => MixerOp::Raise,
        ControlAction::Lower => MixerOp::Lower,
    };

    mixer.set(device, op)?;
    let status = mixer.status(device)?;
    notify_result(device, op, &status);
    Ok(())
}

fn tool_exists(tool: &str) -> bool {
    Command::new(tool)
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .is_ok()
}

fn run(tool: &'static str, args: &[&str]) -> Result<String, ServiceError> {
    let output = Command::new(tool)
        .args(args)
        .output()
        .map_err(|e| ServiceError::Tool { tool, detail: e.to_string() })?;
    if !output.status.success() {
        return Err(ServiceError::Tool {
            tool,
            detail: format!("{} ({})", output.status, args.join(" ")),
        });
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

// --- wpctl ---

fn wpctl_target(device: Device) -> &'static str {
    match device {
        Device::Sink => "@DEFAULT_AUDIO_SINK@",
        Device::Source => "@DEFAULT_AUDIO_SOURCE@",
    }
}

fn wpctl_status(device: Device) -> Result<AudioStatus, ServiceError> {
    let out = run("wpctl", &["get-volume", wpctl_target(device)])?;
    parse_wpctl_volume(&out)
}

/// Parses `Volume: 0.55` / `Volume: 1.27 [MUTED]`.
fn parse_wpctl_volume(out: &str) -> Result<AudioStatus, ServiceError> {
    let rest = out
        .trim()
        .strip_prefix("Volume:")
        .ok_or_else(|| ServiceError::Malformed(format!("wpctl output: {:?}", out.trim())))?;
    let volume: f64 = rest
        .split_whitespace()
        .next()
        .and_then(|v| v.parse().ok())
        .ok_or_else(|| ServiceError::Malformed(format!("wpctl output: {:?}", out.trim())))?;
    Ok(AudioStatus {
        volume_percent: (volume * 100.0).round() as u32,
        muted: rest.contains("[MUTED]"),
    })
}

fn wpctl_set(device: Device, op: MixerOp) -> Result<(), ServiceError> {
    let target = wpctl_target(device);
    match op {
        MixerOp::ToggleMute => run("wpctl", &["set-mute", target, "toggle"]).map(drop),
        MixerOp::Raise => {
            run("wpctl", &["set-mute", target, "0"])?;
            run("wpctl", &["set-volume", target, "5%+"]).map(drop)
        }
        MixerOp::Lower => {
            run("wpctl", &["set-mute", target, "0"])?;
            run("wpctl", &["set-volume", target, "5%-"]).map(drop)
        }
    }
}

// --- pamixer ---

/// pamixer hangs while PipeWire is still starting, so make sure the
/// server answers first. A missing pactl means we cannot check; proceed.
fn ensure_server_ready() -> Result<(), ServiceError> {
    match Command::new("pactl")
        .arg("info")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
    {
        Ok(status) if status.success() => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        _ => Err(ServiceError::AudioNotReady),
    }
}

fn pamixer_args(device: Device, tail: &[&'static str]) -> Vec<&'static str> {
    let mut args = match device {
        Device::Sink => Vec::new(),
        Device::Source => vec!["--default-source"],
    };
    args.extend_from_slice(tail);
    args
}

fn pamixer_status(device: Device) -> Result<AudioStatus, ServiceError> {
    ensure_server_ready()?;
    let vol = run("pamixer", &pamixer_args(device, &["--get-volume"]))?;
    let mute = run("pamixer", &pamixer_args(device, &["--get-mute"]))?;
    let volume_percent = vol
        .trim()
        .parse()
        .map_err(|_| ServiceError::Malformed(format!("pamixer output: {:?}", vol.trim())))?;
    Ok(AudioStatus {
        volume_percent,
        muted: mute.trim() == "true",
    })
}

fn pamixer_set(device: Device, op: MixerOp) -> Result<(), ServiceError> {
    ensure_server_ready()?;
    let tail: &[&str] = match op {
        MixerOp::ToggleMute => &["--toggle-mute"],
        MixerOp::Raise => &["--increase", "5", "--unmute"],
        MixerOp::Lower => &["--decrease", "5", "--unmute"],
    };
    run("pamixer", &pamixer_args(device, tail)).map(drop)
}

// --- pactl ---

fn pactl_target(device: Device) -> &'static str {
    match device {
        Device::Sink => "@DEFAULT_SINK@",
        Device::Source => "@DEFAULT_SOURCE@",
    }
}

fn pactl_status(device: Device) -> Result<AudioStatus, ServiceError> {
    let (vol_cmd, mute_cmd) = match device {
        Device::Sink => ("get-sink-volume", "get-sink-mute"),
        Device::Source => ("get-source-volume", "get-source-mute"),
    };
    let target = pactl_target(device);
    let vol_out = run("pactl", &[vol_cmd, target])?;
    let mute_out = run("pactl", &[mute_cmd, target])?;
    Ok(AudioStatus {
        volume_percent: parse_pactl_percent(&vol_out)?,
        muted: mute_out.to_ascii_lowercase().contains("yes"),
    })
}

/// First `NN%` token in `pactl get-*-volume` output.
fn parse_pactl_percent(out: &str) -> Result<u32, ServiceError> {
    out.split_whitespace()
        .find_map(|token| token.strip_suffix('%').and_then(|n| n.parse().ok()))
        .ok_or_else(|| ServiceError::Malformed(format!("pactl volume output: {:?}", out.trim())))
}

fn pactl_set(device: Device, op: MixerOp) -> Result<(), ServiceError> {
    let (mute_cmd, vol_cmd) = match device {
        Device::Sink => ("set-sink-mute", "set-sink-volume"),
        Device::Source => ("set-source-mute", "set-source-volume"),
    };
    let target = pactl_target(device);
    match op {
        MixerOp::ToggleMute => run("pactl", &[mute_cmd, target, "toggle"]).map(drop),
        MixerOp::Raise => {
            run("pactl", &[mute_cmd, target, "0"])?;
            run("pactl", &[vol_cmd, target, "+5%"]).map(drop)
        }
        MixerOp::Lower => {
            run("pactl", &[mute_cmd, target, "0"])?;
            run("pactl", &[vol_cmd, target, "-5%"]).map(drop)
        }
    }
}

// --- notifications ---

fn notify_result(device: Device, op: MixerOp, status: &AudioStatus) {
    let volume = status.volume_percent;
    let (title, body, icon) = match (device, op) {
        (Device::Sink, MixerOp::ToggleMute) if status.muted => {
            ("Audio Muted", "Speaker: Muted".to_string(), "audio-volume-muted")
        }
        (Device::Sink, MixerOp::ToggleMute) => {
            ("Audio Unmuted", format!("Speaker: {volume}%"), "audio-volume-high")
        }
        (Device::Sink, MixerOp::Raise) => {
            ("Volume Up", format!("Speaker: {volume}%"), "audio-volume-high")
        }
        (Device::Sink, MixerOp::Lower) => {
            ("Volume Down", format!("Speaker: {volume}%"), "audio-volume-low")
        }
        (Device::Source, MixerOp::ToggleMute) if status.muted => (
            "Microphone Muted",
            "Microphone: Muted".to_string(),
            "microphone-sensitivity-muted",
        ),
        (Device::Source, MixerOp::ToggleMute) => (
            "Microphone Unmuted",
            format!("Microphone: {volume}%"),
            "microphone-sensitivity-high",
        ),
        (Device::Source, MixerOp::Raise) => (
            "Microphone Volume",
            format!("Microphone: {volume}%"),
            "microphone-sensitivity-high",
        ),
        (Device::Source, MixerOp::Lower) => (
            "Microphone Volume",
            format!("Microphone: {volume}%"),
            "microphone-sensitivity-low",
        ),
    };
    notify(title, &body, icon);
}

/// Best-effort desktop notification; replaces the previous one so rapid
/// volume keys do not stack.
fn notify(title: &str, body: &str, icon: &str) {
    let spawned = Command::new("notify-send")
        .args(["--replace-id=8888", "--app-name=Volume Control", "--urgency=normal"])
        .args(["--icon", icon])
        .args([title, body])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn();
    match spawned {
        Ok(_) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => debug!("notify-send not installed"),
        Err(e) => warn!("notify-send failed: {e}"),
    }
}
