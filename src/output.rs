//! The Waybar custom-module output object.
//!
//! Waybar runs a module subcommand on its polling interval and parses one
//! JSON line from stdout. `text`, `tooltip` and `class` are the minimum
//! contract; `percentage` feeds CSS meter styling and `alt` the
//! `format-alt` placeholder. Exit codes and stderr are not inspected, so
//! every error path must still produce a well-formed line.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModuleOutput {
    pub text: String,
    pub tooltip: String,
    pub class: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percentage: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

impl ModuleOutput {
    /// The fixed error shape: dashes for the value, critical class, zero
    /// percentage.
    pub fn fallback(icon: &str, tooltip: impl Into<String>) -> Self {
        Self {
            text: format!("-- {icon}"),
            tooltip: tooltip.into(),
            class: "critical".into(),
            percentage: Some(0),
            alt: None,
        }
    }

    /// Write the module line to stdout.
    pub fn print(&self) {
        match serde_json::to_string(self) {
            Ok(line) => println!("{line}"),
            Err(e) => {
                log::error!("cannot encode module output: {e}");
                println!(r#"{{"text":"--","tooltip":"encode error","class":"critical"}}"#);
            }
        }
    }
}

/// Map a meter value onto the `normal`/`warning`/`critical` CSS classes.
pub fn usage_class(value: f64, warning: f64, critical: f64) -> &'static str {
    if value >= critical {
        "critical"
    } else if value >= warning {
        "warning"
    } else {
        "normal"
    }
}
