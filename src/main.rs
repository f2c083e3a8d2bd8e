//! Waybar status modules as one multi-call binary.
//!
//! Waybar polls `waystatus <module>` on its own interval; every run reads
//! system state, prints a single JSON line on stdout and exits. Click and
//! scroll handlers are subcommands of the same binary, so the suite needs
//! no helper scripts. Logging goes to stderr, which the bar ignores.

mod config;
mod icons;
mod modules;
mod output;
mod services;

use std::env;
use std::process::ExitCode;

use services::audio::{self, ControlAction, Device};
use services::pomodoro::{Action, TimerFiles};

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let mut args = args.iter().map(String::as_str);

    match (args.next(), args.next()) {
        (Some("memory"), None) => emit(modules::memory::output()),
        (Some("cpu"), None) => emit(modules::cpu::output()),
        (Some("temperature"), None) => emit(modules::temperature::output()),
        (Some("volume"), None) => emit(modules::volume::output()),
        (Some("volume"), Some(action)) => control(Device::Sink, action),
        (Some("mic"), None) => emit(modules::mic::output()),
        (Some("mic"), Some(action)) => control(Device::Source, action),
        (Some("pomodoro"), None) => emit(modules::pomodoro::output()),
        (Some("pomodoro"), Some(action)) => pomodoro_command(action),
        _ => usage(),
    }
}

fn emit(out: output::ModuleOutput) -> ExitCode {
    out.print();
    ExitCode::SUCCESS
}

fn control(device: Device, action: &str) -> ExitCode {
    let Some(action) = ControlAction::from_arg(action) else {
        return usage();
    };
    match audio::control(device, action) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn pomodoro_command(action: &str) -> ExitCode {
    let action = match action {
        "toggle" => Action::Toggle,
        "reset" => Action::Reset,
        _ => return usage(),
    };
    match TimerFiles::default().post_command(action) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn usage() -> ExitCode {
    eprintln!("Usage: waystatus <memory|cpu|temperature|volume|mic|pomodoro>");
    eprintln!("       waystatus volume <toggle|up|down|get>");
    eprintln!("       waystatus mic <toggle|up|down|get>");
    eprintln!("       waystatus pomodoro <toggle|reset>");
    ExitCode::from(2)
}
