use chrono::{DateTime, Utc};
use log::{debug, warn};

use crate::config::{Config, PomodoroConfig};
use crate::icons;
use crate::output::ModuleOutput;
use crate::services::pomodoro::{Phase, TimerFiles, TimerState};

/// One poll: consume a pending click command, advance expired phases,
/// persist whatever changed and render the result.
pub fn output() -> ModuleOutput {
    let config = Config::load().pomodoro;
    let files = TimerFiles::default();
    let now = Utc::now();
    let mut state = files.load();

    if let Some(action) = files.take_command() {
        if config.enabled {
            state.apply(action, now, &config);
            persist(&files, &state);
        } else {
            debug!("ignoring {action:?} while the timer is disabled");
        }
    }
    if state.advance(now, &config) {
        persist(&files, &state);
    }

    render(&state, now, &config)
}

fn persist(files: &TimerFiles, state: &TimerState) {
    if let Err(e) = files.save(state) {
        warn!("cannot persist timer state: {e}");
    }
}

fn render(state: &TimerState, now: DateTime<Utc>, config: &PomodoroConfig) -> ModuleOutput {
    if !config.enabled {
        return ModuleOutput {
            text: format!("{} --:--", icons::TIMER_IDLE),
            tooltip: "Pomodoro Timer - Disabled".into(),
            class: "disabled".into(),
            percentage: Some(0),
            alt: None,
        };
    }

    match state.mode {
        Phase::Idle => ModuleOutput {
            text: format!("{} {:02}:00", icons::TIMER_IDLE, config.work_minutes),
            tooltip: "Pomodoro Timer - Click to start".into(),
            class: "idle".into(),
            percentage: Some(0),
            alt: None,
        },
        Phase::BreakComplete => ModuleOutput {
            text: format!("{} Ready", icons::TIMER_IDLE),
            tooltip: "Break over! Click to start next session".into(),
            class: "break_complete".into(),
            percentage: Some(0),
            alt: None,
        },
        Phase::Work | Phase::Break => {
            let remaining = state.remaining_seconds(now).round().max(0.0) as u64;
            let (minutes, seconds) = (remaining / 60, remaining % 60);

            let (icon, label) = if !state.running {
                (icons::TIMER_PAUSED, "Paused")
            } else if state.mode == Phase::Break {
                (icons::TIMER_BREAK, "Break")
            } else {
                (icons::TIMER_RUNNING, "Work")
            };
            let class = if state.running { state.mode.class() } else { "paused" };

            let total = state.total_seconds(config);
            let progress = if total > 0.0 {
                (100.0 - (remaining as f64 / total) * 100.0).clamp(0.0, 100.0)
            } else {
                0.0
            };

            ModuleOutput {
                text: format!("{icon} {minutes:02}:{seconds:02}"),
                tooltip: format!("{label} - {minutes:02}:{seconds:02} remaining"),
                class: class.into(),
                percentage: Some(progress.round() as u8),
                alt: None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::pomodoro::Action;
    use chrono::{Duration, TimeZone};

    fn config() -> PomodoroConfig {
        PomodoroConfig::default()
    }

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn idle_shows_the_configured_session_length() {
        let out = render(&TimerState::default(), noon(), &config());
        assert_eq!(out.text, format!("{} 25:00", icons::TIMER_IDLE));
        assert_eq!(out.class, "idle");
        assert_eq!(out.percentage, Some(0));
    }

    #[test]
    fn running_work_counts_down() {
        let mut state = TimerState::default();
        state.apply(Action::Toggle, noon(), &config());

        let out = render(&state, noon() + Duration::seconds(5 * 60), &config());
        assert_eq!(out.text, format!("{} 20:00", icons::TIMER_RUNNING));
        assert_eq!(out.tooltip, "Work - 20:00 remaining");
        assert_eq!(out.class, "work");
        assert_eq!(out.percentage, Some(20));
    }

    #[test]
    fn paused_work_freezes_the_display() {
        let mut state = TimerState::default();
        state.apply(Action::Toggle, noon(), &config());
        state.apply(Action::Toggle, noon() + Duration::minutes(10), &config());

        let out = render(&state, noon() + Duration::hours(1), &config());
        assert_eq!(out.text, format!("{} 15:00", icons::TIMER_PAUSED));
        assert_eq!(out.tooltip, "Paused - 15:00 remaining");
        assert_eq!(out.class, "paused");
    }

    #[test]
    fn breaks_get_their_own_icon_and_class() {
        let state = TimerState {
            mode: Phase::Break,
            running: true,
            end_time: Some(noon() + Duration::minutes(4)),
            paused_remaining: None,
        };
        let out = render(&state, noon(), &config());
        assert_eq!(out.text, format!("{} 04:00", icons::TIMER_BREAK));
        assert_eq!(out.class, "break");
        assert_eq!(out.percentage, Some(20));
    }

    #[test]
    fn break_complete_waits_for_a_click() {
        let state = TimerState {
            mode: Phase::BreakComplete,
            ..TimerState::default()
        };
        let out = render(&state, noon(), &config());
        assert_eq!(out.text, format!("{} Ready", icons::TIMER_IDLE));
        assert_eq!(out.class, "break_complete");
    }

    #[test]
    fn disabled_timer_overrides_everything() {
        let mut state = TimerState::default();
        state.apply(Action::Toggle, noon(), &config());

        let disabled = PomodoroConfig { enabled: false, ..config() };
        let out = render(&state, noon(), &disabled);
        assert_eq!(out.text, format!("{} --:--", icons::TIMER_IDLE));
        assert_eq!(out.class, "disabled");
    }

    #[test]
    fn custom_session_length_shows_in_idle_text() {
        let custom = PomodoroConfig { work_minutes: 50, ..config() };
        let out = render(&TimerState::default(), noon(), &custom);
        assert_eq!(out.text, format!("{} 50:00", icons::TIMER_IDLE));
    }
}
