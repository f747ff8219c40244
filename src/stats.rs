use crate::models::{Task, TaskStats};
use chrono::{Local, NaiveTime, Timelike};

const SESSION_START_HOUR: u32 = 8;
const SESSION_END_HOUR: u32 = 18;
const XP_PER_TASK: u64 = 10;
const XP_PER_LEVEL: u64 = 100;

impl TaskStats {
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let total = tasks.len() as u64;
        let completed = tasks.iter().filter(|task| task.done).count() as u64;
        // Integer form of round(completed / total * 100), halves rounding up.
        let completion_rate = if total == 0 {
            0
        } else {
            (completed * 100 + total / 2) / total
        };
        let xp = completed * XP_PER_TASK;

        Self {
            completed,
            total,
            completion_rate,
            xp,
            level: xp / XP_PER_LEVEL + 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Before,
    During,
    After,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayProgress {
    pub status: SessionStatus,
    pub percentage: f64,
    /// Minutes until the session starts (`Before`) or ends (`During`).
    pub minutes_remaining: u32,
    pub phase: &'static str,
    /// Wall-clock time shown beside the bar, `HH:MM`.
    pub clock: String,
}

pub fn day_progress() -> DayProgress {
    day_progress_at(Local::now().time())
}

pub fn day_progress_at(time: NaiveTime) -> DayProgress {
    let start = SESSION_START_HOUR * 60;
    let end = SESSION_END_HOUR * 60;
    let now = time.hour() * 60 + time.minute();
    let clock = time.format("%H:%M").to_string();

    if now < start {
        return DayProgress {
            status: SessionStatus::Before,
            percentage: 0.0,
            minutes_remaining: start - now,
            phase: "Pre-Game",
            clock,
        };
    }
    if now > end {
        return DayProgress {
            status: SessionStatus::After,
            percentage: 100.0,
            minutes_remaining: 0,
            phase: "Complete",
            clock,
        };
    }

    let elapsed = now - start;
    let percentage = f64::from(elapsed) / f64::from(end - start) * 100.0;
    let phase = if percentage > 75.0 {
        "Final Sprint"
    } else if percentage > 50.0 {
        "Mid Game"
    } else if percentage > 25.0 {
        "Morning"
    } else {
        "Early Game"
    };

    DayProgress {
        status: SessionStatus::During,
        percentage: percentage.min(100.0),
        minutes_remaining: end - now,
        phase,
        clock,
    }
}

pub fn format_minutes(minutes: u32) -> String {
    let hours = minutes / 60;
    let mins = minutes % 60;
    if hours > 0 {
        format!("{hours}h {mins}m")
    } else {
        format!("{mins}m")
    }
}

pub fn motivational_message(progress: &DayProgress, stats: &TaskStats) -> &'static str {
    let rate = stats.completion_rate;
    match progress.status {
        SessionStatus::Before => "Game starts soon! Prepare your quests!",
        SessionStatus::After => match rate {
            80.. => "Legendary! Tomorrow's player will be grateful!",
            60.. => "Solid work! You've set up tomorrow well!",
            40.. => "Good effort! Tomorrow has a fair start!",
            _ => "Tomorrow needs your help! Every quest matters!",
        },
        SessionStatus::During => match rate {
            80.. => "Crushing it! Keep the momentum!",
            60.. => "Great progress! Making tomorrow easier!",
            40.. => "Good start! Push forward!",
            _ if stats.total == 0 => "Add your first quest to begin!",
            _ => "Time to level up! Complete quests!",
        },
    }
}

/// What tomorrow's player has to say about today's progress.
pub fn tomorrow_note(stats: &TaskStats) -> &'static str {
    match stats.completion_rate {
        70.. => "Amazing work! You've set me up for success!",
        40.. => "Thanks for the solid progress!",
        _ => "I believe in you! Every quest matters!",
    }
}
