//! Pomodoro error types

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PomodoroError {
    #[error("Timer already running ({remaining} seconds left)")]
    AlreadyRunning { remaining: u32 },

    #[error("Focus time must be between {min} and {max} minutes, got {minutes}")]
    InvalidDuration { minutes: u32, min: u32, max: u32 },
}
