//! tabkeep Pomodoro
//!
//! A focus timer independent of tabs:
//! ```text
//! Idle --start(minutes)--> Running --tick x N--> Idle (completed)
//!                          Running --stop-----> Idle
//! ```

mod error;
mod timer;

pub use error::PomodoroError;
pub use timer::{
    PomodoroState, PomodoroTimer, TickOutcome, ToggleOutcome, DEFAULT_MINUTES, MAX_MINUTES,
    MIN_MINUTES,
};

pub type Result<T> = std::result::Result<T, PomodoroError>;
