//! Pomodoro timer state machine

use serde::{Deserialize, Serialize};

use tabkeep_storage::{keys, SharedStore, StoreExt};

use crate::error::PomodoroError;
use crate::Result;

pub const MIN_MINUTES: u32 = 1;
pub const MAX_MINUTES: u32 = 120;
pub const DEFAULT_MINUTES: u32 = 25;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PomodoroState {
    Idle,
    Running,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing is running
    Idle,
    Running { remaining: u32 },
    /// The countdown reached zero on this tick; the timer is idle again
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Started { seconds: u32 },
    Stopped,
    /// The prompt was dismissed
    Cancelled,
}

pub struct PomodoroTimer {
    state: PomodoroState,
    /// Only meaningful while running
    remaining_seconds: u32,
    store: SharedStore,
}

impl PomodoroTimer {
    /// Load persisted state. A running timer with time left resumes.
    pub fn load(store: SharedStore) -> Self {
        let mut state = store.get(keys::POMODORO_STATE, PomodoroState::Idle);
        let mut remaining_seconds: u32 = store.get(keys::POMODORO_TIME, 0);

        if state == PomodoroState::Idle || remaining_seconds == 0 {
            state = PomodoroState::Idle;
            remaining_seconds = 0;
        } else {
            tracing::info!(remaining_seconds, "Resuming focus timer");
        }

        Self {
            state,
            remaining_seconds,
            store,
        }
    }

    /// Start a countdown of `minutes`. Returns the scheduled seconds.
    pub fn start(&mut self, minutes: u32) -> Result<u32> {
        if self.is_running() {
            return Err(PomodoroError::AlreadyRunning {
                remaining: self.remaining_seconds,
            });
        }

        if !(MIN_MINUTES..=MAX_MINUTES).contains(&minutes) {
            return Err(PomodoroError::InvalidDuration {
                minutes,
                min: MIN_MINUTES,
                max: MAX_MINUTES,
            });
        }

        self.state = PomodoroState::Running;
        self.remaining_seconds = minutes * 60;
        tracing::info!(minutes, "Focus timer started");
        self.save();

        Ok(self.remaining_seconds)
    }

    /// Returns false if nothing was running
    pub fn stop(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }

        self.state = PomodoroState::Idle;
        self.remaining_seconds = 0;
        tracing::info!("Focus timer stopped");
        self.save();
        true
    }

    /// One-second tick
    pub fn tick(&mut self) -> TickOutcome {
        if !self.is_running() {
            return TickOutcome::Idle;
        }

        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if self.remaining_seconds > 0 {
            return TickOutcome::Running {
                remaining: self.remaining_seconds,
            };
        }

        self.state = PomodoroState::Idle;
        tracing::info!("Focus timer completed");
        self.save();
        TickOutcome::Completed
    }

    /// Stop a running timer, or ask for a duration and start one.
    /// `ask` receives `(default, min, max)` minutes.
    pub fn toggle<F>(&mut self, ask: F) -> Result<ToggleOutcome>
    where
        F: FnOnce(u32, u32, u32) -> Option<u32>,
    {
        if self.stop() {
            return Ok(ToggleOutcome::Stopped);
        }

        match ask(DEFAULT_MINUTES, MIN_MINUTES, MAX_MINUTES) {
            Some(minutes) => {
                let seconds = self.start(minutes)?;
                Ok(ToggleOutcome::Started { seconds })
            }
            None => Ok(ToggleOutcome::Cancelled),
        }
    }

    pub fn state(&self) -> PomodoroState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == PomodoroState::Running
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    /// `MM:SS` of the remaining time
    pub fn display(&self) -> String {
        format!(
            "{:02}:{:02}",
            self.remaining_seconds / 60,
            self.remaining_seconds % 60
        )
    }

    /// Write state and remaining time. Failures are logged only.
    pub fn save(&self) {
        let result = self
            .store
            .set(keys::POMODORO_STATE, &self.state)
            .and_then(|_| self.store.set(keys::POMODORO_TIME, &self.remaining_seconds));

        if let Err(e) = result {
            tracing::warn!(error = %e, "Failed to persist focus timer");
        }
    }
}
