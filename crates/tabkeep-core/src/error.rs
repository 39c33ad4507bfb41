//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Storage error: {0}")]
    Storage(#[from] tabkeep_storage::StorageError),

    #[error("Navigation error: {0}")]
    Navigation(#[from] tabkeep_navigation::NavigationError),

    #[error("Session error: {0}")]
    Session(#[from] tabkeep_session::SessionError),

    #[error("Tab error: {0}")]
    Tab(#[from] tabkeep_tabs::TabError),

    #[error("Pomodoro error: {0}")]
    Pomodoro(#[from] tabkeep_pomodoro::PomodoroError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Browser not initialized")]
    NotInitialized,
}
