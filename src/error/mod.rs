//! Error types for the bot.
//!
//! `AppError` is the top-level error type returned by services, the scheduler, and
//! bot handlers. Domain-specific errors live in their own modules and convert into
//! `AppError` via `#[from]`. Handlers never surface `AppError` details to Discord
//! users; they log the error and reply with a generic message instead.

pub mod birthday;
pub mod config;
pub mod game;
pub mod internal;
pub mod payload;

use thiserror::Error;

use crate::error::{
    birthday::BirthdayError, config::ConfigError, game::GameError, internal::InternalError,
    payload::PayloadError,
};

/// Top-level application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or environment variable loading.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Invalid birthday input.
    #[error(transparent)]
    BirthdayErr(#[from] BirthdayError),

    /// Treasurer game state transition rejected.
    #[error(transparent)]
    GameErr(#[from] GameError),

    /// Button payload could not be understood.
    #[error(transparent)]
    PayloadErr(#[from] PayloadError),

    /// Unexpected internal inconsistency, such as a stored ID that no longer parses.
    #[error(transparent)]
    InternalErr(#[from] InternalError),

    /// Database operation error from SeaORM.
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),

    /// HTTP client request error from reqwest.
    ///
    /// Raised when the registration spreadsheet cannot be fetched.
    #[error(transparent)]
    ReqwestErr(#[from] reqwest::Error),

    /// Discord API error from Serenity.
    ///
    /// Boxed due to large size.
    #[error(transparent)]
    DiscordErr(#[from] Box<serenity::Error>),

    /// Cron scheduler error.
    #[error(transparent)]
    SchedulerErr(#[from] tokio_cron_scheduler::JobSchedulerError),

    /// Filesystem error reading message templates or prompt images.
    #[error(transparent)]
    IoErr(#[from] std::io::Error),

    /// A Discord object the bot relies on could not be found.
    #[error("{0}")]
    NotFound(String),
}

/// Manual conversion from serenity::Error to AppError.
///
/// Boxes the error to reduce the size of the AppError enum, as serenity::Error
/// is very large and would make all AppError variants larger if not boxed.
impl From<serenity::Error> for AppError {
    fn from(err: serenity::Error) -> Self {
        AppError::DiscordErr(Box::new(err))
    }
}
