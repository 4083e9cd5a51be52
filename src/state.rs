//! Shared state handed to every event handler.
//!
//! All fields are cheap to clone: the database connection is a pool, the config
//! sits behind an `Arc`, and `GameSessions` shares one session map across clones.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::{
    config::Config,
    service::{game::GameSessions, registration::RegistrationSheet},
};

#[derive(Clone)]
pub struct BotState {
    pub db: DatabaseConnection,
    pub config: Arc<Config>,
    /// Treasurer game sessions, one per group.
    pub games: GameSessions,
    /// `None` when no registration spreadsheet is configured.
    pub registration: Option<RegistrationSheet>,
}

impl BotState {
    pub fn new(
        db: DatabaseConnection,
        config: Arc<Config>,
        games: GameSessions,
        registration: Option<RegistrationSheet>,
    ) -> Self {
        Self {
            db,
            config,
            games,
            registration,
        }
    }
}
