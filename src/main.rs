mod bot;
mod config;
mod data;
mod error;
mod model;
mod scheduler;
mod service;
mod startup;
mod state;
mod util;

use std::sync::Arc;

use crate::{
    config::Config,
    error::AppError,
    scheduler::birthday_announcements,
    service::game::{prompts::treasurer_prompts, GameSessions},
    state::BotState,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    startup::init_tracing();

    let config = Arc::new(Config::from_env()?);

    let db = startup::connect_to_database(&config).await?;
    let games = GameSessions::new(treasurer_prompts());
    let registration = startup::setup_registration_sheet(&config);

    let state = BotState::new(db.clone(), config.clone(), games, registration);
    let (bot_client, discord_http) = bot::start::init_bot(state).await?;

    // Start birthday announcement scheduler
    let scheduler_config = config.clone();
    tokio::spawn(async move {
        if let Err(e) =
            birthday_announcements::start_scheduler(db, discord_http, scheduler_config).await
        {
            tracing::error!("Birthday announcement scheduler error: {}", e);
        }
    });

    bot::start::start_bot(bot_client).await
}
