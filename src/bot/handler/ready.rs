//! Ready event handler for bot initialization.
//!
//! The ready handler is used to:
//! - Log connection information
//! - Register slash commands on the configured guild
//! - Restore auto-kick timers for members still holding the intro role

use serenity::all::{Context, GuildId, Ready};

use crate::{bot::command, service::onboarding::OnboardingService, state::BotState};

/// Handles the ready event when the bot connects to Discord.
///
/// # Arguments
/// - `state` - Shared bot state
/// - `ctx` - Discord context for API calls
/// - `ready` - Ready event data containing bot user information
pub async fn handle_ready(state: &BotState, ctx: Context, ready: Ready) {
    tracing::info!("{} is connected to Discord", ready.user.name);

    let guild_id = GuildId::new(state.config.guild_id);
    match guild_id
        .set_commands(&ctx.http, command::definitions())
        .await
    {
        Ok(commands) => tracing::info!(
            "Registered {} commands in guild {}",
            commands.len(),
            guild_id
        ),
        Err(e) => tracing::error!("Failed to register commands in guild {}: {}", guild_id, e),
    }

    let onboarding = OnboardingService::new(
        ctx.http.clone(),
        state.config.guild_id,
        state.config.roles.intro,
        state.config.kick_timeout,
    );

    match onboarding.restore_pending_kicks().await {
        Ok(count) => tracing::info!("Restored {} pending auto-kick(s)", count),
        Err(e) => tracing::error!("Failed to restore pending auto-kicks: {}", e),
    }
}
