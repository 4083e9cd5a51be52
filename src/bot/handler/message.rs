use serenity::all::{ChannelId, Context, Message};

use crate::{
    service::{
        registration::SHEETS_HOME,
        verification::{build_verification_request, find_registration, IntroAuthor},
    },
    state::BotState,
};

/// Handle message creation in a channel
///
/// Intro channel posts are forwarded to the verification channel, enriched with
/// the author's registration form response when one is found.
pub async fn handle_message(state: &BotState, ctx: Context, message: Message) {
    // Only intros in the configured guild
    if message.guild_id.map(|id| id.get()) != Some(state.config.guild_id) {
        return;
    }
    if message.channel_id.get() != state.config.channels.intro || message.author.bot {
        return;
    }

    let author = IntroAuthor {
        user_id: message.author.id.get(),
        username: message.author.name.clone(),
        display_name: message.author.display_name().to_string(),
        avatar_url: message.author.face(),
    };

    let (rows, sheet_url) = match &state.registration {
        Some(sheet) => match sheet.fetch_rows().await {
            Ok(rows) => (rows, sheet.url()),
            Err(e) => {
                tracing::warn!("Failed to fetch registration spreadsheet: {}", e);
                (Vec::new(), sheet.url())
            }
        },
        None => (Vec::new(), SHEETS_HOME.to_string()),
    };

    let registration = find_registration(&rows, &author.username, &sheet_url);
    if registration.is_none() {
        tracing::debug!("No registration found for {}", author.username);
    }

    let request = build_verification_request(
        &author,
        &message.content,
        registration.as_ref(),
        &sheet_url,
        state.config.roles.it_manager,
    );

    let channel_id = ChannelId::new(state.config.channels.verification);
    match channel_id.send_message(&ctx.http, request).await {
        Ok(_) => tracing::info!("Posted verification request for {}", author.username),
        Err(e) => tracing::error!(
            "Failed to post verification request for {}: {}",
            author.username,
            e
        ),
    }
}
