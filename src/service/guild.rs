//! Guild lookups shared by onboarding and the birthday job.

use std::sync::Arc;

use serenity::{
    all::{EmojiId, GuildId, Member},
    http::Http,
};

use crate::error::AppError;

/// Largest page Discord returns for a guild member listing.
const MEMBER_PAGE_SIZE: u64 = 1000;

/// Fetches every member of the guild, following pagination.
///
/// Requires the `GUILD_MEMBERS` privileged intent.
///
/// # Returns
/// - `Ok(Vec<Member>)` - All guild members
/// - `Err(AppError::DiscordErr)` - A page could not be fetched
pub async fn fetch_all_members(
    http: &Arc<Http>,
    guild_id: GuildId,
) -> Result<Vec<Member>, AppError> {
    let mut members = Vec::new();
    let mut after = None;

    loop {
        let page = guild_id
            .members(http, Some(MEMBER_PAGE_SIZE), after)
            .await?;
        let fetched = page.len();
        after = page.last().map(|member| member.user.id);
        members.extend(page);

        if fetched < MEMBER_PAGE_SIZE as usize {
            tracing::debug!("Fetched {} members for guild {}", members.len(), guild_id);
            return Ok(members);
        }
    }
}

/// Renders a custom guild emoji, or `fallback` when it is unset or cannot be fetched.
pub async fn emoji_or(
    http: &Arc<Http>,
    guild_id: GuildId,
    emoji_id: Option<u64>,
    fallback: &str,
) -> String {
    let Some(emoji_id) = emoji_id else {
        return fallback.to_string();
    };

    match guild_id.emoji(http, EmojiId::new(emoji_id)).await {
        Ok(emoji) => emoji.to_string(),
        Err(e) => {
            tracing::warn!("Failed to fetch emoji {}: {}", emoji_id, e);
            fallback.to_string()
        }
    }
}
