use serenity::all::{Context, Member};

use crate::{service::onboarding::OnboardingService, state::BotState};

/// Handles the guild_member_addition event when a member joins the guild
///
/// Gives the member the intro role and starts their auto-kick timer.
pub async fn handle_guild_member_addition(state: &BotState, ctx: Context, new_member: Member) {
    if new_member.guild_id.get() != state.config.guild_id {
        return;
    }

    if new_member.user.bot {
        return;
    }

    tracing::info!(
        "Member {} ({}) joined guild {}",
        new_member.user.name,
        new_member.user.id,
        new_member.guild_id
    );

    let onboarding = OnboardingService::new(
        ctx.http.clone(),
        state.config.guild_id,
        state.config.roles.intro,
        state.config.kick_timeout,
    );

    onboarding.welcome(new_member.user.id).await;
}
