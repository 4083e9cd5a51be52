//! Interaction event handler.
//!
//! Slash commands go to the command dispatcher. Button clicks carry a payload
//! parsed into a [`ButtonAction`]; verification buttons are only honoured in the
//! verification channel.

use serenity::all::{
    Colour, ComponentInteraction, Context, CreateEmbed, CreateInteractionResponse,
    CreateInteractionResponseMessage, EditMessage, GuildId, Interaction, UserId,
};

use crate::{
    bot::command::{self, treasurer},
    error::AppError,
    model::interaction::ButtonAction,
    service::verification::{VerificationService, REJECTED_COLOUR, VERIFIED_COLOUR},
    state::BotState,
};

const UNKNOWN_BUTTON: &str = "This button is no longer valid.";
const MEMBER_NOT_FOUND: &str = "The member could not be found.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Decision {
    Verify,
    Reject,
}

impl Decision {
    fn colour(self) -> Colour {
        match self {
            Decision::Verify => VERIFIED_COLOUR,
            Decision::Reject => REJECTED_COLOUR,
        }
    }

    fn feedback(self, name: &str) -> String {
        match self {
            Decision::Verify => format!("Successfully verified {}.", name),
            Decision::Reject => format!("Successfully rejected {}.", name),
        }
    }
}

/// Handles slash commands and button clicks.
pub async fn handle_interaction(state: &BotState, ctx: Context, interaction: Interaction) {
    match interaction {
        Interaction::Command(command) => command::handle_command(state, &ctx, &command).await,
        Interaction::Component(component) => handle_component(state, &ctx, &component).await,
        _ => {}
    }
}

async fn handle_component(state: &BotState, ctx: &Context, component: &ComponentInteraction) {
    let action = match component.data.custom_id.parse::<ButtonAction>() {
        Ok(action) => action,
        Err(e) => {
            tracing::warn!("Received unusable button payload: {}", e);
            reply_ephemeral(ctx, component, UNKNOWN_BUTTON).await;
            return;
        }
    };

    match action {
        ButtonAction::Verify(member_id) => {
            handle_decision(state, ctx, component, member_id, Decision::Verify).await
        }
        ButtonAction::Reject(member_id) => {
            handle_decision(state, ctx, component, member_id, Decision::Reject).await
        }
        ButtonAction::Answer {
            choice,
            group,
            prompt_index,
        } => treasurer::handle_answer(state, ctx, component, group, prompt_index, choice).await,
    }
}

async fn handle_decision(
    state: &BotState,
    ctx: &Context,
    component: &ComponentInteraction,
    member_id: u64,
    decision: Decision,
) {
    if component.channel_id.get() != state.config.channels.verification {
        return;
    }

    if let Err(e) = apply_decision(state, ctx, component, member_id, decision).await {
        tracing::error!("Failed to {:?} member {}: {}", decision, member_id, e);
    }
}

async fn apply_decision(
    state: &BotState,
    ctx: &Context,
    component: &ComponentInteraction,
    member_id: u64,
    decision: Decision,
) -> Result<(), AppError> {
    let member_id = UserId::new(member_id);
    let member = match GuildId::new(state.config.guild_id)
        .member(&ctx.http, member_id)
        .await
    {
        Ok(member) => member,
        Err(e) => {
            tracing::debug!("Member {} not found: {}", member_id, e);
            reply_ephemeral(ctx, component, MEMBER_NOT_FOUND).await;
            return Ok(());
        }
    };

    let service = VerificationService::new(&ctx.http, state.config.guild_id, &state.config.roles);
    match decision {
        Decision::Verify => service.verify(member_id).await?,
        Decision::Reject => service.reject(member_id).await?,
    }

    reply_ephemeral(ctx, component, decision.feedback(member.user.display_name())).await;

    let embeds = component
        .message
        .embeds
        .iter()
        .take(1)
        .cloned()
        .map(|embed| CreateEmbed::from(embed).colour(decision.colour()))
        .collect();

    component
        .channel_id
        .edit_message(
            &ctx.http,
            component.message.id,
            EditMessage::new().embeds(embeds).components(vec![]),
        )
        .await?;

    Ok(())
}

async fn reply_ephemeral(ctx: &Context, component: &ComponentInteraction, text: impl Into<String>) {
    let response = CreateInteractionResponse::Message(
        CreateInteractionResponseMessage::new()
            .content(text)
            .ephemeral(true),
    );

    if let Err(e) = component.create_response(&ctx.http, response).await {
        tracing::error!("Failed to reply to button {}: {}", component.data.custom_id, e);
    }
}
