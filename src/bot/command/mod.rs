//! Slash command registration and dispatch.
//!
//! Commands are registered statically on the configured guild when the bot becomes
//! ready. Each command returns `Ok(true)` once it has replied, `Ok(false)` when the
//! invocation was not valid (nothing has been sent yet), or an error. Dispatch turns
//! the last two into ephemeral replies, so a command that defers its response
//! reports its own failures with [`edit_failure`] and returns `Ok(true)`.

pub mod birthday;
pub mod treasurer;

use serenity::all::{
    Colour, CommandInteraction, Context, CreateCommand, CreateEmbed, CreateInteractionResponse,
    CreateInteractionResponseMessage, EditInteractionResponse,
};

use crate::state::BotState;

pub const SUCCESS_COLOUR: Colour = Colour(0xE67E22);
pub const FAILURE_COLOUR: Colour = Colour(0xED4245);

const USAGE_HINT: &str = "Please check the command descriptions for proper usage.";
pub(crate) const EXECUTION_FAILED: &str =
    "Something went wrong while trying to execute this command.";

/// Every slash command the bot registers.
pub fn definitions() -> Vec<CreateCommand> {
    vec![birthday::definition(), treasurer::definition()]
}

/// Text shown when Discord sends a command the bot does not know.
pub fn unknown_command_message(name: &str) -> String {
    format!("There were no command matching {} found.", name)
}

/// Runs a slash command and reports failures to the invoking user.
pub async fn handle_command(state: &BotState, ctx: &Context, command: &CommandInteraction) {
    let name = command.data.name.as_str();

    let result = match name {
        birthday::NAME => birthday::execute(state, ctx, command).await,
        treasurer::NAME => treasurer::execute(state, ctx, command).await,
        _ => {
            tracing::warn!("Received unknown command {}", name);
            reply_failure(ctx, command, unknown_command_message(name)).await;
            return;
        }
    };

    match result {
        Ok(true) => {}
        Ok(false) => {
            tracing::debug!("Command {} rejected its input", name);
            reply_failure(ctx, command, USAGE_HINT).await;
        }
        Err(e) => {
            tracing::error!("Command {} failed: {}", name, e);
            reply_failure(ctx, command, EXECUTION_FAILED).await;
        }
    }
}

/// Replies with a single embed.
pub async fn reply_embed(
    ctx: &Context,
    command: &CommandInteraction,
    embed: CreateEmbed,
    ephemeral: bool,
) -> Result<(), serenity::Error> {
    command
        .create_response(
            &ctx.http,
            CreateInteractionResponse::Message(
                CreateInteractionResponseMessage::new()
                    .embed(embed)
                    .ephemeral(ephemeral),
            ),
        )
        .await
}

pub fn failure_embed(text: impl Into<String>) -> CreateEmbed {
    CreateEmbed::new().colour(FAILURE_COLOUR).description(text)
}

/// Ephemeral red embed as the first response; delivery errors are logged only.
pub async fn reply_failure(ctx: &Context, command: &CommandInteraction, text: impl Into<String>) {
    if let Err(e) = reply_embed(ctx, command, failure_embed(text), true).await {
        tracing::error!("Failed to reply to command {}: {}", command.data.name, e);
    }
}

/// Replaces a deferred response with a red embed; delivery errors are logged only.
pub async fn edit_failure(ctx: &Context, command: &CommandInteraction, text: impl Into<String>) {
    let response = EditInteractionResponse::new().embed(failure_embed(text));

    if let Err(e) = command.edit_response(&ctx.http, response).await {
        tracing::error!(
            "Failed to report failure of deferred command {}: {}",
            command.data.name,
            e
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registers_both_commands() {
        let names: Vec<String> = definitions()
            .iter()
            .map(|command| {
                serde_json::to_value(command).unwrap()["name"]
                    .as_str()
                    .unwrap()
                    .to_string()
            })
            .collect();

        assert_eq!(names, vec![birthday::NAME, treasurer::NAME]);
    }

    #[test]
    fn failure_embed_is_red() {
        let json = serde_json::to_value(failure_embed(EXECUTION_FAILED)).unwrap();

        assert_eq!(json["color"], FAILURE_COLOUR.0);
        assert_eq!(json["description"], EXECUTION_FAILED);
    }

    #[test]
    fn names_unknown_command() {
        assert_eq!(
            unknown_command_message("ping"),
            "There were no command matching ping found."
        );
    }
}
