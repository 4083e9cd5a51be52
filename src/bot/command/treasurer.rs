//! `/treasurer group:<group>` and the prompt rounds behind its buttons.
//!
//! A game lives in a private thread under the event channel. Every round posts one
//! prompt with three answer buttons; the click handler scores the answer, strips
//! the buttons and posts the next round. Whenever a round cannot be delivered the
//! group's session is released so the group can start over.

use serenity::all::{
    AutoArchiveDuration, ButtonStyle, ChannelId, ChannelType, CommandInteraction,
    CommandOptionType, ComponentInteraction, Context, CreateActionRow, CreateAttachment,
    CreateButton, CreateCommand, CreateCommandOption, CreateInteractionResponse,
    CreateInteractionResponseMessage, CreateMessage, CreateThread, EditInteractionResponse,
    EditMessage, EditThread, ResolvedValue,
};

use super::{edit_failure, EXECUTION_FAILED};
use crate::{
    error::{game::GameError, AppError},
    model::{
        game::{Group, Verdict},
        interaction::ButtonAction,
    },
    service::game::{AnswerOutcome, GameStep},
    state::BotState,
};

pub const NAME: &str = "treasurer";

const GAME_ENDED: &str =
    "The game ended unexpectedly. Please run `/treasurer` again to start a new game.";

pub fn definition() -> CreateCommand {
    let group_option = Group::ALL.into_iter().fold(
        CreateCommandOption::new(
            CommandOptionType::String,
            "group",
            "The group to start the game for",
        )
        .required(true),
        |option, group| option.add_string_choice(group.display_name(), group.value()),
    );

    CreateCommand::new(NAME)
        .description("Start a treasurer game for the event")
        .add_option(group_option)
}

pub fn game_started_message(thread_id: ChannelId) -> String {
    format!("Your game has started in <#{}>.", thread_id)
}

pub fn thread_name(group: Group) -> String {
    format!("{}'s game", group)
}

fn button_label(choice: Verdict) -> (&'static str, ButtonStyle) {
    match choice {
        Verdict::Accepted => ("Accept", ButtonStyle::Success),
        Verdict::NeedsRevision => ("Needs Revision", ButtonStyle::Secondary),
        Verdict::Rejected => ("Reject", ButtonStyle::Danger),
    }
}

/// One button per verdict, carrying the group and prompt index.
pub fn prompt_buttons(group: Group, prompt_index: usize) -> CreateActionRow {
    CreateActionRow::Buttons(
        Verdict::ALL
            .into_iter()
            .map(|choice| {
                let (label, style) = button_label(choice);
                let action = ButtonAction::Answer {
                    choice,
                    group,
                    prompt_index,
                };

                CreateButton::new(action.custom_id()).label(label).style(style)
            })
            .collect(),
    )
}

pub fn answer_feedback(outcome: &AnswerOutcome) -> String {
    if outcome.correct {
        format!("Correct! The answer was **{}**.", outcome.expected.label())
    } else {
        format!(
            "Incorrect! The correct answer was **{}**.",
            outcome.expected.label()
        )
    }
}

pub fn game_over_message(correct: u32, points: u32) -> String {
    format!(
        "Game over! You have completed all the prompts. You got **{} correct answers**, earning **{} point{}**.",
        correct,
        points,
        if points == 1 { "" } else { "s" }
    )
}

/// Ephemeral text for a click the session refused.
pub fn refused_answer_message(error: &GameError) -> &'static str {
    match error {
        GameError::StalePrompt { .. } => "This prompt has already been answered.",
        _ => "This game is no longer running.",
    }
}

pub async fn execute(
    state: &BotState,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<bool, AppError> {
    if command.channel_id.get() != state.config.channels.event {
        return Ok(false);
    }

    let Some(group) = command
        .data
        .options()
        .into_iter()
        .find_map(|option| match (option.name, option.value) {
            ("group", ResolvedValue::String(value)) => value.parse::<Group>().ok(),
            _ => None,
        })
    else {
        return Ok(false);
    };

    if let Err(e) = state.games.start(group, command.user.id.get()) {
        tracing::debug!("Refused to start treasurer game: {}", e);
        return Ok(false);
    }

    // Thread creation and the receipt upload can outlast the initial response window
    if let Err(e) = command.defer_ephemeral(&ctx.http).await {
        state.games.release(group);
        return Err(e.into());
    }

    tracing::info!("{} started a treasurer game for {}", command.user.id, group);

    let thread_id = match start_game(state, ctx, command, group).await {
        Ok(thread_id) => thread_id,
        Err(e) => {
            tracing::error!("Failed to start treasurer game for {}: {}", group, e);
            state.games.release(group);
            edit_failure(ctx, command, EXECUTION_FAILED).await;
            return Ok(true);
        }
    };

    // Prompt 0 is already live; a lost confirmation does not end the game
    if let Err(e) = command
        .edit_response(
            &ctx.http,
            EditInteractionResponse::new().content(game_started_message(thread_id)),
        )
        .await
    {
        tracing::warn!("Failed to confirm treasurer game for {}: {}", group, e);
    }

    Ok(true)
}

/// Opens the group's thread and posts the first prompt.
async fn start_game(
    state: &BotState,
    ctx: &Context,
    command: &CommandInteraction,
    group: Group,
) -> Result<ChannelId, AppError> {
    let thread = command
        .channel_id
        .create_thread(
            &ctx.http,
            CreateThread::new(thread_name(group))
                .kind(ChannelType::PrivateThread)
                .invitable(false)
                .auto_archive_duration(AutoArchiveDuration::OneWeek),
        )
        .await?;

    state.games.attach_thread(group, thread.id.get())?;

    if let Err(e) = thread.id.add_thread_member(&ctx.http, command.user.id).await {
        tracing::warn!(
            "Failed to add {} to thread {}: {}",
            command.user.id,
            thread.id,
            e
        );
    }

    send_prompt(state, ctx, thread.id, group, 0).await?;

    Ok(thread.id)
}

async fn send_prompt(
    state: &BotState,
    ctx: &Context,
    channel_id: ChannelId,
    group: Group,
    prompt_index: usize,
) -> Result<(), AppError> {
    let prompt = state
        .games
        .prompt(prompt_index)
        .ok_or_else(|| AppError::NotFound(format!("Treasurer prompt {}", prompt_index)))?;

    let mut message = CreateMessage::new()
        .content(prompt.message)
        .components(vec![prompt_buttons(group, prompt_index)]);

    if let Some(image_path) = prompt.image_path {
        let attachment = CreateAttachment::path(state.config.events_dir.join(image_path)).await?;
        message = message.add_file(attachment);
    }

    channel_id.send_message(&ctx.http, message).await?;

    Ok(())
}

/// Scores a prompt button click and moves the game on.
pub async fn handle_answer(
    state: &BotState,
    ctx: &Context,
    component: &ComponentInteraction,
    group: Group,
    prompt_index: usize,
    choice: Verdict,
) {
    let outcome = match state.games.submit_answer(group, prompt_index, choice) {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::debug!("Ignored treasurer answer: {}", e);

            let response = CreateInteractionResponse::Message(
                CreateInteractionResponseMessage::new()
                    .content(refused_answer_message(&e))
                    .ephemeral(true),
            );
            if let Err(e) = component.create_response(&ctx.http, response).await {
                tracing::error!("Failed to reply to refused answer: {}", e);
            }
            return;
        }
    };

    tracing::debug!(
        "{} answered prompt {} of the {} game",
        component.user.id,
        prompt_index,
        group
    );

    if let Err(e) = continue_game(state, ctx, component, group, &outcome).await {
        tracing::error!("Treasurer game for {} crashed: {}", group, e);
        state.games.release(group);

        if let Err(e) = component
            .channel_id
            .send_message(&ctx.http, CreateMessage::new().content(GAME_ENDED))
            .await
        {
            tracing::error!("Failed to announce the end of game for {}: {}", group, e);
        }
    }
}

async fn continue_game(
    state: &BotState,
    ctx: &Context,
    component: &ComponentInteraction,
    group: Group,
    outcome: &AnswerOutcome,
) -> Result<(), AppError> {
    component
        .create_response(
            &ctx.http,
            CreateInteractionResponse::Message(
                CreateInteractionResponseMessage::new().content(answer_feedback(outcome)),
            ),
        )
        .await?;

    component
        .channel_id
        .edit_message(
            &ctx.http,
            component.message.id,
            EditMessage::new().components(vec![]),
        )
        .await?;

    match state.games.advance(group, outcome.next_index)? {
        GameStep::Prompt(next_index) => {
            send_prompt(state, ctx, component.channel_id, group, next_index).await?
        }
        GameStep::Finished { correct, points } => {
            tracing::info!("Treasurer game for {} finished with {} correct", group, correct);

            component
                .channel_id
                .send_message(
                    &ctx.http,
                    CreateMessage::new().content(game_over_message(correct, points)),
                )
                .await?;

            // Session is already gone; a failed lock only leaves the thread open
            if let Err(e) = component
                .channel_id
                .edit_thread(&ctx.http, EditThread::new().locked(true))
                .await
            {
                tracing::warn!("Failed to lock game thread {}: {}", component.channel_id, e);
            }
        }
    }

    Ok(())
}
