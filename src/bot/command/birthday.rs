//! `/birthday set|unset|upcoming`.

use serenity::all::{
    CommandInteraction, CommandOptionType, Context, CreateCommand, CreateCommandOption,
    CreateEmbed, GuildId, ResolvedOption, ResolvedValue, UserId,
};

use super::{reply_embed, FAILURE_COLOUR, SUCCESS_COLOUR};
use crate::{
    error::AppError,
    model::birthday::{Birthday, UpcomingBirthday},
    service::{
        birthday::{
            format::{format_upcoming_date, format_upcoming_member},
            ranking::DEFAULT_UPCOMING_LIMIT,
            today_at, BirthdayService,
        },
        guild,
    },
    state::BotState,
};

pub const NAME: &str = "birthday";

pub fn definition() -> CreateCommand {
    CreateCommand::new(NAME)
        .description("Birthday commands")
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::SubCommand,
                "set",
                "Set birthday of a member, defaults to the member running the command",
            )
            .add_sub_option(
                CreateCommandOption::new(
                    CommandOptionType::String,
                    "date",
                    "Birthday (e.g., 2003-01-30 or 01-30) [YYYY-MM-DD / MM-DD]",
                )
                .required(true),
            )
            .add_sub_option(CreateCommandOption::new(
                CommandOptionType::User,
                "member",
                "Admins only: set birthday for another member",
            )),
        )
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::SubCommand,
                "unset",
                "Unset birthday of a member, defaults to the member running the command",
            )
            .add_sub_option(CreateCommandOption::new(
                CommandOptionType::User,
                "member",
                "Admins only: unset birthday for another member",
            )),
        )
        .add_option(CreateCommandOption::new(
            CommandOptionType::SubCommand,
            "upcoming",
            "List of the next upcoming 10 birthdays on the server.",
        ))
}

/// Wording for replies about the invoking member or someone else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Perspective {
    /// `your` or `<@id>'s`
    pub first_mention: String,
    pub possessive: &'static str,
    pub objective: &'static str,
    /// How to set the birthday again.
    pub set_command: &'static str,
}

impl Perspective {
    pub fn new(target: UserId, invoker: UserId) -> Self {
        if target == invoker {
            Self {
                first_mention: "your".to_string(),
                possessive: "your",
                objective: "you",
                set_command: "`/birthday set <date>`",
            }
        } else {
            Self {
                first_mention: format!("<@{}>'s", target),
                possessive: "their",
                objective: "them",
                set_command: "`/birthday set <date> [member]`",
            }
        }
    }

    pub fn is_self(&self) -> bool {
        self.possessive == "your"
    }
}

pub fn set_success_description(perspective: &Perspective, thumbs_up: &str) -> String {
    format!(
        "Thank you for telling me {} birthday dazo! I have now remembered it! {}",
        perspective.first_mention, thumbs_up
    )
}

pub fn never_set_description(perspective: &Perspective, breakdown: &str, heart: &str) -> String {
    [
        format!(
            "Yo dazo! You have never told me what {} birthday is {}\n",
            perspective.first_mention, breakdown
        ),
        format!(
            "Just let me know what {} birthday is and I will remember it and even wish {} a happy birthday when the day comes! 🥳",
            perspective.possessive, perspective.objective
        ),
        format!(
            "You can let me know {} birthday by running: {}! {}",
            perspective.possessive, perspective.set_command, heart
        ),
    ]
    .join("\n")
}

pub fn unset_success_description(perspective: &Perspective, thumbs_up: &str) -> String {
    [
        format!(
            "Okay, I will forget about {} birthday! {}",
            perspective.first_mention, thumbs_up
        ),
        format!(
            "If this was a mistake, you can tell me {} birthday again using {}!",
            perspective.possessive, perspective.set_command
        ),
    ]
    .join("\n")
}

/// Red embed for an unset that could not be carried out, whether the lookup or the
/// write failed.
pub fn unset_failure_embed() -> CreateEmbed {
    CreateEmbed::new()
        .colour(FAILURE_COLOUR)
        .description("Yo dazo! Something went wrong and could not unset birthday.")
}

/// The `/birthday upcoming` embed.
pub fn upcoming_embed(upcoming: &[UpcomingBirthday]) -> CreateEmbed {
    let embed = CreateEmbed::new()
        .colour(SUCCESS_COLOUR)
        .title("Upcoming Birthdays");

    if upcoming.is_empty() {
        return embed.description("Nobody has told me their birthday yet dazo!");
    }

    embed.fields(
        upcoming
            .iter()
            .map(|entry| (format_upcoming_date(entry), format_upcoming_member(entry), false)),
    )
}

pub async fn execute(
    state: &BotState,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<bool, AppError> {
    let options = command.data.options();
    let Some(ResolvedOption {
        name: subcommand,
        value: ResolvedValue::SubCommand(sub_options),
        ..
    }) = options.first()
    else {
        return Ok(false);
    };

    match *subcommand {
        "set" => set(state, ctx, command, sub_options).await,
        "unset" => unset(state, ctx, command, sub_options).await,
        "upcoming" => upcoming(state, ctx, command).await,
        _ => Ok(false),
    }
}

/// The member a subcommand acts on: the `member` option, else the invoker.
fn target_of(command: &CommandInteraction, options: &[ResolvedOption<'_>]) -> UserId {
    options
        .iter()
        .find_map(|option| match (option.name, &option.value) {
            ("member", ResolvedValue::User(user, _)) => Some(user.id),
            _ => None,
        })
        .unwrap_or(command.user.id)
}

fn is_admin(command: &CommandInteraction) -> bool {
    command
        .member
        .as_ref()
        .and_then(|member| member.permissions)
        .is_some_and(|permissions| permissions.administrator())
}

/// Replies with a refusal when a non-admin targets someone else.
///
/// Returns `true` when the invocation may proceed.
async fn ensure_may_target(
    ctx: &Context,
    command: &CommandInteraction,
    target: UserId,
) -> Result<bool, AppError> {
    if target == command.user.id || is_admin(command) {
        return Ok(true);
    }

    let embed = CreateEmbed::new()
        .colour(FAILURE_COLOUR)
        .description("Yo dazo! Only admins can change another member's birthday.");
    reply_embed(ctx, command, embed, true).await?;

    Ok(false)
}

async fn emoji(state: &BotState, ctx: &Context, emoji_id: Option<u64>, fallback: &str) -> String {
    guild::emoji_or(&ctx.http, GuildId::new(state.config.guild_id), emoji_id, fallback).await
}

async fn set(
    state: &BotState,
    ctx: &Context,
    command: &CommandInteraction,
    options: &[ResolvedOption<'_>],
) -> Result<bool, AppError> {
    let Some(date) = options.iter().find_map(|option| match (option.name, &option.value) {
        ("date", ResolvedValue::String(date)) => Some(*date),
        _ => None,
    }) else {
        return Ok(false);
    };

    let birthday = match Birthday::parse(date) {
        Ok(birthday) => birthday,
        Err(e) => {
            tracing::debug!("Rejected birthday input: {}", e);
            return Ok(false);
        }
    };

    let target = target_of(command, options);
    if !ensure_may_target(ctx, command, target).await? {
        return Ok(true);
    }

    let service = BirthdayService::new(&state.db);
    if !service.set_birthday(&target.to_string(), birthday).await {
        let embed = CreateEmbed::new()
            .colour(FAILURE_COLOUR)
            .description("Yo dazo! Something went wrong and could not set birthday.");
        reply_embed(ctx, command, embed, true).await?;
        return Ok(true);
    }

    tracing::info!("{} set the birthday of {}", command.user.id, target);

    let perspective = Perspective::new(target, command.user.id);
    let thumbs_up = emoji(state, ctx, state.config.emojis.thumbs_up, ":thumbsup:").await;
    let embed = CreateEmbed::new()
        .colour(SUCCESS_COLOUR)
        .description(set_success_description(&perspective, &thumbs_up));
    reply_embed(ctx, command, embed, false).await?;

    Ok(true)
}

async fn unset(
    state: &BotState,
    ctx: &Context,
    command: &CommandInteraction,
    options: &[ResolvedOption<'_>],
) -> Result<bool, AppError> {
    let target = target_of(command, options);
    if !ensure_may_target(ctx, command, target).await? {
        return Ok(true);
    }

    let perspective = Perspective::new(target, command.user.id);
    let service = BirthdayService::new(&state.db);
    let member_id = target.to_string();

    let has_birthday = match service.has_set_birthday(&member_id).await {
        Ok(has_birthday) => has_birthday,
        Err(e) => {
            tracing::error!("Failed to look up birthday for member {}: {}", member_id, e);
            reply_embed(ctx, command, unset_failure_embed(), true).await?;
            return Ok(true);
        }
    };

    if !has_birthday {
        let breakdown = emoji(state, ctx, state.config.emojis.breakdown, ":sob:").await;
        let heart = emoji(state, ctx, state.config.emojis.heart, ":heart:").await;
        let embed = CreateEmbed::new()
            .colour(FAILURE_COLOUR)
            .description(never_set_description(&perspective, &breakdown, &heart));
        reply_embed(ctx, command, embed, true).await?;
        return Ok(true);
    }

    if !service.unset_birthday(&member_id).await {
        reply_embed(ctx, command, unset_failure_embed(), true).await?;
        return Ok(true);
    }

    tracing::info!("{} unset the birthday of {}", command.user.id, target);

    let thumbs_up = emoji(state, ctx, state.config.emojis.thumbs_up, ":thumbsup:").await;
    let embed = CreateEmbed::new()
        .colour(SUCCESS_COLOUR)
        .description(unset_success_description(&perspective, &thumbs_up));
    reply_embed(ctx, command, embed, false).await?;

    Ok(true)
}

async fn upcoming(
    state: &BotState,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<bool, AppError> {
    let today = today_at(state.config.birthday_offset);
    let upcoming = BirthdayService::new(&state.db)
        .upcoming_birthdays(today, DEFAULT_UPCOMING_LIMIT)
        .await?;

    reply_embed(ctx, command, upcoming_embed(&upcoming), false).await?;

    Ok(true)
}
