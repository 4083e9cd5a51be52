use std::sync::Arc;

use chrono::NaiveDate;
use sea_orm::DatabaseConnection;
use serenity::{
    all::{ChannelId, CreateMessage, GuildId, RoleId, UserId},
    http::Http,
};
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::{
    config::Config,
    error::AppError,
    model::birthday::BirthdayRecord,
    service::{
        birthday::{format::render_announcement, ranking::compute_age, today_at, BirthdayService},
        guild,
    },
    util::parse::parse_u64_from_string,
};

/// Announcement template inside the messages directory.
const TEMPLATE_FILE: &str = "birthday.md";

/// Starts the daily birthday announcement scheduler
///
/// The job fires on `config.birthday_cron`, evaluated at `config.birthday_offset`,
/// so it runs once per local calendar day.
///
/// # Arguments
/// - `db`: Database connection
/// - `discord_http`: Discord HTTP client for role changes and announcements
/// - `config`: Guild, role, channel, and schedule configuration
pub async fn start_scheduler(
    db: DatabaseConnection,
    discord_http: Arc<Http>,
    config: Arc<Config>,
) -> Result<(), AppError> {
    let scheduler = JobScheduler::new().await?;

    let job_db = db.clone();
    let job_http = discord_http.clone();
    let job_config = config.clone();

    let job = Job::new_async_tz(
        config.birthday_cron.as_str(),
        config.birthday_offset,
        move |_uuid, _lock| {
            let db = job_db.clone();
            let http = job_http.clone();
            let config = job_config.clone();

            Box::pin(async move {
                if let Err(e) = celebrate_birthdays(&db, http, &config).await {
                    tracing::error!("Error processing birthday announcements: {}", e);
                }
            })
        },
    )?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    tracing::info!(
        "Birthday announcement scheduler started ({}, UTC{})",
        config.birthday_cron,
        config.birthday_offset
    );

    Ok(())
}

/// Runs one day's birthday announcements.
///
/// The birthday role is cleared from yesterday's celebrants first. Each of today's
/// celebrants is then handled on its own; one failure does not stop the rest.
async fn celebrate_birthdays(
    db: &DatabaseConnection,
    discord_http: Arc<Http>,
    config: &Config,
) -> Result<(), AppError> {
    let today = today_at(config.birthday_offset);
    let guild_id = GuildId::new(config.guild_id);
    let birthday_role = RoleId::new(config.roles.birthday);

    // The job runs at most once a day, so anyone holding the role got it yesterday
    if let Err(e) = clear_birthday_role(&discord_http, guild_id, birthday_role).await {
        tracing::warn!("Could not clear birthday role: {}", e);
    }

    let template = tokio::fs::read_to_string(config.messages_dir.join(TEMPLATE_FILE)).await?;

    let celebrants = BirthdayService::new(db).todays_celebrants(today).await?;
    tracing::info!("{} birthday(s) to announce for {}", celebrants.len(), today);

    let channel_id = ChannelId::new(config.channels.birthday);
    for record in celebrants {
        let member_id = record.member_id.clone();
        if let Err(e) = announce_birthday(
            &discord_http,
            guild_id,
            birthday_role,
            channel_id,
            &template,
            record,
            today,
        )
        .await
        {
            tracing::error!("Failed to announce birthday for member {}: {}", member_id, e);
        }
    }

    Ok(())
}

async fn clear_birthday_role(
    discord_http: &Arc<Http>,
    guild_id: GuildId,
    birthday_role: RoleId,
) -> Result<(), AppError> {
    let members = guild::fetch_all_members(discord_http, guild_id).await?;

    for member in members
        .iter()
        .filter(|member| member.roles.contains(&birthday_role))
    {
        let user_id = member.user.id;
        if let Err(e) = discord_http
            .remove_member_role(guild_id, user_id, birthday_role, Some("Birthday is over"))
            .await
        {
            tracing::error!("Failed to remove birthday role from {}: {}", user_id, e);
        } else {
            tracing::debug!("Removed birthday role from {}", user_id);
        }
    }

    Ok(())
}

/// Tags one celebrant with the birthday role and posts their announcement.
///
/// Members who left the guild are skipped.
async fn announce_birthday(
    discord_http: &Arc<Http>,
    guild_id: GuildId,
    birthday_role: RoleId,
    channel_id: ChannelId,
    template: &str,
    record: BirthdayRecord,
    today: NaiveDate,
) -> Result<(), AppError> {
    let user_id = UserId::new(parse_u64_from_string(record.member_id.clone())?);

    if let Err(e) = guild_id.member(discord_http, user_id).await {
        tracing::debug!("Skipping birthday for {} (not in guild): {}", user_id, e);
        return Ok(());
    }

    if let Err(e) = discord_http
        .add_member_role(guild_id, user_id, birthday_role, Some("Happy birthday"))
        .await
    {
        tracing::warn!("Failed to add birthday role to {}: {}", user_id, e);
    }

    let content = announcement_for(template, &record, today);
    channel_id
        .send_message(discord_http, CreateMessage::new().content(content))
        .await?;

    tracing::info!("Announced birthday for {}", user_id);

    Ok(())
}

/// Announcement text for a celebrant whose birthday is `today`.
fn announcement_for(template: &str, record: &BirthdayRecord, today: NaiveDate) -> String {
    render_announcement(
        template,
        &format!("<@{}>", record.member_id),
        compute_age(&record.birthday, today),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::birthday::Birthday;

    const TEMPLATE: &str = "Happy {age} birthday, {mention}!";

    fn record(birthday: &str) -> BirthdayRecord {
        BirthdayRecord {
            member_id: "42".to_string(),
            birthday: Birthday::parse(birthday).unwrap(),
        }
    }

    #[test]
    fn announces_ordinal_age() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 30).unwrap();

        assert_eq!(
            announcement_for(TEMPLATE, &record("2003-01-30"), today),
            "Happy 21st birthday, <@42>!"
        );
    }

    #[test]
    fn omits_age_without_year() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 30).unwrap();

        assert_eq!(
            announcement_for(TEMPLATE, &record("01-30"), today),
            "Happy  birthday, <@42>!"
        );
    }
}
