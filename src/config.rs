use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use chrono::FixedOffset;

use crate::error::{config::ConfigError, AppError};

const DEFAULT_KICK_TIMEOUT_SECONDS: u64 = 60;
/// Every day at 00:00:59 in the configured offset.
const DEFAULT_BIRTHDAY_CRON: &str = "59 0 0 * * *";
/// Asia/Kuala_Lumpur, which observes no daylight saving.
const DEFAULT_BIRTHDAY_UTC_OFFSET_MINUTES: i32 = 8 * 60;
const DEFAULT_SHEET_RANGE: &str = "F:J";

/// Role IDs the bot assigns or checks.
#[derive(Debug, Clone)]
pub struct RoleIds {
    /// Held by new members until they are verified.
    pub intro: u64,
    pub freshie: u64,
    pub member: u64,
    /// Transient marker held for the duration of a member's birthday.
    pub birthday: u64,
    /// Pinged when an intro cannot be matched against the registration sheet.
    pub it_manager: u64,
}

/// Channel IDs the bot reads from or posts to.
#[derive(Debug, Clone)]
pub struct ChannelIds {
    pub intro: u64,
    pub verification: u64,
    pub birthday: u64,
    /// The only channel the treasurer game may be started from.
    pub event: u64,
}

/// Custom emoji used to decorate command replies.
///
/// Each entry falls back to a unicode shortcode when the emoji is not configured
/// or cannot be fetched.
#[derive(Debug, Clone, Default)]
pub struct EmojiIds {
    pub thumbs_up: Option<u64>,
    pub breakdown: Option<u64>,
    pub heart: Option<u64>,
}

/// Registration form spreadsheet used to pre-fill verification requests.
#[derive(Debug, Clone)]
pub struct RegistrationSheetConfig {
    pub sheet_id: String,
    pub api_key: String,
    pub range: String,
}

pub struct Config {
    pub database_url: String,
    pub discord_bot_token: String,
    pub guild_id: u64,

    pub roles: RoleIds,
    pub channels: ChannelIds,
    pub emojis: EmojiIds,

    /// How long a member may hold the intro role before being kicked.
    pub kick_timeout: Duration,

    pub birthday_cron: String,
    /// Offset that defines the local calendar day for birthday matching.
    pub birthday_offset: FixedOffset,

    /// Directory containing message templates such as `birthday.md`.
    pub messages_dir: PathBuf,
    /// Directory containing treasurer game reference images.
    pub events_dir: PathBuf,

    /// `None` when no spreadsheet is configured; every intro then needs a manual check.
    pub registration_sheet: Option<RegistrationSheetConfig>,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let offset_minutes = optional_parsed(
            "BIRTHDAY_UTC_OFFSET_MINUTES",
            DEFAULT_BIRTHDAY_UTC_OFFSET_MINUTES,
        )?;
        let birthday_offset = offset_from_minutes(offset_minutes)?;

        let registration_sheet = match (
            std::env::var("REGISTRATION_SHEET_ID").ok(),
            std::env::var("REGISTRATION_SHEET_API_KEY").ok(),
        ) {
            (Some(sheet_id), Some(api_key)) => Some(RegistrationSheetConfig {
                sheet_id,
                api_key,
                range: std::env::var("REGISTRATION_SHEET_RANGE")
                    .unwrap_or_else(|_| DEFAULT_SHEET_RANGE.to_string()),
            }),
            _ => None,
        };

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            discord_bot_token: required("DISCORD_BOT_TOKEN")?,
            guild_id: required_id("GUILD_ID")?,
            roles: RoleIds {
                intro: required_id("INTRO_ROLE_ID")?,
                freshie: required_id("FRESHIE_ROLE_ID")?,
                member: required_id("MEMBER_ROLE_ID")?,
                birthday: required_id("BIRTHDAY_ROLE_ID")?,
                it_manager: required_id("IT_MANAGER_ROLE_ID")?,
            },
            channels: ChannelIds {
                intro: required_id("INTRO_CHANNEL_ID")?,
                verification: required_id("VERIFICATION_CHANNEL_ID")?,
                birthday: required_id("BIRTHDAY_CHANNEL_ID")?,
                event: required_id("EVENT_CHANNEL_ID")?,
            },
            emojis: EmojiIds {
                thumbs_up: optional_id("THUMBS_UP_EMOJI_ID")?,
                breakdown: optional_id("BREAKDOWN_EMOJI_ID")?,
                heart: optional_id("HEART_EMOJI_ID")?,
            },
            kick_timeout: Duration::from_secs(optional_parsed(
                "KICK_TIMEOUT_SECONDS",
                DEFAULT_KICK_TIMEOUT_SECONDS,
            )?),
            birthday_cron: std::env::var("BIRTHDAY_CRON")
                .unwrap_or_else(|_| DEFAULT_BIRTHDAY_CRON.to_string()),
            birthday_offset,
            messages_dir: std::env::var("MESSAGES_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("messages")),
            events_dir: std::env::var("EVENTS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("events")),
            registration_sheet,
        })
    }
}

fn required(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))
}

fn required_id(name: &str) -> Result<u64, ConfigError> {
    parse_var(name, required(name)?)
}

fn optional_id(name: &str) -> Result<Option<u64>, ConfigError> {
    std::env::var(name)
        .ok()
        .map(|value| parse_var(name, value))
        .transpose()
}

fn optional_parsed<T: FromStr>(name: &str, default: T) -> Result<T, ConfigError> {
    match std::env::var(name) {
        Ok(value) => parse_var(name, value),
        Err(_) => Ok(default),
    }
}

/// UTC offset for `minutes` east of UTC; anything past a day either way is rejected.
fn offset_from_minutes(minutes: i32) -> Result<FixedOffset, ConfigError> {
    minutes
        .checked_mul(60)
        .and_then(FixedOffset::east_opt)
        .ok_or_else(|| ConfigError::InvalidEnvVar {
            name: "BIRTHDAY_UTC_OFFSET_MINUTES".to_string(),
            value: minutes.to_string(),
        })
}

fn parse_var<T: FromStr>(name: &str, value: String) -> Result<T, ConfigError> {
    value.parse::<T>().map_err(|_| ConfigError::InvalidEnvVar {
        name: name.to_string(),
        value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_var_reports_name_and_value() {
        let result = parse_var::<u64>("GUILD_ID", "not-a-snowflake".to_string());

        match result {
            Err(ConfigError::InvalidEnvVar { name, value }) => {
                assert_eq!(name, "GUILD_ID");
                assert_eq!(value, "not-a-snowflake");
            }
            other => panic!("expected InvalidEnvVar, got {:?}", other),
        }
    }

    #[test]
    fn parse_var_accepts_negative_offsets() {
        let offset: i32 = parse_var("BIRTHDAY_UTC_OFFSET_MINUTES", "-300".to_string()).unwrap();
        assert_eq!(offset, -300);
    }

    #[test]
    fn offset_minutes_convert_to_fixed_offset() {
        assert_eq!(
            offset_from_minutes(8 * 60).unwrap(),
            FixedOffset::east_opt(8 * 3600).unwrap()
        );
        assert_eq!(
            offset_from_minutes(-300).unwrap(),
            FixedOffset::west_opt(5 * 3600).unwrap()
        );
    }

    #[test]
    fn out_of_range_offsets_are_rejected() {
        for minutes in [100_000_000, i32::MAX, i32::MIN, 24 * 60, -24 * 60] {
            match offset_from_minutes(minutes) {
                Err(ConfigError::InvalidEnvVar { name, value }) => {
                    assert_eq!(name, "BIRTHDAY_UTC_OFFSET_MINUTES");
                    assert_eq!(value, minutes.to_string());
                }
                other => panic!("expected InvalidEnvVar for {}, got {:?}", minutes, other),
            }
        }
    }
}
