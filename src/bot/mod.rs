//! Discord bot integration.
//!
//! The bot reacts to `ready`, members joining, intro messages, interactions (slash
//! commands and buttons), and game threads closing. Handlers are thin; they
//! translate Discord payloads into service calls and replies.
//!
//! # Gateway Intents
//!
//! The bot requires the following gateway intents:
//! - `GUILDS` - Guild, channel, and thread events
//! - `GUILD_MEMBERS` - Member joins and member listings (privileged intent)
//! - `GUILD_MESSAGES` - Messages posted in the intro channel
//! - `MESSAGE_CONTENT` - The intro text itself (privileged intent)
//!
//! Note: privileged intents must be explicitly enabled in the Discord Developer
//! Portal for the bot application.

pub mod command;
pub mod handler;
pub mod start;
