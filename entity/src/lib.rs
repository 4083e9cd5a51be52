//! SeaORM entities for the bot database.

pub mod prelude;

pub mod discord_member;
