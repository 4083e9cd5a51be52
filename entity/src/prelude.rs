pub use super::discord_member::Entity as DiscordMember;
