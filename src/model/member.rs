//! Member domain model converted from the `discord_member` entity.

use crate::model::birthday::{Birthday, BirthdayRecord};

/// A member row with its birthday decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscordMember {
    pub discord_id: String,
    /// `None` when the member never set a birthday or unset it.
    pub birthday: Option<Birthday>,
}

impl DiscordMember {
    /// Converts an entity model to a member domain model at the repository boundary.
    ///
    /// # Arguments
    /// - `entity` - The entity model from the database
    ///
    /// # Returns
    /// - `DiscordMember` - The converted member domain model
    pub fn from_entity(entity: entity::discord_member::Model) -> Self {
        Self {
            birthday: entity
                .birthday
                .map(|date| Birthday::from_stored(date, entity.has_birth_year)),
            discord_id: entity.discord_id,
        }
    }

    /// Converts the member into a birthday record, if a birthday is set.
    pub fn into_birthday_record(self) -> Option<BirthdayRecord> {
        let birthday = self.birthday?;
        Some(BirthdayRecord {
            member_id: self.discord_id,
            birthday,
        })
    }
}

/// Parameters for storing a member's birthday.
#[derive(Debug, Clone)]
pub struct UpsertBirthdayParam {
    pub discord_id: String,
    pub birthday: Birthday,
}
