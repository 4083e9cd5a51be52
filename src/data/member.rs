//! Member data repository for birthday storage.
//!
//! Birthdays live in the `discord_member` table: one row per Discord ID, a nullable
//! date, and a flag recording whether the year in that date is real or the
//! placeholder used for year-less birthdays.

use migration::OnConflict;
use sea_orm::{
    ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
};

use crate::model::member::{DiscordMember, UpsertBirthdayParam};

/// Repository providing database operations for member birthdays.
pub struct MemberRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> MemberRepository<'a> {
    /// Creates a new MemberRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    ///
    /// # Returns
    /// - `MemberRepository` - New repository instance
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Stores a member's birthday, creating the member row if needed.
    ///
    /// Both the date and the year flag are overwritten on conflict so that replacing a
    /// full birthday with a year-less one never leaves a stale year behind.
    ///
    /// # Arguments
    /// - `param` - Discord ID and the birthday to store
    ///
    /// # Returns
    /// - `Ok(DiscordMember)` - The stored member
    /// - `Err(DbErr)` - Database error during insert or update
    pub async fn upsert_birthday(
        &self,
        param: UpsertBirthdayParam,
    ) -> Result<DiscordMember, DbErr> {
        let (date, has_birth_year) = param.birthday.to_stored();

        let entity = entity::prelude::DiscordMember::insert(entity::discord_member::ActiveModel {
            discord_id: ActiveValue::Set(param.discord_id),
            birthday: ActiveValue::Set(Some(date)),
            has_birth_year: ActiveValue::Set(has_birth_year),
        })
        .on_conflict(
            OnConflict::column(entity::discord_member::Column::DiscordId)
                .update_columns([
                    entity::discord_member::Column::Birthday,
                    entity::discord_member::Column::HasBirthYear,
                ])
                .to_owned(),
        )
        .exec_with_returning(self.db)
        .await?;

        Ok(DiscordMember::from_entity(entity))
    }

    /// Clears a member's birthday.
    ///
    /// The member row itself is kept. Clearing a member that has no row is not an
    /// error; it simply affects nothing.
    ///
    /// # Arguments
    /// - `discord_id` - Discord ID of the member
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of rows updated (0 or 1)
    /// - `Err(DbErr)` - Database error during update
    pub async fn clear_birthday(&self, discord_id: &str) -> Result<u64, DbErr> {
        let result = entity::prelude::DiscordMember::update_many()
            .set(entity::discord_member::ActiveModel {
                birthday: ActiveValue::Set(None),
                has_birth_year: ActiveValue::Set(false),
                ..Default::default()
            })
            .filter(entity::discord_member::Column::DiscordId.eq(discord_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Finds a member by Discord ID.
    ///
    /// # Arguments
    /// - `discord_id` - Discord ID of the member
    ///
    /// # Returns
    /// - `Ok(Some(DiscordMember))` - Member row exists
    /// - `Ok(None)` - The member has never set a birthday
    /// - `Err(DbErr)` - Database error during query
    pub async fn find_by_discord_id(
        &self,
        discord_id: &str,
    ) -> Result<Option<DiscordMember>, DbErr> {
        let entity = entity::prelude::DiscordMember::find_by_id(discord_id.to_string())
            .one(self.db)
            .await?;

        Ok(entity.map(DiscordMember::from_entity))
    }

    /// Gets every member that currently has a birthday set.
    ///
    /// Rows are returned in Discord ID order; callers rank them by calendar date.
    ///
    /// # Returns
    /// - `Ok(Vec<DiscordMember>)` - Members with `birthday` present
    /// - `Err(DbErr)` - Database error during query
    pub async fn get_all_with_birthday(&self) -> Result<Vec<DiscordMember>, DbErr> {
        let entities = entity::prelude::DiscordMember::find()
            .filter(entity::discord_member::Column::Birthday.is_not_null())
            .order_by_asc(entity::discord_member::Column::DiscordId)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(DiscordMember::from_entity).collect())
    }
}
