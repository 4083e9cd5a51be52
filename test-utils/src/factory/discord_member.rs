//! Discord member factory for creating test member records.
//!
//! Members default to a full birthday of 2000-01-01 so every created record shows up
//! in birthday queries unless a test explicitly clears it.

use crate::factory::helpers::next_id;
use chrono::NaiveDate;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Placeholder year used for birthdays stored without a known year.
pub const PLACEHOLDER_YEAR: i32 = 2000;

/// Factory for creating test member records with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::factory::discord_member::DiscordMemberFactory;
///
/// let member = DiscordMemberFactory::new(&db)
///     .discord_id("123456789")
///     .birthday(1999, 12, 25)
///     .build()
///     .await?;
/// ```
pub struct DiscordMemberFactory<'a> {
    db: &'a DatabaseConnection,
    discord_id: String,
    birthday: Option<NaiveDate>,
    has_birth_year: bool,
}

impl<'a> DiscordMemberFactory<'a> {
    /// Creates a new DiscordMemberFactory with default values.
    ///
    /// Defaults:
    /// - discord_id: auto-incremented numeric string
    /// - birthday: `2000-01-01`
    /// - has_birth_year: `true`
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self {
            db,
            discord_id: next_id().to_string(),
            birthday: NaiveDate::from_ymd_opt(2000, 1, 1),
            has_birth_year: true,
        }
    }

    /// Sets the Discord ID for the member.
    pub fn discord_id(mut self, discord_id: impl Into<String>) -> Self {
        self.discord_id = discord_id.into();
        self
    }

    /// Sets a full birthday including the year.
    ///
    /// # Panics
    /// - If the year, month, and day do not form a valid calendar date
    pub fn birthday(mut self, year: i32, month: u32, day: u32) -> Self {
        self.birthday =
            Some(NaiveDate::from_ymd_opt(year, month, day).expect("invalid test birthday"));
        self.has_birth_year = true;
        self
    }

    /// Sets a birthday whose year is unknown.
    ///
    /// The date is stored against [`PLACEHOLDER_YEAR`] and `has_birth_year` is cleared.
    ///
    /// # Panics
    /// - If the month and day do not form a valid date in a leap year
    pub fn birthday_without_year(mut self, month: u32, day: u32) -> Self {
        self.birthday = Some(
            NaiveDate::from_ymd_opt(PLACEHOLDER_YEAR, month, day).expect("invalid test birthday"),
        );
        self.has_birth_year = false;
        self
    }

    /// Leaves the birthday column `NULL`, as after an unset.
    pub fn no_birthday(mut self) -> Self {
        self.birthday = None;
        self.has_birth_year = false;
        self
    }

    /// Builds and inserts the member into the database.
    ///
    /// # Returns
    /// - `Ok(entity::discord_member::Model)` - Created member entity
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::discord_member::Model, DbErr> {
        entity::discord_member::ActiveModel {
            discord_id: ActiveValue::Set(self.discord_id),
            birthday: ActiveValue::Set(self.birthday),
            has_birth_year: ActiveValue::Set(self.has_birth_year),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a member with default values.
///
/// Shorthand for `DiscordMemberFactory::new(db).build().await`.
pub async fn create_member(
    db: &DatabaseConnection,
) -> Result<entity::discord_member::Model, DbErr> {
    DiscordMemberFactory::new(db).build().await
}

/// Creates a member with a full birthday.
pub async fn create_member_with_birthday(
    db: &DatabaseConnection,
    year: i32,
    month: u32,
    day: u32,
) -> Result<entity::discord_member::Model, DbErr> {
    DiscordMemberFactory::new(db)
        .birthday(year, month, day)
        .build()
        .await
}

/// Creates a member with a birthday whose year is unknown.
pub async fn create_member_without_year(
    db: &DatabaseConnection,
    month: u32,
    day: u32,
) -> Result<entity::discord_member::Model, DbErr> {
    DiscordMemberFactory::new(db)
        .birthday_without_year(month, day)
        .build()
        .await
}
