//! Birthday service.
//!
//! This module provides the `BirthdayService` used by the `/birthday` command and the
//! daily announcement job. Store operations collapse database failures into a
//! `false` result after logging them, so command handlers only decide which reply to
//! send. Read operations propagate errors.

pub mod format;
pub mod ranking;

use chrono::{FixedOffset, NaiveDate, Utc};
use sea_orm::DatabaseConnection;

use crate::{
    data::member::MemberRepository,
    error::AppError,
    model::{
        birthday::{Birthday, BirthdayRecord, UpcomingBirthday},
        member::UpsertBirthdayParam,
    },
};

/// Current date at the given UTC offset.
///
/// Both ranking and announcements use this so "today" means the same day whether
/// the bot is asked interactively or by the scheduler.
pub fn today_at(offset: FixedOffset) -> NaiveDate {
    Utc::now().with_timezone(&offset).date_naive()
}

pub struct BirthdayService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> BirthdayService<'a> {
    /// Creates a new BirthdayService instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    ///
    /// # Returns
    /// - `BirthdayService` - New service instance
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Stores a member's birthday, replacing any previous one.
    ///
    /// # Arguments
    /// - `member_id` - Discord ID of the member
    /// - `birthday` - Parsed birthday, with or without a year
    ///
    /// # Returns
    /// - `true` - The birthday is stored
    /// - `false` - The write failed and nothing changed
    pub async fn set_birthday(&self, member_id: &str, birthday: Birthday) -> bool {
        let repo = MemberRepository::new(self.db);
        let result = repo
            .upsert_birthday(UpsertBirthdayParam {
                discord_id: member_id.to_string(),
                birthday,
            })
            .await;

        match result {
            Ok(_) => true,
            Err(e) => {
                tracing::error!("Failed to set birthday for member {}: {}", member_id, e);
                false
            }
        }
    }

    /// Clears a member's birthday.
    ///
    /// Clearing a member who has no record succeeds; the end state is the same.
    ///
    /// # Returns
    /// - `true` - No birthday is stored for the member afterwards
    /// - `false` - The write failed
    pub async fn unset_birthday(&self, member_id: &str) -> bool {
        let repo = MemberRepository::new(self.db);

        match repo.clear_birthday(member_id).await {
            Ok(rows) => {
                if rows == 0 {
                    tracing::debug!("Unset birthday for unknown member {}", member_id);
                }
                true
            }
            Err(e) => {
                tracing::error!("Failed to unset birthday for member {}: {}", member_id, e);
                false
            }
        }
    }

    /// Whether the member has a record with a birthday set.
    ///
    /// # Returns
    /// - `Ok(true)` - A birthday is stored for the member
    /// - `Ok(false)` - No record, or the birthday was unset
    /// - `Err(AppError::DbErr)` - The lookup failed; nothing is known about the member
    pub async fn has_set_birthday(&self, member_id: &str) -> Result<bool, AppError> {
        let repo = MemberRepository::new(self.db);
        let member = repo.find_by_discord_id(member_id).await?;

        Ok(member.is_some_and(|m| m.birthday.is_some()))
    }

    /// Every stored birthday, unordered.
    ///
    /// # Returns
    /// - `Ok(Vec<BirthdayRecord>)` - Members with a birthday set
    /// - `Err(AppError::DbErr)` - Database error during query
    pub async fn fetch_all_with_birthday(&self) -> Result<Vec<BirthdayRecord>, AppError> {
        let repo = MemberRepository::new(self.db);
        let members = repo.get_all_with_birthday().await?;

        Ok(members
            .into_iter()
            .filter_map(|member| member.into_birthday_record())
            .collect())
    }

    /// The next `limit` birthdays as of `today`.
    pub async fn upcoming_birthdays(
        &self,
        today: NaiveDate,
        limit: usize,
    ) -> Result<Vec<UpcomingBirthday>, AppError> {
        let records = self.fetch_all_with_birthday().await?;
        Ok(ranking::rank_upcoming(records, today, limit))
    }

    /// Birthdays that fall on `today`.
    pub async fn todays_celebrants(
        &self,
        today: NaiveDate,
    ) -> Result<Vec<BirthdayRecord>, AppError> {
        let records = self.fetch_all_with_birthday().await?;
        Ok(ranking::todays_birthdays(records, today))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::{builder::TestBuilder, factory};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn set_then_fetch_round_trips() -> Result<(), AppError> {
        let test = TestBuilder::new().with_member_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let service = BirthdayService::new(db);
        let birthday = Birthday::parse("2003-01-30")?;

        assert!(service.set_birthday("123", birthday).await);

        let records = service.fetch_all_with_birthday().await?;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].member_id, "123");
        assert_eq!(records[0].birthday, birthday);
        assert!(records[0].has_birth_year());

        Ok(())
    }

    #[tokio::test]
    async fn set_reports_failure_without_table() -> Result<(), AppError> {
        let test = TestBuilder::new().build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let service = BirthdayService::new(db);

        assert!(!service.set_birthday("123", Birthday::parse("01-30")?).await);

        Ok(())
    }

    #[tokio::test]
    async fn unset_is_idempotent() -> Result<(), AppError> {
        let test = TestBuilder::new().with_member_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let member = factory::create_member_with_birthday(db, 2001, 2, 3).await?;
        let service = BirthdayService::new(db);

        assert!(service.has_set_birthday(&member.discord_id).await?);
        assert!(service.unset_birthday(&member.discord_id).await);
        assert!(!service.has_set_birthday(&member.discord_id).await?);
        assert!(service.unset_birthday(&member.discord_id).await);
        assert!(!service.has_set_birthday(&member.discord_id).await?);
        assert!(service.fetch_all_with_birthday().await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn unset_unknown_member_succeeds() -> Result<(), AppError> {
        let test = TestBuilder::new().with_member_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let service = BirthdayService::new(db);

        assert!(service.unset_birthday("404").await);
        assert!(!service.has_set_birthday("404").await?);

        Ok(())
    }

    #[tokio::test]
    async fn lookup_failure_is_not_reported_as_unset() -> Result<(), AppError> {
        let test = TestBuilder::new().build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let service = BirthdayService::new(db);
        let result = service.has_set_birthday("123").await;

        assert!(matches!(result, Err(AppError::DbErr(_))));

        Ok(())
    }

    #[tokio::test]
    async fn ranks_stored_birthdays() -> Result<(), AppError> {
        let test = TestBuilder::new().with_member_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        factory::create_member_without_year(db, 3, 15).await?;
        factory::create_member_with_birthday(db, 1990, 1, 1).await?;
        factory::create_member_without_year(db, 12, 25).await?;
        factory::discord_member::DiscordMemberFactory::new(db)
            .no_birthday()
            .build()
            .await?;

        let service = BirthdayService::new(db);
        let upcoming = service
            .upcoming_birthdays(date(2024, 2, 1), ranking::DEFAULT_UPCOMING_LIMIT)
            .await?;

        let keys: Vec<(u32, u32)> = upcoming.iter().map(|b| b.birthday.month_day()).collect();
        assert_eq!(keys, vec![(1, 1), (3, 15), (12, 25)]);
        assert_eq!(upcoming[0].age, Some(35));
        assert_eq!(upcoming[1].age, None);

        Ok(())
    }

    #[tokio::test]
    async fn finds_todays_celebrants() -> Result<(), AppError> {
        let test = TestBuilder::new().with_member_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let celebrant = factory::create_member_without_year(db, 7, 4).await?;
        factory::create_member_with_birthday(db, 1999, 7, 5).await?;

        let service = BirthdayService::new(db);
        let today = service.todays_celebrants(date(2024, 7, 4)).await?;

        assert_eq!(today.len(), 1);
        assert_eq!(today[0].member_id, celebrant.discord_id);

        Ok(())
    }
}
