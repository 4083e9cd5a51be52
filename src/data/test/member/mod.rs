use crate::{
    data::member::MemberRepository,
    model::{birthday::Birthday, member::UpsertBirthdayParam},
};
use chrono::NaiveDate;
use sea_orm::{DbErr, EntityTrait};
use test_utils::{builder::TestBuilder, factory};

mod clear_birthday;
mod find_by_discord_id;
mod get_all_with_birthday;
mod upsert_birthday;
