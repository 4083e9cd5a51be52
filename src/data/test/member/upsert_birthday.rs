use super::*;

/// Tests storing a full birthday for a new member.
///
/// Expected: Ok with the row created and the year flag set
#[tokio::test]
async fn creates_member_with_full_birthday() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::DiscordMember)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = MemberRepository::new(db);
    let birthday = Birthday::parse("2003-01-30").unwrap();
    let member = repo
        .upsert_birthday(UpsertBirthdayParam {
            discord_id: "123456789".to_string(),
            birthday,
        })
        .await?;

    assert_eq!(member.discord_id, "123456789");
    assert_eq!(member.birthday, Some(birthday));

    let row = entity::prelude::DiscordMember::find_by_id("123456789".to_string())
        .one(db)
        .await?
        .unwrap();
    assert_eq!(row.birthday, NaiveDate::from_ymd_opt(2003, 1, 30));
    assert!(row.has_birth_year);

    Ok(())
}

/// Tests storing a birthday without a year.
///
/// Expected: Ok with the placeholder year stored and the year flag cleared
#[tokio::test]
async fn stores_year_less_birthday_with_placeholder() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::DiscordMember)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = MemberRepository::new(db);
    repo.upsert_birthday(UpsertBirthdayParam {
        discord_id: "123456789".to_string(),
        birthday: Birthday::parse("12-25").unwrap(),
    })
    .await?;

    let row = entity::prelude::DiscordMember::find_by_id("123456789".to_string())
        .one(db)
        .await?
        .unwrap();
    assert_eq!(row.birthday, NaiveDate::from_ymd_opt(2000, 12, 25));
    assert!(!row.has_birth_year);

    Ok(())
}

/// Tests replacing a full birthday with a year-less one.
///
/// Verifies the year flag is overwritten together with the date.
///
/// Expected: Ok with the new date and has_birth_year false
#[tokio::test]
async fn overwrites_year_flag_on_conflict() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::DiscordMember)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let existing = factory::create_member_with_birthday(db, 1999, 5, 4).await?;

    let repo = MemberRepository::new(db);
    let member = repo
        .upsert_birthday(UpsertBirthdayParam {
            discord_id: existing.discord_id.clone(),
            birthday: Birthday::parse("07-01").unwrap(),
        })
        .await?;

    assert_eq!(member.birthday, Birthday::without_year(7, 1));

    let row = entity::prelude::DiscordMember::find_by_id(existing.discord_id)
        .one(db)
        .await?
        .unwrap();
    assert_eq!(row.birthday, NaiveDate::from_ymd_opt(2000, 7, 1));
    assert!(!row.has_birth_year);

    Ok(())
}

/// Tests setting a birthday again after it was cleared.
///
/// Expected: Ok with the birthday present again
#[tokio::test]
async fn restores_cleared_birthday() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::DiscordMember)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let existing = factory::discord_member::DiscordMemberFactory::new(db)
        .no_birthday()
        .build()
        .await?;

    let repo = MemberRepository::new(db);
    let member = repo
        .upsert_birthday(UpsertBirthdayParam {
            discord_id: existing.discord_id,
            birthday: Birthday::parse("1990-02-28").unwrap(),
        })
        .await?;

    assert_eq!(member.birthday.and_then(|b| b.year()), Some(1990));

    Ok(())
}

/// Tests that the operation fails when the table is missing.
///
/// Expected: Err(DbErr)
#[tokio::test]
async fn fails_without_table() -> Result<(), DbErr> {
    let test = TestBuilder::new().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = MemberRepository::new(db);
    let result = repo
        .upsert_birthday(UpsertBirthdayParam {
            discord_id: "123456789".to_string(),
            birthday: Birthday::parse("01-01").unwrap(),
        })
        .await;

    assert!(result.is_err());

    Ok(())
}
