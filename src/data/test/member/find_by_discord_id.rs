use super::*;

/// Tests finding a member with a year-less birthday.
///
/// Expected: Ok(Some) with the placeholder year hidden
#[tokio::test]
async fn finds_member_without_year() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::DiscordMember)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let existing = factory::create_member_without_year(db, 2, 29).await?;

    let repo = MemberRepository::new(db);
    let member = repo.find_by_discord_id(&existing.discord_id).await?.unwrap();

    let birthday = member.birthday.unwrap();
    assert_eq!(birthday.month_day(), (2, 29));
    assert_eq!(birthday.year(), None);

    Ok(())
}

/// Tests finding a member whose birthday was cleared.
///
/// Expected: Ok(Some) with no birthday
#[tokio::test]
async fn finds_member_with_cleared_birthday() -> Result<(), DbErr> {
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
    let member = repo.find_by_discord_id(&existing.discord_id).await?.unwrap();

    assert_eq!(member.birthday, None);

    Ok(())
}

/// Tests finding a member that does not exist.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_unknown_member() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::DiscordMember)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = MemberRepository::new(db);

    assert!(repo.find_by_discord_id("404").await?.is_none());

    Ok(())
}
