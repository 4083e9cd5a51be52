use super::*;

/// Tests clearing an existing birthday.
///
/// Expected: Ok(1) with the row kept and the date nulled
#[tokio::test]
async fn clears_existing_birthday() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::DiscordMember)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let existing = factory::create_member_with_birthday(db, 2001, 9, 11).await?;

    let repo = MemberRepository::new(db);
    let affected = repo.clear_birthday(&existing.discord_id).await?;

    assert_eq!(affected, 1);

    let row = entity::prelude::DiscordMember::find_by_id(existing.discord_id)
        .one(db)
        .await?
        .unwrap();
    assert_eq!(row.birthday, None);
    assert!(!row.has_birth_year);

    Ok(())
}

/// Tests clearing a member that has no row.
///
/// Expected: Ok(0) with no row created
#[tokio::test]
async fn clearing_unknown_member_affects_nothing() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::DiscordMember)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = MemberRepository::new(db);
    let affected = repo.clear_birthday("999").await?;

    assert_eq!(affected, 0);
    assert!(repo.find_by_discord_id("999").await?.is_none());

    Ok(())
}

/// Tests that clearing one member leaves others untouched.
///
/// Expected: Ok with the other member's birthday intact
#[tokio::test]
async fn leaves_other_members_untouched() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::DiscordMember)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let cleared = factory::create_member_with_birthday(db, 2001, 9, 11).await?;
    let kept = factory::create_member_without_year(db, 3, 15).await?;

    let repo = MemberRepository::new(db);
    repo.clear_birthday(&cleared.discord_id).await?;

    let kept = repo.find_by_discord_id(&kept.discord_id).await?.unwrap();
    assert_eq!(kept.birthday, Birthday::without_year(3, 15));

    Ok(())
}
