use super::*;

/// Tests that only members with a birthday are returned.
///
/// Expected: Ok with cleared members filtered out
#[tokio::test]
async fn skips_members_without_birthday() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::DiscordMember)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let full = factory::create_member_with_birthday(db, 1995, 6, 1).await?;
    let no_year = factory::create_member_without_year(db, 12, 31).await?;
    factory::discord_member::DiscordMemberFactory::new(db)
        .no_birthday()
        .build()
        .await?;

    let repo = MemberRepository::new(db);
    let members = repo.get_all_with_birthday().await?;

    assert_eq!(members.len(), 2);
    let ids: Vec<&str> = members.iter().map(|m| m.discord_id.as_str()).collect();
    assert!(ids.contains(&full.discord_id.as_str()));
    assert!(ids.contains(&no_year.discord_id.as_str()));
    assert!(members.iter().all(|m| m.birthday.is_some()));

    Ok(())
}

/// Tests an empty table.
///
/// Expected: Ok with an empty list
#[tokio::test]
async fn returns_empty_when_no_members() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::DiscordMember)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = MemberRepository::new(db);

    assert!(repo.get_all_with_birthday().await?.is_empty());

    Ok(())
}
