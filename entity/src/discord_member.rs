use sea_orm::entity::prelude::*;

/// A guild member known to the bot, keyed by Discord user ID.
///
/// `birthday` is `NULL` once a member unsets it; the row itself is kept so later
/// sets are plain upserts. When `has_birth_year` is false the year component of
/// `birthday` is a placeholder and carries no meaning.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "discord_member")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub discord_id: String,
    pub birthday: Option<Date>,
    pub has_birth_year: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
