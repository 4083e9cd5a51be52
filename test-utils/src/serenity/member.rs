//! Test factory for creating Serenity Member objects.

use chrono::{DateTime, Utc};
use serenity::all::Member;

use super::user::user_json;

/// Creates a test Serenity Member with customizable roles and join time.
///
/// # Arguments
/// - `guild_id` - Guild the member belongs to
/// - `user_id` - Discord user ID (snowflake)
/// - `username` - Username of the underlying user
/// - `role_ids` - Role IDs held by the member
/// - `joined_at` - When the member joined, `None` if Discord omitted it
///
/// # Panics
/// - If the JSON cannot be deserialized into a Member (indicates invalid test data)
///
/// # Examples
///
/// ```rust,ignore
/// use test_utils::serenity::member::create_test_member;
///
/// let member = create_test_member(1, 42, "freshie", &[7], Some(chrono::Utc::now()));
/// assert_eq!(member.roles.len(), 1);
/// ```
pub fn create_test_member(
    guild_id: u64,
    user_id: u64,
    username: &str,
    role_ids: &[u64],
    joined_at: Option<DateTime<Utc>>,
) -> Member {
    let roles: Vec<String> = role_ids.iter().map(|id| id.to_string()).collect();

    serde_json::from_value(serde_json::json!({
        "guild_id": guild_id.to_string(),
        "user": user_json(user_id, username),
        "nick": null,
        "avatar": null,
        "roles": roles,
        "joined_at": joined_at.map(|t| t.to_rfc3339()),
        "premium_since": null,
        "deaf": false,
        "mute": false,
        "flags": 0,
        "pending": false,
        "communication_disabled_until": null,
    }))
    .expect("Failed to create test member - invalid JSON structure")
}
