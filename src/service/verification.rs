//! Intro verification workflow.
//!
//! An intro message produces a verification request in the verification channel.
//! Committee members then press `Verify`, which swaps the intro role for the
//! freshie and member roles, or `Reject`, which kicks the author.

use std::sync::Arc;

use serenity::{
    all::{
        ButtonStyle, Colour, CreateActionRow, CreateButton, CreateEmbed, CreateEmbedAuthor,
        CreateMessage, GuildId, RoleId, Timestamp, UserId,
    },
    http::Http,
};

use crate::{config::RoleIds, error::AppError, model::interaction::ButtonAction};

pub const PENDING_COLOUR: Colour = Colour(0xE67E22);
pub const VERIFIED_COLOUR: Colour = Colour(0x57F287);
pub const REJECTED_COLOUR: Colour = Colour(0xED4245);

/// Audit log reason for rejected members.
pub const REJECT_REASON: &str = "Discord membership rejected.";

/// DM sent after a member is rejected.
pub const REJECT_NOTICE: &str = "Yo dazo! You have been kicked because you were rejected from the Discord server. Please reach out to @officialspimy if you think this was a mistake! Ja ne~";

/// Registration details found for an intro author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub proof_of_payment: String,
    pub favourite: String,
}

/// The author of an intro message.
#[derive(Debug, Clone)]
pub struct IntroAuthor {
    pub user_id: u64,
    pub username: String,
    pub display_name: String,
    pub avatar_url: String,
}

/// Finds the registration row for `username`.
///
/// The first row is the form header and is skipped. The username is the first
/// column, proof of payment the fourth, and the favourite character the last. A
/// blank cell is replaced with a note pointing at the spreadsheet.
///
/// # Arguments
/// - `rows` - Spreadsheet rows, header included
/// - `username` - Discord username of the intro author
/// - `sheet_url` - Link used in the manual check note
///
/// # Returns
/// - `Some(Registration)` - First row whose username matches exactly
/// - `None` - The author did not register through the form
pub fn find_registration(
    rows: &[Vec<String>],
    username: &str,
    sheet_url: &str,
) -> Option<Registration> {
    let row = rows
        .iter()
        .skip(1)
        .find(|row| row.first().map(String::as_str) == Some(username))?;

    let manual_check = || {
        format!(
            "Not Found and require manual check at the Spreadsheet at {}",
            sheet_url
        )
    };
    let cell = |value: Option<&String>| {
        value
            .filter(|v| !v.trim().is_empty())
            .cloned()
            .unwrap_or_else(manual_check)
    };

    Some(Registration {
        proof_of_payment: cell(row.get(3)),
        favourite: cell(row.last()),
    })
}

/// Builds the verification request embed.
///
/// A matched registration adds its details; otherwise the embed flags the author
/// for a manual check and lists their identifiers.
pub fn build_verification_embed(
    author: &IntroAuthor,
    content: &str,
    registration: Option<&Registration>,
    sheet_url: &str,
) -> CreateEmbed {
    let embed = CreateEmbed::new()
        .author(CreateEmbedAuthor::new(&author.display_name).icon_url(&author.avatar_url))
        .colour(PENDING_COLOUR)
        .description(content)
        .timestamp(Timestamp::now());

    match registration {
        Some(registration) => embed
            .field("Proof of Payment", &registration.proof_of_payment, false)
            .field("Favourite Husbando/Waifu", &registration.favourite, false),
        None => embed
            .field(
                "Issue",
                format!(
                    "User not found in [Spreadsheet]({}). Manual check required.",
                    sheet_url
                ),
                false,
            )
            .field("Username", &author.username, false)
            .field("Display Name", &author.display_name, false)
            .field("User ID", author.user_id.to_string(), false),
    }
}

/// `Verify` and `Reject` buttons for `member_id`.
pub fn verification_buttons(member_id: u64) -> CreateActionRow {
    CreateActionRow::Buttons(vec![
        CreateButton::new(ButtonAction::Verify(member_id).custom_id())
            .label("Verify")
            .style(ButtonStyle::Success),
        CreateButton::new(ButtonAction::Reject(member_id).custom_id())
            .label("Reject")
            .style(ButtonStyle::Danger),
    ])
}

/// The full verification request message.
///
/// Unmatched authors also ping the IT manager role.
pub fn build_verification_request(
    author: &IntroAuthor,
    content: &str,
    registration: Option<&Registration>,
    sheet_url: &str,
    it_manager_role: u64,
) -> CreateMessage {
    let message = CreateMessage::new()
        .embed(build_verification_embed(author, content, registration, sheet_url))
        .components(vec![verification_buttons(author.user_id)]);

    match registration {
        Some(_) => message,
        None => message.content(format!("<@&{}>", it_manager_role)),
    }
}

/// Role changes and kicks behind the verification buttons.
pub struct VerificationService<'a> {
    http: &'a Arc<Http>,
    guild_id: GuildId,
    roles: &'a RoleIds,
}

impl<'a> VerificationService<'a> {
    pub fn new(http: &'a Arc<Http>, guild_id: u64, roles: &'a RoleIds) -> Self {
        Self {
            http,
            guild_id: GuildId::new(guild_id),
            roles,
        }
    }

    /// Replaces the intro role with the freshie and member roles.
    pub async fn verify(&self, member_id: UserId) -> Result<(), AppError> {
        self.http
            .remove_member_role(
                self.guild_id,
                member_id,
                RoleId::new(self.roles.intro),
                Some("Verified"),
            )
            .await?;

        for role in [self.roles.freshie, self.roles.member] {
            self.http
                .add_member_role(self.guild_id, member_id, RoleId::new(role), Some("Verified"))
                .await?;
        }

        tracing::info!("Verified member {}", member_id);

        Ok(())
    }

    /// Kicks the member, then lets them know why.
    pub async fn reject(&self, member_id: UserId) -> Result<(), AppError> {
        self.guild_id
            .kick_with_reason(self.http, member_id, REJECT_REASON)
            .await?;

        tracing::info!("Rejected member {}", member_id);

        if let Err(e) = member_id
            .direct_message(self.http, CreateMessage::new().content(REJECT_NOTICE))
            .await
        {
            tracing::debug!("Could not send rejection notice to {}: {}", member_id, e);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    const SHEET: &str = "https://docs.google.com/spreadsheets/d/abc";

    fn rows() -> Vec<Vec<String>> {
        [
            vec!["Discord Username", "Name", "Course", "Proof", "Favourite"],
            vec!["kuu", "Kuu", "CS", "https://img/proof.png", "Rem"],
            vec!["nopay", "No Pay", "CS", "", "Emilia"],
            vec!["short"],
        ]
        .into_iter()
        .map(|row| row.into_iter().map(String::from).collect())
        .collect()
    }

    fn author() -> IntroAuthor {
        IntroAuthor {
            user_id: 42,
            username: "kuu".to_string(),
            display_name: "Kuu-chan".to_string(),
            avatar_url: "https://cdn.discordapp.com/embed/avatars/0.png".to_string(),
        }
    }

    fn field_names(embed: &CreateEmbed) -> Vec<String> {
        let json = serde_json::to_value(embed).unwrap();
        json["fields"]
            .as_array()
            .unwrap()
            .iter()
            .map(|field| field["name"].as_str().unwrap().to_string())
            .collect()
    }

    #[test]
    fn finds_matching_row() {
        let found = find_registration(&rows(), "kuu", SHEET).unwrap();

        assert_eq!(found.proof_of_payment, "https://img/proof.png");
        assert_eq!(found.favourite, "Rem");
    }

    #[test]
    fn header_row_never_matches() {
        assert_eq!(find_registration(&rows(), "Discord Username", SHEET), None);
    }

    #[test]
    fn blank_cells_ask_for_manual_check() {
        let found = find_registration(&rows(), "nopay", SHEET).unwrap();

        assert!(found.proof_of_payment.starts_with("Not Found"));
        assert!(found.proof_of_payment.ends_with(SHEET));
        assert_eq!(found.favourite, "Emilia");
    }

    #[test]
    fn short_row_uses_its_last_cell() {
        let found = find_registration(&rows(), "short", SHEET).unwrap();

        assert!(found.proof_of_payment.starts_with("Not Found"));
        assert_eq!(found.favourite, "short");
    }

    #[test]
    fn unknown_user_has_no_registration() {
        assert_eq!(find_registration(&rows(), "stranger", SHEET), None);
        assert_eq!(find_registration(&[], "kuu", SHEET), None);
    }

    #[test]
    fn matched_embed_shows_registration() {
        let registration = find_registration(&rows(), "kuu", SHEET).unwrap();
        let embed = build_verification_embed(&author(), "Hi!", Some(&registration), SHEET);

        assert_eq!(
            field_names(&embed),
            vec!["Proof of Payment", "Favourite Husbando/Waifu"]
        );

        let json = serde_json::to_value(&embed).unwrap();
        assert_eq!(json["description"], Value::from("Hi!"));
        assert_eq!(json["color"], Value::from(PENDING_COLOUR.0));
    }

    #[test]
    fn unmatched_embed_flags_manual_check() {
        let embed = build_verification_embed(&author(), "Hi!", None, SHEET);

        assert_eq!(
            field_names(&embed),
            vec!["Issue", "Username", "Display Name", "User ID"]
        );
    }

    #[test]
    fn buttons_carry_member_payloads() {
        let row = serde_json::to_value(verification_buttons(42)).unwrap();
        let ids: Vec<&str> = row["components"]
            .as_array()
            .unwrap()
            .iter()
            .map(|button| button["custom_id"].as_str().unwrap())
            .collect();

        assert_eq!(ids, vec!["verify-42", "reject-42"]);
    }

    #[test]
    fn unmatched_request_pings_it_manager() {
        let message = build_verification_request(&author(), "Hi!", None, SHEET, 99);
        let json = serde_json::to_value(&message).unwrap();

        assert_eq!(json["content"], Value::from("<@&99>"));
    }
}
