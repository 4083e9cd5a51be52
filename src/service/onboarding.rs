//! New member onboarding: intro role assignment and the auto-kick timer.
//!
//! Members join holding the intro role and must be verified before the kick
//! timeout runs out. Timers live only in memory; on startup every member still
//! holding the intro role gets a fresh timer for whatever time they have left.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serenity::{
    all::{CreateMessage, GuildId, Member, RoleId, UserId},
    http::Http,
};

use crate::{error::AppError, service::guild};

/// Audit log reason for removing a member that was never verified.
pub const KICK_REASON: &str = "User stuck with \"Intro Arc\" role for too long.";

/// DM sent before an unverified member is kicked.
pub const KICK_NOTICE: &str = "Yo dazo! You have been automatically kicked for not having been verified by our committee. Please reach out to @officialspimy if you think this was a mistake! Ja ne~";

/// When to kick a member still holding the intro role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KickDecision {
    /// The grace period is already over.
    Now,
    /// Kick after this much longer.
    After(Duration),
}

/// Remaining grace period for a member who joined `elapsed` ago.
pub fn kick_delay(elapsed: Duration, timeout: Duration) -> KickDecision {
    match timeout.checked_sub(elapsed) {
        Some(remaining) if !remaining.is_zero() => KickDecision::After(remaining),
        _ => KickDecision::Now,
    }
}

/// Kick decisions for every member holding the intro role.
///
/// Members without a known join time are treated as overdue.
///
/// # Arguments
/// - `members` - Guild members as fetched at startup
/// - `intro_role` - The intro role ID
/// - `now` - Current time
/// - `timeout` - Configured grace period
///
/// # Returns
/// - `Vec<(UserId, KickDecision)>` - One entry per member with the intro role
pub fn pending_kicks(
    members: &[Member],
    intro_role: RoleId,
    now: DateTime<Utc>,
    timeout: Duration,
) -> Vec<(UserId, KickDecision)> {
    members
        .iter()
        .filter(|member| member.roles.contains(&intro_role))
        .map(|member| {
            let decision = match member.joined_at {
                Some(joined_at) => {
                    let elapsed = now.timestamp().saturating_sub(joined_at.unix_timestamp());
                    kick_delay(Duration::from_secs(elapsed.max(0) as u64), timeout)
                }
                None => KickDecision::Now,
            };
            (member.user.id, decision)
        })
        .collect()
}

/// Discord side of onboarding, shared by the join and ready handlers.
#[derive(Clone)]
pub struct OnboardingService {
    http: Arc<Http>,
    guild_id: GuildId,
    intro_role: RoleId,
    timeout: Duration,
}

impl OnboardingService {
    pub fn new(http: Arc<Http>, guild_id: u64, intro_role: u64, timeout: Duration) -> Self {
        Self {
            http,
            guild_id: GuildId::new(guild_id),
            intro_role: RoleId::new(intro_role),
            timeout,
        }
    }

    /// Gives a new member the intro role and starts their kick timer.
    ///
    /// The timer is started even if the role cannot be added.
    pub async fn welcome(&self, user_id: UserId) {
        if let Err(e) = self
            .http
            .add_member_role(self.guild_id, user_id, self.intro_role, None)
            .await
        {
            tracing::error!("Failed to add intro role to {}: {}", user_id, e);
        }

        self.schedule_kick(user_id, KickDecision::After(self.timeout));
    }

    /// Restores kick timers for members who were waiting while the bot was offline.
    ///
    /// # Returns
    /// - `Ok(usize)` - Number of timers restored or kicks performed
    /// - `Err(AppError::DiscordErr)` - Guild members could not be fetched
    pub async fn restore_pending_kicks(&self) -> Result<usize, AppError> {
        let members = guild::fetch_all_members(&self.http, self.guild_id).await?;
        let pending = pending_kicks(&members, self.intro_role, Utc::now(), self.timeout);

        for (user_id, decision) in &pending {
            tracing::debug!("Restoring kick timer for {}: {:?}", user_id, decision);
            self.schedule_kick(*user_id, *decision);
        }

        Ok(pending.len())
    }

    /// Runs `decision` in the background.
    pub fn schedule_kick(&self, user_id: UserId, decision: KickDecision) {
        let service = self.clone();

        tokio::spawn(async move {
            if let KickDecision::After(delay) = decision {
                tokio::time::sleep(delay).await;

                if let Err(e) = service.kick_if_unverified(user_id).await {
                    tracing::error!("Failed to auto-kick {}: {}", user_id, e);
                }
            } else if let Err(e) = service.kick(user_id).await {
                tracing::error!("Failed to auto-kick {}: {}", user_id, e);
            }
        });
    }

    /// Kicks the member if they still hold the intro role.
    ///
    /// Members that already left are ignored.
    async fn kick_if_unverified(&self, user_id: UserId) -> Result<(), AppError> {
        let member = match self.guild_id.member(&self.http, user_id).await {
            Ok(member) => member,
            Err(e) => {
                tracing::debug!("Skipping auto-kick for {}: {}", user_id, e);
                return Ok(());
            }
        };

        if !member.roles.contains(&self.intro_role) {
            return Ok(());
        }

        self.kick(user_id).await
    }

    async fn kick(&self, user_id: UserId) -> Result<(), AppError> {
        // DMs fail for members who disabled them
        if let Err(e) = user_id
            .direct_message(&self.http, CreateMessage::new().content(KICK_NOTICE))
            .await
        {
            tracing::debug!("Could not send kick notice to {}: {}", user_id, e);
        }

        self.guild_id
            .kick_with_reason(&self.http, user_id, KICK_REASON)
            .await?;

        tracing::info!("Kicked unverified member {}", user_id);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration as ChronoDuration;
    use test_utils::serenity::create_test_member;

    const GUILD: u64 = 1;
    const INTRO: u64 = 7;
    const TIMEOUT: Duration = Duration::from_secs(60);

    #[test]
    fn kicks_after_remaining_time() {
        assert_eq!(
            kick_delay(Duration::from_secs(20), TIMEOUT),
            KickDecision::After(Duration::from_secs(40))
        );
        assert_eq!(
            kick_delay(Duration::ZERO, TIMEOUT),
            KickDecision::After(TIMEOUT)
        );
    }

    #[test]
    fn kicks_now_once_timeout_passed() {
        assert_eq!(kick_delay(TIMEOUT, TIMEOUT), KickDecision::Now);
        assert_eq!(kick_delay(Duration::from_secs(3600), TIMEOUT), KickDecision::Now);
    }

    #[test]
    fn only_intro_members_are_pending() {
        let now = Utc::now();
        let members = vec![
            create_test_member(
                GUILD,
                100,
                "fresh",
                &[INTRO],
                Some(now - ChronoDuration::seconds(15)),
            ),
            create_test_member(
                GUILD,
                101,
                "verified",
                &[8, 9],
                Some(now - ChronoDuration::days(3)),
            ),
            create_test_member(
                GUILD,
                102,
                "overdue",
                &[INTRO, 8],
                Some(now - ChronoDuration::minutes(5)),
            ),
        ];

        let pending = pending_kicks(&members, RoleId::new(INTRO), now, TIMEOUT);

        assert_eq!(pending.len(), 2);
        assert_eq!(pending[0].0, UserId::new(100));
        assert_eq!(pending[0].1, KickDecision::After(Duration::from_secs(45)));
        assert_eq!(pending[1], (UserId::new(102), KickDecision::Now));
    }

    #[test]
    fn unknown_join_time_is_overdue() {
        let members = vec![create_test_member(GUILD, 100, "ghost", &[INTRO], None)];

        let pending = pending_kicks(&members, RoleId::new(INTRO), Utc::now(), TIMEOUT);

        assert_eq!(pending, vec![(UserId::new(100), KickDecision::Now)]);
    }
}
