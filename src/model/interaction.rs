//! Button payloads.
//!
//! Every button the bot emits carries a custom ID of the form
//! `{action}-{entity}[-{index}]`:
//!
//! - `verify-{member_id}` / `reject-{member_id}` on verification requests
//! - `{accepted|revision|rejected}-{group_slug}-{prompt_index}` on treasurer prompts
//!
//! Payloads arrive from Discord untrusted, so parsing never panics.

use std::fmt;
use std::str::FromStr;

use crate::{
    error::payload::PayloadError,
    model::game::{Group, Verdict},
};

const VERIFY: &str = "verify";
const REJECT: &str = "reject";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonAction {
    /// Verify the member who posted an intro.
    Verify(u64),
    /// Reject and kick the member who posted an intro.
    Reject(u64),
    /// Answer a treasurer game prompt.
    Answer {
        choice: Verdict,
        group: Group,
        prompt_index: usize,
    },
}

impl ButtonAction {
    pub fn custom_id(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ButtonAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ButtonAction::Verify(member_id) => write!(f, "{}-{}", VERIFY, member_id),
            ButtonAction::Reject(member_id) => write!(f, "{}-{}", REJECT, member_id),
            ButtonAction::Answer {
                choice,
                group,
                prompt_index,
            } => write!(f, "{}-{}-{}", choice.token(), group.slug(), prompt_index),
        }
    }
}

impl FromStr for ButtonAction {
    type Err = PayloadError;

    fn from_str(payload: &str) -> Result<Self, Self::Err> {
        let malformed = || PayloadError::Malformed(payload.to_string());
        let tokens: Vec<&str> = payload.split('-').collect();

        match tokens.as_slice() {
            [VERIFY, member_id] => member_id
                .parse()
                .map(ButtonAction::Verify)
                .map_err(|_| malformed()),
            [REJECT, member_id] => member_id
                .parse()
                .map(ButtonAction::Reject)
                .map_err(|_| malformed()),
            [action, group, prompt_index] => {
                let choice = Verdict::from_token(action)
                    .ok_or_else(|| PayloadError::UnknownAction(action.to_string()))?;
                let group = group.parse::<Group>().map_err(|_| malformed())?;
                let prompt_index = prompt_index.parse::<usize>().map_err(|_| malformed())?;

                Ok(ButtonAction::Answer {
                    choice,
                    group,
                    prompt_index,
                })
            }
            [action, ..] if !action.is_empty() && tokens.len() == 2 => {
                Err(PayloadError::UnknownAction(action.to_string()))
            }
            _ => Err(malformed()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_verification_payloads() {
        assert_eq!(
            "verify-123456789".parse(),
            Ok(ButtonAction::Verify(123456789))
        );
        assert_eq!("reject-42".parse(), Ok(ButtonAction::Reject(42)));
    }

    #[test]
    fn parses_answer_payload_with_underscored_group() {
        assert_eq!(
            "revision-light_purple-7".parse(),
            Ok(ButtonAction::Answer {
                choice: Verdict::NeedsRevision,
                group: Group::LightPurple,
                prompt_index: 7,
            })
        );
    }

    #[test]
    fn emitted_answer_ids_parse_back() {
        let action = ButtonAction::Answer {
            choice: Verdict::Rejected,
            group: Group::LightPurple,
            prompt_index: 19,
        };

        assert_eq!(action.custom_id(), "rejected-light_purple-19");
        assert_eq!(action.custom_id().parse(), Ok(action));
    }

    #[test]
    fn rejects_malformed_payloads() {
        assert_eq!(
            "verify-abc".parse::<ButtonAction>(),
            Err(PayloadError::Malformed("verify-abc".to_string()))
        );
        assert_eq!(
            "accepted-green-first".parse::<ButtonAction>(),
            Err(PayloadError::Malformed("accepted-green-first".to_string()))
        );
        assert_eq!(
            "accepted-light-purple-1".parse::<ButtonAction>(),
            Err(PayloadError::Malformed("accepted-light-purple-1".to_string()))
        );
        assert!("".parse::<ButtonAction>().is_err());
        assert!("verify".parse::<ButtonAction>().is_err());
    }

    #[test]
    fn rejects_unknown_actions() {
        assert_eq!(
            "approve-green-1".parse::<ButtonAction>(),
            Err(PayloadError::UnknownAction("approve".to_string()))
        );
        assert_eq!(
            "ban-42".parse::<ButtonAction>(),
            Err(PayloadError::UnknownAction("ban".to_string()))
        );
    }
}
