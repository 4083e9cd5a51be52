//! Treasurer game models: groups, verdicts, prompts, and point tiers.

use std::fmt;
use std::str::FromStr;

use crate::error::game::GameError;

/// The fixed set of groups that can play the treasurer game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Group {
    Green,
    Red,
    Blue,
    LightPurple,
}

impl Group {
    pub const ALL: [Group; 4] = [Group::Green, Group::Red, Group::Blue, Group::LightPurple];

    /// Value used for the slash command choice.
    pub fn value(&self) -> &'static str {
        match self {
            Group::Green => "green",
            Group::Red => "red",
            Group::Blue => "blue",
            Group::LightPurple => "light-purple",
        }
    }

    /// Identifier embedded in button payloads. Never contains `-`, which separates
    /// payload tokens.
    pub fn slug(&self) -> &'static str {
        match self {
            Group::Green => "green",
            Group::Red => "red",
            Group::Blue => "blue",
            Group::LightPurple => "light_purple",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Group::Green => "Green",
            Group::Red => "Red",
            Group::Blue => "Blue",
            Group::LightPurple => "Light Purple",
        }
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

/// Accepts both the command value (`light-purple`) and the payload slug (`light_purple`).
impl FromStr for Group {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Group::ALL
            .into_iter()
            .find(|group| group.value() == s || group.slug() == s)
            .ok_or_else(|| GameError::UnknownGroup(s.to_string()))
    }
}

/// The three possible classifications of a reimbursement claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Accepted,
    NeedsRevision,
    Rejected,
}

impl Verdict {
    pub const ALL: [Verdict; 3] = [Verdict::Accepted, Verdict::NeedsRevision, Verdict::Rejected];

    /// Human readable answer shown in feedback messages.
    pub fn label(&self) -> &'static str {
        match self {
            Verdict::Accepted => "Accepted",
            Verdict::NeedsRevision => "Needs Revision",
            Verdict::Rejected => "Rejected",
        }
    }

    /// Action token used in button payloads.
    pub fn token(&self) -> &'static str {
        match self {
            Verdict::Accepted => "accepted",
            Verdict::NeedsRevision => "revision",
            Verdict::Rejected => "rejected",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        Verdict::ALL.into_iter().find(|v| v.token() == token)
    }
}

/// A single claim scenario the group has to classify.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub message: &'static str,
    pub answer: Verdict,
    /// Reference image path relative to the configured events directory.
    pub image_path: Option<&'static str>,
}

/// Minimum number of correct answers needed to earn `points`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointTier {
    pub min_correct: u32,
    pub points: u32,
}

/// Breakpoints mapping a final correct count to awarded points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointTiers {
    /// Sorted by `min_correct` ascending.
    tiers: Vec<PointTier>,
}

impl PointTiers {
    pub fn new(mut tiers: Vec<PointTier>) -> Self {
        tiers.sort_by_key(|tier| tier.min_correct);
        Self { tiers }
    }

    /// Points for the highest tier reached, or 0 below the first tier.
    pub fn points_for(&self, correct: u32) -> u32 {
        self.tiers
            .iter()
            .rev()
            .find(|tier| correct >= tier.min_correct)
            .map(|tier| tier.points)
            .unwrap_or(0)
    }
}

/// Bands of five: 1–5 → 1, 6–10 → 2, 11–15 → 3, 16–20 → 4.
impl Default for PointTiers {
    fn default() -> Self {
        Self::new(vec![
            PointTier {
                min_correct: 1,
                points: 1,
            },
            PointTier {
                min_correct: 6,
                points: 2,
            },
            PointTier {
                min_correct: 11,
                points: 3,
            },
            PointTier {
                min_correct: 16,
                points: 4,
            },
        ])
    }
}

/// An ordered prompt sequence together with its scoring tiers.
#[derive(Debug, Clone)]
pub struct PromptSet {
    pub prompts: Vec<Prompt>,
    pub tiers: PointTiers,
}

impl PromptSet {
    pub fn len(&self) -> usize {
        self.prompts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prompts.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Prompt> {
        self.prompts.get(index)
    }
}
