use thiserror::Error;

use crate::model::game::Group;

/// Rejected treasurer game state transitions.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum GameError {
    /// A game is already running for this group.
    #[error("A game is already in progress for group {0}")]
    AlreadyActive(Group),

    /// No game is running for this group.
    #[error("No game is in progress for group {0}")]
    NotActive(Group),

    /// The answer targets a prompt that is not the one currently awaiting an answer.
    #[error("Prompt {prompt_index} is not awaiting an answer for group {group}")]
    StalePrompt {
        /// Group the answer was submitted for
        group: Group,
        /// Prompt index carried by the answer
        prompt_index: usize,
    },

    /// The group identifier is not one of the fixed game groups.
    #[error("Unknown group '{0}'")]
    UnknownGroup(String),
}
