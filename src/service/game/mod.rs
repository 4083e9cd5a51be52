//! Treasurer game session state.
//!
//! Each group has at most one session. A session exists from a successful
//! [`GameSessions::start`] until the last prompt is answered, the game is released
//! after a delivery failure, or its thread is deleted or closed. Map guards are never
//! held across an await; every method here is synchronous.

pub mod prompts;

use std::sync::Arc;

use dashmap::{mapref::entry::Entry, DashMap};

use crate::{
    error::game::GameError,
    model::game::{Group, Prompt, PromptSet, Verdict},
};

/// In-progress game for one group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSession {
    /// Discord user that ran `/treasurer`.
    pub started_by: u64,
    /// Private thread the game is played in, once it exists.
    pub thread_id: Option<u64>,
    pub correct: u32,
    /// Index of the prompt currently awaiting an answer.
    pub next_prompt: usize,
}

/// Result of scoring one answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub correct: bool,
    pub expected: Verdict,
    /// Index to pass to [`GameSessions::advance`].
    pub next_index: usize,
}

/// What the dispatch layer should do after an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStep {
    /// Post the prompt at this index.
    Prompt(usize),
    /// The game is over and the session has been released.
    Finished { correct: u32, points: u32 },
}

/// Shared handle to every group's session.
///
/// Cloning is cheap; all clones see the same sessions.
#[derive(Clone)]
pub struct GameSessions {
    sessions: Arc<DashMap<Group, GameSession>>,
    prompts: Arc<PromptSet>,
}

impl GameSessions {
    pub fn new(prompts: PromptSet) -> Self {
        Self {
            sessions: Arc::new(DashMap::new()),
            prompts: Arc::new(prompts),
        }
    }

    pub fn prompt(&self, index: usize) -> Option<&Prompt> {
        self.prompts.get(index)
    }

    /// Starts a game for `group`.
    ///
    /// The check and the insert happen under the same shard lock, so two concurrent
    /// starts for one group cannot both succeed.
    ///
    /// # Returns
    /// - `Ok(())` - Session created with 0 correct answers at prompt 0
    /// - `Err(GameError::AlreadyActive)` - The group already has a session
    pub fn start(&self, group: Group, started_by: u64) -> Result<(), GameError> {
        match self.sessions.entry(group) {
            Entry::Occupied(_) => Err(GameError::AlreadyActive(group)),
            Entry::Vacant(entry) => {
                entry.insert(GameSession {
                    started_by,
                    thread_id: None,
                    correct: 0,
                    next_prompt: 0,
                });
                Ok(())
            }
        }
    }

    /// Records the thread a started game is played in.
    ///
    /// # Returns
    /// - `Ok(())` - Thread recorded
    /// - `Err(GameError::NotActive)` - The session was released in the meantime
    pub fn attach_thread(&self, group: Group, thread_id: u64) -> Result<(), GameError> {
        let mut session = self
            .sessions
            .get_mut(&group)
            .ok_or(GameError::NotActive(group))?;
        session.thread_id = Some(thread_id);

        Ok(())
    }

    /// Scores an answer for the prompt currently awaiting one.
    ///
    /// The count only grows when `choice` matches the prompt's answer. Either way the
    /// session moves past the prompt, so a second click on the same prompt is stale.
    ///
    /// # Returns
    /// - `Ok(AnswerOutcome)` - Answer recorded
    /// - `Err(GameError::NotActive)` - No session for the group
    /// - `Err(GameError::StalePrompt)` - `prompt_index` is not awaiting an answer
    pub fn submit_answer(
        &self,
        group: Group,
        prompt_index: usize,
        choice: Verdict,
    ) -> Result<AnswerOutcome, GameError> {
        let mut session = self
            .sessions
            .get_mut(&group)
            .ok_or(GameError::NotActive(group))?;

        let prompt = self
            .prompts
            .get(prompt_index)
            .filter(|_| session.next_prompt == prompt_index)
            .ok_or(GameError::StalePrompt {
                group,
                prompt_index,
            })?;

        let correct = prompt.answer == choice;
        if correct {
            session.correct += 1;
        }
        session.next_prompt = prompt_index + 1;

        Ok(AnswerOutcome {
            correct,
            expected: prompt.answer,
            next_index: session.next_prompt,
        })
    }

    /// Moves the game to `next_index`, finishing it past the last prompt.
    ///
    /// Finishing removes the session so the group can start again.
    ///
    /// # Returns
    /// - `Ok(GameStep::Prompt)` - Post this prompt next
    /// - `Ok(GameStep::Finished)` - Final count and awarded points
    /// - `Err(GameError::NotActive)` - No session for the group
    /// - `Err(GameError::StalePrompt)` - `next_index` is not where the session is
    pub fn advance(&self, group: Group, next_index: usize) -> Result<GameStep, GameError> {
        let current = self
            .sessions
            .get(&group)
            .map(|session| *session)
            .ok_or(GameError::NotActive(group))?;

        if current.next_prompt != next_index {
            return Err(GameError::StalePrompt {
                group,
                prompt_index: next_index,
            });
        }

        if next_index < self.prompts.len() {
            return Ok(GameStep::Prompt(next_index));
        }

        let session = self
            .sessions
            .remove(&group)
            .map(|(_, session)| session)
            .unwrap_or(current);

        Ok(GameStep::Finished {
            correct: session.correct,
            points: self.prompts.tiers.points_for(session.correct),
        })
    }

    /// Drops the group's session regardless of its state.
    ///
    /// Returns whether a session was removed.
    pub fn release(&self, group: Group) -> bool {
        self.sessions.remove(&group).is_some()
    }

    /// Drops the session played in `thread_id`, if any.
    ///
    /// Returns the released group and its final session state.
    pub fn release_by_thread(&self, thread_id: u64) -> Option<(Group, GameSession)> {
        let group = self
            .sessions
            .iter()
            .find(|entry| entry.thread_id == Some(thread_id))
            .map(|entry| *entry.key())?;

        self.sessions
            .remove_if(&group, |_, session| session.thread_id == Some(thread_id))
    }

    #[cfg(test)]
    pub fn session(&self, group: Group) -> Option<GameSession> {
        self.sessions.get(&group).map(|session| *session)
    }
}
