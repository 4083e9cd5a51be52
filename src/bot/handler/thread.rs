//! Thread event handlers.
//!
//! A treasurer game lives in its private thread. Once that thread is deleted,
//! archived or locked nobody can answer its prompts, so the group's session is
//! released here.

use serenity::all::{ChannelId, GuildChannel, PartialGuildChannel, ThreadMetadata};

use crate::state::BotState;

/// Whether a thread can no longer take answers.
pub fn thread_closed(metadata: Option<&ThreadMetadata>) -> bool {
    metadata.is_some_and(|metadata| metadata.archived || metadata.locked)
}

pub fn handle_thread_delete(state: &BotState, thread: PartialGuildChannel) {
    release_game(state, thread.id, "deleted");
}

pub fn handle_thread_update(state: &BotState, thread: GuildChannel) {
    if thread_closed(thread.thread_metadata.as_ref()) {
        release_game(state, thread.id, "closed");
    }
}

fn release_game(state: &BotState, thread_id: ChannelId, reason: &str) {
    if let Some((group, session)) = state.games.release_by_thread(thread_id.get()) {
        tracing::info!(
            "Released the {} game started by {} after thread {} was {}",
            group,
            session.started_by,
            thread_id,
            reason
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata(archived: bool, locked: bool) -> ThreadMetadata {
        serde_json::from_value(serde_json::json!({
            "archived": archived,
            "auto_archive_duration": 10080,
            "archive_timestamp": null,
            "locked": locked,
        }))
        .unwrap()
    }

    #[test]
    fn open_threads_keep_their_game() {
        assert!(!thread_closed(None));
        assert!(!thread_closed(Some(&metadata(false, false))));
    }

    #[test]
    fn archived_or_locked_threads_end_their_game() {
        assert!(thread_closed(Some(&metadata(true, false))));
        assert!(thread_closed(Some(&metadata(false, true))));
    }
}
