use chrono::{DateTime, Utc};
use roomcraft_store::{JsonStoreExt, KeyValueStore, StoreError};
use serde::{Deserialize, Serialize};

pub const CHAT_SESSIONS_KEY: &str = "chat_sessions";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    #[display("you")]
    User,
    #[display("assistant")]
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatSession {
    pub id: String,
    pub user_id: String,
    pub messages: Vec<ChatMessage>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Chat transcripts kept in a [`KeyValueStore`].
#[derive(Debug)]
pub struct ChatLog<S> {
    store: S,
}

impl<S> ChatLog<S>
where
    S: KeyValueStore,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }

    fn sessions(&self) -> Result<Vec<ChatSession>, StoreError> {
        Ok(self.store.load_json(CHAT_SESSIONS_KEY)?.unwrap_or_default())
    }

    /// Starts an empty session for `user_id` and returns its id.
    pub fn create_session(
        &mut self,
        user_id: &str,
        now: DateTime<Utc>,
    ) -> Result<String, StoreError> {
        let mut sessions = self.sessions()?;
        let id = format!("chat-{}", sessions.len() + 1);
        sessions.push(ChatSession {
            id: id.clone(),
            user_id: user_id.to_owned(),
            messages: vec![],
            created_at: now,
            updated_at: now,
        });
        self.store.save_json(CHAT_SESSIONS_KEY, &sessions)?;
        Ok(id)
    }

    pub fn add_message(
        &mut self,
        session_id: &str,
        role: ChatRole,
        content: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        let mut sessions = self.sessions()?;
        let session = sessions
            .iter_mut()
            .find(|session| session.id == session_id)
            .ok_or_else(|| StoreError::NotFound {
                key: session_id.to_owned(),
            })?;
        session.messages.push(ChatMessage {
            role,
            content: content.into(),
            timestamp: now,
        });
        session.updated_at = now;
        self.store.save_json(CHAT_SESSIONS_KEY, &sessions)
    }

    /// Messages of `session_id` in the order they were added; empty for an unknown id.
    pub fn messages(&self, session_id: &str) -> Result<Vec<ChatMessage>, StoreError> {
        Ok(self
            .sessions()?
            .into_iter()
            .find(|session| session.id == session_id)
            .map(|session| session.messages)
            .unwrap_or_default())
    }

    /// Sessions of `user_id`, most recently updated first.
    pub fn user_sessions(&self, user_id: &str) -> Result<Vec<ChatSession>, StoreError> {
        let mut sessions = self.sessions()?;
        sessions.retain(|session| session.user_id == user_id);
        sessions.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(sessions)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone as _;
    use roomcraft_store::MemoryStore;

    use super::*;

    fn at(second: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, second).unwrap()
    }

    #[test]
    fn test_messages_are_appended_in_order() {
        let mut log = ChatLog::new(MemoryStore::new());
        let id = log.create_session("ada", at(0)).unwrap();
        log.add_message(&id, ChatRole::User, "hi", at(1)).unwrap();
        log.add_message(&id, ChatRole::Assistant, "hello", at(2)).unwrap();

        let messages = log.messages(&id).unwrap();
        assert_eq!(
            messages
                .iter()
                .map(|m| (m.role, m.content.as_str()))
                .collect::<Vec<_>>(),
            [(ChatRole::User, "hi"), (ChatRole::Assistant, "hello")]
        );
        assert!(log.messages("chat-99").unwrap().is_empty());
    }

    #[test]
    fn test_unknown_session_is_not_found() {
        let mut log = ChatLog::new(MemoryStore::new());
        let err = log
            .add_message("chat-1", ChatRole::User, "hi", at(0))
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { ref key } if key == "chat-1"));
    }

    #[test]
    fn test_user_sessions_most_recent_first() {
        let mut log = ChatLog::new(MemoryStore::new());
        let older = log.create_session("ada", at(0)).unwrap();
        let newer = log.create_session("ada", at(1)).unwrap();
        let _other = log.create_session("bram", at(2)).unwrap();
        log.add_message(&older, ChatRole::User, "kitchen?", at(5)).unwrap();

        let ids = log
            .user_sessions("ada")
            .unwrap()
            .into_iter()
            .map(|session| session.id)
            .collect::<Vec<_>>();
        assert_eq!(ids, [older, newer]);
    }

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&ChatRole::Assistant).unwrap(),
            r#""assistant""#
        );
    }
}
