//! Internally-synchronized session map, keyed strictly by chat id.

use std::collections::HashMap;
use std::sync::Mutex;

use rcommon::ChatId;
use rtable::{Series, Table};

use crate::{DraftPayload, Session, SessionError, Stage};

/// Owns every active session. All operations take the map lock briefly and
/// never perform IO under it; callers snapshot with [`SessionStore::get`],
/// do their network work, then commit mutations.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: Mutex<HashMap<ChatId, Session>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a dialogue. Fails if the chat already has an active session;
    /// dialogue-initiating commands are only accepted in the standard state,
    /// so callers check [`SessionStore::get`] first.
    pub fn create(&self, chat: ChatId, session: Session) -> Result<(), SessionError> {
        let mut sessions = self.lock()?;
        if sessions.contains_key(&chat) {
            return Err(SessionError::already_active(format!(
                "chat {chat} already has an active session"
            )));
        }

        sessions.insert(chat, session);
        Ok(())
    }

    /// Cloned snapshot of the chat's session, if any.
    pub fn get(&self, chat: ChatId) -> Result<Option<Session>, SessionError> {
        Ok(self.lock()?.get(&chat).cloned())
    }

    /// Moves the session to a new stage. `choices` replaces the acceptable
    /// inputs when given and keeps the current set when `None`.
    pub fn advance(
        &self,
        chat: ChatId,
        stage: Stage,
        choices: Option<Vec<String>>,
    ) -> Result<(), SessionError> {
        self.with_session(chat, |session| {
            session.stage = stage;
            if let Some(choices) = choices {
                session.choices = choices;
            }

            Ok(())
        })
    }

    pub fn set_selection(&self, chat: ChatId, value: impl Into<String>) -> Result<(), SessionError> {
        let value = value.into();
        self.with_session(chat, |session| {
            session.current_selection = Some(value);
            Ok(())
        })
    }

    pub fn set_model_class(&self, chat: ChatId, class: impl Into<String>) -> Result<(), SessionError> {
        let class = class.into();
        self.with_session(chat, |session| match &mut session.draft {
            DraftPayload::Training { model_class, .. } => {
                *model_class = Some(class);
                Ok(())
            }
            other => Err(wrong_kind("model class", other)),
        })
    }

    /// Records one parameter value. Re-recording a name overwrites — last
    /// write wins.
    pub fn record_parameter(
        &self,
        chat: ChatId,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), SessionError> {
        let (name, value) = (name.into(), value.into());
        self.with_session(chat, |session| match &mut session.draft {
            DraftPayload::Training { parameters, .. } => {
                parameters.insert(name, value);
                Ok(())
            }
            other => Err(wrong_kind("parameter", other)),
        })
    }

    pub fn set_features(&self, chat: ChatId, table: Table) -> Result<(), SessionError> {
        self.with_session(chat, |session| {
            match &mut session.draft {
                DraftPayload::Training { features, .. }
                | DraftPayload::Retraining { features, .. }
                | DraftPayload::Predicting { features } => *features = Some(table),
            }

            Ok(())
        })
    }

    pub fn set_target(&self, chat: ChatId, series: Series) -> Result<(), SessionError> {
        self.with_session(chat, |session| match &mut session.draft {
            DraftPayload::Training { target, .. } | DraftPayload::Retraining { target, .. } => {
                *target = Some(series);
                Ok(())
            }
            other => Err(wrong_kind("target", other)),
        })
    }

    /// Destroys the session and its draft together. Clearing an absent
    /// session is a no-op, never an error; the return value tells whether a
    /// session was actually removed.
    pub fn clear(&self, chat: ChatId) -> Result<bool, SessionError> {
        Ok(self.lock()?.remove(&chat).is_some())
    }

    fn with_session(
        &self,
        chat: ChatId,
        mutate: impl FnOnce(&mut Session) -> Result<(), SessionError>,
    ) -> Result<(), SessionError> {
        let mut sessions = self.lock()?;
        let session = sessions
            .get_mut(&chat)
            .ok_or_else(|| SessionError::not_found(format!("no active session for chat {chat}")))?;

        mutate(session)
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<ChatId, Session>>, SessionError> {
        self.sessions
            .lock()
            .map_err(|_| SessionError::store("session store lock poisoned"))
    }
}

fn wrong_kind(field: &str, draft: &DraftPayload) -> SessionError {
    SessionError::wrong_kind(format!(
        "{field} does not belong to a {:?} draft",
        draft.kind()
    ))
}
