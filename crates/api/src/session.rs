//! In-memory profile edit sessions.
//!
//! A session holds the live draft, the frozen snapshot it is diffed
//! against, and the wizard sequencer. One session exists per member,
//! created when an editor opens and discarded on close or completion.
//! Sessions are process-local state: a restart drops them, and the editor
//! simply reopens from persisted data.
//!
//! Saves are re-entrancy guarded: a second save while one is in flight is
//! rejected, but draft edits remain unblocked (the lock is held only for
//! the duration of each discrete operation, never across I/O).

use std::collections::HashMap;

use majlis_core::draft::ProfileDraft;
use majlis_core::error::CoreError;
use majlis_core::types::UserId;
use majlis_core::wizard::StepSequencer;
use tokio::sync::Mutex;

/// One member's active edit session.
#[derive(Debug, Clone)]
pub struct EditSession {
    /// The live, actively-edited draft.
    pub draft: ProfileDraft,
    /// The last-persisted copy, used as the change-tracking baseline.
    pub snapshot: ProfileDraft,
    /// Wizard position (unused by the plain profile editor).
    pub sequencer: StepSequencer,
    /// Re-entrancy guard: set while a save is in flight.
    pub is_saving: bool,
}

impl EditSession {
    fn new(draft: ProfileDraft, sequencer: StepSequencer) -> Self {
        Self {
            snapshot: draft.clone(),
            draft,
            sequencer,
            is_saving: false,
        }
    }
}

/// Owns every active edit session, keyed by member id.
#[derive(Debug, Default)]
pub struct SessionManager {
    inner: Mutex<HashMap<UserId, EditSession>>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open (or re-open) a session from freshly loaded persisted data.
    /// Any previous session for the member is replaced.
    pub async fn open(&self, user_id: UserId, draft: ProfileDraft, sequencer: StepSequencer) {
        self.inner
            .lock()
            .await
            .insert(user_id, EditSession::new(draft, sequencer));
    }

    /// Run a closure against the member's session.
    pub async fn with<R>(
        &self,
        user_id: UserId,
        f: impl FnOnce(&mut EditSession) -> R,
    ) -> Result<R, CoreError> {
        let mut sessions = self.inner.lock().await;
        let session = sessions
            .get_mut(&user_id)
            .ok_or_else(|| CoreError::NotFound {
                entity: "EditSession",
                id: user_id.to_string(),
            })?;
        Ok(f(session))
    }

    /// Start a save: rejects with a conflict if one is already in flight,
    /// otherwise flags the session and returns a copy of the draft to
    /// persist. Edits made after this point belong to the next save.
    pub async fn begin_save(&self, user_id: UserId) -> Result<ProfileDraft, CoreError> {
        self.with(user_id, |session| {
            if session.is_saving {
                return Err(CoreError::Conflict(
                    "A save is already in progress".to_string(),
                ));
            }
            session.is_saving = true;
            Ok(session.draft.clone())
        })
        .await?
    }

    /// Finish a save. On success, pass back the draft that was persisted:
    /// it becomes the new snapshot, zeroing the change tracker against
    /// the saved state. On failure pass `None`; the snapshot and draft
    /// are left exactly as they were.
    pub async fn finish_save(&self, user_id: UserId, saved: Option<ProfileDraft>) {
        // The session may have been closed mid-save; nothing to unwind.
        let _ = self
            .with(user_id, |session| {
                session.is_saving = false;
                if let Some(saved) = saved {
                    session.snapshot = saved;
                }
            })
            .await;
    }

    /// Discard a session. Returns whether one existed.
    pub async fn close(&self, user_id: UserId) -> bool {
        self.inner.lock().await.remove(&user_id).is_some()
    }
}
