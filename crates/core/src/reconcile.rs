//! Entry-list reconciliation: synchronize a draft's entry list with its
//! persisted rows without ever opening a data-loss window.
//!
//! The write order is upsert-then-delete. New and surviving rows are
//! written first, keyed by their stable entry ids; only after that write
//! succeeds are rows that vanished from the draft deleted. A failed
//! upsert aborts the save and issues no delete, so the persisted state
//! never passes through a point where previously-saved rows are gone. A
//! failed delete after a successful upsert is recorded but does not fail
//! the save: the leftovers are stale rows, not lost data, and the next
//! save sweeps them again.

use std::collections::HashSet;

use async_trait::async_trait;

use crate::entry::Keyed;
use crate::error::CoreError;
use crate::types::{EntryId, UserId};

/// A persistence-layer failure reported by an [`EntryStore`].
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct StoreError(pub String);

/// The persistence boundary for one entry category: a table keyed by
/// entry id with a foreign key to the owning user.
#[async_trait]
pub trait EntryStore<T: Keyed + Send + Sync>: Send + Sync {
    /// Ids currently persisted for this owner.
    async fn list_ids(&self, owner: UserId) -> Result<Vec<EntryId>, StoreError>;

    /// Insert rows whose id is new, update rows whose id already exists.
    async fn upsert(&self, owner: UserId, rows: &[T]) -> Result<(), StoreError>;

    /// Delete exactly the given ids for this owner.
    async fn delete(&self, owner: UserId, ids: &[EntryId]) -> Result<(), StoreError>;

    /// Delete every row for this owner.
    async fn delete_all(&self, owner: UserId) -> Result<(), StoreError>;
}

/// The writes a reconciliation will perform.
#[derive(Debug, Clone, PartialEq)]
pub enum ReconcilePlan<T> {
    /// The draft list is empty: drop every persisted row.
    DeleteAll,
    /// Upsert the draft rows, then delete the ids that are persisted but
    /// absent from the draft.
    Apply {
        upserts: Vec<T>,
        delete_ids: Vec<EntryId>,
    },
}

/// Compute the plan for one category from the persisted id set and the
/// current draft list. `delete_ids` preserves the persisted order.
pub fn plan_reconcile<T: Keyed + Clone>(persisted: &[EntryId], draft: &[T]) -> ReconcilePlan<T> {
    if draft.is_empty() {
        return ReconcilePlan::DeleteAll;
    }
    let draft_ids: HashSet<EntryId> = draft.iter().map(Keyed::entry_id).collect();
    let delete_ids = persisted
        .iter()
        .copied()
        .filter(|id| !draft_ids.contains(id))
        .collect();
    ReconcilePlan::Apply {
        upserts: draft.to_vec(),
        delete_ids,
    }
}

/// What a reconciliation did. `delete_error` carries a swallowed
/// delete-phase failure so the caller can log it; the save itself is
/// still a success when it is set.
#[derive(Debug)]
pub struct ReconcileOutcome {
    pub upserted: usize,
    pub deleted: usize,
    pub delete_error: Option<StoreError>,
}

/// Reconcile one entry category against its store.
///
/// Errors from `list_ids`, `upsert`, and the empty-draft `delete_all` are
/// fatal and abort the save; the draft is untouched and no delete has
/// been issued. Errors from the trailing delete are swallowed into the
/// outcome.
pub async fn reconcile<T, S>(
    store: &S,
    owner: UserId,
    draft: &[T],
) -> Result<ReconcileOutcome, CoreError>
where
    T: Keyed + Clone + Send + Sync,
    S: EntryStore<T> + ?Sized,
{
    let persisted = store
        .list_ids(owner)
        .await
        .map_err(|e| CoreError::Internal(e.to_string()))?;

    match plan_reconcile(&persisted, draft) {
        ReconcilePlan::DeleteAll => {
            store
                .delete_all(owner)
                .await
                .map_err(|e| CoreError::Internal(e.to_string()))?;
            Ok(ReconcileOutcome {
                upserted: 0,
                deleted: persisted.len(),
                delete_error: None,
            })
        }
        ReconcilePlan::Apply {
            upserts,
            delete_ids,
        } => {
            store
                .upsert(owner, &upserts)
                .await
                .map_err(|e| CoreError::Internal(e.to_string()))?;

            let mut deleted = 0;
            let mut delete_error = None;
            if !delete_ids.is_empty() {
                match store.delete(owner, &delete_ids).await {
                    Ok(()) => deleted = delete_ids.len(),
                    Err(e) => delete_error = Some(e),
                }
            }

            Ok(ReconcileOutcome {
                upserted: upserts.len(),
                deleted,
                delete_error,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::RoleEntry;
    use std::sync::Mutex;
    use uuid::Uuid;

    /// In-memory store double with injectable failures and a call log.
    #[derive(Default)]
    struct MemStore {
        rows: Mutex<Vec<RoleEntry>>,
        fail_upsert: bool,
        fail_delete: bool,
        calls: Mutex<Vec<&'static str>>,
    }

    impl MemStore {
        fn with_rows(rows: Vec<RoleEntry>) -> Self {
            Self {
                rows: Mutex::new(rows),
                ..Default::default()
            }
        }

        fn calls(&self) -> Vec<&'static str> {
            self.calls.lock().unwrap().clone()
        }

        fn ids(&self) -> Vec<EntryId> {
            self.rows.lock().unwrap().iter().map(|r| r.id).collect()
        }
    }

    #[async_trait]
    impl EntryStore<RoleEntry> for MemStore {
        async fn list_ids(&self, _owner: UserId) -> Result<Vec<EntryId>, StoreError> {
            self.calls.lock().unwrap().push("list_ids");
            Ok(self.ids())
        }

        async fn upsert(&self, _owner: UserId, rows: &[RoleEntry]) -> Result<(), StoreError> {
            self.calls.lock().unwrap().push("upsert");
            if self.fail_upsert {
                return Err(StoreError("simulated upsert failure".into()));
            }
            let mut stored = self.rows.lock().unwrap();
            for row in rows {
                if let Some(existing) = stored.iter_mut().find(|r| r.id == row.id) {
                    *existing = row.clone();
                } else {
                    stored.push(row.clone());
                }
            }
            Ok(())
        }

        async fn delete(&self, _owner: UserId, ids: &[EntryId]) -> Result<(), StoreError> {
            self.calls.lock().unwrap().push("delete");
            if self.fail_delete {
                return Err(StoreError("simulated delete failure".into()));
            }
            self.rows.lock().unwrap().retain(|r| !ids.contains(&r.id));
            Ok(())
        }

        async fn delete_all(&self, _owner: UserId) -> Result<(), StoreError> {
            self.calls.lock().unwrap().push("delete_all");
            self.rows.lock().unwrap().clear();
            Ok(())
        }
    }

    fn role_with_id(id: EntryId) -> RoleEntry {
        RoleEntry {
            id,
            ..Default::default()
        }
    }

    fn owner() -> UserId {
        Uuid::new_v4()
    }

    // -- plan --

    #[test]
    fn plan_splits_upserts_and_deletes() {
        let (a, b, c) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        let (d, e) = (Uuid::new_v4(), Uuid::new_v4());

        // Persisted {a, b, c}; draft {a', d, e} where a' reuses id a.
        let mut a_modified = role_with_id(a);
        a_modified.notes = Some("edited".into());
        let draft = vec![a_modified.clone(), role_with_id(d), role_with_id(e)];

        match plan_reconcile(&[a, b, c], &draft) {
            ReconcilePlan::Apply {
                upserts,
                delete_ids,
            } => {
                let upsert_ids: Vec<_> = upserts.iter().map(|r| r.id).collect();
                assert_eq!(upsert_ids, vec![a, d, e]);
                assert_eq!(upserts[0].notes.as_deref(), Some("edited"));
                assert_eq!(delete_ids, vec![b, c]);
            }
            ReconcilePlan::DeleteAll => panic!("expected Apply"),
        }
    }

    #[test]
    fn plan_empty_draft_is_delete_all() {
        let persisted = vec![Uuid::new_v4()];
        let plan: ReconcilePlan<RoleEntry> = plan_reconcile(&persisted, &[]);
        assert_eq!(plan, ReconcilePlan::DeleteAll);
    }

    #[test]
    fn plan_no_deletes_when_all_survive() {
        let a = Uuid::new_v4();
        let draft = vec![role_with_id(a), RoleEntry::new()];
        match plan_reconcile(&[a], &draft) {
            ReconcilePlan::Apply { delete_ids, .. } => assert!(delete_ids.is_empty()),
            ReconcilePlan::DeleteAll => panic!("expected Apply"),
        }
    }

    // -- execution --

    #[tokio::test]
    async fn roundtrip_upserts_then_deletes() {
        let (a, b, c) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        let store = MemStore::with_rows(vec![role_with_id(a), role_with_id(b), role_with_id(c)]);

        let mut a_modified = role_with_id(a);
        a_modified.notes = Some("edited".into());
        let draft = vec![a_modified, RoleEntry::new(), RoleEntry::new()];

        let outcome = reconcile(&store, owner(), &draft).await.unwrap();
        assert_eq!(outcome.upserted, 3);
        assert_eq!(outcome.deleted, 2);
        assert!(outcome.delete_error.is_none());

        // Store now holds exactly the draft ids.
        let mut remaining = store.ids();
        let mut expected: Vec<_> = draft.iter().map(|r| r.id).collect();
        remaining.sort();
        expected.sort();
        assert_eq!(remaining, expected);

        assert_eq!(store.calls(), vec!["list_ids", "upsert", "delete"]);
    }

    #[tokio::test]
    async fn failed_upsert_issues_no_delete() {
        let b = Uuid::new_v4();
        let mut store = MemStore::with_rows(vec![role_with_id(b)]);
        store.fail_upsert = true;

        let draft = vec![RoleEntry::new()];
        let err = reconcile(&store, owner(), &draft).await.unwrap_err();
        assert!(matches!(err, CoreError::Internal(_)));

        // No delete of any kind was attempted; the old row survives.
        assert_eq!(store.calls(), vec!["list_ids", "upsert"]);
        assert_eq!(store.ids(), vec![b]);
    }

    #[tokio::test]
    async fn failed_delete_is_swallowed() {
        let b = Uuid::new_v4();
        let mut store = MemStore::with_rows(vec![role_with_id(b)]);
        store.fail_delete = true;

        let draft = vec![RoleEntry::new()];
        let outcome = reconcile(&store, owner(), &draft).await.unwrap();

        // Save succeeded; the failure is recorded, not raised.
        assert_eq!(outcome.upserted, 1);
        assert_eq!(outcome.deleted, 0);
        assert!(outcome.delete_error.is_some());
    }

    #[tokio::test]
    async fn empty_draft_deletes_all_rows() {
        let store = MemStore::with_rows(vec![RoleEntry::new(), RoleEntry::new()]);

        let outcome = reconcile(&store, owner(), &Vec::<RoleEntry>::new())
            .await
            .unwrap();
        assert_eq!(outcome.upserted, 0);
        assert_eq!(outcome.deleted, 2);
        assert!(store.ids().is_empty());
        assert_eq!(store.calls(), vec!["list_ids", "delete_all"]);
    }

    #[tokio::test]
    async fn no_delete_call_when_nothing_to_delete() {
        let a = Uuid::new_v4();
        let store = MemStore::with_rows(vec![role_with_id(a)]);

        let draft = vec![role_with_id(a)];
        let outcome = reconcile(&store, owner(), &draft).await.unwrap();
        assert_eq!(outcome.deleted, 0);
        assert_eq!(store.calls(), vec!["list_ids", "upsert"]);
    }
}
