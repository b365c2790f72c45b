//! [`EntryStore`] implementations backed by the entry repositories.
//!
//! One adapter per entry category; each holds a pool clone so the core
//! reconciler can drive the table without knowing about sqlx.

use async_trait::async_trait;
use majlis_core::entry::{EducationEntry, ProjectEntry, RoleEntry};
use majlis_core::reconcile::{EntryStore, StoreError};
use majlis_core::types::{EntryId, UserId};

use crate::models::education_record::EducationRecordWrite;
use crate::models::member_project::MemberProjectWrite;
use crate::models::role_assignment::RoleAssignmentWrite;
use crate::repositories::{EducationRecordRepo, MemberProjectRepo, RoleAssignmentRepo};
use crate::DbPool;

fn store_err(e: sqlx::Error) -> StoreError {
    StoreError(e.to_string())
}

/// Role assignments as an [`EntryStore`].
#[derive(Clone)]
pub struct RoleAssignmentStore {
    pool: DbPool,
}

impl RoleAssignmentStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EntryStore<RoleEntry> for RoleAssignmentStore {
    async fn list_ids(&self, owner: UserId) -> Result<Vec<EntryId>, StoreError> {
        RoleAssignmentRepo::list_ids_by_user(&self.pool, owner)
            .await
            .map_err(store_err)
    }

    async fn upsert(&self, owner: UserId, rows: &[RoleEntry]) -> Result<(), StoreError> {
        let writes: Vec<RoleAssignmentWrite> = rows.iter().map(RoleAssignmentWrite::from).collect();
        RoleAssignmentRepo::upsert_many(&self.pool, owner, &writes)
            .await
            .map_err(store_err)
    }

    async fn delete(&self, owner: UserId, ids: &[EntryId]) -> Result<(), StoreError> {
        RoleAssignmentRepo::delete_by_ids(&self.pool, owner, ids)
            .await
            .map(|_| ())
            .map_err(store_err)
    }

    async fn delete_all(&self, owner: UserId) -> Result<(), StoreError> {
        RoleAssignmentRepo::delete_by_user(&self.pool, owner)
            .await
            .map(|_| ())
            .map_err(store_err)
    }
}

/// Member projects as an [`EntryStore`].
#[derive(Clone)]
pub struct MemberProjectStore {
    pool: DbPool,
}

impl MemberProjectStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EntryStore<ProjectEntry> for MemberProjectStore {
    async fn list_ids(&self, owner: UserId) -> Result<Vec<EntryId>, StoreError> {
        MemberProjectRepo::list_ids_by_user(&self.pool, owner)
            .await
            .map_err(store_err)
    }

    async fn upsert(&self, owner: UserId, rows: &[ProjectEntry]) -> Result<(), StoreError> {
        let writes: Vec<MemberProjectWrite> = rows.iter().map(MemberProjectWrite::from).collect();
        MemberProjectRepo::upsert_many(&self.pool, owner, &writes)
            .await
            .map_err(store_err)
    }

    async fn delete(&self, owner: UserId, ids: &[EntryId]) -> Result<(), StoreError> {
        MemberProjectRepo::delete_by_ids(&self.pool, owner, ids)
            .await
            .map(|_| ())
            .map_err(store_err)
    }

    async fn delete_all(&self, owner: UserId) -> Result<(), StoreError> {
        MemberProjectRepo::delete_by_user(&self.pool, owner)
            .await
            .map(|_| ())
            .map_err(store_err)
    }
}

/// Education records as an [`EntryStore`].
#[derive(Clone)]
pub struct EducationRecordStore {
    pool: DbPool,
}

impl EducationRecordStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EntryStore<EducationEntry> for EducationRecordStore {
    async fn list_ids(&self, owner: UserId) -> Result<Vec<EntryId>, StoreError> {
        EducationRecordRepo::list_ids_by_user(&self.pool, owner)
            .await
            .map_err(store_err)
    }

    async fn upsert(&self, owner: UserId, rows: &[EducationEntry]) -> Result<(), StoreError> {
        let writes: Vec<EducationRecordWrite> =
            rows.iter().map(EducationRecordWrite::from).collect();
        EducationRecordRepo::upsert_many(&self.pool, owner, &writes)
            .await
            .map_err(store_err)
    }

    async fn delete(&self, owner: UserId, ids: &[EntryId]) -> Result<(), StoreError> {
        EducationRecordRepo::delete_by_ids(&self.pool, owner, ids)
            .await
            .map(|_| ())
            .map_err(store_err)
    }

    async fn delete_all(&self, owner: UserId) -> Result<(), StoreError> {
        EducationRecordRepo::delete_by_user(&self.pool, owner)
            .await
            .map(|_| ())
            .map_err(store_err)
    }
}
