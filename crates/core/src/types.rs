/// Users are keyed by UUID (the identity provider hands us opaque subjects,
/// never sequential ids).
pub type UserId = uuid::Uuid;

/// Entry ids are client-generated UUIDs, stable for the lifetime of the
/// record and reused as the persistence-layer primary key.
pub type EntryId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
