/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Opaque user identity. There is no user table; the id is whatever the
/// caller presents (or the configured default).
pub type UserId = String;
