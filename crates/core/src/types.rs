/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Project and task priority. Lower numbers are more urgent; valid values are below 6.
pub type Priority = i32;
