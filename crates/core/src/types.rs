/// All entity identifiers are opaque UUIDs, rendered as strings on the wire.
pub type EntityId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
