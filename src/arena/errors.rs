use thiserror::Error;

/// Errors that can arise inside the arena engine or its storage layer.
#[derive(Debug, Error)]
pub enum ArenaError {
    /// Wrapper around sled's error type.
    #[error("sled error: {0}")]
    Sled(#[from] sled::Error),

    /// Wrapper around bincode serialization and deserialization errors.
    #[error("serialization error: {0}")]
    Bincode(#[from] bincode::Error),

    /// Wrapper around IO errors (directory creation, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Returned when deserializing a record with an unexpected schema version.
    #[error("schema mismatch for {entity}: expected {expected}, got {found}")]
    SchemaMismatch {
        entity: &'static str,
        expected: u8,
        found: u8,
    },

    /// A fight referenced an opponent that does not exist. Should not occur
    /// under correct index maintenance; the offending command is dropped.
    #[error("missing opponent {opponent} for entity {entity}")]
    MissingOpponent { entity: i64, opponent: i64 },

    /// Internal error (unexpected state combinations, torn records).
    #[error("internal error: {0}")]
    Internal(String),
}
