//! Error types for Team Builder

use thiserror::Error;

/// Why a share token could not be turned back into a team.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The token is not base64, not percent-encoded UTF-8, or not a JSON object
    #[error("Malformed team token: {0}")]
    MalformedToken(String),

    /// The decoded record has no mode (`m`) or no party grid (`t`)
    #[error("Team token is missing its mode or party grid")]
    MissingFields,

    /// The mode tag does not name a known layout
    #[error("Unknown team mode: {0}")]
    UnknownMode(String),
}

/// Input rejected by the team store before anything is written.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Team names must contain something other than whitespace
    #[error("Team name is required")]
    EmptyName,
}

/// Main error type for Team Builder operations
#[derive(Error, Debug)]
pub enum TeamError {
    /// Share token could not be decoded
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Store input failed validation
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Saved team was not found in the store
    #[error("Team not found: {0}")]
    NotFound(String),

    /// Error during serialization/deserialization
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Character catalog could not be read or parsed
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// QR code could not be generated for the given text
    #[error("QR code error: {0}")]
    Qr(String),

    /// Error during key-value store operations
    #[error("Storage error: {0}")]
    Storage(String),

    /// Database creation/opening error
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    /// Transaction error
    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    /// Table error
    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    /// Storage operation error
    #[error("Storage operation error: {0}")]
    StorageOp(#[from] redb::StorageError),

    /// Commit error
    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    /// General I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using TeamError
pub type TeamResult<T> = Result<T, TeamError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TeamError::NotFound("1719000000000".to_string());
        assert_eq!(format!("{}", err), "Team not found: 1719000000000");

        let err: TeamError = ValidationError::EmptyName.into();
        assert_eq!(format!("{}", err), "Team name is required");
    }

    #[test]
    fn test_decode_error_is_transparent() {
        let err: TeamError = DecodeError::UnknownMode("mode9".to_string()).into();
        assert_eq!(format!("{}", err), "Unknown team mode: mode9");
        assert!(matches!(
            err,
            TeamError::Decode(DecodeError::UnknownMode(_))
        ));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let team_err: TeamError = io_err.into();
        assert!(matches!(team_err, TeamError::Io(_)));
    }
}
