//! Save store trait, envelope encoding and an in-memory store.
//!
//! The orchestrator never touches a file or socket itself. It hands a
//! [`SaveEnvelope`] to a [`SaveStore`] and maps the result to a boolean;
//! failures are logged, never retried. [`MemoryStore`] keeps the encoded
//! JSON in memory for tests and headless runs without a save file.

use chrono::Utc;

use colony_types::{ErrorKind, GameState, SaveEnvelope};

/// Version written into every envelope. Loading a different version logs a
/// warning and proceeds with the payload as-is.
pub const SAVE_VERSION: &str = "1.0.0";

/// Errors that can occur while saving or loading.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    /// Reading or writing the backing storage failed.
    #[error("save storage I/O error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// The envelope could not be encoded or decoded.
    #[error("save serialization error: {source}")]
    Serialization {
        /// The underlying JSON error.
        #[from]
        source: serde_json::Error,
    },
}

impl PersistenceError {
    /// Classify this error within the shared taxonomy.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Io { .. } | Self::Serialization { .. } => ErrorKind::PersistenceFailure,
        }
    }
}

/// Backing storage for saved games.
///
/// Implementations hold at most one save; `save` overwrites it.
pub trait SaveStore: Send {
    /// Persist an envelope, replacing any previous save.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] if the envelope cannot be encoded or
    /// written.
    fn save(&mut self, envelope: &SaveEnvelope) -> Result<(), PersistenceError>;

    /// Read the stored envelope, or `None` if nothing has been saved.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] if the storage cannot be read or holds
    /// a malformed envelope.
    fn load(&mut self) -> Result<Option<SaveEnvelope>, PersistenceError>;
}

/// Wrap a state in a versioned, timestamped envelope.
pub fn envelope(state: &GameState) -> SaveEnvelope {
    SaveEnvelope {
        state: state.clone(),
        timestamp: Utc::now().timestamp_millis(),
        version: SAVE_VERSION.to_owned(),
    }
}

/// Encode an envelope as pretty-printed JSON.
///
/// # Errors
///
/// Returns [`PersistenceError::Serialization`] if encoding fails.
pub fn encode(envelope: &SaveEnvelope) -> Result<String, PersistenceError> {
    Ok(serde_json::to_string_pretty(envelope)?)
}

/// Decode an envelope from JSON.
///
/// # Errors
///
/// Returns [`PersistenceError::Serialization`] if the text is not a valid
/// envelope.
pub fn decode(json: &str) -> Result<SaveEnvelope, PersistenceError> {
    Ok(serde_json::from_str(json)?)
}

/// A store that keeps the encoded save in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    encoded: Option<String>,
}

impl MemoryStore {
    /// Create an empty store.
    pub const fn new() -> Self {
        Self { encoded: None }
    }

    /// Create a store pre-loaded with raw text (may be malformed).
    pub const fn with_raw(raw: String) -> Self {
        Self { encoded: Some(raw) }
    }

    /// The raw encoded save, if any.
    pub fn raw(&self) -> Option<&str> {
        self.encoded.as_deref()
    }
}

impl SaveStore for MemoryStore {
    fn save(&mut self, envelope: &SaveEnvelope) -> Result<(), PersistenceError> {
        self.encoded = Some(encode(envelope)?);
        Ok(())
    }

    fn load(&mut self) -> Result<Option<SaveEnvelope>, PersistenceError> {
        self.encoded.as_deref().map(decode).transpose()
    }
}
