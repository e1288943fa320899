//! Error types for formatter construction

use thiserror::Error;

use crate::engine::EngineError;

/// Error returned when a formatter cannot be constructed
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A caller-supplied currency code or alias uses the reserved placeholder
    #[error("currency code `{0}` is reserved for internal substitution")]
    ReservedCode(String),
    /// A caller-supplied custom currency shadows a currency the engine formats natively
    #[error("custom currency `{0}` shadows a currency the engine already formats")]
    NativeCurrencyCollision(String),
    /// The engine rejected the configuration and no fallback applied
    #[error("number engine rejected the configuration: {0}")]
    Engine(#[from] EngineError),
    /// Options could not be read from a configuration document
    #[error("invalid formatter options: {0}")]
    Options(String),
}

pub type Result<T> = std::result::Result<T, Error>;
