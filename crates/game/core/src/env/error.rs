//! Oracle access errors.

use crate::error::{ErrorSeverity, GameError};

/// Errors that occur when accessing oracle data.
///
/// A missing oracle is fatal: no action can be validated without it.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    /// CatalogOracle is not available in the environment.
    #[error("CatalogOracle not available")]
    CatalogNotAvailable,

    /// GameConfig is not available in the environment.
    #[error("GameConfig not available")]
    ConfigNotAvailable,
}

impl GameError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::CatalogNotAvailable => "ORACLE_CATALOG_NOT_AVAILABLE",
            Self::ConfigNotAvailable => "ORACLE_CONFIG_NOT_AVAILABLE",
        }
    }
}
