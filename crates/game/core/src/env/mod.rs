//! Traits describing read-only world data.
//!
//! The catalog oracle exposes item definitions (cost, ingredients, limits,
//! footprints). The [`Env`] aggregate bundles it with the balance
//! configuration and the injected clock reading so reducers can access
//! everything they need without hard coupling to concrete implementations.
mod catalog;
mod error;

pub use catalog::{CatalogOracle, CatalogSnapshot, Dimensions, Ingredient, ItemDefinition};
pub use error::OracleError;

use crate::config::GameConfig;
use crate::state::Timestamp;

/// Aggregates read-only inputs required by the reducers.
#[derive(Debug)]
pub struct Env<'a, C>
where
    C: CatalogOracle + ?Sized,
{
    catalog: Option<&'a C>,
    config: Option<&'a GameConfig>,
    now: Timestamp,
}

pub type GameEnv<'a> = Env<'a, dyn CatalogOracle + 'a>;

impl<C> Clone for Env<'_, C>
where
    C: CatalogOracle + ?Sized,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<C> Copy for Env<'_, C> where C: CatalogOracle + ?Sized {}

impl<'a, C> Env<'a, C>
where
    C: CatalogOracle + ?Sized,
{
    pub fn new(catalog: Option<&'a C>, config: Option<&'a GameConfig>, now: Timestamp) -> Self {
        Self {
            catalog,
            config,
            now,
        }
    }

    pub fn with_all(catalog: &'a C, config: &'a GameConfig, now: Timestamp) -> Self {
        Self::new(Some(catalog), Some(config), now)
    }

    pub fn empty() -> Self {
        Self {
            catalog: None,
            config: None,
            now: Timestamp::ZERO,
        }
    }

    /// Same oracles, different clock reading. Used when replaying a
    /// recorded action stream.
    pub fn at(self, now: Timestamp) -> Self {
        Self { now, ..self }
    }

    /// Returns the CatalogOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::CatalogNotAvailable` if no catalog was provided.
    pub fn catalog(&self) -> Result<&'a C, OracleError> {
        self.catalog.ok_or(OracleError::CatalogNotAvailable)
    }

    /// Returns the GameConfig, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::ConfigNotAvailable` if no config was provided.
    pub fn config(&self) -> Result<&'a GameConfig, OracleError> {
        self.config.ok_or(OracleError::ConfigNotAvailable)
    }

    /// Clock reading stamped onto objects created by this action.
    pub fn now(&self) -> Timestamp {
        self.now
    }
}

impl<'a, C> Env<'a, C>
where
    C: CatalogOracle + 'a,
{
    /// Converts this environment into a trait-object based `GameEnv`.
    pub fn into_game_env(self) -> GameEnv<'a> {
        let catalog: Option<&'a dyn CatalogOracle> = self.catalog.map(|catalog| catalog as _);
        Env::new(catalog, self.config, self.now)
    }
}
