//! Shared bootstrap utilities for client front-ends.
//!
//! Provides configuration loading, oracle assembly, session wiring and
//! scripted replay that can be reused by the CLI or other front-end crates.
pub mod builder;
pub mod config;
pub mod oracles;
pub mod saves;
pub mod script;

pub use builder::{SessionBootstrap, SessionSetup};
pub use config::CliConfig;
pub use oracles::{ContentOracleFactory, OracleFactory};
pub use saves::{SaveInfo, list_saves, load_save};
pub use script::{Script, ScriptStep, ScriptSummary};
