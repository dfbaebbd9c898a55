use crate::utils::parser::ParseError;
use lattix::core::io::sites::SiteWriteError;
use lattix::engine::error::EngineError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    /// Lattice construction or growth failed.
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// A setting resolved from the file, flags or `-S` is unusable.
    #[error("Invalid setting: {0}")]
    Config(String),

    #[error("Config file '{path}' is not valid lattix TOML: {source}", path = path.display())]
    ConfigFile {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Bad --period value: {0}")]
    Period(#[from] ParseError),

    #[error("Could not write site table to '{path}': {source}", path = path.display())]
    SiteTable {
        path: PathBuf,
        #[source]
        source: SiteWriteError,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
