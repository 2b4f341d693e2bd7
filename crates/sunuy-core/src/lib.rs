pub mod app_config;
pub mod artisans;
pub mod cascade;
pub mod config;
pub mod filter;
pub mod forms;
pub mod locations;
pub mod pagination;
pub mod profession;
pub mod provider;

#[cfg(test)]
pub(crate) mod test_support;

pub use app_config::{AppConfig, Environment};
pub use artisans::{load_catalog, ArtisanRecord, CatalogFile, APP_STORE_URL, PLAY_STORE_URL};
pub use cascade::{CascadingSelector, SelectionState};
pub use config::{load_app_config, load_app_config_from_env};
pub use filter::{filter_catalog, FilterCriteria};
pub use locations::{load_locations, DepartmentNode, LocationIndex, RegionNode};
pub use pagination::{PaginationWindow, DEFAULT_PAGE_SIZE};
pub use profession::Profession;
pub use provider::{DirectoryProvider, StaticDirectory};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read data file {path}: {source}")]
    DataFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse data file: {0}")]
    DataFileParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("unknown profession: {0}")]
    UnknownProfession(String),
}
