pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::toml_config::TomlConfig;

pub use adapters::{registry::InMemoryRegistry, storage::LocalStorage};
pub use core::importer::{ImportEngine, PlantLoadPipeline};
pub use domain::ports::ValidationPolicy;
pub use utils::error::{ImportError, Result};
