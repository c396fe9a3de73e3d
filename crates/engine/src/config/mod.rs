//! Configuration for the lookups.
//! This module handles the data model and loading of the
//! ~/.config/wayfinder/config.json (or `.yaml`) configuration file.

mod io;
mod model;

pub use io::{CONFIG_PATH_ENV, default_config_path, load_config, load_config_from_path, save_config_to_path};
pub use model::{ApiKey, Configuration, Protocol, ProviderSettings, RaisePolicy};
