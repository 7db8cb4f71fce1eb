// src/config/mod.rs

//! Configuration loading and validation for launchshim.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Locate and load the config file next to the launcher (`loader.rs`).
//! - Validate target path, runtime and platform settings (`validate.rs`).
//!
//! The file is optional: without one, the built-in defaults launch
//! `Release/zebra.exe` directly on Windows and through `mono` elsewhere.

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{
    CONFIG_ENV_VAR, DEFAULT_CONFIG_FILE, default_config_path, load_and_validate,
    load_for_install_dir, load_from_path,
};
pub use model::{LauncherConfig, RawLauncherConfig};
