//! Core library for Flatini, a flat `key=value` settings store with a
//! desktop editor. Provides validated load/save of one-entry-per-line
//! settings files, a platform settings-location provider, and the editor GUI.

mod gui;
mod location;
pub mod statics;
mod store;

pub use gui::run_gui;
pub use location::{AppIdentity, settings_path, settings_path_under};
pub use store::{SettingsError, SettingsStore};
