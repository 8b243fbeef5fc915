//! Settings file handling

pub mod settings;

pub use settings::{load_settings_file, Settings, SettingsManager};
