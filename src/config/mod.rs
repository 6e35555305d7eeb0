/// Application settings (alert policy, dashboard limits) from config.toml
pub mod settings;

/// Portfolio seed loading from a TOML file
pub mod portfolio;
