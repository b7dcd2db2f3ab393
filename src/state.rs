use std::env;

use tera::Tera;

use crate::models::SwitchModel;

/// Application configuration from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address to bind the HTTP server to.
    pub bind_address: String,
    /// Path to a switch catalog file overriding the built-in catalog.
    pub catalog_path: String,
}

impl Config {
    /// Creates Config from environment variables with defaults.
    pub fn from_env() -> Self {
        Self {
            bind_address: env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:8201".into()),
            catalog_path: env::var("CATALOG_PATH").unwrap_or_else(|_| "data/switches.json".into()),
        }
    }
}

/// Shared application state passed to all request handlers.
///
/// The catalog is read-only after load, so concurrent synthesis requests
/// share it without locking.
#[derive(Debug)]
pub struct AppState {
    /// Template engine for rendering the designer page.
    pub tera: Tera,
    /// Switch hardware catalog.
    pub catalog: Vec<SwitchModel>,
}

impl AppState {
    pub fn new(tera: Tera, catalog: Vec<SwitchModel>) -> Self {
        Self { tera, catalog }
    }

    /// Looks up a catalog entry by model name, case-insensitively.
    pub fn find_switch(&self, model: &str) -> Option<&SwitchModel> {
        self.catalog
            .iter()
            .find(|s| s.model.eq_ignore_ascii_case(model))
    }
}
