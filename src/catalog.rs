//! Switch catalog loading.

use std::fs;
use std::io;

use tracing::info;

use crate::error::CatalogError;
use crate::models::SwitchModel;

/// Catalog compiled into the binary; used when no file override exists.
const DEFAULT_CATALOG: &str = include_str!("../data/switches.json");

/// Loads the switch catalog from `path`, falling back to the built-in
/// catalog when the file does not exist.
///
/// # Errors
///
/// Returns `CatalogError::Io` if the file exists but cannot be read,
/// `CatalogError::JsonParse` if the JSON is malformed, and
/// `CatalogError::InvalidCatalog` if a port spec violates its invariants.
pub fn load_catalog(path: &str) -> Result<Vec<SwitchModel>, CatalogError> {
    let raw = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            info!("no catalog at {}, using the built-in catalog", path);
            DEFAULT_CATALOG.to_string()
        }
        Err(e) => return Err(e.into()),
    };

    let catalog: Vec<SwitchModel> = serde_json::from_str(&raw)?;
    validate(&catalog)?;
    Ok(catalog)
}

/// Port spec invariants: positive max speed, and every split factor divides
/// it into an integer sub-port speed.
fn validate(catalog: &[SwitchModel]) -> Result<(), CatalogError> {
    for switch in catalog {
        for spec in &switch.ports {
            if spec.max_speed_gbps == 0 {
                return Err(CatalogError::InvalidCatalog(format!(
                    "{}: {} ports must have a positive max speed",
                    switch.model, spec.port_type
                )));
            }
            if let Some(&factor) = spec
                .split_support
                .iter()
                .find(|&&factor| factor == 0 || spec.max_speed_gbps % factor != 0)
            {
                return Err(CatalogError::InvalidCatalog(format!(
                    "{}: split factor {} does not divide {}G evenly",
                    switch.model, factor, spec.max_speed_gbps
                )));
            }
        }
    }
    Ok(())
}
