//! Error types for fabric synthesis and catalog loading.
//!
//! All synthesis failures are request-scoped and recoverable: the core
//! returns them as values and never constructs a partial topology first.
//! Presenting them to an end user is the caller's concern.

use serde::Serialize;
use thiserror::Error;

/// Failure to load or validate the switch catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Error reading the catalog file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing the catalog JSON.
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Catalog content violates a port spec invariant.
    #[error("invalid catalog: {0}")]
    InvalidCatalog(String),
}

/// A synthesis request that cannot produce a fabric.
///
/// Serializes with an `error` tag in kebab-case so the HTTP layer can hand
/// the variant straight to the reporting consumers.
#[derive(Debug, Error, Clone, PartialEq, Serialize)]
#[serde(tag = "error", rename_all = "kebab-case")]
pub enum SynthesisError {
    /// Uplink allocation consumes the entire leaf port budget.
    #[error("{uplinks_per_leaf} uplinks per leaf leave no downlink ports on a {leaf_ports}-port leaf")]
    ZeroDownlinkPorts { leaf_ports: u32, uplinks_per_leaf: u32 },

    /// An endpoint group's speed has no valid breakout on the leaf's
    /// primary ports.
    #[error("endpoint group {group_index} ({count} x {speed_gbps}G) is not servable by {max_speed_gbps}G ports with split support {split_support:?}")]
    UnsupportedSpeed {
        group_index: usize,
        count: u32,
        speed_gbps: u32,
        max_speed_gbps: u32,
        split_support: Vec<u32>,
    },

    /// The design needs more spine ports than the spine model offers.
    /// Carries remediation bounds: the largest leaf count the spine tier
    /// can take at this link count, and the endpoint count that leaf count
    /// supports for the requested speed mix.
    #[error("{leaf_count} leaves x {links_per_leaf_per_spine} links need {ports_needed} ports per spine, but the spine has {spine_ports}; at most {max_leaf_count} leaves (~{max_endpoints} endpoints) are supportable")]
    SpineCapacityExceeded {
        leaf_count: u32,
        spine_count: u32,
        links_per_leaf_per_spine: u32,
        spine_ports: u32,
        ports_needed: u32,
        max_leaf_count: u32,
        max_endpoints: u32,
    },
}
