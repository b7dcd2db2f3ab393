//! Data models for switch catalogs and fabric designs.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A switch hardware catalog entry. Loaded once at startup and never mutated.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SwitchModel {
    pub model: String,
    pub technology: String,
    pub ports: Vec<PortSpec>,
}

/// One homogeneous block of physical ports on a switch.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PortSpec {
    pub port_type: String,
    /// Number of physical ports in this block.
    pub count: u32,
    /// Maximum speed a single port runs at, in Gbps.
    pub max_speed_gbps: u32,
    /// Supported breakout factors: a port at `max_speed_gbps` may be split
    /// into `k` sub-ports of `max_speed_gbps / k` only if `k` is listed here.
    /// `k = 1` (unsplit) is always valid even when absent.
    pub split_support: Vec<u32>,
}

/// Role of a port spec within a switch model. Only the first declared spec
/// (`Primary`) is consulted for downlink capacity; heterogeneous switches are
/// deliberately simplified to their primary block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PortRole {
    Primary,
    Other,
}

/// A user-entered row of endpoints: `count` endpoints, all at one speed.
/// The speed travels as a label like `"100G"`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct EndpointGroup {
    pub count: u32,
    #[serde(
        rename = "speed",
        serialize_with = "speed_as_label",
        deserialize_with = "label_as_speed"
    )]
    pub speed_gbps: u32,
}

/// How leaf ports are divided between uplinks and downlinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlockingPolicy {
    /// Half the leaf ports go to uplinks: no oversubscription.
    NonBlocking,
    /// Caller-supplied uplink count per leaf (must be positive).
    Custom { uplinks_per_leaf: u32 },
}

/// How endpoints are assigned to leaves.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DistributionPolicy {
    /// Round-robin across leaves.
    #[default]
    Spread,
    /// Pack each leaf to its downlink capacity before advancing.
    Fill,
}

/// The computed fabric shape.
///
/// Invariants: `uplinks_per_leaf + downlinks_per_leaf` equals the leaf's
/// total port count, and `links_per_leaf_per_spine * spine_count` equals
/// `uplinks_per_leaf`.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct Topology {
    pub fabric: &'static str,
    pub blocking: BlockingPolicy,
    pub uplinks_per_leaf: u32,
    pub downlinks_per_leaf: u32,
    pub links_per_leaf_per_spine: u32,
    pub leaf_count: u32,
    pub spine_count: u32,
}

/// Breakout configuration one leaf uses for one endpoint speed.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
pub struct SplitConfiguration {
    /// Sub-ports per physical port (1 = unsplit).
    pub split_factor: u32,
    /// Physical ports (cables) this speed occupies on the leaf.
    pub cable_count: u32,
}

/// Endpoints assigned to a single leaf, broken down by speed.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct LeafAssignment {
    /// Leaf index, 1-based for display.
    pub leaf: u32,
    pub endpoint_count: u32,
    #[serde(serialize_with = "speed_keys_as_labels")]
    pub endpoint_counts: BTreeMap<u32, u32>,
    #[serde(serialize_with = "speed_keys_as_labels")]
    pub split_configurations: BTreeMap<u32, SplitConfiguration>,
}

/// Per-leaf endpoint breakdown. Summing over leaves reproduces the input
/// groups exactly: no endpoint is created, dropped, or duplicated.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct PerLeafDistribution {
    pub per_leaf: Vec<LeafAssignment>,
}

/// Leaf-to-spine cabling at the spine's port speed.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct UplinkCables {
    pub cables: u32,
    pub speed_gbps: u32,
}

/// Downlink cables grouped by breakout configuration, summed across leaves.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct DownlinkCableGroup {
    pub port_speed_gbps: u32,
    pub split_factor: u32,
    pub endpoint_speed_gbps: u32,
    pub cables: u32,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct CableSummary {
    pub uplinks: UplinkCables,
    pub downlinks: Vec<DownlinkCableGroup>,
}

/// The full success payload handed to the rendering/reporting consumers.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct Design {
    pub leaf: SwitchModel,
    pub spine: SwitchModel,
    pub topology: Topology,
    pub distribution: PerLeafDistribution,
    #[serde(serialize_with = "speed_keys_as_labels")]
    pub endpoint_totals: BTreeMap<u32, u32>,
    pub cables: CableSummary,
}

/// The requested endpoints fit on a single switch; no fabric is needed.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct SingleSwitch {
    pub switch: String,
    pub technology: String,
    pub available_ports: u32,
    pub required_ports: u32,
}

/// Result of a synthesis request. `SingleSwitch` is an outcome, not an
/// error: the caller is told to use one switch instead of a fabric.
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(tag = "outcome", rename_all = "kebab-case")]
pub enum Outcome {
    SingleSwitch(SingleSwitch),
    Fabric(Box<Design>),
}

/// Parses a speed label like `"100G"` into Gbps. The suffix is optional and
/// case-insensitive; zero and malformed labels are rejected.
pub fn parse_speed(label: &str) -> Option<u32> {
    let trimmed = label.trim();
    let digits = trimmed.strip_suffix(['G', 'g']).unwrap_or(trimmed);
    match digits.trim_end().parse::<u32>() {
        Ok(gbps) if gbps > 0 => Some(gbps),
        _ => None,
    }
}

/// Formats Gbps back into the `"100G"` label form used on the wire.
pub fn format_speed(gbps: u32) -> String {
    format!("{}G", gbps)
}

fn label_as_speed<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let label = String::deserialize(deserializer)?;
    parse_speed(&label)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid speed label '{}'", label)))
}

fn speed_as_label<S>(gbps: &u32, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format_speed(*gbps))
}

fn speed_keys_as_labels<S, V>(map: &BTreeMap<u32, V>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    V: Serialize,
{
    serializer.collect_map(map.iter().map(|(gbps, v)| (format_speed(*gbps), v)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_speed_labels() {
        assert_eq!(parse_speed("100G"), Some(100));
        assert_eq!(parse_speed("400g"), Some(400));
        assert_eq!(parse_speed(" 25 "), Some(25));
        assert_eq!(parse_speed("0G"), None);
        assert_eq!(parse_speed("fastG"), None);
        assert_eq!(parse_speed(""), None);
    }

    #[test]
    fn test_format_speed_round_trip() {
        assert_eq!(format_speed(800), "800G");
        assert_eq!(parse_speed(&format_speed(200)), Some(200));
    }

    #[test]
    fn test_endpoint_group_wire_format() {
        let group: EndpointGroup =
            serde_json::from_str(r#"{"count": 12, "speed": "100G"}"#).expect("valid group");
        assert_eq!(group.count, 12);
        assert_eq!(group.speed_gbps, 100);

        let back = serde_json::to_string(&group).expect("serializable");
        assert!(back.contains(r#""speed":"100G""#));
    }

    #[test]
    fn test_endpoint_group_rejects_bad_speed() {
        let result: Result<EndpointGroup, _> =
            serde_json::from_str(r#"{"count": 1, "speed": "turbo"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_blocking_policy_tags() {
        let nb: BlockingPolicy = serde_json::from_str(r#""non-blocking""#).expect("unit tag");
        assert_eq!(nb, BlockingPolicy::NonBlocking);

        let custom: BlockingPolicy =
            serde_json::from_str(r#"{"custom": {"uplinks_per_leaf": 8}}"#).expect("struct tag");
        assert_eq!(custom, BlockingPolicy::Custom { uplinks_per_leaf: 8 });
    }

    #[test]
    fn test_speed_keyed_maps_serialize_with_labels() {
        let mut counts = BTreeMap::new();
        counts.insert(100u32, 4u32);
        counts.insert(400u32, 2u32);
        let assignment = LeafAssignment {
            leaf: 1,
            endpoint_count: 6,
            endpoint_counts: counts,
            split_configurations: BTreeMap::new(),
        };

        let json = serde_json::to_string(&assignment).expect("serializable");
        assert!(json.contains(r#""100G":4"#));
        assert!(json.contains(r#""400G":2"#));
    }
}
