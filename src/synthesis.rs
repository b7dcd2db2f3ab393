//! Fabric synthesis: input validation, corner cases, and result assembly.

use std::collections::BTreeMap;

use crate::capacity;
use crate::distribution;
use crate::error::SynthesisError;
use crate::models::{
    BlockingPolicy, CableSummary, Design, DistributionPolicy, DownlinkCableGroup, EndpointGroup,
    Outcome, PerLeafDistribution, PortSpec, SingleSwitch, SwitchModel, Topology, UplinkCables,
};
use crate::sizing;

const FABRIC_TYPE: &str = "two-tier-clos";

/// Computes a two-tier Clos fabric for the requested endpoints, or reports
/// why none exists.
///
/// All failures are detected before any topology is assembled; a returned
/// `Design` always satisfies the port budget invariants. The computation is
/// pure: identical inputs produce identical output.
pub fn synthesize(
    leaf: &SwitchModel,
    spine: &SwitchModel,
    groups: &[EndpointGroup],
    blocking: BlockingPolicy,
    policy: DistributionPolicy,
) -> Result<Outcome, SynthesisError> {
    let leaf_ports = capacity::total_ports(leaf);
    let spine_ports = capacity::total_ports(spine);

    let uplinks_per_leaf = match blocking {
        BlockingPolicy::NonBlocking => leaf_ports / 2,
        BlockingPolicy::Custom { uplinks_per_leaf } => uplinks_per_leaf,
    };
    if uplinks_per_leaf >= leaf_ports {
        return Err(SynthesisError::ZeroDownlinkPorts {
            leaf_ports,
            uplinks_per_leaf,
        });
    }
    let downlinks_per_leaf = leaf_ports - uplinks_per_leaf;

    let Some(primary) = capacity::primary_ports(leaf) else {
        // A leaf with downlink ports always has a port spec.
        return Err(SynthesisError::ZeroDownlinkPorts {
            leaf_ports,
            uplinks_per_leaf,
        });
    };

    let mut required_ports_total: u32 = 0;
    for (group_index, group) in groups.iter().enumerate() {
        match capacity::required_ports(primary, group) {
            Some(ports) => required_ports_total = required_ports_total.saturating_add(ports),
            None => {
                return Err(SynthesisError::UnsupportedSpeed {
                    group_index,
                    count: group.count,
                    speed_gbps: group.speed_gbps,
                    max_speed_gbps: primary.max_speed_gbps,
                    split_support: primary.split_support.clone(),
                });
            }
        }
    }

    // Corner case: everything fits on one switch, no fabric needed.
    if required_ports_total <= downlinks_per_leaf {
        return Ok(Outcome::SingleSwitch(SingleSwitch {
            switch: leaf.model.clone(),
            technology: leaf.technology.clone(),
            available_ports: downlinks_per_leaf,
            required_ports: required_ports_total,
        }));
    }

    let leaf_count = required_ports_total.div_ceil(downlinks_per_leaf);
    let plan = sizing::size_spine_tier(uplinks_per_leaf, leaf_count, spine_ports);

    // Corner case: the spine tier cannot take this many leaves. Reject with
    // remediation bounds before anything is assembled.
    let ports_needed = plan.links_per_leaf_per_spine.saturating_mul(leaf_count);
    if ports_needed > spine_ports {
        let max_leaf_count = spine_ports / plan.links_per_leaf_per_spine;
        let total_endpoints: u64 = groups.iter().map(|g| u64::from(g.count)).sum();
        let max_endpoints = (total_endpoints * u64::from(max_leaf_count)
            * u64::from(downlinks_per_leaf)
            / u64::from(required_ports_total)) as u32;
        return Err(SynthesisError::SpineCapacityExceeded {
            leaf_count,
            spine_count: plan.spine_count,
            links_per_leaf_per_spine: plan.links_per_leaf_per_spine,
            spine_ports,
            ports_needed,
            max_leaf_count,
            max_endpoints,
        });
    }

    let distribution =
        distribution::distribute(groups, leaf_count, primary, downlinks_per_leaf, policy);
    let endpoint_totals = distribution::endpoint_totals(groups);
    let cables = cable_summary(leaf_count, uplinks_per_leaf, primary, spine, &distribution);

    Ok(Outcome::Fabric(Box::new(Design {
        leaf: leaf.clone(),
        spine: spine.clone(),
        topology: Topology {
            fabric: FABRIC_TYPE,
            blocking,
            uplinks_per_leaf,
            downlinks_per_leaf,
            links_per_leaf_per_spine: plan.links_per_leaf_per_spine,
            leaf_count,
            spine_count: plan.spine_count,
        },
        distribution,
        endpoint_totals,
        cables,
    })))
}

/// Totals the physical cabling: uplinks at the spine port speed, downlinks
/// grouped by breakout configuration across all leaves.
fn cable_summary(
    leaf_count: u32,
    uplinks_per_leaf: u32,
    primary: &PortSpec,
    spine: &SwitchModel,
    distribution: &PerLeafDistribution,
) -> CableSummary {
    let uplinks = UplinkCables {
        cables: leaf_count.saturating_mul(uplinks_per_leaf),
        speed_gbps: capacity::primary_ports(spine)
            .map(|spec| spec.max_speed_gbps)
            .unwrap_or(0),
    };

    let mut groups: BTreeMap<u32, (u32, u32)> = BTreeMap::new();
    for leaf in &distribution.per_leaf {
        for (&speed, config) in &leaf.split_configurations {
            let entry = groups.entry(speed).or_insert((config.split_factor, 0));
            entry.1 += config.cable_count;
        }
    }
    let downlinks = groups
        .into_iter()
        .map(|(speed, (split_factor, cables))| DownlinkCableGroup {
            port_speed_gbps: primary.max_speed_gbps,
            split_factor,
            endpoint_speed_gbps: speed,
            cables,
        })
        .collect();

    CableSummary { uplinks, downlinks }
}
