//! Endpoint-to-leaf distribution under the spread and fill policies.

use std::collections::BTreeMap;
use std::iter;

use itertools::Itertools;

use crate::capacity;
use crate::models::{
    DistributionPolicy, EndpointGroup, LeafAssignment, PerLeafDistribution, PortSpec,
    SplitConfiguration,
};

/// Assigns every endpoint to a leaf and reports the per-leaf breakdown.
///
/// Groups are expanded in the order supplied. Every group speed must be
/// servable on `primary`; the synthesizer rejects unsupported groups before
/// distribution runs.
pub fn distribute(
    groups: &[EndpointGroup],
    leaf_count: u32,
    primary: &PortSpec,
    downlinks_per_leaf: u32,
    policy: DistributionPolicy,
) -> PerLeafDistribution {
    if leaf_count == 0 {
        return PerLeafDistribution {
            per_leaf: Vec::new(),
        };
    }

    let speeds = flatten(groups);
    let per_leaf_counts = match policy {
        DistributionPolicy::Spread => spread(&speeds, leaf_count),
        DistributionPolicy::Fill => fill(&speeds, leaf_count, primary, downlinks_per_leaf),
    };

    let per_leaf = per_leaf_counts
        .into_iter()
        .enumerate()
        .map(|(index, endpoint_counts)| {
            let split_configurations = endpoint_counts
                .iter()
                .map(|(&speed, &count)| {
                    // Nonzero: unsupported speeds were rejected upstream.
                    let split_factor = capacity::capacity_per_port(primary, speed).max(1);
                    (
                        speed,
                        SplitConfiguration {
                            split_factor,
                            cable_count: count.div_ceil(split_factor),
                        },
                    )
                })
                .collect();
            LeafAssignment {
                leaf: index as u32 + 1,
                endpoint_count: endpoint_counts.values().sum(),
                endpoint_counts,
                split_configurations,
            }
        })
        .collect();

    PerLeafDistribution { per_leaf }
}

/// Per-speed endpoint totals across all groups, as entered.
pub fn endpoint_totals(groups: &[EndpointGroup]) -> BTreeMap<u32, u32> {
    let mut totals = BTreeMap::new();
    for group in groups {
        *totals.entry(group.speed_gbps).or_insert(0) += group.count;
    }
    totals
}

/// Expands groups into one entry per endpoint, preserving group order.
fn flatten(groups: &[EndpointGroup]) -> Vec<u32> {
    groups
        .iter()
        .flat_map(|group| iter::repeat_n(group.speed_gbps, group.count as usize))
        .collect()
}

/// Round-robin: endpoint `i` lands on leaf `i % leaf_count`.
fn spread(speeds: &[u32], leaf_count: u32) -> Vec<BTreeMap<u32, u32>> {
    let mut leaves = vec![BTreeMap::new(); leaf_count as usize];
    for (i, &speed) in speeds.iter().enumerate() {
        *leaves[i % leaf_count as usize].entry(speed).or_insert(0) += 1;
    }
    leaves
}

/// Sequential packing against the physical downlink budget.
///
/// Each endpoint costs `1 / capacity_per_port(speed)` of a physical port.
/// Costs are tracked in integer units scaled by the LCM of the distinct
/// capacities, so the packing boundary is exact even for breakout factors
/// that are not powers of two. The last leaf absorbs whatever remains and
/// may run past the nominal budget.
fn fill(
    speeds: &[u32],
    leaf_count: u32,
    primary: &PortSpec,
    downlinks_per_leaf: u32,
) -> Vec<BTreeMap<u32, u32>> {
    let mut leaves = vec![BTreeMap::new(); leaf_count as usize];

    let capacities: BTreeMap<u32, u64> = speeds
        .iter()
        .unique()
        .map(|&speed| {
            (
                speed,
                capacity::capacity_per_port(primary, speed).max(1) as u64,
            )
        })
        .collect();
    let unit = capacities.values().fold(1u64, |acc, &c| lcm(acc, c));
    let budget = downlinks_per_leaf as u64 * unit;

    let last = leaf_count as usize - 1;
    let mut leaf = 0usize;
    let mut used = 0u64;
    for &speed in speeds {
        let cost = unit / capacities[&speed];
        if used + cost > budget && leaf < last {
            leaf += 1;
            used = 0;
        }
        used += cost;
        *leaves[leaf].entry(speed).or_insert(0) += 1;
    }
    leaves
}

fn gcd(a: u64, b: u64) -> u64 {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}

fn lcm(a: u64, b: u64) -> u64 {
    a / gcd(a, b) * b
}
