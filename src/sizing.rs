//! Spine tier sizing: smallest spine count that fits the port budget.

use tracing::warn;

/// Result of the spine-count search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpinePlan {
    pub spine_count: u32,
    pub links_per_leaf_per_spine: u32,
    /// Set when the fallback path was taken and even one link per leaf per
    /// spine overruns the spine port budget. Non-blocking here; the
    /// orchestrator decides whether the design is rejected.
    pub under_provisioned: bool,
}

/// Picks the spine count for a fabric of `leaf_count` leaves whose leaves
/// each carry `uplinks_per_leaf` uplinks, against spines with `spine_ports`
/// ports.
///
/// Every candidate spine count must divide the uplink count exactly so that
/// each leaf connects to every spine with the same number of links. Among
/// the divisors, the smallest spine count whose per-spine port demand fits
/// is chosen.
pub fn size_spine_tier(uplinks_per_leaf: u32, leaf_count: u32, spine_ports: u32) -> SpinePlan {
    if uplinks_per_leaf == 0 {
        // No uplinks to spread: a single (unused) spine.
        return SpinePlan {
            spine_count: 1,
            links_per_leaf_per_spine: 0,
            under_provisioned: false,
        };
    }

    // Divisor walk in increasing order; uplinks_per_leaf is bounded by
    // the leaf port count, so plain enumeration is enough.
    for spine_count in 1..=uplinks_per_leaf {
        if uplinks_per_leaf % spine_count != 0 {
            continue;
        }
        let links = uplinks_per_leaf / spine_count;
        if links * leaf_count <= spine_ports {
            return SpinePlan {
                spine_count,
                links_per_leaf_per_spine: links,
                under_provisioned: false,
            };
        }
    }

    // No divisor fits. Fall back to the maximum spine count (one link per
    // leaf per spine) and leave the final accept/reject to the caller.
    warn!(
        "no spine count dividing {} uplinks fits {} leaves in {} spine ports; falling back to {} spines",
        uplinks_per_leaf, leaf_count, spine_ports, uplinks_per_leaf
    );
    SpinePlan {
        spine_count: uplinks_per_leaf,
        links_per_leaf_per_spine: 1,
        under_provisioned: leaf_count > spine_ports,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scenario_b_divisor_walk() {
        // U=16, 7 leaves, 32-port spine: S=1 needs 112, S=2 needs 56,
        // S=4 needs 28 <= 32. First feasible divisor wins.
        let plan = size_spine_tier(16, 7, 32);
        assert_eq!(plan.spine_count, 4);
        assert_eq!(plan.links_per_leaf_per_spine, 4);
        assert!(!plan.under_provisioned);
    }

    #[test]
    fn test_single_spine_when_it_fits() {
        // All 16 links from each of 2 leaves fit one 64-port spine.
        let plan = size_spine_tier(16, 2, 64);
        assert_eq!(plan.spine_count, 1);
        assert_eq!(plan.links_per_leaf_per_spine, 16);
    }

    #[test]
    fn test_spine_minimality() {
        // The returned spine count is the smallest feasible divisor: every
        // smaller divisor must overrun the spine port budget.
        for uplinks in [4u32, 6, 12, 16, 24] {
            for leaf_count in [2u32, 5, 9] {
                for spine_ports in [8u32, 24, 48] {
                    let plan = size_spine_tier(uplinks, leaf_count, spine_ports);
                    for smaller in 1..plan.spine_count {
                        if uplinks % smaller != 0 {
                            continue;
                        }
                        assert!(
                            (uplinks / smaller) * leaf_count > spine_ports,
                            "U={} leaves={} ports={}: divisor {} beats returned {}",
                            uplinks,
                            leaf_count,
                            spine_ports,
                            smaller,
                            plan.spine_count
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_degenerate_no_uplinks() {
        let plan = size_spine_tier(0, 3, 32);
        assert_eq!(plan.spine_count, 1);
        assert_eq!(plan.links_per_leaf_per_spine, 0);
        assert!(!plan.under_provisioned);
    }

    #[test]
    fn test_fallback_flags_under_provisioning() {
        // 8 uplinks, 40 leaves, 32-port spine: even one link per leaf per
        // spine needs 40 ports. Max spine count, flagged.
        let plan = size_spine_tier(8, 40, 32);
        assert_eq!(plan.spine_count, 8);
        assert_eq!(plan.links_per_leaf_per_spine, 1);
        assert!(plan.under_provisioned);
    }
}
