//! Port capacity accounting under breakout constraints.

use crate::models::{EndpointGroup, PortRole, PortSpec, SwitchModel};

/// Total physical ports on a switch, across all port specs.
pub fn total_ports(switch: &SwitchModel) -> u32 {
    switch.ports.iter().map(|spec| spec.count).sum()
}

/// The downlink-capable port spec: only the first declared spec is
/// consulted, per the primary-port-spec simplification.
pub fn primary_ports(switch: &SwitchModel) -> Option<&PortSpec> {
    switch.ports.first()
}

/// Role of the port spec at `index` within its switch model.
pub fn port_role(index: usize) -> PortRole {
    if index == 0 {
        PortRole::Primary
    } else {
        PortRole::Other
    }
}

/// How many endpoints of `endpoint_speed_gbps` one physical port serves.
///
/// Returns 0 ("unsupported") unless the port's max speed divides evenly into
/// the endpoint speed AND the resulting breakout factor is declared in
/// `split_support`. Factor 1 is always allowed. A speed that divides
/// arithmetically but has no declared split factor is still rejected: the
/// hardware cannot be configured that way.
pub fn capacity_per_port(spec: &PortSpec, endpoint_speed_gbps: u32) -> u32 {
    if endpoint_speed_gbps == 0 || spec.max_speed_gbps % endpoint_speed_gbps != 0 {
        return 0;
    }
    let factor = spec.max_speed_gbps / endpoint_speed_gbps;
    if factor == 1 || spec.split_support.contains(&factor) {
        factor
    } else {
        0
    }
}

/// Physical ports needed to serve a whole endpoint group, or `None` when the
/// group's speed is unsupported on this spec (callers must reject the group
/// before any sizing happens).
pub fn required_ports(spec: &PortSpec, group: &EndpointGroup) -> Option<u32> {
    match capacity_per_port(spec, group.speed_gbps) {
        0 => None,
        capacity => Some(group.count.div_ceil(capacity)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(count: u32, max_speed_gbps: u32, split_support: Vec<u32>) -> PortSpec {
        PortSpec {
            port_type: "OSFP".to_string(),
            count,
            max_speed_gbps,
            split_support,
        }
    }

    #[test]
    fn test_total_ports_sums_all_specs() {
        let switch = SwitchModel {
            model: "X".to_string(),
            technology: "Ethernet".to_string(),
            ports: vec![spec(32, 400, vec![1, 2, 4]), spec(2, 10, vec![])],
        };
        assert_eq!(total_ports(&switch), 34);
    }

    #[test]
    fn test_primary_spec_is_first_declared() {
        let switch = SwitchModel {
            model: "X".to_string(),
            technology: "Ethernet".to_string(),
            ports: vec![spec(32, 400, vec![1, 2, 4]), spec(2, 10, vec![])],
        };
        assert_eq!(primary_ports(&switch).map(|p| p.max_speed_gbps), Some(400));
        assert_eq!(port_role(0), PortRole::Primary);
        assert_eq!(port_role(1), PortRole::Other);
    }

    #[test]
    fn test_capacity_with_breakout() {
        // 400G port, splits 1/2/4: four 100G endpoints per port.
        let spec = spec(32, 400, vec![1, 2, 4]);
        assert_eq!(capacity_per_port(&spec, 400), 1);
        assert_eq!(capacity_per_port(&spec, 200), 2);
        assert_eq!(capacity_per_port(&spec, 100), 4);
    }

    #[test]
    fn test_capacity_rejects_undeclared_split() {
        // 8 divides 400G into 50G, but the split set stops at 4.
        let spec = spec(32, 400, vec![1, 2, 4]);
        assert_eq!(capacity_per_port(&spec, 50), 0);
    }

    #[test]
    fn test_capacity_rejects_uneven_division() {
        let spec = spec(32, 400, vec![1, 2, 4]);
        assert_eq!(capacity_per_port(&spec, 300), 0);
        assert_eq!(capacity_per_port(&spec, 800), 0);
    }

    #[test]
    fn test_factor_one_is_implicit() {
        let spec = spec(40, 200, vec![]);
        assert_eq!(capacity_per_port(&spec, 200), 1);
    }

    #[test]
    fn test_required_ports_rounds_up() {
        // Scenario C: 20 endpoints at 100G on 400G/x4 ports need 5 ports.
        let spec = spec(32, 400, vec![1, 2, 4]);
        let group = EndpointGroup {
            count: 20,
            speed_gbps: 100,
        };
        assert_eq!(required_ports(&spec, &group), Some(5));

        let odd = EndpointGroup {
            count: 21,
            speed_gbps: 100,
        };
        assert_eq!(required_ports(&spec, &odd), Some(6));
    }

    #[test]
    fn test_required_ports_unsupported_speed() {
        let spec = spec(32, 100, vec![1, 2, 4]);
        let group = EndpointGroup {
            count: 4,
            speed_gbps: 800,
        };
        assert_eq!(required_ports(&spec, &group), None);
    }
}
