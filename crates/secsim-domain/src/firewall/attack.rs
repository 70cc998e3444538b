use super::model::{Packet, PacketDisposition};
use rand::Rng;
use secsim_types::{AttackKind, FirewallMode, Protocol, TrafficAction, ids};

pub const DDOS_BURST: usize = 5;
pub const DDOS_SOURCE_PREFIX: &str = "203.0.113.";
pub const DDOS_TARGET: &str = "10.0.0.5";
pub const PORT_SCAN_SOURCE: &str = "198.51.100.42";
pub const PORT_SCAN_TARGET: &str = "10.0.0.10";
pub const PORT_SCAN_PORTS: [u16; 5] = [22, 23, 80, 443, 3389];
pub const SQL_INJECTION_SOURCE: &str = "192.168.1.200";
pub const SQL_INJECTION_TARGET: &str = "10.0.0.5";

/// Generate the scripted traffic for one attack.
///
/// Outcomes come from out-of-band detectors, not from the rule table: volume
/// and scan detection need only an enabled firewall, payload inspection also
/// needs application mode. Entries are returned in send order.
pub fn synthesize_attack<R: Rng + ?Sized>(
    kind: AttackKind,
    enabled: bool,
    mode: FirewallMode,
    rng: &mut R,
) -> Vec<PacketDisposition> {
    match kind {
        AttackKind::Ddos => (0..DDOS_BURST)
            .map(|_| {
                let host: u8 = rng.random_range(0..255);
                gated(
                    Packet::new(
                        Protocol::Udp,
                        80,
                        format!("{DDOS_SOURCE_PREFIX}{host}"),
                        DDOS_TARGET,
                    ),
                    enabled,
                    ids::REASON_DDOS_PROTECTION,
                )
            })
            .collect(),
        AttackKind::PortScan => PORT_SCAN_PORTS
            .iter()
            .map(|&port| {
                gated(
                    Packet::new(Protocol::Tcp, port, PORT_SCAN_SOURCE, PORT_SCAN_TARGET),
                    enabled,
                    ids::REASON_PORT_SCAN_DETECTION,
                )
            })
            .collect(),
        AttackKind::SqlInjection => {
            let packet = Packet::new(Protocol::Tcp, 80, SQL_INJECTION_SOURCE, SQL_INJECTION_TARGET);
            let detected = enabled && mode == FirewallMode::Application;
            let (action, reason) = if detected {
                (TrafficAction::Blocked, ids::REASON_SQL_INJECTION_DETECTED)
            } else {
                (TrafficAction::Allowed, ids::REASON_SQL_INJECTION_MISSED)
            };
            vec![PacketDisposition {
                packet,
                action,
                reason: reason.to_string(),
            }]
        }
    }
}

fn gated(packet: Packet, enabled: bool, detection: &str) -> PacketDisposition {
    let (action, reason) = if enabled {
        (TrafficAction::Blocked, detection)
    } else {
        (TrafficAction::Allowed, ids::REASON_FIREWALL_DISABLED)
    };
    PacketDisposition {
        packet,
        action,
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const MODES: [FirewallMode; 3] = [
        FirewallMode::Packet,
        FirewallMode::Stateful,
        FirewallMode::Application,
    ];

    #[test]
    fn ddos_burst_is_udp_80_from_random_hosts() {
        let mut rng = StdRng::seed_from_u64(7);
        let batch = synthesize_attack(AttackKind::Ddos, true, FirewallMode::Stateful, &mut rng);

        assert_eq!(batch.len(), DDOS_BURST);
        for entry in &batch {
            assert_eq!(entry.packet.protocol, Protocol::Udp);
            assert_eq!(entry.packet.port, 80);
            assert_eq!(entry.packet.destination, DDOS_TARGET);
            assert!(entry.packet.source.starts_with(DDOS_SOURCE_PREFIX));
            let host: u16 = entry.packet.source[DDOS_SOURCE_PREFIX.len()..].parse().unwrap();
            assert!(host < 255);
            assert_eq!(entry.action, TrafficAction::Blocked);
            assert_eq!(entry.reason, ids::REASON_DDOS_PROTECTION);
        }
    }

    #[test]
    fn ddos_is_reproducible_for_a_seed() {
        let a = synthesize_attack(
            AttackKind::Ddos,
            true,
            FirewallMode::Packet,
            &mut StdRng::seed_from_u64(1),
        );
        let b = synthesize_attack(
            AttackKind::Ddos,
            true,
            FirewallMode::Packet,
            &mut StdRng::seed_from_u64(1),
        );
        assert_eq!(a, b);
    }

    #[test]
    fn port_scan_walks_fixed_ports_in_order() {
        let mut rng = StdRng::seed_from_u64(0);
        let batch = synthesize_attack(AttackKind::PortScan, true, FirewallMode::Packet, &mut rng);
        let ports: Vec<u16> = batch.iter().map(|e| e.packet.port).collect();
        assert_eq!(ports, PORT_SCAN_PORTS.to_vec());
        assert!(batch.iter().all(|e| e.packet.source == PORT_SCAN_SOURCE));
        assert!(batch.iter().all(|e| e.reason == ids::REASON_PORT_SCAN_DETECTION));
    }

    #[test]
    fn disabled_firewall_lets_volume_and_scans_through() {
        let mut rng = StdRng::seed_from_u64(0);
        for kind in [AttackKind::Ddos, AttackKind::PortScan] {
            for mode in MODES {
                let batch = synthesize_attack(kind, false, mode, &mut rng);
                assert!(batch.iter().all(|e| e.action == TrafficAction::Allowed));
                assert!(batch.iter().all(|e| e.reason == ids::REASON_FIREWALL_DISABLED));
            }
        }
    }

    #[test]
    fn sql_injection_blocked_only_by_enabled_application_firewall() {
        let mut rng = StdRng::seed_from_u64(0);
        for mode in MODES {
            for enabled in [true, false] {
                let batch = synthesize_attack(AttackKind::SqlInjection, enabled, mode, &mut rng);
                assert_eq!(batch.len(), 1);
                let expected = if enabled && mode == FirewallMode::Application {
                    TrafficAction::Blocked
                } else {
                    TrafficAction::Allowed
                };
                assert_eq!(batch[0].action, expected, "mode={mode:?} enabled={enabled}");
            }
        }
    }

    #[test]
    fn sql_injection_reason_explains_missed_payload() {
        let mut rng = StdRng::seed_from_u64(0);
        let batch = synthesize_attack(AttackKind::SqlInjection, true, FirewallMode::Stateful, &mut rng);
        assert_eq!(batch[0].reason, ids::REASON_SQL_INJECTION_MISSED);
        assert_eq!(batch[0].packet.port, 80);
    }
}
