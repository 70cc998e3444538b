//! Property-based tests for the decision engines.
//!
//! These tests use proptest to verify invariants around:
//! - DAC / MAC / RBAC grant conditions
//! - first-match rule evaluation and reordering
//! - bounded, newest-first logging

use crate::access::{
    AccessRequest, AccessTables, MacResource, MacTables, MacUser, RbacResource, RbacTables,
    evaluate,
};
use crate::firewall::{FirewallRule, MoveDirection, Packet, match_rule, move_rule};
use crate::log::{ACCESS_EVENT_CAPACITY, EventLog};
use crate::test_support::{dac_resource, dac_user, rbac_user, role};
use proptest::prelude::*;
use secsim_types::{AccessModel, ClearanceLevel, Protocol, RuleAction, SecurityEvent};
use time::OffsetDateTime;

// ============================================================================
// Strategies
// ============================================================================

fn arb_level() -> impl Strategy<Value = ClearanceLevel> {
    prop::sample::select(ClearanceLevel::ALL.to_vec())
}

fn arb_action() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("read".to_string()),
        Just("write".to_string()),
        Just("execute".to_string()),
        "[a-z]{1,8}",
    ]
}

fn arb_permission() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["read", "write", "execute", "modify", "audit"])
        .prop_map(|s| s.to_string())
}

fn arb_endpoint() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["Any", "10.0.0.5", "Admin Network", "203.0.113.7"])
        .prop_map(|s| s.to_string())
}

fn arb_protocol() -> impl Strategy<Value = Protocol> {
    prop::sample::select(vec![Protocol::Tcp, Protocol::Udp, Protocol::Icmp])
}

fn arb_port() -> impl Strategy<Value = u16> {
    prop::sample::select(vec![21u16, 22, 23, 80, 443])
}

fn arb_rule(id: u32) -> impl Strategy<Value = FirewallRule> {
    (
        arb_protocol(),
        arb_port(),
        arb_endpoint(),
        arb_endpoint(),
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(move |(protocol, port, source, destination, allow, enabled)| FirewallRule {
            id,
            name: format!("rule-{id}"),
            protocol,
            port,
            source,
            destination,
            action: if allow {
                RuleAction::Allow
            } else {
                RuleAction::Block
            },
            enabled,
        })
}

fn arb_rules() -> impl Strategy<Value = Vec<FirewallRule>> {
    (1usize..8).prop_flat_map(|n| {
        (0..n)
            .map(|i| arb_rule(i as u32 + 1))
            .collect::<Vec<_>>()
    })
}

fn arb_packet() -> impl Strategy<Value = Packet> {
    (arb_protocol(), arb_port(), arb_endpoint(), arb_endpoint())
        .prop_map(|(protocol, port, source, destination)| {
            Packet::new(protocol, port, source, destination)
        })
}

fn endpoint_ok(rule_value: &str, packet_value: &str) -> bool {
    rule_value == "Any" || rule_value == packet_value
}

fn fully_matches(rule: &FirewallRule, packet: &Packet) -> bool {
    rule.enabled
        && rule.protocol == packet.protocol
        && rule.port == packet.port
        && endpoint_ok(&rule.source, &packet.source)
        && endpoint_ok(&rule.destination, &packet.destination)
}

// ============================================================================
// Access control
// ============================================================================

proptest! {
    #[test]
    fn dac_owner_always_granted(
        action in arb_action(),
        read in any::<bool>(),
        write in any::<bool>(),
        execute in any::<bool>(),
    ) {
        let mut tables = AccessTables::default();
        tables.dac.users.push(dac_user(1, "Owner", true));
        tables.dac.resources.push(dac_resource(1, "file", read, write, execute));

        let request = AccessRequest { model: AccessModel::Dac, user_id: 1, resource_id: 1, action: &action };
        let decision = evaluate(&tables, &request).expect("both ids exist");
        prop_assert!(decision.granted);
    }

    #[test]
    fn dac_non_owner_granted_iff_bit_set(
        action in arb_action(),
        read in any::<bool>(),
        write in any::<bool>(),
        execute in any::<bool>(),
    ) {
        let mut tables = AccessTables::default();
        tables.dac.users.push(dac_user(1, "Guest", false));
        tables.dac.resources.push(dac_resource(1, "file", read, write, execute));

        let expected = match action.as_str() {
            "read" => read,
            "write" => write,
            "execute" => execute,
            _ => false,
        };
        let request = AccessRequest { model: AccessModel::Dac, user_id: 1, resource_id: 1, action: &action };
        let decision = evaluate(&tables, &request).expect("both ids exist");
        prop_assert_eq!(decision.granted, expected);
    }

    #[test]
    fn mac_granted_iff_clearance_dominates(clearance in arb_level(), classification in arb_level()) {
        let tables = AccessTables {
            mac: MacTables {
                users: vec![MacUser { id: 1, name: "U".to_string(), clearance }],
                resources: vec![MacResource { id: 1, name: "R".to_string(), classification }],
            },
            ..AccessTables::default()
        };
        let request = AccessRequest { model: AccessModel::Mac, user_id: 1, resource_id: 1, action: "access" };
        let decision = evaluate(&tables, &request).expect("both ids exist");
        prop_assert_eq!(decision.granted, clearance.index() >= classification.index());
        if !decision.granted {
            prop_assert!(decision.message.contains(clearance.label()));
            prop_assert!(decision.message.contains(classification.label()));
        }
    }

    #[test]
    fn rbac_granted_iff_some_known_role_has_permission(
        role_perms in prop::collection::vec(prop::collection::vec(arb_permission(), 0..4), 1..4),
        assigned in prop::collection::vec(0usize..6, 0..4),
        required in arb_permission(),
    ) {
        // Indexes past the role table produce stale role names.
        let roles: Vec<_> = role_perms
            .iter()
            .enumerate()
            .map(|(i, perms)| {
                let perms: Vec<&str> = perms.iter().map(String::as_str).collect();
                role(i as u32 + 1, &format!("role{i}"), &perms)
            })
            .collect();
        let names: Vec<String> = assigned.iter().map(|i| format!("role{i}")).collect();
        let name_refs: Vec<&str> = names.iter().map(String::as_str).collect();

        let expected = assigned
            .iter()
            .filter_map(|i| role_perms.get(*i))
            .any(|perms| perms.contains(&required));

        let tables = AccessTables {
            rbac: RbacTables {
                users: vec![rbac_user(1, "U", &name_refs)],
                roles,
                resources: vec![RbacResource { id: 1, name: "R".to_string(), required_permission: required.clone() }],
            },
            ..AccessTables::default()
        };
        let request = AccessRequest { model: AccessModel::Rbac, user_id: 1, resource_id: 1, action: "" };
        let decision = evaluate(&tables, &request).expect("both ids exist");
        prop_assert_eq!(decision.granted, expected);
    }

    #[test]
    fn event_log_is_capped_and_newest_first(count in 0usize..40) {
        let mut log = EventLog::default();
        for i in 0..count {
            log.push(SecurityEvent::info(i.to_string(), OffsetDateTime::UNIX_EPOCH));
        }
        prop_assert_eq!(log.len(), count.min(ACCESS_EVENT_CAPACITY));
        let seen: Vec<usize> = log.iter().map(|e| e.message.parse().unwrap()).collect();
        let expected: Vec<usize> = (0..count).rev().take(ACCESS_EVENT_CAPACITY).collect();
        prop_assert_eq!(seen, expected);
    }
}

// ============================================================================
// Firewall
// ============================================================================

proptest! {
    #[test]
    fn match_returns_first_fully_matching_rule(rules in arb_rules(), packet in arb_packet()) {
        let expected = rules.iter().find(|r| fully_matches(r, &packet)).map(|r| r.id);
        prop_assert_eq!(match_rule(&rules, &packet).map(|r| r.id), expected);
    }

    #[test]
    fn concrete_rule_endpoints_never_match_an_any_packet(
        rules in arb_rules(),
        protocol in arb_protocol(),
        port in arb_port(),
    ) {
        let packet = Packet::new(protocol, port, "Any", "Any");
        if let Some(rule) = match_rule(&rules, &packet) {
            prop_assert_eq!(rule.source.as_str(), "Any");
            prop_assert_eq!(rule.destination.as_str(), "Any");
        }
    }

    #[test]
    fn disabling_the_match_falls_through(rules in arb_rules(), packet in arb_packet()) {
        if let Some(first) = match_rule(&rules, &packet).map(|r| r.id) {
            let mut rules = rules.clone();
            for r in rules.iter_mut().filter(|r| r.id == first) {
                r.enabled = false;
            }
            let next = rules.iter().find(|r| fully_matches(r, &packet)).map(|r| r.id);
            prop_assert_eq!(match_rule(&rules, &packet).map(|r| r.id), next);
            prop_assert_ne!(next, Some(first));
        }
    }

    #[test]
    fn move_rule_swaps_exactly_two_or_nothing(
        rules in arb_rules(),
        pick in any::<prop::sample::Index>(),
        up in any::<bool>(),
    ) {
        let index = pick.index(rules.len());
        let id = rules[index].id;
        let direction = if up { MoveDirection::Up } else { MoveDirection::Down };

        let mut moved = rules.clone();
        let changed = move_rule(&mut moved, id, direction);
        prop_assert_eq!(moved.len(), rules.len());

        let at_boundary = (up && index == 0) || (!up && index + 1 == rules.len());
        if at_boundary {
            prop_assert!(!changed);
            prop_assert_eq!(&moved, &rules);
        } else {
            prop_assert!(changed);
            let target = if up { index - 1 } else { index + 1 };
            for i in 0..rules.len() {
                let expected = if i == index {
                    &rules[target]
                } else if i == target {
                    &rules[index]
                } else {
                    &rules[i]
                };
                prop_assert_eq!(&moved[i], expected);
            }
        }
    }
}
