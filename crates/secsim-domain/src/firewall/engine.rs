use super::model::{DefaultPolicy, FirewallRule, FirewallVerdict, MoveDirection, Packet};
use secsim_types::{TrafficAction, ids};

/// A rule endpoint of `"Any"` matches every packet. A packet labelled `"Any"`
/// is just a label: it only meets rules that say `"Any"` or the same label.
fn endpoint_matches(rule_value: &str, packet_value: &str) -> bool {
    rule_value == ids::ANY || rule_value == packet_value
}

fn rule_matches(rule: &FirewallRule, packet: &Packet) -> bool {
    rule.enabled
        && rule.protocol == packet.protocol
        && rule.port == packet.port
        && endpoint_matches(&rule.source, &packet.source)
        && endpoint_matches(&rule.destination, &packet.destination)
}

/// First enabled rule, in sequence order, that matches every field.
pub fn match_rule<'a>(rules: &'a [FirewallRule], packet: &Packet) -> Option<&'a FirewallRule> {
    rules.iter().find(|rule| rule_matches(rule, packet))
}

/// Full disposition of one packet: disabled firewall, matched rule, or the
/// caller-chosen default policy.
pub fn decide(
    rules: &[FirewallRule],
    packet: &Packet,
    enabled: bool,
    default_policy: DefaultPolicy,
) -> FirewallVerdict {
    if !enabled {
        return FirewallVerdict {
            action: TrafficAction::Allowed,
            matched_rule: None,
            reason: ids::REASON_FIREWALL_DISABLED.to_string(),
        };
    }

    match match_rule(rules, packet) {
        Some(rule) => FirewallVerdict {
            action: rule.traffic_action(),
            matched_rule: Some(rule.id),
            reason: format!("{}{}", ids::REASON_MATCHED_RULE_PREFIX, rule.name),
        },
        None => FirewallVerdict {
            action: default_policy.action(),
            matched_rule: None,
            reason: default_policy.reason().to_string(),
        },
    }
}

/// Swap the rule with its neighbour. Returns `false` (and changes nothing) at
/// either boundary or when the id is unknown.
pub fn move_rule(rules: &mut [FirewallRule], id: u32, direction: MoveDirection) -> bool {
    let Some(index) = rules.iter().position(|r| r.id == id) else {
        return false;
    };

    let target = match direction {
        MoveDirection::Up if index == 0 => return false,
        MoveDirection::Up => index - 1,
        MoveDirection::Down if index + 1 == rules.len() => return false,
        MoveDirection::Down => index + 1,
    };

    rules.swap(index, target);
    true
}

/// Flip a rule's enabled flag. Returns the new state, or `None` for an unknown id.
pub fn toggle_rule(rules: &mut [FirewallRule], id: u32) -> Option<bool> {
    let rule = rules.iter_mut().find(|r| r.id == id)?;
    rule.enabled = !rule.enabled;
    Some(rule.enabled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{classroom_rules, rule};
    use secsim_types::{Protocol, RuleAction};

    fn any_packet(protocol: Protocol, port: u16) -> Packet {
        Packet::new(protocol, port, "Any", "Any")
    }

    #[test]
    fn first_enabled_match_wins_then_falls_through() {
        let mut rules = vec![
            rule(1, "Allow HTTP", 80, "Any", "Any", RuleAction::Allow),
            rule(2, "Block Telnet", 23, "Any", "Any", RuleAction::Block),
        ];
        let packet = any_packet(Protocol::Tcp, 80);

        assert_eq!(match_rule(&rules, &packet).map(|r| r.id), Some(1));

        toggle_rule(&mut rules, 1);
        assert!(match_rule(&rules, &packet).is_none());
    }

    #[test]
    fn disabling_falls_through_to_next_eligible_rule() {
        let mut rules = vec![
            rule(1, "Allow Web", 80, "Any", "Any", RuleAction::Allow),
            rule(2, "Block Web", 80, "Any", "Any", RuleAction::Block),
        ];
        let packet = any_packet(Protocol::Tcp, 80);
        assert_eq!(match_rule(&rules, &packet).map(|r| r.id), Some(1));

        assert_eq!(toggle_rule(&mut rules, 1), Some(false));
        assert_eq!(match_rule(&rules, &packet).map(|r| r.id), Some(2));
    }

    #[test]
    fn protocol_must_match() {
        let rules = classroom_rules();
        assert!(match_rule(&rules, &any_packet(Protocol::Udp, 80)).is_none());
    }

    #[test]
    fn concrete_addresses_must_match_exactly() {
        let rules = classroom_rules();
        let from_admin = Packet::new(Protocol::Tcp, 22, "Admin Network", "10.0.0.15");
        assert_eq!(match_rule(&rules, &from_admin).map(|r| r.id), Some(4));

        let from_elsewhere = Packet::new(Protocol::Tcp, 22, "203.0.113.9", "10.0.0.15");
        assert!(match_rule(&rules, &from_elsewhere).is_none());
    }

    #[test]
    fn any_is_a_wildcard_only_on_the_rule_side() {
        let rules = classroom_rules();
        let unlabelled = Packet::new(Protocol::Tcp, 22, "Any", "10.0.0.15");
        assert!(match_rule(&rules, &unlabelled).is_none());

        let web = Packet::new(Protocol::Tcp, 80, "Any", "Any");
        assert!(match_rule(&rules, &web).is_none());

        let concrete = Packet::new(Protocol::Tcp, 23, "203.0.113.42", "10.0.0.10");
        assert_eq!(match_rule(&rules, &concrete).map(|r| r.id), Some(3));
    }

    #[test]
    fn decide_applies_rule_default_and_disabled_state() {
        let rules = classroom_rules();

        let telnet = decide(&rules, &any_packet(Protocol::Tcp, 23), true, DefaultPolicy::Allow);
        assert_eq!(telnet.action, TrafficAction::Blocked);
        assert_eq!(telnet.matched_rule, Some(3));
        assert_eq!(telnet.reason, "Matched rule: Block Telnet");

        let unmatched = decide(&rules, &any_packet(Protocol::Tcp, 8080), true, DefaultPolicy::Block);
        assert_eq!(unmatched.action, TrafficAction::Blocked);
        assert_eq!(unmatched.matched_rule, None);
        assert_eq!(unmatched.reason, ids::REASON_DEFAULT_DENY);

        let open = decide(&rules, &any_packet(Protocol::Tcp, 8080), true, DefaultPolicy::Allow);
        assert_eq!(open.action, TrafficAction::Allowed);

        let off = decide(&rules, &any_packet(Protocol::Tcp, 23), false, DefaultPolicy::Block);
        assert_eq!(off.action, TrafficAction::Allowed);
        assert_eq!(off.reason, ids::REASON_FIREWALL_DISABLED);
    }

    #[test]
    fn move_rule_is_clamped_at_both_ends() {
        let mut rules = classroom_rules();
        let before = rules.clone();

        assert!(!move_rule(&mut rules, 1, MoveDirection::Up));
        assert!(!move_rule(&mut rules, 5, MoveDirection::Down));
        assert!(!move_rule(&mut rules, 99, MoveDirection::Up));
        assert_eq!(rules, before);
    }

    #[test]
    fn move_rule_swaps_neighbours_only() {
        let mut rules = classroom_rules();
        assert!(move_rule(&mut rules, 3, MoveDirection::Up));
        let order: Vec<u32> = rules.iter().map(|r| r.id).collect();
        assert_eq!(order, vec![1, 3, 2, 4, 5]);

        assert!(move_rule(&mut rules, 3, MoveDirection::Down));
        let order: Vec<u32> = rules.iter().map(|r| r.id).collect();
        assert_eq!(order, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn reordering_changes_which_overlapping_rule_wins() {
        let mut rules = vec![
            rule(1, "Allow Web", 80, "Any", "Any", RuleAction::Allow),
            rule(2, "Block Web", 80, "Any", "Any", RuleAction::Block),
        ];
        move_rule(&mut rules, 2, MoveDirection::Up);
        let verdict = decide(&rules, &any_packet(Protocol::Tcp, 80), true, DefaultPolicy::Allow);
        assert_eq!(verdict.action, TrafficAction::Blocked);
    }

    #[test]
    fn toggle_unknown_rule_is_none() {
        let mut rules = classroom_rules();
        assert_eq!(toggle_rule(&mut rules, 42), None);
    }
}
