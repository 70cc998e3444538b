//! Access-control session: owns the three model tables and the event log.

use secsim_domain::access::DacPermission;
use secsim_domain::access::model::find_by_id;
use secsim_domain::{AccessDecision, AccessRequest, AccessTables, EventLog, evaluate};
use secsim_settings::ResolvedScenario;
use secsim_types::{AccessModel, ClearanceLevel, SecurityEvent};
use time::OffsetDateTime;

/// Action echoed by MAC decisions, which do not distinguish actions.
pub const MAC_ACTION: &str = "access";
/// Action used for DAC attempts when none is given.
pub const DAC_DEFAULT_ACTION: &str = "read";

#[derive(Clone, Debug)]
pub struct AccessSession {
    model: AccessModel,
    tables: AccessTables,
    events: EventLog,
}

impl AccessSession {
    pub fn new(model: AccessModel, tables: AccessTables) -> Self {
        Self {
            model,
            tables,
            events: EventLog::default(),
        }
    }

    /// Starts from a resolved scenario, seeding its initial info events.
    pub fn from_scenario(scenario: &ResolvedScenario, now: OffsetDateTime) -> Self {
        let mut session = Self::new(scenario.model, scenario.tables.clone());
        session.events.push_batch(
            scenario
                .initial_events
                .iter()
                .map(|m| SecurityEvent::info(m.as_str(), now))
                .collect(),
        );
        session
    }

    pub fn model(&self) -> AccessModel {
        self.model
    }

    pub fn tables(&self) -> &AccessTables {
        &self.tables
    }

    /// Newest first, at most ten entries.
    pub fn events(&self) -> &EventLog {
        &self.events
    }

    /// The action an attempt uses when the caller does not name one.
    ///
    /// RBAC reports the resource's required permission since that is what
    /// gets checked.
    pub fn default_action(&self, model: AccessModel, resource_id: u32) -> String {
        match model {
            AccessModel::Dac => DAC_DEFAULT_ACTION.to_string(),
            AccessModel::Mac => MAC_ACTION.to_string(),
            AccessModel::Rbac => find_by_id(&self.tables.rbac.resources, resource_id)
                .map(|r| r.required_permission.clone())
                .unwrap_or_else(|| MAC_ACTION.to_string()),
        }
    }

    /// Evaluates one attempt and appends its event. Unknown ids leave the
    /// log untouched and return `None`.
    pub fn attempt(
        &mut self,
        model: AccessModel,
        user_id: u32,
        resource_id: u32,
        action: &str,
        now: OffsetDateTime,
    ) -> Option<AccessDecision> {
        let request = AccessRequest {
            model,
            user_id,
            resource_id,
            action,
        };
        let Some(decision) = evaluate(&self.tables, &request) else {
            tracing::debug!(%model, user_id, resource_id, "access attempt references unknown id");
            return None;
        };
        tracing::debug!(%model, user_id, resource_id, action, granted = decision.granted, "access decision");
        self.events.push(decision.to_event(now));
        Some(decision)
    }

    /// Makes `model` active and logs the switch. Returns `false` (and logs
    /// nothing) when it already was active.
    pub fn switch_model(&mut self, model: AccessModel, now: OffsetDateTime) -> bool {
        if self.model == model {
            return false;
        }
        tracing::info!(from = %self.model, to = %model, "switching access model");
        self.model = model;
        self.events.push(SecurityEvent::info(
            format!("Switched to {} access control model", model.label()),
            now,
        ));
        true
    }

    pub fn set_owner(&mut self, user_id: u32, owner: bool) -> bool {
        self.tables.set_owner(user_id, owner)
    }

    pub fn set_permission(&mut self, resource_id: u32, permission: DacPermission, value: bool) -> bool {
        self.tables.set_permission(resource_id, permission, value)
    }

    pub fn set_clearance(&mut self, user_id: u32, level: ClearanceLevel) -> bool {
        self.tables.set_clearance(user_id, level)
    }

    pub fn set_classification(&mut self, resource_id: u32, level: ClearanceLevel) -> bool {
        self.tables.set_classification(resource_id, level)
    }

    pub fn assign_role(&mut self, user_id: u32, role: &str) -> bool {
        self.tables.assign_role(user_id, role)
    }

    pub fn revoke_role(&mut self, user_id: u32, role: &str) -> bool {
        self.tables.revoke_role(user_id, role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{classroom, t0};
    use secsim_types::EventKind;

    #[test]
    fn seeded_events_come_from_the_scenario() {
        let session = AccessSession::from_scenario(&classroom(), t0());
        let messages: Vec<&str> = session.events().iter().map(|e| e.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "System initialized with DAC model",
                "Default permissions applied to all resources"
            ]
        );
    }

    #[test]
    fn decision_appends_one_event() {
        let mut session = AccessSession::from_scenario(&classroom(), t0());
        let decision = session
            .attempt(AccessModel::Dac, 2, 2, "write", t0())
            .expect("known ids");
        assert!(!decision.granted);
        assert_eq!(session.events().len(), 3);
        let latest = session.events().latest().expect("event");
        assert_eq!(latest.kind, EventKind::Error);
        assert_eq!(
            latest.message,
            "Access denied: Bob does not have write permission for Application.exe"
        );
    }

    #[test]
    fn unknown_id_leaves_log_untouched() {
        let mut session = AccessSession::from_scenario(&classroom(), t0());
        assert!(session.attempt(AccessModel::Mac, 99, 1, "access", t0()).is_none());
        assert_eq!(session.events().len(), 2);
    }

    #[test]
    fn switching_model_logs_once_and_keeps_events() {
        let mut session = AccessSession::from_scenario(&classroom(), t0());
        assert!(session.switch_model(AccessModel::Rbac, t0()));
        assert!(!session.switch_model(AccessModel::Rbac, t0()));
        assert_eq!(session.model(), AccessModel::Rbac);
        assert_eq!(session.events().len(), 3);
        assert_eq!(
            session.events().latest().expect("event").message,
            "Switched to RBAC access control model"
        );
    }

    #[test]
    fn default_actions_per_model() {
        let session = AccessSession::from_scenario(&classroom(), t0());
        assert_eq!(session.default_action(AccessModel::Dac, 1), "read");
        assert_eq!(session.default_action(AccessModel::Mac, 1), "access");
        assert_eq!(session.default_action(AccessModel::Rbac, 2), "execute");
    }

    #[test]
    fn revoking_a_role_changes_rbac_outcome() {
        let mut session = AccessSession::from_scenario(&classroom(), t0());
        let before = session
            .attempt(AccessModel::Rbac, 2, 3, "", t0())
            .expect("known ids");
        assert!(before.granted);
        assert!(session.revoke_role(2, "User"));
        let after = session
            .attempt(AccessModel::Rbac, 2, 3, "", t0())
            .expect("known ids");
        assert!(!after.granted);
    }
}
