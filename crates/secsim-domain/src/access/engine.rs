use super::model::{
    AccessTables, DacResource, DacUser, MacResource, MacUser, RbacResource, RbacTables, RbacUser,
    find_by_id,
};
use secsim_types::{AccessModel, EventKind, SecurityEvent};
use time::OffsetDateTime;

/// One access attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AccessRequest<'a> {
    pub model: AccessModel,
    pub user_id: u32,
    pub resource_id: u32,
    /// Requested action. DAC checks it against the permission bits, MAC only
    /// echoes it, RBAC uses the resource's required permission instead.
    pub action: &'a str,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccessDecision {
    pub granted: bool,
    pub message: String,
}

impl AccessDecision {
    fn grant(message: String) -> Self {
        Self {
            granted: true,
            message,
        }
    }

    fn deny(message: String) -> Self {
        Self {
            granted: false,
            message,
        }
    }

    /// The event to append to the access log for this decision.
    pub fn to_event(&self, at: OffsetDateTime) -> SecurityEvent {
        SecurityEvent {
            kind: if self.granted {
                EventKind::Success
            } else {
                EventKind::Error
            },
            message: self.message.clone(),
            timestamp: at,
        }
    }
}

/// Evaluate one request under the model it names.
///
/// Returns `None` when the user or resource id is not present in that model's
/// table; callers must not log anything in that case.
pub fn evaluate(tables: &AccessTables, request: &AccessRequest<'_>) -> Option<AccessDecision> {
    match request.model {
        AccessModel::Dac => {
            let user = find_by_id(&tables.dac.users, request.user_id)?;
            let resource = find_by_id(&tables.dac.resources, request.resource_id)?;
            Some(evaluate_dac(user, resource, request.action))
        }
        AccessModel::Mac => {
            let user = find_by_id(&tables.mac.users, request.user_id)?;
            let resource = find_by_id(&tables.mac.resources, request.resource_id)?;
            Some(evaluate_mac(user, resource, request.action))
        }
        AccessModel::Rbac => {
            let user = find_by_id(&tables.rbac.users, request.user_id)?;
            let resource = find_by_id(&tables.rbac.resources, request.resource_id)?;
            Some(evaluate_rbac(&tables.rbac, user, resource))
        }
    }
}

pub fn evaluate_dac(user: &DacUser, resource: &DacResource, action: &str) -> AccessDecision {
    if user.owner || resource.permissions.allows(action) {
        AccessDecision::grant(format!(
            "{} successfully performed {} on {}",
            user.name, action, resource.name
        ))
    } else {
        AccessDecision::deny(format!(
            "Access denied: {} does not have {} permission for {}",
            user.name, action, resource.name
        ))
    }
}

/// Single dominance check: no separate read-down / write-up rules.
pub fn evaluate_mac(user: &MacUser, resource: &MacResource, action: &str) -> AccessDecision {
    if user.clearance.index() >= resource.classification.index() {
        AccessDecision::grant(format!(
            "{} successfully accessed {} ({})",
            user.name, resource.name, action
        ))
    } else {
        AccessDecision::deny(format!(
            "Access denied: {}'s clearance ({}) is insufficient for {} ({})",
            user.name, user.clearance, resource.name, resource.classification
        ))
    }
}

pub fn evaluate_rbac(tables: &RbacTables, user: &RbacUser, resource: &RbacResource) -> AccessDecision {
    let permitted = user
        .roles
        .iter()
        .filter_map(|name| tables.role(name))
        .any(|role| role.permissions.contains(&resource.required_permission));

    if permitted {
        AccessDecision::grant(format!(
            "{} successfully performed {} on {} via role-based permissions",
            user.name, resource.required_permission, resource.name
        ))
    } else {
        AccessDecision::deny(format!(
            "Access denied: {}'s roles do not have {} permission required for {}",
            user.name, resource.required_permission, resource.name
        ))
    }
}
