use secsim_types::ClearanceLevel;
use std::collections::BTreeSet;

/// Lookup by numeric id within one table.
pub trait Identified {
    fn id(&self) -> u32;
}

pub fn find_by_id<T: Identified>(items: &[T], id: u32) -> Option<&T> {
    items.iter().find(|item| item.id() == id)
}

pub fn find_by_id_mut<T: Identified>(items: &mut [T], id: u32) -> Option<&mut T> {
    items.iter_mut().find(|item| item.id() == id)
}

/// The three DAC permission bits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DacPermission {
    Read,
    Write,
    Execute,
}

impl DacPermission {
    /// Maps an action name onto a permission bit. Names are case-sensitive.
    pub fn from_action(action: &str) -> Option<Self> {
        match action {
            "read" => Some(DacPermission::Read),
            "write" => Some(DacPermission::Write),
            "execute" => Some(DacPermission::Execute),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Permissions {
    pub read: bool,
    pub write: bool,
    pub execute: bool,
}

impl Permissions {
    pub fn new(read: bool, write: bool, execute: bool) -> Self {
        Self {
            read,
            write,
            execute,
        }
    }

    pub fn get(&self, permission: DacPermission) -> bool {
        match permission {
            DacPermission::Read => self.read,
            DacPermission::Write => self.write,
            DacPermission::Execute => self.execute,
        }
    }

    pub fn set(&mut self, permission: DacPermission, value: bool) {
        match permission {
            DacPermission::Read => self.read = value,
            DacPermission::Write => self.write = value,
            DacPermission::Execute => self.execute = value,
        }
    }

    /// Unknown action names are never allowed.
    pub fn allows(&self, action: &str) -> bool {
        DacPermission::from_action(action)
            .map(|p| self.get(p))
            .unwrap_or(false)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DacUser {
    pub id: u32,
    pub name: String,
    pub owner: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DacResource {
    pub id: u32,
    pub name: String,
    pub permissions: Permissions,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MacUser {
    pub id: u32,
    pub name: String,
    pub clearance: ClearanceLevel,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MacResource {
    pub id: u32,
    pub name: String,
    pub classification: ClearanceLevel,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RbacUser {
    pub id: u32,
    pub name: String,
    /// Role names, resolved against the role table at evaluation time.
    pub roles: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Role {
    pub id: u32,
    pub name: String,
    pub permissions: BTreeSet<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RbacResource {
    pub id: u32,
    pub name: String,
    pub required_permission: String,
}

macro_rules! identified {
    ($($ty:ty),* $(,)?) => {
        $(impl Identified for $ty {
            fn id(&self) -> u32 {
                self.id
            }
        })*
    };
}

identified!(DacUser, DacResource, MacUser, MacResource, RbacUser, Role, RbacResource);

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DacTables {
    pub users: Vec<DacUser>,
    pub resources: Vec<DacResource>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MacTables {
    pub users: Vec<MacUser>,
    pub resources: Vec<MacResource>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RbacTables {
    pub users: Vec<RbacUser>,
    pub roles: Vec<Role>,
    pub resources: Vec<RbacResource>,
}

impl RbacTables {
    pub fn role(&self, name: &str) -> Option<&Role> {
        self.roles.iter().find(|r| r.name == name)
    }
}

/// One independent table set per model. Switching models never migrates data.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AccessTables {
    pub dac: DacTables,
    pub mac: MacTables,
    pub rbac: RbacTables,
}

// Mutators return `false` when the id is unknown so callers can treat stale
// references as no-ops.
impl AccessTables {
    pub fn set_owner(&mut self, user_id: u32, owner: bool) -> bool {
        match find_by_id_mut(&mut self.dac.users, user_id) {
            Some(user) => {
                user.owner = owner;
                true
            }
            None => false,
        }
    }

    pub fn set_permission(
        &mut self,
        resource_id: u32,
        permission: DacPermission,
        value: bool,
    ) -> bool {
        match find_by_id_mut(&mut self.dac.resources, resource_id) {
            Some(resource) => {
                resource.permissions.set(permission, value);
                true
            }
            None => false,
        }
    }

    pub fn set_clearance(&mut self, user_id: u32, clearance: ClearanceLevel) -> bool {
        match find_by_id_mut(&mut self.mac.users, user_id) {
            Some(user) => {
                user.clearance = clearance;
                true
            }
            None => false,
        }
    }

    pub fn set_classification(&mut self, resource_id: u32, level: ClearanceLevel) -> bool {
        match find_by_id_mut(&mut self.mac.resources, resource_id) {
            Some(resource) => {
                resource.classification = level;
                true
            }
            None => false,
        }
    }

    /// Assigns a role name. The name is not checked against the role table.
    pub fn assign_role(&mut self, user_id: u32, role: &str) -> bool {
        match find_by_id_mut(&mut self.rbac.users, user_id) {
            Some(user) => {
                if !user.roles.iter().any(|r| r == role) {
                    user.roles.push(role.to_string());
                }
                true
            }
            None => false,
        }
    }

    pub fn revoke_role(&mut self, user_id: u32, role: &str) -> bool {
        match find_by_id_mut(&mut self.rbac.users, user_id) {
            Some(user) => {
                user.roles.retain(|r| r != role);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::classroom_tables;

    #[test]
    fn permissions_reject_unknown_actions() {
        let all = Permissions::new(true, true, true);
        assert!(all.allows("read"));
        assert!(!all.allows("delete"));
        assert!(!all.allows("Read"));
    }

    #[test]
    fn mutators_report_unknown_ids() {
        let mut tables = classroom_tables();
        assert!(tables.set_owner(2, true));
        assert!(tables.dac.users[1].owner);
        assert!(!tables.set_owner(99, true));
        assert!(!tables.set_clearance(99, ClearanceLevel::Secret));
        assert!(!tables.set_permission(99, DacPermission::Read, false));
    }

    #[test]
    fn assign_role_is_idempotent_and_revoke_removes() {
        let mut tables = classroom_tables();
        assert!(tables.assign_role(2, "Admin"));
        assert!(tables.assign_role(2, "Admin"));
        let bob = find_by_id(&tables.rbac.users, 2).unwrap();
        assert_eq!(bob.roles, vec!["User".to_string(), "Admin".to_string()]);

        assert!(tables.revoke_role(2, "User"));
        let bob = find_by_id(&tables.rbac.users, 2).unwrap();
        assert_eq!(bob.roles, vec!["Admin".to_string()]);
    }
}
