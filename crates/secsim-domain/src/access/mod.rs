//! DAC / MAC / RBAC permission evaluation.

mod engine;
pub mod model;

pub use engine::{AccessDecision, AccessRequest, evaluate, evaluate_dac, evaluate_mac, evaluate_rbac};
pub use model::{
    AccessTables, DacPermission, DacResource, DacTables, DacUser, MacResource, MacTables, MacUser,
    Permissions, RbacResource, RbacTables, RbacUser, Role,
};
