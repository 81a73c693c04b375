use crate::permissions::Permissions;
use domain_shared::discord::RoleId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role {
    pub role_id: RoleId,
    pub name: String,
    pub position: u16,
    pub permissions: Permissions,
}
