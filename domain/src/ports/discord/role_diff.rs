use domain_shared::discord::RoleId;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RoleDiff {
    pub to_assign: Vec<RoleId>,
    pub to_remove: Vec<RoleId>,
}
