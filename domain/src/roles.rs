use crate::ports::discord::{Member, Role, RoleDiff};
use crate::role_menu::RoleMenuOption;
use domain_shared::discord::RoleId;
use tracing::instrument;

/// The statically configured role lists. Built once at startup and shared
/// read-only for the lifetime of the process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleSelectionPolicy {
    assignable_roles: Vec<RoleId>,
    authorized_roles: Vec<RoleId>,
}

impl RoleSelectionPolicy {
    pub fn new(assignable_roles: Vec<RoleId>, authorized_roles: Vec<RoleId>) -> Self {
        Self {
            assignable_roles,
            authorized_roles,
        }
    }

    pub fn assignable_roles(&self) -> &[RoleId] {
        &self.assignable_roles
    }

    pub fn is_assignable(&self, role_id: RoleId) -> bool {
        self.assignable_roles.contains(&role_id)
    }

    /// An empty authorized list leaves the command open to everyone.
    #[instrument(level = "trace", skip_all)]
    pub fn is_authorized(&self, invoker_roles: &[RoleId], is_administrator: bool) -> bool {
        self.authorized_roles.is_empty()
            || is_administrator
            || self
                .authorized_roles
                .iter()
                .any(|role_id| invoker_roles.contains(role_id))
    }

    /// Menu options in configured order. Ids missing from the registry are
    /// dropped without error.
    #[instrument(level = "trace", skip_all)]
    pub fn menu_options(&self, registry: &[Role]) -> Vec<RoleMenuOption> {
        self.assignable_roles
            .iter()
            .filter_map(|role_id| registry.iter().find(|role| role.role_id == *role_id))
            .map(RoleMenuOption::for_role)
            .collect()
    }

    /// Every other assignable role the member holds is removed; the chosen
    /// role is assigned only when not already held.
    #[instrument(level = "trace", skip_all)]
    pub fn diff_roles(&self, member: &Member, chosen: RoleId) -> RoleDiff {
        let to_remove = self
            .assignable_roles
            .iter()
            .copied()
            .filter(|role_id| *role_id != chosen && member.has_role(*role_id))
            .collect();

        let to_assign = if member.has_role(chosen) {
            vec![]
        } else {
            vec![chosen]
        };

        RoleDiff {
            to_assign,
            to_remove,
        }
    }
}
