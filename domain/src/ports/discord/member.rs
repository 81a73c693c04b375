use domain_shared::discord::{RoleId, UserId};

/// A guild member as currently known by Discord. Never cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub user_id: UserId,
    pub role_ids: Vec<RoleId>,
}

impl Member {
    pub fn has_role(&self, role_id: RoleId) -> bool {
        self.role_ids.contains(&role_id)
    }
}
