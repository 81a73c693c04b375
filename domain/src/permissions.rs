use crate::ports::discord::{Member, Role};
use domain_shared::discord::GuildId;
use std::ops::BitOr;
use tracing::instrument;

/// Discord permission bit set. Only the flags this bot inspects are named.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Permissions(pub u64);

impl Permissions {
    pub const ADMINISTRATOR: Permissions = Permissions(1 << 3);
    pub const MANAGE_ROLES: Permissions = Permissions(1 << 28);

    pub fn contains(self, other: Permissions) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn is_administrator(self) -> bool {
        self.contains(Self::ADMINISTRATOR)
    }

    /// Administrators implicitly hold every permission.
    pub fn can_manage_roles(self) -> bool {
        self.is_administrator() || self.contains(Self::MANAGE_ROLES)
    }
}

impl BitOr for Permissions {
    type Output = Permissions;

    fn bitor(self, rhs: Self) -> Self::Output {
        Permissions(self.0 | rhs.0)
    }
}

/// Guild-level permissions of a member: the `@everyone` role folded together
/// with every role the member holds. Channel overwrites do not apply to role
/// management.
#[instrument(level = "trace", skip_all)]
pub fn guild_permissions(guild_id: GuildId, member: &Member, roles: &[Role]) -> Permissions {
    let everyone_role = guild_id.everyone_role();

    roles
        .iter()
        .filter(|role| role.role_id == everyone_role || member.has_role(role.role_id))
        .fold(Permissions::default(), |permissions, role| {
            permissions | role.permissions
        })
}

/// Position of the member's highest role. A member without roles sits at the
/// `@everyone` position, which is always 0.
#[instrument(level = "trace", skip_all)]
pub fn highest_position(member: &Member, roles: &[Role]) -> u16 {
    roles
        .iter()
        .filter(|role| member.has_role(role.role_id))
        .map(|role| role.position)
        .max()
        .unwrap_or(0)
}

/// Discord refuses to grant or revoke a role at or above the actor's own
/// highest role.
pub fn outranks(actor: &Member, target: &Role, roles: &[Role]) -> bool {
    highest_position(actor, roles) > target.position
}
