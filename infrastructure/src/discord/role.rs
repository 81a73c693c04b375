use crate::discord::role_id::serenity_to_domain_role_id;
use domain::permissions::Permissions;
use domain::ports::discord::Role;

pub fn serenity_to_domain_role(role: serenity::all::Role) -> Role {
    let serenity::all::Role {
        id,
        name,
        position,
        permissions,
        ..
    } = role;

    Role {
        role_id: serenity_to_domain_role_id(id),
        name,
        position,
        permissions: Permissions(permissions.bits()),
    }
}
