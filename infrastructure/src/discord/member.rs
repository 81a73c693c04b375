use crate::discord::role_id::serenity_to_domain_role_id;
use crate::discord::user_id::serenity_to_domain_user_id;
use domain::ports::discord::Member;

pub fn serenity_to_domain_member(member: serenity::all::Member) -> Member {
    Member {
        user_id: serenity_to_domain_user_id(member.user.id),
        role_ids: member
            .roles
            .into_iter()
            .map(serenity_to_domain_role_id)
            .collect(),
    }
}
