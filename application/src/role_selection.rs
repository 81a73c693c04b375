use crate::in_flight::InFlightChanges;
use application_ports::role_selection::{
    RoleMenuDto, RoleMenuRequest, RoleOptionDto, RoleSelectionError, RoleSelectionPort,
    RoleSubmission, SelectedRoleDto,
};
use async_trait::async_trait;
use domain::permissions::{guild_permissions, outranks};
use domain::ports::discord::{DiscordError, DiscordPort, Role};
use domain::role_menu::{RoleMenuOption, MAX_MENU_OPTIONS};
use domain::roles::RoleSelectionPolicy;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

const REMOVE_REASON: &str = "Changing self role";
const ASSIGN_REASON: &str = "Self role change";

pub struct RoleSelectionService {
    discord_port: Arc<dyn DiscordPort + Send + Sync>,
    policy: Arc<RoleSelectionPolicy>,
    in_flight: InFlightChanges,
}

impl RoleSelectionService {
    #[instrument(level = "trace", skip_all)]
    pub fn new(
        discord_port: Arc<dyn DiscordPort + Send + Sync>,
        policy: Arc<RoleSelectionPolicy>,
    ) -> Self {
        Self {
            discord_port,
            policy,
            in_flight: InFlightChanges::default(),
        }
    }

    /// Refuses the change unless the bot may grant `chosen` in this guild.
    #[instrument(level = "trace", skip_all)]
    async fn ensure_bot_can_assign(
        &self,
        request: &RoleSubmission,
        chosen: &Role,
        registry: &[Role],
    ) -> Result<(), RoleSelectionError> {
        let bot = self
            .discord_port
            .find_current_member(request.guild_id)
            .await
            .map_err(map_discord_err)?;

        if !guild_permissions(request.guild_id, &bot, registry).can_manage_roles() {
            warn!(
                guild_id = request.guild_id.0,
                "Bot is missing the Manage Roles permission",
            );
            return Err(RoleSelectionError::MissingManageRoles);
        }

        if !outranks(&bot, chosen, registry) {
            warn!(
                guild_id = request.guild_id.0,
                role_id = chosen.role_id.0,
                "Bot's highest role is not above the selected role",
            );
            return Err(RoleSelectionError::RoleAboveBot);
        }

        Ok(())
    }
}

#[async_trait]
impl RoleSelectionPort for RoleSelectionService {
    #[instrument(level = "info", skip(self))]
    async fn open_role_menu(
        &self,
        request: RoleMenuRequest,
    ) -> Result<RoleMenuDto, RoleSelectionError> {
        if !self
            .policy
            .is_authorized(&request.role_ids, request.is_administrator)
        {
            info!(
                guild_id = request.guild_id.0,
                user_id = request.user_id.0,
                "Role menu denied to unauthorized member",
            );
            return Err(RoleSelectionError::PermissionDenied);
        }

        let registry = self
            .discord_port
            .find_guild_roles(request.guild_id)
            .await
            .map_err(map_discord_err)?;

        let options = self.policy.menu_options(&registry);

        if options.is_empty() {
            warn!(
                guild_id = request.guild_id.0,
                configured = self.policy.assignable_roles().len(),
                "None of the assignable roles exist in this guild",
            );
            return Err(RoleSelectionError::NoAssignableRoles);
        }

        if options.len() < self.policy.assignable_roles().len() {
            warn!(
                guild_id = request.guild_id.0,
                resolved = options.len(),
                configured = self.policy.assignable_roles().len(),
                "Some assignable roles were not found in this guild",
            );
        }

        if options.len() > MAX_MENU_OPTIONS {
            warn!(
                options = options.len(),
                "Role menu exceeds Discord's limit of {} options",
                MAX_MENU_OPTIONS,
            );
        }

        Ok(RoleMenuDto {
            options: options.into_iter().map(option_to_dto).collect(),
        })
    }

    #[instrument(level = "info", skip(self))]
    async fn select_role(
        &self,
        request: RoleSubmission,
    ) -> Result<SelectedRoleDto, RoleSelectionError> {
        let Some(_guard) = self.in_flight.begin(request.guild_id, request.user_id) else {
            info!(
                guild_id = request.guild_id.0,
                user_id = request.user_id.0,
                "Ignoring role selection while another one is being applied",
            );
            return Err(RoleSelectionError::ChangeInProgress);
        };

        let registry = self
            .discord_port
            .find_guild_roles(request.guild_id)
            .await
            .map_err(map_discord_err)?;

        let chosen = registry
            .iter()
            .find(|role| role.role_id == request.role_id)
            .ok_or(RoleSelectionError::RoleNoLongerExists)?;

        if !self.policy.is_assignable(chosen.role_id) {
            warn!(
                user_id = request.user_id.0,
                role_id = chosen.role_id.0,
                "Member submitted a role outside the assignable list",
            );
            return Err(RoleSelectionError::RoleNotAssignable);
        }

        self.ensure_bot_can_assign(&request, chosen, &registry)
            .await?;

        let member = self
            .discord_port
            .find_member(request.guild_id, request.user_id)
            .await
            .map_err(map_discord_err)?
            .ok_or(RoleSelectionError::MemberNotFound)?;

        let diff = self.policy.diff_roles(&member, chosen.role_id);

        if !diff.to_remove.is_empty() {
            self.discord_port
                .remove_member_roles(
                    request.guild_id,
                    &member,
                    &diff.to_remove,
                    REMOVE_REASON,
                )
                .await
                .map_err(map_discord_err)?;
        }

        for role_id in &diff.to_assign {
            self.discord_port
                .add_member_role(request.guild_id, request.user_id, *role_id, ASSIGN_REASON)
                .await
                .map_err(map_discord_err)?;
        }

        info!(
            guild_id = request.guild_id.0,
            user_id = request.user_id.0,
            role_id = chosen.role_id.0,
            removed = diff.to_remove.len(),
            assigned = diff.to_assign.len(),
            "Member role changed",
        );

        Ok(SelectedRoleDto {
            role_id: chosen.role_id,
            name: chosen.name.clone(),
        })
    }
}

fn option_to_dto(option: RoleMenuOption) -> RoleOptionDto {
    let RoleMenuOption {
        role_id,
        label,
        description,
    } = option;

    RoleOptionDto {
        role_id,
        label,
        description,
    }
}

#[instrument(level = "trace", skip_all)]
fn map_discord_err(err: DiscordError) -> RoleSelectionError {
    match err {
        DiscordError::DiscordUnavailable => {
            error!("DiscordError::DiscordUnavailable");
        }
        DiscordError::RequestRejected => {
            error!("DiscordError::RequestRejected");
        }
    }
    RoleSelectionError::TemporaryUnavailable
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::permissions::Permissions;
    use domain::ports::discord::{Member, MockDiscordPort};
    use domain_shared::discord::{GuildId, RoleId, UserId};
    use mockall::Sequence;

    const GUILD: GuildId = GuildId(500);
    const USER: UserId = UserId(42);
    const BOT: UserId = UserId(7);

    const R1: RoleId = RoleId(1001);
    const R2: RoleId = RoleId(1002);
    const R3: RoleId = RoleId(1003);
    const MODERATOR: RoleId = RoleId(2001);
    const BOT_ROLE: RoleId = RoleId(3001);

    fn role(role_id: RoleId, name: &str, position: u16, permissions: Permissions) -> Role {
        Role {
            role_id,
            name: name.to_string(),
            position,
            permissions,
        }
    }

    fn registry() -> Vec<Role> {
        vec![
            role(GUILD.everyone_role(), "@everyone", 0, Permissions::default()),
            role(R1, "Red", 1, Permissions::default()),
            role(R2, "Green", 2, Permissions::default()),
            role(R3, "Blue", 3, Permissions::default()),
            role(MODERATOR, "Moderator", 4, Permissions::default()),
            role(BOT_ROLE, "Bot", 10, Permissions::MANAGE_ROLES),
        ]
    }

    fn member(user_id: UserId, role_ids: Vec<RoleId>) -> Member {
        Member { user_id, role_ids }
    }

    fn service(discord_port: MockDiscordPort, authorized: Vec<RoleId>) -> RoleSelectionService {
        let policy = RoleSelectionPolicy::new(vec![R1, R2, R3], authorized);
        RoleSelectionService::new(Arc::new(discord_port), Arc::new(policy))
    }

    fn menu_request(role_ids: Vec<RoleId>, is_administrator: bool) -> RoleMenuRequest {
        RoleMenuRequest {
            guild_id: GUILD,
            user_id: USER,
            role_ids,
            is_administrator,
        }
    }

    fn submission(role_id: RoleId) -> RoleSubmission {
        RoleSubmission {
            guild_id: GUILD,
            user_id: USER,
            role_id,
        }
    }

    fn expect_no_mutation(discord_port: &mut MockDiscordPort) {
        discord_port.expect_remove_member_roles().never();
        discord_port.expect_add_member_role().never();
    }

    fn port_with_registry(registry: Vec<Role>) -> MockDiscordPort {
        let mut discord_port = MockDiscordPort::new();
        discord_port
            .expect_find_guild_roles()
            .returning(move |_| Ok(registry.clone()));
        discord_port
    }

    fn expect_bot(discord_port: &mut MockDiscordPort, role_ids: Vec<RoleId>) {
        discord_port
            .expect_find_current_member()
            .returning(move |_| Ok(member(BOT, role_ids.clone())));
    }

    fn expect_member(discord_port: &mut MockDiscordPort, role_ids: Vec<RoleId>) {
        discord_port
            .expect_find_member()
            .returning(move |_, user_id| Ok(Some(member(user_id, role_ids.clone()))));
    }

    #[tokio::test]
    async fn menu_lists_resolvable_roles_in_configured_order() {
        let discord_port = port_with_registry(registry());
        let service = service(discord_port, vec![]);

        let menu = service
            .open_role_menu(menu_request(vec![], false))
            .await
            .unwrap();

        let labels: Vec<_> = menu.options.iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, vec!["Red", "Green", "Blue"]);
        assert_eq!(menu.options[1].role_id, R2);
        assert_eq!(menu.options[1].description, "Select Green");
    }

    #[tokio::test]
    async fn menu_skips_roles_missing_from_guild() {
        let registry = registry()
            .into_iter()
            .filter(|role| role.role_id != R2)
            .collect();
        let service = service(port_with_registry(registry), vec![]);

        let menu = service
            .open_role_menu(menu_request(vec![], false))
            .await
            .unwrap();

        assert_eq!(menu.options.len(), 2);
        assert!(menu.options.iter().all(|o| o.role_id != R2));
    }

    #[tokio::test]
    async fn menu_without_resolvable_roles_is_refused() {
        let mut discord_port = MockDiscordPort::new();
        discord_port
            .expect_find_guild_roles()
            .times(1)
            .returning(|_| Ok(vec![]));
        let policy = RoleSelectionPolicy::new(vec![R1], vec![]);
        let service = RoleSelectionService::new(Arc::new(discord_port), Arc::new(policy));

        let result = service.open_role_menu(menu_request(vec![], false)).await;

        assert!(matches!(result, Err(RoleSelectionError::NoAssignableRoles)));
    }

    #[tokio::test]
    async fn unauthorized_member_is_denied_before_any_lookup() {
        let mut discord_port = MockDiscordPort::new();
        discord_port.expect_find_guild_roles().never();
        expect_no_mutation(&mut discord_port);
        let service = service(discord_port, vec![MODERATOR]);

        let result = service.open_role_menu(menu_request(vec![R1], false)).await;

        assert!(matches!(result, Err(RoleSelectionError::PermissionDenied)));
    }

    #[tokio::test]
    async fn authorized_role_or_administrator_opens_menu() {
        let service = service(port_with_registry(registry()), vec![MODERATOR]);

        let by_role = service
            .open_role_menu(menu_request(vec![MODERATOR], false))
            .await;
        let by_admin = service.open_role_menu(menu_request(vec![], true)).await;

        assert!(by_role.is_ok());
        assert!(by_admin.is_ok());
    }

    #[tokio::test]
    async fn menu_lookup_failure_is_temporary_unavailable() {
        let mut discord_port = MockDiscordPort::new();
        discord_port
            .expect_find_guild_roles()
            .returning(|_| Err(DiscordError::DiscordUnavailable));
        let service = service(discord_port, vec![]);

        let result = service.open_role_menu(menu_request(vec![], false)).await;

        assert!(matches!(
            result,
            Err(RoleSelectionError::TemporaryUnavailable)
        ));
    }

    #[tokio::test]
    async fn selecting_a_new_role_replaces_the_old_one() {
        let mut discord_port = port_with_registry(registry());
        expect_bot(&mut discord_port, vec![BOT_ROLE]);
        expect_member(&mut discord_port, vec![R1, MODERATOR]);
        let mut sequence = Sequence::new();
        discord_port
            .expect_remove_member_roles()
            .withf(|guild_id, member, role_ids, _| {
                *guild_id == GUILD
                    && member.user_id == USER
                    && member.role_ids == vec![R1, MODERATOR]
                    && role_ids.to_vec() == vec![R1]
            })
            .times(1)
            .in_sequence(&mut sequence)
            .returning(|_, _, _, _| Ok(()));
        discord_port
            .expect_add_member_role()
            .withf(|guild_id, user_id, role_id, _| {
                *guild_id == GUILD && *user_id == USER && *role_id == R2
            })
            .times(1)
            .in_sequence(&mut sequence)
            .returning(|_, _, _, _| Ok(()));
        let service = service(discord_port, vec![]);

        let selected = service.select_role(submission(R2)).await.unwrap();

        assert_eq!(selected.role_id, R2);
        assert_eq!(selected.name, "Green");
    }

    #[tokio::test]
    async fn reselecting_a_held_role_only_removes_the_others() {
        let mut discord_port = port_with_registry(registry());
        expect_bot(&mut discord_port, vec![BOT_ROLE]);
        expect_member(&mut discord_port, vec![R2, R3]);
        discord_port
            .expect_remove_member_roles()
            .withf(|_, _, role_ids, _| role_ids.to_vec() == vec![R3])
            .times(1)
            .returning(|_, _, _, _| Ok(()));
        discord_port.expect_add_member_role().never();
        let service = service(discord_port, vec![]);

        let selected = service.select_role(submission(R2)).await.unwrap();

        assert_eq!(selected.name, "Green");
    }

    #[tokio::test]
    async fn member_without_assignable_roles_gets_only_an_addition() {
        let mut discord_port = port_with_registry(registry());
        expect_bot(&mut discord_port, vec![BOT_ROLE]);
        expect_member(&mut discord_port, vec![MODERATOR]);
        discord_port.expect_remove_member_roles().never();
        discord_port
            .expect_add_member_role()
            .times(1)
            .returning(|_, _, _, _| Ok(()));
        let service = service(discord_port, vec![]);

        assert!(service.select_role(submission(R3)).await.is_ok());
    }

    #[tokio::test]
    async fn deleted_role_is_reported_without_mutation() {
        let mut discord_port = port_with_registry(registry());
        discord_port.expect_find_current_member().never();
        expect_no_mutation(&mut discord_port);
        let service = service(discord_port, vec![]);

        let result = service.select_role(submission(RoleId(99))).await;

        assert!(matches!(result, Err(RoleSelectionError::RoleNoLongerExists)));
    }

    #[tokio::test]
    async fn role_outside_assignable_list_is_refused() {
        let mut discord_port = port_with_registry(registry());
        expect_no_mutation(&mut discord_port);
        let service = service(discord_port, vec![]);

        let result = service.select_role(submission(MODERATOR)).await;

        assert!(matches!(result, Err(RoleSelectionError::RoleNotAssignable)));
    }

    #[tokio::test]
    async fn bot_without_manage_roles_is_reported_without_mutation() {
        let registry = registry()
            .into_iter()
            .map(|mut role| {
                role.permissions = Permissions::default();
                role
            })
            .collect();
        let mut discord_port = port_with_registry(registry);
        expect_bot(&mut discord_port, vec![BOT_ROLE]);
        expect_no_mutation(&mut discord_port);
        let service = service(discord_port, vec![]);

        let result = service.select_role(submission(R2)).await;

        assert!(matches!(result, Err(RoleSelectionError::MissingManageRoles)));
    }

    #[tokio::test]
    async fn bot_with_manage_roles_on_everyone_may_assign() {
        let mut registry = registry();
        registry[0].permissions = Permissions::MANAGE_ROLES;
        registry[5].permissions = Permissions::default();
        let mut discord_port = port_with_registry(registry);
        expect_bot(&mut discord_port, vec![BOT_ROLE]);
        expect_member(&mut discord_port, vec![]);
        discord_port
            .expect_add_member_role()
            .times(1)
            .returning(|_, _, _, _| Ok(()));
        let service = service(discord_port, vec![]);

        assert!(service.select_role(submission(R1)).await.is_ok());
    }

    #[tokio::test]
    async fn role_at_bot_position_violates_hierarchy() {
        let mut registry = registry();
        registry[5].position = 2;
        let mut discord_port = port_with_registry(registry);
        expect_bot(&mut discord_port, vec![BOT_ROLE]);
        expect_no_mutation(&mut discord_port);
        let service = service(discord_port, vec![]);

        let result = service.select_role(submission(R2)).await;

        assert!(matches!(result, Err(RoleSelectionError::RoleAboveBot)));
    }

    #[tokio::test]
    async fn failed_removal_skips_addition() {
        let mut discord_port = port_with_registry(registry());
        expect_bot(&mut discord_port, vec![BOT_ROLE]);
        expect_member(&mut discord_port, vec![R1]);
        discord_port
            .expect_remove_member_roles()
            .times(1)
            .returning(|_, _, _, _| Err(DiscordError::RequestRejected));
        discord_port.expect_add_member_role().never();
        let service = service(discord_port, vec![]);

        let result = service.select_role(submission(R2)).await;

        assert!(matches!(
            result,
            Err(RoleSelectionError::TemporaryUnavailable)
        ));
    }

    #[tokio::test]
    async fn member_who_left_the_guild_is_reported() {
        let mut discord_port = port_with_registry(registry());
        expect_bot(&mut discord_port, vec![BOT_ROLE]);
        discord_port
            .expect_find_member()
            .returning(|_, _| Ok(None));
        expect_no_mutation(&mut discord_port);
        let service = service(discord_port, vec![]);

        let result = service.select_role(submission(R2)).await;

        assert!(matches!(result, Err(RoleSelectionError::MemberNotFound)));
    }

    #[tokio::test]
    async fn concurrent_selection_by_same_member_is_refused() {
        let service = service(MockDiscordPort::new(), vec![]);
        let _guard = service.in_flight.begin(GUILD, USER);

        let result = service.select_role(submission(R2)).await;

        assert!(matches!(result, Err(RoleSelectionError::ChangeInProgress)));
    }

    #[tokio::test]
    async fn finished_selection_releases_the_member() {
        let mut discord_port = port_with_registry(registry());
        expect_no_mutation(&mut discord_port);
        let service = service(discord_port, vec![]);

        let first = service.select_role(submission(RoleId(99))).await;
        let second = service.select_role(submission(RoleId(99))).await;

        assert!(matches!(first, Err(RoleSelectionError::RoleNoLongerExists)));
        assert!(matches!(second, Err(RoleSelectionError::RoleNoLongerExists)));
    }
}
