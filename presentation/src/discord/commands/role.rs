use crate::application_ports::Locator;
use crate::discord::{response, Context, Error};
use application_ports::role_selection::{RoleMenuDto, RoleMenuRequest, RoleSelectionError};
use domain_shared::discord::{GuildId, RoleId, UserId};
use poise::CreateReply;
use tracing::{info, instrument};

/// Role selection command
#[poise::command(
    slash_command,
    rename = "role",
    guild_only,
    subcommands("change"),
    subcommand_required
)]
pub async fn command<D: Sync + Locator>(_ctx: Context<'_, D>) -> Result<(), Error> {
    Ok(())
}

/// Choose your new role
#[poise::command(slash_command, guild_only)]
#[instrument(level = "info", skip(ctx))]
pub async fn change<D: Sync + Locator>(ctx: Context<'_, D>) -> Result<(), Error> {
    let guild_id = ctx
        .guild_id()
        .ok_or("Command should be run only in guilds")?;
    info!(
        guild_id = guild_id.get(),
        user_id = ctx.author().id.get(),
        "Opening role menu",
    );

    let request = {
        let member = ctx
            .author_member()
            .await
            .ok_or("Invoking member is not available")?;

        RoleMenuRequest {
            guild_id: GuildId(guild_id.get()),
            user_id: UserId(ctx.author().id.get()),
            role_ids: member.roles.iter().map(|role| RoleId(role.get())).collect(),
            is_administrator: member
                .permissions
                .is_some_and(|permissions| permissions.administrator()),
        }
    };

    let role_selection_port = ctx.data().get_role_selection_port();

    let reply = menu_reply(role_selection_port.open_role_menu(request).await)?;
    ctx.send(reply).await?;

    Ok(())
}

fn menu_reply(
    result: Result<RoleMenuDto, RoleSelectionError>,
) -> Result<CreateReply, RoleSelectionError> {
    match result {
        Ok(menu) => Ok(response::role_menu::role_menu(menu)),
        Err(RoleSelectionError::PermissionDenied) => Ok(response::role_menu::permission_denied()),
        Err(RoleSelectionError::NoAssignableRoles) => {
            Ok(response::role_menu::no_assignable_roles())
        }
        Err(error) => Err(error),
    }
}
