use crate::application_ports::Locator;
use crate::discord::{response, Error};
use application_ports::role_selection::{RoleSelectionError, RoleSubmission, SelectedRoleDto};
use domain_shared::discord::{GuildId, RoleId, UserId};
use poise::serenity_prelude as serenity;
use poise::serenity_prelude::CreateInteractionResponse;
use tracing::{info, instrument, warn};

#[instrument(level = "info", skip(ctx, interaction, locator))]
pub async fn handle_selection<L: Locator>(
    ctx: &serenity::Context,
    interaction: &serenity::ComponentInteraction,
    values: &[String],
    locator: &L,
) -> Result<(), Error> {
    let guild_id = interaction
        .guild_id
        .ok_or("Role selection should happen only in guilds")?;
    info!(
        guild_id = guild_id.get(),
        user_id = interaction.user.id.get(),
        "Member selected a role",
    );

    let Some(role_id) = parse_role_id(values) else {
        warn!(values = ?values, "Role selection carried no valid role id");
        let response = selection_response(Err(RoleSelectionError::RoleNoLongerExists))?;
        interaction.create_response(ctx, response).await?;
        return Ok(());
    };

    let submission = RoleSubmission {
        guild_id: GuildId(guild_id.get()),
        user_id: UserId(interaction.user.id.get()),
        role_id,
    };

    let role_selection_port = locator.get_role_selection_port();

    let response = selection_response(role_selection_port.select_role(submission).await)?;
    interaction.create_response(ctx, response).await?;

    Ok(())
}

fn parse_role_id(values: &[String]) -> Option<RoleId> {
    values
        .first()
        .and_then(|value| value.parse::<u64>().ok())
        .map(RoleId)
}

/// Outcomes the member should see become a reply. The rest are handed back
/// for the generic error path.
fn selection_response(
    result: Result<SelectedRoleDto, RoleSelectionError>,
) -> Result<CreateInteractionResponse, RoleSelectionError> {
    let response = match result {
        Ok(selected) => response::role_selection::role_updated(&selected.name),
        Err(RoleSelectionError::RoleNoLongerExists) => {
            response::role_selection::role_no_longer_exists()
        }
        Err(RoleSelectionError::RoleNotAssignable) => {
            response::role_selection::role_not_assignable()
        }
        Err(RoleSelectionError::MissingManageRoles) => {
            response::role_selection::missing_manage_roles()
        }
        Err(RoleSelectionError::RoleAboveBot) => response::role_selection::role_above_bot(),
        Err(RoleSelectionError::ChangeInProgress) => {
            response::role_selection::change_in_progress()
        }
        Err(
            error @ (RoleSelectionError::PermissionDenied
            | RoleSelectionError::NoAssignableRoles
            | RoleSelectionError::MemberNotFound
            | RoleSelectionError::TemporaryUnavailable),
        ) => return Err(error),
    };

    Ok(response)
}
