use crate::application_ports::Locator;
use crate::discord::response;
use domain::role_menu::ROLE_SELECT_MENU_ID;
use poise::serenity_prelude as serenity;
use tracing::error;

pub mod role_select;

/// Routes a string select submission by custom id. Failures end here: they
/// are logged and the member gets a generic error message.
pub async fn handle_selection<L: Locator>(
    ctx: &serenity::Context,
    interaction: &serenity::ComponentInteraction,
    values: &[String],
    locator: &L,
) {
    let result = match interaction.data.custom_id.as_str() {
        ROLE_SELECT_MENU_ID => {
            role_select::handle_selection(ctx, interaction, values, locator).await
        }
        _ => Ok(()),
    };

    if let Err(error) = result {
        error!(
            error = %error,
            custom_id = interaction.data.custom_id.as_str(),
            user_id = interaction.user.id.get(),
            "Interaction error",
        );
        response::unavailable::report_component_error(ctx, interaction).await;
    }
}
