use poise::serenity_prelude as serenity;
use poise::serenity_prelude::{
    CreateInteractionResponse, CreateInteractionResponseMessage, EditInteractionResponse,
};
use poise::CreateReply;
use tracing::{debug, instrument};

const INTERACTION_ERROR: &str = "❌ An error occurred. Please try again.";

#[instrument(level = "debug", skip_all)]
pub fn interaction_error() -> CreateReply {
    CreateReply::default()
        .content(INTERACTION_ERROR)
        .components(vec![])
        .ephemeral(true)
        .reply(true)
}

/// Tells the member something went wrong: a fresh private reply when the
/// interaction is still unanswered, otherwise an edit of the existing one.
/// Failures here are only logged.
#[instrument(level = "debug", skip_all)]
pub async fn report_component_error(
    ctx: &serenity::Context,
    interaction: &serenity::ComponentInteraction,
) {
    let reply = CreateInteractionResponse::Message(
        CreateInteractionResponseMessage::new()
            .content(INTERACTION_ERROR)
            .ephemeral(true),
    );

    let Err(reply_error) = interaction.create_response(ctx, reply).await else {
        return;
    };

    let edit = EditInteractionResponse::new()
        .content(INTERACTION_ERROR)
        .components(vec![]);

    if let Err(edit_error) = interaction.edit_response(ctx, edit).await {
        debug!(
            reply_error = %reply_error,
            edit_error = %edit_error,
            "Failed to report interaction error",
        );
    }
}
