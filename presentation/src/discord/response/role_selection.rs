use poise::serenity_prelude::{CreateInteractionResponse, CreateInteractionResponseMessage};
use tracing::instrument;

/// Replaces the menu message with `content` and removes the menu.
fn update(content: impl Into<String>) -> CreateInteractionResponse {
    CreateInteractionResponse::UpdateMessage(
        CreateInteractionResponseMessage::new()
            .content(content)
            .components(vec![])
            .ephemeral(true),
    )
}

#[instrument(level = "debug", skip_all)]
pub fn role_updated(role_name: &str) -> CreateInteractionResponse {
    update(format!(
        "✅ Your role has been updated to **{}**!",
        role_name
    ))
}

#[instrument(level = "debug", skip_all)]
pub fn role_no_longer_exists() -> CreateInteractionResponse {
    update("⚠️ That role no longer exists.")
}

#[instrument(level = "debug", skip_all)]
pub fn role_not_assignable() -> CreateInteractionResponse {
    update("⚠️ That role can’t be self-assigned.")
}

#[instrument(level = "debug", skip_all)]
pub fn missing_manage_roles() -> CreateInteractionResponse {
    update("❌ I need the **Manage Roles** permission to assign roles.")
}

#[instrument(level = "debug", skip_all)]
pub fn role_above_bot() -> CreateInteractionResponse {
    update("⚠️ My role must be **higher** than the role you’re trying to assign.")
}

/// Answers with a separate message so the menu stays for the pending change.
#[instrument(level = "debug", skip_all)]
pub fn change_in_progress() -> CreateInteractionResponse {
    CreateInteractionResponse::Message(
        CreateInteractionResponseMessage::new()
            .content("⏳ Your previous role change is still being applied.")
            .ephemeral(true),
    )
}
