use crate::application_ports::Locator;
use poise::serenity_prelude as serenity;
use poise::serenity_prelude::{
    ApplicationId, ClientBuilder, ComponentInteractionDataKind, GuildId, Interaction,
};
use tracing::{debug, error, info, instrument, warn};

pub mod commands;
mod response;
mod select_menus;

pub type Error = Box<dyn std::error::Error + Send + Sync>;
pub type Context<'a, D> = poise::Context<'a, D, Error>;

pub async fn run_bot<L: Locator + Send + Sync + 'static>(
    locator: L,
    token: String,
    intents: serenity::GatewayIntents,
    application_id: ApplicationId,
    guild: Option<GuildId>,
) -> Result<(), Error> {
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: commands::enabled_commands(),
            event_handler: |ctx, event, framework, locator| {
                Box::pin(event_handler(ctx, event, framework, locator))
            },
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(move |ctx, ready, framework| {
            Box::pin(async move {
                info!(user = %ready.user.tag(), "Logged in");
                if ready.application.id != application_id {
                    warn!(
                        configured = application_id.get(),
                        actual = ready.application.id.get(),
                        "Configured application id does not match the bot's application",
                    );
                }
                register_commands(ctx, &framework.options().commands, guild).await?;
                Ok(locator)
            })
        })
        .build();

    let mut client = ClientBuilder::new(token, intents)
        .framework(framework)
        .await?;
    client.start().await?;

    Ok(())
}

/// Registers the bot's slash commands without starting a gateway session.
#[instrument(level = "info", skip(http))]
pub async fn register_bot_commands<L: Locator + Send + Sync + 'static>(
    http: &serenity::Http,
    guild: Option<GuildId>,
) -> Result<(), Error> {
    register_commands(http, &commands::enabled_commands::<L>(), guild).await
}

async fn register_commands<U, E>(
    http: impl AsRef<serenity::Http>,
    commands: &[poise::Command<U, E>],
    guild: Option<GuildId>,
) -> Result<(), Error> {
    match guild {
        Some(guild) => {
            poise::builtins::register_in_guild(http, commands, guild).await?;
            info!(guild_id = guild.get(), "Registered commands to guild");
        }
        None => {
            poise::builtins::register_globally(http, commands).await?;
            info!("Registered global commands (may take up to 1 hour)");
        }
    }

    Ok(())
}

async fn event_handler<L: Locator>(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    _framework: poise::FrameworkContext<'_, L, Error>,
    locator: &L,
) -> Result<(), Error> {
    if let serenity::FullEvent::InteractionCreate {
        interaction: Interaction::Component(component_interaction),
    } = event
    {
        if let ComponentInteractionDataKind::StringSelect { values } =
            &component_interaction.data.kind
        {
            select_menus::handle_selection(ctx, component_interaction, values, locator).await
        }
    }

    Ok(())
}

async fn on_error<L>(error: poise::FrameworkError<'_, L, Error>) {
    match error {
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!(
                error = %error,
                command = ctx.command().qualified_name.as_str(),
                user_id = ctx.author().id.get(),
                "Interaction error",
            );
            if let Err(reply_error) = ctx.send(response::unavailable::interaction_error()).await {
                debug!(error = %reply_error, "Failed to report interaction error");
            }
        }
        error => {
            if let Err(handler_error) = poise::builtins::on_error(error).await {
                error!(error = %handler_error, "Failed to handle framework error");
            }
        }
    }
}
