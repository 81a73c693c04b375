use crate::args::{parse_role_ids, DiscordArgs};
use crate::locator::ApplicationPortLocator;
use anyhow::{anyhow, Context};
use application::role_selection::RoleSelectionService;
use clap::Args;
use domain::roles::RoleSelectionPolicy;
use infrastructure::discord::DiscordAdapter;
use poise::serenity_prelude as serenity;
use presentation::discord::run_bot;
use serenity::all::{ApplicationId, ClientBuilder, GuildId};
use std::sync::Arc;
use tracing::{info, instrument, warn};

#[derive(Args, Debug)]
pub struct ServeArgs {
    #[command(flatten)]
    pub discord: DiscordArgs,
    /// JSON array of the role IDs members may pick from, in menu order
    #[arg(long, env = "ASSIGNABLE_ROLES")]
    pub assignable_roles: String,
    /// JSON array of the role IDs allowed to use the command; everyone when empty
    #[arg(long, env = "AUTHORIZED_ROLES", default_value = "[]")]
    pub authorized_roles: String,
}

#[instrument(level = "trace", skip(args))]
pub async fn run(args: ServeArgs) -> anyhow::Result<()> {
    let ServeArgs {
        discord:
            DiscordArgs {
                discord_bot_token,
                application_id,
                guild,
            },
        assignable_roles,
        authorized_roles,
    } = args;
    let application_id = ApplicationId::new(application_id);
    let guild = guild.map(GuildId::new);
    let assignable_roles =
        parse_role_ids(&assignable_roles).context("ASSIGNABLE_ROLES is not a JSON array of IDs")?;
    let authorized_roles =
        parse_role_ids(&authorized_roles).context("AUTHORIZED_ROLES is not a JSON array of IDs")?;

    if assignable_roles.is_empty() {
        warn!("No assignable roles configured, the role menu will always be empty");
    }
    info!(
        assignable_roles = assignable_roles.len(),
        authorized_roles = authorized_roles.len(),
        "Loaded role selection configuration",
    );

    let policy = Arc::new(RoleSelectionPolicy::new(assignable_roles, authorized_roles));

    let intents = serenity::GatewayIntents::GUILDS;

    let serenity_client = ClientBuilder::new(&discord_bot_token, intents).await?.http;
    serenity_client.set_application_id(application_id);

    let discord_adapter = Arc::new(DiscordAdapter::new(serenity_client));
    let role_selection_adapter = Arc::new(RoleSelectionService::new(discord_adapter, policy));

    let locator = ApplicationPortLocator::new(role_selection_adapter);

    let bot = tokio::spawn(run_bot(
        locator,
        discord_bot_token,
        intents,
        application_id,
        guild,
    ));

    bot.await?.map_err(|e| anyhow!(e))?;

    Ok(())
}
