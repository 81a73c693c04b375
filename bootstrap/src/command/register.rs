use crate::args::DiscordArgs;
use crate::locator::ApplicationPortLocator;
use anyhow::anyhow;
use clap::Args;
use poise::serenity_prelude as serenity;
use presentation::discord::register_bot_commands;
use serenity::all::{ApplicationId, GuildId, Http};
use tracing::instrument;

#[derive(Args, Debug)]
pub struct RegisterArgs {
    #[command(flatten)]
    pub discord: DiscordArgs,
}

#[instrument(level = "info", skip(args))]
pub async fn run(args: RegisterArgs) -> anyhow::Result<()> {
    let RegisterArgs {
        discord:
            DiscordArgs {
                discord_bot_token,
                application_id,
                guild,
            },
    } = args;

    let http = Http::new(&discord_bot_token);
    http.set_application_id(ApplicationId::new(application_id));

    register_bot_commands::<ApplicationPortLocator>(&http, guild.map(GuildId::new))
        .await
        .map_err(|e| anyhow!(e))?;

    Ok(())
}
