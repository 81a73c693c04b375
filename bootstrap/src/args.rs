use clap::Args;
use domain_shared::discord::RoleId;

#[derive(Args, Debug)]
pub struct CommonArgs {
    #[arg(long, env = "SENTRY_DSN")]
    pub sentry_dsn: Option<String>,
    #[arg(long, env = "SENTRY_ENVIRONMENT")]
    pub sentry_environment: Option<String>,
    #[arg(long, env = "SENTRY_SAMPLE_RATE")]
    pub sentry_sample_rate: Option<f32>,
    #[arg(long, env = "SENTRY_TRACES_SAMPLE_RATE")]
    pub sentry_traces_sample_rate: Option<f32>,
}

#[derive(Args, Debug)]
pub struct DiscordArgs {
    /// The token for the Discord bot
    #[arg(long, env = "DISCORD_BOT_TOKEN", hide_env_values = true)]
    pub discord_bot_token: String,
    /// The ID of the Discord application the bot belongs to
    #[arg(long, env = "DISCORD_APPLICATION_ID", value_parser = clap::value_parser!(u64).range(1..))]
    pub application_id: u64,
    /// The ID of the Discord guild (server) to register commands in; global when absent
    #[arg(long, env = "DISCORD_GUILD_ID", value_parser = clap::value_parser!(u64).range(1..))]
    pub guild: Option<u64>,
}

/// Parses a JSON array of role ids, e.g. `["1357511240792145930", 1435118930044784690]`.
pub fn parse_role_ids(raw: &str) -> Result<Vec<RoleId>, serde_json::Error> {
    serde_json::from_str(raw)
}
