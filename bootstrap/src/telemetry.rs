use crate::args::CommonArgs;
use anyhow::Context;
use sentry::types::Dsn;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Installs the tracing subscriber and, when a DSN is configured, the Sentry
/// client. The returned guard flushes Sentry on drop.
pub fn init(args: &CommonArgs) -> anyhow::Result<Option<sentry::ClientInitGuard>> {
    let sentry = match &args.sentry_dsn {
        Some(dsn) => {
            let dsn: Dsn = dsn.parse().context("SENTRY_DSN is not a valid DSN")?;
            Some(sentry::init(sentry::ClientOptions {
                dsn: Some(dsn),
                release: sentry::release_name!(),
                environment: args.sentry_environment.clone().map(Into::into),
                sample_rate: args.sentry_sample_rate.unwrap_or(1.0),
                traces_sample_rate: args.sentry_traces_sample_rate.unwrap_or(0.0),
                ..Default::default()
            }))
        }
        None => None,
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer())
        .try_init()?;

    Ok(sentry)
}
