mod guild_id;
mod member;
mod role;
mod role_id;
mod user_id;

use crate::discord::guild_id::domain_to_serenity_guild_id;
use crate::discord::member::serenity_to_domain_member;
use crate::discord::role::serenity_to_domain_role;
use crate::discord::role_id::domain_to_serenity_role_id;
use crate::discord::user_id::domain_to_serenity_user_id;
use async_trait::async_trait;
use domain::ports::discord::{DiscordError, DiscordPort, Member, Role};
use domain_shared::discord::{GuildId, RoleId, UserId};
use serenity::all::{EditMember, Http};
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{error, instrument, warn};

pub struct DiscordAdapter {
    client: Arc<Http>,
    current_user_id: OnceCell<serenity::all::UserId>,
}

impl DiscordAdapter {
    #[instrument(level = "trace", skip_all)]
    pub fn new(client: Arc<Http>) -> Self {
        Self {
            client,
            current_user_id: OnceCell::new(),
        }
    }

    #[instrument(level = "trace", skip(self))]
    async fn current_user_id(&self) -> Result<serenity::all::UserId, DiscordError> {
        self.current_user_id
            .get_or_try_init(|| async {
                let user = self
                    .client
                    .get_current_user()
                    .await
                    .map_err(map_serenity_err)?;
                Ok::<_, DiscordError>(user.id)
            })
            .await
            .copied()
    }

    async fn fetch_member(
        &self,
        guild_id: serenity::all::GuildId,
        user_id: serenity::all::UserId,
    ) -> Result<Option<serenity::all::Member>, DiscordError> {
        match self.client.get_member(guild_id, user_id).await {
            Ok(member) => Ok(Some(member)),
            Err(err) if is_not_found(&err) => Ok(None),
            Err(err) => Err(map_serenity_err(err)),
        }
    }
}

#[async_trait]
impl DiscordPort for DiscordAdapter {
    #[instrument(level = "debug", err, skip(self))]
    async fn find_guild_roles(&self, guild_id: GuildId) -> Result<Vec<Role>, DiscordError> {
        let guild_id = domain_to_serenity_guild_id(guild_id);

        let roles = self
            .client
            .get_guild_roles(guild_id)
            .await
            .map_err(map_serenity_err)?
            .into_iter()
            .map(serenity_to_domain_role)
            .collect();

        Ok(roles)
    }

    #[instrument(level = "debug", err, skip(self))]
    async fn find_member(
        &self,
        guild_id: GuildId,
        user_id: UserId,
    ) -> Result<Option<Member>, DiscordError> {
        let guild_id = domain_to_serenity_guild_id(guild_id);
        let user_id = domain_to_serenity_user_id(user_id);

        let member = self.fetch_member(guild_id, user_id).await?;

        Ok(member.map(serenity_to_domain_member))
    }

    #[instrument(level = "debug", err, skip(self))]
    async fn find_current_member(&self, guild_id: GuildId) -> Result<Member, DiscordError> {
        let guild_id = domain_to_serenity_guild_id(guild_id);
        let user_id = self.current_user_id().await?;

        let member = self.fetch_member(guild_id, user_id).await?.ok_or_else(|| {
            error!(guild_id = guild_id.get(), "Bot is not a member of the guild");
            DiscordError::RequestRejected
        })?;

        Ok(serenity_to_domain_member(member))
    }

    #[instrument(
        level = "debug",
        err,
        skip(self, member, reason),
        fields(user_id = member.user_id.0)
    )]
    async fn remove_member_roles(
        &self,
        guild_id: GuildId,
        member: &Member,
        role_ids: &[RoleId],
        reason: &str,
    ) -> Result<(), DiscordError> {
        let guild_id = domain_to_serenity_guild_id(guild_id);
        let user_id = domain_to_serenity_user_id(member.user_id);

        let builder = EditMember::new()
            .roles(remaining_roles(member, role_ids))
            .audit_log_reason(reason);
        guild_id
            .edit_member(&*self.client, user_id, builder)
            .await
            .map_err(map_serenity_err)?;

        Ok(())
    }

    #[instrument(level = "debug", err, skip(self, reason))]
    async fn add_member_role(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        role_id: RoleId,
        reason: &str,
    ) -> Result<(), DiscordError> {
        let guild_id = domain_to_serenity_guild_id(guild_id);
        let user_id = domain_to_serenity_user_id(user_id);
        let role_id = domain_to_serenity_role_id(role_id);

        self.client
            .add_member_role(guild_id, user_id, role_id, Some(reason))
            .await
            .map_err(map_serenity_err)?;

        Ok(())
    }
}

fn remaining_roles(member: &Member, role_ids: &[RoleId]) -> Vec<serenity::all::RoleId> {
    member
        .role_ids
        .iter()
        .copied()
        .filter(|role_id| !role_ids.contains(role_id))
        .map(domain_to_serenity_role_id)
        .collect()
}

fn is_not_found(err: &serenity::Error) -> bool {
    match err {
        serenity::Error::Http(http_error) => http_error
            .status_code()
            .is_some_and(|status| status.as_u16() == 404),
        _ => false,
    }
}

#[instrument(level = "trace", skip_all)]
fn map_serenity_err(err: serenity::Error) -> DiscordError {
    let client_error = match &err {
        serenity::Error::Http(http_error) => http_error
            .status_code()
            .is_some_and(|status| status.is_client_error()),
        _ => false,
    };

    if client_error {
        warn!(error = %err, "Discord rejected the request");
        DiscordError::RequestRejected
    } else {
        error!(error = %err, "Discord request failed");
        DiscordError::DiscordUnavailable
    }
}
