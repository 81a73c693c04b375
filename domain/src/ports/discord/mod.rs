mod member;
mod role;
mod role_diff;

use async_trait::async_trait;
use domain_shared::discord::{GuildId, RoleId, UserId};
pub use member::Member;
pub use role::Role;
pub use role_diff::RoleDiff;
use thiserror::Error;

#[cfg_attr(feature = "mock", mockall::automock)]
#[async_trait]
pub trait DiscordPort {
    /// The guild's role registry, fetched fresh.
    async fn find_guild_roles(&self, guild_id: GuildId) -> Result<Vec<Role>, DiscordError>;

    async fn find_member(
        &self,
        guild_id: GuildId,
        user_id: UserId,
    ) -> Result<Option<Member>, DiscordError>;

    /// The bot's own member record in the guild.
    async fn find_current_member(&self, guild_id: GuildId) -> Result<Member, DiscordError>;

    /// Removes all `role_ids` from the member in a single request. The new
    /// role list is derived from `member`, so it must be freshly fetched.
    async fn remove_member_roles(
        &self,
        guild_id: GuildId,
        member: &Member,
        role_ids: &[RoleId],
        reason: &str,
    ) -> Result<(), DiscordError>;

    async fn add_member_role(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        role_id: RoleId,
        reason: &str,
    ) -> Result<(), DiscordError>;
}

#[derive(Debug, Error)]
pub enum DiscordError {
    #[error("Discord is unavailable")]
    DiscordUnavailable,
    #[error("Discord rejected the request")]
    RequestRejected,
}
