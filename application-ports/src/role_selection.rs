use async_trait::async_trait;
use domain_shared::discord::{GuildId, RoleId, UserId};
use thiserror::Error;

#[async_trait]
pub trait RoleSelectionPort {
    /// Builds the role menu for `/role change`. No roles are touched.
    async fn open_role_menu(&self, request: RoleMenuRequest)
        -> Result<RoleMenuDto, RoleSelectionError>;

    /// Applies the role picked from the menu, replacing any other
    /// assignable role the member holds.
    async fn select_role(
        &self,
        request: RoleSubmission,
    ) -> Result<SelectedRoleDto, RoleSelectionError>;
}

#[derive(Debug, Clone)]
pub struct RoleMenuRequest {
    pub guild_id: GuildId,
    pub user_id: UserId,
    pub role_ids: Vec<RoleId>,
    pub is_administrator: bool,
}

#[derive(Debug, Clone)]
pub struct RoleSubmission {
    pub guild_id: GuildId,
    pub user_id: UserId,
    pub role_id: RoleId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleMenuDto {
    pub options: Vec<RoleOptionDto>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleOptionDto {
    pub role_id: RoleId,
    pub label: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedRoleDto {
    pub role_id: RoleId,
    pub name: String,
}

#[derive(Debug, Error)]
pub enum RoleSelectionError {
    #[error("Invoker is not allowed to change roles")]
    PermissionDenied,
    #[error("No configured role exists in this guild")]
    NoAssignableRoles,
    #[error("Selected role no longer exists")]
    RoleNoLongerExists,
    #[error("Selected role is not self-assignable")]
    RoleNotAssignable,
    #[error("Bot lacks the Manage Roles permission")]
    MissingManageRoles,
    #[error("Selected role is not below the bot's highest role")]
    RoleAboveBot,
    #[error("A role change for this member is already in progress")]
    ChangeInProgress,
    #[error("Member not found in guild")]
    MemberNotFound,
    #[error("Service is temporarily unavailable")]
    TemporaryUnavailable,
}
