use crate::ports::discord::Role;
use domain_shared::discord::RoleId;

pub const ROLE_SELECT_MENU_ID: &str = "role_select";
pub const ROLE_SELECT_PLACEHOLDER: &str = "Choose your new role";

/// Discord caps select menu labels and descriptions at this many characters.
pub const MAX_OPTION_TEXT_LENGTH: usize = 100;
/// Discord rejects select menus carrying more options than this.
pub const MAX_MENU_OPTIONS: usize = 25;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleMenuOption {
    pub role_id: RoleId,
    pub label: String,
    pub description: String,
}

impl RoleMenuOption {
    pub fn for_role(role: &Role) -> Self {
        Self {
            role_id: role.role_id,
            label: truncate(&role.name),
            description: truncate(&format!("Select {}", role.name)),
        }
    }
}

fn truncate(text: &str) -> String {
    text.chars().take(MAX_OPTION_TEXT_LENGTH).collect()
}
