use application_ports::role_selection::{RoleMenuDto, RoleOptionDto};
use domain::role_menu::{ROLE_SELECT_MENU_ID, ROLE_SELECT_PLACEHOLDER};
use poise::serenity_prelude::{
    CreateActionRow, CreateSelectMenu, CreateSelectMenuKind, CreateSelectMenuOption,
};
use poise::CreateReply;
use tracing::instrument;

#[instrument(level = "debug", skip_all)]
pub fn role_menu(menu: RoleMenuDto) -> CreateReply {
    let components = vec![CreateActionRow::SelectMenu(role_select_menu(menu))];

    CreateReply::default()
        .content("Pick your new role:")
        .components(components)
        .ephemeral(true)
        .reply(true)
}

fn role_select_menu(menu: RoleMenuDto) -> CreateSelectMenu {
    let options = menu
        .options
        .into_iter()
        .map(|option| {
            let RoleOptionDto {
                role_id,
                label,
                description,
            } = option;
            CreateSelectMenuOption::new(label, role_id.0.to_string()).description(description)
        })
        .collect();

    CreateSelectMenu::new(ROLE_SELECT_MENU_ID, CreateSelectMenuKind::String { options })
        .placeholder(ROLE_SELECT_PLACEHOLDER)
        .min_values(1)
        .max_values(1)
}

#[instrument(level = "debug", skip_all)]
pub fn permission_denied() -> CreateReply {
    CreateReply::default()
        .content("🚫 You don’t have permission to use this command.")
        .ephemeral(true)
        .reply(true)
}

#[instrument(level = "debug", skip_all)]
pub fn no_assignable_roles() -> CreateReply {
    CreateReply::default()
        .content("⚠️ No valid assignable roles found in this server.")
        .ephemeral(true)
        .reply(true)
}
