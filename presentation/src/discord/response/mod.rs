pub mod role_menu;
pub mod role_selection;
pub mod unavailable;
