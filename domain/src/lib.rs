pub mod permissions;
pub mod ports;
pub mod role_menu;
pub mod roles;
