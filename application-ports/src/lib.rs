pub mod role_selection;
