mod in_flight;
pub mod role_selection;
