use application_ports::role_selection::RoleSelectionPort;
use std::sync::Arc;

pub trait Locator {
    fn get_role_selection_port(&self) -> Arc<dyn RoleSelectionPort + Send + Sync>;
}
