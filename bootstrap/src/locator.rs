use application::role_selection::RoleSelectionService;
use application_ports::role_selection::RoleSelectionPort;
use presentation::application_ports::Locator;
use std::sync::Arc;
use tracing::instrument;

#[derive(Clone)]
pub struct ApplicationPortLocator {
    pub(crate) role_selection_adapter: Arc<RoleSelectionService>,
}

impl ApplicationPortLocator {
    #[instrument(level = "trace", skip_all)]
    pub fn new(role_selection_adapter: Arc<RoleSelectionService>) -> Self {
        Self {
            role_selection_adapter,
        }
    }
}

impl Locator for ApplicationPortLocator {
    #[instrument(level = "trace", skip(self))]
    fn get_role_selection_port(&self) -> Arc<dyn RoleSelectionPort + Send + Sync> {
        self.role_selection_adapter.clone()
    }
}
