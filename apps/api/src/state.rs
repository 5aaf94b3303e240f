use formwork_application::FormService;
use formwork_domain::ExternalContext;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub form_service: FormService,
    pub external_values: ExternalContext,
}
