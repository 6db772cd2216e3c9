use std::sync::Arc;

use service::section::SectionRepository;

#[derive(Clone)]
pub struct ServerState {
    pub sections: Arc<SectionRepository>,
    /// Required in `X-API-Key` for section writes when set.
    pub admin_api_key: Option<Arc<str>>,
}

impl ServerState {
    pub fn new(sections: Arc<SectionRepository>, admin_api_key: Option<String>) -> Self {
        Self { sections, admin_api_key: admin_api_key.map(Arc::from) }
    }
}
