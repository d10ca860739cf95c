use crate::api::ApiContext;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) api: ApiContext,
    pub(crate) contact_body_limit_bytes: usize,
}
