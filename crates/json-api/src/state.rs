//! State

use std::sync::Arc;

use maitre_app::context::AppContext;

use crate::transport::Transports;

#[derive(Clone)]
pub(crate) struct State {
    pub(crate) app: AppContext,
    pub(crate) transports: Transports,
}

impl State {
    #[must_use]
    pub(crate) fn new(app: AppContext, transports: Transports) -> Self {
        Self { app, transports }
    }

    #[must_use]
    pub(crate) fn from_app_context(app: AppContext, transports: Transports) -> Arc<Self> {
        Arc::new(Self::new(app, transports))
    }
}
