// Handler tiers: public (no auth) and protected (JWT bearer required)
use std::sync::Arc;

use crate::controller::ControllerRegistry;
use crate::database::DocStore;

pub mod public;
pub mod protected;

/// Shared read-only state injected into every handler as an `Extension`
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocStore>,
    pub controllers: Arc<ControllerRegistry>,
}

impl AppState {
    pub fn new(store: Arc<dyn DocStore>, controllers: ControllerRegistry) -> Self {
        Self {
            store,
            controllers: Arc::new(controllers),
        }
    }
}
