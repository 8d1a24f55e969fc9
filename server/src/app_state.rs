use std::sync::Arc;

use anothersky_core::{backend::Backend, config::DisplayConfig};

use crate::render::Templates;

pub struct AppState {
    pub backend: Backend,
    pub display: DisplayConfig,
    pub templates: Templates,
}

pub type SharedState = Arc<AppState>;
