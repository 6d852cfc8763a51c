use crate::off::OffClient;
use crate::store::Store;
use std::sync::Arc;

/// Explicit application context handed to every handler; nothing reads
/// storage or preferences ambiently.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Store>,
    pub off: OffClient,
}

impl AppState {
    pub fn new(store: Arc<Store>, off: OffClient) -> Self {
        Self { store, off }
    }
}
