use std::sync::Arc;

use crate::store::Store;

/// Shared handler state. The store is the only shared resource; handlers
/// keep nothing else across requests.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &dyn Store {
        self.store.as_ref()
    }
}
