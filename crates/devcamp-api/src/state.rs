use std::sync::Arc;
use std::time::Duration;

use devcamp_lists::{ListService, Resources};
use devcamp_store::MemoryStore;

use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub lists: Arc<ListService<MemoryStore>>,
    pub resources: Arc<Resources>,
    pub request_timeout: Duration,
}

impl AppState {
    pub fn new(lists: ListService<MemoryStore>, resources: Resources, config: &Config) -> Self {
        Self {
            lists: Arc::new(lists),
            resources: Arc::new(resources),
            request_timeout: config.request_timeout,
        }
    }
}
