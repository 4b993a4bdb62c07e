use mailmask_assign::{Strategy, Sweeper};
use std::collections::HashMap;
use std::sync::Arc;

/// Shared handler state: the named strategies and the expiry sweeper.
#[derive(Clone)]
pub struct AppState {
    strategies: HashMap<&'static str, Arc<dyn Strategy>>,
    sweeper: Arc<dyn Sweeper>,
}

impl AppState {
    pub fn new(
        default: Arc<dyn Strategy>,
        temporary: Arc<dyn Strategy>,
        sweeper: Arc<dyn Sweeper>,
    ) -> Self {
        let mut strategies: HashMap<&'static str, Arc<dyn Strategy>> = HashMap::new();
        strategies.insert("default", default);
        strategies.insert("temporary", temporary);
        Self {
            strategies,
            sweeper,
        }
    }

    /// Looks up a strategy by its request name.
    pub fn strategy(&self, name: &str) -> Option<Arc<dyn Strategy>> {
        self.strategies.get(name).cloned()
    }

    pub fn sweeper(&self) -> Arc<dyn Sweeper> {
        Arc::clone(&self.sweeper)
    }
}
