//! Navigator adapters

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::result::Result;
use crate::domain::Route;
use crate::ports::Navigator;

/// Navigator for headless use: records the redirect in the logs only
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNavigator;

#[async_trait]
impl Navigator for LogNavigator {
    async fn navigate(&self, route: Route) -> Result<()> {
        tracing::info!(route = %route, "Navigating");
        Ok(())
    }
}

/// Navigator that remembers every route it was sent to
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    routes: Mutex<Vec<Route>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Routes navigated to so far, oldest first
    pub fn routes(&self) -> Vec<Route> {
        self.routes
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl Navigator for RecordingNavigator {
    async fn navigate(&self, route: Route) -> Result<()> {
        self.routes
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(route);
        Ok(())
    }
}
